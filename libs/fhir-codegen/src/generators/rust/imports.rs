//! `use` declarations of a generated module

use std::collections::{BTreeMap, BTreeSet};

/// Items a module imports, grouped by path
#[derive(Debug, Default)]
pub struct Imports {
    std: BTreeMap<String, BTreeSet<String>>,
    runtime: BTreeMap<String, BTreeSet<String>>,
}

impl Imports {
    /// Import `item` from `path` under the runtime crate; an empty path
    /// imports a top-level module
    pub fn add(&mut self, path: &str, item: &str) {
        self.runtime
            .entry(path.to_string())
            .or_default()
            .insert(item.to_string());
    }

    pub fn add_std(&mut self, path: &str, item: &str) {
        self.std
            .entry(path.to_string())
            .or_default()
            .insert(item.to_string());
    }

    /// Render std imports, a blank line, then runtime imports
    pub fn render(&self, prefix: &str) -> String {
        let mut lines = Vec::new();

        for (path, items) in &self.std {
            lines.push(use_line(path, items));
        }
        if !self.std.is_empty() {
            lines.push(String::new());
        }

        let mut runtime: Vec<String> = Vec::new();
        for (path, items) in &self.runtime {
            if path.is_empty() {
                runtime.extend(items.iter().map(|item| format!("use {prefix}::{item};")));
            } else {
                runtime.push(use_line(&format!("{prefix}::{path}"), items));
            }
        }
        runtime.sort();
        lines.extend(runtime);

        let mut code = lines.join("\n");
        code.push('\n');
        code
    }
}

fn use_line(path: &str, items: &BTreeSet<String>) -> String {
    let mut items: Vec<&String> = items.iter().collect();
    items.sort_by_key(|item| {
        let lowercase = item.starts_with(|c: char| c.is_ascii_lowercase());
        (item.as_str() != "self", !lowercase, item.to_string())
    });

    match items.as_slice() {
        [single] if single.as_str() != "self" => format!("use {path}::{single};"),
        [_] => format!("use {path};"),
        _ => {
            let joined = items
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            format!("use {path}::{{{joined}}};")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_groups_and_orders_items() {
        let mut imports = Imports::default();
        imports.add_std("std::any", "Any");
        imports.add("visitor", "Visitor");
        imports.add("visitor", "self");
        imports.add("visitor", "Visitable");
        imports.add("resource", "DomainResourceBase");
        imports.add("resource", "domain_resource");
        imports.add("", "validation");
        imports.add("error", "Result");

        assert_eq!(
            imports.render("crate"),
            "use std::any::Any;\n\n\
             use crate::error::Result;\n\
             use crate::resource::{domain_resource, DomainResourceBase};\n\
             use crate::validation;\n\
             use crate::visitor::{self, Visitable, Visitor};\n"
        );
    }
}
