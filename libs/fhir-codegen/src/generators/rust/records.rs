//! Emission of record structs, their builders and trait impls

use heck::ToShoutySnakeCase;

use super::imports::Imports;
use super::types::{doc_text, Field, TypeOrigin};
use crate::generators::GeneratorConfig;
use crate::ir::{Constraint, TypeKind};

/// How a record stores its inherited elements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    /// `DomainResourceBase`, `domain_resource!`
    Resource,
    /// `BackboneBase`, `backbone_element!`
    Backbone,
    /// `ElementBase`, `complex_element!`
    Datatype,
}

impl RecordKind {
    fn base_type(&self) -> &'static str {
        match self {
            RecordKind::Resource => "DomainResourceBase",
            RecordKind::Backbone => "BackboneBase",
            RecordKind::Datatype => "ElementBase",
        }
    }

    fn caches_hash(&self) -> bool {
        !matches!(self, RecordKind::Datatype)
    }
}

/// One generated record: a resource, a datatype or a backbone element
#[derive(Debug)]
pub struct Record<'a> {
    pub kind: RecordKind,
    pub meta_kind: TypeKind,
    pub struct_name: &'a str,
    /// Runtime type name (`AuditEvent.Entity.Detail`)
    pub type_name: &'a str,
    pub base: Option<&'a str>,
    pub url: Option<&'a str>,
    pub description: Option<&'a str>,
    pub fields: Vec<Field<'a>>,
    pub constraints: &'a [Constraint],
}

impl Record<'_> {
    pub fn info_static(&self) -> String {
        format!("{}_INFO", self.struct_name.to_shouty_snake_case())
    }

    fn builder_name(&self) -> String {
        format!("{}Builder", self.struct_name)
    }
}

/// Type and target constants of a record's fields
pub fn generate_constants(record: &Record, imports: &mut Imports) -> String {
    let mut code = String::new();

    for field in &record.fields {
        if let Some(choice) = &field.choice {
            code.push_str(&format!(
                "const {}: &[&str] = &{:?};\n",
                choice.types_const,
                field.meta_types
            ));
        }
        if let Some(targets_const) = &field.targets_const {
            code.push_str(&format!(
                "const {}: &[&str] = &{:?};\n",
                targets_const, field.targets
            ));
        }
    }

    for field in &record.fields {
        let Some(choice) = &field.choice else {
            continue;
        };
        imports.add("types::choice", "choice_enum");
        code.push_str("\nchoice_enum! {\n");
        code.push_str(&format!("    /// {}\n", field.property.path));
        code.push_str(&format!("    pub enum {} {{\n", choice.enum_name));
        for (variant, ty) in &choice.variants {
            import_type(imports, &ty.name, ty.origin);
            code.push_str(&format!("        {}({}),\n", variant, ty.name));
        }
        code.push_str("    }\n}\n");
    }

    code
}

/// Struct, accessors, validation, trait impls and builder of a record
pub fn generate_record(record: &Record, config: &GeneratorConfig, imports: &mut Imports) -> String {
    let mut code = String::new();

    let base_module = match record.kind {
        RecordKind::Resource => "resource",
        RecordKind::Backbone | RecordKind::Datatype => "types",
    };
    imports.add(base_module, record.kind.base_type());
    imports.add("error", "Result");
    imports.add("builder", "finish");
    if record.kind.caches_hash() {
        imports.add("hash", "HashCache");
    }
    for field in &record.fields {
        if field.choice.is_none() {
            import_type(imports, &field.ty.name, field.ty.origin);
        }
    }

    code.push_str(&generate_struct(record, config));
    code.push_str("\n\n");
    code.push_str(&generate_impl(record, config, imports));
    code.push_str("\n\n");
    code.push_str(&generate_element_impls(record, imports));
    code.push_str("\n\n");
    code.push_str(&generate_visitable(record, imports));
    code.push_str("\n\n");
    code.push_str(&generate_builder(record, config, imports));

    code
}

fn import_type(imports: &mut Imports, name: &str, origin: TypeOrigin) {
    match origin {
        TypeOrigin::Datatype => imports.add("types", name),
        TypeOrigin::AnyResource => imports.add("resource", "AnyResource"),
        TypeOrigin::Local => {}
    }
}

fn generate_struct(record: &Record, config: &GeneratorConfig) -> String {
    let mut code = String::new();

    if config.generate_docs {
        code.push_str(&format!(
            "/// {}\n",
            doc_text(record.description.unwrap_or(record.type_name))
        ));
    }
    code.push_str("#[derive(Debug, Clone, PartialEq, Eq, Hash)]\n");
    code.push_str(&format!("pub struct {} {{\n", record.struct_name));
    code.push_str(&format!("    base: {},\n", record.kind.base_type()));
    for field in &record.fields {
        code.push_str(&format!("    {}: {},\n", field.ident, field.record_type()));
    }
    if record.kind.caches_hash() {
        code.push_str("    hash: HashCache,\n");
    }
    code.push('}');

    code
}

fn generate_impl(record: &Record, config: &GeneratorConfig, imports: &mut Imports) -> String {
    let mut code = String::new();
    let builder = record.builder_name();

    code.push_str(&format!("impl {} {{\n", record.struct_name));
    code.push_str(&format!(
        "    pub fn builder() -> {builder} {{\n        {builder}::default()\n    }}\n\n"
    ));

    code.push_str(&format!("    pub fn to_builder(&self) -> {builder} {{\n"));
    code.push_str(&format!("        {builder} {{\n"));
    code.push_str("            base: self.base.clone(),\n");
    for field in &record.fields {
        if field.is_unwrapped() {
            code.push_str(&format!(
                "            {0}: Some(self.{0}.clone()),\n",
                field.ident
            ));
        } else {
            code.push_str(&format!("            {0}: self.{0}.clone(),\n", field.ident));
        }
    }
    code.push_str("            skip_validation: false,\n");
    code.push_str("        }\n    }\n");

    for field in &record.fields {
        code.push('\n');
        if config.generate_docs {
            if let Some(desc) = &field.property.description {
                code.push_str(&format!("    /// {}\n", doc_text(desc)));
            }
        }
        let ty = &field.ty.name;
        if field.is_list() {
            code.push_str(&format!(
                "    pub fn {0}(&self) -> &[{1}] {{\n        &self.{0}\n    }}\n",
                field.ident, ty
            ));
        } else if field.is_required() {
            code.push_str(&format!(
                "    pub fn {0}(&self) -> &{1} {{\n        &self.{0}\n    }}\n",
                field.ident, ty
            ));
        } else {
            code.push_str(&format!(
                "    pub fn {0}(&self) -> Option<&{1}> {{\n        self.{0}.as_ref()\n    }}\n",
                field.ident, ty
            ));
        }
    }

    code.push_str("\n    fn validate(&self) -> Result<()> {\n");
    for check in validation_checks(record) {
        if check.starts_with("validation::") {
            imports.add("", "validation");
        }
        code.push_str(&format!("        {check}?;\n"));
    }
    if record.kind == RecordKind::Resource {
        code.push_str("        Ok(())\n");
    } else {
        imports.add("", "validation");
        code.push_str("        validation::require_value_or_children(self)\n");
    }
    code.push_str("    }\n}");

    code
}

/// Rule checks run by `validate()`, in field order
fn validation_checks(record: &Record) -> Vec<String> {
    let mut checks = Vec::new();

    if record.kind == RecordKind::Resource {
        checks.push("self.base.validate()".to_string());
    }

    for field in &record.fields {
        let wire = field.wire();
        let value = if field.is_unwrapped() {
            format!("Some(&self.{})", field.ident)
        } else {
            format!("self.{}.as_ref()", field.ident)
        };

        if let Some(choice) = &field.choice {
            // Required choices are checked when the builder unwraps them
            if !field.is_required() {
                checks.push(format!(
                    "validation::choice_element({value}, {wire:?}, {})",
                    choice.types_const
                ));
            }
            if let Some(targets) = &field.targets_const {
                checks.push(format!(
                    "validation::check_choice_reference_type({value}, {wire:?}, {targets})"
                ));
            }
            continue;
        }

        if field.is_list() && field.is_required() {
            checks.push(format!(
                "validation::check_non_empty_list(&self.{}, {wire:?})",
                field.ident
            ));
        }

        if field.checks_reference() {
            let targets = field.targets_const.as_deref().unwrap_or_default();
            if field.is_list() {
                checks.push(format!(
                    "validation::check_reference_types(&self.{}, {wire:?}, {targets})",
                    field.ident
                ));
            } else {
                checks.push(format!(
                    "validation::check_reference_type({value}, {wire:?}, {targets})"
                ));
            }
        }
    }

    checks
}

fn generate_element_impls(record: &Record, imports: &mut Imports) -> String {
    let builder = record.builder_name();
    match record.kind {
        RecordKind::Resource => {
            imports.add("resource", "domain_resource");
            format!("domain_resource!({}, {builder});", record.struct_name)
        }
        RecordKind::Backbone => {
            imports.add("types::element", "backbone_element");
            format!("backbone_element!({}, {builder});", record.struct_name)
        }
        RecordKind::Datatype => {
            imports.add("types::element", "complex_element");
            imports.add("builder", "ElementBuilder");
            format!(
                "complex_element!({});\n\n\
                 impl ElementBuilder for {builder} {{\n    \
                 fn element_base(&mut self) -> &mut ElementBase {{\n        \
                 &mut self.base\n    }}\n}}",
                record.struct_name
            )
        }
    }
}

fn generate_visitable(record: &Record, imports: &mut Imports) -> String {
    imports.add("visitor", "self");
    imports.add("visitor", "Visitable");
    imports.add("visitor", "Visitor");
    imports.add("model_support", "TypeInfo");

    let mut code = String::new();
    code.push_str(&format!("impl Visitable for {} {{\n", record.struct_name));
    code.push_str(&format!(
        "    fn type_name(&self) -> &'static str {{\n        {:?}\n    }}\n\n",
        record.type_name
    ));
    code.push_str(&format!(
        "    fn type_info(&self) -> &'static TypeInfo {{\n        &{}\n    }}\n\n",
        record.info_static()
    ));

    code.push_str("    fn has_children(&self) -> bool {\n");
    if record.fields.iter().any(|f| f.is_unwrapped()) {
        code.push_str("        true\n");
    } else {
        let mut terms = vec!["self.base.has_children()".to_string()];
        for field in &record.fields {
            if field.is_list() {
                terms.push(format!("!self.{}.is_empty()", field.ident));
            } else {
                terms.push(format!("self.{}.is_some()", field.ident));
            }
        }
        code.push_str(&format!("        {}\n", terms.join("\n            || ")));
    }
    code.push_str("    }\n\n");

    code.push_str(
        "    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {\n",
    );
    code.push_str("        visitor::visit_node(visitor, name, index, self, |v| {\n");
    code.push_str("            self.base.accept_children(v);\n");
    for field in &record.fields {
        let wire = field.wire();
        if field.is_list() {
            code.push_str(&format!(
                "            visitor::accept_list(v, {wire:?}, &self.{});\n",
                field.ident
            ));
        } else if field.is_required() {
            code.push_str(&format!(
                "            self.{}.accept({wire:?}, None, v);\n",
                field.ident
            ));
        } else {
            code.push_str(&format!(
                "            visitor::accept(v, {wire:?}, self.{}.as_ref());\n",
                field.ident
            ));
        }
    }
    code.push_str("        });\n    }\n\n");

    imports.add_std("std::any", "Any");
    code.push_str("    fn as_any(&self) -> &dyn Any {\n        self\n    }\n}");

    code
}

fn generate_builder(record: &Record, config: &GeneratorConfig, imports: &mut Imports) -> String {
    let builder = record.builder_name();
    let mut code = String::new();

    code.push_str("#[derive(Debug, Clone, Default)]\n");
    code.push_str(&format!("pub struct {builder} {{\n"));
    code.push_str(&format!("    base: {},\n", record.kind.base_type()));
    for field in &record.fields {
        code.push_str(&format!("    {}: {},\n", field.ident, field.builder_type()));
    }
    code.push_str("    skip_validation: bool,\n}\n\n");

    code.push_str(&format!("impl {builder} {{\n"));
    for field in &record.fields {
        code.push_str(&generate_setters(field, config));
        code.push('\n');
    }

    code.push_str(
        "    pub fn validating(mut self, validating: bool) -> Self {\n        \
         self.skip_validation = !validating;\n        self\n    }\n\n",
    );

    code.push_str(&format!(
        "    pub fn build(&self) -> Result<{}> {{\n",
        record.struct_name
    ));
    code.push_str("        let validate = !self.skip_validation;\n");
    code.push_str(&format!(
        "        finish({:?}, validate, || {{\n",
        record.type_name
    ));
    code.push_str(&format!("            let record = {} {{\n", record.struct_name));
    code.push_str("                base: self.base.clone(),\n");
    for field in &record.fields {
        let wire = field.wire();
        let ident = &field.ident;
        if !field.is_unwrapped() {
            code.push_str(&format!("                {ident}: self.{ident}.clone(),\n"));
        } else if let Some(choice) = &field.choice {
            imports.add("", "validation");
            code.push_str(&format!(
                "                {ident}: validation::require_choice_element(\n                    \
                 self.{ident}.clone(),\n                    {wire:?},\n                    {},\n                \
                 )?,\n",
                choice.types_const
            ));
        } else {
            imports.add("", "validation");
            code.push_str(&format!(
                "                {ident}: validation::require_non_null(self.{ident}.clone(), {wire:?})?,\n"
            ));
        }
    }
    if record.kind.caches_hash() {
        code.push_str("                hash: HashCache::default(),\n");
    }
    code.push_str("            };\n");
    code.push_str("            if validate {\n                record.validate()?;\n            }\n");
    code.push_str("            Ok(record)\n        })\n    }\n}");

    code
}

fn generate_setters(field: &Field, config: &GeneratorConfig) -> String {
    let mut code = String::new();
    let ident = &field.ident;
    let ty = &field.ty.name;

    if config.generate_docs {
        if let Some(choice) = &field.choice {
            let names: Vec<String> = choice
                .variants
                .iter()
                .map(|(_, t)| format!("`{}`", t.name))
                .collect();
            code.push_str(&format!("    /// {}\n", join_alternatives(&names)));
        }
    }

    let (param, value) = if field.takes_into() {
        (format!("impl Into<{ty}>"), format!("{ident}.into()"))
    } else {
        (ty.clone(), ident.clone())
    };

    if field.is_list() {
        code.push_str(&format!(
            "    pub fn {ident}(mut self, {ident}: {param}) -> Self {{\n        \
             self.{ident}.push({value});\n        self\n    }}\n\n"
        ));
        code.push_str(&format!(
            "    pub fn {}(mut self, {ident}: impl IntoIterator<Item = {ty}>) -> Self {{\n        \
             self.{ident} = {ident}.into_iter().collect();\n        self\n    }}\n",
            field.list_setter
        ));
    } else {
        code.push_str(&format!(
            "    pub fn {ident}(mut self, {ident}: {param}) -> Self {{\n        \
             self.{ident} = Some({value});\n        self\n    }}\n"
        ));
    }

    code
}

/// "`A`", "`A` or `B`", "`A`, `B` or `C`"
fn join_alternatives(names: &[String]) -> String {
    match names {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} or {}", init.join(", "), last),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_alternatives() {
        let names: Vec<String> = ["`Period`", "`DateTime`"].iter().map(|s| s.to_string()).collect();
        assert_eq!(join_alternatives(&names), "`Period` or `DateTime`");
        let names: Vec<String> = ["`A`", "`B`", "`C`"].iter().map(|s| s.to_string()).collect();
        assert_eq!(join_alternatives(&names), "`A`, `B` or `C`");
    }
}
