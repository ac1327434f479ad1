use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Write generated modules to the given output directory.
/// Creates the directory if it does not exist; files are written in name
/// order so repeated runs touch them identically.
pub fn write_modules(output_dir: &Path, modules: &HashMap<String, String>) -> Result<()> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("creating output directory {}", output_dir.display()))?;

    let mut names: Vec<&String> = modules.keys().collect();
    names.sort();

    for filename in names {
        let path = output_dir.join(filename);
        fs::write(&path, &modules[filename])
            .with_context(|| format!("writing generated file {}", path.display()))?;
        debug!(path = %path.display(), "Wrote module");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_modules_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested").join("out");
        let modules = HashMap::from([
            ("mod.rs".to_string(), "pub mod period;\n".to_string()),
            ("period.rs".to_string(), "//! Period\n".to_string()),
        ]);

        write_modules(&target, &modules).unwrap();
        assert_eq!(
            fs::read_to_string(target.join("period.rs")).unwrap(),
            "//! Period\n"
        );
        assert!(target.join("mod.rs").exists());
    }
}
