use crate::error::HostError;
use crate::store::ScriptStore;
use relative_path::{RelativePath, RelativePathBuf};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid scripts root: {0}")]
    InvalidRoot(String),
    #[error(transparent)]
    Host(#[from] HostError),
}

/// Read a script file and return its content
pub fn read_script(relative_path: &RelativePath, root: &Path) -> Result<String, IoError> {
    let absolute_path = relative_path.to_path(root);
    if !absolute_path.exists() {
        return Err(IoError::NotFound(absolute_path));
    }
    fs::read_to_string(&absolute_path).map_err(IoError::Io)
}

/// Find script files under `root` whose extension is one of `extensions`.
///
/// Returns `/`-separated paths relative to `root`, sorted.
pub fn scan_scripts(root: &Path, extensions: &[&str]) -> Result<Vec<RelativePathBuf>, IoError> {
    validate_root(root)?;

    let mut files = Vec::new();
    scan_directory_recursive(root, extensions, &mut files)?;

    let mut relative = files
        .iter()
        .filter_map(|path| path.strip_prefix(root).ok())
        .map(RelativePathBuf::from_path)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| IoError::InvalidRoot(e.to_string()))?;
    relative.sort();
    Ok(relative)
}

/// Register every matching script under `root` in `store`, named by its
/// relative path. Returns the registered names.
pub fn load_scripts(
    store: &mut ScriptStore,
    root: &Path,
    extensions: &[&str],
) -> Result<Vec<String>, IoError> {
    let mut names = Vec::new();
    for relative_path in scan_scripts(root, extensions)? {
        let content = read_script(&relative_path, root)?;
        let name = relative_path.as_str().to_string();
        store.register(name.clone(), &content)?;
        names.push(name);
    }
    tracing::debug!(root = %root.display(), count = names.len(), "loaded scripts");
    Ok(names)
}

fn scan_directory_recursive(
    dir: &Path,
    extensions: &[&str],
    files: &mut Vec<PathBuf>,
) -> Result<(), IoError> {
    let entries = fs::read_dir(dir).map_err(IoError::Io)?;

    for entry in entries {
        let entry = entry.map_err(IoError::Io)?;
        let path = entry.path();

        if path.is_dir() {
            scan_directory_recursive(&path, extensions, files)?;
        } else if let Some(ext) = path.extension()
            && extensions.iter().any(|wanted| ext == *wanted)
        {
            files.push(path);
        }
    }

    Ok(())
}

pub fn validate_root(path: &Path) -> Result<(), IoError> {
    if !path.exists() || !path.is_dir() {
        return Err(IoError::InvalidRoot(
            "scripts directory not found".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{create_test_file, create_test_root};

    #[test]
    fn test_scan_finds_matching_extensions_only() {
        let root = create_test_root();
        create_test_file(&root, "main.ts", "var a;");
        create_test_file(&root, "lib.d.ts", "declare var b;");
        create_test_file(&root, "notes.md", "# not a script");

        let files = scan_scripts(root.path(), &["ts"]).unwrap();
        let names: Vec<&str> = files.iter().map(|f| f.as_str()).collect();

        assert_eq!(names, vec!["lib.d.ts", "main.ts"]);
    }

    #[test]
    fn test_scan_nested_directories() {
        let root = create_test_root();
        create_test_file(&root, "root.ts", "");
        create_test_file(&root, "src/util/strings.ts", "");

        let files = scan_scripts(root.path(), &["ts"]).unwrap();
        let names: Vec<&str> = files.iter().map(|f| f.as_str()).collect();

        assert_eq!(names, vec!["root.ts", "src/util/strings.ts"]);
    }

    #[test]
    fn test_load_registers_by_relative_name() {
        let root = create_test_root();
        create_test_file(&root, "a.ts", "var a = 1;");
        create_test_file(&root, "sub/b.js", "var b = 2;");
        let mut store = ScriptStore::new();

        let names = load_scripts(&mut store, root.path(), &["ts", "js"]).unwrap();

        assert_eq!(names, vec!["a.ts", "sub/b.js"]);
        assert_eq!(store.document("sub/b.js").unwrap().text(), "var b = 2;");
        assert_eq!(store.document("a.ts").unwrap().version(), 1);
    }

    #[test]
    fn test_load_twice_reports_duplicate() {
        let root = create_test_root();
        create_test_file(&root, "a.ts", "");
        let mut store = ScriptStore::new();
        load_scripts(&mut store, root.path(), &["ts"]).unwrap();

        let result = load_scripts(&mut store, root.path(), &["ts"]);

        assert!(matches!(
            result,
            Err(IoError::Host(HostError::DuplicateName(_)))
        ));
    }

    #[test]
    fn test_invalid_root() {
        let result = scan_scripts(Path::new("/this/path/does/not/exist"), &["ts"]);
        assert!(matches!(result, Err(IoError::InvalidRoot(_))));
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("scripts directory")
        );
    }

    #[test]
    fn test_read_script_not_found() {
        let root = create_test_root();
        let result = read_script(RelativePath::new("missing.ts"), root.path());
        assert!(matches!(result, Err(IoError::NotFound(_))));
    }
}
