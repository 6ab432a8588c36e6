//! Recursive directory crawl over configured roots, producing a
//! deterministic list of file paths for the loader to read.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Walks every root in `roots`, collecting regular files whose extension is
/// in `extensions` (when given) and whose name does not start with `.`.
/// Directories starting with `.` are skipped entirely. Returns paths sorted
/// for determinism, mirroring the original's document-id ordering.
pub fn crawl(roots: &[PathBuf], extensions: Option<&[String]>) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for root in roots {
        walk_one(root, extensions, &mut paths)?;
    }
    paths.sort();
    Ok(paths)
}

fn walk_one(root: &Path, extensions: Option<&[String]>, out: &mut Vec<PathBuf>) -> Result<()> {
    let walker = WalkDir::new(root).into_iter().filter_entry(|e| {
        e.depth() == 0 || !is_dotfile(e.file_name())
    });
    for entry in walker {
        let entry = entry.map_err(|e| Error::Crawl {
            path: root.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::Other, e.to_string()),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        if is_dotfile(entry.file_name()) {
            continue;
        }
        if should_include(entry.path(), extensions) {
            out.push(entry.path().to_path_buf());
        }
    }
    Ok(())
}

fn is_dotfile(name: &std::ffi::OsStr) -> bool {
    name.to_str().map(|s| s.starts_with('.')).unwrap_or(false)
}

fn should_include(path: &Path, extensions: Option<&[String]>) -> bool {
    match extensions {
        None => true,
        Some(exts) => match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => exts.iter().any(|e| e == ext),
            None => false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn finds_regular_files_and_skips_dotfiles() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), b"hello").unwrap();
        fs::write(dir.path().join(".hidden"), b"nope").unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        fs::write(dir.path().join(".git").join("config"), b"nope").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("b.txt"), b"world").unwrap();

        let paths = crawl(&[dir.path().to_path_buf()], None).unwrap();
        assert_eq!(paths.len(), 2);
        assert!(paths.iter().all(|p| !p.to_string_lossy().contains(".hidden")));
        assert!(paths.iter().all(|p| !p.to_string_lossy().contains(".git")));
    }

    #[test]
    fn filters_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.rs"), b"fn main() {}").unwrap();
        fs::write(dir.path().join("b.toml"), b"x = 1").unwrap();
        fs::write(dir.path().join("c.md"), b"# hi").unwrap();

        let exts = vec!["rs".to_string(), "toml".to_string()];
        let paths = crawl(&[dir.path().to_path_buf()], Some(&exts)).unwrap();
        assert_eq!(paths.len(), 2);
    }

    #[test]
    fn result_is_sorted() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("z.txt"), b"z").unwrap();
        fs::write(dir.path().join("a.txt"), b"a").unwrap();
        let paths = crawl(&[dir.path().to_path_buf()], None).unwrap();
        let mut sorted = paths.clone();
        sorted.sort();
        assert_eq!(paths, sorted);
    }
}
