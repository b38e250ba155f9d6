//! Replay path discovery and validation.

use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use globset::GlobSet;
use walkdir::WalkDir;

use super::error::ExecError;
use crate::replay::ReplayDecoder;

fn trimmed(path: &Path) -> PathBuf {
    match path.to_str() {
        Some(s) => PathBuf::from(s.trim()),
        None => path.to_path_buf(),
    }
}

/// Trim, dedupe and sort replay paths.
///
/// Paths the decoder does not handle are skipped silently. Paths that do not
/// exist or cannot be inspected are reported and skipped.
pub fn filter_replay_paths(
    paths: &[PathBuf],
    decoder: &dyn ReplayDecoder,
) -> (Vec<PathBuf>, Vec<ExecError>) {
    let unique: BTreeSet<PathBuf> = paths.iter().map(|p| trimmed(p)).collect();

    let mut kept = Vec::with_capacity(unique.len());
    let mut errors = Vec::new();
    for path in unique {
        if path.as_os_str().is_empty() || !decoder.handles_path(&path) {
            continue;
        }
        match fs::metadata(&path) {
            Ok(_) => kept.push(path),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                errors.push(ExecError::ReplayNotFound(path));
            }
            Err(source) => errors.push(ExecError::ReplayPathUnreadable { path, source }),
        }
    }
    (kept, errors)
}

/// Recursively collect replay files under `root`, skipping paths matched by
/// `excluded`.
pub fn collect_replay_dir(
    root: &Path,
    decoder: &dyn ReplayDecoder,
    excluded: &GlobSet,
) -> Result<Vec<PathBuf>, walkdir::Error> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !excluded.is_match(e.path()))
    {
        let entry = entry?;
        if entry.file_type().is_file() && decoder.handles_path(entry.path()) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replay::ScrepJsonDecoder;
    use globset::{Glob, GlobSetBuilder};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_filter_dedupes_sorts_and_skips() {
        let temp = TempDir::new().unwrap();
        let b = temp.path().join("b.json");
        let a = temp.path().join("a.json");
        fs::write(&a, "{}").unwrap();
        fs::write(&b, "{}").unwrap();
        let missing = temp.path().join("missing.json");

        let padded = PathBuf::from(format!("  {}  ", a.display()));
        let input = vec![
            b.clone(),
            padded,
            a.clone(),
            temp.path().join("notes.txt"),
            temp.path().join(".json"),
            PathBuf::from("   "),
            missing.clone(),
        ];

        let (kept, errors) = filter_replay_paths(&input, &ScrepJsonDecoder::new());
        assert_eq!(kept, vec![a, b]);
        assert_eq!(errors.len(), 1);
        assert!(matches!(&errors[0], ExecError::ReplayNotFound(p) if *p == missing));
    }

    #[test]
    fn test_collect_replay_dir() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("ladder").join("2020");
        let skipped = temp.path().join("skip");
        fs::create_dir_all(&nested).unwrap();
        fs::create_dir_all(&skipped).unwrap();
        fs::write(nested.join("one.json"), "{}").unwrap();
        fs::write(temp.path().join("two.json"), "{}").unwrap();
        fs::write(temp.path().join("readme.md"), "").unwrap();
        fs::write(skipped.join("three.json"), "{}").unwrap();

        let mut builder = GlobSetBuilder::new();
        builder.add(Glob::new("**/skip").unwrap());
        let excluded = builder.build().unwrap();

        let files = collect_replay_dir(temp.path(), &ScrepJsonDecoder::new(), &excluded).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.iter().any(|f| f.ends_with("ladder/2020/one.json")));
        assert!(files.iter().any(|f| f.ends_with("two.json")));
    }

    #[test]
    fn test_collect_missing_dir_errors() {
        let temp = TempDir::new().unwrap();
        let result = collect_replay_dir(
            &temp.path().join("nope"),
            &ScrepJsonDecoder::new(),
            &GlobSet::empty(),
        );
        assert!(result.is_err());
    }
}
