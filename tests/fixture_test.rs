use copydir::fixture::{tree, CurrentDirGuard};
use copydir::{copy_tree, dot_rename, TemplateData};
use std::path::PathBuf;
use tempfile::TempDir;

#[test_log::test]
fn test_current_dir_guard_restores_on_drop() {
    let original = std::env::current_dir().unwrap();
    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().canonicalize().unwrap();

    {
        let guard = CurrentDirGuard::change_to(&target).unwrap();
        assert_eq!(guard.previous(), original);
        assert_eq!(std::env::current_dir().unwrap(), target);

        // Relative destinations resolve against the new directory.
        let src = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/repo");
        copy_tree(&src, ".", &dot_rename, &TemplateData::new()).unwrap();
        assert!(target.join("repo/.git/config").is_file());
    }

    assert_eq!(std::env::current_dir().unwrap(), original);
}

#[test]
fn test_current_dir_guard_missing_dir() {
    let temp_dir = TempDir::new().unwrap();
    assert!(CurrentDirGuard::change_to(temp_dir.path().join("absent")).is_err());
}

#[test]
#[ignore = "Requires the tree utility"]
fn test_tree_lists_hidden_entries() {
    let src = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/repo");
    let dst = TempDir::new().unwrap();
    copy_tree(&src, dst.path(), &dot_rename, &TemplateData::new()).unwrap();

    let listing = tree(dst.path()).unwrap();
    assert!(listing.contains(".git"));
    assert!(listing.contains("README.md"));
}
