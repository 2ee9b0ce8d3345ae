//! `cd` mutates the process-wide current directory, so it lives in its own
//! test binary with a single test.

use shellkit::test_support::TestTree;
use shellkit::{ListOptions, cd, list, pwd};

#[test]
fn cd_changes_default_listing_root() {
    let tree = TestTree::project().expect("tree");
    let original = pwd().expect("pwd");

    cd(&tree.abs("sub")).expect("cd");
    let here = pwd().expect("pwd");
    assert_eq!(
        here.canonicalize().expect("canonicalize"),
        tree.abs("sub").canonicalize().expect("canonicalize")
    );

    let entries = list(None, &ListOptions::default()).expect("list cwd");
    let names: Vec<String> = entries.iter().map(|p| tree.relative(p)).collect();
    assert!(entries.iter().all(|p| p.is_absolute()));
    assert_eq!(names.len(), 2);

    let err = cd(&tree.abs("missing")).expect_err("missing dir");
    assert!(matches!(err, shellkit::ShellError::PathNotFound { .. }));

    cd(&original).expect("restore cwd");
}
