//! Integration tests for walking real trees through the facade.
//!
//! Covers visitation guarantees, ordering, and error reporting across
//! symlinks, seeded visited sets and unreadable directories.

use fsutils::{WalkBuilder, WalkEntry};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use test_support::TempTree;

fn paths(entries: &[WalkEntry]) -> Vec<PathBuf> {
    entries.iter().map(|e| e.path().to_path_buf()).collect()
}

fn names(list: &[OsString]) -> Vec<String> {
    let mut names: Vec<String> = list
        .iter()
        .map(|n| n.to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

fn entry_for<'e>(entries: &'e [WalkEntry], path: &Path) -> &'e WalkEntry {
    entries
        .iter()
        .find(|e| e.path() == path)
        .unwrap_or_else(|| panic!("no entry for {}", path.display()))
}

// ============================================================================
// Plain Trees
// ============================================================================

#[test]
fn every_directory_is_produced_once() {
    let tree = TempTree::new();
    tree.file("a/one.txt", "1");
    tree.file("a/b/two.txt", "2");
    tree.dir("a/b/c");
    tree.dir("d");

    let (entries, errors) = fsutils::walk::walk(tree.root()).collect_with_errors();

    assert!(errors.is_empty());
    let mut produced = paths(&entries);
    produced.sort();
    let mut expected = vec![
        tree.root().to_path_buf(),
        tree.path("a"),
        tree.path("a/b"),
        tree.path("a/b/c"),
        tree.path("d"),
    ];
    expected.sort();
    assert_eq!(produced, expected);
}

#[test]
fn names_partition_each_listing() {
    let tree = TempTree::new();
    tree.file("x.txt", "x");
    tree.file("y.txt", "y");
    tree.dir("sub");

    let entries: Vec<_> = WalkBuilder::new(tree.root()).build().collect();
    let root = entry_for(&entries, tree.root());

    assert_eq!(names(root.subdirs()), ["sub"]);
    assert_eq!(names(root.files()), ["x.txt", "y.txt"]);
}

#[test]
fn bottom_up_places_children_before_parents() {
    let tree = TempTree::new();
    tree.dir("p/q/r");
    tree.dir("p/s");

    let entries: Vec<_> = WalkBuilder::new(tree.root()).topdown(false).build().collect();
    let produced = paths(&entries);
    let index = |rel: &str| {
        produced
            .iter()
            .position(|p| *p == tree.path(rel))
            .unwrap_or_else(|| panic!("{rel} missing"))
    };

    assert_eq!(produced.last(), Some(&tree.root().to_path_buf()));
    assert!(index("p/q/r") < index("p/q"));
    assert!(index("p/q") < index("p"));
    assert!(index("p/s") < index("p"));
}

#[test]
fn missing_top_produces_nothing_and_reports() {
    let tree = TempTree::new();
    let missing = tree.path("absent");

    let (entries, errors) = WalkBuilder::new(&missing).build().collect_with_errors();

    assert!(entries.is_empty());
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].path(), missing.as_path());
}

// ============================================================================
// Symlinks
// ============================================================================

#[cfg(unix)]
mod symlinks {
    use super::*;

    #[test]
    fn ancestor_cycle_terminates() {
        let tree = TempTree::new();
        tree.dir("a/b");
        tree.symlink("../..", "a/b/loop");

        for topdown in [true, false] {
            let (entries, errors) = WalkBuilder::new(tree.root())
                .topdown(topdown)
                .build()
                .collect_with_errors();
            assert!(errors.is_empty());
            assert_eq!(entries.len(), 3, "topdown={topdown}");
            let b = entry_for(&entries, &tree.path("a/b"));
            assert_eq!(names(b.subdirs()), ["loop"]);
        }
    }

    #[test]
    fn sibling_links_to_one_directory_descend_once() {
        let tree = TempTree::new();
        tree.file("target/inner/file.txt", "x");
        tree.symlink("target", "link1");
        tree.symlink("target", "link2");

        let entries: Vec<_> = fsutils::walk::walk(tree.root()).collect();

        let inner_entries = entries
            .iter()
            .filter(|e| e.path().ends_with("inner"))
            .count();
        assert_eq!(inner_entries, 1);
        assert_eq!(entries.len(), 3);
    }

    #[test]
    fn not_following_links_keeps_them_as_files() {
        let tree = TempTree::new();
        tree.dir("real");
        tree.symlink("real", "alias");

        let entries: Vec<_> = WalkBuilder::new(tree.root())
            .follow_links(false)
            .build()
            .collect();

        assert_eq!(entries.len(), 2);
        let root = entry_for(&entries, tree.root());
        assert_eq!(names(root.subdirs()), ["real"]);
        assert_eq!(names(root.files()), ["alias"]);
    }

    #[test]
    fn visited_set_carries_across_walks() {
        let tree = TempTree::new();
        tree.dir("shared/deep");
        tree.dir("first");
        tree.symlink("../shared", "first/link");
        tree.dir("second");
        tree.symlink("../shared", "second/link");

        let mut walker = WalkBuilder::new(tree.path("first")).build();
        let first: Vec<_> = walker.by_ref().collect();
        let visited = walker.into_visited();
        assert_eq!(first.iter().filter(|e| e.path().ends_with("deep")).count(), 1);

        let second: Vec<_> = WalkBuilder::new(tree.path("second"))
            .visited(visited)
            .build()
            .collect();
        assert_eq!(paths(&second), [tree.path("second")]);
    }

    #[test]
    fn seeding_every_directory_yields_nothing() {
        let tree = TempTree::new();
        tree.dir("only");

        let mut walker = WalkBuilder::new(tree.root()).build();
        walker.by_ref().for_each(drop);
        let visited = walker.into_visited();
        assert_eq!(visited.len(), 2);

        let again: Vec<_> = WalkBuilder::new(tree.root())
            .visited(visited)
            .build()
            .collect();
        assert!(again.is_empty());
    }
}

// ============================================================================
// Error Reporting
// ============================================================================

#[cfg(unix)]
#[test]
fn unreadable_directory_is_skipped_and_observed() {
    use std::cell::RefCell;
    use test_support::PermissionGuard;

    let tree = TempTree::new();
    tree.file("open/a.txt", "a");
    let locked = tree.dir("locked");
    tree.dir("locked/hidden");
    let Some(_guard) = PermissionGuard::deny_all(&locked).expect("chmod") else {
        return;
    };

    let observed = RefCell::new(Vec::new());
    let mut walker = WalkBuilder::new(tree.root())
        .on_error(|error| observed.borrow_mut().push(error.path().to_path_buf()))
        .build();
    let produced = paths(&walker.by_ref().collect::<Vec<_>>());
    let recorded = walker.take_errors();
    drop(walker);

    assert!(produced.contains(&tree.path("open")));
    assert!(!produced.contains(&locked));
    assert!(!produced.contains(&tree.path("locked/hidden")));
    assert_eq!(observed.into_inner(), [locked.clone()]);
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].path(), locked.as_path());
}
