use nbagent_core::layout::{parse_revision_file_name, revision_file_name};
use nbagent_core::{BoardId, DataLayout, RevisionStore};
use proptest::prelude::*;
use serde_json::json;
use tempfile::TempDir;

proptest! {
    /// Property: within the 8-digit range, file name order equals numeric order
    #[test]
    fn prop_file_names_sort_numerically(mut revs in prop::collection::vec(0u64..100_000_000, 1..50)) {
        let mut names: Vec<String> = revs.iter().map(|r| revision_file_name(*r)).collect();
        names.sort();
        revs.sort();

        let parsed: Vec<u64> = names.iter().filter_map(|n| parse_revision_file_name(n)).collect();
        prop_assert_eq!(parsed, revs);
    }

    /// Property: N distinct saved revisions give N files, read back in the same order
    #[test]
    fn prop_saved_revisions_listed_in_order(revs in prop::collection::btree_set(0u64..100_000_000, 1..20)) {
        let temp = TempDir::new().unwrap();
        let layout = DataLayout::with_root(temp.path().to_path_buf());
        layout.ensure().unwrap();
        let store = RevisionStore::new(layout);
        let id = BoardId::new("prop-board").unwrap();

        for rev in &revs {
            store.save_revision(&id, &json!({"title": "p", "revision": rev}), &json!({})).unwrap();
        }

        let mut on_disk: Vec<String> = std::fs::read_dir(temp.path().join("boards/prop-board"))
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|n| n != "meta.json")
            .collect();
        on_disk.sort();

        let expected: Vec<u64> = revs.iter().copied().collect();
        let from_names: Vec<u64> = on_disk.iter().filter_map(|n| parse_revision_file_name(n)).collect();
        prop_assert_eq!(on_disk.len(), revs.len());
        prop_assert_eq!(&from_names, &expected);
        prop_assert_eq!(store.list_revisions(&id).unwrap(), expected);
    }
}
