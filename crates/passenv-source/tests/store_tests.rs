// SPDX-FileCopyrightText: 2026 passenv Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Directory-scan behaviour against temporary stores.

use passenv_core::{PassenvError, SecretReference};
use passenv_source::{ReferenceSource, StoreScan};
use passenv_test_utils::StoreFixture;

#[test]
fn only_direct_children_are_matched() {
    let store = StoreFixture::new().unwrap();
    store.entry("secrets/JIRA_TOKEN").unwrap();
    store.entry("secrets/claude/NESTED_TOKEN").unwrap();
    store.entry("other/ELSEWHERE").unwrap();

    let scan = StoreScan::new(store.root(), "secrets", ".gpg");
    let refs: Vec<_> = scan.load().unwrap().iter().cloned().collect();

    assert_eq!(refs, vec![SecretReference::new("JIRA_TOKEN", "secrets/JIRA_TOKEN")]);
}

#[test]
fn entries_are_sorted_and_normalized() {
    let store = StoreFixture::new().unwrap();
    store.entry("secrets/zeta-key").unwrap();
    store.entry("secrets/api.token").unwrap();
    store.entry("secrets/Mixed_case").unwrap();

    let scan = StoreScan::new(store.root(), "secrets", ".gpg");
    assert_eq!(
        scan.list_entries().unwrap(),
        vec!["secrets/Mixed_case", "secrets/api.token", "secrets/zeta-key"]
    );

    let set = scan.load().unwrap();
    assert_eq!(set.variable_names(), vec!["MIXED_CASE", "API_TOKEN", "ZETA_KEY"]);
}

#[test]
fn non_matching_files_and_folders_are_ignored() {
    let store = StoreFixture::new().unwrap();
    store.entry("secrets/KEEP").unwrap();
    store.file("secrets/README.md").unwrap();
    store.file("secrets/.gpg-id").unwrap();
    store.folder("secrets/dir.gpg").unwrap();
    store.file("secrets/.gpg").unwrap();

    let scan = StoreScan::new(store.root(), "secrets", ".gpg");
    assert_eq!(scan.list_entries().unwrap(), vec!["secrets/KEEP"]);
}

#[test]
fn nested_prefix_keeps_full_identifier() {
    let store = StoreFixture::new().unwrap();
    store.entry("work/api/DEPLOY_KEY").unwrap();

    let scan = StoreScan::new(store.root(), "work/api", ".gpg");
    let refs: Vec<_> = scan.load().unwrap().iter().cloned().collect();
    assert_eq!(refs, vec![SecretReference::new("DEPLOY_KEY", "work/api/DEPLOY_KEY")]);
}

#[test]
fn missing_prefix_is_not_found() {
    let store = StoreFixture::new().unwrap();
    store.entry("other/X").unwrap();

    let err = StoreScan::new(store.root(), "secrets", ".gpg")
        .load()
        .unwrap_err();
    assert!(matches!(err, PassenvError::NotFound(ref m) if m.contains("Prefix 'secrets' not found")));
}

#[test]
fn prefix_that_is_a_file_is_not_found() {
    let store = StoreFixture::new().unwrap();
    store.file("secrets").unwrap();

    let err = StoreScan::new(store.root(), "secrets", ".gpg")
        .load()
        .unwrap_err();
    assert!(matches!(err, PassenvError::NotFound(_)));
}

#[test]
fn empty_prefix_is_not_found() {
    let store = StoreFixture::new().unwrap();
    store.folder("secrets").unwrap();
    store.entry("secrets/nested/ONLY_NESTED").unwrap();

    let err = StoreScan::new(store.root(), "secrets", ".gpg")
        .load()
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "No secrets found under prefix 'secrets' (no *.gpg files)"
    );
}

#[test]
fn colliding_names_keep_the_later_entry() {
    let store = StoreFixture::new().unwrap();
    store.entry("secrets/db-pass").unwrap();
    store.entry("secrets/db_pass").unwrap();

    let set = StoreScan::new(store.root(), "secrets", ".gpg").load().unwrap();
    let refs: Vec<_> = set.iter().cloned().collect();
    assert_eq!(refs, vec![SecretReference::new("DB_PASS", "secrets/db_pass")]);
}

#[test]
fn order_follows_file_names_including_suffix() {
    let store = StoreFixture::new().unwrap();
    store.entry("secrets/a").unwrap();
    store.entry("secrets/a-b").unwrap();

    let scan = StoreScan::new(store.root(), "secrets", ".gpg");
    assert_eq!(scan.list_entries().unwrap(), vec!["secrets/a-b", "secrets/a"]);
}
