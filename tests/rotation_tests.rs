// tests/rotation_tests.rs
use std::fs;

use encrypted_secret_store::{open, KeySize, MasterKey, RecodeStrategy, Store, StoreError};

mod common;
mod support;
use support::TestStore;

#[test]
fn test_recode_rotates_every_entry_and_marker() {
    common::setup();
    let mut t = TestStore::default();
    let k1 = t.key.clone();
    let k2 = MasterKey::generate(KeySize::Aes128);

    t.store.put("a", "v1").unwrap();
    t.store.put("b", "v2").unwrap();

    let report = t.store.recode(&k2).unwrap();
    assert_eq!(report.entries, 2);
    assert_eq!(report.strategy, RecodeStrategy::Staged);
    assert_eq!(report.old_fingerprint, k1.fingerprint());
    assert_eq!(report.new_fingerprint, k2.fingerprint());

    // The live store already uses the new key
    assert_eq!(t.store.active_key_fingerprint(), k2.fingerprint());
    assert_eq!(t.store.get("a").unwrap(), b"v1");

    let reopened = Store::open(t.path(), &[k1.clone(), k2.clone()]).unwrap();
    assert_eq!(reopened.active_key_fingerprint(), k2.fingerprint());
    assert_eq!(reopened.get("a").unwrap(), b"v1");
    assert_eq!(reopened.get("b").unwrap(), b"v2");

    assert!(matches!(
        Store::open(t.path(), &[k1.clone()]),
        Err(StoreError::NoMatchingKey { candidates: 1 })
    ));

    // Raw envelopes are sealed under k2 only
    for name in ["a", "b"] {
        let raw = t.raw(name);
        assert!(open(&k2, &raw).is_ok());
        assert!(matches!(open(&k1, &raw), Err(StoreError::Integrity)));
    }
}

#[test]
fn test_recode_in_place_rotates_every_entry() {
    let t = TestStore::new(KeySize::Aes192);
    let k2 = MasterKey::generate(KeySize::Aes256);
    let mut store = Store::open_single(t.path(), &t.key)
        .unwrap()
        .with_strategy(RecodeStrategy::InPlace);

    for i in 0..5 {
        store.put(&format!("e{i}"), format!("value {i}")).unwrap();
    }
    let report = store.recode(&k2).unwrap();
    assert_eq!(report.entries, 5);
    assert_eq!(report.strategy, RecodeStrategy::InPlace);

    let reopened = Store::open_single(t.path(), &k2).unwrap();
    for i in 0..5 {
        assert_eq!(
            reopened.get(&format!("e{i}")).unwrap(),
            format!("value {i}").as_bytes()
        );
    }
}

#[test]
fn test_recode_empty_store_moves_marker() {
    let mut t = TestStore::default();
    let k2 = MasterKey::generate(KeySize::Aes256);

    let report = t.store.recode(&k2).unwrap();
    assert_eq!(report.entries, 0);

    Store::open_single(t.path(), &k2).unwrap();
    assert!(Store::open_single(t.path(), &t.key).is_err());
}

#[test]
fn test_recode_to_same_key_reseals_with_fresh_nonces() {
    let mut t = TestStore::default();
    t.store.put("a", "v").unwrap();
    let before = t.raw("a");

    let same = t.key.clone();
    t.store.recode(&same).unwrap();
    let after = t.raw("a");

    assert_ne!(before, after);
    assert_eq!(t.store.get("a").unwrap(), b"v");
}

#[test]
fn test_recode_rejects_invalid_key_without_side_effects() {
    let mut t = TestStore::default();
    t.store.put("a", "v").unwrap();
    let before = t.snapshot();

    for len in [15usize, 17, 20, 33] {
        let err = t.store.recode(vec![9u8; len]).unwrap_err();
        assert!(matches!(err, StoreError::InvalidKeySize { actual } if actual == len));
    }

    assert_eq!(t.snapshot(), before);
    assert_eq!(t.store.active_key_fingerprint(), t.key.fingerprint());
}

#[test]
fn test_staged_recode_failure_leaves_directory_unchanged() {
    let mut t = TestStore::default();
    for name in ["a", "b", "c", "d"] {
        t.store.put(name, name).unwrap();
    }
    t.tamper("c", 20);
    let before = t.snapshot();

    let k2 = MasterKey::generate(KeySize::Aes256);
    let err = t.store.recode(&k2).unwrap_err();
    assert!(matches!(err, StoreError::Integrity));

    // Byte-identical, no staging leftovers, old key still active
    assert_eq!(t.snapshot(), before);
    assert_eq!(t.store.active_key_fingerprint(), t.key.fingerprint());
    assert_eq!(t.store.get("a").unwrap(), b"a");

    let reopened = Store::open(t.path(), &[k2, t.key.clone()]).unwrap();
    assert_eq!(reopened.active_key_fingerprint(), t.key.fingerprint());
}

#[test]
fn test_in_place_recode_failure_leaves_mixed_keys() {
    let t = TestStore::default();
    let k1 = t.key.clone();
    let k2 = MasterKey::generate(KeySize::Aes128);
    let mut store = Store::open_single(t.path(), &k1)
        .unwrap()
        .with_strategy(RecodeStrategy::InPlace);

    let names = ["a", "b", "c", "d", "e", "f"];
    for name in names {
        store.put(name, name).unwrap();
    }
    t.tamper("d", 20);

    let err = store.recode(&k2).unwrap_err();
    assert!(matches!(err, StoreError::Integrity));
    assert_eq!(store.active_key_fingerprint(), k1.fingerprint());

    // Every intact entry is readable under exactly one of the two keys
    for name in names.iter().filter(|n| **n != "d") {
        let raw = t.raw(name);
        let under_old = open(&k1, &raw).is_ok();
        let under_new = open(&k2, &raw).is_ok();
        assert!(under_old ^ under_new, "{name} readable under neither or both");
    }

    // The marker was not moved
    let reopened = Store::open(t.path(), &[k2, k1.clone()]).unwrap();
    assert_eq!(reopened.active_key_fingerprint(), k1.fingerprint());
}

#[test]
fn test_recode_skips_foreign_files() {
    let mut t = TestStore::default();
    t.store.put("a", "v").unwrap();
    fs::write(t.path().join("README.txt"), b"not an envelope").unwrap();

    let k2 = MasterKey::generate(KeySize::Aes192);
    assert_eq!(t.store.recode(&k2).unwrap().entries, 1);
    assert_eq!(fs::read(t.path().join("README.txt")).unwrap(), b"not an envelope");
}

#[test]
fn test_repeated_rotation_chain() {
    let mut t = TestStore::new(KeySize::Aes128);
    t.store.put("chain", "survives").unwrap();

    let mut history = vec![t.key.clone()];
    for size in [KeySize::Aes192, KeySize::Aes256, KeySize::Aes128] {
        let next = MasterKey::generate(size);
        t.store.recode(&next).unwrap();
        history.push(next);
    }

    let reopened = Store::open(t.path(), &history[..]).unwrap();
    assert_eq!(
        reopened.active_key_fingerprint(),
        history[history.len() - 1].fingerprint()
    );
    assert_eq!(reopened.get("chain").unwrap(), b"survives");
}

#[test]
fn test_staged_recode_of_large_store() {
    let mut t = TestStore::new(KeySize::Aes128);
    let k2 = MasterKey::generate(KeySize::Aes256);
    let count = 2_000;

    for i in 0..count {
        t.store.put(&format!("entry-{i:04}"), format!("value {i}")).unwrap();
    }
    let report = t.store.recode(&k2).unwrap();
    assert_eq!(report.entries, count);

    let reopened = Store::open_single(t.path(), &k2).unwrap();
    assert_eq!(reopened.list().unwrap().len(), count);
    for i in [0, count / 2, count - 1] {
        assert_eq!(
            reopened.get(&format!("entry-{i:04}")).unwrap(),
            format!("value {i}").as_bytes()
        );
    }
    // Marker plus one file per entry, no staging leftovers
    assert_eq!(t.file_names().len(), count + 1);
}
