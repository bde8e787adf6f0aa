// tests/support.rs
//! Test utilities — throwaway store directories

use std::fs;
use std::path::{Path, PathBuf};

use encrypted_secret_store::{KeySize, MasterKey, Store};
use tempfile::TempDir;

#[allow(dead_code)] // Not every test binary uses every helper
pub struct TestStore {
    pub store: Store,
    pub key: MasterKey,
    dir: TempDir,
}

#[allow(dead_code)]
impl TestStore {
    /// Fresh store in a new temp directory, sealed with a random key of `size`
    pub fn new(size: KeySize) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let key = MasterKey::generate(size);
        let store = Store::open_single(dir.path(), &key).expect("open fresh store");
        Self { store, key, dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path of an entry file under the default layout
    pub fn entry_file(&self, name: &str) -> PathBuf {
        self.dir.path().join(format!("{name}.secret"))
    }

    pub fn marker_file(&self) -> PathBuf {
        self.dir.path().join("check.check")
    }

    /// Raw envelope bytes for `name`
    pub fn raw(&self, name: &str) -> Vec<u8> {
        fs::read(self.entry_file(name)).expect("read entry file")
    }

    /// Flip one bit of the stored envelope for `name`
    pub fn tamper(&self, name: &str, offset: usize) {
        let mut bytes = self.raw(name);
        bytes[offset] ^= 0x01;
        fs::write(self.entry_file(name), bytes).expect("write tampered entry");
    }

    /// Every file name in the store directory, sorted
    pub fn file_names(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.dir.path())
            .expect("read store dir")
            .map(|e| e.expect("dir entry").file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    /// Snapshot of every file's bytes, sorted by name
    pub fn snapshot(&self) -> Vec<(String, Vec<u8>)> {
        self.file_names()
            .into_iter()
            .map(|n| {
                let bytes = fs::read(self.dir.path().join(&n)).expect("read file");
                (n, bytes)
            })
            .collect()
    }
}

impl Default for TestStore {
    fn default() -> Self {
        Self::new(KeySize::Aes256)
    }
}
