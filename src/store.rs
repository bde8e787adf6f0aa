// src/store.rs
//! Directory of named, individually sealed secrets
//!
//! One `Store` owns one directory and exactly one active key. The active key
//! is picked at open time by trying each candidate against the check marker
//! and only changes after a fully successful `recode`.
//!
//! There is no locking: concurrent writers against the same directory,
//! or any operation racing a `recode`, must be serialized by the caller.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::consts::CHECK_PLAINTEXT;
use crate::core::crypto::{open, seal};
use crate::core::file;
use crate::core::layout::EntryLayout;
use crate::enums::RecodeStrategy;
use crate::error::{Result, StoreError};
use crate::key_ops::MasterKey;
use crate::payload;
use crate::rotate_keys::{self, RecodeReport};

#[derive(Debug)]
pub struct Store {
    dir: PathBuf,
    layout: EntryLayout,
    strategy: RecodeStrategy,
    active: MasterKey,
}

impl Store {
    /// Open (or initialize) `dir`, resolving the active key among `candidates`
    ///
    /// Candidates are tried in order against the check marker. A fresh
    /// directory is initialized with the first candidate.
    pub fn open<P, K>(dir: P, candidates: &[K]) -> Result<Self>
    where
        P: AsRef<Path>,
        K: AsRef<[u8]>,
    {
        Self::with_layout(dir, candidates, EntryLayout::default())
    }

    /// Single-key mode
    pub fn open_single<P, K>(dir: P, key: K) -> Result<Self>
    where
        P: AsRef<Path>,
        K: AsRef<[u8]>,
    {
        Self::open(dir, std::slice::from_ref(&key))
    }

    /// Open using the directory, suffixes and recode strategy from `config`
    pub fn from_config<K: AsRef<[u8]>>(config: &Config, candidates: &[K]) -> Result<Self> {
        let layout = config.entry_layout()?;
        let store = Self::with_layout(&config.paths.store_dir, candidates, layout)?;
        Ok(store.with_strategy(config.rotation.strategy))
    }

    pub fn with_layout<P, K>(dir: P, candidates: &[K], layout: EntryLayout) -> Result<Self>
    where
        P: AsRef<Path>,
        K: AsRef<[u8]>,
    {
        // Every key is validated before the filesystem is touched
        let keys = candidates
            .iter()
            .map(MasterKey::new)
            .collect::<Result<Vec<_>>>()?;

        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;

        let swept = file::sweep_staging(&dir)?;
        if swept > 0 {
            warn!(dir = %dir.display(), swept, "removed staging files from an interrupted write");
        }

        let marker = dir.join(layout.marker_file_name());
        let active = if marker.is_file() {
            resolve_active_key(&marker, keys)?
        } else {
            initialize(&dir, &marker, keys)?
        };

        Ok(Self {
            dir,
            layout,
            strategy: RecodeStrategy::default(),
            active,
        })
    }

    pub fn with_strategy(mut self, strategy: RecodeStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn layout(&self) -> &EntryLayout {
        &self.layout
    }

    pub fn strategy(&self) -> RecodeStrategy {
        self.strategy
    }

    pub fn active_key_fingerprint(&self) -> String {
        self.active.fingerprint()
    }

    /// Seal `plaintext` under the active key, fully replacing any prior entry
    pub fn put(&self, name: &str, plaintext: impl AsRef<[u8]>) -> Result<()> {
        let path = self.entry_path(name)?;
        let envelope = seal(&self.active, plaintext.as_ref())?;
        file::write_atomic(&self.dir, &path, &envelope)?;
        debug!(entry = name, "stored entry");
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.entry_path(name)?;
        let envelope = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(name.to_owned()))
            }
            Err(e) => return Err(e.into()),
        };
        open(&self.active, &envelope)
    }

    /// Existence check only; invalid names are simply absent
    pub fn has(&self, name: &str) -> bool {
        self.entry_path(name).is_ok_and(|path| path.is_file())
    }

    /// Delete an entry; removing a missing entry succeeds
    pub fn remove(&self, name: &str) -> Result<()> {
        let path = self.entry_path(name)?;
        file::remove_if_exists(&path)?;
        debug!(entry = name, "removed entry");
        Ok(())
    }

    /// Names of all entries; the check marker is never included
    pub fn list(&self) -> Result<BTreeSet<String>> {
        Ok(self
            .layout
            .scan(&self.dir)?
            .into_iter()
            .map(|(name, _)| name)
            .collect())
    }

    pub fn put_structured<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> Result<()> {
        self.put(name, payload::encode(value)?)
    }

    pub fn get_structured<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        payload::decode(&self.get(name)?)
    }

    /// Re-seal every entry and the marker under `new_key`, then make it active
    ///
    /// `new_key` is validated before anything is read. On error the active
    /// key is unchanged; see `rotate_keys` for what each strategy leaves on disk.
    pub fn recode(&mut self, new_key: impl AsRef<[u8]>) -> Result<RecodeReport> {
        let new_key = MasterKey::new(new_key)?;
        let report = rotate_keys::recode(
            &self.dir,
            &self.layout,
            &self.active,
            &new_key,
            self.strategy,
        )?;
        self.active = new_key;
        Ok(report)
    }

    fn entry_path(&self, name: &str) -> Result<PathBuf> {
        Ok(self.dir.join(self.layout.file_name(name)?))
    }
}

fn resolve_active_key(marker: &Path, candidates: Vec<MasterKey>) -> Result<MasterKey> {
    let envelope = fs::read(marker)?;
    let total = candidates.len();

    for (index, key) in candidates.into_iter().enumerate() {
        match open(&key, &envelope) {
            Ok(plaintext) if plaintext == CHECK_PLAINTEXT => {
                info!(candidate = index, fingerprint = %key.fingerprint(), "resolved active key");
                return Ok(key);
            }
            Ok(_) => debug!(candidate = index, "marker opened to unexpected plaintext"),
            Err(e) if e.is_integrity_failure() => debug!(candidate = index, "candidate rejected"),
            // Too short to hold a header; no candidate can open it
            Err(StoreError::MalformedEnvelope { len }) => {
                warn!(marker = %marker.display(), len, "check marker is malformed");
                break;
            }
            Err(e) => return Err(e),
        }
    }

    Err(StoreError::NoMatchingKey { candidates: total })
}

fn initialize(dir: &Path, marker: &Path, candidates: Vec<MasterKey>) -> Result<MasterKey> {
    let key = candidates
        .into_iter()
        .next()
        .ok_or(StoreError::NoCandidateKeys)?;
    file::write_atomic(dir, marker, &seal(&key, CHECK_PLAINTEXT)?)?;
    info!(dir = %dir.display(), fingerprint = %key.fingerprint(), "initialized fresh store");
    Ok(key)
}
