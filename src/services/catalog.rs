//! Built-in and custom bang catalogs.
//!
//! The built-in catalog is read once per store and never changes. The custom
//! catalog lives in a JSON file that is re-read on every access and replaced
//! as a whole on every change, so several processes can share it. After each
//! change a version counter next to it is bumped; other processes poll
//! [`CatalogStore::current_version`] to notice they are stale.
//!
//! Read failures never reach the caller: a missing or corrupt file is logged
//! and treated as an empty catalog.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use once_cell::sync::OnceCell;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::bang::BangEntry;
use crate::error::{CatalogError, StorageError};
use crate::services::parser::BangParser;
use crate::services::trigger_index::TriggerIndex;
use crate::services::validator::{collision_check, validate};

/// Catalog shipped with the binary.
const EMBEDDED_CATALOG: &str = include_str!("../../resources/bangs.json");

/// Where the built-in catalog comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuiltinSource {
    Embedded,
    File(PathBuf),
}

/// File locations used by a [`CatalogStore`].
#[derive(Debug, Clone)]
pub struct CatalogPaths {
    pub builtin: BuiltinSource,
    pub custom: PathBuf,
    pub version: PathBuf,
}

impl CatalogPaths {
    /// Custom catalog at `custom`, version file beside it.
    pub fn new(builtin: BuiltinSource, custom: PathBuf) -> Self {
        let version = custom.with_extension("version");
        Self {
            builtin,
            custom,
            version,
        }
    }

    /// Embedded built-ins with the custom files under `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(BuiltinSource::Embedded, dir.join("custom-bangs.json"))
    }
}

/// Owner of both catalogs. Pass it to whatever needs bang data.
#[derive(Debug)]
pub struct CatalogStore {
    paths: CatalogPaths,
    builtin: OnceCell<Vec<BangEntry>>,
}

impl CatalogStore {
    pub fn new(paths: CatalogPaths) -> Self {
        Self {
            paths,
            builtin: OnceCell::new(),
        }
    }

    pub fn paths(&self) -> &CatalogPaths {
        &self.paths
    }

    /// Built-in entries, loaded on first use.
    pub fn load_builtin(&self) -> &[BangEntry] {
        self.builtin.get_or_init(|| {
            let result = match &self.paths.builtin {
                BuiltinSource::Embedded => parse_catalog(EMBEDDED_CATALOG),
                BuiltinSource::File(path) => read_catalog(path).and_then(|entries| {
                    entries.ok_or_else(|| StorageError::Io {
                        path: path.clone(),
                        source: ErrorKind::NotFound.into(),
                    })
                }),
            };

            match result {
                Ok(entries) => {
                    info!(count = entries.len(), "Loaded built-in bangs");
                    entries
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load built-in bangs");
                    Vec::new()
                }
            }
        })
    }

    /// Custom entries as currently persisted.
    pub fn load_custom(&self) -> Vec<BangEntry> {
        match read_catalog(&self.paths.custom) {
            Ok(Some(entries)) => entries,
            Ok(None) => {
                debug!(path = %self.paths.custom.display(), "No custom bangs file");
                Vec::new()
            }
            Err(e) => {
                warn!(error = %e, "Failed to load custom bangs, treating as empty");
                Vec::new()
            }
        }
    }

    /// Replace the custom catalog file. On failure the previous file is kept
    /// and false is returned.
    pub fn save_custom(&self, entries: &[BangEntry]) -> bool {
        let result = serde_json::to_vec_pretty(entries)
            .map_err(StorageError::from)
            .and_then(|json| write_atomic(&self.paths.custom, &json));

        match result {
            Ok(()) => {
                debug!(count = entries.len(), "Saved custom bangs");
                true
            }
            Err(e) => {
                warn!(error = %e, "Failed to save custom bangs");
                false
            }
        }
    }

    /// Add a custom entry, or replace the one with the same primary trigger.
    ///
    /// The entry is validated first, then checked for token collisions against
    /// the other custom entries. Built-in tokens may be reused; that is how a
    /// built-in bang is overridden.
    pub fn add_or_update(&self, mut entry: BangEntry) -> Result<(), CatalogError> {
        validate(&entry)?;
        entry.is_custom = Some(true);

        let mut custom = self.load_custom();
        let key = entry.key();

        let others: Vec<BangEntry> = custom.iter().filter(|e| e.key() != key).cloned().collect();
        collision_check(&entry, &others)?;

        match custom.iter().position(|e| e.key() == key) {
            Some(i) => {
                info!(trigger = %entry.trigger, "Updating custom bang");
                custom[i] = entry;
            }
            None => {
                info!(trigger = %entry.trigger, "Adding custom bang");
                custom.push(entry);
            }
        }

        if self.save_custom(&custom) {
            self.bump_version();
        }
        Ok(())
    }

    /// Remove the custom entry with this primary trigger (case-insensitive), if any.
    pub fn delete_by_trigger(&self, trigger: &str) {
        let key = trigger.to_lowercase();
        let mut custom = self.load_custom();
        let before = custom.len();
        custom.retain(|e| e.key() != key);

        if custom.len() < before {
            info!(trigger, "Deleted custom bang");
        } else {
            debug!(trigger, "No custom bang to delete");
        }

        if self.save_custom(&custom) {
            self.bump_version();
        }
    }

    /// Last bumped version, 0 if never bumped.
    pub fn current_version(&self) -> u64 {
        match fs::read_to_string(&self.paths.version) {
            Ok(content) => content.trim().parse().unwrap_or_else(|_| {
                warn!(path = %self.paths.version.display(), "Unreadable catalog version");
                0
            }),
            Err(_) => 0,
        }
    }

    fn bump_version(&self) {
        let next = self.current_version() + 1;
        match write_atomic(&self.paths.version, next.to_string().as_bytes()) {
            Ok(()) => debug!(version = next, "Bumped catalog version"),
            Err(e) => warn!(error = %e, "Failed to bump catalog version"),
        }
    }

    /// Merged index over both catalogs, custom taking precedence.
    pub fn trigger_index(&self) -> TriggerIndex {
        TriggerIndex::build(self.load_builtin(), &self.load_custom())
    }

    /// Every reachable entry, one per primary trigger, sorted by trigger.
    pub fn load_all(&self) -> Vec<BangEntry> {
        self.trigger_index().entries()
    }

    /// Parser over the current merged catalogs.
    pub fn parser(&self) -> BangParser {
        BangParser::new(self.trigger_index())
    }
}

/// Parse a catalog JSON array. Blank input is an empty catalog.
pub fn parse_catalog(content: &str) -> Result<Vec<BangEntry>, StorageError> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(content)?)
}

/// `Ok(None)` when the file does not exist.
fn read_catalog(path: &Path) -> Result<Option<Vec<BangEntry>>, StorageError> {
    match fs::read_to_string(path) {
        Ok(content) => parse_catalog(&content).map(Some),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(StorageError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Write to a temp file in the target directory, then rename it into place.
pub(crate) fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), StorageError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let io_err = |source: std::io::Error| StorageError::Io {
        path: parent.to_path_buf(),
        source,
    };

    fs::create_dir_all(parent).map_err(io_err)?;
    let mut tmp = NamedTempFile::new_in(parent).map_err(io_err)?;
    tmp.write_all(contents).map_err(io_err)?;
    tmp.flush().map_err(io_err)?;
    tmp.persist(path).map_err(|e| StorageError::Persist {
        path: path.to_path_buf(),
        source: e.error,
    })?;
    Ok(())
}
