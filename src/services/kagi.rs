//! Conversion of the public Kagi bang list into the built-in catalog format.
//!
//! Kagi entries look like
//! `{"c":"Reference","d":"en.wikipedia.org","r":0,"s":"Wikipedia","sc":"Encyclopedia","t":"w","u":"https://en.wikipedia.org/wiki/{{{s}}}","ts":["wiki"]}`.
//! The converted entries use `%s` as placeholder and always carry a `ts` array.
//! Fetching the list is left to the caller; this only works on local files.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::bang::BangEntry;
use crate::error::{GulgleResult, StorageError};
use crate::services::catalog::write_atomic;
use crate::services::redirect::{KAGI_PLACEHOLDER, PLACEHOLDER};

/// One entry of the Kagi list. Unknown fields (e.g. `r`, the rank) are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct KagiBang {
    pub t: String,
    pub s: String,
    pub u: String,
    pub d: String,
    #[serde(default)]
    pub ts: Option<Vec<String>>,
    #[serde(default)]
    pub c: Option<String>,
    #[serde(default)]
    pub sc: Option<String>,
}

impl From<KagiBang> for BangEntry {
    fn from(bang: KagiBang) -> Self {
        BangEntry {
            trigger: bang.t,
            name: bang.s,
            category: bang.c,
            sub_category: bang.sc,
            url_template: bang.u.replacen(KAGI_PLACEHOLDER, PLACEHOLDER, 1),
            domain: bang.d,
            additional_triggers: Some(bang.ts.unwrap_or_default()),
            is_custom: None,
        }
    }
}

/// Convert a parsed Kagi list.
pub fn convert(bangs: Vec<KagiBang>) -> Vec<BangEntry> {
    bangs.into_iter().map(BangEntry::from).collect()
}

/// Read a Kagi JSON file and write the converted catalog. Returns the entry count.
pub fn convert_file(input: &Path, output: &Path) -> GulgleResult<usize> {
    let content = fs::read_to_string(input).map_err(|source| StorageError::Io {
        path: input.to_path_buf(),
        source,
    })?;
    let bangs: Vec<KagiBang> = serde_json::from_str(&content).map_err(StorageError::from)?;

    let entries = convert(bangs);
    let json = serde_json::to_vec_pretty(&entries).map_err(StorageError::from)?;
    write_atomic(output, &json)?;

    info!(count = entries.len(), output = %output.display(), "Converted Kagi bangs");
    Ok(entries.len())
}
