//! Native messaging host for the browser extension.
//!
//! The extension forwards every navigation to a search engine as
//!
//! ```json
//! {"action": "checkSearchURL", "url": "https://www.google.com/search?q=!w+rust&client=safari", "incognito": false}
//! ```
//!
//! and expects either `{"type": "redirect", "url": ..., "bang": ...}` or
//! `{"type": "noRedirect"}` back. Messages with any other action are echoed as
//! `{"echo": <message>}`.
//!
//! Frames on stdin/stdout use the WebExtension native messaging format: a
//! 4-byte length in native byte order followed by that many bytes of JSON.

use std::collections::{HashSet, VecDeque};
use std::io::{ErrorKind, Read, Write};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::HostConfig;
use crate::error::{GulgleError, GulgleResult};
use crate::services::catalog::CatalogStore;
use crate::services::parser::BangParser;
use crate::services::search_engine;

/// Largest frame accepted from the browser.
const MAX_MESSAGE_LEN: usize = 4 * 1024 * 1024;

const CHECK_SEARCH_URL: &str = "checkSearchURL";

/// Payload of a `checkSearchURL` message.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckSearchUrl {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub incognito: bool,
}

/// Answer to a `checkSearchURL` message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum NativeResponse {
    Redirect { url: String, bang: String },
    NoRedirect,
}

/// Anything the host writes back.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum HostReply {
    Search(NativeResponse),
    Echo { echo: Value },
}

/// Run the read path for one navigated URL: extract, parse, build.
pub fn check_search_url(parser: &BangParser, url: &str) -> NativeResponse {
    let Some(nav) = search_engine::classify(url) else {
        return NativeResponse::NoRedirect;
    };
    debug!(engine = ?nav.engine, query = %nav.query, "Detected search query");

    match parser.resolve(&nav.query) {
        Some((bang_match, redirect)) => {
            info!(bang = %bang_match.matched_trigger, url = %redirect, "Bang match found");
            NativeResponse::Redirect {
                url: redirect,
                bang: bang_match.matched_trigger,
            }
        }
        None => NativeResponse::NoRedirect,
    }
}

/// Bounded set of URLs the host has already handled or produced.
///
/// Stops a redirect from being processed again when the browser navigates to
/// it. The oldest URL is forgotten once the set is full.
#[derive(Debug, Clone)]
pub struct RecentUrls {
    order: VecDeque<String>,
    seen: HashSet<String>,
    capacity: usize,
}

impl RecentUrls {
    pub fn new(capacity: usize) -> Self {
        Self {
            order: VecDeque::new(),
            seen: HashSet::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn contains(&self, url: &str) -> bool {
        self.seen.contains(url)
    }

    /// Returns false if the URL was already tracked.
    pub fn insert(&mut self, url: &str) -> bool {
        if !self.seen.insert(url.to_string()) {
            return false;
        }
        self.order.push_back(url.to_string());
        while self.order.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.seen.remove(&oldest);
            }
        }
        true
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Stateful host: owns the catalog store, a cached parser and the loop guard.
pub struct Host {
    store: CatalogStore,
    config: HostConfig,
    recent: RecentUrls,
    parser: Option<(u64, BangParser)>,
}

impl Host {
    pub fn new(store: CatalogStore, config: HostConfig) -> Self {
        let recent = RecentUrls::new(config.max_tracked_urls);
        Self {
            store,
            config,
            recent,
            parser: None,
        }
    }

    /// Parser for the current catalog version, rebuilt after a version bump.
    fn parser(&mut self) -> &BangParser {
        let version = self.store.current_version();
        if !matches!(&self.parser, Some((v, _)) if *v == version) {
            debug!(version, "Rebuilding bang index");
            self.parser = None;
        }
        let store = &self.store;
        &self.parser.get_or_insert_with(|| (version, store.parser())).1
    }

    /// Handle a `checkSearchURL` request, applying the loop guard.
    pub fn handle_check(&mut self, request: &CheckSearchUrl) -> NativeResponse {
        let Some(url) = request.url.as_deref() else {
            return NativeResponse::NoRedirect;
        };

        if self.config.require_https && !url.starts_with("https://") {
            return NativeResponse::NoRedirect;
        }

        if !self.recent.insert(url) {
            debug!(url, "Already processed");
            return NativeResponse::NoRedirect;
        }

        let response = check_search_url(self.parser(), url);
        if let NativeResponse::Redirect { url: target, .. } = &response {
            self.recent.insert(target);
        }
        response
    }

    /// Dispatch one decoded message.
    pub fn handle_message(&mut self, message: Value) -> HostReply {
        let action = message.get("action").and_then(Value::as_str);
        if action != Some(CHECK_SEARCH_URL) {
            return HostReply::Echo { echo: message };
        }

        let request = match serde_json::from_value::<CheckSearchUrl>(message) {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "Malformed checkSearchURL message");
                CheckSearchUrl::default()
            }
        };
        HostReply::Search(self.handle_check(&request))
    }

    /// Serve frames until the browser closes the pipe.
    pub fn run<R: Read, W: Write>(&mut self, mut reader: R, mut writer: W) -> GulgleResult<()> {
        info!("Native messaging host started");

        while let Some(frame) = read_frame(&mut reader)? {
            let reply = match serde_json::from_slice::<Value>(&frame) {
                Ok(message) => self.handle_message(message),
                Err(e) => {
                    warn!(error = %e, "Ignoring undecodable message");
                    HostReply::Search(NativeResponse::NoRedirect)
                }
            };
            write_frame(&mut writer, &reply)?;
        }

        info!("Native messaging host stopped");
        Ok(())
    }
}

/// Read one frame. `Ok(None)` on a clean end of input.
pub fn read_frame<R: Read>(reader: &mut R) -> GulgleResult<Option<Vec<u8>>> {
    let mut len_buf = [0u8; 4];
    match reader.read_exact(&mut len_buf) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(e.into()),
    }

    let len = u32::from_ne_bytes(len_buf) as usize;
    if len > MAX_MESSAGE_LEN {
        return Err(GulgleError::Protocol(format!(
            "message of {} bytes exceeds limit of {}",
            len, MAX_MESSAGE_LEN
        )));
    }

    let mut body = vec![0u8; len];
    reader.read_exact(&mut body)?;
    Ok(Some(body))
}

/// Write one JSON frame and flush.
pub fn write_frame<W: Write, T: Serialize>(writer: &mut W, value: &T) -> GulgleResult<()> {
    let body = serde_json::to_vec(value)
        .map_err(|e| GulgleError::Protocol(format!("Failed to encode reply: {}", e)))?;
    let len = u32::try_from(body.len())
        .map_err(|_| GulgleError::Protocol("reply too large".to_string()))?;

    writer.write_all(&len.to_ne_bytes())?;
    writer.write_all(&body)?;
    writer.flush()?;
    Ok(())
}
