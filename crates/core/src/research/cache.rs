//! In-memory cache of formatted research reports.
//!
//! Entries live as long as the owning pipeline; there is no expiry, eviction
//! or size bound.

use super::request::ResearchRequest;
use sha2::{Digest, Sha256};
use std::collections::HashMap;

/// Derives the cache key for a normalized request.
///
/// The key covers the query, mode, source budget and audience, joined with
/// `_`. Citation preference is deliberately left out so it does not fragment
/// the cache.
pub fn cache_key(request: &ResearchRequest) -> String {
    let key_data = format!(
        "{}_{}_{}_{}",
        request.query,
        request.research_mode,
        request.max_sources,
        request.target_audience.as_deref().unwrap_or("None")
    );
    format!("{:x}", Sha256::digest(key_data.as_bytes()))
}

/// Maps cache keys to formatted Markdown reports.
///
/// A disabled cache stores nothing and never reports a hit.
#[derive(Debug, Clone)]
pub struct ReportCache {
    entries: Option<HashMap<String, String>>,
}

impl Default for ReportCache {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ReportCache {
    pub fn new(enabled: bool) -> Self {
        Self {
            entries: enabled.then(HashMap::new),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.entries.is_some()
    }

    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.entries.as_ref()?.get(key).map(String::as_str)
    }

    pub fn store(&mut self, key: String, report: String) {
        if let Some(entries) = self.entries.as_mut() {
            entries.insert(key, report);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.as_ref().map_or(0, HashMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
