use crate::app::models::{CacheKey, ScanResult};
use std::collections::HashMap;

/// In-memory scan results, keyed by root and toggles. Lives as long as the session.
#[derive(Debug, Default)]
pub struct ScanCache {
    entries: HashMap<CacheKey, ScanResult>,
}

impl ScanCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &CacheKey) -> Option<&ScanResult> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Replaces any result already stored under `key`.
    pub fn insert(&mut self, key: CacheKey, result: ScanResult) {
        self.entries.insert(key, result);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::ScanConfig;
    use std::path::Path;

    fn result(tree: &str) -> ScanResult {
        ScanResult {
            tree: tree.to_string(),
            content: String::new(),
        }
    }

    #[test]
    fn stores_one_result_per_key() {
        let mut cache = ScanCache::new();
        let key = CacheKey::new(Path::new("/srv/app"), ScanConfig::default());

        cache.insert(key.clone(), result("first"));
        cache.insert(key.clone(), result("second"));

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&key).map(|r| r.tree.as_str()), Some("second"));
    }

    #[test]
    fn toggles_separate_entries() {
        let mut cache = ScanCache::new();
        let plain = CacheKey::new(Path::new("/srv/app"), ScanConfig::default());
        let full = CacheKey::new(Path::new("/srv/app"), ScanConfig::default().with_all_content());

        cache.insert(plain.clone(), result("plain"));

        assert!(cache.contains(&plain));
        assert!(!cache.contains(&full));

        cache.clear();
        assert!(cache.is_empty());
    }
}
