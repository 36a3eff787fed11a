use log::error;
use std::collections::HashMap;
use std::sync::RwLock;

/*
 * Rendered page bodies keyed by logical path. The read
 * handlers serve from here when they can, the admin
 * mutations mark the affected paths stale by dropping
 * the entries. Invalidation is coarse: we never check
 * whether the cached body would actually change.
 */
pub struct PageCache {
  entries: RwLock<HashMap<String, String>>
}

impl PageCache {

  pub fn new() -> Self {
    Self {
      entries: RwLock::new(HashMap::new())
    }
  }

  pub fn get(&self, path: &str) -> Option<String> {
    match self.entries.read() {
      Ok(entries) => entries.get(path).cloned(),
      Err(e) => {
        // A poisoned lock counts as a miss:
        error!("Could not get a read handle on the page cache - {}", e);
        None
      }
    }
  }

  pub fn store(&self, path: &str, body: &str) {
    match self.entries.write() {
      Ok(mut entries) => {
        entries.insert(path.to_string(), body.to_string());
      },
      Err(e) => {
        error!("Could not get a write handle on the page cache - {}", e);
      }
    }
  }

  pub fn invalidate(&self, path: &str) {
    match self.entries.write() {
      Ok(mut entries) => {
        entries.remove(path);
      },
      Err(e) => {
        error!("Could not get a write handle on the page cache - {}", e);
      }
    }
  }

}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn missing_path_is_a_miss() {
    let cache = PageCache::new();
    assert_eq!(None, cache.get("/"));
  }

  #[test]
  fn stored_body_comes_back() {
    let cache = PageCache::new();
    cache.store("/", "{\"categories\":[]}");
    assert_eq!(Some("{\"categories\":[]}".to_string()), cache.get("/"));
  }

  #[test]
  fn invalidation_drops_the_entry() {
    let cache = PageCache::new();
    cache.store("/categories/billing", "{}");
    cache.invalidate("/categories/billing");
    assert_eq!(None, cache.get("/categories/billing"));
  }

  #[test]
  fn invalidating_an_unknown_path_is_a_noop() {
    let cache = PageCache::new();
    cache.store("/", "{}");
    cache.invalidate("/articles/42");
    assert_eq!(Some("{}".to_string()), cache.get("/"));
  }
}
