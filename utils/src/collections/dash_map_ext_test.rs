use super::DashMapExtension;
use dashmap::DashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

#[test]
fn test_load_or_try_store_with_builds_once() {
  let map: DashMap<&str, u32> = DashMap::new();
  let calls = AtomicUsize::new(0);
  let build = || -> Result<u32, String> {
    calls.fetch_add(1, Ordering::SeqCst);
    Ok(7)
  };

  assert_eq!(map.load_or_try_store_with("a", build), Ok((7, false)));
  assert_eq!(map.load_or_try_store_with("a", build), Ok((7, true)));
  assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_load_or_try_store_with_leaves_key_vacant_on_error() {
  let map: DashMap<&str, u32> = DashMap::new();
  let result = map.load_or_try_store_with("a", || Err::<u32, _>("boom".to_string()));
  assert_eq!(result, Err("boom".to_string()));
  assert!(map.get("a").is_none());
}
