use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::hash::Hash;

pub trait DashMapExtension<K: Eq + Hash, V: Clone> {
  /// Returns the stored value, building it with `f` when the key is vacant. The flag is `true`
  /// when the value was already present. `f` runs while the entry's shard is locked, so it runs
  /// at most once per key; an error leaves the key vacant.
  fn load_or_try_store_with<E, F>(&self, key: K, f: F) -> Result<(V, bool), E>
  where
    F: FnOnce() -> Result<V, E>;
}

impl<K: Eq + Hash, V: Clone> DashMapExtension<K, V> for DashMap<K, V> {
  fn load_or_try_store_with<E, F>(&self, key: K, f: F) -> Result<(V, bool), E>
  where
    F: FnOnce() -> Result<V, E>, {
    match self.entry(key) {
      Entry::Occupied(entry) => Ok((entry.get().clone(), true)),
      Entry::Vacant(entry) => {
        let value = f()?;
        tracing::trace!("load_or_try_store_with: stored new entry");
        Ok((entry.insert(value).clone(), false))
      }
    }
  }
}
