use anyhow::Result;

/// Minimal string key-value persistence: one serialized document per key.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}
