#[derive(Debug, Default, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct InMemoryMetadata {
    // hashbrown could be used here
    inner: std::collections::HashMap<String, super::MetadataValue>,
}

impl InMemoryMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &super::MetadataValue)> {
        self.inner.iter()
    }
}

impl super::RawMetadata for InMemoryMetadata {
    fn try_get(&self, key: &str) -> Option<super::MetadataValue> {
        self.inner.get(key).filter(|v| !v.is_null()).cloned()
    }

    fn set(&mut self, key: &str, value: super::MetadataValue) {
        self.inner.insert(key.to_string(), value);
    }

    fn delete(&mut self, key: &str) {
        self.inner.remove(key);
    }
}

impl<K: Into<String>, V: Into<super::MetadataValue>> FromIterator<(K, V)> for InMemoryMetadata {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            inner: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
