/*
    Raw metadata stores: flat maps from a string key to a scalar value.
    - InMemoryMetadata:
        Plain HashMap, lives as long as its owner.
    - StoredMetadata:
        Same map, tagged with an uuid so it can be persisted by a MetadataDirectory.
    - MetadataDirectory (fs):
        One `<uuid>.meta` file per entry, each one a json object of key -> value.
*/

mod fs;
mod memory;
mod value;

pub use fs::{MetadataDirectory, StoredMetadata};
pub use memory::InMemoryMetadata;
pub use value::MetadataValue;

/// Key-value backing store for file attributes.
///
/// Reads never fail, an absent key is `None`. [`RawMetadata::get`] exists for callers that
/// want the absence as an error.
pub trait RawMetadata {
    fn try_get(&self, key: &str) -> Option<MetadataValue>;

    fn set(&mut self, key: &str, value: MetadataValue);

    fn delete(&mut self, key: &str);

    fn get(&self, key: &str) -> Result<MetadataValue, crate::error::MetadataError> {
        self.try_get(key)
            .ok_or_else(|| crate::error::MetadataError::NotFound {
                key: key.to_string(),
            })
    }
}

impl<S: RawMetadata + ?Sized> RawMetadata for &mut S {
    fn try_get(&self, key: &str) -> Option<MetadataValue> {
        (**self).try_get(key)
    }

    fn set(&mut self, key: &str, value: MetadataValue) {
        (**self).set(key, value)
    }

    fn delete(&mut self, key: &str) {
        (**self).delete(key)
    }
}

impl<S: RawMetadata + ?Sized> RawMetadata for Box<S> {
    fn try_get(&self, key: &str) -> Option<MetadataValue> {
        (**self).try_get(key)
    }

    fn set(&mut self, key: &str, value: MetadataValue) {
        (**self).set(key, value)
    }

    fn delete(&mut self, key: &str) {
        (**self).delete(key)
    }
}

#[cfg(test)]
mod tests {
    use super::{InMemoryMetadata, MetadataValue, RawMetadata};

    #[test]
    fn get_reports_missing_key() {
        use crate::error::MetadataError;

        let mut store = InMemoryMetadata::new();
        assert_eq!(
            store.get("file.name"),
            Err(MetadataError::NotFound {
                key: "file.name".to_string()
            })
        );

        store.set("file.name", MetadataValue::from("a.txt"));
        assert_eq!(store.get("file.name"), Ok(MetadataValue::from("a.txt")));
    }

    #[test]
    fn borrowed_store_writes_through() {
        fn write<S: RawMetadata>(mut store: S) {
            store.set("file.size", MetadataValue::Int(3));
            store.delete("file.type");
        }

        let mut store = InMemoryMetadata::from_iter([("file.type", "text/plain")]);
        write(&mut store);

        assert_eq!(store.try_get("file.size"), Some(MetadataValue::Int(3)));
        assert_eq!(store.try_get("file.type"), None);
    }
}
