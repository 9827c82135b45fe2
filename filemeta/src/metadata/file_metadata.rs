use {
    super::{keys, FileName},
    crate::{
        file_type::{FileType, MimeMap, SharedTypeTable, DEFAULT_TYPE},
        store::{MetadataValue, RawMetadata},
    },
};

/// Typed access to the well known metadata of a file.
///
/// Nothing is cached, every read goes to the store. Reads never fail: missing or malformed
/// values resolve to a default, and the modification time default is written back so it
/// stays stable.
pub struct FileMetadata<S> {
    store: S,
    table: SharedTypeTable,
}

impl<S: RawMetadata> FileMetadata<S> {
    /// Types resolve against the builtin [`MimeMap`]
    pub fn create(store: S) -> Self {
        Self::with_table(store, MimeMap::shared())
    }

    pub fn with_table(store: S, table: SharedTypeTable) -> Self {
        Self { store, table }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Unnamed files still get their type's preferred extension
    pub fn name(&self) -> FileName {
        match self.store.try_get(keys::FILE_NAME) {
            Some(name) => FileName::parse(&name.as_string()),
            None => FileName::new(None, self.file_type().extension()),
        }
    }

    /// `None` removes the name. A name without extension gets the type's preferred one
    /// appended.
    pub fn set_name(&mut self, name: Option<&str>) {
        let Some(name) = name else {
            self.store.delete(keys::FILE_NAME);
            return;
        };

        let mut name = name.to_string();

        if !FileName::parse(&name).has_extension() {
            if let Some(extension) = self.file_type().extension() {
                name.push('.');
                name.push_str(&extension);
            }
        }

        self.store.set(keys::FILE_NAME, MetadataValue::String(name));
    }

    /// Never negative, absent is 0
    pub fn size(&self) -> u64 {
        let size = self
            .store
            .try_get(keys::FILE_SIZE)
            .map(|size| size.to_int())
            .unwrap_or(0);

        u64::try_from(size).unwrap_or(0)
    }

    pub fn set_size(&mut self, size: u64) {
        self.store.set(keys::FILE_SIZE, MetadataValue::from(size));
    }

    pub fn file_type(&self) -> FileType {
        let name = self
            .store
            .try_get(keys::FILE_TYPE)
            .map(|name| name.as_string())
            .unwrap_or_else(|| DEFAULT_TYPE.to_string());

        FileType::with_table(name, self.table.clone())
    }

    /// Stored as is, unknown types are fine
    pub fn set_type(&mut self, type_name: &str) {
        self.store
            .set(keys::FILE_TYPE, MetadataValue::from(type_name));
    }

    /// Absent or unreadable timestamps are replaced by the current time, which is then
    /// stored.
    pub fn modification_time(&mut self) -> time::OffsetDateTime {
        let stored = self.store.try_get(keys::FILE_MODIFICATION_TIME);

        if let Some(timestamp) = stored
            .as_ref()
            .and_then(|value| value.to_epoch())
            .and_then(|epoch| time::OffsetDateTime::from_unix_timestamp(epoch).ok())
        {
            return timestamp;
        }

        let now = time::OffsetDateTime::now_utc();
        // Only seconds are stored, keep the returned value equal to what a later read gives
        let now = now.replace_nanosecond(0).unwrap_or(now);

        match stored {
            Some(value) => warn!(
                "Unreadable modification time '{value}', resetting it to {}",
                now.unix_timestamp()
            ),
            None => debug!("No modification time, setting it to {}", now.unix_timestamp()),
        }

        self.set_modification_time(now);

        now
    }

    pub fn set_modification_time(&mut self, time: time::OffsetDateTime) {
        self.store.set(
            keys::FILE_MODIFICATION_TIME,
            MetadataValue::Int(time.unix_timestamp()),
        );
    }
}

impl<S: RawMetadata> std::fmt::Debug for FileMetadata<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileMetadata")
            .field("name", &self.name())
            .field("size", &self.size())
            .field("type", &self.file_type())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use {
        super::FileMetadata,
        crate::{
            file_type::TypeTable,
            metadata::{keys, FileName},
            store::{InMemoryMetadata, MetadataValue, RawMetadata as _},
        },
    };

    fn metadata<const N: usize>(values: [(&str, MetadataValue); N]) -> FileMetadata<InMemoryMetadata> {
        FileMetadata::create(InMemoryMetadata::from_iter(values))
    }

    #[test]
    fn unnamed_file_uses_type_extension() {
        let meta = metadata([]);
        assert_eq!(meta.name(), FileName::new(None, Some("bin".into())));
        assert_eq!(meta.name().extension(), meta.file_type().extension().as_deref());

        let meta = metadata([(keys::FILE_TYPE, "image/jpeg".into())]);
        assert_eq!(meta.name().base(), None);
        assert_eq!(meta.name().extension(), Some("jpeg"));
        assert_eq!(meta.name().to_string(), "Untitled.jpeg");

        let meta = metadata([(keys::FILE_TYPE, "application/x-zerosize".into())]);
        assert_eq!(meta.name(), FileName::default());
    }

    #[test]
    fn stored_name_is_parsed() {
        let meta = metadata([
            (keys::FILE_NAME, "holiday.png".into()),
            (keys::FILE_TYPE, "image/jpeg".into()),
        ]);

        assert_eq!(meta.name().base(), Some("holiday"));
        assert_eq!(meta.name().extension(), Some("png"));
    }

    #[test]
    fn set_name_appends_extension() {
        let mut meta = metadata([(keys::FILE_TYPE, "image/jpeg".into())]);

        meta.set_name(Some("photo"));
        assert_eq!(
            meta.store().try_get(keys::FILE_NAME),
            Some(MetadataValue::from("photo.jpeg"))
        );

        meta.set_name(Some("photo.png"));
        assert_eq!(
            meta.store().try_get(keys::FILE_NAME),
            Some(MetadataValue::from("photo.png"))
        );
    }

    #[test]
    fn set_name_without_known_extension() {
        let mut meta = metadata([(keys::FILE_TYPE, "application/x-zerosize".into())]);

        meta.set_name(Some("empty"));
        assert_eq!(
            meta.store().try_get(keys::FILE_NAME),
            Some(MetadataValue::from("empty"))
        );
    }

    #[test]
    fn set_name_keeps_dotfiles() {
        let mut meta = metadata([]);

        meta.set_name(Some(".htaccess"));
        assert_eq!(
            meta.store().try_get(keys::FILE_NAME),
            Some(MetadataValue::from(".htaccess"))
        );
        assert_eq!(meta.name(), FileName::new(None, Some("htaccess".into())));
    }

    #[test]
    fn set_name_none_deletes() {
        let mut meta = metadata([(keys::FILE_NAME, "a.txt".into())]);

        meta.set_name(None);
        assert_eq!(meta.store().try_get(keys::FILE_NAME), None);
        assert_eq!(meta.name().base(), None);
    }

    #[test]
    fn size_normalization() {
        let cases = [
            (None, 0),
            (Some(MetadataValue::Int(1024)), 1024),
            (Some(MetadataValue::Int(-5)), 0),
            (Some(MetadataValue::from("2048")), 2048),
            (Some(MetadataValue::from("-12")), 0),
            (Some(MetadataValue::from("garbage")), 0),
            (Some(MetadataValue::Float(10.9)), 10),
            (Some(MetadataValue::Bool(true)), 1),
        ];

        for (stored, expected) in cases {
            let mut store = InMemoryMetadata::new();
            if let Some(value) = stored.clone() {
                store.set(keys::FILE_SIZE, value);
            }

            let meta = FileMetadata::create(store);
            assert_eq!(meta.size(), expected, "stored: {stored:?}");
            // Reads don't write
            assert_eq!(meta.store().try_get(keys::FILE_SIZE), stored);
        }
    }

    #[test]
    fn set_size() {
        let mut meta = metadata([]);
        meta.set_size(77);
        assert_eq!(meta.size(), 77);
    }

    #[test]
    fn default_type() {
        let meta = metadata([]);
        assert_eq!(meta.file_type().name(), "application/octet-stream");
        assert_eq!(meta.store().try_get(keys::FILE_TYPE), None);
    }

    #[test]
    fn set_type_is_verbatim() {
        let mut meta = metadata([]);
        meta.set_type("Not A Type");

        assert_eq!(meta.file_type().to_string(), "Not A Type");
        assert_eq!(meta.file_type().extension(), None);
        assert_eq!(meta.name(), FileName::default());
    }

    #[test]
    fn modification_time_is_stable() {
        let mut meta = metadata([]);

        let first = meta.modification_time();
        let stored = meta.store().try_get(keys::FILE_MODIFICATION_TIME);
        assert_eq!(stored, Some(MetadataValue::Int(first.unix_timestamp())));

        let second = meta.modification_time();
        assert_eq!(first, second);
        assert_eq!(meta.store().try_get(keys::FILE_MODIFICATION_TIME), stored);
    }

    #[test]
    fn modification_time_reads_stored_value() {
        for stored in [MetadataValue::Int(1_700_000_000), MetadataValue::from("1700000000")] {
            let mut meta = metadata([(keys::FILE_MODIFICATION_TIME, stored.clone())]);

            assert_eq!(
                meta.modification_time(),
                time::macros::datetime!(2023-11-14 22:13:20 UTC)
            );
            assert_eq!(meta.store().try_get(keys::FILE_MODIFICATION_TIME), Some(stored));
        }
    }

    #[test]
    fn modification_time_heals_garbage() {
        let before = time::OffsetDateTime::now_utc().unix_timestamp();
        let mut meta = metadata([(keys::FILE_MODIFICATION_TIME, "last tuesday".into())]);

        let healed = meta.modification_time();

        assert!(healed.unix_timestamp() >= before);
        assert_eq!(
            meta.store().try_get(keys::FILE_MODIFICATION_TIME),
            Some(MetadataValue::Int(healed.unix_timestamp()))
        );
    }

    #[test]
    fn modification_time_heals_out_of_range() {
        let mut meta = metadata([(keys::FILE_MODIFICATION_TIME, MetadataValue::Int(i64::MAX))]);

        let healed = meta.modification_time();

        assert_ne!(healed.unix_timestamp(), i64::MAX);
        assert_eq!(
            meta.store().try_get(keys::FILE_MODIFICATION_TIME),
            Some(MetadataValue::Int(healed.unix_timestamp()))
        );
    }

    #[test]
    fn injected_table() {
        struct Things;

        impl TypeTable for Things {
            fn extensions(&self, _: &str) -> Vec<String> {
                vec!["thg".to_string()]
            }

            fn description(&self, _: &str) -> Option<String> {
                Some("Thing".to_string())
            }
        }

        let mut meta = FileMetadata::with_table(InMemoryMetadata::new(), std::sync::Arc::new(Things));
        meta.set_name(Some("stuff"));

        assert_eq!(meta.name().full().as_deref(), Some("stuff.thg"));
        assert_eq!(meta.file_type().description().to_string(), "Thing");
    }

    #[test]
    fn borrowed_store() {
        let mut store = InMemoryMetadata::new();

        {
            let mut meta = FileMetadata::create(&mut store);
            meta.set_type("text/plain");
            meta.set_name(Some("notes"));
        }

        assert_eq!(store.try_get(keys::FILE_NAME), Some(MetadataValue::from("notes.txt")));
        assert_eq!(FileMetadata::create(store).into_inner().len(), 2);
    }
}
