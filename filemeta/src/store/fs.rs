const META_EXTENSION: &str = "meta";

/// A metadata map that belongs to a [`MetadataDirectory`] entry.
///
/// Changes only live in memory until [`MetadataDirectory::save`] is called.
#[derive(Debug, Clone)]
pub struct StoredMetadata {
    uuid: uuid::Uuid,
    values: super::InMemoryMetadata,
}

impl StoredMetadata {
    pub fn uuid(&self) -> uuid::Uuid {
        self.uuid
    }

    pub fn values(&self) -> &super::InMemoryMetadata {
        &self.values
    }
}

impl super::RawMetadata for StoredMetadata {
    fn try_get(&self, key: &str) -> Option<super::MetadataValue> {
        self.values.try_get(key)
    }

    fn set(&mut self, key: &str, value: super::MetadataValue) {
        self.values.set(key, value)
    }

    fn delete(&mut self, key: &str) {
        self.values.delete(key)
    }
}

/// Directory of `<uuid>.meta` json files
#[derive(Debug, Clone)]
pub struct MetadataDirectory {
    path: std::path::PathBuf,
}

impl MetadataDirectory {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Directory from the environment, see [`crate::config`]
    pub fn from_config() -> Self {
        Self::new(crate::config::metadata_directory().clone())
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    pub fn meta_path(&self, uuid: &uuid::Uuid) -> std::path::PathBuf {
        self.path
            .join(format!("{}.{META_EXTENSION}", uuid.as_hyphenated()))
    }

    /// Creates the directory if it doesn't exist yet
    pub fn init(&self) -> Result<(), crate::error::StoreError> {
        std::fs::create_dir_all(&self.path).map_err(|e| crate::error::StoreError::FileCreate {
            file: self.path.display().to_string(),
            why: e,
        })
    }

    /// Registers a new, empty entry on disk.
    pub fn create(&self) -> Result<StoredMetadata, crate::error::StoreError> {
        use {
            crate::error::StoreError,
            std::{fs::OpenOptions, io::Write as _},
        };

        self.init()?;

        let uuid = uuid::Uuid::new_v4();
        let meta_path = self.meta_path(&uuid);

        let mut file = OpenOptions::new()
            .create_new(true) // If it already exists, this fails
            .write(true)
            .open(&meta_path)
            .map_err(|e| StoreError::FileCreate {
                file: meta_path.display().to_string(),
                why: e,
            })?;

        file.write_all(b"{}").map_err(|e| StoreError::FileWrite {
            file: meta_path.display().to_string(),
            why: e,
        })?;

        debug!("[{uuid}] Created metadata file");

        Ok(StoredMetadata {
            uuid,
            values: Default::default(),
        })
    }

    pub fn open(&self, uuid: uuid::Uuid) -> Result<StoredMetadata, crate::error::StoreError> {
        let values = Self::read_meta_file(&self.meta_path(&uuid)).map_err(|e| match e {
            crate::error::StoreError::FileOpen { why, .. }
                if why.kind() == std::io::ErrorKind::NotFound =>
            {
                crate::error::StoreError::NotFound { uuid }
            }
            e => e,
        })?;

        Ok(StoredMetadata { uuid, values })
    }

    /// Loads an entry from a path, the file stem must be the entry's uuid.
    pub fn open_path(
        &self,
        path: &std::path::Path,
    ) -> Result<StoredMetadata, crate::error::StoreError> {
        use {crate::error::StoreError, std::str::FromStr as _, uuid::Uuid};

        let Some(uuid) = path
            .file_stem()
            .and_then(|os_str| os_str.to_str())
            .and_then(|s| Uuid::from_str(s).ok())
        else {
            return Err(StoreError::InvalidId {
                value: format!("{:?}", path.file_name()),
            });
        };

        if path.extension().and_then(|os_str| os_str.to_str()) != Some(META_EXTENSION) {
            return Err(StoreError::WrongFileType {
                expected: String::from(META_EXTENSION),
                actual: path
                    .extension()
                    .and_then(|os_str| os_str.to_str().map(|s| s.to_string()))
                    .unwrap_or_else(|| format!("Unknown file extension: {path:?}")),
            });
        }

        let values = Self::read_meta_file(path)?;

        Ok(StoredMetadata { uuid, values })
    }

    pub fn save(&self, metadata: &StoredMetadata) -> Result<(), crate::error::StoreError> {
        use {
            crate::error::StoreError,
            std::{fs::OpenOptions, io::Write as _},
        };

        self.init()?;

        let path = self.meta_path(&metadata.uuid);

        let json = serde_json::to_string(&metadata.values).map_err(|e| {
            StoreError::Serialization {
                context: format!("saving metadata {}", metadata.uuid),
                why: e,
            }
        })?;

        let mut file = OpenOptions::new()
            .create(true) // In case it does not yet exist
            .write(true)
            .truncate(true) // Rewrite all
            .open(&path)
            .map_err(|e| StoreError::FileOpen {
                file: path.display().to_string(),
                why: e,
            })?;

        file.write_all(json.as_bytes())
            .map_err(|e| StoreError::FileWrite {
                file: path.display().to_string(),
                why: e,
            })?;

        trace!("[{}] Saved {} metadata values", metadata.uuid, metadata.values.len());

        Ok(())
    }

    pub fn remove(&self, uuid: uuid::Uuid) -> Result<(), crate::error::StoreError> {
        use crate::error::StoreError;

        let path = self.meta_path(&uuid);

        std::fs::remove_file(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                return StoreError::NotFound { uuid };
            }
            StoreError::FileRemove {
                file: path.display().to_string(),
                why: e,
            }
        })?;

        debug!("[{uuid}] Removed metadata file");

        Ok(())
    }

    /// Every loadable entry of the directory, anything else is skipped
    pub fn list(&self) -> Result<Vec<StoredMetadata>, crate::error::StoreError> {
        use std::path::PathBuf;

        let files = std::fs::read_dir(&self.path).map_err(|e| {
            error!("Could not open metadata dir due to: {e}");
            crate::error::StoreError::DirRead {
                dir: self.path.display().to_string(),
                why: e,
            }
        })?;

        // The default one is bad
        let display_path =
            |path: PathBuf| -> String { path.display().to_string().replace("\\", "/") };

        let entries = files
            .flatten()
            .flat_map(|entry| {
                let metadata = entry
                    .metadata()
                    .map_err(|e| {
                        error!(
                            "Could not read fs metadata of '{p}' due to: {e}",
                            p = display_path(entry.path())
                        )
                    })
                    .ok()?;

                if !metadata.is_file() {
                    warn!(
                        "Metadata listing skipping '{p}' as it's not a file",
                        p = display_path(entry.path())
                    );
                    return None;
                }

                let path = entry.path();

                if path.extension().and_then(|ext| ext.to_str()) != Some(META_EXTENSION) {
                    // Not a meta file, don't care
                    return None;
                }

                self.open_path(&path)
                    .map_err(|e| warn!("Skipping '{}' due to: {e}", display_path(path.clone())))
                    .ok()
            })
            .collect::<Vec<StoredMetadata>>();

        debug!("Listed {} metadata entries", entries.len());

        Ok(entries)
    }

    fn read_meta_file(
        path: &std::path::Path,
    ) -> Result<super::InMemoryMetadata, crate::error::StoreError> {
        use {crate::error::StoreError, std::fs::OpenOptions};

        let file = OpenOptions::new()
            .read(true)
            .open(path)
            .map_err(|e| StoreError::FileOpen {
                file: path.display().to_string(),
                why: e,
            })?;

        serde_json::from_reader(std::io::BufReader::new(file)).map_err(|e| {
            StoreError::Deserialization {
                file: path.display().to_string(),
                why: e,
            }
        })
    }
}
