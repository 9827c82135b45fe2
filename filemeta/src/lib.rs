#[macro_use(trace, debug, warn, error)]
extern crate log;

#[macro_use(lazy_static)]
extern crate lazy_static;

pub mod config;
pub mod error;
pub mod file_type;
pub mod metadata;
pub mod store;
pub mod translation;

pub use {
    file_type::{Description, FileType, MimeMap, TypeTable},
    metadata::{keys, FileMetadata, FileName},
    store::{InMemoryMetadata, MetadataDirectory, MetadataValue, RawMetadata, StoredMetadata},
    translation::{Catalog, Translatable, Translator},
};
