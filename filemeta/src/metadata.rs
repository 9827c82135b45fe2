mod file_metadata;
pub mod keys;
mod name;

pub use file_metadata::FileMetadata;
pub use name::FileName;
