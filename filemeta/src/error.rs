#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Could not create file '{file}' due to: {why}")]
    FileCreate { file: String, why: std::io::Error },

    #[error("Could not open file '{file}' due to: {why}")]
    FileOpen { file: String, why: std::io::Error },

    #[error("Could not write to file '{file}' due to: {why}")]
    FileWrite { file: String, why: std::io::Error },

    #[error("Could not remove file '{file}' due to: {why}")]
    FileRemove { file: String, why: std::io::Error },

    #[error("Could not read directory '{dir}' due to: {why}")]
    DirRead { dir: String, why: std::io::Error },

    #[error("The id '{uuid}' doesn't correspond to any metadata file")]
    NotFound { uuid: uuid::Uuid },

    #[error("Serialization error while {context} due to {why}")]
    Serialization {
        context: String, // Extremely short description of what was atempted to do
        why: serde_json::Error,
    },

    #[error("Could not deserialize file '{file}' due to: {why}")]
    Deserialization {
        file: String,
        why: serde_json::Error,
    },

    #[error("The given string ({value}) could not be parsed into an uuid")]
    InvalidId { value: String },

    #[error("Wrong file type, expected: '{expected}' but got '{actual}'")]
    WrongFileType { expected: String, actual: String },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MetadataError {
    #[error("Metadata '{key}' not found")]
    NotFound { key: String },
}
