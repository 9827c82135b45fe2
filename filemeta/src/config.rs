pub const METADATA_DIRECTORY_ENV: &str = "FILEMETA_DIR";
pub const DEFAULT_METADATA_DIRECTORY: &str = "./metadata";

lazy_static! {
    static ref METADATA_DIRECTORY: std::path::PathBuf = std::env::var_os(METADATA_DIRECTORY_ENV)
        .filter(|dir| !dir.is_empty())
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|| std::path::PathBuf::from(DEFAULT_METADATA_DIRECTORY));
}

/// Where `.meta` files live, read once from `FILEMETA_DIR`
pub fn metadata_directory() -> &'static std::path::PathBuf {
    &METADATA_DIRECTORY
}
