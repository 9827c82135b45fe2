// Well known raw metadata keys

pub const FILE_NAME: &str = "file.name";
pub const FILE_SIZE: &str = "file.size";
pub const FILE_TYPE: &str = "file.type";
/// Unix timestamp, seconds
pub const FILE_MODIFICATION_TIME: &str = "file.modificationTime";

pub const ALL: [&str; 4] = [FILE_NAME, FILE_SIZE, FILE_TYPE, FILE_MODIFICATION_TIME];
