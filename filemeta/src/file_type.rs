mod description;
mod table;

pub use description::{Description, UNKNOWN_FILE_TYPE};
pub use table::{MimeMap, SharedTypeTable, TypeTable};

pub const DEFAULT_TYPE: &str = "application/octet-stream";

/// What is known about a type identifier.
///
/// Any identifier is accepted, unknown ones just resolve to empty lookups and an
/// [`Description::Unknown`] description.
#[derive(Clone)]
pub struct FileType {
    name: String,
    table: SharedTypeTable,
}

impl FileType {
    /// Resolves against the builtin [`MimeMap`]
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_table(name, MimeMap::shared())
    }

    pub fn with_table(name: impl Into<String>, table: SharedTypeTable) -> Self {
        Self {
            name: name.into(),
            table,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// "image" for "image/jpeg"
    pub fn media_type(&self) -> String {
        self.mime()
            .map(|mime| mime.type_().as_str().to_ascii_lowercase())
            .unwrap_or_default()
    }

    /// "jpeg" for "image/jpeg", "svg+xml" for "image/svg+xml"
    pub fn sub_type(&self) -> String {
        self.mime()
            .map(|mime| match mime.suffix() {
                Some(suffix) => format!("{}+{}", mime.subtype(), suffix).to_ascii_lowercase(),
                None => mime.subtype().as_str().to_ascii_lowercase(),
            })
            .unwrap_or_default()
    }

    pub fn common_extensions(&self) -> Vec<String> {
        self.table.extensions(&self.name)
    }

    /// Preferred extension, the first common one
    pub fn extension(&self) -> Option<String> {
        self.common_extensions().into_iter().next()
    }

    pub fn description(&self) -> Description {
        Description::from(self.table.description(&self.name))
    }

    fn mime(&self) -> Option<mime::Mime> {
        self.name.trim().parse::<mime::Mime>().ok()
    }
}

impl std::fmt::Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl std::fmt::Debug for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileType").field("name", &self.name).finish()
    }
}

impl PartialEq for FileType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for FileType {}

#[cfg(test)]
mod tests {
    use {
        super::{Description, FileType, MimeMap, TypeTable},
        crate::translation::Translatable,
    };

    #[test]
    fn jpeg() {
        let file_type = FileType::new("image/jpeg");

        assert_eq!(file_type.name(), "image/jpeg");
        assert_eq!(file_type.media_type(), "image");
        assert_eq!(file_type.sub_type(), "jpeg");
        assert_eq!(file_type.common_extensions(), vec!["jpeg", "jpg", "jpe"]);
        assert_eq!(file_type.extension().as_deref(), Some("jpeg"));
        assert_eq!(file_type.description().to_string(), "JPEG image");
        assert_eq!(file_type.to_string(), "image/jpeg");
    }

    #[test]
    fn unknown() {
        fn translatable<T: Translatable>(t: T) -> String {
            t.message().to_string()
        }

        let file_type = FileType::new("application/x-zerosize");
        let description = file_type.description();

        assert_eq!(description, Description::Unknown);
        assert_eq!(description.to_string(), "Unknown file type");
        assert_eq!(translatable(description), "Unknown file type");
        assert_eq!(file_type.media_type(), "application");
        assert_eq!(file_type.sub_type(), "x-zerosize");
        assert!(file_type.common_extensions().is_empty());
        assert_eq!(file_type.extension(), None);
    }

    #[test]
    fn malformed_name() {
        let file_type = FileType::new("nonsense");

        assert_eq!(file_type.media_type(), "");
        assert_eq!(file_type.sub_type(), "");
        assert_eq!(file_type.to_string(), "nonsense");
        assert_eq!(FileType::new("a/b/c").sub_type(), "");
    }

    #[test]
    fn structured_suffix() {
        let file_type = FileType::new("image/svg+xml");

        assert_eq!(file_type.media_type(), "image");
        assert_eq!(file_type.sub_type(), "svg+xml");
        assert_eq!(file_type.extension().as_deref(), Some("svg"));
    }

    #[test]
    fn parameters_are_ignored() {
        let file_type = FileType::new("Text/Plain; charset=utf-8");

        assert_eq!(file_type.media_type(), "text");
        assert_eq!(file_type.sub_type(), "plain");
        assert_eq!(file_type.extension().as_deref(), Some("txt"));
        assert_eq!(file_type.name(), "Text/Plain; charset=utf-8");
    }

    #[test]
    fn injected_table() {
        struct OneType;

        impl TypeTable for OneType {
            fn extensions(&self, type_name: &str) -> Vec<String> {
                if type_name == "application/x-thing" {
                    vec!["thg".to_string()]
                } else {
                    Vec::new()
                }
            }

            fn description(&self, _: &str) -> Option<String> {
                None
            }
        }

        let file_type = FileType::with_table("application/x-thing", std::sync::Arc::new(OneType));

        assert_eq!(file_type.extension().as_deref(), Some("thg"));
        assert!(!file_type.description().is_known());
        assert_ne!(file_type.common_extensions(), MimeMap::builtin().extensions("image/jpeg"));
    }
}
