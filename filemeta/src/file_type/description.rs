pub const UNKNOWN_FILE_TYPE: &str = "Unknown file type";

/// Description of a file type, whether the table knew it or not
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Description {
    Known(String),
    Unknown,
}

impl Description {
    pub fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }
}

impl From<Option<String>> for Description {
    fn from(value: Option<String>) -> Self {
        value.map(Self::Known).unwrap_or(Self::Unknown)
    }
}

impl crate::translation::Translatable for Description {
    fn message(&self) -> &str {
        match self {
            Self::Known(description) => description,
            Self::Unknown => UNKNOWN_FILE_TYPE,
        }
    }
}

impl std::fmt::Display for Description {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use crate::translation::Translatable as _;

        write!(f, "{}", self.message())
    }
}
