pub const UNTITLED: &str = "Untitled";

/// A file's display name, split in a base and an extension
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FileName {
    base: Option<String>,
    extension: Option<String>,
}

impl FileName {
    /// Empty strings count as absent
    pub fn new(base: Option<String>, extension: Option<String>) -> Self {
        Self {
            base: base.filter(|s| !s.is_empty()),
            extension: extension.filter(|s| !s.is_empty()),
        }
    }

    /// Splits at the last '.' of the last path component.
    ///
    /// A leading dot ("`.bashrc`") is all extension and no base, a trailing one ("`notes.`")
    /// doesn't make an extension.
    pub fn parse(full: &str) -> Self {
        let file_name_start = full.rfind(['/', '\\']).map(|i| i + 1).unwrap_or(0);

        match full[file_name_start..].rfind('.') {
            Some(dot) if dot + 1 < full.len() - file_name_start => {
                let dot = file_name_start + dot;
                Self::new(
                    Some(full[..dot].to_string()),
                    Some(full[dot + 1..].to_string()),
                )
            }
            _ => Self::new(Some(full.to_string()), None),
        }
    }

    pub fn base(&self) -> Option<&str> {
        self.base.as_deref()
    }

    pub fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }

    pub fn has_extension(&self) -> bool {
        self.extension.is_some()
    }

    /// `base.extension`, `None` when there is no base
    pub fn full(&self) -> Option<String> {
        let base = self.base.as_ref()?;

        Some(match &self.extension {
            Some(extension) => format!("{base}.{extension}"),
            None => base.clone(),
        })
    }

    pub fn set_base(&mut self, base: Option<String>) {
        self.base = base.filter(|s| !s.is_empty());
    }

    pub fn set_extension(&mut self, extension: Option<String>) {
        self.extension = extension.filter(|s| !s.is_empty());
    }
}

impl std::fmt::Display for FileName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.base.as_deref().unwrap_or(UNTITLED))?;

        if let Some(extension) = &self.extension {
            write!(f, ".{extension}")?;
        }

        Ok(())
    }
}
