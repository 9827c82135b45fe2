/// Message domain used by every text this crate produces
pub const DOMAIN: &str = "filemeta";

/// Text meant for humans that a [`Translator`] may localize.
///
/// Rendering without a translator (or with one that doesn't know the message) yields the
/// source message.
pub trait Translatable: std::fmt::Display {
    fn message(&self) -> &str;

    fn domain(&self) -> &str {
        DOMAIN
    }

    fn trans(&self, translator: &dyn Translator, locale: Option<&str>) -> String {
        translator
            .translate(self.domain(), self.message(), locale)
            .unwrap_or_else(|| self.message().to_string())
    }
}

pub trait Translator {
    fn translate(&self, domain: &str, message: &str, locale: Option<&str>) -> Option<String>;
}

/// Json backed message catalog for one domain.
///
/// File shape: `{ "<locale>": { "<message>": "<translation>" } }`
#[derive(Debug, Default, Clone)]
pub struct Catalog {
    domain: String,
    default_locale: Option<String>,
    messages: std::collections::HashMap<String, std::collections::HashMap<String, String>>,
}

impl Catalog {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        Ok(Self {
            domain: DOMAIN.to_string(),
            default_locale: None,
            messages: serde_json::from_str(json)?,
        })
    }

    pub fn load(path: &std::path::Path) -> Result<Self, crate::error::StoreError> {
        use {crate::error::StoreError, std::fs::OpenOptions};

        let file = OpenOptions::new()
            .read(true)
            .open(path)
            .map_err(|e| StoreError::FileOpen {
                file: path.display().to_string(),
                why: e,
            })?;

        let messages = serde_json::from_reader(std::io::BufReader::new(file)).map_err(|e| {
            StoreError::Deserialization {
                file: path.display().to_string(),
                why: e,
            }
        })?;

        Ok(Self {
            domain: DOMAIN.to_string(),
            default_locale: None,
            messages,
        })
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    /// Locale used when `translate` is called without one
    pub fn with_default_locale(mut self, locale: impl Into<String>) -> Self {
        self.default_locale = Some(locale.into());
        self
    }

    pub fn locales(&self) -> impl Iterator<Item = &String> {
        self.messages.keys()
    }
}

impl Translator for Catalog {
    fn translate(&self, domain: &str, message: &str, locale: Option<&str>) -> Option<String> {
        if domain != self.domain {
            return None;
        }

        let locale = locale.or(self.default_locale.as_deref())?;

        self.messages
            .get(locale)
            .and_then(|messages| messages.get(message))
            .cloned()
    }
}
