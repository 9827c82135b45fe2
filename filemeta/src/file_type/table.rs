/// Lookup table from a type identifier ("image/jpeg") to what is known about it
pub trait TypeTable {
    /// Extensions commonly used for the type, most common first. Empty when unknown.
    fn extensions(&self, type_name: &str) -> Vec<String>;

    /// Human readable description, `None` when unknown
    fn description(&self, type_name: &str) -> Option<String>;
}

pub type SharedTypeTable = std::sync::Arc<dyn TypeTable + Send + Sync>;

#[derive(Debug, Default, serde::Deserialize)]
struct MimeEntry {
    #[serde(default)]
    desc: Option<String>,
    #[serde(default)]
    ext: Vec<String>,
    #[serde(default)]
    aliases: Vec<String>,
}

lazy_static! {
    static ref BUILTIN: std::sync::Arc<MimeMap> = std::sync::Arc::new(
        // Embedded at compile time, its validity is covered by the tests below
        MimeMap::from_json(include_str!("mime_db.json")).unwrap()
    );
}

/// MIME type table, case insensitive, `;` parameters are ignored.
#[derive(Debug, Default)]
pub struct MimeMap {
    types: std::collections::HashMap<String, MimeEntry>,
    // alias -> canonical type
    aliases: std::collections::HashMap<String, String>,
    // extension -> types, sorted by type name
    extension_types: std::collections::HashMap<String, Vec<String>>,
}

impl MimeMap {
    /// Json shape: `{ "<type>": { "desc": "..", "ext": [..], "aliases": [..] } }`
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        // Sorted so the extension -> types lists don't depend on hashing
        let raw = serde_json::from_str::<std::collections::BTreeMap<String, MimeEntry>>(json)?;

        let mut map = Self::default();

        for (name, entry) in raw {
            let name = name.to_ascii_lowercase();

            for alias in entry.aliases.iter() {
                map.aliases
                    .insert(alias.to_ascii_lowercase(), name.clone());
            }

            for ext in entry.ext.iter() {
                map.extension_types
                    .entry(ext.to_ascii_lowercase())
                    .or_default()
                    .push(name.clone());
            }

            map.types.insert(name, entry);
        }

        trace!(
            "Loaded mime map: {} types, {} aliases, {} extensions",
            map.types.len(),
            map.aliases.len(),
            map.extension_types.len()
        );

        Ok(map)
    }

    /// Table compiled into the crate
    pub fn builtin() -> std::sync::Arc<MimeMap> {
        BUILTIN.clone()
    }

    pub fn shared() -> SharedTypeTable {
        Self::builtin()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Canonical name of a type or of one of its aliases
    pub fn canonical(&self, type_name: &str) -> Option<String> {
        let normalized = normalize(type_name);

        if self.types.contains_key(&normalized) {
            return Some(normalized);
        }

        self.aliases.get(&normalized).cloned()
    }

    /// Every type that uses the given extension, a leading '.' is accepted
    pub fn extension_types(&self, extension: &str) -> Vec<String> {
        let extension = extension.trim_start_matches('.').to_ascii_lowercase();

        self.extension_types
            .get(&extension)
            .cloned()
            .unwrap_or_default()
    }

    fn entry(&self, type_name: &str) -> Option<&MimeEntry> {
        self.canonical(type_name)
            .and_then(|name| self.types.get(&name))
    }
}

impl TypeTable for MimeMap {
    fn extensions(&self, type_name: &str) -> Vec<String> {
        self.entry(type_name)
            .map(|entry| entry.ext.clone())
            .unwrap_or_default()
    }

    fn description(&self, type_name: &str) -> Option<String> {
        self.entry(type_name).and_then(|entry| entry.desc.clone())
    }
}

// Table key: the lowercased "type/subtype" essence, parameters dropped
fn normalize(type_name: &str) -> String {
    let type_name = type_name.trim();

    type_name
        .parse::<mime::Mime>()
        .map(|mime| mime.essence_str().to_ascii_lowercase())
        .unwrap_or_else(|_| type_name.to_ascii_lowercase())
}
