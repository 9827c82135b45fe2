// A single scalar stored under a metadata key
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl MetadataValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// String form of the value: null and `false` are empty, `true` is "1", floats with no
    /// fractional part print without one.
    pub fn as_string(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(true) => String::from("1"),
            Self::Bool(false) => String::new(),
            Self::Int(i) => i.to_string(),
            Self::Float(f) => format_float(*f),
            Self::String(s) => s.clone(),
        }
    }

    /// Integer coercion.
    ///
    /// Strings use their leading numeric part ("12abc" is 12, "abc" is 0), floats are
    /// truncated toward zero and saturate at the i64 bounds.
    pub fn to_int(&self) -> i64 {
        match self {
            Self::Null => 0,
            Self::Bool(b) => *b as i64,
            Self::Int(i) => *i,
            Self::Float(f) => *f as i64,
            Self::String(s) => str_to_int(s),
        }
    }

    /// Strict unix timestamp parse: the string form must be an optionally negative run of
    /// digits and nothing else.
    pub fn to_epoch(&self) -> Option<i64> {
        if let Self::Int(i) = self {
            return Some(*i);
        }

        let s = self.as_string();
        let digits = s.strip_prefix('-').unwrap_or(&s);

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        s.parse::<i64>().ok()
    }
}

fn format_float(f: f64) -> String {
    if f.is_finite() && f.fract() == 0. && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        format!("{f}")
    }
}

fn str_to_int(s: &str) -> i64 {
    let s = s.trim_start();

    if let Ok(i) = s.trim_end().parse::<i64>() {
        return i;
    }

    if let Ok(f) = s.trim_end().parse::<f64>() {
        if f.is_finite() {
            return f as i64;
        }
    }

    // Leading "[+-]digits" prefix
    let sign_len = usize::from(s.starts_with(['-', '+']));
    let digit_len = s[sign_len..]
        .bytes()
        .take_while(|b| b.is_ascii_digit())
        .count();

    if digit_len == 0 {
        return 0;
    }

    let prefix = &s[..sign_len + digit_len];
    prefix.parse::<i64>().unwrap_or(if prefix.starts_with('-') {
        i64::MIN
    } else {
        i64::MAX
    })
}

impl std::fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_string())
    }
}

impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for MetadataValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u64> for MetadataValue {
    fn from(value: u64) -> Self {
        Self::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<f64> for MetadataValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for MetadataValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}
