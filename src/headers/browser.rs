//! Unique-browser records and per-browser selection specs.
//!
//! The networks encode one observed `(browser, version, httpVersion)`
//! tuple as a single string, `name/major.minor...|httpVersion`, and the
//! helper document lists every tuple seen in training. Constraint
//! translation matches user requests against these records.

use crate::headers::MISSING_VALUE_TOKEN;

/// Richer per-browser selection: a name plus optional version and HTTP
/// bounds. A zero `min_version`/`max_version` or an empty `http_version`
/// leaves that bound open.
#[derive(Debug, Clone, Default)]
pub struct BrowserSpec {
    /// Browser family name.
    pub name: String,
    /// Lowest acceptable major version, 0 for no bound.
    pub min_version: u32,
    /// Highest acceptable major version, 0 for no bound.
    pub max_version: u32,
    /// Required HTTP version, empty for either.
    pub http_version: String,
}

impl BrowserSpec {
    /// Spec matching `name` at any version over any HTTP version.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// One observed browser tuple, parsed from its complete string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpBrowser {
    /// Browser family; `None` for the missing-value record.
    pub name: Option<String>,
    /// Numeric version components, most significant first.
    pub version: Vec<u32>,
    /// The exact string the networks use as this record's value.
    pub complete_string: String,
    /// `"1"` or `"2"`; empty for the missing-value record.
    pub http_version: String,
}

impl HttpBrowser {
    /// Parse a `name/major.minor...|httpVersion` string.
    ///
    /// The missing-value sentinel parses to a nameless record. Any other
    /// shape that does not split into browser and HTTP version is rejected.
    pub fn parse(complete: &str) -> Option<Self> {
        if complete == MISSING_VALUE_TOKEN {
            return Some(Self {
                name: None,
                version: Vec::new(),
                complete_string: complete.to_owned(),
                http_version: String::new(),
            });
        }
        let (browser_part, http_version) = complete.split_once('|')?;
        let (name, version_string) = browser_part.split_once('/')?;
        let version = version_string
            .split('.')
            .map(|component| component.parse().unwrap_or(0))
            .collect();
        Some(Self {
            name: Some(name.to_owned()),
            version,
            complete_string: complete.to_owned(),
            http_version: http_version.to_owned(),
        })
    }

    /// Whether this record speaks HTTP/2.
    pub fn is_http2(&self) -> bool {
        self.http_version == "2"
    }

    /// First version component, 0 when the record has none.
    pub fn major_version(&self) -> u32 {
        self.version.first().copied().unwrap_or(0)
    }

    /// Whether this record satisfies `spec`.
    pub(crate) fn matches(&self, spec: &BrowserSpec) -> bool {
        let Some(name) = &self.name else {
            return false;
        };
        if *name != spec.name {
            return false;
        }
        if !spec.http_version.is_empty() && spec.http_version != self.http_version {
            return false;
        }
        if spec.min_version > 0 && self.major_version() < spec.min_version {
            return false;
        }
        if spec.max_version > 0 && self.major_version() > spec.max_version {
            return false;
        }
        true
    }
}

/// Decode the unique-browser table from the helper document.
///
/// The sentinel entry and unparsable records are dropped. A document that
/// fails to decode leaves the table empty with a warning; the networks
/// still work, only constraint translation loses its candidates.
pub(crate) fn load_unique_browsers(data: &[u8]) -> Vec<HttpBrowser> {
    let strings: Vec<String> = match serde_json::from_slice(data) {
        Ok(strings) => strings,
        Err(error) => {
            tracing::warn!(%error, "failed to parse the unique-browser helper file");
            return Vec::new();
        }
    };
    strings
        .iter()
        .filter(|complete| complete.as_str() != MISSING_VALUE_TOKEN)
        .filter_map(|complete| HttpBrowser::parse(complete))
        .collect()
}
