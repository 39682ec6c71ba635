//! User-facing header constraints and their merge against defaults.

use crate::error::{Error, Result};
use crate::headers::browser::BrowserSpec;

/// Browser families the networks carry data for.
pub const SUPPORTED_BROWSERS: &[&str] = &["chrome", "firefox", "safari", "edge"];

/// Operating systems the networks carry data for.
pub const SUPPORTED_OPERATING_SYSTEMS: &[&str] = &["windows", "macos", "linux", "android", "ios"];

/// Device classes the networks carry data for.
pub const SUPPORTED_DEVICES: &[&str] = &["desktop", "mobile"];

/// Recognized HTTP versions.
pub const SUPPORTED_HTTP_VERSIONS: &[&str] = &["1", "2"];

/// Accept-Language carries at most this many locales.
pub const MAX_LOCALES: usize = 10;

/// Constraints on header generation.
///
/// An empty field means "unspecified" and inherits its default during the
/// merge. `browser_specs`, when non-empty, supersedes `browsers` and
/// `http_version` for browser selection.
#[derive(Debug, Clone, Default)]
pub struct HeaderConstraints {
    /// Per-browser records with version and HTTP bounds.
    pub browser_specs: Vec<BrowserSpec>,
    /// Browser family names.
    pub browsers: Vec<String>,
    /// Operating system names.
    pub operating_systems: Vec<String>,
    /// Device class names.
    pub devices: Vec<String>,
    /// BCP-47 locale tags, most preferred first.
    pub locales: Vec<String>,
    /// `"1"` or `"2"`.
    pub http_version: String,
    /// Fail instead of relaxing when no sample satisfies the constraints.
    pub strict: bool,
}

impl HeaderConstraints {
    /// The defaults every unspecified field inherits: all supported
    /// browsers, systems and devices, HTTP/2, `en-US`, non-strict.
    pub fn defaults() -> Self {
        Self {
            browser_specs: Vec::new(),
            browsers: to_owned(SUPPORTED_BROWSERS),
            operating_systems: to_owned(SUPPORTED_OPERATING_SYSTEMS),
            devices: to_owned(SUPPORTED_DEVICES),
            locales: vec!["en-US".to_owned()],
            http_version: "2".to_owned(),
            strict: false,
        }
    }

    /// Merge user constraints over `self` (the defaults).
    ///
    /// Each list field keeps the supported subset of the user's values when
    /// any survive; otherwise the default stays. Every unsupported value is
    /// reported, aborting generation so the caller sees the mistake.
    pub(crate) fn merge(&self, user: &HeaderConstraints) -> Result<HeaderConstraints> {
        let mut merged = self.clone();
        let mut problems = Vec::new();

        merge_list(
            &user.browsers,
            SUPPORTED_BROWSERS,
            "browser",
            &mut merged.browsers,
            &mut problems,
        );
        merge_list(
            &user.operating_systems,
            SUPPORTED_OPERATING_SYSTEMS,
            "operating system",
            &mut merged.operating_systems,
            &mut problems,
        );
        merge_list(
            &user.devices,
            SUPPORTED_DEVICES,
            "device",
            &mut merged.devices,
            &mut problems,
        );

        if !user.locales.is_empty() {
            merged.locales = user.locales.iter().take(MAX_LOCALES).cloned().collect();
        }
        if !user.http_version.is_empty() {
            if SUPPORTED_HTTP_VERSIONS.contains(&user.http_version.as_str()) {
                merged.http_version = user.http_version.clone();
            } else {
                problems.push(format!(
                    "http version '{}' is not supported",
                    user.http_version
                ));
            }
        }
        merged.strict = user.strict;
        merged.browser_specs = user.browser_specs.clone();

        if problems.is_empty() {
            Ok(merged)
        } else {
            Err(Error::validation(problems.join("; ")))
        }
    }
}

/// Replace `target` with the supported subset of `user_values` when any
/// survive; record every unsupported value.
fn merge_list(
    user_values: &[String],
    supported: &[&str],
    field: &str,
    target: &mut Vec<String>,
    problems: &mut Vec<String>,
) {
    if user_values.is_empty() {
        return;
    }
    let mut valid = Vec::with_capacity(user_values.len());
    for value in user_values {
        if supported.contains(&value.as_str()) {
            valid.push(value.clone());
        } else {
            problems.push(format!("{field} value '{value}' is not supported"));
        }
    }
    if !valid.is_empty() {
        *target = valid;
    }
}

fn to_owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_owned()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_unspecified_fields_inherit_defaults() {
        let merged = HeaderConstraints::defaults()
            .merge(&HeaderConstraints::default())
            .unwrap();
        assert_eq!(merged.browsers, strings(SUPPORTED_BROWSERS));
        assert_eq!(merged.http_version, "2");
        assert_eq!(merged.locales, strings(&["en-US"]));
        assert!(!merged.strict);
    }

    #[test]
    fn test_supported_subset_replaces_default() {
        let user = HeaderConstraints {
            browsers: strings(&["firefox"]),
            ..Default::default()
        };
        let merged = HeaderConstraints::defaults().merge(&user).unwrap();
        assert_eq!(merged.browsers, strings(&["firefox"]));
    }

    #[test]
    fn test_unsupported_value_is_reported() {
        let user = HeaderConstraints {
            browsers: strings(&["netscape"]),
            ..Default::default()
        };
        let error = HeaderConstraints::defaults().merge(&user).unwrap_err();
        assert!(error.to_string().contains("not supported"));
    }

    #[test]
    fn test_partial_subset_still_errors() {
        let user = HeaderConstraints {
            browsers: strings(&["chrome", "netscape"]),
            ..Default::default()
        };
        assert!(HeaderConstraints::defaults().merge(&user).is_err());
    }

    #[test]
    fn test_locales_are_capped() {
        let many: Vec<String> = (0..15).map(|i| format!("xx-{i:02}")).collect();
        let user = HeaderConstraints {
            locales: many,
            ..Default::default()
        };
        let merged = HeaderConstraints::defaults().merge(&user).unwrap();
        assert_eq!(merged.locales.len(), MAX_LOCALES);
    }

    #[test]
    fn test_bad_http_version_is_reported() {
        let user = HeaderConstraints {
            http_version: "3".to_owned(),
            ..Default::default()
        };
        let error = HeaderConstraints::defaults().merge(&user).unwrap_err();
        assert!(error.to_string().contains("not supported"));
    }
}
