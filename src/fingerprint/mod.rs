//! Browser fingerprint synthesis.
//!
//! A fingerprint is sampled from the fingerprint network conditioned on a
//! User-Agent obtained from header generation, then decoded from the
//! network's string encoding into typed records.

pub mod types;

use std::collections::HashMap;

use crate::assets;
use crate::bayes::{BayesianNetwork, Sample, ValueRestrictions};
use crate::error::{Error, Result};
use crate::headers::{HeaderConstraints, HeaderGenerator, Headers, MISSING_VALUE_TOKEN};

pub use types::{
    Battery, Fingerprint, MediaDevice, MimeType, MultimediaDevices, NavigatorFingerprint, Plugin,
    PluginsData, Screen, ScreenFingerprint, UserAgentBrand, UserAgentData, VideoCard,
};

/// Prefix marking a value that carries an embedded JSON payload.
const STRINGIFIED_PREFIX: &str = "*STRINGIFIED*";

/// Fingerprint-network variable the User-Agent constraint binds.
const USER_AGENT_NODE: &str = "userAgent";

/// Generates complete browser fingerprints with matching headers.
pub struct FingerprintGenerator {
    network: BayesianNetwork,
    header_generator: HeaderGenerator,
    header_constraints: HeaderConstraints,
    screen: Option<Screen>,
    strict: bool,
    mock_web_rtc: bool,
    slim: bool,
}

/// Options for [`FingerprintGenerator`].
#[derive(Debug, Clone, Default)]
pub struct FingerprintGeneratorBuilder {
    header_constraints: HeaderConstraints,
    screen: Option<Screen>,
    strict: bool,
    mock_web_rtc: bool,
    slim: bool,
}

impl FingerprintGeneratorBuilder {
    /// Builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bound the sampled screen dimensions.
    pub fn screen(mut self, screen: Screen) -> Self {
        self.screen = Some(screen);
        self
    }

    /// Fail instead of falling back when constraints cannot be satisfied.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Mark the fingerprint for WebRTC mocking downstream.
    pub fn mock_web_rtc(mut self, mock: bool) -> Self {
        self.mock_web_rtc = mock;
        self
    }

    /// Mark the fingerprint for slim injection downstream.
    pub fn slim(mut self, slim: bool) -> Self {
        self.slim = slim;
        self
    }

    /// Constrain header (and thereby User-Agent) generation.
    pub fn header_constraints(mut self, constraints: HeaderConstraints) -> Self {
        self.header_constraints = constraints;
        self
    }

    /// Validate the options and load the networks.
    pub fn build(self) -> Result<FingerprintGenerator> {
        if let Some(screen) = &self.screen {
            screen.validate()?;
        }
        let header_generator = HeaderGenerator::new()?;
        let blob = assets::data_file("fingerprint-network-definition.zip")
            .ok_or_else(|| Error::missing("fingerprint-network-definition.zip"))?;
        let network = BayesianNetwork::from_zip(blob)?;
        Ok(FingerprintGenerator {
            network,
            header_generator,
            header_constraints: self.header_constraints,
            screen: self.screen,
            strict: self.strict,
            mock_web_rtc: self.mock_web_rtc,
            slim: self.slim,
        })
    }
}

impl FingerprintGenerator {
    /// Generator with default options.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Start configuring a generator.
    pub fn builder() -> FingerprintGeneratorBuilder {
        FingerprintGeneratorBuilder::new()
    }

    /// The configured screen bounds, if any.
    pub fn screen(&self) -> Option<&Screen> {
        self.screen.as_ref()
    }

    /// Generate one fingerprint together with the headers it matches.
    pub fn generate(&self) -> Result<Fingerprint> {
        let headers = self
            .header_generator
            .generate_headers(&self.header_constraints)?;
        let user_agent = headers
            .get("User-Agent")
            .cloned()
            .ok_or_else(|| Error::missing("User-Agent in generated headers"))?;

        let mut restrictions = ValueRestrictions::new();
        restrictions.insert(USER_AGENT_NODE.to_owned(), vec![user_agent]);
        // TODO: when screen bounds are set, post-reject samples whose
        // decoded screen falls outside them and redraw. The bounds are
        // validated at build time but not applied yet.

        let mut rng = rand::thread_rng();
        let raw = match self.network.generate_consistent_sample(&restrictions, &mut rng) {
            Some(raw) => raw,
            None if self.strict => {
                return Err(Error::infeasible(
                    "no fingerprint can be generated for this User-Agent",
                ))
            }
            None => self.network.generate_sample(&Sample::new(), &mut rng),
        };
        self.assemble(raw, headers)
    }

    /// Decode a raw string-valued sample into the typed fingerprint.
    fn assemble(&self, mut raw: Sample, headers: Headers) -> Result<Fingerprint> {
        for value in raw.values_mut() {
            if value == MISSING_VALUE_TOKEN {
                value.clear();
            } else if let Some(json) = value.strip_prefix(STRINGIFIED_PREFIX) {
                *value = json.to_owned();
            }
        }

        // The sampled languages are superseded by what the headers promise.
        if let Some(accept_language) = headers.get("Accept-Language") {
            let languages: Vec<String> = accept_language
                .split(',')
                .map(|entry| entry.split(';').next().unwrap_or("").trim().to_owned())
                .collect();
            raw.insert("languages".to_owned(), serde_json::to_string(&languages)?);
        }

        let screen_data = raw
            .get("screen")
            .filter(|data| !data.is_empty())
            .ok_or_else(|| Error::missing("screen data in fingerprint"))?;
        let screen: ScreenFingerprint = serde_json::from_str(screen_data)?;

        let user_agent_data = parse_optional::<UserAgentData>(raw.get("userAgentData"))?;
        let extra_properties = match raw.get("extraProperties").filter(|data| !data.is_empty()) {
            Some(data) => serde_json::from_str(data)?,
            None => serde_json::Map::new(),
        };

        let languages_data = raw.get("languages").cloned().unwrap_or_default();
        let languages: Vec<String> = serde_json::from_str(&languages_data)?;

        let navigator = NavigatorFingerprint {
            user_agent: raw_value(&raw, "userAgent"),
            user_agent_data,
            do_not_track: non_empty(raw.get("doNotTrack")),
            app_code_name: raw_value(&raw, "appCodeName"),
            app_name: raw_value(&raw, "appName"),
            app_version: raw_value(&raw, "appVersion"),
            os_cpu: raw_value(&raw, "oscpu"),
            webdriver: raw_value(&raw, "webdriver"),
            language: languages.first().cloned().unwrap_or_default(),
            languages,
            platform: raw_value(&raw, "platform"),
            device_memory: parse_integer(raw.get("deviceMemory")),
            hardware_concurrency: parse_integer(raw.get("hardwareConcurrency")).unwrap_or(0),
            product: raw_value(&raw, "product"),
            product_sub: raw_value(&raw, "productSub"),
            vendor: raw_value(&raw, "vendor"),
            vendor_sub: raw_value(&raw, "vendorSub"),
            max_touch_points: parse_integer(raw.get("maxTouchPoints")).unwrap_or(0),
            extra_properties,
        };

        let video_card = parse_optional::<VideoCard>(raw.get("videoCard"))?;
        let battery = parse_optional::<Battery>(raw.get("battery"))?;
        let multimedia_devices =
            parse_optional::<MultimediaDevices>(raw.get("multimediaDevices"))?;
        let plugins_data = parse_optional::<PluginsData>(raw.get("pluginsData"))?.unwrap_or_default();
        let fonts = parse_optional::<Vec<String>>(raw.get("fonts"))?.unwrap_or_default();

        Ok(Fingerprint {
            screen,
            navigator,
            headers,
            video_codecs: string_map(raw.get("videoCodecs")),
            audio_codecs: string_map(raw.get("audioCodecs")),
            plugins_data,
            battery,
            video_card,
            multimedia_devices,
            fonts,
            mock_web_rtc: self.mock_web_rtc,
            slim: self.slim,
        })
    }
}

fn raw_value(raw: &Sample, key: &str) -> String {
    raw.get(key).cloned().unwrap_or_default()
}

/// `None` for absent, empty, or JSON-null values.
fn non_empty(value: Option<&String>) -> Option<String> {
    value
        .filter(|v| !v.is_empty() && v.as_str() != "null")
        .cloned()
}

fn parse_integer(value: Option<&String>) -> Option<i64> {
    value.and_then(|v| v.parse().ok())
}

/// Decode an optional JSON-encoded sub-record; absent or empty is `None`.
fn parse_optional<T: serde::de::DeserializeOwned>(data: Option<&String>) -> Result<Option<T>> {
    match data {
        Some(data) if !data.is_empty() => Ok(Some(serde_json::from_str(data)?)),
        _ => Ok(None),
    }
}

/// Codec tables decode leniently: an undecodable value is an empty map.
fn string_map(value: Option<&String>) -> HashMap<String, String> {
    value
        .and_then(|data| serde_json::from_str(data).ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty_treats_null_as_absent() {
        assert_eq!(non_empty(Some(&"null".to_owned())), None);
        assert_eq!(non_empty(Some(&String::new())), None);
        assert_eq!(non_empty(Some(&"1".to_owned())), Some("1".to_owned()));
        assert_eq!(non_empty(None), None);
    }

    #[test]
    fn test_parse_integer_rejects_garbage() {
        assert_eq!(parse_integer(Some(&"8".to_owned())), Some(8));
        assert_eq!(parse_integer(Some(&String::new())), None);
        assert_eq!(parse_integer(Some(&"null".to_owned())), None);
    }

    #[test]
    fn test_string_map_is_lenient() {
        let data = r#"{"h264":"probably"}"#.to_owned();
        let map = string_map(Some(&data));
        assert_eq!(map.get("h264").map(String::as_str), Some("probably"));
        assert!(string_map(Some(&"broken".to_owned())).is_empty());
        assert!(string_map(None).is_empty());
    }
}
