//! HTTP header synthesis from the input and header networks.
//!
//! Generation runs in two stages. A restricted joint sample over the input
//! network picks the browser, HTTP version, operating system and device
//! combination; that sample then seeds an unconditional pass over the
//! header network, which emits the header values themselves. Post-passes
//! add Accept-Language, inject Sec-Fetch metadata for browsers that send
//! it, and fix up header-name casing for the requested HTTP version.

pub mod browser;
pub mod casing;
pub mod constraints;

use std::collections::HashMap;

use crate::assets;
use crate::bayes::{BayesianNetwork, Sample, ValueRestrictions};
use crate::error::{Error, Result};

pub use browser::{BrowserSpec, HttpBrowser};
pub use constraints::HeaderConstraints;

use browser::load_unique_browsers;
use casing::{title_case_headers, HTTP1_SEC_FETCH, HTTP2_SEC_FETCH};
use constraints::MAX_LOCALES;

/// Marks a variable with no value in a given sample; never emitted.
pub(crate) const MISSING_VALUE_TOKEN: &str = "*MISSING_VALUE*";

/// Input-network variable holding the complete browser string.
const BROWSER_HTTP_NODE: &str = "*BROWSER_HTTP";
/// Input-network variable holding the operating system.
const OPERATING_SYSTEM_NODE: &str = "*OPERATING_SYSTEM";
/// Input-network variable holding the device class.
const DEVICE_NODE: &str = "*DEVICE";
/// Input-network variable holding the HTTP version.
const HTTP_VERSION_NODE: &str = "*HTTP_VERSION";

/// Generated header map, keyed by canonical header name.
pub type Headers = HashMap<String, String>;

/// Generates realistic HTTP request headers.
///
/// Construction loads the embedded networks once; the generator is then
/// immutable and reusable for any number of calls.
pub struct HeaderGenerator {
    input_network: BayesianNetwork,
    header_network: BayesianNetwork,
    unique_browsers: Vec<HttpBrowser>,
    headers_order: HashMap<String, Vec<String>>,
    options: HeaderConstraints,
}

impl HeaderGenerator {
    /// Load the embedded input and header networks and helper tables.
    pub fn new() -> Result<Self> {
        let input_network = BayesianNetwork::from_zip(network_blob("input-network-definition.zip")?)?;
        let header_network =
            BayesianNetwork::from_zip(network_blob("header-network-definition.zip")?)?;
        let unique_browsers = load_unique_browsers(
            assets::data_file("browser-helper-file.json").unwrap_or_default(),
        );
        let headers_order =
            load_headers_order(assets::data_file("headers-order.json").unwrap_or_default());
        Ok(Self {
            input_network,
            header_network,
            unique_browsers,
            headers_order,
            options: HeaderConstraints::defaults(),
        })
    }

    /// Generate one header set satisfying `constraints`.
    pub fn generate_headers(&self, constraints: &HeaderConstraints) -> Result<Headers> {
        let merged = self.options.merge(constraints)?;
        self.generate_merged(merged, true)
    }

    /// The canonical header ordering observed for `browser`.
    ///
    /// Loaded from the helper table; emission does not apply it yet.
    pub fn headers_order(&self, browser: &str) -> Option<&[String]> {
        self.headers_order.get(browser).map(Vec::as_slice)
    }

    fn generate_merged(
        &self,
        mut constraints: HeaderConstraints,
        allow_relaxation: bool,
    ) -> Result<Headers> {
        let restrictions = self.value_restrictions(&constraints);
        let mut rng = rand::thread_rng();

        let Some(input_sample) = self
            .input_network
            .generate_consistent_sample(&restrictions, &mut rng)
        else {
            // The HTTP/2 training data is much richer; an unsatisfiable
            // HTTP/1 request is retried there before anything is relaxed.
            if constraints.http_version == "1" {
                constraints.http_version = "2".to_owned();
                return self.generate_merged(constraints, allow_relaxation);
            }
            if constraints.strict {
                return Err(Error::infeasible(
                    "no headers can be generated for these constraints; \
                     relax or change some of the requirements",
                ));
            }
            if !allow_relaxation {
                return Err(Error::infeasible(
                    "no headers can be generated even with relaxed constraints",
                ));
            }
            // Coarsest relaxation step: drop locales and devices together.
            // TODO: drop the constraints one at a time instead.
            constraints.locales.clear();
            constraints.devices.clear();
            return self.generate_merged(constraints, false);
        };

        let sample = self.header_network.generate_sample(&input_sample, &mut rng);
        let mut headers = headers_from_sample(&sample);

        if !constraints.locales.is_empty() {
            let name = if sample.get(HTTP_VERSION_NODE).map(String::as_str) == Some("2") {
                "accept-language"
            } else {
                "Accept-Language"
            };
            headers.insert(name.to_owned(), accept_language_value(&constraints.locales));
        }

        if let Some(browser) = sample
            .get(BROWSER_HTTP_NODE)
            .and_then(|complete| HttpBrowser::parse(complete))
        {
            if sends_sec_fetch(&browser) {
                let attributes = if browser.is_http2() {
                    HTTP2_SEC_FETCH
                } else {
                    HTTP1_SEC_FETCH
                };
                for (name, value) in attributes {
                    headers.insert(name.to_owned(), value.to_owned());
                }
            }
        }

        // TODO: emit in the per-browser order from headers-order.json.
        if constraints.http_version == "2" {
            headers = title_case_headers(headers);
        }
        Ok(headers)
    }

    /// Translate merged constraints into per-variable allowed-value lists
    /// for the input network. Empty candidate lists are omitted: an absent
    /// key leaves that variable unrestricted.
    fn value_restrictions(&self, constraints: &HeaderConstraints) -> ValueRestrictions {
        let mut restrictions = ValueRestrictions::new();
        let candidates = self.browser_http_candidates(constraints);
        if !candidates.is_empty() {
            restrictions.insert(BROWSER_HTTP_NODE.to_owned(), candidates);
        }
        if !constraints.operating_systems.is_empty() {
            restrictions.insert(
                OPERATING_SYSTEM_NODE.to_owned(),
                constraints.operating_systems.clone(),
            );
        }
        if !constraints.devices.is_empty() {
            restrictions.insert(DEVICE_NODE.to_owned(), constraints.devices.clone());
        }
        restrictions
    }

    /// Unique-browser complete strings matching the merged constraints.
    ///
    /// With `browser_specs` present each spec selects records by name,
    /// version bounds and HTTP version; otherwise every merged browser
    /// name selects records over the merged HTTP version.
    fn browser_http_candidates(&self, constraints: &HeaderConstraints) -> Vec<String> {
        let specs: Vec<BrowserSpec> = if constraints.browser_specs.is_empty() {
            constraints
                .browsers
                .iter()
                .map(|name| BrowserSpec {
                    http_version: constraints.http_version.clone(),
                    ..BrowserSpec::new(name.clone())
                })
                .collect()
        } else {
            constraints.browser_specs.clone()
        };

        let mut candidates = Vec::new();
        for spec in &specs {
            for record in &self.unique_browsers {
                if record.matches(spec) {
                    candidates.push(record.complete_string.clone());
                }
            }
        }
        candidates
    }
}

fn network_blob(name: &'static str) -> Result<&'static [u8]> {
    assets::data_file(name).ok_or_else(|| Error::missing(name))
}

/// Decode the per-browser header ordering table; an undecodable document
/// leaves it empty with a warning.
fn load_headers_order(data: &[u8]) -> HashMap<String, Vec<String>> {
    match serde_json::from_slice(data) {
        Ok(order) => order,
        Err(error) => {
            tracing::warn!(%error, "failed to parse the headers-order helper file");
            HashMap::new()
        }
    }
}

/// Copy sample entries that are real header fields: internal variables
/// (names starting `*`) and missing values never reach the output.
fn headers_from_sample(sample: &Sample) -> Headers {
    sample
        .iter()
        .filter(|(name, value)| !name.starts_with('*') && value.as_str() != MISSING_VALUE_TOKEN)
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect()
}

/// Build an Accept-Language value with q descending from 1.0 in steps of
/// 0.1, at most ten entries.
fn accept_language_value(locales: &[String]) -> String {
    locales
        .iter()
        .take(MAX_LOCALES)
        .enumerate()
        .map(|(position, locale)| format!("{locale};q={:.1}", 1.0 - position as f64 * 0.1))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Browsers that send Sec-Fetch metadata: Chrome from 76, Firefox from 90,
/// Edge from 79.
fn sends_sec_fetch(browser: &HttpBrowser) -> bool {
    let Some(name) = browser.name.as_deref() else {
        return false;
    };
    if browser.version.is_empty() {
        return false;
    }
    match name {
        "chrome" => browser.major_version() >= 76,
        "firefox" => browser.major_version() >= 90,
        "edge" => browser.major_version() >= 79,
        _ => false,
    }
}
