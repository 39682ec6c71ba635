//! # Mirage
//!
//! Statistical synthesis of browser HTTP headers and full browser
//! fingerprints.
//!
//! Header and fingerprint values are drawn from discrete Bayesian networks
//! fitted to observed traffic, so the joint distribution of what this crate
//! emits matches what real browsers on real hardware send. Callers
//! constrain generation with high-level options (browser families,
//! operating systems, devices, HTTP version, locales); those are translated
//! into per-variable value restrictions and satisfied by backtracking joint
//! sampling over the networks.

// Core engine
pub mod bayes;
pub mod error;

// Generators
pub mod fingerprint;
pub mod headers;

// Embedded data plumbing
pub mod assets;
mod archive;

// Re-exports for convenient access
pub use bayes::{BayesianNetwork, Sample};
pub use error::{Error, Result};
pub use fingerprint::types::{Fingerprint, Screen};
pub use fingerprint::{FingerprintGenerator, FingerprintGeneratorBuilder};
pub use headers::{BrowserSpec, HeaderConstraints, HeaderGenerator, Headers, HttpBrowser};
