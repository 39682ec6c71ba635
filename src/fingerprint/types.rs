//! Typed fingerprint records.
//!
//! The fingerprint network emits string values; these records give them
//! shape once the stringified subtrees are decoded. Field names mirror the
//! browser APIs they impersonate.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Screen metrics as exposed by `window` and `window.screen`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScreenFingerprint {
    pub avail_height: i64,
    pub avail_width: i64,
    pub avail_top: i64,
    pub avail_left: i64,
    pub color_depth: i64,
    pub height: i64,
    pub pixel_depth: i64,
    pub width: i64,
    pub device_pixel_ratio: f64,
    pub page_x_offset: i64,
    pub page_y_offset: i64,
    pub inner_height: i64,
    pub outer_height: i64,
    pub outer_width: i64,
    pub inner_width: i64,
    pub screen_x: i64,
    pub client_width: i64,
    pub client_height: i64,
    #[serde(rename = "hasHDR")]
    pub has_hdr: bool,
}

/// One brand entry in `navigator.userAgentData`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAgentBrand {
    pub brand: String,
    pub version: String,
}

/// `navigator.userAgentData`, including the high-entropy fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserAgentData {
    pub brands: Vec<UserAgentBrand>,
    pub mobile: bool,
    pub platform: String,
    pub architecture: String,
    pub bitness: String,
    pub full_version_list: Vec<UserAgentBrand>,
    pub model: String,
    pub platform_version: String,
    pub ua_full_version: String,
}

/// `navigator` scalar properties plus decoded sub-records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NavigatorFingerprint {
    pub user_agent: String,
    pub user_agent_data: Option<UserAgentData>,
    pub do_not_track: Option<String>,
    pub app_code_name: String,
    pub app_name: String,
    pub app_version: String,
    #[serde(rename = "oscpu")]
    pub os_cpu: String,
    pub webdriver: String,
    pub language: String,
    pub languages: Vec<String>,
    pub platform: String,
    pub device_memory: Option<i64>,
    pub hardware_concurrency: i64,
    pub product: String,
    pub product_sub: String,
    pub vendor: String,
    pub vendor_sub: String,
    pub max_touch_points: i64,
    pub extra_properties: serde_json::Map<String, serde_json::Value>,
}

/// WebGL adapter identity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoCard {
    pub renderer: String,
    pub vendor: String,
}

/// `navigator.getBattery()` snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Battery {
    pub charging: bool,
    pub charging_time: Option<i64>,
    pub discharging_time: Option<i64>,
    pub level: f64,
}

/// One `enumerateDevices()` entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MediaDevice {
    pub device_id: String,
    pub kind: String,
    pub label: String,
    pub group_id: String,
}

/// All media devices, grouped by kind.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MultimediaDevices {
    pub speakers: Vec<MediaDevice>,
    pub micros: Vec<MediaDevice>,
    pub webcams: Vec<MediaDevice>,
}

/// One MIME type registered by a plugin.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MimeType {
    #[serde(rename = "type")]
    pub mime_type: String,
    pub suffixes: String,
    pub description: String,
    pub enabled_plugin: String,
}

/// One `navigator.plugins` entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Plugin {
    pub name: String,
    pub description: String,
    pub filename: String,
    pub mime_types: Vec<MimeType>,
}

/// `navigator.plugins` and `navigator.mimeTypes` together.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PluginsData {
    pub plugins: Vec<Plugin>,
    pub mime_types: Vec<String>,
}

/// A complete synthesized browser fingerprint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Fingerprint {
    pub screen: ScreenFingerprint,
    pub navigator: NavigatorFingerprint,
    pub headers: HashMap<String, String>,
    pub video_codecs: HashMap<String, String>,
    pub audio_codecs: HashMap<String, String>,
    pub plugins_data: PluginsData,
    pub battery: Option<Battery>,
    pub video_card: Option<VideoCard>,
    pub multimedia_devices: Option<MultimediaDevices>,
    pub fonts: Vec<String>,
    #[serde(rename = "mockWebRTC")]
    pub mock_web_rtc: bool,
    pub slim: bool,
}

/// Requested bounds on the sampled screen dimensions.
#[derive(Debug, Clone, Default)]
pub struct Screen {
    pub min_width: Option<i64>,
    pub max_width: Option<i64>,
    pub min_height: Option<i64>,
    pub max_height: Option<i64>,
}

impl Screen {
    /// Whether any bound is set.
    pub fn is_set(&self) -> bool {
        self.min_width.is_some()
            || self.max_width.is_some()
            || self.min_height.is_some()
            || self.max_height.is_some()
    }

    /// Each axis must satisfy `min <= max`.
    pub fn validate(&self) -> Result<()> {
        if let (Some(min), Some(max)) = (self.min_width, self.max_width) {
            if min > max {
                return Err(Error::validation("minWidth cannot be greater than maxWidth"));
            }
        }
        if let (Some(min), Some(max)) = (self.min_height, self.max_height) {
            if min > max {
                return Err(Error::validation(
                    "minHeight cannot be greater than maxHeight",
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_bounds_validate() {
        let screen = Screen {
            min_width: Some(1024),
            max_width: Some(1920),
            ..Default::default()
        };
        assert!(screen.validate().is_ok());
        assert!(screen.is_set());
    }

    #[test]
    fn test_inverted_width_bounds_fail() {
        let screen = Screen {
            min_width: Some(1920),
            max_width: Some(1024),
            ..Default::default()
        };
        assert!(screen.validate().is_err());
    }

    #[test]
    fn test_inverted_height_bounds_fail() {
        let screen = Screen {
            min_height: Some(1080),
            max_height: Some(720),
            ..Default::default()
        };
        assert!(screen.validate().is_err());
    }

    #[test]
    fn test_unset_screen_is_valid() {
        let screen = Screen::default();
        assert!(screen.validate().is_ok());
        assert!(!screen.is_set());
    }

    #[test]
    fn test_screen_fingerprint_decodes_camel_case() {
        let data = r#"{"availHeight":1040,"availWidth":1920,"width":1920,
                       "height":1080,"devicePixelRatio":1.0,"hasHDR":true}"#;
        let screen: ScreenFingerprint = serde_json::from_str(data).unwrap();
        assert_eq!(screen.avail_height, 1040);
        assert_eq!(screen.width, 1920);
        assert!(screen.has_hdr);
    }

    #[test]
    fn test_mime_type_field_renames() {
        let data = r#"{"type":"application/pdf","suffixes":"pdf",
                       "description":"","enabledPlugin":"internal-pdf-viewer"}"#;
        let mime: MimeType = serde_json::from_str(data).unwrap();
        assert_eq!(mime.mime_type, "application/pdf");
        assert_eq!(mime.enabled_plugin, "internal-pdf-viewer");
    }
}
