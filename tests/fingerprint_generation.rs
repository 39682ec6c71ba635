//! End-to-end fingerprint generation against the embedded networks.

use mirage::{FingerprintGenerator, HeaderConstraints, Screen};

fn browser_constraints(browser: &str) -> HeaderConstraints {
    HeaderConstraints {
        browsers: vec![browser.to_string()],
        ..Default::default()
    }
}

#[test]
fn test_screen_dimensions_are_consistent() {
    let generator = FingerprintGenerator::new().unwrap();
    for _ in 0..10 {
        let fingerprint = generator.generate().unwrap();
        let screen = &fingerprint.screen;
        assert!(screen.width > 0 && screen.height > 0);
        assert!(screen.avail_width <= screen.width);
        assert!(screen.avail_height <= screen.height);
    }
}

#[test]
fn test_locales_propagate_to_headers_and_languages() {
    let generator = FingerprintGenerator::builder()
        .header_constraints(HeaderConstraints {
            locales: vec!["fr-FR".to_string()],
            ..Default::default()
        })
        .build()
        .unwrap();
    let fingerprint = generator.generate().unwrap();
    let accept_language = fingerprint
        .headers
        .get("Accept-Language")
        .expect("Accept-Language must be present");
    assert!(accept_language.starts_with("fr-FR"));
    assert_eq!(fingerprint.navigator.languages.first().map(String::as_str), Some("fr-FR"));
    assert_eq!(fingerprint.navigator.language, "fr-FR");
}

#[test]
fn test_chrome_has_user_agent_data() {
    let generator = FingerprintGenerator::builder()
        .header_constraints(browser_constraints("chrome"))
        .build()
        .unwrap();
    for _ in 0..5 {
        let fingerprint = generator.generate().unwrap();
        let data = fingerprint
            .navigator
            .user_agent_data
            .expect("chrome exposes userAgentData");
        assert!(!data.brands.is_empty());
        assert!(!data.platform.is_empty());
    }
}

#[test]
fn test_firefox_has_no_user_agent_data() {
    let generator = FingerprintGenerator::builder()
        .header_constraints(browser_constraints("firefox"))
        .build()
        .unwrap();
    for _ in 0..5 {
        let fingerprint = generator.generate().unwrap();
        assert!(fingerprint.navigator.user_agent_data.is_none());
        assert!(fingerprint.navigator.user_agent.contains("Firefox"));
    }
}

#[test]
fn test_user_agent_matches_headers() {
    let generator = FingerprintGenerator::new().unwrap();
    for _ in 0..5 {
        let fingerprint = generator.generate().unwrap();
        let header_ua = fingerprint
            .headers
            .get("User-Agent")
            .expect("headers must carry a User-Agent");
        assert_eq!(&fingerprint.navigator.user_agent, header_ua);
    }
}

#[test]
fn test_fingerprint_carries_environment_tables() {
    let generator = FingerprintGenerator::builder()
        .header_constraints(browser_constraints("chrome"))
        .build()
        .unwrap();
    let fingerprint = generator.generate().unwrap();
    assert!(!fingerprint.fonts.is_empty());
    assert!(!fingerprint.video_codecs.is_empty());
    assert!(!fingerprint.audio_codecs.is_empty());
    assert!(!fingerprint.navigator.webdriver.is_empty());
    assert!(fingerprint.video_card.is_some());
}

#[test]
fn test_mobile_fingerprint_has_touch_points() {
    let generator = FingerprintGenerator::builder()
        .header_constraints(HeaderConstraints {
            devices: vec!["mobile".to_string()],
            ..Default::default()
        })
        .build()
        .unwrap();
    for _ in 0..5 {
        let fingerprint = generator.generate().unwrap();
        assert!(fingerprint.navigator.max_touch_points > 0);
        assert!(fingerprint.screen.width < 1000);
    }
}

#[test]
fn test_passthrough_flags_are_copied() {
    let generator = FingerprintGenerator::builder()
        .mock_web_rtc(true)
        .slim(true)
        .build()
        .unwrap();
    let fingerprint = generator.generate().unwrap();
    assert!(fingerprint.mock_web_rtc);
    assert!(fingerprint.slim);

    let plain = FingerprintGenerator::new().unwrap().generate().unwrap();
    assert!(!plain.mock_web_rtc);
    assert!(!plain.slim);
}

#[test]
fn test_inverted_screen_bounds_fail_at_build() {
    let result = FingerprintGenerator::builder()
        .screen(Screen {
            min_width: Some(1920),
            max_width: Some(1024),
            ..Default::default()
        })
        .build();
    assert!(result.is_err());
}

#[test]
fn test_valid_screen_bounds_are_accepted() {
    let generator = FingerprintGenerator::builder()
        .screen(Screen {
            min_width: Some(800),
            max_width: Some(4096),
            ..Default::default()
        })
        .build()
        .unwrap();
    // Bounds are validated and retained, but not yet applied to sampling.
    assert!(generator.screen().is_some_and(Screen::is_set));
    assert!(generator.generate().is_ok());
}

#[test]
fn test_fingerprint_serializes_with_browser_field_names() {
    let generator = FingerprintGenerator::new().unwrap();
    let fingerprint = generator.generate().unwrap();
    let json = serde_json::to_value(&fingerprint).unwrap();
    assert!(json.get("screen").is_some());
    assert!(json["navigator"].get("userAgent").is_some());
    assert!(json["screen"].get("availHeight").is_some());
    assert!(json.get("mockWebRTC").is_some());
}
