//! End-to-end tests: data files on disk through to property values.

use std::fs;
use std::path::PathBuf;

use devdetect_core::{DetectionError, InvalidStateError, LoadError, MatchMethod, ProviderConfig};
use devdetect_data::{
    DatasetSource, PatternProvider, encode_dataset, open_provider, open_provider_with_config,
    read_raw_dataset, write_dataset_file,
};
use tempfile::TempDir;

const MOBILE_UA: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 7_1 like Mac OS X) \
    AppleWebKit/537.51.2 (KHTML, like Gecko) Version/7.0 Mobile/11D167 Safari/9537.53";
const DESKTOP_UA: &str =
    "Mozilla/5.0 (Windows NT 6.3; WOW64; rv:41.0) Gecko/20100101 Firefox/41.0";
const MEDIA_HUB_UA: &str = "Mozilla/5.0 (Linux; Android 4.4.2; X7 Quad Core Build/KOT49H) \
    AppleWebKit/537.36 (KHTML, like Gecko) Version/4.0 Chrome/30.0.0.0 Safari/537.36";

const ASSORTED_UAS: &[&str] = &[
    MOBILE_UA,
    DESKTOP_UA,
    MEDIA_HUB_UA,
    "",
    "curl/8.4.0",
    "Mozilla/5.0 (compatible; Googlebot/2.1; +http://www.google.com/bot.html)",
    "Mozilla/5.0 (iPad; CPU OS 17_0 like Mac OS X) AppleWebKit/605.1.15 Mobile/15E148",
    "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 Chrome/120.0 Mobile Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 Version/17.0 Safari/605.1.15",
    "\u{1F4F1} not a browser at all",
];

fn bundled_dataset() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data/devices-lite.json")
}

/// Compile the bundled JSON source into a binary data file in `dir`.
fn compiled_dataset(dir: &TempDir) -> PathBuf {
    let raw = read_raw_dataset(&bundled_dataset()).unwrap();
    let path = dir.path().join("devices-lite.dat");
    write_dataset_file(&raw, &path).unwrap();
    path
}

fn is_mobile(provider: &PatternProvider, user_agent: &str) -> String {
    let found = provider.match_user_agent(user_agent).unwrap();
    let value = found.get_value("IsMobile").unwrap().to_string();
    found.release();
    value
}

#[test]
fn getting_started_scenario() {
    let provider = open_provider(bundled_dataset(), "IsMobile").unwrap();

    assert_eq!(is_mobile(&provider, MOBILE_UA), "True");
    assert_eq!(is_mobile(&provider, DESKTOP_UA), "False");
    assert_eq!(is_mobile(&provider, MEDIA_HUB_UA), "False");

    provider.dispose().unwrap();
}

#[test]
fn binary_and_source_agree() {
    let dir = TempDir::new().unwrap();
    let from_source = open_provider(bundled_dataset(), "").unwrap();
    let from_binary = open_provider(compiled_dataset(&dir), "").unwrap();

    for user_agent in ASSORTED_UAS {
        let a = from_source.match_user_agent(user_agent).unwrap();
        let b = from_binary.match_user_agent(user_agent).unwrap();
        assert_eq!(a.values().unwrap(), b.values().unwrap(), "{user_agent}");
        assert_eq!(a.signature_index(), b.signature_index());
    }
}

#[test]
fn is_mobile_is_always_true_or_false() {
    let provider = open_provider(bundled_dataset(), "IsMobile").unwrap();
    for user_agent in ASSORTED_UAS {
        let value = is_mobile(&provider, user_agent);
        assert!(value == "True" || value == "False", "{user_agent}: {value}");
    }
}

#[test]
fn filtered_names_resolve_and_others_do_not() {
    let all = open_provider(bundled_dataset(), "").unwrap();
    let every_property: Vec<String> = all.available_properties().unwrap().to_vec();
    assert_eq!(every_property.len(), 7);

    let filter = "DeviceType, BrowserName";
    let provider = open_provider(bundled_dataset(), filter).unwrap();
    assert_eq!(
        provider.available_properties().unwrap(),
        ["DeviceType", "BrowserName"]
    );

    for user_agent in ASSORTED_UAS {
        let found = provider.match_user_agent(user_agent).unwrap();
        for name in &every_property {
            let result = found.get_value(name);
            if filter.contains(name.as_str()) {
                assert!(result.is_ok(), "{name} should resolve");
            } else {
                assert!(
                    matches!(result, Err(DetectionError::PropertyNotFound(ref n)) if n == name),
                    "{name} should be rejected"
                );
            }
        }
    }
}

#[test]
fn unmatched_input_carries_defaults() {
    let provider = open_provider(bundled_dataset(), "").unwrap();
    let found = provider.match_user_agent("curl/8.4.0").unwrap();
    assert_eq!(found.method(), MatchMethod::None);
    assert_eq!(found.get_value("IsMobile").unwrap(), "False");
    assert_eq!(found.get_value("DeviceType").unwrap(), "Unknown");
}

#[test]
fn match_json_lists_enabled_properties() {
    let provider = open_provider(bundled_dataset(), "IsMobile,DeviceType").unwrap();
    let found = provider.match_user_agent(MOBILE_UA).unwrap();
    let json = found.to_json().unwrap();
    assert_eq!(
        json,
        serde_json::json!({"IsMobile": "True", "DeviceType": "SmartPhone"})
    );
}

#[test]
fn dataset_info_is_reported() {
    let provider = open_provider(bundled_dataset(), "IsMobile").unwrap();
    let info = provider.dataset_info().unwrap();
    assert_eq!(info.name, "Lite");
    assert_eq!(info.published.map(|d| d.to_string()).as_deref(), Some("2026-10-01"));
    assert!(info.signature_count > 0);
    assert!(info.profile_count > 0);
}

#[test]
fn unknown_filter_property_fails_to_load() {
    let err = open_provider(bundled_dataset(), "IsMobile,PriceBand").unwrap_err();
    assert!(matches!(
        err,
        DetectionError::Load(LoadError::UnknownProperty { ref name }) if name == "PriceBand"
    ));
}

#[test]
fn missing_file_fails_to_load() {
    let dir = TempDir::new().unwrap();
    let err = open_provider(dir.path().join("absent.dat"), "").unwrap_err();
    assert!(matches!(err, DetectionError::Load(LoadError::NotFound(_))));
}

#[test]
fn corrupt_binary_fails_to_load() {
    let dir = TempDir::new().unwrap();
    let path = compiled_dataset(&dir);
    let mut bytes = fs::read(&path).unwrap();
    let middle = bytes.len() / 2;
    bytes[middle] ^= 0xff;
    fs::write(&path, &bytes).unwrap();

    let err = open_provider(&path, "").unwrap_err();
    assert!(matches!(err, DetectionError::Load(LoadError::InvalidFormat(_))));
}

#[test]
fn wrong_magic_fails_to_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("model.gguf");
    fs::write(&path, b"GGUF\x03\x00\x00\x00").unwrap();

    let err = open_provider(&path, "").unwrap_err();
    assert!(matches!(err, DetectionError::Load(LoadError::InvalidFormat(ref m)) if m.contains("magic")));
}

#[test]
fn malformed_source_fails_to_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{\"name\": \"x\", \"properties\": [").unwrap();

    let err = open_provider(&path, "").unwrap_err();
    assert!(matches!(err, DetectionError::Load(LoadError::InvalidFormat(_))));
}

#[test]
fn encoded_image_matches_file_contents() {
    let dir = TempDir::new().unwrap();
    let raw = read_raw_dataset(&bundled_dataset()).unwrap();
    let path = compiled_dataset(&dir);
    assert_eq!(fs::read(path).unwrap(), encode_dataset(&raw).unwrap());
}

#[test]
fn source_serializes_back_to_json() {
    let text = fs::read_to_string(bundled_dataset()).unwrap();
    let source: DatasetSource = serde_json::from_str(&text).unwrap();
    let reparsed: DatasetSource =
        serde_json::from_str(&serde_json::to_string(&source).unwrap()).unwrap();
    assert_eq!(source, reparsed);
}

#[test]
fn configured_pool_and_disposal() {
    let config = ProviderConfig::with_defaults()
        .with_properties("IsMobile")
        .with_pool_size(2)
        .with_acquire_timeout_ms(50);
    let provider = open_provider_with_config(bundled_dataset(), &config).unwrap();
    assert_eq!(provider.pool_status().capacity, 2);

    let first = provider.match_user_agent(MOBILE_UA).unwrap();
    let second = provider.match_user_agent(DESKTOP_UA).unwrap();
    assert!(matches!(
        provider.match_user_agent(MEDIA_HUB_UA),
        Err(DetectionError::Timeout(_))
    ));

    assert!(matches!(
        provider.dispose(),
        Err(DetectionError::InvalidState(InvalidStateError::LeasesOutstanding { outstanding: 2 }))
    ));

    first.release();
    second.release();
    provider.dispose().unwrap();
    assert!(matches!(
        provider.match_user_agent(MOBILE_UA),
        Err(DetectionError::InvalidState(InvalidStateError::ProviderDisposed))
    ));
}

#[test]
fn invalid_config_is_rejected_before_loading() {
    let config = ProviderConfig::with_defaults().with_pool_size(0);
    let err = open_provider_with_config("does-not-matter.dat", &config).unwrap_err();
    assert!(matches!(err, DetectionError::Config(_)));
}
