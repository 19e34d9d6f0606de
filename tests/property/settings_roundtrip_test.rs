//! Property-based tests for ClientSettings persistence.
//!
//! Arbitrary valid settings survive JSON serialization and a save/load cycle
//! through the settings engine without data loss.

use jobflow::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use jobflow::types::settings::{ApiSettings, ClientSettings, LoggingSettings, StorageSettings};
use proptest::prelude::*;

fn arb_api_settings() -> impl Strategy<Value = ApiSettings> {
    (
        prop_oneof![Just("http"), Just("https")],
        "[a-z][a-z0-9]{1,12}",
        proptest::option::of(1024u16..65535),
        1u32..200,
    )
        .prop_map(|(scheme, host, port, page_size)| ApiSettings {
            base_url: match port {
                Some(port) => format!("{}://{}.example:{}", scheme, host, port),
                None => format!("{}://{}.example", scheme, host),
            },
            page_size,
        })
}

fn arb_storage_settings() -> impl Strategy<Value = StorageSettings> {
    proptest::option::of("/[a-z]{1,10}/[a-z]{1,10}\\.db")
        .prop_map(|database_path| StorageSettings { database_path })
}

fn arb_logging_settings() -> impl Strategy<Value = LoggingSettings> {
    prop_oneof![
        Just("jobflow=info"),
        Just("jobflow=debug"),
        Just("warn"),
        Just("jobflow=trace,reqwest=warn"),
    ]
    .prop_map(|filter| LoggingSettings {
        filter: filter.to_string(),
    })
}

fn arb_client_settings() -> impl Strategy<Value = ClientSettings> {
    (arb_api_settings(), arb_storage_settings(), arb_logging_settings()).prop_map(
        |(api, storage, logging)| ClientSettings {
            api,
            storage,
            logging,
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn settings_json_roundtrip(settings in arb_client_settings()) {
        prop_assert!(settings.validate().is_ok());
        let json = serde_json::to_string(&settings).unwrap();
        let back: ClientSettings = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, settings);
    }

    #[test]
    fn settings_survive_save_and_load(settings in arb_client_settings()) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json").to_string_lossy().to_string();

        std::fs::write(&path, serde_json::to_string_pretty(&settings).unwrap()).unwrap();

        let mut engine = SettingsEngine::new(Some(path.clone()));
        let loaded = engine.load().unwrap();
        prop_assert_eq!(&loaded, &settings);

        engine.save().unwrap();
        let mut reloaded = SettingsEngine::new(Some(path));
        prop_assert_eq!(reloaded.load().unwrap(), settings);
    }
}
