//! Fuzz target: `ControlConfig::from_json`
//!
//! Arbitrary text must either be rejected or yield a configuration that
//! passes validation and builds a service.
//!
//! cargo fuzz run fuzz_config_json

#![no_main]

use autorc::{ControlConfig, TrackerService};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };
    if let Ok(config) = ControlConfig::from_json(text) {
        assert!(config.validate().is_ok());
        assert!(TrackerService::new(config).is_ok());
    }
});
