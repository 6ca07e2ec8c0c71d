#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // TOML parsing and validation of Config must reject bad input without panicking.
    if let Ok(cfg) = toml::from_str::<journey_config::Config>(data) {
        let _ = cfg.validate();
    }
    // Same for the sample CSV reader.
    let _ = journey_config::read_samples_csv(data.as_bytes());
});
