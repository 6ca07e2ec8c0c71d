#![no_main]
use std::time::Duration;

use journey_core::TripAnalyzer;
use journey_core::mocks::FailingResolver;
use journey_traits::FixedClock;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Any request that parses must analyze to Ok or a typed error, never a panic.
    let Ok(req) = serde_json::from_slice::<journey_core::TripRequest>(data) else {
        return;
    };
    let Ok(analyzer) = TripAnalyzer::builder()
        .with_resolver(FailingResolver)
        .with_clock(FixedClock::at(1_700_000_000))
        .with_lookup_timeout(Duration::from_millis(50))
        .build()
    else {
        return;
    };
    if let Ok(a) = analyzer.analyze(&req) {
        assert!(a.consumption.is_finite());
        assert!(a.breaks.iter().all(|b| b.end_timestamp >= b.start_timestamp));
    }
});
