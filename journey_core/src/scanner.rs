//! The single-pass trip scanner (`TripScanner`).
//!
//! Holds the rolling state of one analysis: the previous sample, the
//! reference fill level in liters, and the accumulated breaks, refuel stops
//! and per-segment consumption rates. State is owned by one scan and never
//! shared.

use crate::consumption::{fill_level_liters, segment_consumption};
use crate::error::TripError;
use crate::types::{Interval, TripSample};

/// Everything the scan produced, handed to the analyzer for final assembly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanOutcome {
    pub breaks: Vec<Interval>,
    pub refuel_stops: Vec<Interval>,
    pub consumption_samples: Vec<f64>,
    pub first: Option<TripSample>,
    pub last: Option<TripSample>,
    pub samples_seen: usize,
}

/// Stateful scanner over an ordered sample sequence.
#[derive(Debug)]
pub struct TripScanner {
    tank_size_l: i32,
    break_threshold_s: i64,
    first: Option<TripSample>,
    previous: Option<TripSample>,
    reference_fuel_l: f64,
    samples_seen: usize,
    breaks: Vec<Interval>,
    refuel_stops: Vec<Interval>,
    consumption: Vec<f64>,
}

impl TripScanner {
    pub fn new(tank_size_l: i32, break_threshold_s: i64) -> Self {
        Self {
            tank_size_l,
            break_threshold_s,
            first: None,
            previous: None,
            reference_fuel_l: 0.0,
            samples_seen: 0,
            breaks: Vec::new(),
            refuel_stops: Vec::new(),
            consumption: Vec::new(),
        }
    }

    /// Fill level (liters) the next segment is measured against.
    pub fn reference_fuel_liters(&self) -> f64 {
        self.reference_fuel_l
    }

    /// Consume the next sample. `index` is only used for error reporting.
    pub fn step(&mut self, index: usize, sample: &TripSample) -> Result<(), TripError> {
        let current_l = fill_level_liters(self.tank_size_l, sample.fuel_level);
        self.samples_seen += 1;

        let Some(prev) = self.previous else {
            self.reference_fuel_l = current_l;
            self.first = Some(*sample);
            self.previous = Some(*sample);
            return Ok(());
        };

        if sample.odometer > prev.odometer && current_l >= self.reference_fuel_l {
            tracing::debug!(
                index,
                reference_l = self.reference_fuel_l,
                current_l,
                "fuel did not drop while moving"
            );
            return Err(TripError::InconsistentFuelMovement { index });
        }

        if sample.odometer == prev.odometer {
            self.classify_stationary(&prev, sample, current_l);
        } else if sample.odometer > prev.odometer {
            let rate =
                segment_consumption(self.reference_fuel_l, current_l, sample.odometer - prev.odometer);
            tracing::trace!(index, rate, "consumption sample");
            self.consumption.push(rate);
            self.reference_fuel_l = current_l;
        } else {
            // Odometer went backwards: tolerated, nothing classified.
            tracing::debug!(
                index,
                previous = prev.odometer,
                current = sample.odometer,
                "odometer decreased; sample passed through"
            );
        }

        self.previous = Some(*sample);
        Ok(())
    }

    /// Refuel and break checks are independent; one pair can yield both.
    fn classify_stationary(&mut self, prev: &TripSample, sample: &TripSample, current_l: f64) {
        if current_l > self.reference_fuel_l {
            let stop = Interval::between(prev, sample);
            tracing::debug!(
                start = stop.start_timestamp,
                end = stop.end_timestamp,
                added_l = current_l - self.reference_fuel_l,
                "refuel stop"
            );
            self.refuel_stops.push(stop);
            self.reference_fuel_l = current_l;
        }

        if sample.timestamp.saturating_sub(prev.timestamp) >= self.break_threshold_s {
            let brk = Interval::between(prev, sample);
            tracing::debug!(
                start = brk.start_timestamp,
                end = brk.end_timestamp,
                "break"
            );
            self.breaks.push(brk);
        }
    }

    pub fn finish(self) -> ScanOutcome {
        ScanOutcome {
            breaks: self.breaks,
            refuel_stops: self.refuel_stops,
            consumption_samples: self.consumption,
            first: self.first,
            last: self.previous,
            samples_seen: self.samples_seen,
        }
    }
}

/// Scan a full, already validated slice.
pub fn scan(
    samples: &[TripSample],
    tank_size_l: i32,
    break_threshold_s: i64,
) -> Result<ScanOutcome, TripError> {
    let mut scanner = TripScanner::new(tank_size_l, break_threshold_s);
    for (i, s) in samples.iter().enumerate() {
        scanner.step(i, s)?;
    }
    Ok(scanner.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(fuel: i32, odo: i64, ts: i64) -> TripSample {
        TripSample {
            fuel_level: fuel,
            odometer: odo,
            position_lat: 48.0 + odo as f64 / 1000.0,
            position_long: 8.0,
            timestamp: ts,
        }
    }

    #[test]
    fn first_sample_sets_reference() {
        let mut sc = TripScanner::new(60, 1800);
        sc.step(0, &s(50, 0, 0)).unwrap();
        assert_eq!(sc.reference_fuel_liters(), 30.0);
        let out = sc.finish();
        assert_eq!(out.samples_seen, 1);
        assert_eq!(out.first, out.last);
    }

    #[test]
    fn stationary_fuel_drop_keeps_reference() {
        // Idling burns fuel without moving; the reference stays put until the next move.
        let out = scan(&[s(100, 0, 0), s(95, 0, 10), s(90, 100, 20)], 100, 1800).unwrap();
        assert!(out.breaks.is_empty());
        assert!(out.refuel_stops.is_empty());
        assert_eq!(out.consumption_samples, vec![10.0]);
    }

    #[test]
    fn refuel_after_idle_drop_compares_against_reference() {
        // 100 -> 80 idle (no refuel), 80 -> 90 still below reference 100: not a refuel.
        let out = scan(&[s(100, 0, 0), s(80, 0, 10), s(90, 0, 20)], 100, 1800).unwrap();
        assert!(out.refuel_stops.is_empty());
    }

    #[test]
    fn moving_without_fuel_drop_fails_with_index() {
        let err = scan(&[s(50, 0, 0), s(40, 10, 5), s(40, 20, 10)], 100, 0).unwrap_err();
        assert_eq!(err, TripError::InconsistentFuelMovement { index: 2 });
    }

    #[test]
    fn zero_threshold_marks_every_stationary_pair() {
        let out = scan(&[s(50, 0, 0), s(50, 0, 0), s(50, 0, 7)], 100, 0).unwrap();
        assert_eq!(out.breaks.len(), 2);
        assert_eq!(out.breaks[0].duration_secs(), 0);
    }
}
