//! Fuel arithmetic shared by the scanner and the final aggregation.

/// Fuel in liters for a fill percentage of a tank.
#[inline]
pub fn fill_level_liters(tank_size_l: i32, fuel_percent: i32) -> f64 {
    f64::from(tank_size_l) * f64::from(fuel_percent) / 100.0
}

/// Liters per 100 distance units burned over one moving segment.
#[inline]
pub fn segment_consumption(reference_l: f64, current_l: f64, distance: i64) -> f64 {
    (reference_l - current_l) / distance as f64 * 100.0
}

/// Unweighted arithmetic mean; 0 for an empty slice.
///
/// Segments are not weighted by distance: a short segment counts as much
/// as a long one.
pub fn average(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().sum::<f64>() / samples.len() as f64
}
