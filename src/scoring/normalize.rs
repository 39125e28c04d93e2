/// Highest score the scale can express.
pub const MAX_SCORE: f64 = 99.95;

/// Convert a raw aggregate into a score on the 0-99.95 scale, rounded to 2 places.
pub fn normalize(raw_total: f64, denominator: f64) -> f64 {
    if denominator <= 0.0 || !raw_total.is_finite() {
        return 0.0;
    }
    let scaled = (raw_total / denominator * MAX_SCORE).clamp(0.0, MAX_SCORE);
    round_to_hundredths(scaled)
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
