//! Half-up rounding as the game displays money and production.

/// Round to cents with ties going up.
///
/// Example:
/// assert_eq!(round_half_up(0.125), 0.13);
pub fn round_half_up(x: f64) -> f64 {
    round_half_up_to(x, 2)
}

/// Round to `places` decimal digits with ties going up.
///
/// The value is scaled by `10^places`; a fractional part below one half
/// floors, anything else ceils. Ties therefore move toward positive
/// infinity, so `-0.125` becomes `-0.12`. Values arrive already in binary
/// floating point, so `1.005` (stored just below the tie) rounds to `1.0`
/// exactly as the game's own rounding does.
pub fn round_half_up_to(x: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    let scaled = x * factor;
    let floor = scaled.floor();
    let rounded = if scaled - floor < 0.5 {
        floor
    } else {
        scaled.ceil()
    };
    rounded / factor
}
