//! Gear-dependent boost ceiling

use turbofix_profile::BoostByGear;

/// Returns the boost ceiling for `gear`.
///
/// The ceiling is `max_boost` when gear limiting is disabled or the table is
/// empty. Otherwise:
///
/// - reverse and neutral (`gear <= 0`) use gear 1,
/// - gears above the highest entry use the highest entry,
/// - gears missing from a sparse table use the highest entry.
///
/// # Example
///
/// ```
/// use turbofix_profile::BoostByGear;
/// use turbofix_sim::gear_ceiling;
///
/// let table = BoostByGear::from_pairs([(1, 0.3), (2, 0.6), (3, 1.0)]);
/// assert!((gear_ceiling(&table, 1.0, 5) - 1.0).abs() < 1e-6);
/// assert!((gear_ceiling(&table, 1.0, 0) - 0.3).abs() < 1e-6);
/// ```
pub fn gear_ceiling(table: &BoostByGear, max_boost: f32, gear: i32) -> f32 {
    if !table.is_active() {
        return max_boost;
    }
    let Some((top_gear, top_limit)) = table.top_gear() else {
        return max_boost;
    };

    let gear = if gear <= 0 { 1 } else { gear };
    let key = u8::try_from(gear).map_or(top_gear, |g| g.min(top_gear));

    table.gears.get(&key).copied().unwrap_or(top_limit)
}
