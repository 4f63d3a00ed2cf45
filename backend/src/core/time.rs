//! Calendar helpers for fractional-day timestamps
//!
//! Simulated time is a count of days since the start of the run. Day 0 is a
//! weekday; days 5 and 6 of each 7-day cycle are the weekend. Arrival rates
//! differ between the two (weekends are busier).

/// Days per week.
pub const DAYS_PER_WEEK: u64 = 7;

/// First day-of-week index that counts as weekend (5 = Saturday, 6 = Sunday).
pub const WEEKEND_START: u64 = 5;

/// Day-of-week index (0..=6) for a non-negative fractional-day timestamp.
///
/// # Example
/// ```
/// use hospital_simulator_core_rs::core::time::day_of_week;
///
/// assert_eq!(day_of_week(0.0), 0);
/// assert_eq!(day_of_week(5.25), 5);
/// assert_eq!(day_of_week(7.9), 0);
/// ```
pub fn day_of_week(now: f64) -> u64 {
    debug_assert!(now >= 0.0, "simulated time is never negative");
    (now.floor() as u64) % DAYS_PER_WEEK
}

/// Whether the timestamp falls on a weekend day.
pub fn is_weekend(now: f64) -> bool {
    day_of_week(now) >= WEEKEND_START
}
