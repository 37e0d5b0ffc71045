//! Fixed league tier tables. Every table is evaluated top-down, first match
//! wins, and upper bounds are inclusive.

/// Points for accumulated penalty time, in seconds.
/// Zero (or negative, from defensive data) penalty time scores 0.
pub fn penalty_points(penalty_secs: f64) -> i32 {
    if penalty_secs <= 0.0 {
        0
    } else if penalty_secs <= 3.0 {
        -1
    } else if penalty_secs <= 6.0 {
        -2
    } else if penalty_secs <= 9.0 {
        -3
    } else {
        -5
    }
}

/// Points for starting grid position. Paired slots front to back; the
/// midfield (11-14) and anything outside 1-20 are neutral.
pub fn grid_points(grid_position: i32) -> i32 {
    match grid_position {
        1..=2 => 5,
        3..=4 => 4,
        5..=6 => 3,
        7..=8 => 2,
        9..=10 => 1,
        15..=16 => -1,
        17..=18 => -2,
        19..=20 => -3,
        _ => 0,
    }
}

/// Points for the finishing gap to the race leader, in milliseconds.
/// Only meaningful for lead-lap finishers; a missing delta scores 0.
pub fn delta_points(delta_ms: Option<u64>) -> i32 {
    match delta_ms {
        Some(d) if d <= 3_000 => 5,
        Some(d) if d <= 5_000 => 4,
        Some(d) if d <= 7_000 => 3,
        Some(d) if d <= 10_000 => 2,
        Some(d) if d <= 15_000 => 1,
        _ => 0,
    }
}

/// Points for overtake count relative to the field maximum.
///
/// The count is normalized to a percentage of `field_max` and tiered. There
/// is deliberately no neutral tier: every driver earns a bonus or a penalty
/// for overtaking performance. With a zero field maximum everyone sits at 0%
/// and takes the bottom tier.
pub fn overtake_points(count: u32, field_max: u32) -> i32 {
    let pct = if field_max > 0 {
        count as f64 / field_max as f64 * 100.0
    } else {
        0.0
    };

    if pct >= 100.0 {
        5
    } else if pct >= 96.0 {
        4
    } else if pct >= 85.0 {
        3
    } else if pct >= 70.0 {
        2
    } else if pct >= 51.0 {
        1
    } else if pct >= 20.0 {
        -1
    } else {
        -2
    }
}
