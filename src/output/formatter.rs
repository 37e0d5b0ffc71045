use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::scoring::DriverResultRecord;

/// A result record paired with the driver's display name for output.
/// The record itself only carries the car number (the stable identity key).
pub struct ScoredDriver<'a> {
    pub name: &'a str,
    pub record: &'a DriverResultRecord,
}

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a scoring component with an explicit sign ("+5", "-2", "0")
pub fn format_points(points: i32) -> String {
    if points == 0 {
        "0".to_string()
    } else {
        format!("{:+}", points)
    }
}

/// Format the final score, trimming the fraction when the multiplier kept it
/// integral ("+10", "-3", "+7.5")
pub fn format_final_score(score: f64) -> String {
    if score == 0.0 {
        "0".to_string()
    } else if score == score.trunc() {
        format!("{:+}", score as i64)
    } else {
        format!("{:+.1}", score)
    }
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a driver or team name to fit a column, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

// Fixed column widths; the driver name column flexes with the terminal.
const LIVERY_WIDTH: usize = 12;
const POINTS_WIDTH: usize = 5;
const TOTAL_WIDTH: usize = 6;

fn name_column_width() -> usize {
    // pos(3) + no(3) + livery + four point columns + total + separators
    let fixed = 3 + 2 + 3 + 2 + LIVERY_WIDTH + 2 + (POINTS_WIDTH + 1) * 4 + TOTAL_WIDTH + 2;
    match get_terminal_width() {
        Some(width) if width > fixed + 8 => (width - fixed).min(24),
        Some(_) => 8,
        None => 24,
    }
}

/// Format result records as a table, one row per driver.
/// Columns: Pos, No, Driver, Livery, Pen, Delta, OT, Grid, Total.
/// The Grid column is informational; it never enters the total.
pub fn format_results_table(drivers: &[ScoredDriver], use_colors: bool) -> String {
    if drivers.is_empty() {
        return "No classified drivers.".to_string();
    }

    let name_width = name_column_width();
    let mut lines = Vec::with_capacity(drivers.len() + 1);

    let header = format!(
        "{:>3}  {:>3}  {:<name_width$}  {:<LIVERY_WIDTH$}  {:>POINTS_WIDTH$} {:>POINTS_WIDTH$} {:>POINTS_WIDTH$} {:>POINTS_WIDTH$} {:>TOTAL_WIDTH$}",
        "Pos", "No", "Driver", "Livery", "Pen", "Delta", "OT", "Grid", "Total",
    );
    if use_colors {
        lines.push(header.dimmed().to_string());
    } else {
        lines.push(header);
    }

    for scored in drivers {
        let r = scored.record;
        let total = format_final_score(r.final_race_score);
        let total_padded = format!("{:>TOTAL_WIDTH$}", total);
        let row = format!(
            "{:>3}  {:>3}  {:<name_width$}  {:<LIVERY_WIDTH$}  {:>POINTS_WIDTH$} {:>POINTS_WIDTH$} {:>POINTS_WIDTH$} {:>POINTS_WIDTH$} ",
            r.position,
            r.driver_number,
            truncate_name(scored.name, name_width),
            truncate_name(&r.livery, LIVERY_WIDTH),
            format_points(r.score_penalties),
            format_points(r.score_delta_leader),
            format_points(r.score_overtakes),
            format_points(r.score_grid_position),
        );

        if use_colors {
            let colored_total = if r.final_race_score > 0.0 {
                total_padded.green().to_string()
            } else if r.final_race_score < 0.0 {
                total_padded.red().to_string()
            } else {
                total_padded
            };
            lines.push(format!("{}{}", row, colored_total));
        } else {
            lines.push(format!("{}{}", row, total_padded));
        }
    }

    lines.join("\n")
}

/// Format a single driver's full component breakdown (for verbose mode)
pub fn format_driver_detail(scored: &ScoredDriver, use_colors: bool) -> String {
    let r = scored.record;
    let heading = format!("{} (#{}, {})", scored.name, r.driver_number, r.livery);
    let heading = if use_colors {
        heading.bold().to_string()
    } else {
        heading
    };

    format!(
        "{}\n  Finish: P{} ({}), started P{}\n  Fastest lap: {}\n  Penalties: {}\n  Delta to leader: {}\n  Overtakes: {}\n  Laps completed: {}\n  Finish status: {}\n  Grid position: {} (not summed)\n  Final score: {}",
        heading,
        r.position,
        r.result_status,
        r.qualification,
        r.fastest_lap,
        format_points(r.score_penalties),
        format_points(r.score_delta_leader),
        format_points(r.score_overtakes),
        format_points(r.score_laps_completed),
        format_points(r.score_finish_status),
        format_points(r.score_grid_position),
        format_final_score(r.final_race_score),
    )
}

/// Format result records as tab-separated values for scripting
/// Columns: no, driver, livery, position, pen, delta, ot, grid, total
/// (no headers, no colors)
pub fn format_tsv(drivers: &[ScoredDriver]) -> String {
    drivers
        .iter()
        .map(|scored| {
            let r = scored.record;
            format!(
                "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                r.driver_number,
                scored.name,
                r.livery,
                r.position,
                r.score_penalties,
                r.score_delta_leader,
                r.score_overtakes,
                r.score_grid_position,
                r.final_race_score,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
