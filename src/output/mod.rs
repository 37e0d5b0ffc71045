pub mod formatter;

pub use formatter::{
    format_driver_detail, format_final_score, format_points, format_results_table, format_tsv,
    should_use_colors, ScoredDriver,
};
