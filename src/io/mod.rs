//! Input/Output operations: logging setup and tabulated series files.

mod output;

pub use output::{series_path, setup_output, write_series};
