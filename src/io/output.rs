//! Output formatting and logging utilities.

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime as StdSystemTime;
use tracing::info;
use tracing_subscriber::{
    fmt::format::Writer, fmt::layer, fmt::time::FormatTime, layer::SubscriberExt,
    util::SubscriberInitExt, Registry,
};

/// Custom time formatter that shows only seconds
struct SecondPrecisionTimer;

impl FormatTime for SecondPrecisionTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        let now = StdSystemTime::now();
        let duration = now
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default();

        let total_seconds = duration.as_secs();
        let hours = (total_seconds / 3600) % 24;
        let minutes = (total_seconds / 60) % 60;
        let seconds = total_seconds % 60;

        write!(w, "{:02}:{:02}:{:02}", hours, minutes, seconds)
    }
}

/// Setup output logging to file or stdout
pub fn setup_output(output_path: Option<&String>) {
    match output_path {
        Some(path) => {
            if let Ok(log) = File::create(path) {
                let file_layer = layer()
                    .with_writer(log)
                    .with_timer(SecondPrecisionTimer)
                    .with_ansi(false);
                Registry::default().with(file_layer).init();
                info!("Output will be written to: {}", path);
            } else {
                eprintln!("Could not create output file: {}", path);
            }
        }
        None => {
            let stdout_layer = layer()
                .with_writer(std::io::stdout)
                .with_timer(SecondPrecisionTimer)
                .with_ansi(true);
            Registry::default().with(stdout_layer).init();
            info!("Output will be printed to stdout");
        }
    }
}

/// Conventional file name for one tabulated series, e.g. `RY_SdeK.dat`.
pub fn series_path(dir: &Path, closure_label: &str, series_tag: &str) -> PathBuf {
    dir.join(format!("{}_{}.dat", closure_label, series_tag))
}

/// Write two parallel columns as tab-separated text, full double precision.
pub fn write_series(path: &Path, x: &[f64], y: &[f64]) -> io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    for (xi, yi) in x.iter().zip(y.iter()) {
        writeln!(writer, "{:.17e}\t{:.17e}", xi, yi)?;
    }
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_round_trips_at_full_precision() {
        let dir = std::env::temp_dir();
        let path = dir.join("ozfluid_series_test.dat");
        let x = vec![0.5, 1.5, 2.5];
        let y = vec![1.0 / 3.0, std::f64::consts::PI, -7.25e-11];
        write_series(&path, &x, &y).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        for (line, (&xi, &yi)) in contents.lines().zip(x.iter().zip(&y)) {
            let mut cols = line.split('\t');
            let px: f64 = cols.next().unwrap().parse().unwrap();
            let py: f64 = cols.next().unwrap().parse().unwrap();
            assert_eq!(px, xi);
            assert_eq!(py, yi);
        }
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn series_path_uses_closure_prefix() {
        let p = series_path(Path::new("out"), "HNC", "SdeK");
        assert_eq!(p, Path::new("out").join("HNC_SdeK.dat"));
    }
}
