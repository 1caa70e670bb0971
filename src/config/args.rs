//! Command-line argument parsing for structure calculations.

use clap::Parser;

/// Ornstein-Zernike structure solver with optional YAML configuration
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to a YAML configuration file
    #[arg(short, long)]
    pub config_file: Option<String>,

    /// Closure relation: HNC, PY or RY
    #[arg(long)]
    pub closure: Option<String>,

    /// Potential id (1 = inverse power, 2 = WCA, 4 = double Yukawa,
    /// 7 = hard sphere, 13 = Hertzian)
    #[arg(long)]
    pub potential: Option<u32>,

    /// Volume fraction
    #[arg(long)]
    pub volfactor: Option<f64>,

    /// Reduced temperature
    #[arg(long)]
    pub temp: Option<f64>,

    /// Second temperature (repulsive Yukawa amplitude)
    #[arg(long)]
    pub temp2: Option<f64>,

    /// Attractive inverse screening length
    #[arg(long)]
    pub lambda_a: Option<f64>,

    /// Repulsive inverse screening length (also the inverse-power exponent)
    #[arg(long)]
    pub lambda_r: Option<f64>,

    /// Number of radial grid nodes
    #[arg(long)]
    pub nodes: Option<usize>,

    /// Number of wavevector nodes requested by a downstream resampler;
    /// the solver itself always emits its native grid
    #[arg(long)]
    pub knodes: Option<usize>,

    /// Particle diameter sigma
    #[arg(long)]
    pub sigma: Option<f64>,

    /// Diameter scaling factor d (alias of sigma)
    #[arg(long)]
    pub diameter: Option<f64>,

    /// Initial Rogers-Young mixing parameter
    #[arg(long)]
    pub alpha: Option<f64>,

    /// Override grid extent r_max
    #[arg(long)]
    pub rmax: Option<f64>,

    /// Override number of density ramp steps
    #[arg(long)]
    pub nrho: Option<usize>,

    /// Override convergence tolerance on max|d gamma|
    #[arg(long)]
    pub ez: Option<f64>,

    /// Override the early-iteration damping parameter
    #[arg(long)]
    pub xnu: Option<f64>,

    /// Override the per-density iteration cap
    #[arg(long)]
    pub max_iter: Option<usize>,

    /// Directory receiving the tabulated output files
    #[arg(long, default_value = "output")]
    pub output_dir: String,

    /// Log file (default stdout)
    #[arg(short, long)]
    pub output: Option<String>,
}
