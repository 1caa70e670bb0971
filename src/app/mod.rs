mod report;
mod runner;

pub use runner::{resolve_request, run};

use self::report::report_summary;
use crate::config::{Args, Config};
use crate::error::{OzError, OzResult};
use crate::io::{series_path, setup_output, write_series};
use crate::solver_impl::Solution;
use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use std::fs;
use std::path::Path;
use tracing::info;

pub struct Application {
    args: Args,
    config: Config,
}

impl Application {
    pub fn from_cli() -> Result<Self> {
        let args = Args::parse();
        let config = load_config(&args)?;
        Ok(Self { args, config })
    }

    pub fn run(self) -> OzResult<()> {
        setup_output(self.args.output.as_ref());

        let request = resolve_request(&self.args, &self.config)?;
        print_job_details(&request);

        let solution = run(&request)?;
        report_summary(&solution);
        write_solution_files(Path::new(&self.args.output_dir), &solution)?;
        Ok(())
    }
}

fn load_config(args: &Args) -> Result<Config> {
    let config = match &args.config_file {
        Some(path) => {
            let contents = fs::read_to_string(path)
                .wrap_err_with(|| format!("Unable to read configuration file: {}", path))?;
            serde_yml::from_str::<Config>(&contents)
                .wrap_err("Failed to parse configuration file")?
        }
        None => Config::default(),
    };
    Ok(config.with_defaults())
}

fn print_job_details(request: &crate::solver_impl::SolveRequest) {
    info!("Job parameters:");
    info!("  potential id:     {}", request.potential_id);
    info!("  closure id:       {}", request.closure_id);
    info!("  volume fraction:  {}", request.volume_fraction);
    info!("  temperature:      {}", request.temperature);
    info!("  nodes:            {}", request.nodes);
    info!("  r_max:            {}", request.r_max);
    info!("  density steps:    {}", request.nrho);
    info!("  tolerance:        {:e}", request.ez);
}

fn write_solution_files(dir: &Path, solution: &Solution) -> Result<(), OzError> {
    fs::create_dir_all(dir)?;
    let label = solution.closure.label();

    write_series(&series_path(dir, label, "SdeK"), &solution.k, &solution.s_k)?;
    write_series(&series_path(dir, label, "GdeR"), &solution.r, &solution.g)?;
    write_series(&series_path(dir, label, "CdeK"), &solution.k, &solution.c_hat)?;

    info!(
        "Wrote {label}_SdeK.dat, {label}_GdeR.dat and {label}_CdeK.dat to {}",
        dir.display()
    );
    Ok(())
}
