//! Configuration management for structure calculations.
//!
//! This module handles the YAML configuration structure, defaults, and the
//! layering of command-line overrides on top of it.

mod args;

pub use args::Args;

use serde::{Deserialize, Serialize};

/// Main configuration structure for one solve.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub system: SystemParams,
    #[serde(default)]
    pub solver_params: SolverParams,
}

/// Physical description of the fluid.
#[derive(Debug, Deserialize, Serialize)]
pub struct SystemParams {
    pub potential: Option<u32>,
    pub closure: Option<String>,
    pub volume_fraction: Option<f64>,
    pub temperature: Option<f64>,
    pub temperature2: Option<f64>,
    pub lambda_a: Option<f64>,
    pub lambda_r: Option<f64>,
    pub sigma: Option<f64>,
    pub diameter_scale: Option<f64>,
    pub alpha: Option<f64>,
}

impl Default for SystemParams {
    fn default() -> Self {
        SystemParams {
            potential: Some(7),
            closure: Some("HNC".to_string()),
            volume_fraction: Some(0.3),
            temperature: Some(1.0),
            temperature2: Some(1.0),
            lambda_a: Some(1.8),
            lambda_r: Some(4.0),
            sigma: Some(1.0),
            diameter_scale: Some(1.0),
            alpha: Some(1.0),
        }
    }
}

/// Numerical parameters of the iteration.
#[derive(Debug, Deserialize, Serialize)]
pub struct SolverParams {
    pub nodes: Option<usize>,
    pub nrho: Option<usize>,
    pub rmax: Option<f64>,
    pub ez: Option<f64>,
    pub xnu: Option<f64>,
    pub max_iter: Option<usize>,
}

impl Default for SolverParams {
    fn default() -> Self {
        SolverParams {
            nodes: Some(4096),
            nrho: Some(100),
            rmax: Some(160.0),
            ez: Some(1e-4),
            xnu: Some(14.0),
            max_iter: Some(5000),
        }
    }
}

impl SystemParams {
    /// Apply default values to any missing parameters.
    pub fn with_defaults(mut self) -> Self {
        let defaults = Self::default();
        self.potential = self.potential.or(defaults.potential);
        self.closure = self.closure.or(defaults.closure);
        self.volume_fraction = self.volume_fraction.or(defaults.volume_fraction);
        self.temperature = self.temperature.or(defaults.temperature);
        self.temperature2 = self.temperature2.or(defaults.temperature2);
        self.lambda_a = self.lambda_a.or(defaults.lambda_a);
        self.lambda_r = self.lambda_r.or(defaults.lambda_r);
        self.sigma = self.sigma.or(defaults.sigma);
        self.diameter_scale = self.diameter_scale.or(defaults.diameter_scale);
        self.alpha = self.alpha.or(defaults.alpha);
        self
    }
}

impl SolverParams {
    /// Apply default values to any missing parameters.
    pub fn with_defaults(mut self) -> Self {
        let defaults = Self::default();
        self.nodes = self.nodes.or(defaults.nodes);
        self.nrho = self.nrho.or(defaults.nrho);
        self.rmax = self.rmax.or(defaults.rmax);
        self.ez = self.ez.or(defaults.ez);
        self.xnu = self.xnu.or(defaults.xnu);
        self.max_iter = self.max_iter.or(defaults.max_iter);
        self
    }
}

impl Config {
    /// Apply defaults to all configuration sections.
    pub fn with_defaults(mut self) -> Self {
        self.system = self.system.with_defaults();
        self.solver_params = self.solver_params.with_defaults();
        self
    }
}
