//! Pair potential catalogue and tabulation.
//!
//! Each entry maps a numeric id onto U(r) plus the companion array
//! Up(r) = -r dU/dr used by the virial integrand. Hard cores are represented
//! by a per-grid-point mask instead of storing an infinity: inside the core
//! the closure pins g(r) = 0, so the tabulated U never enters a transform.

#[cfg(test)]
mod tests;

use rayon::prelude::*;

use crate::error::{OzError, OzResult};
use crate::grid::RadialGrid;

/// Interaction catalogue. Ids follow the legacy numbering of the input files.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PotentialKind {
    /// id 1: U = eps (sigma/r)^lambda with lambda = lambda_r.
    InversePower,
    /// id 2: shifted Lennard-Jones repulsion, cut at 2^(1/6) sigma.
    Wca,
    /// id 4: attractive plus repulsive Yukawa tail.
    DoubleYukawa,
    /// id 7: impenetrable core of diameter sigma.
    HardSphere,
    /// id 13: bounded overlap penalty eps (1 - r/sigma)^(5/2).
    Hertzian,
}

impl PotentialKind {
    pub fn try_from_id(id: u32) -> OzResult<Self> {
        match id {
            1 => Ok(PotentialKind::InversePower),
            2 => Ok(PotentialKind::Wca),
            4 => Ok(PotentialKind::DoubleYukawa),
            7 => Ok(PotentialKind::HardSphere),
            13 => Ok(PotentialKind::Hertzian),
            other => Err(OzError::Config(format!("unknown potential id {}", other))),
        }
    }

    pub fn id(&self) -> u32 {
        match self {
            PotentialKind::InversePower => 1,
            PotentialKind::Wca => 2,
            PotentialKind::DoubleYukawa => 4,
            PotentialKind::HardSphere => 7,
            PotentialKind::Hertzian => 13,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PotentialKind::InversePower => "inverse power law",
            PotentialKind::Wca => "WCA",
            PotentialKind::DoubleYukawa => "double Yukawa",
            PotentialKind::HardSphere => "hard sphere",
            PotentialKind::Hertzian => "Hertzian",
        }
    }
}

/// Species-level interaction parameters in reduced units.
#[derive(Clone, Debug)]
pub struct SpeciesParams {
    pub sigma: f64,
    pub temperature: f64,
    pub temperature2: f64,
    pub lambda_a: f64,
    pub lambda_r: f64,
}

impl SpeciesParams {
    fn validate(&self, kind: PotentialKind) -> OzResult<()> {
        let check = |name: &str, value: f64, positive: bool| -> OzResult<()> {
            if !value.is_finite() || (positive && value <= 0.0) {
                return Err(OzError::Config(format!(
                    "invalid parameter {} = {} for {} potential",
                    name,
                    value,
                    kind.name()
                )));
            }
            Ok(())
        };
        check("sigma", self.sigma, true)?;
        check("temperature", self.temperature, true)?;
        match kind {
            PotentialKind::InversePower => check("lambda_r", self.lambda_r, true)?,
            PotentialKind::DoubleYukawa => {
                check("temperature2", self.temperature2, true)?;
                check("lambda_a", self.lambda_a, true)?;
                check("lambda_r", self.lambda_r, true)?;
            }
            _ => {}
        }
        Ok(())
    }
}

/// A potential tabulated on one radial mesh.
#[derive(Clone, Debug)]
pub struct PairPotential {
    pub kind: PotentialKind,
    pub sigma: f64,
    /// U(r_j); zero inside a hard core (see `core`).
    pub u: Vec<f64>,
    /// Up(r_j) = -r dU/dr. The hard-sphere contact delta is not discretized
    /// here; the virial integrator adds it analytically.
    pub up: Vec<f64>,
    /// Grid points inside an impenetrable core.
    pub core: Vec<bool>,
    pub has_core: bool,
}

impl PairPotential {
    pub fn tabulate(
        kind: PotentialKind,
        params: &SpeciesParams,
        grid: &RadialGrid,
    ) -> OzResult<Self> {
        params.validate(kind)?;
        let points: Vec<(f64, f64, bool)> = grid
            .r
            .par_iter()
            .map(|&r| eval_point(kind, params, r))
            .collect();
        let mut u = Vec::with_capacity(grid.n);
        let mut up = Vec::with_capacity(grid.n);
        let mut core = Vec::with_capacity(grid.n);
        for (ui, upi, ci) in points {
            if !ui.is_finite() || !upi.is_finite() {
                return Err(OzError::Config(format!(
                    "{} potential produced a non-finite value",
                    kind.name()
                )));
            }
            u.push(ui);
            up.push(upi);
            core.push(ci);
        }
        let has_core = core.iter().any(|&c| c);
        Ok(PairPotential {
            kind,
            sigma: params.sigma,
            u,
            up,
            core,
            has_core,
        })
    }
}

/// (U, -r dU/dr, inside-core) at a single radius.
fn eval_point(kind: PotentialKind, p: &SpeciesParams, r: f64) -> (f64, f64, bool) {
    let sigma = p.sigma;
    match kind {
        PotentialKind::InversePower => {
            let lambda = p.lambda_r;
            let u = (sigma / r).powf(lambda);
            (u, lambda * u, false)
        }
        PotentialKind::Wca => {
            let r_cut = 2f64.powf(1.0 / 6.0) * sigma;
            if r < r_cut {
                let sr6 = (sigma / r).powi(6);
                let u = 4.0 * (sr6 * sr6 - sr6) + 1.0;
                let up = 4.0 * (12.0 * sr6 * sr6 - 6.0 * sr6);
                (u, up, false)
            } else {
                (0.0, 0.0, false)
            }
        }
        PotentialKind::DoubleYukawa => {
            // Each tail carries its own temperature: beta U keeps 1/T on the
            // attractive term and 1/T2 on the repulsive one.
            let eps_r = p.temperature / p.temperature2;
            let attr = sigma * (-p.lambda_a * (r - sigma)).exp() / r;
            let rep = eps_r * sigma * (-p.lambda_r * (r - sigma)).exp() / r;
            let u = -attr + rep;
            let up = -attr * (p.lambda_a * r + 1.0) + rep * (p.lambda_r * r + 1.0);
            (u, up, false)
        }
        PotentialKind::HardSphere => (0.0, 0.0, r < sigma),
        PotentialKind::Hertzian => {
            if r < sigma {
                let x = 1.0 - r / sigma;
                let u = x.powf(2.5);
                let up = 2.5 * (r / sigma) * x.powf(1.5);
                (u, up, false)
            } else {
                (0.0, 0.0, false)
            }
        }
    }
}
