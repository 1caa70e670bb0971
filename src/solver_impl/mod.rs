//! Ornstein-Zernike solver: Picard-Ng fixed point, density ramp,
//! Rogers-Young consistency search and thermodynamic post-processing.

mod consistency;
mod driver;
mod ng;
mod thermo;

pub use consistency::{find_consistent_alpha, ConsistencyOutcome, ALPHA_BRACKET};
pub use driver::{
    IterationState, OzSolver, RampOutcome, SolverContext, MAX_PACKING_FRACTION,
};
pub use ng::NgAccelerator;
pub use thermo::{evaluate as evaluate_thermodynamics, structure_factor, Thermodynamics};

use tracing::warn;

use crate::closure_impl::ClosureKind;
use crate::error::{OzError, OzResult};
use crate::grid::RadialGrid;
use crate::potential_impl::{PairPotential, PotentialKind, SpeciesParams};

/// Full parameter set of one solve, mirroring the legacy entry point.
#[derive(Clone, Debug)]
pub struct SolveRequest {
    pub nodes: usize,
    pub nrho: usize,
    pub r_max: f64,
    pub potential_id: u32,
    pub closure_id: u32,
    pub sigma1: f64,
    pub sigma2: f64,
    pub temperature: f64,
    pub temperature2: f64,
    pub lambda_a: f64,
    pub lambda_r: f64,
    pub volume_fraction: f64,
    /// Diameter scaling applied on top of sigma1; the two are aliases and a
    /// warning is issued when both differ from 1.
    pub diameter_scale: f64,
    pub alpha: f64,
    pub ez: f64,
    pub xnu: f64,
    pub max_iter: usize,
}

impl Default for SolveRequest {
    fn default() -> Self {
        SolveRequest {
            nodes: 4096,
            nrho: 100,
            r_max: 160.0,
            potential_id: 7,
            closure_id: 2,
            sigma1: 1.0,
            sigma2: 1.0,
            temperature: 1.0,
            temperature2: 1.0,
            lambda_a: 1.8,
            lambda_r: 4.0,
            volume_fraction: 0.3,
            diameter_scale: 1.0,
            alpha: 1.0,
            ez: 1e-4,
            xnu: 14.0,
            max_iter: 5000,
        }
    }
}

/// Which series the legacy (x, y) interface returns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputKind {
    StructureFactor,
    DirectCorrelationK,
    InverseStructureFactor,
    RadialDistribution,
}

impl OutputKind {
    /// Legacy flag mapping: 1 = c^(k), 2 = 1/S(k), 3 = g(r), else S(k).
    pub fn from_flag(flag: i32) -> Self {
        match flag {
            1 => OutputKind::DirectCorrelationK,
            2 => OutputKind::InverseStructureFactor,
            3 => OutputKind::RadialDistribution,
            _ => OutputKind::StructureFactor,
        }
    }
}

/// Converged correlation functions on the solver meshes, plus the
/// thermodynamic summary.
pub struct Solution {
    pub r: Vec<f64>,
    pub k: Vec<f64>,
    pub g: Vec<f64>,
    pub c: Vec<f64>,
    pub c_hat: Vec<f64>,
    pub s_k: Vec<f64>,
    pub thermo: Thermodynamics,
    pub closure: ClosureKind,
    /// Outcome of the Rogers-Young consistency search; `None` for closures
    /// that make no consistency claim.
    pub ry_consistent: Option<bool>,
    pub final_iterations: usize,
}

impl Solution {
    fn build(
        ctx: &SolverContext,
        outcome: RampOutcome,
        thermo: Thermodynamics,
        ry_consistent: Option<bool>,
    ) -> Self {
        let state = outcome.state;
        let s_k = structure_factor(ctx.rho_target, &state.c_hat);
        Solution {
            r: ctx.grid.r.clone(),
            k: ctx.grid.k.clone(),
            g: state.h.iter().map(|&h| 1.0 + h).collect(),
            c: state.c.iter().copied().collect(),
            c_hat: state.c_hat.iter().copied().collect(),
            s_k,
            thermo,
            closure: ctx.closure,
            ry_consistent,
            final_iterations: outcome.final_iterations,
        }
    }

    /// The (x, y) pair selected by the legacy output flag.
    pub fn series(&self, kind: OutputKind) -> (Vec<f64>, Vec<f64>) {
        match kind {
            OutputKind::StructureFactor => (self.k.clone(), self.s_k.clone()),
            OutputKind::DirectCorrelationK => (self.k.clone(), self.c_hat.clone()),
            OutputKind::InverseStructureFactor => {
                (self.k.clone(), self.s_k.iter().map(|&s| 1.0 / s).collect())
            }
            OutputKind::RadialDistribution => (self.r.clone(), self.g.clone()),
        }
    }
}

/// Library entry point: solve one parameter point and return the converged
/// structure. Rogers-Young requests route through the consistency search.
pub fn solve_structure(req: &SolveRequest) -> OzResult<Solution> {
    let sigma = effective_diameter(req)?;
    let grid = RadialGrid::new(req.nodes, req.r_max)?;
    let kind = PotentialKind::try_from_id(req.potential_id)?;
    let params = SpeciesParams {
        sigma,
        temperature: req.temperature,
        temperature2: req.temperature2,
        lambda_a: req.lambda_a,
        lambda_r: req.lambda_r,
    };
    let potential = PairPotential::tabulate(kind, &params, &grid)?;
    let closure = ClosureKind::try_from_id(req.closure_id, req.alpha)?;
    let ctx = SolverContext::new(
        grid,
        potential,
        closure,
        req.temperature,
        req.volume_fraction,
        req.nrho,
        req.ez,
        req.xnu,
        req.max_iter,
    )?;

    match closure {
        ClosureKind::RogersYoung { alpha } => {
            let search = find_consistent_alpha(&ctx, alpha)?;
            let ctx_final = ctx.with_alpha(search.alpha);
            Ok(Solution::build(
                &ctx_final,
                search.outcome,
                search.thermo,
                Some(search.consistent),
            ))
        }
        _ => {
            let mut solver = OzSolver::new(&ctx);
            let outcome = solver.solve()?;
            let thermo = evaluate_thermodynamics(&ctx, &outcome.state, outcome.p_compressibility);
            Ok(Solution::build(&ctx, outcome, thermo, None))
        }
    }
}

fn effective_diameter(req: &SolveRequest) -> OzResult<f64> {
    if !req.sigma1.is_finite() || req.sigma1 <= 0.0 {
        return Err(OzError::Config(format!("invalid diameter sigma1 = {}", req.sigma1)));
    }
    if !req.diameter_scale.is_finite() || req.diameter_scale <= 0.0 {
        return Err(OzError::Config(format!(
            "invalid diameter scale d = {}",
            req.diameter_scale
        )));
    }
    if req.sigma1 != 1.0 && req.diameter_scale != 1.0 {
        warn!(
            "both sigma1 = {} and diameter scale d = {} differ from 1; treating them as one \
             effective diameter sigma1 * d",
            req.sigma1, req.diameter_scale
        );
    }
    if req.sigma2 != req.sigma1 {
        warn!(
            "sigma2 = {} ignored: the solver is single-component and uses sigma1 = {}",
            req.sigma2, req.sigma1
        );
    }
    Ok(req.sigma1 * req.diameter_scale)
}
