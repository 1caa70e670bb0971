//! Picard-Ng driver for the Ornstein-Zernike fixed point, with the density
//! ramp used to reach the target volume fraction by continuation.

use nalgebra::DVector;
use std::f64::consts::PI;
use tracing::{debug, info};

use super::ng::NgAccelerator;
use crate::closure_impl::{self, ClosureKind};
use crate::error::{OzError, OzResult};
use crate::grid::{RadialGrid, SineTransform};
use crate::potential_impl::PairPotential;

/// Densest packing of equal spheres; volume fractions at or above this are
/// rejected outright.
pub const MAX_PACKING_FRACTION: f64 = 0.7405;

const MAX_STEP_HALVINGS: usize = 3;

/// Immutable inputs of one solve. Everything the iteration needs travels in
/// here; there is no process-wide state.
#[derive(Clone, Debug)]
pub struct SolverContext {
    pub grid: RadialGrid,
    pub potential: PairPotential,
    pub closure: ClosureKind,
    pub beta: f64,
    pub rho_target: f64,
    pub nrho: usize,
    pub ez: f64,
    pub xnu: f64,
    pub max_iter: usize,
}

impl SolverContext {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        grid: RadialGrid,
        potential: PairPotential,
        closure: ClosureKind,
        temperature: f64,
        volume_fraction: f64,
        nrho: usize,
        ez: f64,
        xnu: f64,
        max_iter: usize,
    ) -> OzResult<Self> {
        if !temperature.is_finite() || temperature <= 0.0 {
            return Err(OzError::Config(format!(
                "temperature must be positive, got {}",
                temperature
            )));
        }
        if !volume_fraction.is_finite()
            || volume_fraction <= 0.0
            || volume_fraction >= MAX_PACKING_FRACTION
        {
            return Err(OzError::Config(format!(
                "volume fraction must lie in (0, {}), got {}",
                MAX_PACKING_FRACTION, volume_fraction
            )));
        }
        if nrho == 0 {
            return Err(OzError::Config("density ramp needs at least one step".into()));
        }
        if !ez.is_finite() || ez <= 0.0 {
            return Err(OzError::Config(format!("invalid tolerance {}", ez)));
        }
        if !xnu.is_finite() || xnu < 1.0 {
            return Err(OzError::Config(format!(
                "damping parameter xnu must be >= 1, got {}",
                xnu
            )));
        }
        let sigma = potential.sigma;
        let rho_target = 6.0 * volume_fraction / (PI * sigma * sigma * sigma);
        Ok(SolverContext {
            grid,
            potential,
            closure,
            beta: 1.0 / temperature,
            rho_target,
            nrho,
            ez,
            xnu,
            max_iter,
        })
    }

    /// Same context with a different Rogers-Young mixing parameter; used by
    /// the thermodynamic-consistency search.
    pub fn with_alpha(&self, alpha: f64) -> SolverContext {
        let mut ctx = self.clone();
        ctx.closure = ClosureKind::RogersYoung { alpha };
        ctx
    }
}

/// Mutable correlation state owned by one solve. The invariant
/// gamma = h - c holds at every accepted iterate because h is only ever
/// assigned as gamma + c.
pub struct IterationState {
    pub gamma: DVector<f64>,
    pub c: DVector<f64>,
    pub h: DVector<f64>,
    pub c_hat: DVector<f64>,
    pub gamma_hat: DVector<f64>,
}

impl IterationState {
    pub fn zeros(n: usize) -> Self {
        IterationState {
            gamma: DVector::zeros(n),
            c: DVector::zeros(n),
            h: DVector::zeros(n),
            c_hat: DVector::zeros(n),
            gamma_hat: DVector::zeros(n),
        }
    }
}

/// Converged output of the density ramp.
pub struct RampOutcome {
    pub state: IterationState,
    /// beta P along the compressibility route, integrated over the ramp.
    pub p_compressibility: f64,
    /// Iterations spent on the final density step.
    pub final_iterations: usize,
}

/// Trapezoidal accumulator for beta P_c = Int_0^rho (1 - rho' c^(0)) drho',
/// fed with every converged density along the ramp.
struct CompressibilityIntegral<'a> {
    grid: &'a RadialGrid,
    rho_last: f64,
    mu_last: f64,
    value: f64,
}

impl<'a> CompressibilityIntegral<'a> {
    fn new(grid: &'a RadialGrid) -> Self {
        // ideal gas limit: d(beta P)/drho = 1 at rho = 0
        CompressibilityIntegral {
            grid,
            rho_last: 0.0,
            mu_last: 1.0,
            value: 0.0,
        }
    }

    fn record(&mut self, rho: f64, c: &DVector<f64>) {
        let integral: f64 = self
            .grid
            .r
            .iter()
            .zip(c.iter())
            .map(|(&r, &cj)| r * r * cj)
            .sum::<f64>()
            * 4.0
            * PI
            * self.grid.dr;
        let mu = 1.0 - rho * integral;
        self.value += 0.5 * (self.mu_last + mu) * (rho - self.rho_last);
        self.rho_last = rho;
        self.mu_last = mu;
    }
}

pub struct OzSolver<'a> {
    ctx: &'a SolverContext,
    transform: SineTransform,
    ng: NgAccelerator,
}

impl<'a> OzSolver<'a> {
    pub fn new(ctx: &'a SolverContext) -> Self {
        OzSolver {
            transform: SineTransform::new(&ctx.grid),
            ng: NgAccelerator::new(&ctx.grid, ctx.xnu),
            ctx,
        }
    }

    /// Run the density ramp from near zero up to the target density,
    /// reusing each converged gamma as the next initial guess.
    pub fn solve(&mut self) -> OzResult<RampOutcome> {
        let ctx = self.ctx;
        let mut state = IterationState::zeros(ctx.grid.n);
        let mut pressure = CompressibilityIntegral::new(&ctx.grid);
        let d_rho = ctx.rho_target / ctx.nrho as f64;
        let mut final_iterations = 0;

        info!(
            "solving {} fluid with {} closure up to rho = {:.6} in {} density steps",
            ctx.potential.kind.name(),
            ctx.closure.label(),
            ctx.rho_target,
            ctx.nrho
        );

        for s in 1..=ctx.nrho {
            let rho = s as f64 * d_rho;
            final_iterations = self.advance_to(rho, &mut state, &mut pressure)?;
            debug!(
                "density step {}/{} (rho = {:.6}) converged in {} iterations",
                s, ctx.nrho, rho, final_iterations
            );
        }

        info!(
            "converged at rho = {:.6}; final step took {} iterations",
            ctx.rho_target, final_iterations
        );
        Ok(RampOutcome {
            state,
            p_compressibility: pressure.value,
            final_iterations,
        })
    }

    /// Converge at `target`, retrying through up to three halved intermediate
    /// densities when a step is rejected or fails to converge.
    fn advance_to(
        &mut self,
        target: f64,
        state: &mut IterationState,
        pressure: &mut CompressibilityIntegral,
    ) -> OzResult<usize> {
        let mut halvings = 0;
        let mut next = target;
        loop {
            let saved = state.gamma.clone();
            match self.solve_at_density(next, state) {
                Ok(iterations) => {
                    pressure.record(next, &state.c);
                    if next == target {
                        return Ok(iterations);
                    }
                    next = target;
                }
                Err(err) => {
                    if halvings >= MAX_STEP_HALVINGS {
                        return Err(err);
                    }
                    halvings += 1;
                    state.gamma.copy_from(&saved);
                    next = 0.5 * (pressure.rho_last + next);
                    debug!(
                        "density step rejected ({}); retrying through rho = {:.6}",
                        err, next
                    );
                }
            }
        }
    }

    /// Picard-Ng inner loop at one fixed density. On success the state holds
    /// the accepted gamma with c, c^ and h recomputed from it.
    pub fn solve_at_density(&mut self, rho: f64, state: &mut IterationState) -> OzResult<usize> {
        let ctx = self.ctx;
        let n = ctx.grid.n;
        self.ng.reset();
        let mut residual = f64::INFINITY;

        for iteration in 1..=ctx.max_iter {
            closure_impl::apply(
                &ctx.closure,
                &ctx.grid,
                &ctx.potential,
                ctx.beta,
                state.gamma.as_slice(),
                state.c.as_mut_slice(),
            );
            self.transform
                .forward(state.c.as_slice(), state.c_hat.as_mut_slice());

            for i in 0..n {
                let c_hat = state.c_hat[i];
                let denom = 1.0 - rho * c_hat;
                if denom <= 0.0 {
                    return Err(OzError::SpinodalCrossed {
                        density: rho,
                        k: ctx.grid.k[i],
                    });
                }
                state.gamma_hat[i] = rho * c_hat * c_hat / denom;
            }

            // gamma_out lands in the h buffer until accepted
            self.transform
                .inverse(state.gamma_hat.as_slice(), state.h.as_mut_slice());

            residual = 0.0;
            for j in 0..n {
                residual = residual.max((state.h[j] - state.gamma[j]).abs());
            }

            if residual < ctx.ez {
                state.gamma.copy_from(&state.h);
                self.refresh(state);
                return Ok(iteration);
            }

            let d = &state.h - &state.gamma;
            let gamma_in = std::mem::replace(&mut state.gamma, DVector::zeros(0));
            self.ng.push(gamma_in, d);
            state.gamma = self.ng.next_iterate();
        }

        Err(OzError::NotConverged {
            density: rho,
            iterations: ctx.max_iter,
            residual,
        })
    }

    /// Recompute c, c^ and h from the accepted gamma so the state is
    /// internally consistent.
    fn refresh(&mut self, state: &mut IterationState) {
        let ctx = self.ctx;
        closure_impl::apply(
            &ctx.closure,
            &ctx.grid,
            &ctx.potential,
            ctx.beta,
            state.gamma.as_slice(),
            state.c.as_mut_slice(),
        );
        self.transform
            .forward(state.c.as_slice(), state.c_hat.as_mut_slice());
        for j in 0..ctx.grid.n {
            state.h[j] = state.gamma[j] + state.c[j];
        }
    }
}
