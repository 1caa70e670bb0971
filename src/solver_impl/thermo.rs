//! Thermodynamic post-processing of a converged correlation state.

use nalgebra::DVector;
use std::f64::consts::PI;

use super::driver::{IterationState, SolverContext};
use crate::closure_impl;

/// Pressures and related integrals, all in units of kT (beta P, beta u).
#[derive(Clone, Debug)]
pub struct Thermodynamics {
    /// beta P along the virial route.
    pub p_virial: f64,
    /// beta P along the compressibility route, accumulated over the ramp.
    pub p_compressibility: f64,
    /// Excess internal energy per particle, beta u_ex.
    pub excess_energy: f64,
    /// Long-wavelength limit of the structure factor, S(k -> 0); equal to
    /// rho kT chi_T.
    pub s_zero: f64,
    /// Pair distribution at contact, g(sigma+), for hard-core potentials.
    pub contact: Option<f64>,
}

pub fn evaluate(ctx: &SolverContext, state: &IterationState, p_compressibility: f64) -> Thermodynamics {
    let grid = &ctx.grid;
    let pot = &ctx.potential;
    let rho = ctx.rho_target;
    let beta = ctx.beta;

    let mut virial_integral = 0.0;
    let mut energy_integral = 0.0;
    let mut c_integral = 0.0;
    for j in 0..grid.n {
        let r2 = grid.r[j] * grid.r[j];
        if !pot.core[j] {
            // the closure form of g underflows to an exact zero where
            // beta U is huge, while 1 + h leaves rounding noise that the
            // steep-core factors u and up would amplify
            let g = closure_impl::pair_distribution(
                &ctx.closure,
                grid.r[j],
                beta * pot.u[j],
                state.gamma[j],
            );
            virial_integral += r2 * pot.up[j] * g;
            energy_integral += r2 * pot.u[j] * g;
        }
        c_integral += r2 * state.c[j];
    }
    virial_integral *= grid.dr;
    energy_integral *= grid.dr;
    c_integral *= 4.0 * PI * grid.dr;

    let mut p_virial = rho * (1.0 + 2.0 * PI * rho * beta / 3.0 * virial_integral);

    let contact = if pot.has_core {
        let sigma = pot.sigma;
        let gamma_sigma = interpolate(grid.dr, &grid.r, &state.gamma, sigma);
        let g_contact = closure_impl::contact_value(&ctx.closure, sigma, gamma_sigma);
        p_virial += 2.0 * PI / 3.0 * rho * rho * sigma.powi(3) * g_contact;
        Some(g_contact)
    } else {
        None
    };

    Thermodynamics {
        p_virial,
        p_compressibility,
        excess_energy: 2.0 * PI * rho * beta * energy_integral,
        s_zero: 1.0 / (1.0 - rho * c_integral),
        contact,
    }
}

/// S(k_i) = 1 / (1 - rho c^(k_i)); the driver has already rejected any state
/// where the denominator is non-positive.
pub fn structure_factor(rho: f64, c_hat: &DVector<f64>) -> Vec<f64> {
    c_hat.iter().map(|&ck| 1.0 / (1.0 - rho * ck)).collect()
}

/// Linear interpolation of a mesh function at an off-mesh radius.
fn interpolate(dr: f64, r: &[f64], values: &DVector<f64>, at: f64) -> f64 {
    match r.iter().position(|&rj| rj >= at) {
        None => values[r.len() - 1],
        Some(0) => values[0],
        Some(j) => {
            let t = (at - r[j - 1]) / dr;
            values[j - 1] * (1.0 - t) + values[j] * t
        }
    }
}
