//! Thermodynamic-consistency search for the Rogers-Young mixing parameter.
//!
//! RY interpolates between PY (virial pressure too low for hard cores) and
//! HNC (too high), so the pressure mismatch changes sign somewhere inside the
//! bracket and plain bisection on alpha is enough.

use tracing::{debug, info, warn};

use super::driver::{OzSolver, RampOutcome, SolverContext};
use super::thermo::{self, Thermodynamics};
use crate::error::OzResult;

pub const ALPHA_BRACKET: (f64, f64) = (0.1, 5.0);
const BRACKET_RESOLUTION: f64 = 1e-4;
const RELATIVE_TOLERANCE: f64 = 1e-3;
const MAX_EVALUATIONS: usize = 40;

pub struct ConsistencyOutcome {
    pub alpha: f64,
    /// Whether the virial and compressibility pressures were reconciled.
    pub consistent: bool,
    pub outcome: RampOutcome,
    pub thermo: Thermodynamics,
}

struct Evaluation {
    alpha: f64,
    outcome: RampOutcome,
    thermo: Thermodynamics,
    delta: f64,
}

fn evaluate(ctx: &SolverContext, alpha: f64) -> OzResult<Evaluation> {
    let ctx_alpha = ctx.with_alpha(alpha);
    let mut solver = OzSolver::new(&ctx_alpha);
    let outcome = solver.solve()?;
    let thermo = thermo::evaluate(&ctx_alpha, &outcome.state, outcome.p_compressibility);
    let delta = thermo.p_virial - thermo.p_compressibility;
    debug!(
        "alpha = {:.5}: beta P_v = {:.6}, beta P_c = {:.6}, delta = {:+.3e}",
        alpha, thermo.p_virial, thermo.p_compressibility, delta
    );
    Ok(Evaluation {
        alpha,
        outcome,
        thermo,
        delta,
    })
}

fn within_tolerance(eval: &Evaluation) -> bool {
    eval.delta.abs() <= RELATIVE_TOLERANCE * eval.thermo.p_virial.abs().max(1.0)
}

fn best_of(a: Evaluation, b: Evaluation) -> Evaluation {
    if a.delta.abs() <= b.delta.abs() {
        a
    } else {
        b
    }
}

/// Bisect the pressure mismatch over `ALPHA_BRACKET`, seeding the search with
/// `alpha_init` when it falls inside the bracket.
pub fn find_consistent_alpha(ctx: &SolverContext, alpha_init: f64) -> OzResult<ConsistencyOutcome> {
    let (mut lo, mut hi) = ALPHA_BRACKET;
    let mut evaluations = 0usize;

    let seed = alpha_init.clamp(lo, hi);
    let first = evaluate(ctx, seed)?;
    evaluations += 1;
    if within_tolerance(&first) {
        info!("Rogers-Young consistency reached at seed alpha = {:.5}", seed);
        return Ok(done(first, true));
    }

    let mut lo_eval = evaluate(ctx, lo)?;
    let mut hi_eval = evaluate(ctx, hi)?;
    evaluations += 2;

    if lo_eval.delta * hi_eval.delta > 0.0 {
        warn!(
            "pressure mismatch does not change sign over alpha in [{}, {}]; \
             returning the best-effort endpoint",
            lo, hi
        );
        let best = best_of(best_of(lo_eval, hi_eval), first);
        return Ok(done(best, false));
    }

    // the seed evaluation refines the bracket for free
    if seed > lo && seed < hi {
        if first.delta * lo_eval.delta > 0.0 {
            lo = first.alpha;
            lo_eval = first;
        } else {
            hi = first.alpha;
            hi_eval = first;
        }
    }

    while hi - lo > BRACKET_RESOLUTION && evaluations < MAX_EVALUATIONS {
        let mid = 0.5 * (lo + hi);
        let mid_eval = evaluate(ctx, mid)?;
        evaluations += 1;
        if within_tolerance(&mid_eval) {
            info!(
                "Rogers-Young consistency reached at alpha = {:.5} after {} solves",
                mid, evaluations
            );
            return Ok(done(mid_eval, true));
        }
        if mid_eval.delta * lo_eval.delta > 0.0 {
            lo = mid;
            lo_eval = mid_eval;
        } else {
            hi = mid;
            hi_eval = mid_eval;
        }
    }

    let best = best_of(lo_eval, hi_eval);
    let consistent = within_tolerance(&best);
    if !consistent {
        warn!(
            "Rogers-Young bisection exhausted at alpha = {:.5} with delta = {:+.3e}",
            best.alpha, best.delta
        );
    }
    Ok(done(best, consistent))
}

fn done(eval: Evaluation, consistent: bool) -> ConsistencyOutcome {
    ConsistencyOutcome {
        alpha: eval.alpha,
        consistent,
        outcome: eval.outcome,
        thermo: eval.thermo,
    }
}
