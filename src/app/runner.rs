//! Resolution of the effective solve request from CLI arguments and the
//! configuration file, and execution of the solver.

use tracing::{info, warn};

use crate::closure_impl::ClosureKind;
use crate::config::{Args, Config};
use crate::error::OzResult;
use crate::solver_impl::{solve_structure, Solution, SolveRequest};

/// Layer CLI overrides on top of the configuration file (CLI wins), then fill
/// the remaining fields from the defaults.
pub fn resolve_request(args: &Args, config: &Config) -> OzResult<SolveRequest> {
    let system = &config.system;
    let solver = &config.solver_params;
    let defaults = SolveRequest::default();

    let closure_name = args
        .closure
        .clone()
        .or_else(|| system.closure.clone())
        .unwrap_or_else(|| "HNC".to_string());
    let alpha = args.alpha.or(system.alpha).unwrap_or(defaults.alpha);
    let closure = ClosureKind::parse(&closure_name, alpha)?;

    if let Some(knodes) = args.knodes {
        warn!(
            "--knodes {} is consumed by the downstream resampler; the solver emits its \
             native wavevector grid",
            knodes
        );
    }

    Ok(SolveRequest {
        nodes: args.nodes.or(solver.nodes).unwrap_or(defaults.nodes),
        nrho: args.nrho.or(solver.nrho).unwrap_or(defaults.nrho),
        r_max: args.rmax.or(solver.rmax).unwrap_or(defaults.r_max),
        potential_id: args
            .potential
            .or(system.potential)
            .unwrap_or(defaults.potential_id),
        closure_id: match closure {
            ClosureKind::PercusYevick => 1,
            ClosureKind::HyperNettedChain => 2,
            ClosureKind::RogersYoung { .. } => 3,
        },
        sigma1: args.sigma.or(system.sigma).unwrap_or(defaults.sigma1),
        sigma2: defaults.sigma2,
        temperature: args
            .temp
            .or(system.temperature)
            .unwrap_or(defaults.temperature),
        temperature2: args
            .temp2
            .or(system.temperature2)
            .unwrap_or(defaults.temperature2),
        lambda_a: args
            .lambda_a
            .or(system.lambda_a)
            .unwrap_or(defaults.lambda_a),
        lambda_r: args
            .lambda_r
            .or(system.lambda_r)
            .unwrap_or(defaults.lambda_r),
        volume_fraction: args
            .volfactor
            .or(system.volume_fraction)
            .unwrap_or(defaults.volume_fraction),
        diameter_scale: args
            .diameter
            .or(system.diameter_scale)
            .unwrap_or(defaults.diameter_scale),
        alpha,
        ez: args.ez.or(solver.ez).unwrap_or(defaults.ez),
        xnu: args.xnu.or(solver.xnu).unwrap_or(defaults.xnu),
        max_iter: args
            .max_iter
            .or(solver.max_iter)
            .unwrap_or(defaults.max_iter),
    })
}

pub fn run(request: &SolveRequest) -> OzResult<Solution> {
    info!("\nStarting structure calculation...\n");
    solve_structure(request)
}
