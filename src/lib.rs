//! Ornstein-Zernike structure solver for simple fluids.
//!
//! This library computes the radial distribution function g(r), the direct
//! correlation function c(r) and the static structure factor S(k) of a
//! single-component isotropic fluid by solving the Ornstein-Zernike integral
//! equation with the hypernetted-chain, Percus-Yevick or Rogers-Young
//! closure. The nonlinear fixed point is iterated by a Picard scheme with Ng
//! acceleration along a density ramp; the Rogers-Young mixing parameter is
//! tuned until virial and compressibility pressures agree.
//!
//! # Modules
//!
//! - `config`: configuration management and command-line argument parsing
//! - `grid`: radial mesh and the fast spherically symmetric Fourier pair
//! - `potential_impl`: the pair potential catalogue
//! - `closure_impl`: closure relations (HNC, PY, RY)
//! - `solver_impl`: Picard-Ng driver, density ramp, consistency search and
//!   thermodynamic post-processing
//! - `io`: logging setup and tabulated output files
//! - `app`: the thin orchestrator used by the binary

pub mod app;
pub mod closure_impl;
pub mod config;
pub mod error;
pub mod grid;
pub mod io;
pub mod potential_impl;
pub mod solver_impl;

// Re-export commonly used items for convenience
pub use closure_impl::ClosureKind;
pub use config::{Args, Config};
pub use error::{OzError, OzResult};
pub use grid::{RadialGrid, SineTransform};
pub use potential_impl::{PairPotential, PotentialKind, SpeciesParams};
pub use solver_impl::{
    solve_structure, IterationState, NgAccelerator, OutputKind, OzSolver, Solution, SolveRequest,
    SolverContext, Thermodynamics,
};
