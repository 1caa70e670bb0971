use super::{eval_point, PairPotential, PotentialKind, SpeciesParams};
use crate::grid::RadialGrid;

fn params() -> SpeciesParams {
    SpeciesParams {
        sigma: 1.0,
        temperature: 1.0,
        temperature2: 1.0,
        lambda_a: 1.8,
        lambda_r: 4.0,
    }
}

fn close(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol * b.abs().max(1.0)
}

#[test]
fn unknown_id_is_a_configuration_error() {
    assert!(PotentialKind::try_from_id(3).is_err());
    assert!(PotentialKind::try_from_id(99).is_err());
}

#[test]
fn id_round_trip() {
    for id in [1, 2, 4, 7, 13] {
        let kind = PotentialKind::try_from_id(id).unwrap();
        assert_eq!(kind.id(), id);
    }
}

#[test]
fn invalid_parameters_are_rejected() {
    let grid = RadialGrid::new(64, 10.0).unwrap();
    let mut bad = params();
    bad.sigma = -1.0;
    assert!(PairPotential::tabulate(PotentialKind::HardSphere, &bad, &grid).is_err());

    let mut bad = params();
    bad.temperature = f64::NAN;
    assert!(PairPotential::tabulate(PotentialKind::Wca, &bad, &grid).is_err());

    let mut bad = params();
    bad.lambda_r = 0.0;
    assert!(PairPotential::tabulate(PotentialKind::InversePower, &bad, &grid).is_err());

    let mut bad = params();
    bad.temperature2 = -2.0;
    assert!(PairPotential::tabulate(PotentialKind::DoubleYukawa, &bad, &grid).is_err());
}

#[test]
fn hard_sphere_core_mask_covers_the_core() {
    let grid = RadialGrid::new(256, 8.0).unwrap();
    let pot = PairPotential::tabulate(PotentialKind::HardSphere, &params(), &grid).unwrap();
    assert!(pot.has_core);
    for j in 0..grid.n {
        assert_eq!(pot.core[j], grid.r[j] < 1.0, "mask wrong at r = {}", grid.r[j]);
        assert_eq!(pot.u[j], 0.0);
        assert_eq!(pot.up[j], 0.0);
    }
}

#[test]
fn wca_is_shifted_and_cut() {
    let grid = RadialGrid::new(1024, 4.0).unwrap();
    let pot = PairPotential::tabulate(PotentialKind::Wca, &params(), &grid).unwrap();
    assert!(!pot.has_core);
    let r_cut = 2f64.powf(1.0 / 6.0);
    for j in 0..grid.n {
        if grid.r[j] >= r_cut {
            assert_eq!(pot.u[j], 0.0);
            assert_eq!(pot.up[j], 0.0);
        } else {
            assert!(pot.u[j] > 0.0);
        }
    }
    // U(sigma) = 4 eps (1 - 1) + eps = eps
    let j_sigma = grid.r.iter().position(|&r| r >= 1.0).unwrap();
    assert!(close(pot.u[j_sigma], 1.0, 0.05));
}

#[test]
fn up_matches_numerical_derivative() {
    let grid = RadialGrid::new(512, 6.0).unwrap();
    let cases = [
        PotentialKind::InversePower,
        PotentialKind::DoubleYukawa,
        PotentialKind::Hertzian,
    ];
    for kind in cases {
        let pot = PairPotential::tabulate(kind, &params(), &grid).unwrap();
        let h = 1e-6;
        for j in 8..grid.n - 8 {
            let r = grid.r[j];
            if kind == PotentialKind::Hertzian && (r - 1.0).abs() < 0.05 {
                // derivative kink at the overlap boundary
                continue;
            }
            let u_at = |x: f64| eval_point(kind, &params(), x).0;
            let du = (u_at(r + h) - u_at(r - h)) / (2.0 * h);
            let expected = -r * du;
            assert!(
                (pot.up[j] - expected).abs() < 1e-4 * expected.abs().max(1.0),
                "{:?} at r = {}: up = {} vs -r dU/dr = {}",
                kind,
                r,
                pot.up[j],
                expected
            );
        }
    }
}

#[test]
fn double_yukawa_balances_at_contact_for_equal_temperatures() {
    let grid = RadialGrid::new(2048, 16.0).unwrap();
    let pot = PairPotential::tabulate(PotentialKind::DoubleYukawa, &params(), &grid).unwrap();
    // with eps_a = eps_r the two tails cancel exactly at r = sigma
    let j = grid.r.iter().position(|&r| r >= 1.0).unwrap();
    assert!(pot.u[j].abs() < 0.05);
    // attraction wins at long range
    let j_far = grid.r.iter().position(|&r| r >= 2.0).unwrap();
    assert!(pot.u[j_far] < 0.0);
}
