//! Ng acceleration for the Picard fixed-point iteration.
//!
//! The accelerator keeps the last three (gamma_in, residual) pairs and, once
//! the history is full and the residual is under control, projects the next
//! iterate onto the affine span of the stored iterates by solving a 2x2
//! least-squares system in the radially weighted inner product
//! <a, b> = sum_j r_j^2 dr a_j b_j. With a shorter history, or when the
//! projection system is singular, it falls back to damped Picard mixing.

use nalgebra::{DMatrix, DVector};
use std::collections::VecDeque;

use crate::grid::RadialGrid;

const HISTORY_DEPTH: usize = 3;

/// Residual ceiling above which the projection is not trusted.
const ACCELERATION_THRESHOLD: f64 = 1.0;

pub struct NgAccelerator {
    history: VecDeque<(DVector<f64>, DVector<f64>)>,
    weights: DVector<f64>,
    xnu: f64,
}

impl NgAccelerator {
    /// `xnu` is the inverse of the strongest Picard damping applied while the
    /// residual is still large; the mixing ramps back to 1 as it shrinks.
    pub fn new(grid: &RadialGrid, xnu: f64) -> Self {
        let weights = DVector::from_iterator(grid.n, grid.r.iter().map(|&r| r * r * grid.dr));
        NgAccelerator {
            history: VecDeque::with_capacity(HISTORY_DEPTH),
            weights,
            xnu,
        }
    }

    /// Forget the stored iterates; called at every new density.
    pub fn reset(&mut self) {
        self.history.clear();
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Record one Picard sweep: the input iterate and its residual
    /// d = gamma_out - gamma_in.
    pub fn push(&mut self, gamma_in: DVector<f64>, residual: DVector<f64>) {
        if self.history.len() == HISTORY_DEPTH {
            self.history.pop_front();
        }
        self.history.push_back((gamma_in, residual));
    }

    /// Produce the next iterate from the stored history.
    pub fn next_iterate(&self) -> DVector<f64> {
        let m = self.history.len();
        let (gamma_n, d_n) = self
            .history
            .back()
            .expect("next_iterate called with empty history");
        let res_inf = d_n.amax();

        if m == HISTORY_DEPTH && res_inf < ACCELERATION_THRESHOLD {
            let (gamma_1, d_1) = &self.history[m - 2];
            let (gamma_2, d_2) = &self.history[m - 3];
            let u1 = d_n - d_1;
            let u2 = d_n - d_2;
            let a = DMatrix::from_row_slice(
                2,
                2,
                &[
                    self.dot(&u1, &u1),
                    self.dot(&u1, &u2),
                    self.dot(&u2, &u1),
                    self.dot(&u2, &u2),
                ],
            );
            let rhs = DVector::from_vec(vec![self.dot(&u1, d_n), self.dot(&u2, d_n)]);
            if let Some(coeffs) = a.lu().solve(&rhs) {
                let (c1, c2) = (coeffs[0], coeffs[1]);
                if c1.is_finite() && c2.is_finite() {
                    return (gamma_n + d_n) * (1.0 - c1 - c2)
                        + (gamma_1 + d_1) * c1
                        + (gamma_2 + d_2) * c2;
                }
            }
        }

        // Damped Picard: strongly mixed while the residual is large, plain
        // once it has dropped below 1/xnu.
        let omega = (1.0 / (self.xnu * res_inf)).clamp(1.0 / self.xnu, 1.0);
        gamma_n + d_n * omega
    }

    fn dot(&self, a: &DVector<f64>, b: &DVector<f64>) -> f64 {
        a.iter()
            .zip(b.iter())
            .zip(self.weights.iter())
            .map(|((x, y), w)| w * x * y)
            .sum()
    }
}
