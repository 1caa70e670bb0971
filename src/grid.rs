//! Radial mesh and spherically symmetric Fourier transforms.
//!
//! For an isotropic function f(r) the 3-D Fourier transform reduces to a
//! one-dimensional sine transform,
//!
//! ```text
//!   f^(k) = (4 pi / k) Int r f(r) sin(kr) dr
//!   f(r)  = (1 / (2 pi^2 r)) Int k f^(k) sin(kr) dk
//! ```
//!
//! Both integrals are discretized on conjugate half-integer meshes,
//! r_j = (j + 1/2) dr and k_i = (i + 1/2) dk with dk = pi / r_max, so that
//! k_i r_j = pi (i + 1/2)(j + 1/2) / n and the discrete sine sum is the
//! odd-frequency DST-IV. With these prefactors dr * dk * n = pi and the
//! forward/inverse pair is mutually inverse to machine precision.

use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};
use std::f64::consts::PI;
use std::sync::Arc;

use crate::error::{OzError, OzResult};

/// Conjugate radial and wavevector meshes.
#[derive(Clone, Debug)]
pub struct RadialGrid {
    pub n: usize,
    pub r_max: f64,
    pub dr: f64,
    pub dk: f64,
    pub r: Vec<f64>,
    pub k: Vec<f64>,
}

impl RadialGrid {
    pub fn new(n: usize, r_max: f64) -> OzResult<Self> {
        if n == 0 {
            return Err(OzError::Config("grid needs at least one node".into()));
        }
        if !r_max.is_finite() || r_max <= 0.0 {
            return Err(OzError::Config(format!("invalid grid extent r_max = {}", r_max)));
        }
        let dr = r_max / n as f64;
        let dk = PI / r_max;
        let r = (0..n).map(|j| (j as f64 + 0.5) * dr).collect();
        let k = (0..n).map(|i| (i as f64 + 0.5) * dk).collect();
        Ok(RadialGrid {
            n,
            r_max,
            dr,
            dk,
            r,
            k,
        })
    }
}

/// Fast odd-frequency sine transform bound to one [`RadialGrid`].
///
/// The DST-IV sum S_i = sum_j x_j sin(pi (i+1/2)(j+1/2) / n) is evaluated
/// through a single zero-padded complex FFT of length 2n: the input picks up a
/// pre-twiddle exp(i pi j / 2n), the spectrum a post-twiddle
/// exp(i pi (2i+1) / 4n), and the imaginary part of the product is the sum.
/// The FFT plan and scratch buffers are reused across calls.
pub struct SineTransform {
    grid: RadialGrid,
    fft: Arc<dyn Fft<f64>>,
    pre: Vec<Complex<f64>>,
    post: Vec<Complex<f64>>,
    buf: Vec<Complex<f64>>,
    fft_scratch: Vec<Complex<f64>>,
    tmp: Vec<f64>,
}

impl SineTransform {
    pub fn new(grid: &RadialGrid) -> Self {
        let n = grid.n;
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_inverse(2 * n);
        let pre = (0..n)
            .map(|j| Complex::from_polar(1.0, PI * j as f64 / (2.0 * n as f64)))
            .collect();
        let post = (0..n)
            .map(|i| Complex::from_polar(1.0, PI * (2 * i + 1) as f64 / (4.0 * n as f64)))
            .collect();
        let fft_scratch = vec![Complex::new(0.0, 0.0); fft.get_inplace_scratch_len()];
        SineTransform {
            grid: grid.clone(),
            fft,
            pre,
            post,
            buf: vec![Complex::new(0.0, 0.0); 2 * n],
            fft_scratch,
            tmp: vec![0.0; n],
        }
    }

    /// S_i = sum_j x_j sin(pi (i+1/2)(j+1/2) / n).
    pub fn dst4(&mut self, x: &[f64], out: &mut [f64]) {
        let n = self.grid.n;
        debug_assert_eq!(x.len(), n);
        debug_assert_eq!(out.len(), n);
        for z in self.buf.iter_mut() {
            *z = Complex::new(0.0, 0.0);
        }
        for j in 0..n {
            self.buf[j] = self.pre[j] * x[j];
        }
        self.fft.process_with_scratch(&mut self.buf, &mut self.fft_scratch);
        for i in 0..n {
            out[i] = (self.post[i] * self.buf[i]).im;
        }
    }

    /// f^(k_i) = (4 pi dr / k_i) sum_j r_j f(r_j) sin(k_i r_j).
    pub fn forward(&mut self, f: &[f64], out: &mut [f64]) {
        let n = self.grid.n;
        let mut tmp = std::mem::take(&mut self.tmp);
        for j in 0..n {
            tmp[j] = self.grid.r[j] * f[j];
        }
        self.dst4(&tmp, out);
        self.tmp = tmp;
        let scale = 4.0 * PI * self.grid.dr;
        for i in 0..n {
            out[i] *= scale / self.grid.k[i];
        }
    }

    /// f(r_j) = (dk / (2 pi^2 r_j)) sum_i k_i f^(k_i) sin(k_i r_j).
    pub fn inverse(&mut self, f_hat: &[f64], out: &mut [f64]) {
        let n = self.grid.n;
        let mut tmp = std::mem::take(&mut self.tmp);
        for i in 0..n {
            tmp[i] = self.grid.k[i] * f_hat[i];
        }
        self.dst4(&tmp, out);
        self.tmp = tmp;
        let scale = self.grid.dk / (2.0 * PI * PI);
        for j in 0..n {
            out[j] *= scale / self.grid.r[j];
        }
    }

    pub fn grid(&self) -> &RadialGrid {
        &self.grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mesh_pairing_invariant() {
        let grid = RadialGrid::new(64, 10.0).unwrap();
        for i in 0..grid.n {
            for j in 0..grid.n {
                let expected = PI * (i as f64 + 0.5) * (j as f64 + 0.5) / grid.n as f64;
                let product = grid.k[i] * grid.r[j];
                assert!(
                    (product - expected).abs() < 1e-12 * expected.max(1.0),
                    "k[{}] * r[{}] = {} != {}",
                    i,
                    j,
                    product,
                    expected
                );
            }
        }
    }

    #[test]
    fn rejects_degenerate_grids() {
        assert!(RadialGrid::new(0, 10.0).is_err());
        assert!(RadialGrid::new(16, 0.0).is_err());
        assert!(RadialGrid::new(16, f64::NAN).is_err());
    }

    #[test]
    fn dst4_matches_direct_sum() {
        let grid = RadialGrid::new(8, 4.0).unwrap();
        let mut transform = SineTransform::new(&grid);
        let x: Vec<f64> = (0..8).map(|j| 0.3 + (j as f64 * 0.7).cos()).collect();
        let mut fast = vec![0.0; 8];
        transform.dst4(&x, &mut fast);
        for i in 0..8 {
            let direct: f64 = (0..8)
                .map(|j| x[j] * (PI * (i as f64 + 0.5) * (j as f64 + 0.5) / 8.0).sin())
                .sum();
            assert!(
                (fast[i] - direct).abs() < 1e-12,
                "bin {}: {} vs {}",
                i,
                fast[i],
                direct
            );
        }
    }

    #[test]
    fn forward_inverse_round_trip() {
        let grid = RadialGrid::new(512, 20.0).unwrap();
        let mut transform = SineTransform::new(&grid);
        // smooth, rapidly decaying input
        let f: Vec<f64> = grid.r.iter().map(|&r| (-r * r / 2.0).exp()).collect();
        let mut f_hat = vec![0.0; grid.n];
        let mut back = vec![0.0; grid.n];
        transform.forward(&f, &mut f_hat);
        transform.inverse(&f_hat, &mut back);
        let scale = f.iter().fold(0.0f64, |m, v| m.max(v.abs()));
        for j in 0..grid.n {
            assert!(
                (back[j] - f[j]).abs() <= 1e-10 * scale,
                "round trip drift at r = {}: {} vs {}",
                grid.r[j],
                back[j],
                f[j]
            );
        }
    }

    #[test]
    fn inverse_forward_round_trip() {
        let grid = RadialGrid::new(256, 15.0).unwrap();
        let mut transform = SineTransform::new(&grid);
        let f_hat: Vec<f64> = grid.k.iter().map(|&k| (-k * k / 3.0).exp()).collect();
        let mut f = vec![0.0; grid.n];
        let mut back = vec![0.0; grid.n];
        transform.inverse(&f_hat, &mut f);
        transform.forward(&f, &mut back);
        let scale = f_hat.iter().fold(0.0f64, |m, v| m.max(v.abs()));
        for i in 0..grid.n {
            assert!((back[i] - f_hat[i]).abs() <= 1e-10 * scale);
        }
    }

    #[test]
    fn transforms_are_linear() {
        let grid = RadialGrid::new(128, 8.0).unwrap();
        let mut transform = SineTransform::new(&grid);
        let x: Vec<f64> = grid.r.iter().map(|&r| (-r).exp()).collect();
        let y: Vec<f64> = grid.r.iter().map(|&r| (-r * r / 4.0).exp() * r).collect();
        let combo: Vec<f64> = x.iter().zip(&y).map(|(a, b)| 2.5 * a - 0.75 * b).collect();

        let mut fx = vec![0.0; grid.n];
        let mut fy = vec![0.0; grid.n];
        let mut fc = vec![0.0; grid.n];
        transform.forward(&x, &mut fx);
        transform.forward(&y, &mut fy);
        transform.forward(&combo, &mut fc);
        for i in 0..grid.n {
            let expected = 2.5 * fx[i] - 0.75 * fy[i];
            assert!((fc[i] - expected).abs() < 1e-11 * expected.abs().max(1.0));
        }
    }
}
