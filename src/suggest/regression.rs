//! Polynomial least squares in one variable, degree 2 when the data allows it.

use crate::error::SuggestError;
use serde::{Deserialize, Serialize};

const MAX_DEGREE: usize = 2;

/// `y ≈ c0 + c1·u + c2·u²` with `u = x / scale`.
///
/// Scaling keeps the normal equations well conditioned when `x` spans several orders
/// of magnitude. Lower degree fits leave the higher coefficients at zero.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PolynomialFit {
    pub coefficients: [f64; 3],
    pub scale: f64,
}

impl PolynomialFit {
    /// Least squares fit through `(xs[i], ys[i])`.
    ///
    /// The degree drops to one less than the number of distinct `x`: two distinct
    /// values give the line through their means, one gives the mean of `y`.
    pub fn fit(xs: &[f64], ys: &[f64]) -> Result<PolynomialFit, SuggestError> {
        if xs.len() != ys.len() || xs.is_empty() {
            return Err(SuggestError::SingularFit);
        }
        let mut distinct: Vec<f64> = xs.to_vec();
        distinct.sort_by(f64::total_cmp);
        distinct.dedup();

        let scale = xs.iter().fold(0f64, |m, x| m.max(x.abs()));
        let scale = if scale > 0.0 { scale } else { 1.0 };

        let top = MAX_DEGREE.min(distinct.len() - 1);
        for degree in (0..=top).rev() {
            match fit_degree(xs, ys, scale, degree) {
                Ok(coefficients) => {
                    if degree < MAX_DEGREE {
                        log::debug!("Fell back to degree {degree} fit");
                    }
                    return Ok(PolynomialFit {
                        coefficients,
                        scale,
                    });
                }
                Err(e) if degree == 0 => return Err(e),
                Err(_) => log::debug!("Degree {degree} fit is singular"),
            }
        }
        Err(SuggestError::SingularFit)
    }

    pub fn predict(&self, x: f64) -> f64 {
        let u = x / self.scale;
        let [c0, c1, c2] = self.coefficients;
        c0 + c1 * u + c2 * u * u
    }
}

/// Solve the normal equations for one polynomial degree.
fn fit_degree(
    xs: &[f64],
    ys: &[f64],
    scale: f64,
    degree: usize,
) -> Result<[f64; 3], SuggestError> {
    let n = degree + 1;
    // power sums Σu^k for k in 0..=2·degree and Σu^k·y for k in 0..=degree
    let mut s = vec![0f64; 2 * degree + 1];
    let mut t = vec![0f64; n];
    for (x, y) in xs.iter().zip(ys) {
        let u = x / scale;
        let mut p = 1.0;
        for k in 0..s.len() {
            s[k] += p;
            if k < n {
                t[k] += p * y;
            }
            p *= u;
        }
    }

    let mut system: Vec<Vec<f64>> = (0..n)
        .map(|row| {
            let mut line: Vec<f64> = s[row..row + n].to_vec();
            line.push(t[row]);
            line
        })
        .collect();
    let solved = solve(&mut system)?;

    let mut coefficients = [0f64; 3];
    coefficients[..n].copy_from_slice(&solved);
    Ok(coefficients)
}

/// Gaussian elimination with partial pivoting on an augmented `n x (n + 1)` matrix.
fn solve(m: &mut [Vec<f64>]) -> Result<Vec<f64>, SuggestError> {
    let n = m.len();
    for col in 0..n {
        let pivot = (col..n)
            .max_by(|&a, &b| m[a][col].abs().total_cmp(&m[b][col].abs()))
            .unwrap_or(col);
        if m[pivot][col] == 0.0 || !m[pivot][col].is_finite() {
            return Err(SuggestError::SingularFit);
        }
        m.swap(col, pivot);
        for row in col + 1..n {
            let factor = m[row][col] / m[col][col];
            for k in col..=n {
                m[row][k] -= factor * m[col][k];
            }
        }
    }

    let mut out = vec![0f64; n];
    for row in (0..n).rev() {
        let tail: f64 = (row + 1..n).map(|k| m[row][k] * out[k]).sum();
        out[row] = (m[row][n] - tail) / m[row][row];
    }
    if out.iter().all(|c| c.is_finite()) {
        Ok(out)
    } else {
        Err(SuggestError::SingularFit)
    }
}
