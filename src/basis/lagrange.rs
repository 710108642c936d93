//! Lagrange shape functions.
//!
//! For interpolation nodes xi_0..xi_{n-1}, the Lagrange basis is
//!
//! N_i(x) = Π_{j≠i} (x - xi_j) / (xi_i - xi_j)
//!
//! with derivative
//!
//! N'_i(x) = Σ_{j≠i} 1/(xi_i - xi_j) Π_{l≠i,j} (x - xi_l) / (xi_i - xi_l)
//!
//! Values and derivatives are tabulated at a fixed set of sample points.
//! The cost is O(n²) per sample for values and O(n³) for derivatives,
//! which is fine: tables are built once per distinct point set, never per
//! time step.

use faer::Mat;

/// Lagrange basis values and derivatives tabulated at sample points.
#[derive(Clone, Debug)]
pub struct LagrangeBasis {
    /// Number of interpolation nodes (basis functions).
    pub n: usize,
    /// Values: `phi[(k, i)] = N_i(x_k)` for sample point k.
    pub phi: Mat<f64>,
    /// Derivatives: `dphi[(k, i)] = N'_i(x_k)`.
    pub dphi: Mat<f64>,
}

impl LagrangeBasis {
    /// Tabulate the basis defined by `nodes` at the given `samples`.
    pub fn new(samples: &[f64], nodes: &[f64]) -> Self {
        let n = nodes.len();
        let m = samples.len();

        let mut phi = Mat::zeros(m, n);
        for (k, &x) in samples.iter().enumerate() {
            for i in 0..n {
                let mut p = 1.0;
                for j in 0..n {
                    if j != i {
                        p *= (x - nodes[j]) / (nodes[i] - nodes[j]);
                    }
                }
                phi[(k, i)] = p;
            }
        }

        let mut dphi = Mat::zeros(m, n);
        for (k, &x) in samples.iter().enumerate() {
            for i in 0..n {
                let mut sum = 0.0;
                for j in 0..n {
                    if j == i {
                        continue;
                    }
                    let mut prod = 1.0 / (nodes[i] - nodes[j]);
                    for l in 0..n {
                        if l != i && l != j {
                            prod *= (x - nodes[l]) / (nodes[i] - nodes[l]);
                        }
                    }
                    sum += prod;
                }
                dphi[(k, i)] = sum;
            }
        }

        Self { n, phi, dphi }
    }

    /// Number of sample points tabulated.
    pub fn n_samples(&self) -> usize {
        self.phi.nrows()
    }
}
