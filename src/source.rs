//! Source terms.

use crate::error::{DgError, Result};

/// A spatial source term s(x), one function per variable, entering the
/// conservation law as dU/dt + dF(U)/dx + s(x) = 0.
pub struct SourceTerm {
    funs: Vec<Box<dyn Fn(f64) -> f64 + Send + Sync>>,
}

impl SourceTerm {
    pub fn new(funs: Vec<Box<dyn Fn(f64) -> f64 + Send + Sync>>) -> Self {
        Self { funs }
    }

    /// Number of variables covered.
    pub fn n_vars(&self) -> usize {
        self.funs.len()
    }

    /// Sample variable `var` at position `x`.
    pub fn eval(&self, var: usize, x: f64) -> Result<f64> {
        let f = self.funs.get(var).ok_or_else(|| {
            DgError::Config(format!(
                "source term covers {} variables, requested {}",
                self.funs.len(),
                var
            ))
        })?;
        Ok(f(x))
    }
}

impl std::fmt::Debug for SourceTerm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceTerm")
            .field("n_vars", &self.funs.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_samples_per_variable() {
        let source = SourceTerm::new(vec![Box::new(|x| 2.0 * x), Box::new(|_| -1.0)]);
        assert_eq!(source.n_vars(), 2);
        assert!((source.eval(0, 1.5).unwrap() - 3.0).abs() < 1e-14);
        assert!((source.eval(1, 1.5).unwrap() + 1.0).abs() < 1e-14);
        assert!(source.eval(2, 0.0).is_err());
    }
}
