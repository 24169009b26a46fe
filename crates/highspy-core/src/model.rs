use crate::hessian::HighsHessian;
use crate::lp::HighsLp;

/// An LP plus an optional quadratic objective term.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HighsModel {
    pub lp: HighsLp,
    pub hessian: HighsHessian,
}

impl HighsModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_lp(lp: HighsLp) -> Self {
        Self {
            lp,
            hessian: HighsHessian::default(),
        }
    }

    pub fn is_qp(&self) -> bool {
        !self.hessian.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.lp.is_empty()
    }

    /// Full objective value at `col_value`.
    pub fn objective_value(&self, col_value: &[f64]) -> f64 {
        let linear = self.lp.objective_value(col_value);
        if self.is_qp() {
            linear + self.hessian.objective_value(col_value)
        } else {
            linear
        }
    }
}
