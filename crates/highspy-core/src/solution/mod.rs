//! Primal/dual solutions and simplex bases.

mod file;

use crate::enums::{BasisValidity, HighsBasisStatus};

/// Primal and dual values for columns and rows.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HighsSolution {
    pub value_valid: bool,
    pub dual_valid: bool,
    pub col_value: Vec<f64>,
    pub col_dual: Vec<f64>,
    pub row_value: Vec<f64>,
    pub row_dual: Vec<f64>,
}

impl HighsSolution {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn invalidate(&mut self) {
        self.value_valid = false;
        self.dual_valid = false;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Basis status for each column and row.
#[derive(Clone, Debug, PartialEq)]
pub struct HighsBasis {
    pub valid: bool,
    pub alien: bool,
    pub was_alien: bool,
    pub debug_id: i32,
    pub debug_update_count: i32,
    pub debug_origin_name: String,
    pub col_status: Vec<HighsBasisStatus>,
    pub row_status: Vec<HighsBasisStatus>,
}

impl Default for HighsBasis {
    fn default() -> Self {
        Self {
            valid: false,
            alien: true,
            was_alien: true,
            debug_id: -1,
            debug_update_count: -1,
            debug_origin_name: "None".to_string(),
            col_status: Vec::new(),
            row_status: Vec::new(),
        }
    }
}

impl HighsBasis {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn validity(&self) -> BasisValidity {
        if self.valid {
            BasisValidity::Valid
        } else {
            BasisValidity::Invalid
        }
    }

    pub fn invalidate(&mut self) {
        self.valid = false;
        self.alien = true;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether the basis is valid and sized for the given dimensions.
    pub fn fits(&self, num_col: usize, num_row: usize) -> bool {
        self.valid && self.col_status.len() == num_col && self.row_status.len() == num_row
    }

    /// Whether the number of basic variables equals the number of rows.
    pub fn is_square(&self) -> bool {
        let basic = self
            .col_status
            .iter()
            .chain(&self.row_status)
            .filter(|&&s| s == HighsBasisStatus::Basic)
            .count();
        basic == self.row_status.len()
    }

    /// Slack basis: every column nonbasic at a bound, every row basic.
    pub fn slack(col_lower: &[f64], col_upper: &[f64], num_row: usize) -> Self {
        Self {
            valid: true,
            alien: false,
            was_alien: false,
            debug_origin_name: "Slack".to_string(),
            col_status: col_lower
                .iter()
                .zip(col_upper)
                .map(|(&l, &u)| HighsBasisStatus::nonbasic_for_bounds(l, u))
                .collect(),
            row_status: vec![HighsBasisStatus::Basic; num_row],
            ..Self::default()
        }
    }
}
