//! Linear program data.

use crate::enums::{HighsVarType, ObjSense};
use crate::error::HighsError;
use crate::matrix::HighsSparseMatrix;

/// A linear (or mixed-integer) program
///
/// `integrality` is either empty (all columns continuous) or has one entry
/// per column. Name vectors are either empty or full length.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HighsLp {
    pub num_col: usize,
    pub num_row: usize,
    pub col_cost: Vec<f64>,
    pub col_lower: Vec<f64>,
    pub col_upper: Vec<f64>,
    pub row_lower: Vec<f64>,
    pub row_upper: Vec<f64>,
    pub a_matrix: HighsSparseMatrix,
    pub sense: ObjSense,
    pub offset: f64,
    pub model_name: String,
    pub col_names: Vec<String>,
    pub row_names: Vec<String>,
    pub integrality: Vec<HighsVarType>,
}

impl HighsLp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.num_col == 0 && self.num_row == 0
    }

    /// Whether any column carries an integer or semi-variable type.
    pub fn is_mip(&self) -> bool {
        self.integrality
            .iter()
            .any(|&t| t != HighsVarType::Continuous)
    }

    /// Integrality of column `col`, continuous when none is recorded.
    pub fn col_integrality(&self, col: usize) -> HighsVarType {
        self.integrality.get(col).copied().unwrap_or_default()
    }

    /// Check that every vector agrees with `num_col` / `num_row`.
    pub fn check_dimensions(&self) -> Result<(), HighsError> {
        let col_vectors: [(&'static str, usize); 3] = [
            ("col_cost", self.col_cost.len()),
            ("col_lower", self.col_lower.len()),
            ("col_upper", self.col_upper.len()),
        ];
        for (what, got) in col_vectors {
            check_len(what, self.num_col, got)?;
        }
        check_len("row_lower", self.num_row, self.row_lower.len())?;
        check_len("row_upper", self.num_row, self.row_upper.len())?;
        if !self.integrality.is_empty() {
            check_len("integrality", self.num_col, self.integrality.len())?;
        }
        if !self.col_names.is_empty() {
            check_len("col_names", self.num_col, self.col_names.len())?;
        }
        if !self.row_names.is_empty() {
            check_len("row_names", self.num_row, self.row_names.len())?;
        }
        check_len("a_matrix num_col", self.num_col, self.a_matrix.num_col)?;
        check_len("a_matrix num_row", self.num_row, self.a_matrix.num_row)?;
        Ok(())
    }

    /// Objective value `offset + cᵀx` for the linear part.
    pub fn objective_value(&self, col_value: &[f64]) -> f64 {
        self.offset
            + self
                .col_cost
                .iter()
                .zip(col_value)
                .map(|(c, x)| c * x)
                .sum::<f64>()
    }
}

fn check_len(what: &'static str, expected: usize, got: usize) -> Result<(), HighsError> {
    if expected != got {
        return Err(HighsError::LengthMismatch {
            what,
            expected,
            got,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_col_lp() -> HighsLp {
        HighsLp {
            num_col: 2,
            num_row: 1,
            col_cost: vec![1.0, -2.0],
            col_lower: vec![0.0, 0.0],
            col_upper: vec![4.0, 4.0],
            row_lower: vec![f64::NEG_INFINITY],
            row_upper: vec![5.0],
            a_matrix: HighsSparseMatrix::from_parts(
                crate::enums::MatrixFormat::Colwise,
                2,
                1,
                vec![0, 1, 2],
                vec![0, 0],
                vec![1.0, 1.0],
            ),
            offset: 3.0,
            ..HighsLp::default()
        }
    }

    #[test]
    fn test_default_lp_is_empty() {
        let lp = HighsLp::new();
        assert!(lp.is_empty());
        assert_eq!(lp.sense, ObjSense::Minimize);
        assert!(lp.check_dimensions().is_ok());
    }

    #[test]
    fn test_check_dimensions() {
        let mut lp = two_col_lp();
        assert!(lp.check_dimensions().is_ok());
        lp.col_upper.pop();
        let err = lp.check_dimensions().unwrap_err();
        assert_eq!(
            err,
            HighsError::LengthMismatch {
                what: "col_upper",
                expected: 2,
                got: 1
            }
        );
    }

    #[test]
    fn test_integrality_helpers() {
        let mut lp = two_col_lp();
        assert!(!lp.is_mip());
        assert_eq!(lp.col_integrality(1), HighsVarType::Continuous);
        lp.integrality = vec![HighsVarType::Continuous, HighsVarType::Integer];
        assert!(lp.is_mip());
        assert_eq!(lp.col_integrality(1), HighsVarType::Integer);
    }

    #[test]
    fn test_objective_value_includes_offset() {
        let lp = two_col_lp();
        assert_eq!(lp.objective_value(&[1.0, 2.0]), 3.0 + 1.0 - 4.0);
    }
}
