//! Quadratic objective term.

use std::collections::BTreeMap;

use crate::enums::HessianFormat;
use crate::error::HighsError;

/// Hessian `Q` of the objective term `½xᵀQx`, stored column-wise.
#[derive(Clone, Debug, PartialEq)]
pub struct HighsHessian {
    pub dim: usize,
    pub format: HessianFormat,
    pub start: Vec<usize>,
    pub index: Vec<usize>,
    pub value: Vec<f64>,
}

impl Default for HighsHessian {
    fn default() -> Self {
        Self {
            dim: 0,
            format: HessianFormat::Triangular,
            start: vec![0],
            index: Vec::new(),
            value: Vec::new(),
        }
    }
}

impl HighsHessian {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a Hessian from per-column starts without the closing offset.
    /// Without entries the Hessian is empty whatever `dim` says.
    pub fn from_vectors(
        format: HessianFormat,
        dim: usize,
        starts: &[usize],
        index: &[usize],
        value: &[f64],
    ) -> Self {
        if index.is_empty() {
            return Self::default();
        }
        let mut start = Vec::with_capacity(starts.len() + 1);
        start.extend_from_slice(starts);
        start.push(index.len());
        Self {
            dim,
            format,
            start,
            index: index.to_vec(),
            value: value.to_vec(),
        }
    }

    pub fn num_nz(&self) -> usize {
        self.start.get(self.dim).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.dim == 0 || self.num_nz() == 0
    }

    /// Check start layout, index ranges, duplicates and, for triangular
    /// storage, that no entry lies above the diagonal.
    pub fn validate(&self) -> Result<(), HighsError> {
        if self.start.len() != self.dim + 1 {
            return Err(HighsError::InvalidHessian {
                reason: format!(
                    "start has length {} but dim is {}",
                    self.start.len(),
                    self.dim
                ),
            });
        }
        if self.start[0] != 0 || self.start.windows(2).any(|w| w[0] > w[1]) {
            return Err(HighsError::InvalidHessian {
                reason: "start must begin at 0 and be non-decreasing".to_string(),
            });
        }
        let num_nz = self.start[self.dim];
        if self.index.len() != num_nz || self.value.len() != num_nz {
            return Err(HighsError::InvalidHessian {
                reason: format!("expected {} index and value entries", num_nz),
            });
        }
        let mut seen = vec![false; self.dim];
        for col in 0..self.dim {
            let range = self.start[col]..self.start[col + 1];
            for &row in &self.index[range.clone()] {
                if row >= self.dim {
                    return Err(HighsError::InvalidHessian {
                        reason: format!("column {} has row index {} >= dim", col, row),
                    });
                }
                if self.format == HessianFormat::Triangular && row < col {
                    return Err(HighsError::InvalidHessian {
                        reason: format!("entry ({}, {}) is above the diagonal", row, col),
                    });
                }
                if seen[row] {
                    return Err(HighsError::InvalidHessian {
                        reason: format!("column {} has duplicate row index {}", col, row),
                    });
                }
                seen[row] = true;
            }
            for &row in &self.index[range] {
                seen[row] = false;
            }
        }
        Ok(())
    }

    /// Convert square storage to the lower triangle, averaging each
    /// off-diagonal pair. Returns true when some pair was asymmetric.
    /// The Hessian must already be valid.
    pub fn make_triangular(&mut self) -> bool {
        if self.format == HessianFormat::Triangular {
            return false;
        }
        // (col, row) with row >= col -> (lower value, upper value)
        let mut pairs: BTreeMap<(usize, usize), (f64, f64)> = BTreeMap::new();
        for col in 0..self.dim {
            for el in self.start[col]..self.start[col + 1] {
                let row = self.index[el];
                let value = self.value[el];
                if row >= col {
                    pairs.entry((col, row)).or_insert((0.0, 0.0)).0 = value;
                } else {
                    pairs.entry((row, col)).or_insert((0.0, 0.0)).1 = value;
                }
            }
        }

        let mut asymmetric = false;
        let mut start = vec![0; self.dim + 1];
        let mut index = Vec::with_capacity(pairs.len());
        let mut value = Vec::with_capacity(pairs.len());
        for ((col, row), (lower, upper)) in pairs {
            let merged = if row == col {
                lower
            } else {
                if lower != upper {
                    asymmetric = true;
                }
                0.5 * (lower + upper)
            };
            if merged == 0.0 {
                continue;
            }
            start[col + 1] += 1;
            index.push(row);
            value.push(merged);
        }
        for col in 0..self.dim {
            start[col + 1] += start[col];
        }

        self.format = HessianFormat::Triangular;
        self.start = start;
        self.index = index;
        self.value = value;
        asymmetric
    }

    /// `Qx` for a triangular Hessian.
    pub fn product(&self, x: &[f64]) -> Vec<f64> {
        let mut result = vec![0.0; self.dim];
        for col in 0..self.dim {
            for el in self.start[col]..self.start[col + 1] {
                let row = self.index[el];
                result[row] += self.value[el] * x[col];
                if row != col && self.format == HessianFormat::Triangular {
                    result[col] += self.value[el] * x[row];
                }
            }
        }
        result
    }

    /// `½xᵀQx`
    pub fn objective_value(&self, x: &[f64]) -> f64 {
        0.5 * self
            .product(x)
            .iter()
            .zip(x)
            .map(|(qx, xi)| qx * xi)
            .sum::<f64>()
    }

    /// Grow the dimension by `num_new` columns with no entries.
    pub fn extend_dim(&mut self, num_new: usize) {
        let num_nz = self.num_nz();
        self.start.resize(self.dim + num_new + 1, num_nz);
        self.dim += num_new;
    }

    /// Drop the rows and columns flagged in `mask`.
    pub fn delete_vars(&mut self, mask: &[bool]) {
        let mut new_index = Vec::with_capacity(self.dim);
        let mut kept = 0;
        for &deleted in mask {
            new_index.push(kept);
            if !deleted {
                kept += 1;
            }
        }
        let mut start = vec![0];
        let mut index = Vec::new();
        let mut value = Vec::new();
        for col in (0..self.dim).filter(|&c| !mask[c]) {
            for el in self.start[col]..self.start[col + 1] {
                let row = self.index[el];
                if !mask[row] {
                    index.push(new_index[row]);
                    value.push(self.value[el]);
                }
            }
            start.push(index.len());
        }
        self.dim = kept;
        self.start = start;
        self.index = index;
        self.value = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(values: [f64; 4]) -> HighsHessian {
        // [[a, c], [b, d]] column-wise: col0 = (a, b), col1 = (c, d)
        HighsHessian {
            dim: 2,
            format: HessianFormat::Square,
            start: vec![0, 2, 4],
            index: vec![0, 1, 0, 1],
            value: values.to_vec(),
        }
    }

    #[test]
    fn test_from_vectors_closes_starts() {
        let hessian =
            HighsHessian::from_vectors(HessianFormat::Triangular, 2, &[0, 1], &[0, 1], &[1.0, 2.0]);
        assert_eq!(hessian.start, vec![0, 1, 2]);
        assert_eq!(hessian.num_nz(), 2);
        assert!(hessian.validate().is_ok());

        let empty = HighsHessian::from_vectors(HessianFormat::Square, 3, &[0, 0, 0], &[], &[]);
        assert_eq!(empty, HighsHessian::default());
    }

    #[test]
    fn test_symmetric_square_to_triangular() {
        let mut hessian = square([2.0, 1.0, 1.0, 4.0]);
        assert!(hessian.validate().is_ok());
        assert!(!hessian.make_triangular());
        assert_eq!(hessian.format, HessianFormat::Triangular);
        assert_eq!(hessian.start, vec![0, 2, 3]);
        assert_eq!(hessian.index, vec![0, 1, 1]);
        assert_eq!(hessian.value, vec![2.0, 1.0, 4.0]);
    }

    #[test]
    fn test_asymmetric_pair_is_averaged() {
        let mut hessian = square([2.0, 1.0, 3.0, 4.0]);
        assert!(hessian.make_triangular());
        assert_eq!(hessian.value, vec![2.0, 2.0, 4.0]);
    }

    #[test]
    fn test_triangular_rejects_upper_entry() {
        let hessian = HighsHessian {
            dim: 2,
            format: HessianFormat::Triangular,
            start: vec![0, 1, 2],
            index: vec![0, 0],
            value: vec![1.0, 1.0],
        };
        assert_eq!(
            hessian.validate().map_err(|e| e.code()),
            Err("HESSIAN_INVALID")
        );
    }

    #[test]
    fn test_duplicate_row_rejected() {
        let hessian = HighsHessian {
            dim: 1,
            format: HessianFormat::Triangular,
            start: vec![0, 2],
            index: vec![0, 0],
            value: vec![1.0, 1.0],
        };
        assert!(hessian.validate().is_err());
    }

    #[test]
    fn test_objective_value() {
        let mut hessian = square([2.0, 1.0, 1.0, 4.0]);
        hessian.make_triangular();
        // x = (1, 1): xᵀQx = 2 + 1 + 1 + 4 = 8
        assert_eq!(hessian.product(&[1.0, 1.0]), vec![3.0, 5.0]);
        assert_eq!(hessian.objective_value(&[1.0, 1.0]), 4.0);
    }

    #[test]
    fn test_extend_dim() {
        let mut hessian = square([2.0, 1.0, 1.0, 4.0]);
        hessian.make_triangular();
        hessian.extend_dim(2);
        assert_eq!(hessian.dim, 4);
        assert_eq!(hessian.start, vec![0, 2, 3, 3, 3]);
        assert!(hessian.validate().is_ok());
    }

    #[test]
    fn test_delete_vars() {
        let mut hessian = square([2.0, 1.0, 1.0, 4.0]);
        hessian.make_triangular();
        hessian.delete_vars(&[true, false]);
        assert_eq!(hessian.dim, 1);
        assert_eq!(hessian.start, vec![0, 1]);
        assert_eq!(hessian.index, vec![0]);
        assert_eq!(hessian.value, vec![4.0]);
    }
}
