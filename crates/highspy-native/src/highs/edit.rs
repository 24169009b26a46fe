//! Model loading and editing.

use highspy_core::assess::{assess_bounds, assess_costs, assess_hessian, assess_lp, assess_matrix};
use highspy_core::{
    HessianFormat, HighsBasisStatus, HighsError, HighsHessian, HighsLp, HighsModel,
    HighsSparseMatrix, HighsStatus, HighsVarType, MatrixFormat, ObjSense,
};
use tracing::{debug, warn};

use super::{Highs, HighsResult, check_len};
use crate::error::NativeError;

/// Flat arrays describing an LP, with per-vector `a_start` offsets that
/// omit the closing offset.
#[derive(Debug, Clone, Copy)]
pub struct ModelArrays<'a> {
    pub num_col: usize,
    pub num_row: usize,
    pub num_nz: usize,
    pub a_format: MatrixFormat,
    pub sense: ObjSense,
    pub offset: f64,
    pub col_cost: &'a [f64],
    pub col_lower: &'a [f64],
    pub col_upper: &'a [f64],
    pub row_lower: &'a [f64],
    pub row_upper: &'a [f64],
    pub a_start: &'a [usize],
    pub a_index: &'a [usize],
    pub a_value: &'a [f64],
    pub integrality: Option<&'a [HighsVarType]>,
}

/// Flat arrays describing a Hessian, with per-column `start` offsets that
/// omit the closing offset.
#[derive(Debug, Clone, Copy)]
pub struct HessianArrays<'a> {
    pub dim: usize,
    pub num_nz: usize,
    pub format: HessianFormat,
    pub start: &'a [usize],
    pub index: &'a [usize],
    pub value: &'a [f64],
}

impl HessianArrays<'_> {
    fn to_hessian(self) -> Result<HighsHessian, NativeError> {
        check_len("q_index", self.num_nz, self.index.len())?;
        check_len("q_value", self.num_nz, self.value.len())?;
        if self.num_nz > 0 {
            check_len("q_start", self.dim, self.start.len())?;
        }
        Ok(HighsHessian::from_vectors(
            self.format,
            self.dim,
            self.start,
            self.index,
            self.value,
        ))
    }
}

impl ModelArrays<'_> {
    fn to_lp(self) -> Result<HighsLp, NativeError> {
        check_len("a_index", self.num_nz, self.a_index.len())?;
        check_len("a_value", self.num_nz, self.a_value.len())?;
        let a_matrix = HighsSparseMatrix::from_vectors(
            self.a_format,
            self.num_col,
            self.num_row,
            self.a_start,
            self.a_index,
            self.a_value,
        );
        Ok(HighsLp {
            num_col: self.num_col,
            num_row: self.num_row,
            col_cost: self.col_cost.to_vec(),
            col_lower: self.col_lower.to_vec(),
            col_upper: self.col_upper.to_vec(),
            row_lower: self.row_lower.to_vec(),
            row_upper: self.row_upper.to_vec(),
            a_matrix,
            sense: self.sense,
            offset: self.offset,
            integrality: self.integrality.map(<[_]>::to_vec).unwrap_or_default(),
            ..HighsLp::default()
        })
    }
}

fn index_mask(kind: &'static str, indices: &[usize], len: usize) -> Result<Vec<bool>, NativeError> {
    let mut mask = vec![false; len];
    for &index in indices {
        if index >= len {
            return Err(HighsError::IndexOutOfRange { kind, index, len }.into());
        }
        mask[index] = true;
    }
    Ok(mask)
}

fn retain_unmasked<T>(values: &mut Vec<T>, mask: &[bool]) {
    let mut position = 0;
    values.retain(|_| {
        let keep = !mask[position];
        position += 1;
        keep
    });
}

impl Highs {
    /// Replace the incumbent model. The matrix is stored column-wise and a
    /// square Hessian is reduced to its lower triangle.
    pub fn pass_model(&mut self, model: HighsModel) -> HighsResult {
        let mut model = model;
        let mut status = assess_lp(&mut model.lp, &self.options)?;
        model.lp.a_matrix.ensure_colwise();
        if model.hessian.dim > 0 {
            status = status.worse(assess_hessian(
                &mut model.hessian,
                model.lp.num_col,
                &self.options,
            )?);
        }
        debug!(
            component = "highs",
            operation = "pass_model",
            status = %status,
            num_col = model.lp.num_col,
            num_row = model.lp.num_row,
            num_nz = model.lp.a_matrix.num_nz(),
            is_qp = model.is_qp(),
            "Model passed"
        );
        self.model = model;
        self.clear_solver()?;
        Ok(status)
    }

    pub fn pass_lp(&mut self, lp: HighsLp) -> HighsResult {
        self.pass_model(HighsModel::from_lp(lp))
    }

    /// Pass an LP given as flat arrays.
    pub fn pass_model_arrays(&mut self, arrays: ModelArrays<'_>) -> HighsResult {
        self.pass_lp(arrays.to_lp()?)
    }

    /// Pass an LP and its Hessian given as flat arrays. Nothing changes
    /// unless both are accepted.
    pub fn pass_qp_arrays(&mut self, lp: ModelArrays<'_>, hessian: HessianArrays<'_>) -> HighsResult {
        let model = HighsModel {
            lp: lp.to_lp()?,
            hessian: hessian.to_hessian()?,
        };
        self.pass_model(model)
    }

    /// Replace the Hessian of the incumbent model.
    pub fn pass_hessian(&mut self, hessian: HighsHessian) -> HighsResult {
        let mut hessian = hessian;
        let status = if hessian.dim > 0 {
            assess_hessian(&mut hessian, self.model.lp.num_col, &self.options)?
        } else {
            HighsStatus::Ok
        };
        self.model.hessian = hessian;
        self.model_changed();
        Ok(status)
    }

    pub fn pass_hessian_arrays(&mut self, hessian: HessianArrays<'_>) -> HighsResult {
        self.pass_hessian(hessian.to_hessian()?)
    }

    pub fn pass_col_name(&mut self, col: usize, name: &str) -> HighsResult {
        let num_col = self.model.lp.num_col;
        set_name(&mut self.model.lp.col_names, "column", num_col, col, name)?;
        Ok(HighsStatus::Ok)
    }

    pub fn pass_row_name(&mut self, row: usize, name: &str) -> HighsResult {
        let num_row = self.model.lp.num_row;
        set_name(&mut self.model.lp.row_names, "row", num_row, row, name)?;
        Ok(HighsStatus::Ok)
    }

    pub fn add_col(
        &mut self,
        cost: f64,
        lower: f64,
        upper: f64,
        indices: &[usize],
        values: &[f64],
    ) -> HighsResult {
        self.add_cols(&[cost], &[lower], &[upper], &[0], indices, values)
    }

    /// Append `costs.len()` columns; `starts` has one offset per column.
    pub fn add_cols(
        &mut self,
        costs: &[f64],
        lower: &[f64],
        upper: &[f64],
        starts: &[usize],
        indices: &[usize],
        values: &[f64],
    ) -> HighsResult {
        let num_new = costs.len();
        check_len("lower bounds", num_new, lower.len())?;
        check_len("upper bounds", num_new, upper.len())?;
        if num_new == 0 {
            return Ok(HighsStatus::Ok);
        }
        let num_col = self.model.lp.num_col;
        let mut costs = costs.to_vec();
        let mut lower = lower.to_vec();
        let mut upper = upper.to_vec();
        let mut block = HighsSparseMatrix::from_vectors(
            MatrixFormat::Colwise,
            num_new,
            self.model.lp.num_row,
            starts,
            indices,
            values,
        );

        let mut status = assess_costs(&mut costs, &self.options)?;
        status = status.worse(assess_bounds(
            "column",
            num_col,
            &mut lower,
            &mut upper,
            &self.options,
        )?);
        status = status.worse(assess_matrix(&mut block, &self.options)?);

        if self.basis.valid {
            self.basis.col_status.extend(
                lower
                    .iter()
                    .zip(&upper)
                    .map(|(&l, &u)| HighsBasisStatus::nonbasic_for_bounds(l, u)),
            );
        }
        let lp = &mut self.model.lp;
        lp.num_col += num_new;
        lp.col_cost.extend(costs);
        lp.col_lower.extend(lower);
        lp.col_upper.extend(upper);
        lp.a_matrix.add_cols(&block);
        if !lp.integrality.is_empty() {
            lp.integrality.resize(lp.num_col, HighsVarType::Continuous);
        }
        if !lp.col_names.is_empty() {
            lp.col_names.resize(lp.num_col, String::new());
        }
        if self.model.hessian.dim > 0 {
            self.model.hessian.extend_dim(num_new);
        }
        self.pending_solution = None;
        self.model_changed();
        debug!(
            component = "highs",
            operation = "add_cols",
            status = %status,
            num_new = num_new,
            num_col = self.model.lp.num_col,
            "Columns added"
        );
        Ok(status)
    }

    pub fn add_row(&mut self, lower: f64, upper: f64, indices: &[usize], values: &[f64]) -> HighsResult {
        self.add_rows(&[lower], &[upper], &[0], indices, values)
    }

    /// Append `lower.len()` rows; `starts` has one offset per row.
    pub fn add_rows(
        &mut self,
        lower: &[f64],
        upper: &[f64],
        starts: &[usize],
        indices: &[usize],
        values: &[f64],
    ) -> HighsResult {
        let num_new = lower.len();
        check_len("upper bounds", num_new, upper.len())?;
        if num_new == 0 {
            return Ok(HighsStatus::Ok);
        }
        let num_row = self.model.lp.num_row;
        let mut lower = lower.to_vec();
        let mut upper = upper.to_vec();
        let mut block = HighsSparseMatrix::from_vectors(
            MatrixFormat::Rowwise,
            self.model.lp.num_col,
            num_new,
            starts,
            indices,
            values,
        );

        let mut status = assess_bounds("row", num_row, &mut lower, &mut upper, &self.options)?;
        status = status.worse(assess_matrix(&mut block, &self.options)?);

        if self.basis.valid {
            self.basis
                .row_status
                .extend(std::iter::repeat_n(HighsBasisStatus::Basic, num_new));
        }
        let lp = &mut self.model.lp;
        lp.num_row += num_new;
        lp.row_lower.extend(lower);
        lp.row_upper.extend(upper);
        lp.a_matrix.add_rows(&block);
        if !lp.row_names.is_empty() {
            lp.row_names.resize(lp.num_row, String::new());
        }
        self.pending_solution = None;
        self.model_changed();
        debug!(
            component = "highs",
            operation = "add_rows",
            status = %status,
            num_new = num_new,
            num_row = self.model.lp.num_row,
            "Rows added"
        );
        Ok(status)
    }

    /// Add a column with zero cost and no matrix entries.
    pub fn add_var(&mut self, lower: f64, upper: f64) -> HighsResult {
        self.add_vars(&[lower], &[upper])
    }

    pub fn add_vars(&mut self, lower: &[f64], upper: &[f64]) -> HighsResult {
        let num_new = lower.len();
        self.add_cols(
            &vec![0.0; num_new],
            lower,
            upper,
            &vec![0; num_new],
            &[],
            &[],
        )
    }

    pub fn change_col_cost(&mut self, col: usize, cost: f64) -> HighsResult {
        self.change_cols_cost(&[col], &[cost])
    }

    pub fn change_cols_cost(&mut self, indices: &[usize], costs: &[f64]) -> HighsResult {
        check_len("costs", indices.len(), costs.len())?;
        index_mask("column", indices, self.model.lp.num_col)?;
        let mut costs = costs.to_vec();
        let status = assess_costs(&mut costs, &self.options)?;
        for (&col, cost) in indices.iter().zip(costs) {
            self.model.lp.col_cost[col] = cost;
        }
        self.model_changed();
        Ok(status)
    }

    pub fn change_col_bounds(&mut self, col: usize, lower: f64, upper: f64) -> HighsResult {
        self.change_cols_bounds(&[col], &[lower], &[upper])
    }

    pub fn change_cols_bounds(&mut self, indices: &[usize], lower: &[f64], upper: &[f64]) -> HighsResult {
        check_len("lower bounds", indices.len(), lower.len())?;
        check_len("upper bounds", indices.len(), upper.len())?;
        index_mask("column", indices, self.model.lp.num_col)?;
        let (lower, upper, status) = self.assess_bound_set("column", indices, lower, upper)?;
        for ((&col, lo), up) in indices.iter().zip(lower).zip(upper) {
            self.model.lp.col_lower[col] = lo;
            self.model.lp.col_upper[col] = up;
            if self.basis.valid {
                let current = self.basis.col_status[col];
                let stale = (current == HighsBasisStatus::Lower && !lo.is_finite())
                    || (current == HighsBasisStatus::Upper && !up.is_finite())
                    || (current == HighsBasisStatus::Zero && (lo.is_finite() || up.is_finite()));
                if stale {
                    self.basis.col_status[col] = HighsBasisStatus::nonbasic_for_bounds(lo, up);
                }
            }
        }
        self.model_changed();
        Ok(status)
    }

    pub fn change_row_bounds(&mut self, row: usize, lower: f64, upper: f64) -> HighsResult {
        self.change_rows_bounds(&[row], &[lower], &[upper])
    }

    pub fn change_rows_bounds(&mut self, indices: &[usize], lower: &[f64], upper: &[f64]) -> HighsResult {
        check_len("lower bounds", indices.len(), lower.len())?;
        check_len("upper bounds", indices.len(), upper.len())?;
        index_mask("row", indices, self.model.lp.num_row)?;
        let (lower, upper, status) = self.assess_bound_set("row", indices, lower, upper)?;
        for ((&row, lo), up) in indices.iter().zip(lower).zip(upper) {
            self.model.lp.row_lower[row] = lo;
            self.model.lp.row_upper[row] = up;
        }
        self.model_changed();
        Ok(status)
    }

    fn assess_bound_set(
        &self,
        kind: &'static str,
        indices: &[usize],
        lower: &[f64],
        upper: &[f64],
    ) -> Result<(Vec<f64>, Vec<f64>, HighsStatus), NativeError> {
        let mut lower = lower.to_vec();
        let mut upper = upper.to_vec();
        let mut status = HighsStatus::Ok;
        for (k, &index) in indices.iter().enumerate() {
            status = status.worse(assess_bounds(
                kind,
                index,
                &mut lower[k..=k],
                &mut upper[k..=k],
                &self.options,
            )?);
        }
        Ok((lower, upper, status))
    }

    pub fn change_col_integrality(&mut self, col: usize, integrality: HighsVarType) -> HighsResult {
        self.change_cols_integrality(&[col], &[integrality])
    }

    pub fn change_cols_integrality(
        &mut self,
        indices: &[usize],
        integrality: &[HighsVarType],
    ) -> HighsResult {
        check_len("integrality", indices.len(), integrality.len())?;
        let lp = &mut self.model.lp;
        index_mask("column", indices, lp.num_col)?;
        if lp.integrality.is_empty() {
            lp.integrality = vec![HighsVarType::Continuous; lp.num_col];
        }
        for (&col, &var_type) in indices.iter().zip(integrality) {
            lp.integrality[col] = var_type;
        }
        self.model_changed();
        Ok(HighsStatus::Ok)
    }

    /// Set one matrix coefficient. Values at or below `small_matrix_value`
    /// in magnitude remove the entry.
    pub fn change_coeff(&mut self, row: usize, col: usize, value: f64) -> HighsResult {
        let lp = &mut self.model.lp;
        index_mask("row", &[row], lp.num_row)?;
        index_mask("column", &[col], lp.num_col)?;
        if value.is_nan() || value.abs() >= self.options.large_matrix_value() {
            return Err(HighsError::LargeMatrixValue {
                vector: col,
                index: row,
                value,
            }
            .into());
        }
        let mut status = HighsStatus::Ok;
        let mut value = value;
        if value != 0.0 && value.abs() <= self.options.small_matrix_value() {
            warn!(
                component = "highs",
                operation = "change_coeff",
                status = "warning",
                row = row,
                col = col,
                value = value,
                "Small coefficient treated as zero"
            );
            value = 0.0;
            status = HighsStatus::Warning;
        }
        lp.a_matrix.change_coeff(row, col, value)?;
        self.model_changed();
        Ok(status)
    }

    pub fn change_objective_sense(&mut self, sense: ObjSense) -> HighsResult {
        if self.model.lp.sense != sense {
            self.model.lp.sense = sense;
            self.model_changed();
        }
        Ok(HighsStatus::Ok)
    }

    /// Change the objective offset. The model status is kept and reported
    /// objective values shift by the difference.
    pub fn change_objective_offset(&mut self, offset: f64) -> HighsResult {
        let delta = offset - self.model.lp.offset;
        self.model.lp.offset = offset;
        self.objective_value += delta;
        self.info.objective_function_value += delta;
        self.native_synced = false;
        Ok(HighsStatus::Ok)
    }

    pub fn delete_cols(&mut self, indices: &[usize]) -> HighsResult {
        let mask = index_mask("column", indices, self.model.lp.num_col)?;
        let lp = &mut self.model.lp;
        retain_unmasked(&mut lp.col_cost, &mask);
        retain_unmasked(&mut lp.col_lower, &mask);
        retain_unmasked(&mut lp.col_upper, &mask);
        if !lp.integrality.is_empty() {
            retain_unmasked(&mut lp.integrality, &mask);
        }
        if !lp.col_names.is_empty() {
            retain_unmasked(&mut lp.col_names, &mask);
        }
        lp.a_matrix.delete_cols(&mask);
        lp.num_col = lp.col_cost.len();
        if self.model.hessian.dim > 0 {
            self.model.hessian.delete_vars(&mask);
        }
        self.after_delete("delete_cols");
        Ok(HighsStatus::Ok)
    }

    /// Same as [`Highs::delete_cols`].
    pub fn delete_vars(&mut self, indices: &[usize]) -> HighsResult {
        self.delete_cols(indices)
    }

    pub fn delete_rows(&mut self, indices: &[usize]) -> HighsResult {
        let mask = index_mask("row", indices, self.model.lp.num_row)?;
        let lp = &mut self.model.lp;
        retain_unmasked(&mut lp.row_lower, &mask);
        retain_unmasked(&mut lp.row_upper, &mask);
        if !lp.row_names.is_empty() {
            retain_unmasked(&mut lp.row_names, &mask);
        }
        lp.a_matrix.delete_rows(&mask);
        lp.num_row = lp.row_lower.len();
        self.after_delete("delete_rows");
        Ok(HighsStatus::Ok)
    }

    fn after_delete(&mut self, operation: &'static str) {
        self.basis.invalidate();
        self.pending_solution = None;
        self.model_changed();
        debug!(
            component = "highs",
            operation = operation,
            status = "ok",
            num_col = self.model.lp.num_col,
            num_row = self.model.lp.num_row,
            "Deleted from model"
        );
    }
}

fn set_name(
    names: &mut Vec<String>,
    kind: &'static str,
    len: usize,
    index: usize,
    name: &str,
) -> Result<(), NativeError> {
    if index >= len {
        return Err(HighsError::IndexOutOfRange { kind, index, len }.into());
    }
    if names
        .iter()
        .enumerate()
        .any(|(other, existing)| other != index && existing == name)
    {
        return Err(HighsError::DuplicateName {
            kind,
            name: name.to_string(),
        }
        .into());
    }
    if names.is_empty() {
        *names = vec![String::new(); len];
    }
    names[index] = name.to_string();
    Ok(())
}
