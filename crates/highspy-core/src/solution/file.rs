//! Basis and solution files in the layout HiGHS writes.
//!
//! A basis file is a version line, `Valid` or `None`, then `# Columns n`
//! and `# Rows m` sections of `name status` lines. A raw solution file
//! holds the model status, then primal and dual sections of `name value`
//! lines. Entries are matched to the model by name when it has names and
//! by position otherwise.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use tracing::warn;

use super::{HighsBasis, HighsSolution};
use crate::enums::{HighsBasisStatus, HighsStatus};
use crate::error::HighsError;
use crate::lp::HighsLp;

const BASIS_VERSION: &str = "v2";
const BASIS_VERSION_DEPRECATED: &str = "v1";

/// Non-blank lines of a file, remembering the current line number.
struct Lines<'a> {
    kind: &'static str,
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
    line: usize,
}

impl<'a> Lines<'a> {
    fn new(kind: &'static str, text: &'a str) -> Self {
        Lines {
            kind,
            lines: text.lines().enumerate(),
            line: 0,
        }
    }

    fn error(&self, reason: impl Into<String>) -> HighsError {
        HighsError::FileParse {
            kind: self.kind,
            line: self.line,
            reason: reason.into(),
        }
    }

    fn next(&mut self) -> Option<&'a str> {
        for (number, raw) in &mut self.lines {
            let line = raw.trim();
            if !line.is_empty() {
                self.line = number + 1;
                return Some(line);
            }
        }
        None
    }

    fn expect(&mut self) -> Result<&'a str, HighsError> {
        self.next()
            .ok_or_else(|| self.error("unexpected end of file"))
    }

    /// Parse a `# <section> <count>` line.
    fn section(&self, line: &str, section: &str) -> Result<i64, HighsError> {
        let mut parts = line.split_whitespace();
        match (parts.next(), parts.next(), parts.next().map(str::parse::<i64>)) {
            (Some("#"), Some(name), Some(Ok(count))) if name == section => Ok(count),
            _ => Err(self.error(format!(
                "expected \"# {section} <count>\", got \"{line}\""
            ))),
        }
    }

    fn expect_section(&mut self, section: &str) -> Result<usize, HighsError> {
        let line = self.expect()?;
        let count = self.section(line, section)?;
        usize::try_from(count).map_err(|_| self.error(format!("negative {section} count")))
    }

    /// Parse a `name value` line.
    fn entry<T: FromStr>(&mut self) -> Result<(&'a str, T), HighsError> {
        let line = self.expect()?;
        let mut parts = line.split_whitespace();
        match (parts.next(), parts.next().map(str::parse::<T>)) {
            (Some(name), Some(Ok(value))) => Ok((name, value)),
            _ => Err(self.error(format!("expected \"name value\", got \"{line}\""))),
        }
    }
}

/// Position lookup for column or row names. Duplicated names map to `None`.
struct NameIndex<'a> {
    kind: &'static str,
    positions: Option<HashMap<&'a str, Option<usize>>>,
}

impl<'a> NameIndex<'a> {
    fn new(kind: &'static str, names: &'a [String]) -> Self {
        let positions = (!names.is_empty()).then(|| {
            let mut positions = HashMap::with_capacity(names.len());
            for (position, name) in names.iter().enumerate() {
                positions
                    .entry(name.as_str())
                    .and_modify(|slot| *slot = None)
                    .or_insert(Some(position));
            }
            positions
        });
        NameIndex { kind, positions }
    }

    /// Index for the entry `name` read at `position`.
    fn resolve(&self, name: &str, position: usize) -> Result<usize, HighsError> {
        let Some(positions) = &self.positions else {
            return Ok(position);
        };
        match positions.get(name) {
            Some(Some(index)) => Ok(*index),
            Some(None) => Err(HighsError::DuplicateName {
                kind: self.kind,
                name: name.to_string(),
            }),
            None => Err(HighsError::UnknownName {
                kind: self.kind,
                name: name.to_string(),
            }),
        }
    }
}

fn check_count(what: &'static str, expected: usize, got: usize) -> Result<(), HighsError> {
    if expected != got {
        return Err(HighsError::LengthMismatch {
            what,
            expected,
            got,
        });
    }
    Ok(())
}

fn basis_status(lines: &Lines<'_>, code: i32) -> Result<HighsBasisStatus, HighsError> {
    HighsBasisStatus::from_code(code)
        .ok_or_else(|| lines.error(format!("illegal basis status {code}")))
}

fn name_or(names: &[String], prefix: char, index: usize) -> String {
    names
        .get(index)
        .filter(|name| !name.is_empty())
        .cloned()
        .unwrap_or_else(|| format!("{prefix}{index}"))
}

fn read_text(path: &Path) -> Result<String, HighsError> {
    fs::read_to_string(path).map_err(|err| HighsError::Io {
        path: path.display().to_string(),
        reason: err.to_string(),
    })
}

impl HighsBasis {
    /// Render the basis for `lp`. Columns and rows without names are
    /// written as `c<i>` and `r<i>`.
    pub fn to_file_string(&self, lp: &HighsLp) -> String {
        let mut out = format!("HiGHS_basis_file {BASIS_VERSION}\n");
        if !self.valid {
            out.push_str("None\n");
            return out;
        }
        out.push_str("Valid\n");
        out.push_str(&format!("# Columns {}\n", self.col_status.len()));
        for (col, status) in self.col_status.iter().enumerate() {
            let name = name_or(&lp.col_names, 'c', col);
            out.push_str(&format!("{name} {}\n", status.code()));
        }
        out.push_str(&format!("# Rows {}\n", self.row_status.len()));
        for (row, status) in self.row_status.iter().enumerate() {
            let name = name_or(&lp.row_names, 'r', row);
            out.push_str(&format!("{name} {}\n", status.code()));
        }
        out
    }

    /// Parse a basis file for `lp`.
    ///
    /// A `None` basis parses to an invalid basis. The deprecated `v1`
    /// layout, one line of status codes per section, is accepted with a
    /// warning.
    pub fn parse_str(text: &str, lp: &HighsLp) -> Result<(Self, HighsStatus), HighsError> {
        let mut lines = Lines::new("basis", text);
        let header = lines.expect()?;
        let version = header.split_whitespace().nth(1).unwrap_or_default();
        let status = match version {
            BASIS_VERSION => HighsStatus::Ok,
            BASIS_VERSION_DEPRECATED => {
                warn!(
                    component = "basis",
                    operation = "parse",
                    status = "warning",
                    version = version,
                    "Basis file format is deprecated"
                );
                HighsStatus::Warning
            }
            _ => return Err(lines.error(format!("unsupported basis file \"{header}\""))),
        };
        let deprecated = status == HighsStatus::Warning;

        match lines.expect()? {
            "None" => return Ok((HighsBasis::new(), status)),
            "Valid" => {}
            other => return Err(lines.error(format!("expected Valid or None, got \"{other}\""))),
        }

        let num_col = lines.expect_section("Columns")?;
        check_count("basis columns", lp.num_col, num_col)?;
        let col_status = if deprecated {
            Self::read_codes(&mut lines, num_col)?
        } else {
            Self::read_named(&mut lines, &NameIndex::new("column", &lp.col_names), num_col)?
        };

        let num_row = lines.expect_section("Rows")?;
        check_count("basis rows", lp.num_row, num_row)?;
        let row_status = if deprecated {
            Self::read_codes(&mut lines, num_row)?
        } else {
            Self::read_named(&mut lines, &NameIndex::new("row", &lp.row_names), num_row)?
        };

        let basis = HighsBasis {
            valid: true,
            alien: false,
            was_alien: false,
            debug_origin_name: "HiGHS_basis_file".to_string(),
            col_status,
            row_status,
            ..HighsBasis::default()
        };
        Ok((basis, status))
    }

    fn read_named(
        lines: &mut Lines<'_>,
        names: &NameIndex<'_>,
        count: usize,
    ) -> Result<Vec<HighsBasisStatus>, HighsError> {
        let mut statuses = vec![HighsBasisStatus::Nonbasic; count];
        for position in 0..count {
            let (name, code) = lines.entry::<i32>()?;
            let index = names.resolve(name, position)?;
            statuses[index] = basis_status(lines, code)?;
        }
        Ok(statuses)
    }

    fn read_codes(lines: &mut Lines<'_>, count: usize) -> Result<Vec<HighsBasisStatus>, HighsError> {
        if count == 0 {
            return Ok(Vec::new());
        }
        let line = lines.expect()?;
        let statuses = line
            .split_whitespace()
            .map(|code| {
                code.parse::<i32>()
                    .map_err(|_| lines.error(format!("illegal basis status \"{code}\"")))
                    .and_then(|code| basis_status(lines, code))
            })
            .collect::<Result<Vec<_>, _>>()?;
        check_count("basis statuses", count, statuses.len())?;
        Ok(statuses)
    }

    pub fn read_file(path: impl AsRef<Path>, lp: &HighsLp) -> Result<(Self, HighsStatus), HighsError> {
        Self::parse_str(&read_text(path.as_ref())?, lp)
    }

    pub fn write_file(&self, path: impl AsRef<Path>, lp: &HighsLp) -> Result<(), HighsError> {
        let path = path.as_ref();
        fs::write(path, self.to_file_string(lp)).map_err(|err| HighsError::Io {
            path: path.display().to_string(),
            reason: err.to_string(),
        })
    }
}

impl HighsSolution {
    /// Parse a raw or sparse solution file for `lp`.
    ///
    /// Missing row values are computed from the column values. A file
    /// without primal values, or with row values for a different number of
    /// rows, parses with a warning. The basis section, if any, is not read.
    pub fn parse_str(text: &str, lp: &HighsLp) -> Result<(Self, HighsStatus), HighsError> {
        let mut lines = Lines::new("solution", text);
        let cols = NameIndex::new("column", &lp.col_names);
        let rows = NameIndex::new("row", &lp.row_names);

        let first = lines.expect()?;
        if first.starts_with("=obj=") {
            return Self::parse_miplib(lines, &cols, lp);
        }
        if first != "Model status" {
            return Err(lines.error(format!("expected \"Model status\", got \"{first}\"")));
        }
        lines.expect()?;
        let heading = lines.expect()?;
        if heading != "# Primal solution values" {
            return Err(lines.error(format!("expected primal solution values, got \"{heading}\"")));
        }
        if lines.expect()? == "None" {
            return Ok((HighsSolution::new(), HighsStatus::Warning));
        }
        let objective = lines.expect()?;
        if !objective.starts_with("Objective") {
            return Err(lines.error(format!("expected objective, got \"{objective}\"")));
        }

        let mut solution = HighsSolution {
            value_valid: true,
            col_value: vec![0.0; lp.num_col],
            ..HighsSolution::default()
        };
        let header = lines.expect()?;
        let num_col = lines.section(header, "Columns")?;
        if num_col <= 0 {
            // Sparse: only nonzero column values, each with its index.
            for _ in 0..num_col.unsigned_abs() {
                let line = lines.expect()?;
                let mut parts = line.split_whitespace();
                let (Some(name), Some(Ok(value)), Some(Ok(position))) = (
                    parts.next(),
                    parts.next().map(str::parse::<f64>),
                    parts.next().map(str::parse::<usize>),
                ) else {
                    return Err(lines.error(format!("expected \"name value index\", got \"{line}\"")));
                };
                let col = cols.resolve(name, position)?;
                if col >= lp.num_col {
                    return Err(HighsError::IndexOutOfRange {
                        kind: "column",
                        index: col,
                        len: lp.num_col,
                    });
                }
                solution.col_value[col] = value;
            }
            solution.row_value = lp.a_matrix.product(&solution.col_value);
            return Ok((solution, HighsStatus::Ok));
        }
        check_count("solution columns", lp.num_col, num_col as usize)?;
        Self::read_values(&mut lines, &cols, &mut solution.col_value)?;

        let mut status = HighsStatus::Ok;
        let Some(header) = lines.next() else {
            solution.row_value = lp.a_matrix.product(&solution.col_value);
            return Ok((solution, status));
        };
        let num_row = usize::try_from(lines.section(header, "Rows")?)
            .map_err(|_| lines.error("negative Rows count"))?;
        if num_row == lp.num_row {
            solution.row_value = vec![0.0; num_row];
            Self::read_values(&mut lines, &rows, &mut solution.row_value)?;
        } else {
            for _ in 0..num_row {
                lines.entry::<f64>()?;
            }
            warn!(
                component = "solution",
                operation = "parse",
                status = "warning",
                file_rows = num_row,
                num_row = lp.num_row,
                "Row values ignored"
            );
            solution.row_value = lp.a_matrix.product(&solution.col_value);
            status = HighsStatus::Warning;
        }

        if lines.next() != Some("# Dual solution values") || num_row != lp.num_row {
            return Ok((solution, status));
        }
        if lines.expect()? == "None" {
            return Ok((solution, status));
        }
        let num_col = lines.expect_section("Columns")?;
        check_count("dual columns", lp.num_col, num_col)?;
        solution.col_dual = vec![0.0; num_col];
        Self::read_values(&mut lines, &cols, &mut solution.col_dual)?;
        let num_row = lines.expect_section("Rows")?;
        check_count("dual rows", lp.num_row, num_row)?;
        solution.row_dual = vec![0.0; num_row];
        Self::read_values(&mut lines, &rows, &mut solution.row_dual)?;
        solution.dual_valid = true;
        Ok((solution, status))
    }

    /// MIPLIB layout: `=obj= <value>` then `name value` for nonzero columns.
    fn parse_miplib(
        mut lines: Lines<'_>,
        cols: &NameIndex<'_>,
        lp: &HighsLp,
    ) -> Result<(Self, HighsStatus), HighsError> {
        if lp.col_names.is_empty() {
            return Err(lines.error("MIPLIB solutions need column names in the model"));
        }
        let mut col_value = vec![0.0; lp.num_col];
        while let Some(line) = lines.next() {
            let mut parts = line.split_whitespace();
            let (Some(name), Some(Ok(value))) = (parts.next(), parts.next().map(str::parse::<f64>))
            else {
                return Err(lines.error(format!("expected \"name value\", got \"{line}\"")));
            };
            col_value[cols.resolve(name, 0)?] = value;
        }
        let solution = HighsSolution {
            value_valid: true,
            row_value: lp.a_matrix.product(&col_value),
            col_value,
            ..HighsSolution::default()
        };
        Ok((solution, HighsStatus::Ok))
    }

    fn read_values(
        lines: &mut Lines<'_>,
        names: &NameIndex<'_>,
        values: &mut [f64],
    ) -> Result<(), HighsError> {
        for position in 0..values.len() {
            let (name, value) = lines.entry::<f64>()?;
            values[names.resolve(name, position)?] = value;
        }
        Ok(())
    }

    pub fn read_file(path: impl AsRef<Path>, lp: &HighsLp) -> Result<(Self, HighsStatus), HighsError> {
        Self::parse_str(&read_text(path.as_ref())?, lp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::MatrixFormat;
    use crate::matrix::HighsSparseMatrix;

    /// min x + y, x + 2y >= 2, both columns in [0, 4].
    fn lp(named: bool) -> HighsLp {
        HighsLp {
            num_col: 2,
            num_row: 1,
            col_cost: vec![1.0, 1.0],
            col_lower: vec![0.0, 0.0],
            col_upper: vec![4.0, 4.0],
            row_lower: vec![2.0],
            row_upper: vec![f64::INFINITY],
            a_matrix: HighsSparseMatrix::from_parts(
                MatrixFormat::Colwise,
                2,
                1,
                vec![0, 1, 2],
                vec![0, 0],
                vec![1.0, 2.0],
            ),
            col_names: if named {
                vec!["x".to_string(), "y".to_string()]
            } else {
                Vec::new()
            },
            row_names: if named {
                vec!["cap".to_string()]
            } else {
                Vec::new()
            },
            ..HighsLp::default()
        }
    }

    const RAW_SOLUTION: &str = "Model status
Optimal

# Primal solution values
Feasible
Objective 1
# Columns 2
y 1
x 0
# Rows 1
cap 2

# Dual solution values
Feasible
# Columns 2
x 0.5
y 0
# Rows 1
cap 0.5

# Basis
HiGHS_basis_file v2
Valid
";

    #[test]
    fn test_basis_written_file_reads_back() {
        let lp = lp(true);
        let basis = HighsBasis {
            valid: true,
            col_status: vec![HighsBasisStatus::Lower, HighsBasisStatus::Basic],
            row_status: vec![HighsBasisStatus::Lower],
            ..HighsBasis::default()
        };
        let text = basis.to_file_string(&lp);
        assert!(text.starts_with("HiGHS_basis_file v2\nValid\n# Columns 2\nx 0\ny 1\n"));

        let (read, status) = HighsBasis::parse_str(&text, &lp).unwrap();
        assert_eq!(status, HighsStatus::Ok);
        assert!(read.valid);
        assert!(!read.alien);
        assert_eq!(read.col_status, basis.col_status);
        assert_eq!(read.row_status, basis.row_status);
    }

    #[test]
    fn test_basis_matches_names_not_order() {
        let text = "HiGHS_basis_file v2\nValid\n# Columns 2\ny 0\nx 1\n# Rows 1\ncap 0\n";
        let (basis, _) = HighsBasis::parse_str(text, &lp(true)).unwrap();
        assert_eq!(
            basis.col_status,
            vec![HighsBasisStatus::Basic, HighsBasisStatus::Lower]
        );

        let err = HighsBasis::parse_str(&text.replace("y 0", "z 0"), &lp(true)).unwrap_err();
        assert_eq!(err.code(), "NAME_UNKNOWN");
    }

    #[test]
    fn test_basis_none_and_deprecated_layout() {
        let (basis, status) = HighsBasis::parse_str("HiGHS_basis_file v2\nNone\n", &lp(false)).unwrap();
        assert!(!basis.valid);
        assert_eq!(status, HighsStatus::Ok);
        assert_eq!(
            HighsBasis::new().to_file_string(&lp(false)),
            "HiGHS_basis_file v2\nNone\n"
        );

        let text = "HiGHS v1\nValid\n# Columns 2\n1 0\n# Rows 1\n0\n";
        let (basis, status) = HighsBasis::parse_str(text, &lp(false)).unwrap();
        assert_eq!(status, HighsStatus::Warning);
        assert_eq!(basis.row_status, vec![HighsBasisStatus::Lower]);
    }

    #[test]
    fn test_basis_rejects_wrong_dimensions() {
        let text = "HiGHS_basis_file v2\nValid\n# Columns 3\n";
        let err = HighsBasis::parse_str(text, &lp(false)).unwrap_err();
        assert_eq!(err.code(), "LENGTH_MISMATCH");

        let err = HighsBasis::parse_str("HiGHS_basis_file v9\nValid\n", &lp(false)).unwrap_err();
        assert_eq!(err.code(), "FILE_PARSE");
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn test_raw_solution_by_name() {
        let (solution, status) = HighsSolution::parse_str(RAW_SOLUTION, &lp(true)).unwrap();
        assert_eq!(status, HighsStatus::Ok);
        assert!(solution.value_valid);
        assert!(solution.dual_valid);
        assert_eq!(solution.col_value, vec![0.0, 1.0]);
        assert_eq!(solution.row_value, vec![2.0]);
        assert_eq!(solution.col_dual, vec![0.5, 0.0]);
        assert_eq!(solution.row_dual, vec![0.5]);
    }

    #[test]
    fn test_raw_solution_by_position() {
        let (solution, _) = HighsSolution::parse_str(RAW_SOLUTION, &lp(false)).unwrap();
        assert_eq!(solution.col_value, vec![1.0, 0.0]);
        assert_eq!(solution.col_dual, vec![0.5, 0.0]);
    }

    #[test]
    fn test_solution_without_rows_computes_activities() {
        let text = "Model status\nOptimal\n# Primal solution values\nFeasible\nObjective 3\n# Columns 2\nx 1\ny 2\n";
        let (solution, status) = HighsSolution::parse_str(text, &lp(false)).unwrap();
        assert_eq!(status, HighsStatus::Ok);
        assert_eq!(solution.row_value, vec![5.0]);
        assert!(!solution.dual_valid);

        let other_rows = format!("{text}# Rows 2\nr0 1\nr1 1\n");
        let (solution, status) = HighsSolution::parse_str(&other_rows, &lp(false)).unwrap();
        assert_eq!(status, HighsStatus::Warning);
        assert_eq!(solution.row_value, vec![5.0]);
    }

    #[test]
    fn test_sparse_and_miplib_solutions() {
        let sparse = "Model status\nOptimal\n# Primal solution values\nFeasible\nObjective 2\n# Columns -1\ny 1 1\n";
        let (solution, _) = HighsSolution::parse_str(sparse, &lp(false)).unwrap();
        assert_eq!(solution.col_value, vec![0.0, 1.0]);
        assert_eq!(solution.row_value, vec![2.0]);

        let miplib = "=obj= 1\nx 2\n";
        let (solution, _) = HighsSolution::parse_str(miplib, &lp(true)).unwrap();
        assert_eq!(solution.col_value, vec![2.0, 0.0]);
        assert!(HighsSolution::parse_str(miplib, &lp(false)).is_err());
    }

    #[test]
    fn test_solution_without_primal_values() {
        let text = "Model status\nInfeasible\n# Primal solution values\nNone\n";
        let (solution, status) = HighsSolution::parse_str(text, &lp(false)).unwrap();
        assert_eq!(status, HighsStatus::Warning);
        assert!(!solution.value_valid);

        let err = HighsSolution::parse_str("nonsense\n", &lp(false)).unwrap_err();
        assert_eq!(err.code(), "FILE_PARSE");
    }
}
