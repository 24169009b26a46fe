//! Typed registry of solver options.
//!
//! Every option has a fixed type and a default matching the HiGHS library.
//! Numeric options carry an inclusive range and string options may restrict
//! their value to an allowed set. A rejected assignment leaves the registry
//! unchanged.

mod file;

use std::fmt;

use tracing::debug;

use crate::consts::kHighsInf;
use crate::enums::HighsOptionType;
use crate::error::HighsError;

/// Value of a single option.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Bool(bool),
    Int(i32),
    Double(f64),
    String(String),
}

impl OptionValue {
    pub fn option_type(&self) -> HighsOptionType {
        match self {
            OptionValue::Bool(_) => HighsOptionType::Bool,
            OptionValue::Int(_) => HighsOptionType::Int,
            OptionValue::Double(_) => HighsOptionType::Double,
            OptionValue::String(_) => HighsOptionType::String,
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Bool(v) => write!(f, "{}", v),
            OptionValue::Int(v) => write!(f, "{}", v),
            OptionValue::Double(v) => write!(f, "{:?}", v),
            OptionValue::String(v) => f.write_str(v),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

impl From<i32> for OptionValue {
    fn from(value: i32) -> Self {
        OptionValue::Int(value)
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        OptionValue::Double(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::String(value.to_string())
    }
}

#[derive(Debug, Clone, Copy)]
enum OptionKind {
    Bool {
        default: bool,
    },
    Int {
        default: i32,
        min: i32,
        max: i32,
    },
    Double {
        default: f64,
        min: f64,
        max: f64,
    },
    String {
        default: &'static str,
        allowed: &'static [&'static str],
    },
}

#[derive(Debug, Clone, Copy)]
struct OptionSpec {
    name: &'static str,
    description: &'static str,
    kind: OptionKind,
}

const OFF_CHOOSE_ON: &[&str] = &["off", "choose", "on"];

const fn bool_option(name: &'static str, description: &'static str, default: bool) -> OptionSpec {
    OptionSpec {
        name,
        description,
        kind: OptionKind::Bool { default },
    }
}

const fn int_option(
    name: &'static str,
    description: &'static str,
    default: i32,
    min: i32,
    max: i32,
) -> OptionSpec {
    OptionSpec {
        name,
        description,
        kind: OptionKind::Int { default, min, max },
    }
}

const fn double_option(
    name: &'static str,
    description: &'static str,
    default: f64,
    min: f64,
    max: f64,
) -> OptionSpec {
    OptionSpec {
        name,
        description,
        kind: OptionKind::Double { default, min, max },
    }
}

const fn string_option(
    name: &'static str,
    description: &'static str,
    default: &'static str,
    allowed: &'static [&'static str],
) -> OptionSpec {
    OptionSpec {
        name,
        description,
        kind: OptionKind::String { default, allowed },
    }
}

static OPTION_SPECS: &[OptionSpec] = &[
    string_option("presolve", "Presolve option", "choose", OFF_CHOOSE_ON),
    string_option(
        "solver",
        "Solver option",
        "choose",
        &["choose", "simplex", "ipm", "pdlp"],
    ),
    string_option("parallel", "Parallel option", "choose", OFF_CHOOSE_ON),
    string_option("run_crossover", "Run IPM crossover", "on", OFF_CHOOSE_ON),
    string_option("ranging", "Compute cost, bound, RHS and basic solution ranging", "off", &["off", "on"]),
    double_option("time_limit", "Time limit (seconds)", kHighsInf, 0.0, kHighsInf),
    double_option(
        "infinite_cost",
        "Limit on |cost coefficient|: values greater than or equal to this will be treated as infinite",
        1e20,
        1e15,
        kHighsInf,
    ),
    double_option(
        "infinite_bound",
        "Limit on |constraint bound|: values greater than or equal to this will be treated as infinite",
        1e20,
        1e15,
        kHighsInf,
    ),
    double_option(
        "small_matrix_value",
        "Lower limit on |matrix entries|: values less than or equal to this will be treated as zero",
        1e-9,
        1e-12,
        kHighsInf,
    ),
    double_option(
        "large_matrix_value",
        "Upper limit on |matrix entries|: values greater than or equal to this will be treated as infinite",
        1e15,
        1.0,
        kHighsInf,
    ),
    double_option(
        "primal_feasibility_tolerance",
        "Primal feasibility tolerance",
        1e-7,
        1e-10,
        kHighsInf,
    ),
    double_option(
        "dual_feasibility_tolerance",
        "Dual feasibility tolerance",
        1e-7,
        1e-10,
        kHighsInf,
    ),
    double_option(
        "ipm_optimality_tolerance",
        "IPM optimality tolerance",
        1e-8,
        1e-12,
        kHighsInf,
    ),
    double_option(
        "objective_bound",
        "Objective bound for termination of the dual simplex solver",
        kHighsInf,
        -kHighsInf,
        kHighsInf,
    ),
    double_option(
        "objective_target",
        "Objective target for termination of the MIP solver",
        -kHighsInf,
        -kHighsInf,
        kHighsInf,
    ),
    int_option("random_seed", "Random seed used in HiGHS", 0, 0, i32::MAX),
    int_option("threads", "Number of threads used by HiGHS (0: automatic)", 0, 0, i32::MAX),
    int_option(
        "simplex_strategy",
        "Strategy for simplex solver 0 => Choose; 1 => Dual (serial); 2 => Dual (PAMI); 3 => Dual (SIP); 4 => Primal",
        1,
        0,
        4,
    ),
    int_option(
        "simplex_scale_strategy",
        "Simplex scaling strategy: off / choose / equilibration / forced equilibration / max value 0 / max value 1 (0/1/2/3/4/5)",
        1,
        0,
        5,
    ),
    int_option(
        "simplex_iteration_limit",
        "Iteration limit for simplex solver when solving LPs",
        i32::MAX,
        0,
        i32::MAX,
    ),
    int_option(
        "ipm_iteration_limit",
        "Iteration limit for IPM solver",
        i32::MAX,
        0,
        i32::MAX,
    ),
    int_option(
        "write_solution_style",
        "Style of solution file (raw = computer-readable, pretty = human-readable)",
        0,
        -1,
        4,
    ),
    int_option("log_dev_level", "Output development messages", 0, 0, 3),
    bool_option("output_flag", "Enables or disables solver output", true),
    bool_option("log_to_console", "Enables or disables console logging", true),
    string_option("log_file", "Log file", "", &[]),
    bool_option(
        "write_solution_to_file",
        "Write the primal and dual solution to a file",
        false,
    ),
    string_option("solution_file", "Solution file", "", &[]),
    bool_option("mip_detect_symmetry", "Whether MIP symmetry should be detected", true),
    bool_option(
        "allow_unbounded_or_infeasible",
        "Whether UnboundedOrInfeasible model status can be returned",
        false,
    ),
    int_option(
        "mip_max_nodes",
        "MIP solver max number of nodes",
        i32::MAX,
        0,
        i32::MAX,
    ),
    int_option(
        "mip_max_leaves",
        "MIP solver max number of leaf nodes",
        i32::MAX,
        0,
        i32::MAX,
    ),
    int_option(
        "mip_max_improving_sols",
        "Limit on the number of improving solutions found to stop the MIP solver prematurely",
        i32::MAX,
        1,
        i32::MAX,
    ),
    double_option(
        "mip_feasibility_tolerance",
        "MIP feasibility tolerance",
        1e-6,
        1e-10,
        kHighsInf,
    ),
    double_option(
        "mip_rel_gap",
        "Tolerance on relative gap, |ub-lb|/|ub|, to determine whether optimality has been reached for a MIP instance",
        1e-4,
        0.0,
        kHighsInf,
    ),
    double_option(
        "mip_abs_gap",
        "Tolerance on absolute gap of MIP, |ub-lb|, to determine whether optimality has been reached for a MIP instance",
        1e-6,
        0.0,
        kHighsInf,
    ),
];

impl OptionSpec {
    fn default_value(&self) -> OptionValue {
        match self.kind {
            OptionKind::Bool { default } => OptionValue::Bool(default),
            OptionKind::Int { default, .. } => OptionValue::Int(default),
            OptionKind::Double { default, .. } => OptionValue::Double(default),
            OptionKind::String { default, .. } => OptionValue::String(default.to_string()),
        }
    }

    fn option_type(&self) -> HighsOptionType {
        match self.kind {
            OptionKind::Bool { .. } => HighsOptionType::Bool,
            OptionKind::Int { .. } => HighsOptionType::Int,
            OptionKind::Double { .. } => HighsOptionType::Double,
            OptionKind::String { .. } => HighsOptionType::String,
        }
    }

    /// Check `value` against type and range, widening ints for doubles.
    fn accept(&self, value: OptionValue) -> Result<OptionValue, HighsError> {
        let illegal = |value: &OptionValue| HighsError::OptionValue {
            name: self.name.to_string(),
            value: value.to_string(),
        };
        match (self.kind, value) {
            (OptionKind::Bool { .. }, value @ OptionValue::Bool(_)) => Ok(value),
            (OptionKind::Int { min, max, .. }, OptionValue::Int(v)) => {
                if v < min || v > max {
                    return Err(illegal(&OptionValue::Int(v)));
                }
                Ok(OptionValue::Int(v))
            }
            (OptionKind::Double { min, max, .. }, OptionValue::Int(v)) => {
                self.accept_double(f64::from(v), min, max)
            }
            (OptionKind::Double { min, max, .. }, OptionValue::Double(v)) => {
                self.accept_double(v, min, max)
            }
            (OptionKind::String { allowed, .. }, OptionValue::String(v)) => {
                if !allowed.is_empty() && !allowed.contains(&v.as_str()) {
                    return Err(illegal(&OptionValue::String(v)));
                }
                Ok(OptionValue::String(v))
            }
            _ => Err(HighsError::OptionType {
                name: self.name.to_string(),
                expected: self.option_type(),
            }),
        }
    }

    fn accept_double(&self, v: f64, min: f64, max: f64) -> Result<OptionValue, HighsError> {
        if v.is_nan() || v < min || v > max {
            return Err(HighsError::OptionValue {
                name: self.name.to_string(),
                value: format!("{:?}", v),
            });
        }
        Ok(OptionValue::Double(v))
    }

    /// Parse text according to the option's type.
    fn parse(&self, text: &str) -> Result<OptionValue, HighsError> {
        let text = text.trim();
        let illegal = || HighsError::OptionValue {
            name: self.name.to_string(),
            value: text.to_string(),
        };
        let value = match self.kind {
            OptionKind::Bool { .. } => match text.to_ascii_lowercase().as_str() {
                "true" | "t" | "on" | "1" => OptionValue::Bool(true),
                "false" | "f" | "off" | "0" => OptionValue::Bool(false),
                _ => return Err(illegal()),
            },
            OptionKind::Int { .. } => OptionValue::Int(text.parse().map_err(|_| illegal())?),
            OptionKind::Double { .. } => {
                OptionValue::Double(text.parse().map_err(|_| illegal())?)
            }
            OptionKind::String { .. } => OptionValue::String(text.to_string()),
        };
        self.accept(value)
    }

    fn describe(&self) -> String {
        match self.kind {
            OptionKind::Bool { default } => {
                format!("[type: bool, default: {}]", default)
            }
            OptionKind::Int { default, min, max } => format!(
                "[type: HighsInt, range: {{{}, {}}}, default: {}]",
                min, max, default
            ),
            OptionKind::Double { default, min, max } => format!(
                "[type: double, range: [{:?}, {:?}], default: {:?}]",
                min, max, default
            ),
            OptionKind::String { default, allowed } if allowed.is_empty() => {
                format!("[type: string, default: \"{}\"]", default)
            }
            OptionKind::String { default, allowed } => format!(
                "[type: string, allowed: {{{}}}, default: \"{}\"]",
                allowed.join(", "),
                default
            ),
        }
    }
}

fn find_spec(name: &str) -> Result<(usize, &'static OptionSpec), HighsError> {
    OPTION_SPECS
        .iter()
        .enumerate()
        .find(|(_, spec)| spec.name == name)
        .ok_or_else(|| HighsError::UnknownOption(name.to_string()))
}

/// Current value of every registered option.
#[derive(Debug, Clone, PartialEq)]
pub struct HighsOptions {
    values: Vec<OptionValue>,
}

impl Default for HighsOptions {
    fn default() -> Self {
        Self {
            values: OPTION_SPECS.iter().map(OptionSpec::default_value).collect(),
        }
    }
}

impl HighsOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of all registered options.
    pub fn names() -> impl Iterator<Item = &'static str> {
        OPTION_SPECS.iter().map(|spec| spec.name)
    }

    pub fn set(&mut self, name: &str, value: impl Into<OptionValue>) -> Result<(), HighsError> {
        let (slot, spec) = find_spec(name)?;
        let value = spec.accept(value.into())?;
        debug!(
            component = "options",
            operation = "set",
            status = "ok",
            name = name,
            value = %value,
            "Option set"
        );
        self.values[slot] = value;
        Ok(())
    }

    /// Set an option from its textual form, as read from a file.
    pub fn set_from_str(&mut self, name: &str, text: &str) -> Result<(), HighsError> {
        let (slot, spec) = find_spec(name)?;
        self.values[slot] = spec.parse(text)?;
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<&OptionValue, HighsError> {
        let (slot, _) = find_spec(name)?;
        Ok(&self.values[slot])
    }

    pub fn get_type(&self, name: &str) -> Result<HighsOptionType, HighsError> {
        find_spec(name).map(|(_, spec)| spec.option_type())
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Options whose value differs from the default, in registry order.
    pub fn non_default(&self) -> impl Iterator<Item = (&'static str, &OptionValue)> {
        OPTION_SPECS
            .iter()
            .zip(&self.values)
            .filter(|(spec, value)| spec.default_value() != **value)
            .map(|(spec, value)| (spec.name, value))
    }

    fn double(&self, name: &str) -> f64 {
        match self.get(name) {
            Ok(OptionValue::Double(v)) => *v,
            _ => kHighsInf,
        }
    }

    pub fn infinite_cost(&self) -> f64 {
        self.double("infinite_cost")
    }

    pub fn infinite_bound(&self) -> f64 {
        self.double("infinite_bound")
    }

    pub fn small_matrix_value(&self) -> f64 {
        self.double("small_matrix_value")
    }

    pub fn large_matrix_value(&self) -> f64 {
        self.double("large_matrix_value")
    }

    pub fn primal_feasibility_tolerance(&self) -> f64 {
        self.double("primal_feasibility_tolerance")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_library() {
        let options = HighsOptions::new();
        assert_eq!(
            options.get("presolve"),
            Ok(&OptionValue::String("choose".to_string()))
        );
        assert_eq!(options.get("time_limit"), Ok(&OptionValue::Double(kHighsInf)));
        assert_eq!(options.get("output_flag"), Ok(&OptionValue::Bool(true)));
        assert_eq!(options.infinite_bound(), 1e20);
        assert_eq!(options.small_matrix_value(), 1e-9);
        assert_eq!(options.large_matrix_value(), 1e15);
        assert_eq!(options.non_default().count(), 0);
    }

    #[test]
    fn test_names_unique() {
        let mut names: Vec<_> = HighsOptions::names().collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
    }

    #[test]
    fn test_set_rejects_bad_values_without_change() {
        let mut options = HighsOptions::new();
        assert_eq!(
            options.set("no_such_option", true).map_err(|e| e.code()),
            Err("OPTION_UNKNOWN")
        );
        assert_eq!(
            options.set("presolve", true).map_err(|e| e.code()),
            Err("OPTION_WRONG_TYPE")
        );
        assert_eq!(
            options.set("presolve", "sometimes").map_err(|e| e.code()),
            Err("OPTION_ILLEGAL_VALUE")
        );
        assert_eq!(
            options.set("time_limit", -1.0).map_err(|e| e.code()),
            Err("OPTION_ILLEGAL_VALUE")
        );
        assert_eq!(
            options.set("simplex_strategy", 9).map_err(|e| e.code()),
            Err("OPTION_ILLEGAL_VALUE")
        );
        assert_eq!(options, HighsOptions::new());
    }

    #[test]
    fn test_int_accepted_for_double() {
        let mut options = HighsOptions::new();
        options.set("time_limit", 10).unwrap();
        assert_eq!(options.get("time_limit"), Ok(&OptionValue::Double(10.0)));
        assert!(options.set("random_seed", 1.5).is_err());
    }

    #[test]
    fn test_non_default_and_reset() {
        let mut options = HighsOptions::new();
        options.set("output_flag", false).unwrap();
        options.set("mip_rel_gap", 0.0).unwrap();
        let changed: Vec<_> = options.non_default().map(|(name, _)| name).collect();
        assert_eq!(changed, vec!["output_flag", "mip_rel_gap"]);
        options.reset();
        assert_eq!(options.non_default().count(), 0);
    }

    #[test]
    fn test_set_from_str() {
        let mut options = HighsOptions::new();
        options.set_from_str("output_flag", "off").unwrap();
        options.set_from_str("threads", " 4 ").unwrap();
        options.set_from_str("time_limit", "inf").unwrap();
        assert_eq!(options.get("output_flag"), Ok(&OptionValue::Bool(false)));
        assert_eq!(options.get("threads"), Ok(&OptionValue::Int(4)));
        assert!(options.set_from_str("threads", "four").is_err());
        assert_eq!(options.get_type("threads"), Ok(HighsOptionType::Int));
    }
}
