//! Numeric constants shared with the HiGHS library.

/// Value HiGHS uses for an infinite bound or cost.
#[allow(non_upper_case_globals)]
pub const kHighsInf: f64 = f64::INFINITY;

/// Integer infinity, used for iteration and node limits.
#[allow(non_upper_case_globals)]
pub const kHighsIInf: i32 = i32::MAX;

/// Placeholder for infeasibility counts that have not been computed.
pub const ILLEGAL_INFEASIBILITY_COUNT: i32 = -1;

/// Placeholder for infeasibility measures that have not been computed.
pub const ILLEGAL_INFEASIBILITY_MEASURE: f64 = -1.0;
