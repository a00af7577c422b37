use std::fmt;

use num_bigint::BigInt;
use num_rational::BigRational;

use crate::ratio::ratio_string;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    /// Bad, zero or unparseable input. Fatal.
    Validation(String),
    /// The target is at or above the input power, so no split is needed.
    DegenerateBound {
        input_power: BigRational,
        target: BigInt,
    },
    /// No admissible fraction exists within the gate budget.
    NoSolution,
}

impl PlanError {
    pub fn validation(msg: impl Into<String>) -> Self {
        PlanError::Validation(msg.into())
    }

    /// Informational outcomes are reported as "no solution" and are not failures.
    pub fn is_informational(&self) -> bool {
        !matches!(self, PlanError::Validation(_))
    }
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanError::Validation(msg) => write!(f, "{msg}"),
            PlanError::DegenerateBound { .. } => {
                write!(f, "target >= P_in; output power cannot exceed target")
            }
            PlanError::NoSolution => write!(f, "no feasible fraction found"),
        }
    }
}

impl std::error::Error for PlanError {}

impl PlanError {
    /// Longer explanation for verbose output.
    pub fn detail(&self) -> String {
        match self {
            PlanError::DegenerateBound {
                input_power,
                target,
            } => format!("P_in = {} W, target = {target} W", ratio_string(input_power)),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PlanError>;
