use num_bigint::BigInt;
use num_rational::BigRational;

use crate::constants::{DEFAULT_RATE, SLOW_GATE_BUDGET};
use crate::error::{PlanError, Result};
use crate::network::{ArityOrder, Network, synthesize};
use crate::power::InputPower;
use crate::search::{SearchResult, find_best};

/// Everything needed for one planning run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlanRequest {
    /// Battery output power (W).
    pub energy: u64,
    /// Battery duration (s).
    pub time: u64,
    /// Generation rate, e.g. "0.5" or "1/2".
    pub rate: String,
    /// Output bound (W).
    pub target: u64,
    /// Gate budget.
    pub max_gates: u32,
    pub arity_order: ArityOrder,
}

impl Default for PlanRequest {
    fn default() -> Self {
        Self {
            energy: 0,
            time: 0,
            rate: DEFAULT_RATE.to_string(),
            target: 0,
            max_gates: 0,
            arity_order: ArityOrder::default(),
        }
    }
}

/// A solved plan: input power, winning fraction and the chain realizing it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Plan {
    pub input_power: InputPower,
    pub target: BigInt,
    pub result: SearchResult,
    pub network: Network,
    pub output_power: BigRational,
    pub arity_order: ArityOrder,
}

/// Run power model, search and synthesis.
///
/// Fails with `Validation` on bad input, `DegenerateBound` when the target is
/// not below P_in and `NoSolution` when the gate budget admits no fraction.
pub fn plan(request: &PlanRequest) -> Result<Plan> {
    let input_power = InputPower::from_rate_str(request.energy, request.time, &request.rate)?;
    let target = BigInt::from(request.target);

    if !input_power.exceeds(&target) {
        return Err(PlanError::DegenerateBound {
            input_power: input_power.as_ratio(),
            target,
        });
    }

    if request.max_gates > SLOW_GATE_BUDGET {
        tracing::warn!(
            "max gates {} is above {SLOW_GATE_BUDGET}; the search may take a while",
            request.max_gates
        );
    }

    let result = find_best(&input_power, &target, request.max_gates)?;
    let network = synthesize(&result, request.arity_order);
    let output_power = input_power.share(&result.m, &result.d);

    Ok(Plan {
        input_power,
        target,
        result,
        network,
        output_power,
        arity_order: request.arity_order,
    })
}
