//! JSON export of a solved plan.
//!
//! Field names are camelCase. Arbitrary-precision integers are written as
//! decimal strings so no consumer has to cope with numbers wider than 64 bits.

use num_bigint::BigInt;
use num_rational::BigRational;
use serde::{Deserialize, Serialize};

use crate::constants::EXPORT_VERSION;
use crate::error::PlanError;
use crate::network::Continuation;
use crate::plan::Plan;

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct WireFraction {
    pub num: String,
    pub den: String,
}

impl WireFraction {
    fn from_parts(num: &BigInt, den: &BigInt) -> Self {
        Self {
            num: num.to_string(),
            den: den.to_string(),
        }
    }

    fn from_ratio(r: &BigRational) -> Self {
        Self::from_parts(r.numer(), r.denom())
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct WireResult {
    pub a: u32,
    pub b: u32,
    pub m: String,
    pub d: String,
    pub gates: u32,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct WireGate {
    pub id: u32,
    pub arity: u32,
    pub input: String,
    /// Slot labels in slot order, slot 0 being the continuation.
    pub outputs: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct WireLeaf {
    pub id: u32,
    pub size: WireFraction,
    #[serde(rename = "gateId")]
    pub gate_id: u32,
    pub destination: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct WirePlan {
    pub version: String,
    #[serde(rename = "inputPower")]
    pub input_power: WireFraction,
    pub target: String,
    pub result: WireResult,
    #[serde(rename = "outputPower")]
    pub output_power: WireFraction,
    #[serde(rename = "arityOrder")]
    pub arity_order: String,
    pub gates: Vec<WireGate>,
    pub leaves: Vec<WireLeaf>,
    pub out: Vec<u32>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct WireNoSolution {
    #[serde(rename = "noSolution")]
    pub no_solution: String,
}

impl From<&Plan> for WirePlan {
    fn from(plan: &Plan) -> Self {
        let net = &plan.network;
        let gates = net
            .gates
            .iter()
            .map(|g| {
                let mut outputs = vec![match g.continuation {
                    Continuation::Gate(next) => format!("G{next}"),
                    Continuation::Leaf(id) => format!("L{id}"),
                }];
                outputs.extend(g.leaf_ids.iter().map(|id| format!("L{id}")));
                WireGate {
                    id: g.id,
                    arity: g.arity,
                    input: g.input.to_string(),
                    outputs,
                }
            })
            .collect();
        let leaves = net
            .leaves
            .iter()
            .map(|l| WireLeaf {
                id: l.id,
                size: WireFraction::from_parts(&BigInt::from(1u32), &l.den),
                gate_id: l.gate_id,
                destination: l.destination.to_string(),
            })
            .collect();

        WirePlan {
            version: EXPORT_VERSION.to_string(),
            input_power: WireFraction::from_parts(&plan.input_power.p, &plan.input_power.q),
            target: plan.target.to_string(),
            result: WireResult {
                a: plan.result.a,
                b: plan.result.b,
                m: plan.result.m.to_string(),
                d: plan.result.d.to_string(),
                gates: plan.result.gates(),
            },
            output_power: WireFraction::from_ratio(&plan.output_power),
            arity_order: plan.arity_order.to_string(),
            gates,
            leaves,
            out: net.out_leaf_ids.clone(),
        }
    }
}

/// Serialize a solved plan to pretty JSON.
pub fn export_json(plan: &Plan) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&WirePlan::from(plan))
}

/// Serialize an informational outcome.
pub fn export_no_solution_json(err: &PlanError) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&WireNoSolution {
        no_solution: err.to_string(),
    })
}
