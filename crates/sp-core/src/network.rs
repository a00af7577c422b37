//! Splitter chain synthesis.
//!
//! A winning fraction m/D with D = 2^a * 3^b is realized by a straight chain
//! of a + b splitters. Each gate divides what it receives into k equal shares:
//! one share continues down the chain, the other k - 1 terminate as leaves.
//! Walking the chain peels off one mixed-radix digit of m/D per gate, and that
//! digit is the number of the gate's leaves routed to OUT.
//!
//! Gates and leaves live in flat vectors addressed by 1-based ids.

use std::fmt;
use std::str::FromStr;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, ToPrimitive, Zero};

use crate::error::PlanError;
use crate::search::SearchResult;

/// Final sink of a leaf.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Destination {
    Out,
    Warehouse,
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Out => write!(f, "OUT"),
            Destination::Warehouse => write!(f, "WAREHOUSE"),
        }
    }
}

/// Where a gate takes its flow from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateInput {
    /// The process input stream.
    Source,
    /// Continuation output (slot 0) of the given gate.
    Gate(u32),
}

impl fmt::Display for GateInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateInput::Source => write!(f, "IN"),
            GateInput::Gate(id) => write!(f, "G{id}.out0"),
        }
    }
}

/// Where a gate's slot-0 output goes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Continuation {
    /// Input of the next gate in the chain.
    Gate(u32),
    /// Terminal leaf of the last gate.
    Leaf(u32),
}

impl fmt::Display for Continuation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Continuation::Gate(id) => write!(f, "G{id}.out0"),
            Continuation::Leaf(id) => write!(f, "L{id}"),
        }
    }
}

/// Resolved target of one gate output slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotTarget {
    Gate(u32),
    Sink(Destination),
}

impl fmt::Display for SlotTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotTarget::Gate(id) => write!(f, "G{id}"),
            SlotTarget::Sink(dest) => write!(f, "{dest}"),
        }
    }
}

/// Order in which gate arities are laid along the chain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ArityOrder {
    /// All 3-way gates, then all 2-way gates.
    #[default]
    TernaryFirst,
    /// All 2-way gates, then all 3-way gates.
    BinaryFirst,
}

impl ArityOrder {
    /// Arity sequence for `a` 2-way and `b` 3-way gates.
    pub fn arities(self, a: u32, b: u32) -> Vec<u32> {
        let twos = std::iter::repeat_n(2, a as usize);
        let threes = std::iter::repeat_n(3, b as usize);
        match self {
            ArityOrder::TernaryFirst => threes.chain(twos).collect(),
            ArityOrder::BinaryFirst => twos.chain(threes).collect(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ArityOrder::TernaryFirst => "ternary-first",
            ArityOrder::BinaryFirst => "binary-first",
        }
    }
}

impl fmt::Display for ArityOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArityOrder {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ternary-first" => Ok(ArityOrder::TernaryFirst),
            "binary-first" => Ok(ArityOrder::BinaryFirst),
            other => Err(PlanError::validation(format!(
                "unknown arity order '{other}'; use ternary-first or binary-first"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Gate {
    pub id: u32,
    pub arity: u32,
    pub input: GateInput,
    /// Slot 0.
    pub continuation: Continuation,
    /// Slots 1..k, in slot order.
    pub leaf_ids: Vec<u32>,
}

impl Gate {
    pub fn outputs(&self) -> usize {
        self.leaf_ids.len() + 1
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Leaf {
    pub id: u32,
    /// The leaf carries 1/den of the input.
    pub den: BigInt,
    pub destination: Destination,
    /// Owning gate, 0 when there are no gates.
    pub gate_id: u32,
}

impl Leaf {
    pub fn value(&self) -> BigRational {
        BigRational::new(BigInt::one(), self.den.clone())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Network {
    pub gates: Vec<Gate>,
    pub leaves: Vec<Leaf>,
    /// Ids of leaves routed to OUT, ascending.
    pub out_leaf_ids: Vec<u32>,
}

impl Network {
    pub fn leaf(&self, id: u32) -> Option<&Leaf> {
        let idx = (id as usize).checked_sub(1)?;
        self.leaves.get(idx)
    }

    pub fn is_passthrough(&self) -> bool {
        self.gates.is_empty()
    }

    /// Sum of the leaves routed to OUT.
    pub fn out_value(&self) -> BigRational {
        self.leaves
            .iter()
            .filter(|l| l.destination == Destination::Out)
            .fold(BigRational::zero(), |acc, l| acc + l.value())
    }

    /// Sum of every leaf; 1 for any well-formed network.
    pub fn total_value(&self) -> BigRational {
        self.leaves
            .iter()
            .fold(BigRational::zero(), |acc, l| acc + l.value())
    }

    /// Per gate, the resolved target of each output slot (slot 0 first).
    pub fn connections(&self) -> Vec<(u32, Vec<SlotTarget>)> {
        self.gates
            .iter()
            .map(|g| {
                let mut slots = Vec::with_capacity(g.outputs());
                slots.push(match g.continuation {
                    Continuation::Gate(next) => SlotTarget::Gate(next),
                    Continuation::Leaf(id) => self.sink_of(id),
                });
                slots.extend(g.leaf_ids.iter().map(|&id| self.sink_of(id)));
                (g.id, slots)
            })
            .collect()
    }

    fn sink_of(&self, leaf_id: u32) -> SlotTarget {
        // Leaf ids always come from this network's own leaves.
        let dest = self
            .leaf(leaf_id)
            .map(|l| l.destination)
            .unwrap_or(Destination::Warehouse);
        SlotTarget::Sink(dest)
    }
}

/// Build the splitter chain realizing `result.m / result.d`.
///
/// `result` must be feasible (m <= D) with D = 2^a * 3^b.
pub fn synthesize(result: &SearchResult, order: ArityOrder) -> Network {
    if result.gates() == 0 {
        return Network {
            gates: Vec::new(),
            leaves: vec![Leaf {
                id: 1,
                den: BigInt::one(),
                destination: Destination::Out,
                gate_id: 0,
            }],
            out_leaf_ids: vec![1],
        };
    }

    let arities = order.arities(result.a, result.b);
    let last = arities.len() - 1;

    let mut gates = Vec::with_capacity(arities.len());
    let mut leaves = Vec::new();
    let mut m_remain = result.m.clone();
    let mut d_remain = result.d.clone();
    let mut den = BigInt::one();
    let mut next_leaf = 1u32;

    for (i, &k) in arities.iter().enumerate() {
        let id = i as u32 + 1;
        den *= k;
        d_remain /= k;

        // Digit for this position, capped at the number of branch leaves.
        let digit = (&m_remain / &d_remain).min(BigInt::from(k - 1));
        m_remain -= &digit * &d_remain;
        let out_branches = digit.to_u32().unwrap_or(k - 1);

        let mut leaf_ids = Vec::with_capacity(k as usize - 1);
        for j in 0..k - 1 {
            let destination = if j < out_branches {
                Destination::Out
            } else {
                Destination::Warehouse
            };
            leaves.push(Leaf {
                id: next_leaf,
                den: den.clone(),
                destination,
                gate_id: id,
            });
            leaf_ids.push(next_leaf);
            next_leaf += 1;
        }

        let continuation = if i == last {
            // m_remain is 0 or 1 here; 1 only when m == D.
            let destination = if m_remain.is_one() {
                Destination::Out
            } else {
                Destination::Warehouse
            };
            leaves.push(Leaf {
                id: next_leaf,
                den: den.clone(),
                destination,
                gate_id: id,
            });
            m_remain.set_zero();
            let terminal = Continuation::Leaf(next_leaf);
            next_leaf += 1;
            terminal
        } else {
            Continuation::Gate(id + 1)
        };

        let input = if i == 0 {
            GateInput::Source
        } else {
            GateInput::Gate(id - 1)
        };

        gates.push(Gate {
            id,
            arity: k,
            input,
            continuation,
            leaf_ids,
        });
    }

    let out_leaf_ids: Vec<u32> = leaves
        .iter()
        .filter(|l| l.destination == Destination::Out)
        .map(|l| l.id)
        .collect();

    tracing::debug!(
        gates = gates.len(),
        leaves = leaves.len(),
        out = out_leaf_ids.len(),
        "synthesized {order} chain"
    );

    Network {
        gates,
        leaves,
        out_leaf_ids,
    }
}
