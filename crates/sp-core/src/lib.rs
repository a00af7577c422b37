//! Splitter-network planner.
//!
//! Given an input power stream, finds the fraction m/D with D = 2^a * 3^b
//! (at most `max_gates` splitters) that sits closest above a target bound,
//! then builds the chain of 2-way and 3-way splitters realizing it exactly.
//!
//! Pure arithmetic on arbitrary-precision integers. No floating point, no I/O.

pub mod constants;
pub mod error;
pub mod export;
pub mod network;
pub mod plan;
pub mod power;
pub mod presets;
pub mod ratio;
pub mod render;
pub mod search;

pub use constants::{APPROX_DIGITS, DEFAULT_RATE, PRESETS_ENV, SLOW_GATE_BUDGET};
pub use error::{PlanError, Result};
pub use export::{WirePlan, export_json, export_no_solution_json};
pub use network::{
    ArityOrder, Continuation, Destination, Gate, GateInput, Leaf, Network, SlotTarget, synthesize,
};
pub use plan::{Plan, PlanRequest, plan};
pub use power::InputPower;
pub use presets::{BUILTIN_PRESETS, Preset, PresetTable};
pub use ratio::{parse_rate, ratio_string, to_decimal};
pub use render::{render_no_solution, render_report};
pub use search::{SearchResult, find_best, numerator_for, smooth_denominator};
