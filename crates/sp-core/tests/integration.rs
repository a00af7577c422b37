//! Integration tests for the full planning pipeline:
//! power model → search → synthesis → report, across module boundaries.

use num_bigint::BigInt;
use num_rational::BigRational;
use proptest::prelude::*;
use sp_core::{
    ArityOrder, Destination, PlanError, PlanRequest, PresetTable, find_best, plan, render_report,
    smooth_denominator,
};

fn request(energy: u64, time: u64, rate: &str, target: u64, max_gates: u32) -> PlanRequest {
    PlanRequest {
        energy,
        time,
        rate: rate.to_string(),
        target,
        max_gates,
        ..PlanRequest::default()
    }
}

fn rat(n: i64, d: i64) -> BigRational {
    BigRational::new(BigInt::from(n), BigInt::from(d))
}

/// energy=10, time=1, t=1, target=3, max=4
#[test]
fn scenario_eleven_thirty_sixths() {
    let plan = plan(&request(10, 1, "1", 3, 4)).unwrap();

    assert_eq!(plan.input_power.as_ratio(), rat(10, 1));
    assert_eq!((plan.result.a, plan.result.b), (2, 2));
    assert_eq!(plan.result.m, BigInt::from(11));
    assert_eq!(plan.result.d, BigInt::from(36));
    let arities: Vec<u32> = plan.network.gates.iter().map(|g| g.arity).collect();
    assert_eq!(arities, vec![3, 3, 2, 2]);
    assert_eq!(plan.output_power, rat(55, 18));
    assert_eq!(plan.network.out_value(), rat(11, 36));
}

/// energy=10, time=1, t=1, target=10
#[test]
fn scenario_target_at_input_power() {
    let err = plan(&request(10, 1, "1", 10, 4)).unwrap_err();
    assert!(matches!(err, PlanError::DegenerateBound { .. }));
    assert!(err.is_informational());
    assert_eq!(
        err.to_string(),
        "target >= P_in; output power cannot exceed target"
    );
}

/// energy=1, time=1, t=1, target=0, max=1
#[test]
fn scenario_zero_target_single_ternary() {
    let plan = plan(&request(1, 1, "1", 0, 1)).unwrap();
    assert_eq!((plan.result.a, plan.result.b), (0, 1));
    assert_eq!(plan.result.fraction(), rat(1, 3));

    let net = &plan.network;
    assert_eq!(net.gates.len(), 1);
    assert_eq!(net.gates[0].arity, 3);
    let dests: Vec<Destination> = net.leaves.iter().map(|l| l.destination).collect();
    assert_eq!(
        dests,
        vec![Destination::Out, Destination::Warehouse, Destination::Warehouse]
    );
    assert_eq!(net.out_leaf_ids, vec![1]);
    assert_eq!(net.out_value(), rat(1, 3));
}

#[test]
fn validation_errors_are_fatal() {
    for req in [
        request(0, 1, "1", 0, 1),
        request(1, 0, "1", 0, 1),
        request(1, 1, "one", 0, 1),
        request(1, 1, "0", 0, 1),
    ] {
        let err = plan(&req).unwrap_err();
        assert!(!err.is_informational(), "{req:?} -> {err}");
    }
}

#[test]
fn preset_feeds_plan() {
    let preset = PresetTable::builtin().get("source-ore").unwrap();
    // 50 W * 8 s * 0.5 = 200 W
    let plan = plan(&request(preset.energy, preset.time, "0.5", 70, 6)).unwrap();
    assert_eq!(plan.input_power.as_ratio(), rat(200, 1));
    assert!(plan.result.fraction() > rat(70, 200));
    let report = render_report(&plan);
    assert!(report.starts_with("RESULT\nP_in = 200 W (approx 200.000000 W)\n"));
}

#[test]
fn binary_first_keeps_fraction() {
    let mut req = request(1100, 40, "0.5", 7000, 6);
    let ternary = plan(&req).unwrap();
    req.arity_order = ArityOrder::BinaryFirst;
    let binary = plan(&req).unwrap();

    assert_eq!(ternary.result, binary.result);
    assert_eq!(ternary.network.out_value(), binary.network.out_value());
    if let Some(first) = binary.network.gates.first()
        && binary.result.a > 0
    {
        assert_eq!(first.arity, 2);
    }
}

#[test]
fn huge_inputs_stay_exact() {
    let plan = plan(&request(u64::MAX, u64::MAX, "7/11", 1_000_000_007, 20)).unwrap();
    assert!(plan.result.is_feasible());
    assert_eq!(plan.network.out_value(), plan.result.fraction());
    assert_eq!(plan.network.total_value(), rat(1, 1));
}

fn rate_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        (1u32..20).prop_map(|n| n.to_string()),
        (1u32..20, 1u32..20).prop_map(|(n, d)| format!("{n}/{d}")),
        (0u32..5, 1u32..100).prop_map(|(i, f)| format!("{i}.{f:02}")),
    ]
}

proptest! {
    #[test]
    fn winner_is_feasible_and_exactly_realized(
        energy in 1u64..5_000,
        time in 1u64..100,
        rate in rate_strategy(),
        target in 0u64..50_000,
        max_gates in 0u32..9,
        binary_first in any::<bool>(),
    ) {
        let mut req = request(energy, time, &rate, target, max_gates);
        if binary_first {
            req.arity_order = ArityOrder::BinaryFirst;
        }
        match plan(&req) {
            Ok(plan) => {
                let best = &plan.result;
                prop_assert!(best.is_feasible());
                prop_assert_eq!(&best.d, &smooth_denominator(best.a, best.b));
                prop_assert!(best.gates() <= max_gates);

                let net = &plan.network;
                prop_assert_eq!(net.gates.len() as u32, best.gates());
                for gate in &net.gates {
                    prop_assert_eq!(gate.outputs(), gate.arity as usize);
                }
                prop_assert_eq!(net.out_value(), best.fraction());
                prop_assert_eq!(net.total_value(), BigRational::from_integer(BigInt::from(1)));

                // Strictly above the bound target / P_in.
                let bound = BigRational::from_integer(BigInt::from(target)) / plan.input_power.as_ratio();
                prop_assert!(best.fraction() > bound);
            }
            Err(err) => prop_assert!(err.is_informational(), "unexpected error {}", err),
        }
    }

    #[test]
    fn zero_budget_is_passthrough(
        energy in 1u64..1_000,
        time in 1u64..100,
        target in 0u64..1_000,
    ) {
        if let Ok(plan) = plan(&request(energy, time, "1", target, 0)) {
            prop_assert_eq!(plan.result.fraction(), BigRational::from_integer(BigInt::from(1)));
            prop_assert!(plan.network.is_passthrough());
            prop_assert_eq!(plan.network.leaves.len(), 1);
            prop_assert_eq!(plan.network.leaves[0].destination, Destination::Out);
        }
    }

    #[test]
    fn larger_budget_never_worse(
        energy in 1u64..2_000,
        time in 1u64..50,
        target in 0u64..20_000,
        max_gates in 0u32..8,
    ) {
        let power = sp_core::InputPower::from_rate_str(energy, time, "1/2").unwrap();
        let target = BigInt::from(target);
        prop_assume!(power.exceeds(&target));

        let small = find_best(&power, &target, max_gates).unwrap();
        let large = find_best(&power, &target, max_gates + 1).unwrap();
        prop_assert!(large.fraction() <= small.fraction());
        if large.fraction() == small.fraction() {
            prop_assert!(large.gates() <= small.gates());
        }
    }
}
