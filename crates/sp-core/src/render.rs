//! Plain-text report: RESULT, GATES, LEAVES, OUT and CONNECTIONS sections.

use crate::constants::APPROX_DIGITS;
use crate::error::PlanError;
use crate::plan::Plan;
use crate::ratio::{ratio_string, to_decimal};

/// Render a solved plan.
pub fn render_report(plan: &Plan) -> String {
    let mut lines = result_section(plan);
    lines.push(String::new());
    lines.extend(network_sections(plan));
    lines.join("\n") + "\n"
}

/// One-line report for informational outcomes.
pub fn render_no_solution(err: &PlanError) -> String {
    format!("NO SOLUTION: {err}\n")
}

fn result_section(plan: &Plan) -> Vec<String> {
    let p_in = plan.input_power.as_ratio();
    let best = &plan.result;
    vec![
        "RESULT".to_string(),
        format!(
            "P_in = {} W (approx {} W)",
            ratio_string(&p_in),
            to_decimal(&p_in, APPROX_DIGITS)
        ),
        format!("Target = {} W", plan.target),
        format!(
            "Best fraction = {}/{} (gates={}, a(1/2)={}, b(1/3)={})",
            best.m,
            best.d,
            best.gates(),
            best.a,
            best.b
        ),
        format!(
            "Output power = {} W (approx {} W)",
            ratio_string(&plan.output_power),
            to_decimal(&plan.output_power, APPROX_DIGITS)
        ),
    ]
}

/// GATES through CONNECTIONS, or the short passthrough form.
fn network_sections(plan: &Plan) -> Vec<String> {
    let net = &plan.network;
    let mut lines = vec!["GATES".to_string()];
    if net.is_passthrough() {
        lines.extend(["(none)", "OUT", "IN"].map(String::from));
        return lines;
    }

    for g in &net.gates {
        let mut parts = vec![format!("out0={}", g.continuation)];
        parts.extend(
            g.leaf_ids
                .iter()
                .enumerate()
                .map(|(slot, id)| format!("out{}=L{id}", slot + 1)),
        );
        lines.push(format!(
            "G{} split{} in={} -> {}",
            g.id,
            g.arity,
            g.input,
            parts.join(", ")
        ));
    }
    lines.push(String::new());

    lines.push("LEAVES".to_string());
    lines.extend(net.leaves.iter().map(|l| {
        format!(
            "L{} size=1/{} from=G{} -> {}",
            l.id, l.den, l.gate_id, l.destination
        )
    }));
    lines.push(String::new());

    lines.push("OUT".to_string());
    if net.out_leaf_ids.is_empty() {
        lines.push("(none)".to_string());
    } else {
        let ids: Vec<String> = net.out_leaf_ids.iter().map(|id| format!("L{id}")).collect();
        lines.push(format!("merge({})", ids.join(", ")));
    }
    lines.push(String::new());

    lines.push("CONNECTIONS".to_string());
    lines.extend(net.connections().into_iter().map(|(id, slots)| {
        let slots: Vec<String> = slots.iter().map(|s| s.to_string()).collect();
        format!("G{id}: {}", slots.join(" "))
    }));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{PlanRequest, plan};

    fn solved(energy: u64, target: u64, max_gates: u32) -> Plan {
        plan(&PlanRequest {
            energy,
            time: 1,
            rate: "1".to_string(),
            target,
            max_gates,
            ..PlanRequest::default()
        })
        .unwrap()
    }

    #[test]
    fn test_full_report() {
        let report = render_report(&solved(10, 3, 4));
        let expected = "\
RESULT
P_in = 10 W (approx 10.000000 W)
Target = 3 W
Best fraction = 11/36 (gates=4, a(1/2)=2, b(1/3)=2)
Output power = 55/18 W (approx 3.055556 W)

GATES
G1 split3 in=IN -> out0=G2.out0, out1=L1, out2=L2
G2 split3 in=G1.out0 -> out0=G3.out0, out1=L3, out2=L4
G3 split2 in=G2.out0 -> out0=G4.out0, out1=L5
G4 split2 in=G3.out0 -> out0=L7, out1=L6

LEAVES
L1 size=1/3 from=G1 -> WAREHOUSE
L2 size=1/3 from=G1 -> WAREHOUSE
L3 size=1/9 from=G2 -> OUT
L4 size=1/9 from=G2 -> OUT
L5 size=1/18 from=G3 -> OUT
L6 size=1/36 from=G4 -> OUT
L7 size=1/36 from=G4 -> WAREHOUSE

OUT
merge(L3, L4, L5, L6)

CONNECTIONS
G1: G2 WAREHOUSE WAREHOUSE
G2: G3 OUT OUT
G3: G4 OUT
G4: WAREHOUSE OUT
";
        assert_eq!(report, expected);
    }

    #[test]
    fn test_passthrough_report() {
        let report = render_report(&solved(10, 3, 0));
        assert!(report.contains("Best fraction = 1/1 (gates=0, a(1/2)=0, b(1/3)=0)"));
        assert!(report.ends_with("GATES\n(none)\nOUT\nIN\n"));
        assert!(!report.contains("CONNECTIONS"));
    }

    #[test]
    fn test_single_gate_report() {
        // 1 W, target 0, one gate: the first branch leaf carries the 1/3 share.
        let report = render_report(&solved(1, 0, 1));
        let expected = "\
RESULT
P_in = 1 W (approx 1.000000 W)
Target = 0 W
Best fraction = 1/3 (gates=1, a(1/2)=0, b(1/3)=1)
Output power = 1/3 W (approx 0.333333 W)

GATES
G1 split3 in=IN -> out0=L3, out1=L1, out2=L2

LEAVES
L1 size=1/3 from=G1 -> OUT
L2 size=1/3 from=G1 -> WAREHOUSE
L3 size=1/3 from=G1 -> WAREHOUSE

OUT
merge(L1)

CONNECTIONS
G1: WAREHOUSE OUT WAREHOUSE
";
        assert_eq!(report, expected);
    }

    #[test]
    fn test_no_solution_line() {
        assert_eq!(
            render_no_solution(&PlanError::NoSolution),
            "NO SOLUTION: no feasible fraction found\n"
        );
    }
}
