//! Best-fraction search over 2,3-smooth denominators.
//!
//! For every gate pair (a, b) with a + b <= max_gates the denominator is
//! D = 2^a * 3^b and the numerator is the smallest integer whose ratio to D
//! lies strictly above the bound target / P_in. Among candidates with m <= D
//! the smallest fraction wins, ties going to the cheaper gate count.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::One;

use crate::error::{PlanError, Result};
use crate::power::InputPower;
use crate::ratio::{frac_equal, frac_less};

/// Winning gate counts and the fraction m/D they realize.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchResult {
    /// Number of 2-way gates.
    pub a: u32,
    /// Number of 3-way gates.
    pub b: u32,
    pub m: BigInt,
    pub d: BigInt,
}

impl SearchResult {
    pub fn gates(&self) -> u32 {
        self.a + self.b
    }

    pub fn fraction(&self) -> BigRational {
        BigRational::new(self.m.clone(), self.d.clone())
    }

    pub fn is_feasible(&self) -> bool {
        self.m <= self.d
    }
}

/// m = floor(target * d * q / p) + 1
pub fn numerator_for(target: &BigInt, d: &BigInt, power: &InputPower) -> BigInt {
    (target * d * &power.q) / &power.p + 1u32
}

/// 2^a * 3^b
pub fn smooth_denominator(a: u32, b: u32) -> BigInt {
    BigInt::from(2u32).pow(a) * BigInt::from(3u32).pow(b)
}

/// Exhaustive search of the (a, b) grid bounded by `max_gates`.
///
/// The caller is expected to have checked that P_in exceeds `target`.
pub fn find_best(power: &InputPower, target: &BigInt, max_gates: u32) -> Result<SearchResult> {
    let two = BigInt::from(2u32);
    let three = BigInt::from(3u32);

    let mut best: Option<SearchResult> = None;
    let mut d2 = BigInt::one();

    for a in 0..=max_gates {
        let mut d = d2.clone();
        for b in 0..=(max_gates - a) {
            let m = numerator_for(target, &d, power);
            if m <= d {
                tracing::trace!(a, b, "admissible {m}/{d}");
                let better = match &best {
                    None => true,
                    Some(cur) => {
                        frac_less(&m, &d, &cur.m, &cur.d)
                            || (frac_equal(&m, &d, &cur.m, &cur.d) && a + b < cur.gates())
                    }
                };
                if better {
                    best = Some(SearchResult {
                        a,
                        b,
                        m,
                        d: d.clone(),
                    });
                }
            }
            d *= &three;
        }
        d2 *= &two;
    }

    let best = best.ok_or(PlanError::NoSolution)?;
    // Unreachable while m = floor(..) + 1, kept in case the numerator rule changes.
    if best.m < BigInt::one() {
        return Err(PlanError::NoSolution);
    }
    tracing::debug!(
        a = best.a,
        b = best.b,
        "best fraction {}/{}",
        best.m,
        best.d
    );
    Ok(best)
}
