use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Signed;

use crate::error::{PlanError, Result};
use crate::ratio::{parse_rate, reduce};

/// Exact input power P_in = p/q (W), always in lowest terms with q > 0.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputPower {
    pub p: BigInt,
    pub q: BigInt,
}

impl InputPower {
    /// P_in = energy * duration * rate.
    pub fn new(energy: u64, duration: u64, rate: &BigRational) -> Result<Self> {
        if energy == 0 || duration == 0 {
            return Err(PlanError::validation("energy and time must be > 0"));
        }
        if !rate.is_positive() {
            return Err(PlanError::validation("t must be > 0"));
        }

        let mut p = BigInt::from(energy) * BigInt::from(duration) * rate.numer();
        let mut q = rate.denom().clone();
        reduce(&mut p, &mut q);
        tracing::debug!("P_in = {p}/{q} W");
        Ok(Self { p, q })
    }

    /// Same as [`InputPower::new`] but parses the rate string first.
    pub fn from_rate_str(energy: u64, duration: u64, rate: &str) -> Result<Self> {
        if energy == 0 || duration == 0 {
            return Err(PlanError::validation("energy and time must be > 0"));
        }
        let rate = parse_rate(rate)?;
        Self::new(energy, duration, &rate)
    }

    pub fn as_ratio(&self) -> BigRational {
        BigRational::new(self.p.clone(), self.q.clone())
    }

    /// True when P_in is strictly greater than `target`.
    pub fn exceeds(&self, target: &BigInt) -> bool {
        self.p > target * &self.q
    }

    /// Power delivered when the fraction m/d of the input is kept.
    pub fn share(&self, m: &BigInt, d: &BigInt) -> BigRational {
        BigRational::new(&self.p * m, &self.q * d)
    }
}
