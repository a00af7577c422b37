//! Exact rational helpers shared by the power model, the search and the renderers.
//!
//! Nothing here touches floating point: comparisons cross-multiply and decimal
//! output is produced by long division.

use std::cmp::Ordering;

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use crate::error::{PlanError, Result};

const INVALID_RATE: &str = "invalid t; use a rational like 0.5 or 1/2";

/// Divide `p` and `q` by their GCD in place.
/// A GCD of zero or one leaves the pair as it is.
pub fn reduce(p: &mut BigInt, q: &mut BigInt) {
    let g = p.gcd(q);
    if g.is_zero() || g.is_one() {
        return;
    }
    *p /= &g;
    *q /= &g;
}

/// Compare m1/d1 with m2/d2 for positive denominators.
pub fn frac_cmp(m1: &BigInt, d1: &BigInt, m2: &BigInt, d2: &BigInt) -> Ordering {
    (m1 * d2).cmp(&(m2 * d1))
}

pub fn frac_less(m1: &BigInt, d1: &BigInt, m2: &BigInt, d2: &BigInt) -> bool {
    frac_cmp(m1, d1, m2, d2) == Ordering::Less
}

pub fn frac_equal(m1: &BigInt, d1: &BigInt, m2: &BigInt, d2: &BigInt) -> bool {
    frac_cmp(m1, d1, m2, d2) == Ordering::Equal
}

fn parse_digits(s: &str) -> Option<BigInt> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    BigInt::parse_bytes(s.as_bytes(), 10)
}

/// Largest decimal exponent accepted in a rate such as `5e-1`.
const MAX_RATE_EXPONENT: u32 = 4096;

/// Decimal mantissa `I`, `I.`, `I.F` or `.F` with an optional `e`/`E` exponent.
fn parse_decimal(s: &str) -> Option<BigRational> {
    let (mantissa, exponent) = match s.find(['e', 'E']) {
        Some(at) => (&s[..at], Some(&s[at + 1..])),
        None => (s, None),
    };

    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    let int_ok = int_part.is_empty() || parse_digits(int_part).is_some();
    let frac_ok = frac_part.is_empty() || parse_digits(frac_part).is_some();
    if !int_ok || !frac_ok {
        return None;
    }
    let num = parse_digits(&format!("{int_part}{frac_part}"))?;
    let mut scale = i64::try_from(frac_part.len()).ok()?.checked_neg()?;

    if let Some(exp) = exponent {
        let (exp_negative, exp_digits) = match exp.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, exp.strip_prefix('+').unwrap_or(exp)),
        };
        if exp_digits.is_empty() || !exp_digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let magnitude: u32 = exp_digits.parse().ok().filter(|e| *e <= MAX_RATE_EXPONENT)?;
        let magnitude = i64::from(magnitude);
        scale += if exp_negative { -magnitude } else { magnitude };
    }

    let ten = BigInt::from(10u32);
    let power = ten.pow(u32::try_from(scale.unsigned_abs()).ok()?);
    Some(if scale >= 0 {
        BigRational::from_integer(num * power)
    } else {
        BigRational::new(num, power)
    })
}

/// Parse a generation rate written as `N`, `N/M` or a decimal like `0.5`,
/// `2.` or `5e-1`.
///
/// The result is reduced and strictly positive; anything else is a
/// validation error.
pub fn parse_rate(input: &str) -> Result<BigRational> {
    let trimmed = input.trim();
    let (negative, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let magnitude = if let Some((num, den)) = body.split_once('/') {
        let num = parse_digits(num.trim()).ok_or_else(|| PlanError::validation(INVALID_RATE))?;
        let den = parse_digits(den.trim()).ok_or_else(|| PlanError::validation(INVALID_RATE))?;
        if den.is_zero() {
            return Err(PlanError::validation(INVALID_RATE));
        }
        BigRational::new(num, den)
    } else {
        parse_decimal(body).ok_or_else(|| PlanError::validation(INVALID_RATE))?
    };

    let rate = if negative { -magnitude } else { magnitude };
    if !rate.is_positive() {
        return Err(PlanError::validation("t must be > 0"));
    }
    Ok(rate)
}

/// `n` for integers, `n/d` otherwise.
pub fn ratio_string(r: &BigRational) -> String {
    if r.denom().is_one() {
        r.numer().to_string()
    } else {
        format!("{}/{}", r.numer(), r.denom())
    }
}

/// Decimal rendering with `digits` fractional digits, rounded half away from zero.
pub fn to_decimal(r: &BigRational, digits: usize) -> String {
    let sign = if r.is_negative() { "-" } else { "" };
    let numer = r.numer().abs();
    let denom = r.denom();

    let scale = BigInt::from(10u32).pow(digits as u32);
    let (mut scaled, rem) = (&numer * &scale).div_rem(denom);
    if (rem * 2u32) >= *denom {
        scaled += 1u32;
    }

    if digits == 0 {
        return format!("{sign}{scaled}");
    }
    let (int_part, frac_part) = scaled.div_rem(&scale);
    format!("{sign}{int_part}.{:0>digits$}", frac_part.to_string())
}
