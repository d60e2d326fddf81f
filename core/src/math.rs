//! Overflow-checked fixed-point arithmetic
//!
//! All token quantities and rates in the economy are integers scaled by
//! 10^18. Intermediate products can exceed 128 bits, so every helper either
//! returns an exact result or fails closed with a typed error. Nothing here
//! wraps, saturates or truncates silently.

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathError {
    #[error("Arithmetic overflow")]
    Overflow,

    #[error("Arithmetic underflow")]
    Underflow,

    #[error("Division by zero")]
    DivisionByZero,
}

pub type Result<T> = std::result::Result<T, MathError>;

/// Exact `a * b / denom` with floor division.
///
/// The product is split around the denominator:
/// `(a / d) * b + (a % d) * b / d`, which is algebraically equal to
/// `floor(a * b / d)` and keeps every intermediate below 2^128 for all
/// inputs this economy produces (amounts below MAX_SUPPLY, rates at the
/// 10^18 scale). Inputs large enough to overflow the split still fail
/// closed rather than wrap.
pub fn mul_div(a: u128, b: u128, denom: u128) -> Result<u128> {
    if denom == 0 {
        return Err(MathError::DivisionByZero);
    }
    let whole = (a / denom).checked_mul(b).ok_or(MathError::Overflow)?;
    let part = (a % denom).checked_mul(b).ok_or(MathError::Overflow)? / denom;
    whole.checked_add(part).ok_or(MathError::Overflow)
}

/// Checked addition.
pub fn add(a: u128, b: u128) -> Result<u128> {
    a.checked_add(b).ok_or(MathError::Overflow)
}

/// Checked subtraction.
pub fn sub(a: u128, b: u128) -> Result<u128> {
    a.checked_sub(b).ok_or(MathError::Underflow)
}

/// Whole-percent cut of an amount (burn and tax fractions).
pub fn percent(amount: u128, pct: u128) -> Result<u128> {
    mul_div(amount, pct, 100)
}
