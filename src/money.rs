use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use thiserror::Error;

/**
 * Amounts are i64 counts of ten-thousandths. Four decimal digits is
 * enough to carry interest on any balance the withdrawal ceiling
 * allows, and integer arithmetic keeps every deposit and withdrawal
 * exact. Parsing accepts signed input on purpose: whether a negative
 * amount is acceptable is an account rule, not a syntax rule.
 */
const SCALE: i64 = 10_000;
const FRACTION_DIGITS: u32 = 4;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("not a number")]
    NotANumber,
    #[error("more than {FRACTION_DIGITS} digits past the decimal point")]
    TooPrecise,
    #[error("amount out of representable range")]
    OutOfRange,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Amount(i64);

impl Amount {
    pub const ZERO: Amount = Amount::from_raw(0);

    pub const fn from_units(units: i64) -> Amount {
        Amount(units * SCALE)
    }

    pub const fn from_raw(raw: i64) -> Amount {
        Amount(raw)
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub fn parse(input: &str) -> Result<Amount, MoneyError> {
        let trimmed = input.trim();
        let (negative, body) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let (units, fraction) = match body.split_once('.') {
            Some((units, fraction)) => (units, fraction),
            None => (body, ""),
        };

        if units.is_empty() && fraction.is_empty() {
            return Err(MoneyError::NotANumber);
        }
        // A second dot lands in `fraction` and fails the digit check.
        if !units.bytes().all(|b| b.is_ascii_digit())
            || !fraction.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(MoneyError::NotANumber);
        }
        if fraction.len() > FRACTION_DIGITS as usize {
            return Err(MoneyError::TooPrecise);
        }

        let whole: i64 = if units.is_empty() {
            0
        } else {
            units.parse().map_err(|_| MoneyError::OutOfRange)?
        };
        let mut raw = whole.checked_mul(SCALE).ok_or(MoneyError::OutOfRange)?;
        if !fraction.is_empty() {
            let padding = 10i64.pow(FRACTION_DIGITS - fraction.len() as u32);
            let ten_thousandths: i64 = fraction.parse().map_err(|_| MoneyError::OutOfRange)?;
            raw = raw
                .checked_add(ten_thousandths * padding)
                .ok_or(MoneyError::OutOfRange)?;
        }
        if negative {
            raw = -raw;
        }
        Ok(Amount(raw))
    }

    /**
     * self * rate / 100, for a rate expressed in percent. The product of
     * two scaled i64s needs an i128 intermediate; anything below the
     * fourth decimal digit truncates toward zero.
     */
    pub fn percent_of(self, rate: Amount) -> Amount {
        let product = self.0 as i128 * rate.0 as i128;
        Amount((product / (100 * SCALE as i128)) as i64)
    }
}

impl Add for Amount {
    type Output = Amount;
    fn add(self, other: Amount) -> Amount {
        Amount(self.0 + other.0)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, other: Amount) {
        self.0 += other.0;
    }
}

impl Sub for Amount {
    type Output = Amount;
    fn sub(self, other: Amount) -> Amount {
        Amount(self.0 - other.0)
    }
}

impl SubAssign for Amount {
    fn sub_assign(&mut self, other: Amount) {
        self.0 -= other.0;
    }
}

/**
 * Trailing zeros are trimmed but one fractional digit always remains,
 * so a whole balance of 800 reads "800.0".
 */
impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let units = (self.0 / SCALE).unsigned_abs();
        let mut fraction = (self.0 % SCALE).unsigned_abs();
        let mut digits = FRACTION_DIGITS as usize;
        while digits > 1 && fraction % 10 == 0 {
            fraction /= 10;
            digits -= 1;
        }
        write!(f, "{sign}{units}.{fraction:0>digits$}")
    }
}
