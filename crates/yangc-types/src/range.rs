//! Numeric ranges and `range`/`length` restriction parsing

use crate::TypeErrorKind;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Inclusive bounds of a numeric or length domain.
///
/// Both integer and decimal64 bounds are held as [`Decimal`], which covers
/// the full `int64`/`uint64` spans as well as scaled decimal64 values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NumericRange {
    pub min: Decimal,
    pub max: Decimal,
}

impl NumericRange {
    pub const fn new(min: Decimal, max: Decimal) -> Self {
        Self { min, max }
    }

    /// Range with integer bounds; both bounds must fit in 64 bits
    pub fn integer(min: i128, max: i128) -> Self {
        Self::new(
            Decimal::from_i128_with_scale(min, 0),
            Decimal::from_i128_with_scale(max, 0),
        )
    }

    /// Canonical decimal64 range for the given fraction-digits: the `int64`
    /// span scaled by `10^-fraction_digits`
    pub fn decimal64(fraction_digits: u8) -> Self {
        let scale = u32::from(fraction_digits);
        Self::new(
            Decimal::from_i128_with_scale(i64::MIN.into(), scale),
            Decimal::from_i128_with_scale(i64::MAX.into(), scale),
        )
    }

    /// Domain of the `length` restriction
    pub fn length() -> Self {
        Self::integer(0, u64::MAX.into())
    }

    /// True when `other` lies entirely within this range
    pub fn contains(&self, other: &NumericRange) -> bool {
        self.min <= other.min && other.max <= self.max
    }

    /// Parse a `range` or `length` expression and check it narrows `base`.
    ///
    /// Accepted forms are `<low>..<high>` (whitespace around the bounds is
    /// ignored), a single value, and the `min`/`max` keywords standing for
    /// the bounds of `base`. With `fraction_digits` set, bounds may be
    /// decimals with at most that many fraction digits; otherwise they must
    /// be integers.
    pub fn parse_within(
        expression: &str,
        base: &NumericRange,
        fraction_digits: Option<u8>,
    ) -> Result<NumericRange, TypeErrorKind> {
        let invalid = |reason: &str| TypeErrorKind::InvalidRange {
            expression: expression.to_string(),
            reason: reason.to_string(),
        };

        if expression.contains('|') {
            return Err(invalid("multiple range parts are not supported"));
        }

        let (low, high) = match expression.split_once("..") {
            Some((low, high)) => (low.trim(), high.trim()),
            None => (expression.trim(), expression.trim()),
        };
        let bound = |text: &str| {
            parse_bound(text, base, fraction_digits).map_err(|err| match err {
                BoundError::Invalid(reason) => invalid(&reason),
                BoundError::Overflow => TypeErrorKind::BadRange {
                    requested: format!("{low}..{high}"),
                    allowed: base.to_string(),
                },
            })
        };
        let low = bound(low)?;
        let high = bound(high)?;
        if low > high {
            return Err(invalid("lower bound is greater than upper bound"));
        }

        let requested = NumericRange::new(low, high);
        if !base.contains(&requested) {
            return Err(TypeErrorKind::BadRange {
                requested: requested.to_string(),
                allowed: base.to_string(),
            });
        }
        Ok(requested)
    }
}

enum BoundError {
    Invalid(String),
    /// A well-formed number too large to represent
    Overflow,
}

fn parse_bound(
    text: &str,
    base: &NumericRange,
    fraction_digits: Option<u8>,
) -> Result<Decimal, BoundError> {
    match text {
        "" => return Err(BoundError::Invalid("missing bound".to_string())),
        "min" => return Ok(base.min),
        "max" => return Ok(base.max),
        _ => {}
    }

    let value = match Decimal::from_str(text) {
        Ok(value) => value,
        Err(_) if is_decimal_literal(text) => return Err(BoundError::Overflow),
        Err(_) => return Err(BoundError::Invalid(format!("invalid number {text:?}"))),
    };
    match fraction_digits {
        None if value.scale() > 0 || text.contains('.') => {
            Err(BoundError::Invalid(format!("{text} is not an integer")))
        }
        Some(digits) if value.normalize().scale() > u32::from(digits) => Err(
            BoundError::Invalid(format!("{text} has more than {digits} fraction digits")),
        ),
        _ => Ok(value),
    }
}

/// `-?digits(.digits)?`
fn is_decimal_literal(text: &str) -> bool {
    let unsigned = text.strip_prefix('-').unwrap_or(text);
    let (integer, fraction) = unsigned.split_once('.').unwrap_or((unsigned, "0"));
    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    digits(integer) && digits(fraction)
}

impl fmt::Display for NumericRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.min, self.max)
    }
}
