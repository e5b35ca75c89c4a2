//! Unit-tagged lengths.

use crate::{OverflowError, Scaled, ScaledUnit};
use std::cmp::Ordering;

/// Number of scaled points in one pixel, the native unit of the renderer.
const SP_PER_PX: f64 = 65536.0 * 72.27 / 96.0;

/// A unit that cannot be converted to points at interpretation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RelativeUnit {
    Em,
    Ex,
    Percent,
}

impl RelativeUnit {
    pub fn parse(s: &str) -> Option<RelativeUnit> {
        Some(match s {
            "em" => RelativeUnit::Em,
            "ex" => RelativeUnit::Ex,
            "%" => RelativeUnit::Percent,
            _ => return None,
        })
    }

    pub fn abbreviation(&self) -> &'static str {
        match self {
            RelativeUnit::Em => "em",
            RelativeUnit::Ex => "ex",
            RelativeUnit::Percent => "%",
        }
    }
}

/// The unit tag carried by a [Length] after normalization.
///
/// All absolute units collapse to [Unit::Scaled].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Unit {
    Scaled,
    Relative(RelativeUnit),
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Unit::Scaled => write!(f, "sp"),
            Unit::Relative(unit) => write!(f, "{}", unit.abbreviation()),
        }
    }
}

/// A unit that a length may be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthUnit {
    Absolute(ScaledUnit),
    Relative(RelativeUnit),
}

impl LengthUnit {
    pub fn parse(s: &str) -> Option<LengthUnit> {
        if let Some(unit) = ScaledUnit::parse(s) {
            return Some(LengthUnit::Absolute(unit));
        }
        RelativeUnit::parse(s).map(LengthUnit::Relative)
    }
}

/// An immutable length.
///
/// The value is a fixed-point number with 16 fractional bits.
/// For absolute lengths it is the number of scaled points;
///     for relative lengths it is the number of relative units times 2^16.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Length {
    raw: i64,
    unit: Unit,
}

/// Error returned when two lengths with different units are combined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncompatibleUnitsError {
    pub operation: &'static str,
    pub lhs: Unit,
    pub rhs: Unit,
}

impl std::fmt::Display for IncompatibleUnitsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "incompatible units in length {}: {} and {}",
            self.operation, self.lhs, self.rhs
        )
    }
}

impl std::error::Error for IncompatibleUnitsError {}

/// Error returned when a relative length is converted to an absolute unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelativeLengthError {
    pub unit: RelativeUnit,
}

impl std::fmt::Display for RelativeLengthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "a length in relative unit `{}` cannot be converted to pixels",
            self.unit.abbreviation()
        )
    }
}

impl std::error::Error for RelativeLengthError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseLengthError {
    MissingNumber(String),
    UnknownUnit(String),
    Overflow,
}

impl std::fmt::Display for ParseLengthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseLengthError::MissingNumber(s) => {
                write!(f, "expected a number at the start of length `{s}`")
            }
            ParseLengthError::UnknownUnit(s) => write!(f, "unknown unit of measure `{s}`"),
            ParseLengthError::Overflow => write!(f, "{}", OverflowError {}),
        }
    }
}

impl std::error::Error for ParseLengthError {}

impl From<OverflowError> for ParseLengthError {
    fn from(_: OverflowError) -> Self {
        ParseLengthError::Overflow
    }
}

/// Rounds a number to the given number of decimal places.
pub fn round(value: f64, precision: u32) -> f64 {
    let factor = 10_f64.powi(precision as i32);
    let rounded = (value * factor).round() / factor;
    // avoid printing -0
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

impl Length {
    /// The zero length in scaled points.
    pub const ZERO: Length = Length {
        raw: 0,
        unit: Unit::Scaled,
    };

    /// Returns the zero length in the given unit space.
    pub fn zero(unit: Unit) -> Length {
        Length { raw: 0, unit }
    }

    /// Creates a length from a floating point value.
    ///
    /// Absolute values are converted to scaled points and rounded to the nearest sp.
    pub fn new(value: f64, unit: LengthUnit) -> Length {
        match unit {
            LengthUnit::Absolute(unit) => {
                let (n, d) = unit.conversion_fraction();
                Length {
                    raw: (value * 65536.0 * n as f64 / d as f64).round() as i64,
                    unit: Unit::Scaled,
                }
            }
            LengthUnit::Relative(unit) => Length {
                raw: (value * 65536.0).round() as i64,
                unit: Unit::Relative(unit),
            },
        }
    }

    pub fn from_scaled(scaled: Scaled) -> Length {
        Length {
            raw: scaled.0 as i64,
            unit: Unit::Scaled,
        }
    }

    /// Creates a length from a decimal literal, e.g. `2.54cm`.
    ///
    /// Absolute values are converted exactly as TeX converts them.
    pub fn from_decimal(
        negative: bool,
        integer: i32,
        fraction_digits: &[u8],
        unit: LengthUnit,
    ) -> Result<Length, OverflowError> {
        let fraction = Scaled::from_decimal_fraction(fraction_digits);
        let length = match unit {
            LengthUnit::Absolute(unit) => {
                Length::from_scaled(Scaled::from_unit(integer, fraction, unit)?)
            }
            LengthUnit::Relative(unit) => Length {
                raw: integer as i64 * Scaled::ONE.0 as i64 + fraction.0 as i64,
                unit: Unit::Relative(unit),
            },
        };
        Ok(if negative { -length } else { length })
    }

    /// Returns an error if the length is larger than TeX's maximum dimension.
    pub fn bounded(self) -> Result<Length, OverflowError> {
        if self.raw.unsigned_abs() > Scaled::MAX_DIMEN.0 as u64 {
            return Err(OverflowError {});
        }
        Ok(self)
    }

    /// Multiplies the length by a number, failing if the product is larger than
    ///     TeX's maximum dimension.
    pub fn checked_mul(self, factor: f64) -> Result<Length, OverflowError> {
        Length::from_raw_f64(self.raw as f64 * factor, self.unit)
    }

    /// Divides the length by a number, failing if the quotient is larger than
    ///     TeX's maximum dimension.
    pub fn checked_div(self, divisor: f64) -> Result<Length, OverflowError> {
        Length::from_raw_f64(self.raw as f64 / divisor, self.unit)
    }

    fn from_raw_f64(raw: f64, unit: Unit) -> Result<Length, OverflowError> {
        let raw = raw.round();
        if !raw.is_finite() || raw.abs() > Scaled::MAX_DIMEN.0 as f64 {
            return Err(OverflowError {});
        }
        Ok(Length {
            raw: raw as i64,
            unit,
        })
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// The fixed-point value of the length.
    pub fn raw(&self) -> i64 {
        self.raw
    }

    pub fn is_relative(&self) -> bool {
        matches!(self.unit, Unit::Relative(_))
    }

    fn check(&self, other: &Length, operation: &'static str) -> Result<(), IncompatibleUnitsError> {
        if self.unit != other.unit {
            return Err(IncompatibleUnitsError {
                operation,
                lhs: self.unit,
                rhs: other.unit,
            });
        }
        Ok(())
    }

    /// Three-way comparison of two lengths in the same unit.
    pub fn compare(&self, other: &Length) -> Result<Ordering, IncompatibleUnitsError> {
        self.check(other, "comparison")?;
        Ok(self.raw.cmp(&other.raw))
    }

    /// Returns `self / other` as a plain number.
    pub fn ratio(&self, other: &Length) -> Result<f64, IncompatibleUnitsError> {
        self.check(other, "ratio")?;
        Ok(self.raw as f64 / other.raw as f64)
    }

    /// Returns `sqrt(self^2 + other^2)`, the length of the hypotenuse.
    pub fn norm(&self, other: &Length) -> Result<Length, IncompatibleUnitsError> {
        self.check(other, "norm")?;
        let (a, b) = (self.raw as f64, other.raw as f64);
        Ok(Length {
            raw: (a * a + b * b).sqrt().round() as i64,
            unit: self.unit,
        })
    }

    pub fn abs(&self) -> Length {
        Length {
            raw: self.raw.saturating_abs(),
            unit: self.unit,
        }
    }

    /// Returns the smallest of the lengths, or [None] if there are none.
    pub fn minimum<'a, I: IntoIterator<Item = &'a Length>>(
        lengths: I,
    ) -> Result<Option<Length>, IncompatibleUnitsError> {
        Length::extremum(lengths, Ordering::Less)
    }

    /// Returns the largest of the lengths, or [None] if there are none.
    pub fn maximum<'a, I: IntoIterator<Item = &'a Length>>(
        lengths: I,
    ) -> Result<Option<Length>, IncompatibleUnitsError> {
        Length::extremum(lengths, Ordering::Greater)
    }

    fn extremum<'a, I: IntoIterator<Item = &'a Length>>(
        lengths: I,
        keep: Ordering,
    ) -> Result<Option<Length>, IncompatibleUnitsError> {
        let mut best: Option<Length> = None;
        for length in lengths {
            best = match best {
                None => Some(*length),
                Some(current) => {
                    if length.compare(&current)? == keep {
                        Some(*length)
                    } else {
                        Some(current)
                    }
                }
            }
        }
        Ok(best)
    }

    /// Returns the value in pixels, rounded to the given number of decimals.
    pub fn to_px(&self, precision: u32) -> Result<f64, RelativeLengthError> {
        match self.unit {
            Unit::Scaled => Ok(round(self.raw as f64 / SP_PER_PX, precision)),
            Unit::Relative(unit) => Err(RelativeLengthError { unit }),
        }
    }

    /// Returns the renderer-facing form of the length.
    ///
    /// Absolute lengths are given in pixels; relative lengths keep their unit.
    pub fn to_css(&self, precision: u32) -> String {
        match self.unit {
            Unit::Scaled => format!("{}px", round(self.raw as f64 / SP_PER_PX, precision)),
            Unit::Relative(unit) => format!(
                "{}{}",
                round(self.raw as f64 / 65536.0, precision),
                unit.abbreviation()
            ),
        }
    }
}

impl std::fmt::Display for Length {
    /// Prints the length the way `\the` does: `12.0pt`, `1.5em`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let suffix = match self.unit {
            Unit::Scaled => "pt",
            Unit::Relative(unit) => unit.abbreviation(),
        };
        match i32::try_from(self.raw) {
            Ok(raw) => Scaled(raw).write_decimal(f)?,
            Err(_) => write!(f, "{}", self.raw as f64 / 65536.0)?,
        }
        write!(f, "{suffix}")
    }
}

impl std::str::FromStr for Length {
    type Err = ParseLengthError;

    /// Parses literals like `1.5cm`, `-3 pt` or `50%`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut negative = false;
        let mut rest = trimmed;
        while let Some(c) = rest.chars().next() {
            match c {
                '-' => negative = !negative,
                '+' => {}
                _ => break,
            }
            rest = rest[1..].trim_start();
        }
        let end = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == ','))
            .unwrap_or(rest.len());
        let (number, unit) = rest.split_at(end);
        let (integer, fraction) = match number.find(['.', ',']) {
            None => (number, ""),
            Some(i) => (&number[..i], &number[i + 1..]),
        };
        if integer.is_empty() && fraction.is_empty() {
            return Err(ParseLengthError::MissingNumber(trimmed.into()));
        }
        let integer: i32 = if integer.is_empty() {
            0
        } else {
            integer.parse().map_err(|_| ParseLengthError::Overflow)?
        };
        let digits: Vec<u8> = fraction
            .bytes()
            .filter(u8::is_ascii_digit)
            .map(|b| b - b'0')
            .collect();
        let unit_str = unit.trim();
        let unit = LengthUnit::parse(unit_str)
            .ok_or_else(|| ParseLengthError::UnknownUnit(unit_str.into()))?;
        Ok(Length::from_decimal(negative, integer, &digits, unit)?)
    }
}

impl std::ops::Add<Length> for Length {
    type Output = Result<Length, IncompatibleUnitsError>;
    fn add(self, rhs: Length) -> Self::Output {
        self.check(&rhs, "addition")?;
        Ok(Length {
            raw: self.raw.saturating_add(rhs.raw),
            unit: self.unit,
        })
    }
}

impl std::ops::Sub<Length> for Length {
    type Output = Result<Length, IncompatibleUnitsError>;
    fn sub(self, rhs: Length) -> Self::Output {
        self.check(&rhs, "subtraction")?;
        Ok(Length {
            raw: self.raw.saturating_sub(rhs.raw),
            unit: self.unit,
        })
    }
}

impl std::ops::Mul<f64> for Length {
    type Output = Length;
    fn mul(self, rhs: f64) -> Self::Output {
        Length {
            raw: (self.raw as f64 * rhs).round() as i64,
            unit: self.unit,
        }
    }
}

impl std::ops::Div<f64> for Length {
    type Output = Length;
    fn div(self, rhs: f64) -> Self::Output {
        Length {
            raw: (self.raw as f64 / rhs).round() as i64,
            unit: self.unit,
        }
    }
}

impl std::ops::Neg for Length {
    type Output = Length;
    fn neg(self) -> Self::Output {
        Length {
            raw: self.raw.saturating_neg(),
            unit: self.unit,
        }
    }
}
