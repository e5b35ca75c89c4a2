//! Fixed-point lengths and units used in Latexlang.
//!
//! Every absolute length is stored as an integer number of scaled points,
//!     where one point is 2^16 scaled points.
//! This is the same representation that TeX uses, and the conversion routines
//!     in this crate follow TeX's exact algorithms so that results agree to the sp.
//!
//! Lengths in relative units (`em`, `ex` and `%`) cannot be converted at
//!     interpretation time.
//! They are stored with the same fixed-point precision but remain tagged with their unit.
//! Arithmetic between lengths with different tags is an error.

use std::fmt::Write;

mod length;
mod vector;

pub use length::IncompatibleUnitsError;
pub use length::Length;
pub use length::LengthUnit;
pub use length::ParseLengthError;
pub use length::RelativeLengthError;
pub use length::RelativeUnit;
pub use length::Unit;
pub use vector::Vector;

/// Scaled numbers.
///
/// This is the fixed-width numeric type used for all dimensions.
/// It is defined and described in part 7 "arithmetic with scaled
/// dimensions" starting at TeX.2021.99.
///
/// The inner value is the number multiplied by 2^16.
#[derive(Default, PartialEq, Eq, Debug, Copy, Clone, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scaled(pub i32);

impl Scaled {
    /// Representation of the number 0 as a [Scaled].
    pub const ZERO: Scaled = Scaled(0);

    /// Representation of the number 1 as a [Scaled].
    pub const ONE: Scaled = Scaled(1 << 16);

    /// Representation of the number 2 as a [Scaled].
    pub const TWO: Scaled = Scaled(1 << 17);

    /// Maximum possible dimension, which is (2^30-1)/2^16.
    ///
    /// Defined in TeX.2021.421.
    pub const MAX_DIMEN: Scaled = Scaled((1 << 30) - 1);

    /// Creates a scaled number from the digits of a decimal fraction.
    ///
    /// The digits `[2, 5]` correspond to the fraction `0.25`.
    /// Only the first 17 digits are significant.
    ///
    /// TeX.2021.102.
    pub fn from_decimal_fraction(digits: &[u8]) -> Scaled {
        let mut a = 0;
        for d in digits.iter().take(17).rev() {
            a = (a + (*d as i32) * Scaled::TWO.0) / 10
        }
        Scaled((a + 1) / 2)
    }

    /// Converts a decimal number given in some unit to a scaled number of points.
    ///
    /// The number is `integer + fraction`, where the fraction is a scaled
    ///     number in the range `[0, 1)`.
    /// Both parts must be non-negative; the caller is responsible for the sign.
    ///
    /// TeX.2021.458 and TeX.2021.461.
    pub fn from_unit(integer: i32, fraction: Scaled, unit: ScaledUnit) -> Result<Scaled, OverflowError> {
        if unit == ScaledUnit::ScaledPoint {
            return if integer > Scaled::MAX_DIMEN.0 {
                Err(OverflowError {})
            } else {
                Ok(Scaled(integer))
            };
        }
        let (mut integer, mut fraction) = (integer, fraction.0);
        let (n, d) = unit.conversion_fraction();
        if (n, d) != (1, 1) {
            let (quotient, remainder) = Scaled(integer).xn_over_d(n, d)?;
            let f = (n as i64 * fraction as i64 + (Scaled::ONE.0 as i64) * remainder.0 as i64)
                / d as i64;
            integer = quotient.0 + (f / Scaled::ONE.0 as i64) as i32;
            fraction = (f % Scaled::ONE.0 as i64) as i32;
        }
        if integer >= (1 << 14) {
            return Err(OverflowError {});
        }
        Ok(Scaled(integer * Scaled::ONE.0 + fraction))
    }

    /// Calculates the integer division _xn_/_d_ and remainder, where _x_ is this scaled number
    /// and _n_ and _d_ are integers in the range `[0,2^16]`.
    ///
    /// TeX.2021.107 computes this without overflowing 32-bit integers;
    ///     here 64-bit intermediates are used instead.
    pub fn xn_over_d(&self, n: i32, d: i32) -> Result<(Scaled, Scaled), OverflowError> {
        debug_assert!(n <= 0o200000);
        debug_assert!(d <= 0o200000);
        let b = (self.0 as i64) * (n as i64);
        let remainder = (b % (d as i64)) as i32;
        let b = b / d as i64;
        if b < -(Scaled::MAX_DIMEN.0 as i64) || b > Scaled::MAX_DIMEN.0 as i64 {
            return Err(OverflowError {});
        }
        Ok((Scaled(b as i32), Scaled(remainder)))
    }

    pub fn integer_part(self) -> i32 {
        self.0 / Scaled::ONE.0
    }

    pub fn fractional_part(self) -> Scaled {
        self % Scaled::ONE.0
    }

    pub fn abs(self) -> Scaled {
        Scaled(self.0.abs())
    }

    /// Writes the number in decimal without a unit, using the shortest
    ///     representation that reads back to the same scaled number.
    ///
    /// TeX.2021.103.
    pub(crate) fn write_decimal(self, fm: &mut impl Write) -> std::fmt::Result {
        if self.0 < 0 && self.integer_part() == 0 {
            fm.write_char('-')?;
        }
        write!(fm, "{}.", self.integer_part())?;
        let fraction = self.0.unsigned_abs() % Scaled::ONE.0 as u32;
        let mut f = Scaled(fraction as i32) * 10 + Scaled(5);
        let mut delta = Scaled(10);
        loop {
            if delta > Scaled::ONE {
                // round the last digit
                f = f + Scaled(0o100000 - 50000);
            }
            let digit = f.integer_part() as u32;
            fm.write_char(char::from_digit(digit, 10).unwrap_or('0'))?;
            f = f.fractional_part() * 10;
            delta = delta * 10;
            if f <= delta {
                break;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverflowError;

impl std::fmt::Display for OverflowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "dimension too large (the maximum is {})", Scaled::MAX_DIMEN)
    }
}

impl std::error::Error for OverflowError {}

impl std::fmt::Display for Scaled {
    fn fmt(&self, fm: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.write_decimal(fm)?;
        write!(fm, "pt")
    }
}

impl std::ops::Add<Scaled> for Scaled {
    type Output = Scaled;
    fn add(self, rhs: Scaled) -> Self::Output {
        Scaled(self.0 + rhs.0)
    }
}

impl std::ops::Sub<Scaled> for Scaled {
    type Output = Scaled;
    fn sub(self, rhs: Scaled) -> Self::Output {
        Scaled(self.0 - rhs.0)
    }
}

impl std::ops::Mul<i32> for Scaled {
    type Output = Scaled;
    fn mul(self, rhs: i32) -> Self::Output {
        Scaled(self.0 * rhs)
    }
}

impl std::ops::Rem<i32> for Scaled {
    type Output = Scaled;
    fn rem(self, rhs: i32) -> Self::Output {
        Scaled(self.0 % rhs)
    }
}

impl std::ops::Neg for Scaled {
    type Output = Scaled;
    fn neg(self) -> Self::Output {
        Scaled(-self.0)
    }
}

/// Absolute unit that a length literal may be written in.
///
/// Lengths in these units are converted to scaled points when they are created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScaledUnit {
    Point,
    Pica,
    Inch,
    BigPoint,
    Centimeter,
    Millimeter,
    DidotPoint,
    Cicero,
    Pixel,
    ScaledPoint,
}

impl ScaledUnit {
    pub const ALL: [ScaledUnit; 10] = [
        ScaledUnit::Point,
        ScaledUnit::Pica,
        ScaledUnit::Inch,
        ScaledUnit::BigPoint,
        ScaledUnit::Centimeter,
        ScaledUnit::Millimeter,
        ScaledUnit::DidotPoint,
        ScaledUnit::Cicero,
        ScaledUnit::Pixel,
        ScaledUnit::ScaledPoint,
    ];

    /// Parses a unit from its two character abbreviation.
    ///
    /// E.g., `"pc"` is parsed to [`ScaledUnit::Pica`].
    pub fn parse(s: &str) -> Option<Self> {
        ScaledUnit::ALL.into_iter().find(|unit| unit.abbreviation() == s)
    }

    pub fn abbreviation(&self) -> &'static str {
        use ScaledUnit::*;
        match self {
            Point => "pt",
            Pica => "pc",
            Inch => "in",
            BigPoint => "bp",
            Centimeter => "cm",
            Millimeter => "mm",
            DidotPoint => "dd",
            Cicero => "cc",
            Pixel => "px",
            ScaledPoint => "sp",
        }
    }

    /// Returns the fraction needed to convert to/from this unit to points.
    ///
    /// The return value is of the form (_n_, _d_).
    /// If a number represents _x_ in these units
    ///     then it is _y_=_nx_/_d_ points.
    ///
    /// Defined in TeX.2021.458; a pixel is 1/96 of an inch.
    pub fn conversion_fraction(&self) -> (i32, i32) {
        use ScaledUnit::*;
        match self {
            Point => (1, 1),
            Pica => (12, 1),
            Inch => (7227, 100),
            BigPoint => (7227, 7200),
            Centimeter => (7227, 254),
            Millimeter => (7227, 2540),
            DidotPoint => (1238, 1157),
            Cicero => (14856, 1157),
            Pixel => (7227, 9600),
            ScaledPoint => (1, 1 << 16),
        }
    }
}

impl std::fmt::Display for ScaledUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(format!("{}", Scaled::ONE), "1.0pt");
        assert_eq!(format!("{}", Scaled(98304)), "1.5pt");
        assert_eq!(format!("{}", Scaled(-98304)), "-1.5pt");
        assert_eq!(format!("{}", Scaled(-32768)), "-0.5pt");
        assert_eq!(format!("{}", Scaled::ZERO), "0.0pt");
        assert_eq!(format!("{}", Scaled(i32::MIN)), "-32768.0pt");
        assert_eq!(format!("{}", Scaled(i32::MIN + 32768)), "-32767.5pt");
    }

    #[test]
    fn decimal_fraction() {
        assert_eq!(Scaled::from_decimal_fraction(&[5]), Scaled(32768));
        assert_eq!(Scaled::from_decimal_fraction(&[2, 5]), Scaled(16384));
    }

    macro_rules! from_unit_tests {
        ( $( ($name: ident, $integer: expr, $unit: ident, $want: expr), )+ ) => {
            $(
                #[test]
                fn $name() {
                    let got = Scaled::from_unit($integer, Scaled::ZERO, ScaledUnit::$unit).unwrap();
                    assert_eq!(got, Scaled($want));
                }
            )+
        };
    }

    from_unit_tests!(
        (from_unit_point, 2, Point, 131072),
        (from_unit_pica, 1, Pica, 786432),
        (from_unit_inch, 1, Inch, 4736286),
        (from_unit_centimeter, 1, Centimeter, 1864679),
        (from_unit_big_point, 1, BigPoint, 65781),
        (from_unit_pixel, 1, Pixel, 49336),
        (from_unit_scaled_point, 7, ScaledPoint, 7),
    );

    #[test]
    fn from_unit_with_fraction() {
        let half = Scaled::from_decimal_fraction(&[5]);
        let got = Scaled::from_unit(1, half, ScaledUnit::Point).unwrap();
        assert_eq!(got, Scaled(98304));
    }

    #[test]
    fn from_unit_overflow() {
        assert_eq!(
            Scaled::from_unit(20000, Scaled::ZERO, ScaledUnit::Point),
            Err(OverflowError {})
        );
        assert_eq!(
            Scaled::from_unit(1000, Scaled::ZERO, ScaledUnit::Inch),
            Err(OverflowError {})
        );
    }

    #[test]
    fn parse_unit() {
        assert_eq!(ScaledUnit::parse("dd"), Some(ScaledUnit::DidotPoint));
        assert_eq!(ScaledUnit::parse("px"), Some(ScaledUnit::Pixel));
        assert_eq!(ScaledUnit::parse("em"), None);
    }
}
