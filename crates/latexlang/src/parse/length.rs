//! Length expressions and coordinates.
//!
//! ```text
//! expression := term (("+" | "-") term)*
//! term       := factor (("*" | "/") decimal)*
//! factor     := ("+" | "-")* (decimal? (unit | \register) | "(" expression ")")
//! ```
//!
//! Literals like `2.54cm` are converted exactly, as TeX converts them.
//! A factor before a register scales it: `0.5\linewidth`.
//! All terms of a sum must have the same unit.
//! Results larger than TeX's maximum dimension are errors.

use super::number::Scanner;
use super::{describe, Error};
use crate::prelude as txl;
use crate::scope;
use dimen::{Length, Vector};

const UNIT_GUIDANCE: &str = "units are pt, pc, in, bp, cm, mm, dd, cc, sp, px, em, ex and %";

/// Evaluates a length expression, reading registers from the scope stack.
pub fn parse_length(text: &str, scope: &scope::Stack) -> txl::Result<Length> {
    let mut scanner = Scanner::new(text);
    let length = expression(&mut scanner, scope)?;
    if !scanner.is_done() {
        return Err(Error::new("the end of the length", describe(scanner.rest())).into());
    }
    Ok(length)
}

/// Evaluates a picture coordinate `x,y`.
///
/// Components without a unit are multiples of `\unitlength`.
pub fn parse_coordinate(text: &str, scope: &scope::Stack) -> txl::Result<Vector> {
    let Some((x, y)) = text.split_once(',') else {
        return Err(Error::new("a coordinate `x,y`", describe(text)).into());
    };
    Ok(Vector::new(component(x, scope)?, component(y, scope)?))
}

fn component(text: &str, scope: &scope::Stack) -> txl::Result<Length> {
    match text.trim().parse::<f64>() {
        Ok(factor) => Ok(unit_length(scope).checked_mul(factor)?),
        Err(_) => parse_length(text, scope),
    }
}

/// The value of `\unitlength`, or 1pt if the register does not exist.
pub fn unit_length(scope: &scope::Stack) -> Length {
    scope
        .length("unitlength")
        .unwrap_or_else(|_| Length::from_scaled(dimen::Scaled::ONE))
}

fn expression(scanner: &mut Scanner, scope: &scope::Stack) -> txl::Result<Length> {
    let mut length = term(scanner, scope)?;
    loop {
        if scanner.eat('+') {
            length = (length + term(scanner, scope)?)?.bounded()?;
        } else if scanner.eat('-') {
            length = (length - term(scanner, scope)?)?.bounded()?;
        } else {
            return Ok(length);
        }
    }
}

fn term(scanner: &mut Scanner, scope: &scope::Stack) -> txl::Result<Length> {
    let mut length = factor(scanner, scope)?;
    loop {
        if scanner.eat('*') {
            length = length.checked_mul(decimal(scanner)?)?;
        } else if scanner.eat('/') {
            let divisor = decimal(scanner)?;
            if divisor == 0.0 {
                return Err(super::number::ArithmeticError::DivisionByZero.into());
            }
            length = length.checked_div(divisor)?;
        } else {
            return Ok(length);
        }
    }
}

fn decimal(scanner: &mut Scanner) -> txl::Result<f64> {
    scanner.skip_spaces();
    let number = scanner.take_while(|c| c.is_ascii_digit() || c == '.');
    number
        .parse::<f64>()
        .map_err(|_| Error::new("a number", describe(scanner.rest())).into())
}

fn factor(scanner: &mut Scanner, scope: &scope::Stack) -> txl::Result<Length> {
    let negative = scanner.signs();
    if scanner.eat('(') {
        let length = expression(scanner, scope)?;
        if !scanner.eat(')') {
            return Err(Error::new("`)`", describe(scanner.rest())).into());
        }
        return Ok(if negative { -length } else { length });
    }
    scanner.skip_spaces();
    let number = scanner.take_while(|c| c.is_ascii_digit() || c == '.' || c == ',');
    let length = match scanner.peek() {
        Some('\\') => {
            let name = scanner.command().unwrap_or_default();
            let register = scope.length(name)?;
            if number.is_empty() {
                register
            } else {
                let factor = number
                    .replace(',', ".")
                    .parse::<f64>()
                    .map_err(|_| Error::new("a number", describe(number)))?;
                register.checked_mul(factor)?
            }
        }
        _ if number.is_empty() => {
            return Err(Error::new("a length", describe(scanner.rest()))
                .with_guidance("a length is a number followed by a unit, or a length register")
                .into());
        }
        _ => {
            let unit = scanner.take_while(|c| c.is_ascii_alphabetic() || c == '%');
            if unit.is_empty() {
                return Err(Error::new("a unit", describe(scanner.rest()))
                    .with_guidance(UNIT_GUIDANCE)
                    .into());
            }
            let literal = format!("{number}{unit}");
            literal
                .parse::<Length>()
                .map_err(|err| -> Box<crate::error::Error> {
                    match err {
                        dimen::ParseLengthError::UnknownUnit(_) => {
                            Error::new("a unit", format!("`{unit}`"))
                                .with_guidance(UNIT_GUIDANCE)
                                .into()
                        }
                        err => err.into(),
                    }
                })?
        }
    };
    Ok(if negative { -length } else { length })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scope() -> scope::Stack {
        let mut scope = scope::Stack::default();
        scope.new_length("parindent").unwrap();
        scope.set_length("parindent", "10pt".parse().unwrap()).unwrap();
        scope
    }

    fn length(s: &str) -> Length {
        s.parse().unwrap()
    }

    macro_rules! length_tests {
        ( $( ($name: ident, $input: expr, $want: expr), )+ ) => {
            $(
                #[test]
                fn $name() {
                    assert_eq!(parse_length($input, &scope()).unwrap(), length($want));
                }
            )+
        };
    }

    length_tests![
        (literal, "2.54cm", "2.54cm"),
        (spaces, " 1 pt ", "1pt"),
        (comma_decimal, "1,5pt", "1.5pt"),
        (negative, "-3pt", "-3pt"),
        (register, "\\parindent", "10pt"),
        (scaled_register, "2\\parindent", "20pt"),
        (negative_register, "-\\parindent", "-10pt"),
        (sum, "1pt + 2pt - 0.5pt", "2.5pt"),
        (product, "2pt * 3", "6pt"),
        (quotient, "(1pt + 2pt) / 2", "1.5pt"),
        (relative, "1.5em", "1.5em"),
    ];

    #[test]
    fn incompatible_units() {
        let err = parse_length("1pt + 1em", &scope()).unwrap_err();
        assert!(err.title().starts_with("incompatible units"));
    }

    #[test]
    fn errors() {
        let scope = scope();
        for input in ["", "pt", "12", "1zz", "\\nosuchlength", "1pt 2pt", "(1pt"] {
            assert!(parse_length(input, &scope).is_err(), "{input}");
        }
    }

    #[test]
    fn unknown_unit_has_guidance() {
        let err = parse_length("1zz", &scope()).unwrap_err();
        assert_eq!(err.title(), "expected a unit, found `zz`");
        assert_eq!(err.notes(), vec![UNIT_GUIDANCE.to_string()]);
    }

    #[test]
    fn coordinate_uses_unit_length() {
        let mut scope = scope();
        scope.new_length("unitlength").unwrap();
        scope.set_length("unitlength", length("2pt")).unwrap();
        assert_eq!(
            parse_coordinate("3, 1.5", &scope).unwrap(),
            Vector::new(length("6pt"), length("3pt"))
        );
        assert_eq!(
            parse_coordinate("1cm,\\parindent", &scope).unwrap(),
            Vector::new(length("1cm"), length("10pt"))
        );
    }

    #[test]
    fn dimension_too_large() {
        let scope = scope();
        for input in [
            "1pt * 99999999999999999999 + 1pt",
            "1pt / 0.0000000001",
            "20000\\parindent",
            "16000pt + 16000pt",
            "-16000pt - 16000pt",
        ] {
            let err = parse_length(input, &scope).unwrap_err();
            assert!(err.title().starts_with("dimension too large"), "{input}: {}", err.title());
        }
        assert!(parse_coordinate("1e30,0", &scope).is_err());
    }

    #[test]
    fn coordinate_without_comma() {
        assert!(parse_coordinate("3", &scope()).is_err());
    }

    #[test]
    fn unit_length_default() {
        assert_eq!(unit_length(&scope::Stack::default()), length("1pt"));
    }
}
