//! Integer expressions.
//!
//! Integer arguments, as in `\setcounter{page}{2}`, are expressions with the
//!     usual precedence:
//!
//! ```text
//! expression := term (("+" | "-") term)*
//! term       := factor (("*" | "/") factor)*
//! factor     := ("+" | "-")* (digits | \value{counter} | "(" expression ")")
//! ```
//!
//! Division truncates towards zero.

use super::{describe, Error};
use crate::counter;
use crate::error::LatexError;
use crate::prelude as txl;

/// A cursor over the raw text of an argument.
pub(crate) struct Scanner<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(text: &'a str) -> Scanner<'a> {
        Scanner { text, pos: 0 }
    }

    pub fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    pub fn skip_spaces(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    /// Peeks at the next non-space character.
    pub fn peek(&mut self) -> Option<char> {
        self.skip_spaces();
        self.rest().chars().next()
    }

    pub fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    pub fn is_done(&mut self) -> bool {
        self.peek().is_none()
    }

    /// Reads characters while the predicate holds.
    pub fn take_while<F: Fn(char) -> bool>(&mut self, f: F) -> &'a str {
        let rest = self.rest();
        let end = rest.find(|c: char| !f(c)).unwrap_or(rest.len());
        self.pos += end;
        &rest[..end]
    }

    /// Reads `\name`, returning the name.
    pub fn command(&mut self) -> Option<&'a str> {
        if !self.eat('\\') {
            return None;
        }
        Some(self.take_while(|c| c.is_ascii_alphabetic()))
    }

    /// Reads `{text}`, returning the text.
    pub fn group(&mut self) -> Option<&'a str> {
        if !self.eat('{') {
            return None;
        }
        let text = self.take_while(|c| c != '}');
        if self.eat('}') {
            Some(text.trim())
        } else {
            None
        }
    }

    /// Reads signs and returns whether the result is negative.
    pub fn signs(&mut self) -> bool {
        let mut negative = false;
        loop {
            if self.eat('-') {
                negative = !negative;
            } else if !self.eat('+') {
                return negative;
            }
        }
    }
}

/// Evaluates an integer expression.
pub fn parse_integer(text: &str, counters: &counter::Registry) -> txl::Result<i32> {
    let mut scanner = Scanner::new(text);
    let value = expression(&mut scanner, counters)?;
    if !scanner.is_done() {
        return Err(Error::new("the end of the number", describe(scanner.rest())).into());
    }
    Ok(value)
}

fn expression(scanner: &mut Scanner, counters: &counter::Registry) -> txl::Result<i32> {
    let mut value = term(scanner, counters)?;
    loop {
        let op: fn(i32, i32) -> Option<i32> = if scanner.eat('+') {
            i32::checked_add
        } else if scanner.eat('-') {
            i32::checked_sub
        } else {
            return Ok(value);
        };
        let rhs = term(scanner, counters)?;
        value = op(value, rhs).ok_or(ArithmeticError::Overflow)?;
    }
}

fn term(scanner: &mut Scanner, counters: &counter::Registry) -> txl::Result<i32> {
    let mut value = factor(scanner, counters)?;
    loop {
        if scanner.eat('*') {
            let rhs = factor(scanner, counters)?;
            value = value.checked_mul(rhs).ok_or(ArithmeticError::Overflow)?;
        } else if scanner.eat('/') {
            let rhs = factor(scanner, counters)?;
            if rhs == 0 {
                return Err(ArithmeticError::DivisionByZero.into());
            }
            value = value.checked_div(rhs).ok_or(ArithmeticError::Overflow)?;
        } else {
            return Ok(value);
        }
    }
}

fn factor(scanner: &mut Scanner, counters: &counter::Registry) -> txl::Result<i32> {
    let negative = scanner.signs();
    let value = match scanner.peek() {
        Some('(') => {
            scanner.eat('(');
            let value = expression(scanner, counters)?;
            if !scanner.eat(')') {
                return Err(Error::new("`)`", describe(scanner.rest())).into());
            }
            value
        }
        Some('\\') => {
            let checkpoint = scanner.pos;
            match scanner.command() {
                Some("value") => match scanner.group() {
                    Some(name) => counters.get(name)?,
                    None => {
                        let got = describe(scanner.rest());
                        return Err(Error::new("a counter name in braces", got).into());
                    }
                },
                _ => {
                    return Err(Error::new("a number", describe(&scanner.text[checkpoint..]))
                        .with_guidance("only \\value{counter} may be used in integer expressions")
                        .into())
                }
            }
        }
        Some(c) if c.is_ascii_digit() => {
            let digits = scanner.take_while(|c| c.is_ascii_digit());
            digits
                .parse::<i32>()
                .map_err(|_| ArithmeticError::Overflow)?
        }
        _ => return Err(Error::new("a number", describe(scanner.rest())).into()),
    };
    Ok(if negative { -value } else { value })
}

#[derive(Debug)]
pub enum ArithmeticError {
    Overflow,
    DivisionByZero,
}

impl LatexError for ArithmeticError {
    fn title(&self) -> String {
        match self {
            ArithmeticError::Overflow => "arithmetic overflow".into(),
            ArithmeticError::DivisionByZero => "division by zero".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counters() -> counter::Registry {
        let mut counters = counter::Registry::default();
        counters.create("section", None).unwrap();
        counters.set("section", 4).unwrap();
        counters
    }

    macro_rules! integer_tests {
        ( $( ($name: ident, $input: expr, $want: expr), )+ ) => {
            $(
                #[test]
                fn $name() {
                    assert_eq!(parse_integer($input, &counters()).unwrap(), $want);
                }
            )+
        };
    }

    integer_tests![
        (literal, "12", 12),
        (spaces, " 12 ", 12),
        (negative, "-3", -3),
        (double_negative, "--3", 3),
        (precedence, "1 + 2 * 3", 7),
        (parentheses, "(1 + 2) * 3", 9),
        (division_truncates, "-7 / 2", -3),
        (value, "\\value{section} * 2", 8),
        (value_with_spaces, "\\value { section } - 1", 3),
    ];

    #[test]
    fn errors() {
        let counters = counters();
        for input in ["", "a", "1 +", "(1", "1 2x", "\\the", "\\value{chapter}"] {
            assert!(parse_integer(input, &counters).is_err(), "{input}");
        }
    }

    #[test]
    fn division_by_zero() {
        let err = parse_integer("1/0", &counters()).unwrap_err();
        assert_eq!(err.title(), "division by zero");
    }

    #[test]
    fn overflow() {
        assert!(parse_integer("99999999999", &counters()).is_err());
        assert!(parse_integer("2147483647 + 1", &counters()).is_err());
    }
}
