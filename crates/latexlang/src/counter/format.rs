//! Numbering styles for counter values.

/// A way of writing a counter value, named after the LaTeX command that uses it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Style {
    Arabic,
    Roman,
    UpperRoman,
    Alph,
    UpperAlph,
    FnSymbol,
}

impl Style {
    pub const ALL: [Style; 6] = [
        Style::Arabic,
        Style::Roman,
        Style::UpperRoman,
        Style::Alph,
        Style::UpperAlph,
        Style::FnSymbol,
    ];

    /// The name of the command that formats with this style.
    pub fn command_name(&self) -> &'static str {
        match self {
            Style::Arabic => "arabic",
            Style::Roman => "roman",
            Style::UpperRoman => "Roman",
            Style::Alph => "alph",
            Style::UpperAlph => "Alph",
            Style::FnSymbol => "fnsymbol",
        }
    }

    pub fn from_command_name(name: &str) -> Option<Style> {
        Style::ALL.into_iter().find(|s| s.command_name() == name)
    }

    pub fn format(&self, value: i32) -> Result<String, DomainError> {
        match self {
            Style::Arabic => Ok(arabic(value)),
            Style::Roman => roman(value, false),
            Style::UpperRoman => roman(value, true),
            Style::Alph => alph(value, false),
            Style::UpperAlph => alph(value, true),
            Style::FnSymbol => fnsymbol(value),
        }
    }
}

/// Error returned when a value is outside the range a style can represent.
///
/// This is a recoverable error: the caller records a warning and omits the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainError {
    pub style: Style,
    pub value: i32,
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let range = match self.style {
            Style::Arabic => "any integer",
            Style::Roman | Style::UpperRoman => "positive integers",
            Style::Alph | Style::UpperAlph => "1 to 26",
            Style::FnSymbol => "1 to 9",
        };
        write!(
            f,
            "value {} cannot be written with \\{} (it supports {})",
            self.value,
            self.style.command_name(),
            range
        )
    }
}

pub fn arabic(value: i32) -> String {
    value.to_string()
}

const ROMAN_NUMERALS: [(i32, &str); 13] = [
    (1000, "m"),
    (900, "cm"),
    (500, "d"),
    (400, "cd"),
    (100, "c"),
    (90, "xc"),
    (50, "l"),
    (40, "xl"),
    (10, "x"),
    (9, "ix"),
    (5, "v"),
    (4, "iv"),
    (1, "i"),
];

pub fn roman(value: i32, upper: bool) -> Result<String, DomainError> {
    if value < 1 {
        return Err(DomainError {
            style: if upper { Style::UpperRoman } else { Style::Roman },
            value,
        });
    }
    let mut remaining = value;
    let mut s = String::new();
    for (amount, numeral) in ROMAN_NUMERALS {
        while remaining >= amount {
            s.push_str(numeral);
            remaining -= amount;
        }
    }
    if upper {
        s.make_ascii_uppercase();
    }
    Ok(s)
}

pub fn alph(value: i32, upper: bool) -> Result<String, DomainError> {
    if !(1..=26).contains(&value) {
        return Err(DomainError {
            style: if upper { Style::UpperAlph } else { Style::Alph },
            value,
        });
    }
    let first = if upper { b'A' } else { b'a' };
    Ok(char::from(first + (value - 1) as u8).to_string())
}

const FOOTNOTE_SYMBOLS: [&str; 9] = ["*", "†", "‡", "§", "¶", "‖", "**", "††", "‡‡"];

pub fn fnsymbol(value: i32) -> Result<String, DomainError> {
    usize::try_from(value - 1)
        .ok()
        .and_then(|i| FOOTNOTE_SYMBOLS.get(i))
        .map(|s| s.to_string())
        .ok_or(DomainError {
            style: Style::FnSymbol,
            value,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! format_tests {
        ( $( ($name: ident, $style: ident, $value: expr, $want: expr), )+ ) => {
            $(
                #[test]
                fn $name() {
                    assert_eq!(Style::$style.format($value), Ok($want.to_string()));
                }
            )+
        };
    }

    format_tests!(
        (arabic_positive, Arabic, 42, "42"),
        (arabic_zero, Arabic, 0, "0"),
        (roman_1, Roman, 1, "i"),
        (roman_4, Roman, 4, "iv"),
        (roman_9, Roman, 9, "ix"),
        (roman_14, Roman, 14, "xiv"),
        (roman_1994, UpperRoman, 1994, "MCMXCIV"),
        (roman_3999, UpperRoman, 3999, "MMMCMXCIX"),
        (alph_1, Alph, 1, "a"),
        (alph_26, UpperAlph, 26, "Z"),
        (fnsymbol_1, FnSymbol, 1, "*"),
        (fnsymbol_2, FnSymbol, 2, "†"),
        (fnsymbol_6, FnSymbol, 6, "‖"),
        (fnsymbol_9, FnSymbol, 9, "‡‡"),
    );

    #[test]
    fn out_of_domain() {
        assert!(roman(0, false).is_err());
        assert!(alph(0, false).is_err());
        assert_eq!(
            alph(27, true),
            Err(DomainError {
                style: Style::UpperAlph,
                value: 27
            })
        );
        assert!(fnsymbol(0).is_err());
        assert_eq!(
            fnsymbol(10),
            Err(DomainError {
                style: Style::FnSymbol,
                value: 10
            })
        );
    }

    #[test]
    fn domain_error_message() {
        let err = fnsymbol(10).unwrap_err();
        assert_eq!(
            format!("{err}"),
            "value 10 cannot be written with \\fnsymbol (it supports 1 to 9)"
        );
    }

    #[test]
    fn command_names() {
        for style in Style::ALL {
            assert_eq!(Style::from_command_name(style.command_name()), Some(style));
        }
        assert_eq!(Style::from_command_name("greek"), None);
    }
}
