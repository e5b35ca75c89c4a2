//! Terminal coloring
//!
//! Diagnostics are colored using the
//! [Colored crate](https://docs.rs/colored/latest/colored/), but only when the
//! `color` Cargo feature is enabled.
//!
//! The module contains a single trait [`Colorize`].
//! With the feature enabled, the trait forwards every call to the Colored crate.
//! With the feature disabled, every method returns the string unchanged.
//! Downstream code calls the trait methods either way:
//!
//! ```
//! use latexlang_stdext::color::Colorize;
//! println!["{}: {}", "warning".bold().bright_yellow(), "unknown package `foo`"];
//! ```

#[cfg(feature = "color")]
pub type ColoredString = colored::ColoredString;

#[cfg(not(feature = "color"))]
pub type ColoredString = String;

macro_rules! colorize_impl {
    ( $( $method_name: ident, )+ ) => {
        /// Trait that provides coloring methods on strings.
        ///
        /// See the module documentation for information.
        pub trait Colorize {
            $(
                fn $method_name(self) -> ColoredString;
            )+
        }
        #[cfg(feature="color")]
        impl Colorize for ColoredString {
            $(
                fn $method_name(self) -> ColoredString {
                    colored::Colorize::$method_name(self)
                }
            )+
        }
        #[cfg(feature="color")]
        impl Colorize for &str {
            $(
                fn $method_name(self) -> ColoredString {
                    colored::Colorize::$method_name(self)
                }
            )+
        }
        #[cfg(not(feature="color"))]
        impl Colorize for String {
            $(
                fn $method_name(self) -> ColoredString {
                    self
                }
            )+
        }
        #[cfg(not(feature="color"))]
        impl Colorize for &str {
            $(
                fn $method_name(self) -> ColoredString {
                    self.to_string()
                }
            )+
        }
    };
}

colorize_impl!(
    bold,
    dimmed,
    bright_blue,
    bright_cyan,
    bright_red,
    bright_yellow,
);
