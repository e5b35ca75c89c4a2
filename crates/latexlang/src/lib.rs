//! # Latexlang: an interpreter for LaTeX-style markup.
//!
//! Latexlang translates LaTeX-style markup into a generic output tree.
//! The crate contains the interpretation core:
//!
//! - the [counter registry](counter), with hierarchical resets and numbering styles;
//! - the [scope stack](scope), which holds the inheritable formatting state;
//! - the [argument dispatcher](dispatch), the protocol the grammar uses to parse
//!     command arguments;
//! - the [command registry](command) and the [extension loader](extension),
//!     through which document classes and packages add commands.
//!
//! Lengths and their units live in the separate `dimen` crate.
//! Commands themselves are provided by the `latexlang-stdlib` crate.
//!
//! ```
//! use latexlang::output::tree::{self, Tree};
//! use latexlang::vm::Interpreter;
//! use latexlang::Config;
//!
//! let mut interpreter = Interpreter::new(Tree::default(), Config::default());
//! let nodes = interpreter.run("Hello,\n  world").unwrap();
//! assert_eq!(tree::to_html(&nodes, &interpreter.labels, 3), "<p>Hello, world</p>");
//! ```

extern crate latexlang_stdext;

pub mod command;
pub mod config;
pub mod counter;
pub mod dispatch;
pub mod error;
pub mod extension;
pub mod label;
pub mod log;
pub mod output;
pub mod parse;
pub mod prelude;
pub mod scope;
pub mod vm;

pub use config::Config;
pub use dimen;
