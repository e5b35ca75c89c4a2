/*!
Latexlang unit testing library

This is a crate for writing unit tests for code that uses Latexlang.
It is used extensively in the Latexlang standard library,
    so the unit tests there are good examples of what this crate can do.

Every test interprets a LaTeX snippet with the reference [Tree] backend
    and inspects the result.
The commands available to the snippet come from a [Library],
    passed using [TestOption::Library].

## Test types

### Output tests

Run using [`run_output_test`].

These tests verify that a snippet renders to a specific HTML string.
For example, an output test can verify that
```tex
\textbf{Hello}
```
renders as `<p><span class="bf">Hello</span></p>`.

### Equality tests

Run using [`run_equality_test`].

These tests verify that two different snippets render to the same HTML.
We generally use these to verify that some non-trivial snippet
    (like a counter manipulation) produces the same output as a constant.

### Failure tests

Run using [`run_failure_test`].

These tests verify that a snippet fails with a fatal error.

### Warning tests

Run using [`run_warning_test`].

These tests verify that a snippet succeeds but records a specific warning.

### Serde tests

Run using [`run_serde_test`].

These tests verify that the output tree of a snippet survives a round trip through JSON.

## The test suite macro

The preferred way to write a suite of unit tests is to use the [`test_suite`] macro.
See the macro's documentation for instructions on using it.
*/

#[cfg(test)]
extern crate self as latexlang_testing;

use latexlang::error::Error;
use latexlang::extension::Library;
use latexlang::output::tree::{self, Node, Tree};
use latexlang::vm::Interpreter;
use latexlang::Config;

/// Option passed to a test runner.
pub enum TestOption<'a> {
    /// The library is the result of invoking the provided static function.
    ///
    /// Overrides previous `Library` options.
    Library(fn() -> Library<Tree>),

    /// The provided static function is invoked after the interpreter is created
    ///     and before the snippet is interpreted.
    ///
    /// Overrides previous `CustomInitialization` or `CustomInitializationDyn` options.
    CustomInitialization(fn(&mut Interpreter<Tree>)),

    /// The provided closure is invoked after the interpreter is created
    ///     and before the snippet is interpreted.
    ///
    /// Overrides previous `CustomInitialization` or `CustomInitializationDyn` options.
    #[allow(clippy::type_complexity)]
    CustomInitializationDyn(Box<dyn Fn(&mut Interpreter<Tree>) + 'a>),

    /// The document class loaded before the snippet is interpreted.
    ///
    /// Overrides previous `DocumentClass` options.
    DocumentClass(&'a str),

    /// Number of decimals in rendered lengths.
    ///
    /// Overrides previous `Precision` options.
    Precision(u32),
}

/// Run an output test.
///
/// The test passes if the input renders to the expected HTML.
/// If `expect_warnings` is false the test also fails if any warning was recorded.
pub fn run_output_test(input: &str, want: &str, expect_warnings: bool, options: &[TestOption]) {
    let options = ResolvedOptions::new(options);
    let mut interpreter = initialize(&options);
    let got = render(&mut interpreter, input, &options)
        .map_err(|err| {
            println!("{err}");
            err
        })
        .unwrap();
    if got != want {
        println!("Output is different:");
        println!("------[got]------");
        println!("{got}");
        println!("------[want]-----");
        println!("{want}");
        println!("-----------------");
        panic!("Output test failed");
    }
    check_warnings(&interpreter, expect_warnings);
}

/// Run an equality test.
///
/// The test passes if the two inputs render to the same HTML.
pub fn run_equality_test(lhs: &str, rhs: &str, options: &[TestOption]) {
    let options = ResolvedOptions::new(options);
    let mut interpreter_1 = initialize(&options);
    let output_1 = render(&mut interpreter_1, lhs, &options)
        .map_err(|err| {
            println!("{err}");
            err
        })
        .unwrap();
    let mut interpreter_2 = initialize(&options);
    let output_2 = render(&mut interpreter_2, rhs, &options)
        .map_err(|err| {
            println!("{err}");
            err
        })
        .unwrap();
    if output_1 != output_2 {
        println!("Output is different:");
        println!("------[lhs]------");
        println!("{output_1}");
        println!("------[rhs]------");
        println!("{output_2}");
        println!("-----------------");
        panic!("Equality test failed");
    }
    check_warnings(&interpreter_1, false);
}

/// Run a failure test.
///
/// The test passes if interpreting the input fails.
/// Returns the error so callers can check its details.
pub fn run_failure_test(input: &str, options: &[TestOption]) -> Box<Error> {
    let options = ResolvedOptions::new(options);
    let mut interpreter = initialize(&options);
    match render(&mut interpreter, input, &options) {
        Ok(output) => {
            println!("Interpretation succeeded:");
            println!("{output}");
            panic!("Failure test did not pass: interpretation successful");
        }
        Err(err) => {
            println!("{err}");
            err
        }
    }
}

/// Run a warning test.
///
/// The test passes if interpreting the input succeeds and records a warning
///     whose message contains the provided text.
pub fn run_warning_test(input: &str, warning: &str, options: &[TestOption]) {
    let options = ResolvedOptions::new(options);
    let mut interpreter = initialize(&options);
    render(&mut interpreter, input, &options)
        .map_err(|err| {
            println!("{err}");
            err
        })
        .unwrap();
    let warnings: Vec<&str> = interpreter
        .diagnostics
        .warnings()
        .map(|diagnostic| diagnostic.message.as_str())
        .collect();
    if !warnings.iter().any(|message| message.contains(warning)) {
        println!("Recorded warnings: {warnings:?}");
        panic!("Warning test failed: no warning contains `{warning}`");
    }
}

#[cfg(not(feature = "serde"))]
/// Run a serialization/deserialization test
pub fn run_serde_test(input: &str, options: &[TestOption]) {
    _ = (input, options);
}

#[cfg(feature = "serde")]
/// Run a serialization/deserialization test
///
/// The test passes if the output tree is unchanged by a round trip through JSON.
pub fn run_serde_test(input: &str, options: &[TestOption]) {
    let options = ResolvedOptions::new(options);
    let mut interpreter = initialize(&options);
    let nodes = interpreter.run(input).unwrap();
    let serialized = serde_json::to_string_pretty(&nodes).unwrap();
    println!("Serialized output: {serialized}");
    let deserialized: Vec<Node> = serde_json::from_str(&serialized).unwrap();
    assert_eq!(nodes, deserialized);
}

struct ResolvedOptions<'a> {
    library: Option<fn() -> Library<Tree>>,
    custom_initialization: &'a dyn Fn(&mut Interpreter<Tree>),
    document_class: Option<&'a str>,
    precision: u32,
}

impl<'a> ResolvedOptions<'a> {
    pub fn new(options: &'a [TestOption]) -> Self {
        let mut resolved = Self {
            library: None,
            custom_initialization: &|_| {},
            document_class: None,
            precision: Config::DEFAULT_PRECISION,
        };
        for option in options {
            match option {
                TestOption::Library(f) => resolved.library = Some(*f),
                TestOption::CustomInitialization(f) => resolved.custom_initialization = f,
                TestOption::CustomInitializationDyn(f) => resolved.custom_initialization = f,
                TestOption::DocumentClass(name) => resolved.document_class = Some(*name),
                TestOption::Precision(precision) => resolved.precision = *precision,
            }
        }
        resolved
    }
}

fn initialize(options: &ResolvedOptions) -> Interpreter<Tree> {
    let config = Config {
        document_class: options.document_class.map(str::to_string),
        precision: options.precision,
        file_name: "testing.tex".into(),
        ..Default::default()
    };
    let mut interpreter = match options.library {
        None => Interpreter::new(Tree::default(), config),
        Some(library) => Interpreter::with_library(Tree::default(), config, library())
            .map_err(|err| {
                println!("{err}");
                err
            })
            .unwrap(),
    };
    (options.custom_initialization)(&mut interpreter);
    interpreter
}

fn render(
    interpreter: &mut Interpreter<Tree>,
    source: &str,
    options: &ResolvedOptions,
) -> Result<String, Box<Error>> {
    let nodes: Vec<Node> = interpreter.run(source)?;
    Ok(tree::to_html(&nodes, &interpreter.labels, options.precision))
}

fn check_warnings(interpreter: &Interpreter<Tree>, expect_warnings: bool) {
    let warnings = interpreter.diagnostics.warnings().count();
    match (expect_warnings, warnings) {
        (true, 0) => {
            panic!("expected warnings but didn't have any");
        }
        (true, _) | (false, 0) => (),
        (false, i) => {
            for diagnostic in interpreter.diagnostics.warnings() {
                println!("{diagnostic}");
            }
            panic!("did not expect warnings but had {i} warnings");
        }
    }
}

/// Macro to generate a suite of unit tests
///
/// The general use of this macros looks like this:
/// ```
/// # use latexlang_testing::*;
/// # fn library() -> latexlang::extension::Library<latexlang::output::tree::Tree> { todo!() }
/// test_suite![
///     options(TestOption::Library(library)),
///     output_tests(
///         (case_1, "input_1", "<p>output_1</p>"),
///     ),
///     equality_tests(
///         (case_2, "lhs_2", "rhs_2"),
///     ),
///     failure_tests(
///         (case_3, "input_3"),
///     ),
///     warning_tests(
///         (case_4, "input_4", "warning"),
///     ),
/// ];
/// ```
///
/// The arguments to the macro are:
///
/// - `options(option_1, option_2, ..., option_n)`: options to pass to the test runner.
///     This is a list of values of type [TestOption].
///     The options can be omitted, in which case they default to `options(TestOption::Library(library))`.
///     In this case `library` is a static function in the current scope that returns the library
///     to initialize the interpreter with.
///
/// - `output_tests(cases...)`: each case is of the form (case name, input, expected HTML).
///     The data here is fed into the [run_output_test] test runner.
///
/// - `equality_tests(cases...)`: each case is of the form (case name, left hand side, right hand side).
///     The data here is fed into the [run_equality_test] test runner.
///
/// - `failure_tests(cases...)`: each case is of the form (case name, input).
///     The data here is fed into the [run_failure_test] test runner.
///
/// - `warning_tests(cases...)`: each case is of the form (case name, input, warning text).
///     The data here is fed into the [run_warning_test] test runner.
///
/// - `serde_tests(cases...)`: each case is of the form (case name, input).
///     The data here is fed into the [run_serde_test] test runner.
///
/// Only one `options()` argument may be provided, and if provided it must be in the first position.
/// Zero or more of the other arguments may be provided, and in any order.
#[macro_export]
macro_rules! test_suite {
    ( options $options: tt, output_tests ( $( ($name: ident, $input: expr, $want: expr $(,)? ) ),* $(,)? ) $(,)? ) => (
        $(
            #[test]
            fn $name() {
                let input = $input;
                let want = $want;
                let options = vec! $options;
                latexlang_testing::run_output_test(&input, &want, false, &options);
            }
        )*
    );
    ( options $options: tt, output_tests $test_body: tt $(,)? ) => (
        compile_error!("Invalid test cases for output_tests: must be a list of tuples (name, input, want)");
    );
    ( options $options: tt, equality_tests ( $( ($name: ident, $lhs: expr, $rhs: expr $(,)? ) ),* $(,)? ) $(,)? ) => (
        $(
            #[test]
            fn $name() {
                let lhs = $lhs;
                let rhs = $rhs;
                let options = vec! $options;
                latexlang_testing::run_equality_test(&lhs, &rhs, &options);
            }
        )*
    );
    ( options $options: tt, equality_tests $test_body: tt $(,)? ) => (
        compile_error!("Invalid test cases for equality_tests: must be a list of tuples (name, lhs, rhs)");
    );
    ( options $options: tt, failure_tests ( $( ($name: ident, $input: expr $(,)? ) ),* $(,)? ) $(,)? ) => (
        $(
            #[test]
            fn $name() {
                let input = $input;
                let options = vec! $options;
                latexlang_testing::run_failure_test(&input, &options);
            }
        )*
    );
    ( options $options: tt, warning_tests ( $( ($name: ident, $input: expr, $warning: expr $(,)? ) ),* $(,)? ) $(,)? ) => (
        $(
            #[test]
            fn $name() {
                let input = $input;
                let warning = $warning;
                let options = vec! $options;
                latexlang_testing::run_warning_test(&input, &warning, &options);
            }
        )*
    );
    ( options $options: tt, serde_tests ( $( ($name: ident, $input: expr $(,)? ) ),* $(,)? ) $(,)? ) => (
        $(
            #[cfg_attr(not(feature = "serde"), ignore)]
            #[test]
            fn $name() {
                let input = $input;
                let options = vec! $options;
                latexlang_testing::run_serde_test(&input, &options);
            }
        )*
    );
    ( options $options: tt, $test_kind: ident $test_cases: tt $(,)? ) => (
        compile_error!("Invalid keyword: test_suite! only accepts the following keywords: `options`, `output_tests`, `equality_tests`, `failure_tests`, `warning_tests`, `serde_tests`");
    );
    ( options $options: tt, $( $test_kind: ident $test_cases: tt ),+ $(,)? ) => (
        $(
            latexlang_testing::test_suite![options $options, $test_kind $test_cases,];
        )+
    );
    ( $( $test_kind: ident $test_cases: tt ),+ $(,)? ) => (
        latexlang_testing::test_suite![options (latexlang_testing::TestOption::Library(library)), $( $test_kind $test_cases, )+ ];
    );
}
