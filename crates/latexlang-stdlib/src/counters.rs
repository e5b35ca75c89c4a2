//! Counter commands
//!
//! Counters are created with `\newcounter`, which also defines the command
//!     `\the<name>` that prints the counter's representation.
//! The formatting commands `\arabic`, `\roman`, `\Roman`, `\alph`, `\Alph` and
//!     `\fnsymbol` print the raw value of a counter in a given style.
//! A value a style cannot represent, like `\alph` of 27, produces a warning and no output.

use latexlang::command::{Arguments, Implementation};
use latexlang::counter::{Part, Style};
use latexlang::label::Snapshot;
use latexlang::output::Backend;
use latexlang::prelude as txl;
use latexlang::vm::Interpreter;

pub const NEWCOUNTER_DOC: &str = r"Create a new counter

Usage: `\newcounter{<name>}[<parent>]`

The counter starts at zero.
If a parent is given, the counter is reset whenever the parent is stepped,
    and its representation is prefixed with the parent's, as in `2.1`.
The command `\the<name>` is defined to print the representation.
";

pub const SETCOUNTER_DOC: &str = r"Set a counter

Usage: `\setcounter{<name>}{<integer expression>}`

The expression may refer to other counters with `\value{<name>}`.
";

pub const ADDTOCOUNTER_DOC: &str = "Add an integer expression to a counter";

pub const STEPCOUNTER_DOC: &str = r"Increment a counter and reset its dependents

Usage: `\stepcounter{<name>}`

Every counter created with this counter as its parent is reset to zero,
    and so on recursively.
";

pub const REFSTEPCOUNTER_DOC: &str = r"Step a counter and make it the target of `\label`

Usage: `\refstepcounter{<name>}`

After `\refstepcounter{equation}\label{eq}`, `\ref{eq}` prints the representation
    of the `equation` counter at the time of the `\label`.
";

pub const VALUE_DOC: &str = "Print the value of a counter in arabic numerals";

pub const STYLE_DOC: &str = r"Print the value of a counter in a numbering style

The styles are `\arabic` (1, 2, 3), `\roman` (i, ii, iii), `\Roman` (I, II, III),
    `\alph` (a, b, c), `\Alph` (A, B, C) and `\fnsymbol` (*, †, ‡).
";

pub const COUNTERWITHIN_DOC: &str = r"Reset a counter whenever another counter is stepped

Usage: `\counterwithin{<counter>}{<parent>}`

The starred form only adds the reset; otherwise the counter's representation
    is also prefixed with the parent's.
";

pub const COUNTERWITHOUT_DOC: &str = r"Undo `\counterwithin`

Usage: `\counterwithout{<counter>}{<parent>}`

The starred form only removes the reset; otherwise the counter's representation
    is also set back to its value in arabic numerals.
";

/// Creates the counter and defines `\the<name>`.
pub fn new_counter<B: Backend>(
    interpreter: &mut Interpreter<B>,
    name: &str,
    parent: Option<&str>,
) -> txl::Result<()> {
    interpreter.counters.create(name, parent)?;
    interpreter
        .commands
        .insert(format!("the{name}"), Implementation::new(the_counter::<B>));
    Ok(())
}

/// Creates the counter unless it already exists.
pub fn ensure_counter<B: Backend>(
    interpreter: &mut Interpreter<B>,
    name: &str,
    parent: Option<&str>,
) -> txl::Result<()> {
    if interpreter.counters.contains(name) {
        return Ok(());
    }
    new_counter(interpreter, name, parent)
}

/// Steps the counter and makes its representation the current label.
///
/// Returns the anchor of the new label.
pub fn ref_step<B: Backend>(
    interpreter: &mut Interpreter<B>,
    name: &str,
    anchor_prefix: &str,
) -> txl::Result<Snapshot> {
    interpreter.counters.step(name)?;
    let text = interpreter.display_counter(name)?;
    let snapshot = Snapshot::new(interpreter.new_anchor(anchor_prefix), text);
    interpreter.scope.set_current_label(snapshot.clone());
    Ok(snapshot)
}

pub fn get_newcounter<B: Backend>() -> Implementation<B> {
    Implementation::new(newcounter_fn).with_doc(NEWCOUNTER_DOC)
}

fn newcounter_fn<B: Backend>(
    interpreter: &mut Interpreter<B>,
    arguments: Arguments<B::Node>,
) -> txl::Result<Vec<B::Node>> {
    let name = arguments.text(0)?;
    let parent = arguments.optional_text(1)?;
    new_counter(interpreter, &name, parent.as_deref())?;
    Ok(vec![])
}

fn the_counter<B: Backend>(
    interpreter: &mut Interpreter<B>,
    arguments: Arguments<B::Node>,
) -> txl::Result<Vec<B::Node>> {
    let name = arguments.name().strip_prefix("the").unwrap_or(arguments.name());
    let text = interpreter.display_counter(name)?;
    Ok(vec![interpreter.text(&text)])
}

pub fn get_setcounter<B: Backend>() -> Implementation<B> {
    Implementation::new(setcounter_fn).with_doc(SETCOUNTER_DOC)
}

fn setcounter_fn<B: Backend>(
    interpreter: &mut Interpreter<B>,
    arguments: Arguments<B::Node>,
) -> txl::Result<Vec<B::Node>> {
    interpreter
        .counters
        .set(&arguments.text(0)?, arguments.integer(1)?)?;
    Ok(vec![])
}

pub fn get_addtocounter<B: Backend>() -> Implementation<B> {
    Implementation::new(addtocounter_fn).with_doc(ADDTOCOUNTER_DOC)
}

fn addtocounter_fn<B: Backend>(
    interpreter: &mut Interpreter<B>,
    arguments: Arguments<B::Node>,
) -> txl::Result<Vec<B::Node>> {
    interpreter
        .counters
        .add(&arguments.text(0)?, arguments.integer(1)?)?;
    Ok(vec![])
}

pub fn get_stepcounter<B: Backend>() -> Implementation<B> {
    Implementation::new(stepcounter_fn).with_doc(STEPCOUNTER_DOC)
}

fn stepcounter_fn<B: Backend>(
    interpreter: &mut Interpreter<B>,
    arguments: Arguments<B::Node>,
) -> txl::Result<Vec<B::Node>> {
    interpreter.counters.step(&arguments.text(0)?)?;
    Ok(vec![])
}

pub fn get_refstepcounter<B: Backend>() -> Implementation<B> {
    Implementation::new(refstepcounter_fn).with_doc(REFSTEPCOUNTER_DOC)
}

fn refstepcounter_fn<B: Backend>(
    interpreter: &mut Interpreter<B>,
    arguments: Arguments<B::Node>,
) -> txl::Result<Vec<B::Node>> {
    let name = arguments.text(0)?;
    ref_step(interpreter, &name, &name)?;
    Ok(vec![])
}

pub fn get_value<B: Backend>() -> Implementation<B> {
    Implementation::new(value_fn).with_doc(VALUE_DOC)
}

fn value_fn<B: Backend>(
    interpreter: &mut Interpreter<B>,
    arguments: Arguments<B::Node>,
) -> txl::Result<Vec<B::Node>> {
    let value = interpreter.counters.get(&arguments.text(0)?)?;
    Ok(vec![interpreter.text(&value.to_string())])
}

/// Returns the command for the style; the command name selects the style.
pub fn get_style<B: Backend>() -> Implementation<B> {
    Implementation::new(style_fn).with_doc(STYLE_DOC)
}

fn style_fn<B: Backend>(
    interpreter: &mut Interpreter<B>,
    arguments: Arguments<B::Node>,
) -> txl::Result<Vec<B::Node>> {
    let style = Style::from_command_name(arguments.name()).unwrap_or(Style::Arabic);
    let value = interpreter.counters.get(&arguments.text(0)?)?;
    match style.format(value) {
        Ok(text) => Ok(vec![interpreter.text(&text)]),
        Err(err) => {
            interpreter.warn(err.to_string());
            Ok(vec![])
        }
    }
}

pub fn get_counterwithin<B: Backend>() -> Implementation<B> {
    Implementation::new(counterwithin_fn).with_doc(COUNTERWITHIN_DOC)
}

fn counterwithin_fn<B: Backend>(
    interpreter: &mut Interpreter<B>,
    arguments: Arguments<B::Node>,
) -> txl::Result<Vec<B::Node>> {
    let name = arguments.text(1)?;
    let parent = arguments.text(2)?;
    interpreter.counters.add_to_reset(&name, &parent)?;
    if !arguments.star(0) {
        interpreter.counters.set_representation(
            &name,
            vec![
                Part::The(parent),
                Part::Literal(".".into()),
                Part::Value {
                    counter: name.clone(),
                    style: Style::Arabic,
                },
            ],
        )?;
    }
    Ok(vec![])
}

pub fn get_counterwithout<B: Backend>() -> Implementation<B> {
    Implementation::new(counterwithout_fn).with_doc(COUNTERWITHOUT_DOC)
}

fn counterwithout_fn<B: Backend>(
    interpreter: &mut Interpreter<B>,
    arguments: Arguments<B::Node>,
) -> txl::Result<Vec<B::Node>> {
    let name = arguments.text(1)?;
    interpreter
        .counters
        .remove_from_reset(&name, &arguments.text(2)?)?;
    if !arguments.star(0) {
        interpreter.counters.set_representation(
            &name,
            vec![Part::Value {
                counter: name.clone(),
                style: Style::Arabic,
            }],
        )?;
    }
    Ok(vec![])
}
