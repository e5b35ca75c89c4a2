//! Symbols, logos, quotations and footnotes

use crate::counters;
use latexlang::command::{Arguments, Implementation};
use latexlang::label::Snapshot;
use latexlang::output::Backend;
use latexlang::prelude as txl;
use latexlang::vm::Interpreter;

pub const SYMBOL_DOC: &str = r"Print a symbol

`\ldots` and `\dots` (…), `\S` (§), `\P` (¶), `\dag` (†), `\copyright` (©),
    `\textbackslash` (\), `\quad` (an em space) and `\qquad` (two em spaces).
";

pub const LOGO_DOC: &str = r"Print the TeX or LaTeX logo";

pub const RELAX_DOC: &str = r"Do nothing

`\indent` and `\noindent` are accepted and have no effect on the output.
";

pub const QUOTE_DOC: &str = r"Set the body off as a quotation

Usage: `\begin{quote} ... \end{quote}`

The environments are `quote`, `quotation` and `verse`.
";

pub const FOOTNOTE_DOC: &str = r"A footnote

Usage: `\footnote[<number>]{<text>}`

Footnotes are numbered with the `footnote` counter, which is stepped for each footnote.
With an explicit number the counter is set to the number instead.
A `\label` in the footnote text refers to the footnote.
";

fn symbol(name: &str) -> &'static str {
    match name {
        "copyright" => "©",
        "dag" => "†",
        "dots" | "ldots" => "…",
        "P" => "¶",
        "S" => "§",
        "quad" => "\u{2003}",
        "qquad" => "\u{2003}\u{2003}",
        "textbackslash" => "\\",
        _ => "",
    }
}

pub fn get_symbol<B: Backend>() -> Implementation<B> {
    Implementation::new(symbol_fn).with_doc(SYMBOL_DOC)
}

fn symbol_fn<B: Backend>(interpreter: &mut Interpreter<B>, arguments: Arguments<B::Node>) -> txl::Result<Vec<B::Node>> {
    Ok(vec![interpreter.text(symbol(arguments.name()))])
}

pub fn get_logo<B: Backend>() -> Implementation<B> {
    Implementation::new(logo_fn).with_doc(LOGO_DOC)
}

fn logo_fn<B: Backend>(interpreter: &mut Interpreter<B>, arguments: Arguments<B::Node>) -> txl::Result<Vec<B::Node>> {
    let logo = interpreter.text(arguments.name());
    Ok(vec![interpreter.backend.create("span", vec![logo], &["logo"])])
}

pub fn get_relax<B: Backend>() -> Implementation<B> {
    Implementation::new(relax_fn).with_doc(RELAX_DOC)
}

fn relax_fn<B: Backend>(_: &mut Interpreter<B>, _: Arguments<B::Node>) -> txl::Result<Vec<B::Node>> {
    Ok(vec![])
}

pub fn get_quote<B: Backend>() -> Implementation<B> {
    Implementation::new(quote_fn).with_doc(QUOTE_DOC)
}

fn quote_fn<B: Backend>(interpreter: &mut Interpreter<B>, mut arguments: Arguments<B::Node>) -> txl::Result<Vec<B::Node>> {
    let body = arguments.take_content(0)?;
    let class = arguments.name().to_string();
    Ok(vec![interpreter.backend.create("blockquote", body, &[&class])])
}

pub fn get_footnote<B: Backend>() -> Implementation<B> {
    Implementation::new(footnote_fn)
        .with_prelude(footnote_prelude)
        .with_doc(FOOTNOTE_DOC)
}

// Runs in the footnote's own frame, so the number is the current label of the text.
fn footnote_prelude<B: Backend>(interpreter: &mut Interpreter<B>, arguments: &Arguments<B::Node>) -> txl::Result<()> {
    counters::ensure_counter(interpreter, "footnote", None)?;
    match arguments.optional_integer(0)? {
        None => {
            counters::ref_step(interpreter, "footnote", "footnote")?;
        }
        Some(number) => {
            interpreter.counters.set("footnote", number)?;
            let text = interpreter.display_counter("footnote")?;
            let snapshot = Snapshot::new(interpreter.new_anchor("footnote"), text);
            interpreter.scope.set_current_label(snapshot);
        }
    }
    Ok(())
}

fn footnote_fn<B: Backend>(interpreter: &mut Interpreter<B>, mut arguments: Arguments<B::Node>) -> txl::Result<Vec<B::Node>> {
    let content = arguments.take_content(1)?;
    let snapshot = interpreter.scope.current_label().clone();
    let number = interpreter.backend.text(&snapshot.text, &[]);
    let mark = interpreter.backend.create("sup", vec![number], &[]);
    let text = interpreter.backend.create("span", content, &["footnote-text"]);
    let footnote = interpreter.backend.create("span", vec![mark, text], &["footnote"]);
    Ok(vec![interpreter.backend.with_attribute(footnote, "id", &snapshot.id)])
}
