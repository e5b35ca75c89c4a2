//! Paragraph alignment

use latexlang::command::{Arguments, Implementation};
use latexlang::output::Backend;
use latexlang::prelude as txl;
use latexlang::scope::Alignment;
use latexlang::vm::Interpreter;

pub const ENVIRONMENT_DOC: &str = r"Align the paragraphs of the environment

Usage: `\begin{center} ... \end{center}`

The environments are `center`, `flushleft` (ragged right) and `flushright` (ragged left).
";

pub const DECLARATION_DOC: &str = r"Align paragraphs until the end of the current group

`\centering` centers, `\raggedright` aligns left and `\raggedleft` aligns right.
A paragraph takes the alignment active when it ends.
";

fn alignment(name: &str) -> Alignment {
    match name {
        "center" | "centering" => Alignment::Centered,
        "flushleft" | "raggedright" => Alignment::FlushLeft,
        "flushright" | "raggedleft" => Alignment::FlushRight,
        _ => Alignment::Justified,
    }
}

pub fn get_environment<B: Backend>() -> Implementation<B> {
    Implementation::new(align_fn).with_doc(ENVIRONMENT_DOC)
}

pub fn get_declaration<B: Backend>() -> Implementation<B> {
    Implementation::new(align_fn).with_doc(DECLARATION_DOC)
}

fn align_fn<B: Backend>(interpreter: &mut Interpreter<B>, arguments: Arguments<B::Node>) -> txl::Result<Vec<B::Node>> {
    interpreter.scope.set_alignment(alignment(arguments.name()));
    Ok(vec![])
}
