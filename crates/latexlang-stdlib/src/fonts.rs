//! Font commands
//!
//! Text commands like `\textbf{...}` style their argument only.
//! Declarations like `\bfseries` style everything up to the end of the enclosing group.
//! Both work by setting attributes in a scope frame:
//!     a text command sets them in a prelude, inside the command's own frame.

use latexlang::command::{Arguments, Implementation};
use latexlang::output::Backend;
use latexlang::prelude as txl;
use latexlang::scope::{Attribute, AttributeKind, Decoration, FontFamily, FontShape, FontSize, FontWeight};
use latexlang::vm::Interpreter;

pub const TEXT_DOC: &str = r"Typeset the argument in a font

Usage: `\textbf{<text>}`

The commands are `\textbf` and `\textmd` (weight), `\textit`, `\textsl`, `\textsc`
    and `\textup` (shape), `\textrm`, `\textsf` and `\texttt` (family),
    and `\underline`.
";

pub const EMPH_DOC: &str = r"Emphasize the argument

Emphasized text is italic; emphasis inside italic text is upright.
";

pub const TEXTNORMAL_DOC: &str = "Typeset the argument in the document's default font";

pub const DECLARATION_DOC: &str = r"Change the font until the end of the current group

Usage: `{\bfseries <text>}`

Series: `\bfseries`, `\mdseries`.
Shapes: `\itshape`, `\slshape`, `\scshape`, `\upshape`.
Families: `\rmfamily`, `\sffamily`, `\ttfamily`.
Sizes, from smallest to largest: `\tiny`, `\scriptsize`, `\footnotesize`, `\small`,
    `\normalsize`, `\large`, `\Large`, `\LARGE`, `\huge`, `\Huge`.
";

pub const OLD_DECLARATION_DOC: &str = r"Switch to a font, resetting the other attributes

These are the two-letter font commands of LaTeX 2.09: `\bf`, `\it`, `\sl`, `\sc`,
    `\rm`, `\sf` and `\tt`. `\bf` is the same as `\normalfont\bfseries`.
";

pub const NORMALFONT_DOC: &str = "Switch to the document's default font";

pub const EM_DOC: &str = r"Emphasize until the end of the current group; the declaration form of `\emph`";

fn text_attribute(name: &str) -> Option<Attribute> {
    Some(match name {
        "textbf" => Attribute::Weight(FontWeight::Bold),
        "textmd" => Attribute::Weight(FontWeight::Medium),
        "textit" => Attribute::Shape(FontShape::Italic),
        "textsl" => Attribute::Shape(FontShape::Slanted),
        "textsc" => Attribute::Shape(FontShape::SmallCaps),
        "textup" => Attribute::Shape(FontShape::Upright),
        "textrm" => Attribute::Family(FontFamily::Roman),
        "textsf" => Attribute::Family(FontFamily::SansSerif),
        "texttt" => Attribute::Family(FontFamily::Typewriter),
        "underline" => Attribute::Decoration(Decoration::Underline),
        _ => return None,
    })
}

fn declaration_attribute(name: &str) -> Option<Attribute> {
    Some(match name {
        "bfseries" | "bf" => Attribute::Weight(FontWeight::Bold),
        "mdseries" => Attribute::Weight(FontWeight::Medium),
        "itshape" | "it" => Attribute::Shape(FontShape::Italic),
        "slshape" | "sl" => Attribute::Shape(FontShape::Slanted),
        "scshape" | "sc" => Attribute::Shape(FontShape::SmallCaps),
        "upshape" => Attribute::Shape(FontShape::Upright),
        "rmfamily" | "rm" => Attribute::Family(FontFamily::Roman),
        "sffamily" | "sf" => Attribute::Family(FontFamily::SansSerif),
        "ttfamily" | "tt" => Attribute::Family(FontFamily::Typewriter),
        "tiny" => Attribute::Size(FontSize::Tiny),
        "scriptsize" => Attribute::Size(FontSize::ScriptSize),
        "footnotesize" => Attribute::Size(FontSize::FootnoteSize),
        "small" => Attribute::Size(FontSize::Small),
        "normalsize" => Attribute::Size(FontSize::NormalSize),
        "large" => Attribute::Size(FontSize::Large),
        "Large" => Attribute::Size(FontSize::Larger),
        "LARGE" => Attribute::Size(FontSize::Largest),
        "huge" => Attribute::Size(FontSize::Huge),
        "Huge" => Attribute::Size(FontSize::Huger),
        _ => return None,
    })
}

fn toggle_emphasis<B: Backend>(interpreter: &mut Interpreter<B>) {
    let shape = match interpreter.scope.active_attribute(AttributeKind::Shape) {
        Some(Attribute::Shape(FontShape::Italic)) => FontShape::Upright,
        _ => FontShape::Italic,
    };
    interpreter.scope.set_attribute(Attribute::Shape(shape));
}

fn content_fn<B: Backend>(
    _: &mut Interpreter<B>,
    mut arguments: Arguments<B::Node>,
) -> txl::Result<Vec<B::Node>> {
    arguments.take_content(0)
}

pub fn get_text<B: Backend>() -> Implementation<B> {
    Implementation::new(content_fn)
        .with_prelude(text_prelude)
        .with_doc(TEXT_DOC)
}

fn text_prelude<B: Backend>(
    interpreter: &mut Interpreter<B>,
    arguments: &Arguments<B::Node>,
) -> txl::Result<()> {
    if let Some(attribute) = text_attribute(arguments.name()) {
        interpreter.scope.set_attribute(attribute);
    }
    Ok(())
}

pub fn get_emph<B: Backend>() -> Implementation<B> {
    Implementation::new(content_fn)
        .with_prelude(emph_prelude)
        .with_doc(EMPH_DOC)
}

fn emph_prelude<B: Backend>(interpreter: &mut Interpreter<B>, _: &Arguments<B::Node>) -> txl::Result<()> {
    toggle_emphasis(interpreter);
    Ok(())
}

pub fn get_textnormal<B: Backend>() -> Implementation<B> {
    Implementation::new(content_fn)
        .with_prelude(normalfont_prelude)
        .with_doc(TEXTNORMAL_DOC)
}

fn normalfont_prelude<B: Backend>(
    interpreter: &mut Interpreter<B>,
    _: &Arguments<B::Node>,
) -> txl::Result<()> {
    interpreter.scope.reset_attributes();
    Ok(())
}

pub fn get_declaration<B: Backend>() -> Implementation<B> {
    Implementation::new(declaration_fn).with_doc(DECLARATION_DOC)
}

fn declaration_fn<B: Backend>(
    interpreter: &mut Interpreter<B>,
    arguments: Arguments<B::Node>,
) -> txl::Result<Vec<B::Node>> {
    if let Some(attribute) = declaration_attribute(arguments.name()) {
        interpreter.scope.set_attribute(attribute);
    }
    Ok(vec![])
}

pub fn get_old_declaration<B: Backend>() -> Implementation<B> {
    Implementation::new(old_declaration_fn).with_doc(OLD_DECLARATION_DOC)
}

fn old_declaration_fn<B: Backend>(
    interpreter: &mut Interpreter<B>,
    arguments: Arguments<B::Node>,
) -> txl::Result<Vec<B::Node>> {
    interpreter.scope.reset_attributes();
    declaration_fn(interpreter, arguments)
}

pub fn get_normalfont<B: Backend>() -> Implementation<B> {
    Implementation::new(normalfont_fn).with_doc(NORMALFONT_DOC)
}

fn normalfont_fn<B: Backend>(
    interpreter: &mut Interpreter<B>,
    _: Arguments<B::Node>,
) -> txl::Result<Vec<B::Node>> {
    interpreter.scope.reset_attributes();
    Ok(vec![])
}

pub fn get_em<B: Backend>() -> Implementation<B> {
    Implementation::new(em_fn).with_doc(EM_DOC)
}

fn em_fn<B: Backend>(interpreter: &mut Interpreter<B>, _: Arguments<B::Node>) -> txl::Result<Vec<B::Node>> {
    toggle_emphasis(interpreter);
    Ok(vec![])
}

#[cfg(test)]
mod tests {
    use super::*;
    use latexlang::output::tree::Tree;
    use latexlang_testing::*;

    fn library() -> latexlang::extension::Library<Tree> {
        crate::library()
    }

    #[test]
    fn every_text_command_has_an_attribute() {
        for name in crate::all_initial_built_ins::<Tree>().keys() {
            if name.starts_with("text") && crate::all_initial_signatures().get(name) == Some(&"H X hg") {
                assert!(*name == "textnormal" || text_attribute(name).is_some(), "{name}");
            }
        }
    }

    test_suite![
        output_tests(
            (textbf, r"a \textbf{b} c", r#"<p>a <span class="bf">b</span> c</p>"#),
            (
                nested_text_commands,
                r"\textbf{\textit{a}}",
                r#"<p><span class="bf it">a</span></p>"#
            ),
            (
                nested_emphasis,
                r"\emph{a \emph{b}}",
                r#"<p><span class="it">a </span>b</p>"#
            ),
            (underline, r"\underline{a}", r#"<p><span class="underline">a</span></p>"#),
            (
                declaration_ends_with_group,
                r"{\large a} b",
                r#"<p><span class="large">a</span> b</p>"#
            ),
            (
                declaration_as_environment,
                r"\begin{ttfamily}a\end{ttfamily}b",
                r#"<p><span class="tt">a</span>b</p>"#
            ),
            (
                old_declaration_resets,
                r"{\it a\bf b}",
                r#"<p><span class="it">a</span><span class="bf">b</span></p>"#
            ),
            (
                textnormal,
                r"{\bfseries a\textnormal{b}}",
                r#"<p><span class="bf">a</span>b</p>"#
            ),
            (
                em_toggles,
                r"{\em a {\em b}}",
                r#"<p><span class="it">a </span>b</p>"#
            ),
        ),
        equality_tests(
            (text_and_declaration, r"\textbf{a}", r"{\bfseries a}"),
            (textsc, r"\textsc{a}", r"{\scshape a}"),
            (normalfont, r"{\sffamily\itshape\normalfont a}", "a"),
        ),
        failure_tests(
            (missing_argument, r"\textbf"),
            (block_in_text, r"\textbf{\begin{itemize}\item a\end{itemize}}"),
        ),
    ];
}
