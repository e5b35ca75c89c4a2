//! Length registers and spacing
//!
//! Length registers live in the scope stack.
//! `\newlength` allocates a register globally; `\setlength` and `\addtolength`
//!     change it until the end of the current group.

use dimen::{Length, LengthUnit, ScaledUnit};
use latexlang::command::{Arguments, Implementation};
use latexlang::output::Backend;
use latexlang::prelude as txl;
use latexlang::vm::Interpreter;

pub const NEWLENGTH_DOC: &str = r"Allocate a new length register

Usage: `\newlength{\<name>}`

The register starts at 0pt. Allocating a register that exists is an error.
";

pub const SETLENGTH_DOC: &str = r"Set a length register

Usage: `\setlength{\<name>}{<length expression>}`

The expression may combine literals and registers, as in `0.5\linewidth - 2pt`.
The new value holds until the end of the current group.
";

pub const ADDTOLENGTH_DOC: &str = r"Add to a length register

Usage: `\addtolength{\<name>}{<length expression>}`

Both lengths must have the same unit; adding `1em` to a length in points is an error.
";

pub const THE_DOC: &str = r"Print the value of a length register

Usage: `\the\<name>`

The value is printed as TeX prints it, for example `12.0pt`.
";

pub const HSPACE_DOC: &str = r"Horizontal space

Usage: `\hspace{<length>}`
";

pub const VSPACE_DOC: &str = r"Vertical space between paragraphs

Usage: `\vspace{<length>}`
";

pub const SKIP_DOC: &str = r"Vertical space of a fixed size

`\smallskip` is 3pt, `\medskip` is 6pt and `\bigskip` is 12pt.
";

pub const NEWLINE_DOC: &str = r"Break the line

Usage: `\\[<extra space>]` or `\newline`
";

/// Creates `\unitlength`, the unit of picture coordinates, with value 1pt.
pub fn initialize<B: Backend>(interpreter: &mut Interpreter<B>) -> txl::Result<()> {
    interpreter.scope.new_length("unitlength")?;
    interpreter
        .scope
        .set_length_globally("unitlength", points(1.0))?;
    Ok(())
}

pub(crate) fn points(value: f64) -> Length {
    Length::new(value, LengthUnit::Absolute(ScaledUnit::Point))
}

pub fn get_newlength<B: Backend>() -> Implementation<B> {
    Implementation::new(newlength_fn).with_doc(NEWLENGTH_DOC)
}

fn newlength_fn<B: Backend>(interpreter: &mut Interpreter<B>, arguments: Arguments<B::Node>) -> txl::Result<Vec<B::Node>> {
    interpreter.scope.new_length(&arguments.text(0)?)?;
    Ok(vec![])
}

pub fn get_setlength<B: Backend>() -> Implementation<B> {
    Implementation::new(setlength_fn).with_doc(SETLENGTH_DOC)
}

fn setlength_fn<B: Backend>(interpreter: &mut Interpreter<B>, arguments: Arguments<B::Node>) -> txl::Result<Vec<B::Node>> {
    interpreter
        .scope
        .set_length(&arguments.text(0)?, arguments.length(1)?)?;
    Ok(vec![])
}

pub fn get_addtolength<B: Backend>() -> Implementation<B> {
    Implementation::new(addtolength_fn).with_doc(ADDTOLENGTH_DOC)
}

fn addtolength_fn<B: Backend>(interpreter: &mut Interpreter<B>, arguments: Arguments<B::Node>) -> txl::Result<Vec<B::Node>> {
    let name = arguments.text(0)?;
    let value = (interpreter.scope.length(&name)? + arguments.length(1)?)?.bounded()?;
    interpreter.scope.set_length(&name, value)?;
    Ok(vec![])
}

pub fn get_the<B: Backend>() -> Implementation<B> {
    Implementation::new(the_fn).with_doc(THE_DOC)
}

fn the_fn<B: Backend>(interpreter: &mut Interpreter<B>, arguments: Arguments<B::Node>) -> txl::Result<Vec<B::Node>> {
    let value = interpreter.scope.length(&arguments.text(0)?)?;
    Ok(vec![interpreter.text(&value.to_string())])
}

pub fn get_hspace<B: Backend>() -> Implementation<B> {
    Implementation::new(hspace_fn).with_doc(HSPACE_DOC)
}

fn hspace_fn<B: Backend>(interpreter: &mut Interpreter<B>, arguments: Arguments<B::Node>) -> txl::Result<Vec<B::Node>> {
    let width = arguments.length(1)?.to_css(interpreter.config.precision);
    let space = interpreter.backend.create("span", vec![], &["hspace"]);
    Ok(vec![interpreter
        .backend
        .with_attribute(space, "style", &format!("width: {width}"))])
}

fn vertical_space<B: Backend>(interpreter: &mut Interpreter<B>, height: Length, classes: &[&str]) -> B::Node {
    let height = height.to_css(interpreter.config.precision);
    let space = interpreter.backend.create("div", vec![], classes);
    interpreter
        .backend
        .with_attribute(space, "style", &format!("height: {height}"))
}

pub fn get_vspace<B: Backend>() -> Implementation<B> {
    Implementation::new(vspace_fn).with_doc(VSPACE_DOC)
}

fn vspace_fn<B: Backend>(interpreter: &mut Interpreter<B>, arguments: Arguments<B::Node>) -> txl::Result<Vec<B::Node>> {
    let height = arguments.length(1)?;
    Ok(vec![vertical_space(interpreter, height, &["vspace"])])
}

pub fn get_skip<B: Backend>() -> Implementation<B> {
    Implementation::new(skip_fn).with_doc(SKIP_DOC)
}

fn skip_fn<B: Backend>(interpreter: &mut Interpreter<B>, arguments: Arguments<B::Node>) -> txl::Result<Vec<B::Node>> {
    let (height, class) = match arguments.name() {
        "smallskip" => (3.0, "smallskip"),
        "medskip" => (6.0, "medskip"),
        _ => (12.0, "bigskip"),
    };
    Ok(vec![vertical_space(interpreter, points(height), &["vspace", class])])
}

pub fn get_newline<B: Backend>() -> Implementation<B> {
    Implementation::new(newline_fn).with_doc(NEWLINE_DOC)
}

fn newline_fn<B: Backend>(interpreter: &mut Interpreter<B>, arguments: Arguments<B::Node>) -> txl::Result<Vec<B::Node>> {
    let br = interpreter.backend.create("br", vec![], &[]);
    // `\newline` has no arguments.
    let Some(extra) = arguments.optional_length(1)? else {
        return Ok(vec![br]);
    };
    let extra = extra.to_css(interpreter.config.precision);
    Ok(vec![interpreter
        .backend
        .with_attribute(br, "style", &format!("margin-bottom: {extra}"))])
}

#[cfg(test)]
mod tests {
    use latexlang::output::tree::Tree;
    use latexlang_testing::*;

    fn library() -> latexlang::extension::Library<Tree> {
        crate::library()
    }

    test_suite![
        output_tests(
            (unitlength, r"\the\unitlength", "<p>1.0pt</p>"),
            (
                newlength_and_setlength,
                r"\newlength{\gap}\setlength{\gap}{2pt}\the\gap",
                "<p>2.0pt</p>"
            ),
            (new_length_is_zero, r"\newlength\gap\the\gap", "<p>0.0pt</p>"),
            (
                addtolength,
                r"\newlength{\gap}\setlength{\gap}{1pt}\addtolength{\gap}{0.5pt}\the\gap",
                "<p>1.5pt</p>"
            ),
            (
                setlength_is_local,
                r"\newlength{\gap}{\setlength{\gap}{3pt}}\the\gap",
                "<p>0.0pt</p>"
            ),
            (
                newlength_is_global,
                r"{\newlength{\gap}}\setlength{\gap}{3pt}\the\gap",
                "<p>3.0pt</p>"
            ),
            (
                expression_with_register,
                r"\setlength{\unitlength}{2pt}\newlength{\gap}\setlength{\gap}{0.5\unitlength + 1pt}\the\gap",
                "<p>2.0pt</p>"
            ),
            (
                relative_length,
                r"\newlength{\gap}\setlength{\gap}{1.5em}\the\gap",
                "<p>1.5em</p>"
            ),
            (
                hspace,
                r"a\hspace{72.27pt}b",
                r#"<p>a<span class="hspace" style="width: 96px"></span>b</p>"#
            ),
            (
                hspace_relative,
                r"a\hspace*{2em}b",
                r#"<p>a<span class="hspace" style="width: 2em"></span>b</p>"#
            ),
            (
                vspace,
                r"a\vspace{72.27pt}b",
                r#"<p>a</p><div class="vspace" style="height: 96px"></div><p>b</p>"#
            ),
            (
                bigskip,
                r"\bigskip",
                r#"<div class="vspace bigskip" style="height: 15.94px"></div>"#
            ),
            (newline, r"a\\b\newline c", "<p>a<br>b<br>c</p>"),
            (
                newline_with_space,
                r"a\\[72.27pt]b",
                r#"<p>a<br style="margin-bottom: 96px">b</p>"#
            ),
        ),
        failure_tests(
            (unknown_register, r"\setlength{\gap}{1pt}"),
            (duplicate_register, r"\newlength{\unitlength}"),
            (incompatible_units, r"\addtolength{\unitlength}{1em}"),
            (missing_unit, r"\setlength{\unitlength}{1}"),
            (the_unknown_register, r"\the\gap"),
            (not_a_command_name, r"\newlength{gap}"),
            (vspace_in_text, r"\textbf{\vspace{1pt}}"),
            (product_too_large, r"\hspace{1pt*99999999999999999999 + 1pt}"),
            (
                register_product_too_large,
                r"\newlength{\gap}\setlength{\gap}{16000pt}\setlength{\gap}{2\gap}"
            ),
            (sum_too_large, r"\setlength{\unitlength}{16000pt + 16000pt}"),
            (
                addtolength_too_large,
                r"\setlength{\unitlength}{16000pt}\addtolength{\unitlength}{16000pt}"
            ),
        ),
    ];
}
