//! Labels and cross references

use latexlang::command::{Arguments, Implementation};
use latexlang::output::Backend;
use latexlang::prelude as txl;
use latexlang::vm::Interpreter;

pub const LABEL_DOC: &str = r"Name the current numbered unit

Usage: `\label{<key>}`

The label refers to the innermost section, list item, footnote or counter stepped
    with `\refstepcounter` in the current group.
A key may only be labelled once.
";

pub const REF_DOC: &str = r"Print the number of a labelled unit

Usage: `\ref{<key>}`

The reference may come before the label.
References to labels that are never defined print `??`.
";

pub fn get_label<B: Backend>() -> Implementation<B> {
    Implementation::new(label_fn).with_doc(LABEL_DOC)
}

fn label_fn<B: Backend>(interpreter: &mut Interpreter<B>, arguments: Arguments<B::Node>) -> txl::Result<Vec<B::Node>> {
    let key = arguments.text(0)?;
    let snapshot = interpreter.scope.current_label().clone();
    if snapshot.id.is_empty() {
        interpreter.warn(format!("label `{key}` is not inside a numbered unit"));
    }
    interpreter.labels.define(&key, snapshot)?;
    Ok(vec![])
}

pub fn get_ref<B: Backend>() -> Implementation<B> {
    Implementation::new(ref_fn).with_doc(REF_DOC)
}

fn ref_fn<B: Backend>(interpreter: &mut Interpreter<B>, arguments: Arguments<B::Node>) -> txl::Result<Vec<B::Node>> {
    let id = interpreter.labels.reference(&arguments.text(0)?);
    Ok(vec![interpreter.backend.reference(id)])
}

#[cfg(test)]
mod tests {
    use latexlang::error::Severity;
    use latexlang::output::tree::Tree;
    use latexlang_testing::*;

    fn library() -> latexlang::extension::Library<Tree> {
        crate::library()
    }

    test_suite![
        options(TestOption::Library(library), TestOption::DocumentClass("article")),
        output_tests(
            (
                reference_after_label,
                r"\section{A}\label{a}\ref{a}",
                r##"<h2 id="section-1"><span class="number">1</span> A</h2><p><a href="#section-1">1</a></p>"##
            ),
            (
                forward_reference,
                r"\ref{b}\section{A}\section{B}\label{b}",
                r##"<p><a href="#section-2">2</a></p><h2 id="section-1"><span class="number">1</span> A</h2><h2 id="section-2"><span class="number">2</span> B</h2>"##
            ),
            (undefined_reference, r"\ref{c}", "<p>??</p>"),
        ),
        failure_tests((duplicate_label, r"\section{A}\label{a}\label{a}"),),
        warning_tests((label_outside_unit, r"\label{a}", "not inside a numbered unit"),),
    ];

    #[test]
    fn undefined_reference_is_reported_once() {
        let mut interpreter = latexlang::vm::Interpreter::with_library(
            Tree::default(),
            Default::default(),
            library(),
        )
        .unwrap();
        interpreter.run(r"\ref{c} \ref{c}").unwrap();
        let infos: Vec<&str> = interpreter
            .diagnostics
            .entries()
            .iter()
            .filter(|d| d.severity == Severity::Info)
            .map(|d| d.message.as_str())
            .collect();
        assert_eq!(infos, vec!["reference to undefined label `c`"]);
    }
}
