//! Document classes
//!
//! The classes are built in layers:
//!     `article` and `report` extend a common base, and `book` extends `report`.
//! Each constructor creates the counters and lengths of its class
//!     and returns the commands of every layer it is made of.
//!
//! Page layout options like `12pt` and `a4paper` are accepted and have no effect.

use crate::{document, lengths, sectioning, Provider};
use latexlang::command::{Arguments, Implementation};
use latexlang::extension::{CommandProvider, Constructor, Options};
use latexlang::output::Backend;
use latexlang::prelude as txl;
use latexlang::vm::Interpreter;
use std::collections::HashMap;

pub const ABSTRACT_DOC: &str = r"The abstract of an article or report";

pub const MATTER_DOC: &str = r"Start the front matter, main matter or back matter of a book

Chapters are only numbered in the main matter.
";

const FONT_SIZES: [&str; 3] = ["10pt", "11pt", "12pt"];

const PAPER_SIZES: [&str; 6] = [
    "a4paper",
    "a5paper",
    "b5paper",
    "executivepaper",
    "legalpaper",
    "letterpaper",
];

const ARTICLE_UNITS: [&str; 5] = ["section", "subsection", "subsubsection", "paragraph", "subparagraph"];

const REPORT_UNITS: [&str; 6] = [
    "chapter",
    "section",
    "subsection",
    "subsubsection",
    "paragraph",
    "subparagraph",
];

pub fn all_classes<B: Backend>() -> HashMap<&'static str, Constructor<B>> {
    HashMap::from([
        ("article", article::<B> as Constructor<B>),
        ("book", book::<B>),
        ("report", report::<B>),
    ])
}

fn base<B: Backend>(interpreter: &mut Interpreter<B>, options: &mut Options) -> txl::Result<Provider<B>> {
    options.choice(&FONT_SIZES);
    options.choice(&PAPER_SIZES);
    options.choice(&["oneside", "twoside"]);
    options.choice(&["onecolumn", "twocolumn"]);
    options.choice(&["titlepage", "notitlepage"]);
    for (name, points) in [("textwidth", 345.0), ("parindent", 15.0), ("parskip", 0.0)] {
        interpreter.scope.new_length(name)?;
        interpreter
            .scope
            .set_length_globally(name, lengths::points(points))?;
    }
    interpreter.scope.new_length("linewidth")?;
    let textwidth = interpreter.scope.length("textwidth")?;
    interpreter
        .scope
        .set_length_globally("linewidth", textwidth)?;
    Ok(Provider::new(
        HashMap::from([
            ("appendix", sectioning::get_appendix()),
            ("author", document::get_metadata()),
            ("date", document::get_metadata()),
            ("maketitle", document::get_maketitle()),
            ("paragraph", sectioning::get_section()),
            ("part", sectioning::get_section()),
            ("section", sectioning::get_section()),
            ("subparagraph", sectioning::get_section()),
            ("subsection", sectioning::get_section()),
            ("subsubsection", sectioning::get_section()),
            ("title", document::get_metadata()),
        ]),
        HashMap::from([
            ("appendix", "V"),
            ("author", "HV g"),
            ("date", "HV g"),
            ("maketitle", "V"),
            ("paragraph", "V s o? g"),
            ("part", "V s o? g"),
            ("section", "V s o? g"),
            ("subparagraph", "V s o? g"),
            ("subsection", "V s o? g"),
            ("subsubsection", "V s o? g"),
            ("title", "HV g"),
        ]),
    ))
}

fn create_float_counters<B: Backend>(interpreter: &mut Interpreter<B>, parent: Option<&str>) -> txl::Result<()> {
    for name in ["equation", "figure", "table"] {
        crate::counters::new_counter(interpreter, name, parent)?;
    }
    // Footnotes restart in every chapter but are numbered 1, 2, ... all the same.
    crate::counters::ensure_counter(interpreter, "footnote", None)?;
    match parent {
        Some(parent) => interpreter.counters.add_to_reset("footnote", parent),
        None => Ok(()),
    }
}

fn abstract_provider<B: Backend>() -> Provider<B> {
    Provider::new(
        HashMap::from([("abstract", get_abstract())]),
        HashMap::from([("abstract", "V body")]),
    )
}

fn article<B: Backend>(interpreter: &mut Interpreter<B>, options: &mut Options) -> txl::Result<Box<dyn CommandProvider<B>>> {
    let provider = base(interpreter, options)?;
    sectioning::create_counters(interpreter, &ARTICLE_UNITS, 3)?;
    create_float_counters(interpreter, None)?;
    Ok(provider.extend(abstract_provider()).boxed())
}

fn report_layers<B: Backend>(interpreter: &mut Interpreter<B>, options: &mut Options) -> txl::Result<Provider<B>> {
    options.choice(&["openright", "openany"]);
    let provider = base(interpreter, options)?;
    sectioning::create_counters(interpreter, &REPORT_UNITS, 2)?;
    create_float_counters(interpreter, Some("chapter"))?;
    Ok(provider.extend(Provider::new(
        HashMap::from([("chapter", sectioning::get_section())]),
        HashMap::from([("chapter", "V s o? g")]),
    )))
}

fn report<B: Backend>(interpreter: &mut Interpreter<B>, options: &mut Options) -> txl::Result<Box<dyn CommandProvider<B>>> {
    let provider = report_layers(interpreter, options)?;
    Ok(provider.extend(abstract_provider()).boxed())
}

fn book<B: Backend>(interpreter: &mut Interpreter<B>, options: &mut Options) -> txl::Result<Box<dyn CommandProvider<B>>> {
    let provider = report_layers(interpreter, options)?;
    interpreter.counters.create("@mainmatter", None)?;
    interpreter.counters.set("@mainmatter", 1)?;
    Ok(provider
        .extend(Provider::new(
            HashMap::from([
                ("backmatter", get_matter()),
                ("frontmatter", get_matter()),
                ("mainmatter", get_matter()),
            ]),
            HashMap::from([("backmatter", "V"), ("frontmatter", "V"), ("mainmatter", "V")]),
        ))
        .boxed())
}

pub fn get_abstract<B: Backend>() -> Implementation<B> {
    Implementation::new(abstract_fn).with_doc(ABSTRACT_DOC)
}

fn abstract_fn<B: Backend>(interpreter: &mut Interpreter<B>, mut arguments: Arguments<B::Node>) -> txl::Result<Vec<B::Node>> {
    let heading = interpreter.backend.text("Abstract", &[]);
    let mut children = vec![interpreter.backend.create("p", vec![heading], &["abstract-title"])];
    children.extend(arguments.take_content(0)?);
    Ok(vec![interpreter.backend.create("div", children, &["abstract"])])
}

pub fn get_matter<B: Backend>() -> Implementation<B> {
    Implementation::new(matter_fn).with_doc(MATTER_DOC)
}

fn matter_fn<B: Backend>(interpreter: &mut Interpreter<B>, arguments: Arguments<B::Node>) -> txl::Result<Vec<B::Node>> {
    let main = arguments.name() == "mainmatter";
    interpreter.counters.set("@mainmatter", main as i32)?;
    Ok(vec![])
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
            (
                layout_options_are_accepted,
                r"\documentclass[11pt,a4paper,twocolumn]{article}\begin{document}a\end{document}",
                "<p>a</p>"
            ),
            (
                lengths,
                r"\documentclass{article}\begin{document}\the\textwidth, \the\linewidth, \the\parindent\end{document}",
                "<p>345.0pt, 345.0pt, 15.0pt</p>"
            ),
            (
                abstract_environment,
                r"\documentclass{article}\begin{document}\begin{abstract}A\end{abstract}\end{document}",
                r#"<div class="abstract"><p class="abstract-title">Abstract</p><p>A</p></div>"#
            ),
            (
                article_equation,
                r"\documentclass{article}\begin{document}\refstepcounter{equation}\theequation\end{document}",
                "<p>1</p>"
            ),
            (
                report_equation_within_chapter,
                r"\documentclass{report}\begin{document}\chapter*{A}\stepcounter{chapter}\refstepcounter{equation}\theequation\end{document}",
                "<h1>A</h1><p>1.1</p>"
            ),
            (
                back_matter,
                r"\documentclass{book}\begin{document}\chapter{A}\backmatter\chapter{B}\end{document}",
                r#"<h1 id="chapter-1"><span class="number">1</span> A</h1><h1>B</h1>"#
            ),
            (
                report_appendix,
                r"\documentclass{report}\begin{document}\chapter{A}\appendix\chapter{B}\section{C}\end{document}",
                concat!(
                    r#"<h1 id="chapter-1"><span class="number">1</span> A</h1>"#,
                    r#"<h1 id="chapter-2"><span class="number">A</span> B</h1>"#,
                    r#"<h2 id="section-3"><span class="number">A.1</span> C</h2>"#,
                )
            ),
        ),
        failure_tests(
            (no_abstract_in_book, r"\documentclass{book}\begin{document}\begin{abstract}A\end{abstract}\end{document}"),
            (no_matter_in_report, r"\documentclass{report}\begin{document}\frontmatter\end{document}"),
            (no_section_without_class, r"\section{A}"),
        ),
        warning_tests((
            unknown_option,
            r"\documentclass[a3paper]{report}\begin{document}a\end{document}",
            "unused option `a3paper`"
        ),),
    ];
}
