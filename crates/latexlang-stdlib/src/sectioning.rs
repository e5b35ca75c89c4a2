//! Sectioning commands
//!
//! Every sectioning command has a level, from -1 for `\part` to 5 for `\subparagraph`.
//! A heading is numbered if its level is at most the value of the `secnumdepth` counter
//!     and the command is not starred.
//! Numbered headings step their counter, get an anchor and become the target of `\label`.
//!
//! The commands and their counters are provided by the document classes;
//!     `\chapter` only exists in classes that have chapters.

use crate::counters;
use latexlang::command::{Arguments, Implementation};
use latexlang::counter::{Part, Style};
use latexlang::output::Backend;
use latexlang::prelude as txl;
use latexlang::vm::Interpreter;

pub const SECTION_DOC: &str = r"Start a new section

Usage: `\section*[<short title>]{<title>}`

The other sectioning commands, from the outermost, are `\part`, `\chapter`,
    `\subsection`, `\subsubsection`, `\paragraph` and `\subparagraph`.
The starred form produces an unnumbered heading.
The short title is accepted for compatibility and ignored.
";

pub const APPENDIX_DOC: &str = r"Start the appendices

Chapters, or sections in classes without chapters, are numbered again from A.
";

/// Returns the level and the HTML heading element of a sectioning command.
pub fn level(name: &str) -> Option<(i32, &'static str)> {
    Some(match name {
        "part" => (-1, "h1"),
        "chapter" => (0, "h1"),
        "section" => (1, "h2"),
        "subsection" => (2, "h3"),
        "subsubsection" => (3, "h4"),
        "paragraph" => (4, "h5"),
        "subparagraph" => (5, "h6"),
        _ => return None,
    })
}

/// Creates the counter of each sectioning unit, each reset by the one before it.
///
/// The `part` counter is independent and written in upper case roman numerals.
pub fn create_counters<B: Backend>(interpreter: &mut Interpreter<B>, units: &[&str], secnumdepth: i32) -> txl::Result<()> {
    counters::new_counter(interpreter, "part", None)?;
    interpreter.counters.set_representation(
        "part",
        vec![Part::Value {
            counter: "part".into(),
            style: Style::UpperRoman,
        }],
    )?;
    let mut parent: Option<&str> = None;
    for &unit in units {
        counters::new_counter(interpreter, unit, parent)?;
        parent = Some(unit);
    }
    counters::new_counter(interpreter, "secnumdepth", None)?;
    interpreter.counters.set("secnumdepth", secnumdepth)?;
    Ok(())
}

pub fn get_section<B: Backend>() -> Implementation<B> {
    Implementation::new(section_fn).with_doc(SECTION_DOC)
}

fn section_fn<B: Backend>(
    interpreter: &mut Interpreter<B>,
    mut arguments: Arguments<B::Node>,
) -> txl::Result<Vec<B::Node>> {
    let name = arguments.name().to_string();
    let (level, kind) = level(&name).unwrap_or((1, "h2"));
    let title = arguments.take_content(2)?;
    let numbered = !arguments.star(0)
        && interpreter.counters.contains(&name)
        && level <= interpreter.counters.get("secnumdepth").unwrap_or(i32::MAX)
        && is_main_matter(interpreter, level);
    if !numbered {
        return Ok(vec![interpreter.backend.create(kind, title, &[])]);
    }
    let snapshot = counters::ref_step(interpreter, &name, &name)?;
    let number = interpreter.backend.text(&snapshot.text, &[]);
    let mut children = vec![
        interpreter.backend.create("span", vec![number], &["number"]),
        interpreter.backend.text(" ", &[]),
    ];
    children.extend(title);
    let heading = interpreter.backend.create(kind, children, &[]);
    Ok(vec![interpreter.backend.with_attribute(heading, "id", &snapshot.id)])
}

// Chapters are unnumbered in the front and back matter of a book.
fn is_main_matter<B: Backend>(interpreter: &Interpreter<B>, level: i32) -> bool {
    level != 0 || interpreter.counters.get("@mainmatter").map_or(true, |v| v != 0)
}

pub fn get_appendix<B: Backend>() -> Implementation<B> {
    Implementation::new(appendix_fn).with_doc(APPENDIX_DOC)
}

fn appendix_fn<B: Backend>(interpreter: &mut Interpreter<B>, _: Arguments<B::Node>) -> txl::Result<Vec<B::Node>> {
    let unit = if interpreter.counters.contains("chapter") {
        "chapter"
    } else {
        "section"
    };
    interpreter.counters.set(unit, 0)?;
    interpreter.counters.set_representation(
        unit,
        vec![Part::Value {
            counter: unit.into(),
            style: Style::UpperAlph,
        }],
    )?;
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
        options(TestOption::Library(library), TestOption::DocumentClass("article")),
        output_tests(
            (
                section,
                r"\section{Intro}",
                r#"<h2 id="section-1"><span class="number">1</span> Intro</h2>"#
            ),
            (
                subsection_number,
                r"\section{A}\section{B}\subsection{C}",
                concat!(
                    r#"<h2 id="section-1"><span class="number">1</span> A</h2>"#,
                    r#"<h2 id="section-2"><span class="number">2</span> B</h2>"#,
                    r#"<h3 id="subsection-3"><span class="number">2.1</span> C</h3>"#,
                )
            ),
            (starred, r"\section*{A}", "<h2>A</h2>"),
            (short_title_ignored, r"\section[S]{A}\thesection", r#"<h2 id="section-1"><span class="number">1</span> A</h2><p>1</p>"#),
            (
                beyond_secnumdepth,
                r"\paragraph{A} text",
                "<h5>A</h5><p>text</p>"
            ),
            (
                part_in_roman,
                r"\part{A}\part{B}",
                r#"<h1 id="part-1"><span class="number">I</span> A</h1><h1 id="part-2"><span class="number">II</span> B</h1>"#
            ),
            (
                appendix,
                r"\section{A}\appendix\section{B}",
                r#"<h2 id="section-1"><span class="number">1</span> A</h2><h2 id="section-2"><span class="number">A</span> B</h2>"#
            ),
        ),
        equality_tests(
            (
                new_section_resets_subsection,
                r"\section{A}\subsection{B}\section{C}\thesubsection",
                r"\section{A}\subsection{B}\section{C}2.0"
            ),
            (
                secnumdepth_can_be_raised,
                r"\setcounter{secnumdepth}{4}\section{A}\subsection{B}\subsubsection{C}\paragraph{D}\theparagraph",
                r"\setcounter{secnumdepth}{4}\section{A}\subsection{B}\subsubsection{C}\paragraph{D}1.1.1.1"
            ),
        ),
        failure_tests(
            (no_chapters_in_article, r"\chapter{A}"),
            (section_in_text, r"\textbf{\section{A}}"),
        ),
    ];

    mod report {
        use super::*;

        test_suite![
            options(TestOption::Library(library), TestOption::DocumentClass("report")),
            output_tests((
                chapter_then_section,
                r"\chapter{A}\section{B}",
                r#"<h1 id="chapter-1"><span class="number">1</span> A</h1><h2 id="section-2"><span class="number">1.1</span> B</h2>"#
            ),),
            equality_tests((
                new_chapter_resets_section,
                r"\chapter{A}\section{B}\chapter{C}\thesection",
                r"\chapter{A}\section{B}\chapter{C}2.0"
            ),),
        ];
    }

    mod book {
        use super::*;

        test_suite![
            options(TestOption::Library(library), TestOption::DocumentClass("book")),
            output_tests((
                front_matter_is_unnumbered,
                r"\frontmatter\chapter{Preface}\mainmatter\chapter{A}",
                r#"<h1>Preface</h1><h1 id="chapter-1"><span class="number">1</span> A</h1>"#
            ),),
        ];
    }
}
