use latexlang::error::{Severity, SimpleError};
use latexlang::extension::{CommandProvider, Options};
use latexlang::output::tree::{self, Tree};
use latexlang::vm::Interpreter;
use latexlang::prelude as txl;
use latexlang::Config;

fn interpreter() -> Interpreter<Tree> {
    Interpreter::with_library(Tree::default(), Config::default(), latexlang_stdlib::library()).unwrap()
}

fn render(interpreter: &mut Interpreter<Tree>, source: &str) -> String {
    let nodes = interpreter.run(source).unwrap();
    tree::to_html(&nodes, &interpreter.labels, interpreter.config.precision)
}

const ARTICLE: &str = r"\documentclass[12pt]{article}
\usepackage{hyperref,nosuchpackage}
\title{Notes}
\date{}
\begin{document}
\maketitle
\section{Intro}\label{intro}
See section~\ref{later} and footnote\footnote{Here.}.

\section{Later}\label{later}
\subsection{Details}\label{details}
\begin{enumerate}
\item First
\item\label{second} Second, after \ref{intro}
\end{enumerate}
Item \ref{second} is in \ref{details}.
\end{document}
Everything after the document is ignored.";

#[test]
fn article() {
    let mut interpreter = interpreter();
    let html = render(&mut interpreter, ARTICLE);
    assert!(html.starts_with(r#"<div class="title"><h1>Notes</h1></div>"#), "{html}");
    assert!(html.contains(r##"<a href="#section-2">2</a>"##), "{html}");
    assert!(html.contains(r#"<span class="number">2.1</span> Details"#), "{html}");
    assert!(html.contains(r##"<a href="#section-1">1</a>"##), "{html}");
    assert!(html.contains(r#"<sup>1</sup>"#), "{html}");
    assert!(html.contains("<ol>"), "{html}");
    assert!(!html.contains("ignored"), "{html}");
    assert!(!html.contains("??"), "{html}");
}

#[test]
fn unknown_package_does_not_abort_the_document() {
    let mut interpreter = interpreter();
    render(&mut interpreter, ARTICLE);
    let warnings: Vec<&str> = interpreter
        .diagnostics
        .warnings()
        .map(|d| d.message.as_str())
        .collect();
    assert_eq!(warnings.len(), 1, "{warnings:?}");
    assert!(warnings[0].starts_with("unknown package `nosuchpackage`"), "{warnings:?}");
}

#[test]
fn unknown_class_aborts_the_document() {
    let mut interpreter = interpreter();
    let err = interpreter
        .run(r"\documentclass{artcle}\begin{document}a\end{document}")
        .unwrap_err();
    assert!(err.notes().iter().any(|note| note.contains("article")), "{err}");
}

#[test]
fn documents_are_independent() {
    let mut first = interpreter();
    let mut second = interpreter();
    render(&mut first, r"\newcounter{c}\stepcounter{c}\stepcounter{c}");
    assert_eq!(render(&mut second, r"\newcounter{c}\stepcounter{c}\arabic{c}"), "<p>1</p>");
    assert_eq!(render(&mut first, r"\arabic{c}"), "<p>2</p>");
}

#[test]
fn configured_class() {
    let config = Config {
        document_class: Some("report".into()),
        ..Default::default()
    };
    let mut interpreter =
        Interpreter::with_library(Tree::default(), config, latexlang_stdlib::library()).unwrap();
    let html = render(&mut interpreter, r"\chapter{A}\section{B}\label{b}\ref{b}");
    assert!(html.ends_with(r##"<p><a href="#section-2">1.1</a></p>"##), "{html}");
}

#[test]
fn undefined_references_are_informational() {
    let mut interpreter = interpreter();
    assert_eq!(render(&mut interpreter, r"\ref{nowhere}"), "<p>??</p>");
    let entries = interpreter.diagnostics.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].severity, Severity::Info);
}

fn missing_fonts(
    _: &mut Interpreter<Tree>,
    _: &mut Options,
) -> txl::Result<Box<dyn CommandProvider<Tree>>> {
    Err(SimpleError::new("font files are missing").into())
}

#[test]
fn failing_package_is_skipped() {
    let mut library = latexlang_stdlib::library();
    library.packages.insert("fancyfonts", missing_fonts);
    let mut interpreter =
        Interpreter::with_library(Tree::default(), Config::default(), library).unwrap();
    assert_eq!(render(&mut interpreter, r"before\usepackage{fancyfonts}after"), "<p>beforeafter</p>");
    let warnings: Vec<&str> = interpreter
        .diagnostics
        .warnings()
        .map(|d| d.message.as_str())
        .collect();
    assert_eq!(
        warnings,
        vec!["package `fancyfonts` could not be loaded: font files are missing"]
    );
    assert!(!interpreter.is_package_loaded("fancyfonts"));
    assert!(!interpreter.commands.contains("fancyfont"));
    let err = interpreter.run(r"\fancyfont{x}").unwrap_err();
    assert_eq!(err.title(), r"undefined command \fancyfont");
}
