//! Document structure: the class, packages and the title block

use crate::time::Date;
use latexlang::command::{Arguments, Implementation};
use latexlang::error::SimpleError;
use latexlang::extension::Options;
use latexlang::output::Backend;
use latexlang::prelude as txl;
use latexlang::vm::Interpreter;

pub const DOCUMENTCLASS_DOC: &str = r"Declare the document class

Usage: `\documentclass[<options>]{<class>}`

The command must come first in the document and starts the preamble.
The classes are `article`, `report` and `book`.
";

pub const USEPACKAGE_DOC: &str = r"Load packages

Usage: `\usepackage[<options>]{<package>,...}`

Unknown packages are skipped with a warning.
";

pub const METADATA_DOC: &str = r"Set the title, author or date of the document

Usage: `\title{<title>}`, `\author{<names>}`, `\date{<date>}`

The values are printed by `\maketitle`.
";

pub const MAKETITLE_DOC: &str = r"Print the title block

The date defaults to the current date; `\date{}` removes it.
";

pub fn get_documentclass<B: Backend>() -> Implementation<B> {
    Implementation::new(documentclass_fn).with_doc(DOCUMENTCLASS_DOC)
}

fn documentclass_fn<B: Backend>(interpreter: &mut Interpreter<B>, arguments: Arguments<B::Node>) -> txl::Result<Vec<B::Node>> {
    interpreter.begin_preamble()?;
    let options = Options::parse(arguments.list(0)?);
    interpreter.load_document_class(&arguments.text(1)?, options)?;
    Ok(vec![])
}

pub fn get_usepackage<B: Backend>() -> Implementation<B> {
    Implementation::new(usepackage_fn).with_doc(USEPACKAGE_DOC)
}

fn usepackage_fn<B: Backend>(interpreter: &mut Interpreter<B>, arguments: Arguments<B::Node>) -> txl::Result<Vec<B::Node>> {
    let options = arguments.list(0)?;
    for name in arguments.list(1)? {
        interpreter.load_package(name, Options::parse(options));
    }
    Ok(vec![])
}

pub fn get_metadata<B: Backend>() -> Implementation<B> {
    Implementation::new(metadata_fn).with_doc(METADATA_DOC)
}

fn metadata_fn<B: Backend>(interpreter: &mut Interpreter<B>, mut arguments: Arguments<B::Node>) -> txl::Result<Vec<B::Node>> {
    let value = arguments.take_content(0)?;
    interpreter.metadata.insert(arguments.name().to_string(), value);
    Ok(vec![])
}

pub fn get_maketitle<B: Backend>() -> Implementation<B> {
    Implementation::new(maketitle_fn).with_doc(MAKETITLE_DOC)
}

fn maketitle_fn<B: Backend>(interpreter: &mut Interpreter<B>, _: Arguments<B::Node>) -> txl::Result<Vec<B::Node>> {
    let Some(title) = interpreter.metadata.get("title").cloned() else {
        return Err(SimpleError::new("no \\title given")
            .with_note("set the title with \\title{...} before \\maketitle")
            .into());
    };
    let mut children = vec![interpreter.backend.create("h1", title, &[])];
    if let Some(author) = interpreter.metadata.get("author").cloned() {
        children.push(interpreter.backend.create("p", author, &["author"]));
    }
    let date = match interpreter.metadata.get("date").cloned() {
        Some(date) => date,
        None => Date::today()
            .map(|date| vec![interpreter.text(&date.to_string())])
            .unwrap_or_default(),
    };
    if !date.is_empty() {
        children.push(interpreter.backend.create("p", date, &["date"]));
    }
    Ok(vec![interpreter.backend.create("div", children, &["title"])])
}

#[cfg(test)]
mod tests {
    use latexlang::output::tree::Tree;
    use latexlang_testing::*;

    fn library() -> latexlang::extension::Library<Tree> {
        crate::library()
    }

    const DOCUMENT: &str = r"\documentclass[12pt]{article}
\usepackage{hyperref}
\title{A \textbf{bold} title}
\author{Ada}
\date{}
\begin{document}
\maketitle
Text.
\end{document}
ignored";

    test_suite![
        output_tests(
            (
                document,
                DOCUMENT,
                r#"<div class="title"><h1>A <span class="bf">bold</span> title</h1><p class="author">Ada</p></div><p>Text.</p>"#
            ),
            (
                explicit_date,
                r"\documentclass{article}\title{T}\date{1 May}\begin{document}\maketitle\end{document}",
                r#"<div class="title"><h1>T</h1><p class="date">1 May</p></div>"#
            ),
            (
                provided_package,
                r"\documentclass{article}\usepackage{calc,keyval}\begin{document}a\end{document}",
                "<p>a</p>"
            ),
        ),
        failure_tests(
            (unknown_class, r"\documentclass{letter}"),
            (two_classes, r"\documentclass{article}\documentclass{book}"),
            (text_in_preamble, r"\documentclass{article} text \begin{document}\end{document}"),
            (usepackage_in_body, r"\documentclass{article}\begin{document}\usepackage{calc}\end{document}"),
            (
                maketitle_without_title,
                r"\documentclass{article}\begin{document}\maketitle\end{document}"
            ),
            (section_in_preamble, r"\documentclass{article}\section{A}\begin{document}\end{document}"),
        ),
        warning_tests(
            (
                unknown_package,
                r"\documentclass{article}\usepackage{hyperreff}\begin{document}a\end{document}",
                "did you mean `hyperref`?"
            ),
            (
                unused_class_option,
                r"\documentclass[draft]{article}\begin{document}a\end{document}",
                "unused option `draft`"
            ),
        ),
    ];
}
