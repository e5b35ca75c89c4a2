//! List environments
//!
//! `itemize`, `enumerate` and `description` split their body at each `\item`.
//! Lists nest up to four levels deep.
//! The label of an `itemize` item depends on the nesting level;
//!     `enumerate` items are numbered with the counters `enumi` to `enumiv`.

use crate::counters;
use latexlang::command::{Arguments, Implementation, Item};
use latexlang::counter::{Part, Style};
use latexlang::error::SimpleError;
use latexlang::output::Backend;
use latexlang::prelude as txl;
use latexlang::vm::Interpreter;

pub const ITEMIZE_DOC: &str = r"A bulleted list

Usage: `\begin{itemize} \item ... \item[<label>] ... \end{itemize}`
";

pub const ENUMERATE_DOC: &str = r"A numbered list

Usage: `\begin{enumerate} \item ... \end{enumerate}`

Items are numbered 1., 2., ... at the first level, (a), (b), ... at the second,
    i., ii., ... at the third and A., B., ... at the fourth.
Each numbered item can be the target of a `\label`.
An item with an explicit label, `\item[<label>]`, is not numbered.
";

pub const DESCRIPTION_DOC: &str = r"A list of terms and descriptions

Usage: `\begin{description} \item[<term>] ... \end{description}`
";

const MAX_DEPTH: i32 = 4;

const ITEMIZE_LABELS: [&str; 4] = ["•", "–", "∗", "·"];

const ENUMERATE_LEVELS: [(&str, Style, &str, &str); 4] = [
    ("enumi", Style::Arabic, "", "."),
    ("enumii", Style::Alph, "(", ")"),
    ("enumiii", Style::Roman, "", "."),
    ("enumiv", Style::UpperAlph, "", "."),
];

/// Creates the nesting depth counters and the `enumerate` counters.
pub fn initialize<B: Backend>(interpreter: &mut Interpreter<B>) -> txl::Result<()> {
    interpreter.counters.create("@itemdepth", None)?;
    interpreter.counters.create("@enumdepth", None)?;
    let mut parent: Option<&str> = None;
    for (name, style, _, _) in ENUMERATE_LEVELS {
        counters::new_counter(interpreter, name, parent)?;
        interpreter.counters.set_representation(
            name,
            vec![Part::Value {
                counter: name.into(),
                style,
            }],
        )?;
        parent = Some(name);
    }
    Ok(())
}

fn enter<B: Backend>(interpreter: &mut Interpreter<B>, depth_counter: &str) -> txl::Result<i32> {
    let depth = interpreter.counters.get(depth_counter)? + 1;
    if depth > MAX_DEPTH {
        return Err(SimpleError::new("lists are nested too deeply")
            .with_note(format!("lists can be nested at most {MAX_DEPTH} levels deep"))
            .into());
    }
    interpreter.counters.set(depth_counter, depth)?;
    Ok(depth)
}

fn leave<B: Backend>(interpreter: &mut Interpreter<B>, depth_counter: &str) -> txl::Result<()> {
    interpreter.counters.add(depth_counter, -1)
}

fn level_index<B: Backend>(interpreter: &Interpreter<B>, depth_counter: &str) -> usize {
    let depth = interpreter.counters.get(depth_counter).unwrap_or(1);
    usize::try_from(depth - 1).unwrap_or(0).min(MAX_DEPTH as usize - 1)
}

fn render_items<B: Backend>(interpreter: &mut Interpreter<B>, kind: &str, items: Vec<Item<B::Node>>) -> B::Node {
    let items = items
        .into_iter()
        .map(|item| {
            let mut children = vec![];
            if !item.label.is_empty() {
                children.push(interpreter.backend.create("span", item.label, &["label"]));
            }
            children.extend(item.content);
            interpreter.backend.create("li", children, &[])
        })
        .collect();
    interpreter.backend.create(kind, items, &[])
}

pub fn get_itemize<B: Backend>() -> Implementation<B> {
    Implementation::new(itemize_fn)
        .with_prelude(itemize_prelude)
        .with_item(itemize_item)
        .with_doc(ITEMIZE_DOC)
}

fn itemize_prelude<B: Backend>(interpreter: &mut Interpreter<B>, _: &Arguments<B::Node>) -> txl::Result<()> {
    enter(interpreter, "@itemdepth")?;
    Ok(())
}

fn itemize_item<B: Backend>(
    interpreter: &mut Interpreter<B>,
    _: &Arguments<B::Node>,
    label: Option<Vec<B::Node>>,
) -> txl::Result<Vec<B::Node>> {
    if let Some(label) = label {
        return Ok(label);
    }
    let bullet = ITEMIZE_LABELS[level_index(interpreter, "@itemdepth")];
    Ok(vec![interpreter.text(bullet)])
}

fn itemize_fn<B: Backend>(
    interpreter: &mut Interpreter<B>,
    mut arguments: Arguments<B::Node>,
) -> txl::Result<Vec<B::Node>> {
    let items = arguments.take_items(0)?;
    leave(interpreter, "@itemdepth")?;
    Ok(vec![render_items(interpreter, "ul", items)])
}

pub fn get_enumerate<B: Backend>() -> Implementation<B> {
    Implementation::new(enumerate_fn)
        .with_prelude(enumerate_prelude)
        .with_item(enumerate_item)
        .with_doc(ENUMERATE_DOC)
}

fn enumerate_prelude<B: Backend>(interpreter: &mut Interpreter<B>, _: &Arguments<B::Node>) -> txl::Result<()> {
    enter(interpreter, "@enumdepth")?;
    let (counter, _, _, _) = ENUMERATE_LEVELS[level_index(interpreter, "@enumdepth")];
    interpreter.counters.set(counter, 0)
}

fn enumerate_item<B: Backend>(
    interpreter: &mut Interpreter<B>,
    _: &Arguments<B::Node>,
    label: Option<Vec<B::Node>>,
) -> txl::Result<Vec<B::Node>> {
    if let Some(label) = label {
        return Ok(label);
    }
    let (counter, _, open, close) = ENUMERATE_LEVELS[level_index(interpreter, "@enumdepth")];
    let snapshot = counters::ref_step(interpreter, counter, "item")?;
    Ok(vec![interpreter.text(&format!("{open}{}{close}", snapshot.text))])
}

fn enumerate_fn<B: Backend>(
    interpreter: &mut Interpreter<B>,
    mut arguments: Arguments<B::Node>,
) -> txl::Result<Vec<B::Node>> {
    let items = arguments.take_items(0)?;
    leave(interpreter, "@enumdepth")?;
    Ok(vec![render_items(interpreter, "ol", items)])
}

pub fn get_description<B: Backend>() -> Implementation<B> {
    Implementation::new(description_fn).with_doc(DESCRIPTION_DOC)
}

fn description_fn<B: Backend>(
    interpreter: &mut Interpreter<B>,
    mut arguments: Arguments<B::Node>,
) -> txl::Result<Vec<B::Node>> {
    let mut children = vec![];
    for item in arguments.take_items(0)? {
        children.push(interpreter.backend.create("dt", item.label, &[]));
        children.push(interpreter.backend.create("dd", item.content, &[]));
    }
    Ok(vec![interpreter.backend.create("dl", children, &[])])
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
                itemize,
                "\\begin{itemize}\n  \\item a\n  \\item[+] b\n\\end{itemize}",
                r#"<ul><li><span class="label">•</span><p>a</p></li><li><span class="label">+</span><p>b</p></li></ul>"#
            ),
            (
                nested_itemize,
                r"\begin{itemize}\item a \begin{itemize}\item b\end{itemize}\end{itemize}",
                concat!(
                    r#"<ul><li><span class="label">•</span><p>a</p>"#,
                    r#"<ul><li><span class="label">–</span><p>b</p></li></ul>"#,
                    r#"</li></ul>"#,
                )
            ),
            (
                enumerate,
                r"\begin{enumerate}\item a\item b\end{enumerate}",
                r#"<ol><li><span class="label">1.</span><p>a</p></li><li><span class="label">2.</span><p>b</p></li></ol>"#
            ),
            (
                nested_enumerate,
                r"\begin{enumerate}\item a \begin{enumerate}\item b\end{enumerate}\end{enumerate}",
                concat!(
                    r#"<ol><li><span class="label">1.</span><p>a</p>"#,
                    r#"<ol><li><span class="label">(a)</span><p>b</p></li></ol>"#,
                    r#"</li></ol>"#,
                )
            ),
            (
                enumerate_restarts,
                r"\begin{enumerate}\item a\end{enumerate}\begin{enumerate}\item b\end{enumerate}",
                r#"<ol><li><span class="label">1.</span><p>a</p></li></ol><ol><li><span class="label">1.</span><p>b</p></li></ol>"#
            ),
            (
                item_label,
                r"\begin{enumerate}\item a\item b\label{b}\end{enumerate}\ref{b}",
                r##"<ol><li><span class="label">1.</span><p>a</p></li><li><span class="label">2.</span><p>b</p></li></ol><p><a href="#item-2">2</a></p>"##
            ),
            (
                description,
                r"\begin{description}\item[Term] text\end{description}",
                "<dl><dt>Term</dt><dd><p>text</p></dd></dl>"
            ),
            (
                item_with_paragraphs,
                "\\begin{itemize}\\item a\n\nb\\end{itemize}",
                r#"<ul><li><span class="label">•</span><p>a</p><p>b</p></li></ul>"#
            ),
        ),
        failure_tests(
            (text_before_item, r"\begin{itemize}a\item b\end{itemize}"),
            (
                nested_too_deeply,
                r"\begin{itemize}\item\begin{itemize}\item\begin{itemize}\item\begin{itemize}\item\begin{itemize}\item a\end{itemize}\end{itemize}\end{itemize}\end{itemize}\end{itemize}"
            ),
            (unterminated_list, r"\begin{itemize}\item a"),
            (mismatched_end, r"\begin{itemize}\item a\end{enumerate}"),
        ),
    ];
}
