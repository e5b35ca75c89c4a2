//! Packages
//!
//! - `hyperref`: links, with `\url` and `\href`.
//! - `xcolor`: colored text and boxes, with `\textcolor` and `\colorbox`.

use crate::Provider;
use latexlang::command::{Arguments, Implementation};
use latexlang::error::{SimpleError, UndefinedError};
use latexlang::extension::{CommandProvider, Constructor, Options};
use latexlang::output::Backend;
use latexlang::prelude as txl;
use latexlang::vm::Interpreter;
use std::collections::HashMap;

pub const URL_DOC: &str = r"Print a link to a URL

Usage: `\url{<url>}`
";

pub const HREF_DOC: &str = r"Link text to a URL

Usage: `\href{<url>}{<text>}`
";

pub const TEXTCOLOR_DOC: &str = r"Color text

Usage: `\textcolor[<model>]{<color>}{<text>}`

Without a model the color is one of the named colors, like `red` or `darkgray`.
The models are `HTML` (`FF8000`), `rgb` (`1,0.5,0`), `RGB` (`255,128,0`) and `gray` (`0.5`).
`\colorbox` takes the same arguments and colors the background instead.
";

pub fn all_packages<B: Backend>() -> HashMap<&'static str, Constructor<B>> {
    HashMap::from([
        ("hyperref", hyperref::<B> as Constructor<B>),
        ("xcolor", xcolor::<B>),
    ])
}

fn hyperref<B: Backend>(_: &mut Interpreter<B>, options: &mut Options) -> txl::Result<Box<dyn CommandProvider<B>>> {
    for option in ["colorlinks", "hidelinks", "breaklinks", "unicode"] {
        options.flag(option);
    }
    Ok(Provider::new(
        HashMap::from([("href", get_href()), ("url", get_url())]),
        HashMap::from([("href", "H u hg"), ("url", "H u")]),
    )
    .boxed())
}

fn xcolor<B: Backend>(_: &mut Interpreter<B>, options: &mut Options) -> txl::Result<Box<dyn CommandProvider<B>>> {
    options.choice(&["dvipsnames", "svgnames", "x11names"]);
    Ok(Provider::new(
        HashMap::from([("colorbox", get_textcolor()), ("textcolor", get_textcolor())]),
        HashMap::from([("colorbox", "H k? u hg"), ("textcolor", "H k? u hg")]),
    )
    .boxed())
}

fn link<B: Backend>(interpreter: &mut Interpreter<B>, url: &str, content: Vec<B::Node>, classes: &[&str]) -> B::Node {
    let link = interpreter.backend.create("a", content, classes);
    interpreter.backend.with_attribute(link, "href", url)
}

pub fn get_url<B: Backend>() -> Implementation<B> {
    Implementation::new(url_fn).with_doc(URL_DOC)
}

fn url_fn<B: Backend>(interpreter: &mut Interpreter<B>, arguments: Arguments<B::Node>) -> txl::Result<Vec<B::Node>> {
    let url = arguments.text(0)?;
    let text = interpreter.text(&url);
    Ok(vec![link(interpreter, &url, vec![text], &["url"])])
}

pub fn get_href<B: Backend>() -> Implementation<B> {
    Implementation::new(href_fn).with_doc(HREF_DOC)
}

fn href_fn<B: Backend>(interpreter: &mut Interpreter<B>, mut arguments: Arguments<B::Node>) -> txl::Result<Vec<B::Node>> {
    let url = arguments.text(0)?;
    let content = arguments.take_content(1)?;
    Ok(vec![link(interpreter, &url, content, &[])])
}

const NAMED_COLORS: [(&str, &str); 19] = [
    ("black", "#000000"),
    ("blue", "#0000ff"),
    ("brown", "#bf8040"),
    ("cyan", "#00ffff"),
    ("darkgray", "#404040"),
    ("gray", "#808080"),
    ("green", "#00ff00"),
    ("lightgray", "#bfbfbf"),
    ("lime", "#bfff00"),
    ("magenta", "#ff00ff"),
    ("olive", "#808000"),
    ("orange", "#ff8000"),
    ("pink", "#ffbfbf"),
    ("purple", "#bf0040"),
    ("red", "#ff0000"),
    ("teal", "#008080"),
    ("violet", "#800080"),
    ("white", "#ffffff"),
    ("yellow", "#ffff00"),
];

fn invalid_color(spec: &str, expected: &str) -> Box<latexlang::error::Error> {
    SimpleError::new(format!("invalid color `{spec}`"))
        .with_note(format!("expected {expected}"))
        .into()
}

fn hex(values: &[u8]) -> String {
    let digits: String = values.iter().map(|v| format!("{v:02x}")).collect();
    format!("#{digits}")
}

/// Parses `n` comma separated numbers.
fn components<T: std::str::FromStr>(spec: &str, n: usize) -> Option<Vec<T>> {
    let values: Vec<T> = spec
        .split(',')
        .map(|part| part.trim().parse().ok())
        .collect::<Option<_>>()?;
    (values.len() == n).then_some(values)
}

fn unit_interval(value: f64) -> Option<u8> {
    (0.0..=1.0)
        .contains(&value)
        .then(|| (value * 255.0).round() as u8)
}

/// Converts a color in one of the xcolor models to CSS hex notation.
fn css_color(model: Option<&str>, spec: &str) -> txl::Result<String> {
    match model {
        None => match NAMED_COLORS.iter().find(|(name, _)| *name == spec) {
            Some((_, value)) => Ok(value.to_string()),
            None => Err(UndefinedError::new("color", spec, NAMED_COLORS.iter().map(|(name, _)| *name)).into()),
        },
        Some("HTML") => {
            if spec.len() != 6 || !spec.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(invalid_color(spec, "six hexadecimal digits, like `FF8000`"));
            }
            Ok(format!("#{}", spec.to_ascii_lowercase()))
        }
        Some("rgb") => components::<f64>(spec, 3)
            .and_then(|values| values.into_iter().map(unit_interval).collect::<Option<Vec<u8>>>())
            .map(|values| hex(&values))
            .ok_or_else(|| invalid_color(spec, "three numbers between 0 and 1")),
        Some("RGB") => components::<u8>(spec, 3)
            .map(|values| hex(&values))
            .ok_or_else(|| invalid_color(spec, "three integers between 0 and 255")),
        Some("gray") => components::<f64>(spec, 1)
            .and_then(|values| unit_interval(values[0]))
            .map(|v| hex(&[v, v, v]))
            .ok_or_else(|| invalid_color(spec, "a number between 0 and 1")),
        Some(model) => Err(UndefinedError::new("color model", model, ["HTML", "rgb", "RGB", "gray"]).into()),
    }
}

pub fn get_textcolor<B: Backend>() -> Implementation<B> {
    Implementation::new(textcolor_fn).with_doc(TEXTCOLOR_DOC)
}

fn textcolor_fn<B: Backend>(interpreter: &mut Interpreter<B>, mut arguments: Arguments<B::Node>) -> txl::Result<Vec<B::Node>> {
    let color = css_color(arguments.optional_text(0)?.as_deref(), &arguments.text(1)?)?;
    let content = arguments.take_content(2)?;
    let (span, style) = match arguments.name() {
        "colorbox" => (
            interpreter.backend.create("span", content, &["colorbox"]),
            format!("background-color: {color}"),
        ),
        _ => (
            interpreter.backend.create("span", content, &[]),
            format!("color: {color}"),
        ),
    };
    Ok(vec![interpreter.backend.with_attribute(span, "style", &style)])
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
    fn color_models() {
        assert_eq!(css_color(None, "orange").unwrap(), "#ff8000");
        assert_eq!(css_color(Some("HTML"), "FF8000").unwrap(), "#ff8000");
        assert_eq!(css_color(Some("rgb"), "1, 0.5, 0").unwrap(), "#ff8000");
        assert_eq!(css_color(Some("RGB"), "255,128,0").unwrap(), "#ff8000");
        assert_eq!(css_color(Some("gray"), "0").unwrap(), "#000000");
        assert!(css_color(None, "chartreuse").is_err());
        assert!(css_color(Some("HTML"), "FF80").is_err());
        assert!(css_color(Some("rgb"), "1,2,0").is_err());
        assert!(css_color(Some("RGB"), "256,0,0").is_err());
        assert!(css_color(Some("cmyk"), "0,0,0,1").is_err());
    }

    test_suite![
        output_tests(
            (
                url,
                r"\usepackage{hyperref}\url{https://example.com/a_b}",
                r#"<p><a class="url" href="https://example.com/a_b">https://example.com/a_b</a></p>"#
            ),
            (
                href,
                r"\usepackage[colorlinks]{hyperref}\href{https://example.com}{the \emph{site}}",
                r#"<p><a href="https://example.com">the <span class="it">site</span></a></p>"#
            ),
            (
                textcolor,
                r"\usepackage{xcolor}\textcolor{red}{a}",
                r#"<p><span style="color: #ff0000">a</span></p>"#
            ),
            (
                textcolor_with_model,
                r"\usepackage{xcolor}\textcolor[rgb]{0, 0, 1}{a}",
                r#"<p><span style="color: #0000ff">a</span></p>"#
            ),
            (
                colorbox,
                r"\usepackage{xcolor}\colorbox{yellow}{\textbf{a}}",
                r#"<p><span class="colorbox" style="background-color: #ffff00"><span class="bf">a</span></span></p>"#
            ),
            (package_loaded_twice, r"\usepackage{xcolor}\usepackage{xcolor}a", "<p>a</p>"),
        ),
        failure_tests(
            (url_without_hyperref, r"\url{https://example.com}"),
            (unknown_color, r"\usepackage{xcolor}\textcolor{chartreuse}{a}"),
        ),
        warning_tests(
            (
                unused_package_option,
                r"\usepackage[pdfborder]{hyperref}a",
                "unused option `pdfborder` for package `hyperref`"
            ),
        ),
    ];
}
