//! The picture environment
//!
//! A picture is a box of a given size in which `\put` places objects at coordinates.
//! Coordinates and sizes without a unit are multiples of `\unitlength`.
//!
//! Every `\put` is rendered as a positioned container;
//!     the drawing commands inside it start at the container's origin,
//!     so nested `\put` commands add up.
//! The y axis points up, as in LaTeX.

use dimen::{Length, Vector};
use latexlang::command::{Arguments, Implementation};
use latexlang::error::SimpleError;
use latexlang::output::Backend;
use latexlang::parse::length::unit_length;
use latexlang::prelude as txl;
use latexlang::vm::Interpreter;

pub const PICTURE_DOC: &str = r"A picture

Usage: `\begin{picture}(<width>,<height>)(<x offset>,<y offset>) ... \end{picture}`

The optional offset is the coordinate of the picture's lower left corner.
";

pub const PUT_DOC: &str = r"Place an object in a picture

Usage: `\put(<x>,<y>){<object>}`
";

pub const LINE_DOC: &str = r"Draw a line segment

Usage: `\line(<dx>,<dy>){<length>}`

The slope is given by `(<dx>,<dy>)`.
The length is the horizontal extent of the segment, or the vertical extent
    for vertical segments, in multiples of `\unitlength`.
`\vector` takes the same arguments and draws an arrow.
";

pub const CIRCLE_DOC: &str = r"Draw a circle centered at the current point

Usage: `\circle{<diameter>}` or `\circle*{<diameter>}` for a disk
";

pub const QBEZIER_DOC: &str = r"Draw a quadratic Bézier curve

Usage: `\qbezier[<points>](<start>)(<control>)(<end>)`

The number of points is accepted for compatibility; the curve is always smooth.
";

fn origin() -> Vector {
    Vector::new(Length::ZERO, Length::ZERO)
}

fn with_style<B: Backend>(interpreter: &mut Interpreter<B>, node: B::Node, style: String) -> B::Node {
    interpreter.backend.with_attribute(node, "style", &style)
}

fn placed<B: Backend>(interpreter: &mut Interpreter<B>, content: Vec<B::Node>, at: Vector) -> B::Node {
    let precision = interpreter.config.precision;
    let node = interpreter.backend.create("div", content, &["put"]);
    let style = format!("left: {}; bottom: {}", at.x.to_css(precision), at.y.to_css(precision));
    with_style(interpreter, node, style)
}

pub fn get_picture<B: Backend>() -> Implementation<B> {
    Implementation::new(picture_fn).with_doc(PICTURE_DOC)
}

fn picture_fn<B: Backend>(interpreter: &mut Interpreter<B>, mut arguments: Arguments<B::Node>) -> txl::Result<Vec<B::Node>> {
    let size = arguments.coordinate(0)?;
    let mut body = arguments.take_content(2)?;
    if let Some(offset) = arguments.optional_coordinate(1)? {
        let shift = (origin() - offset)?;
        body = vec![placed(interpreter, body, shift)];
    }
    let precision = interpreter.config.precision;
    let picture = interpreter.backend.create("div", body, &["picture"]);
    let style = format!(
        "width: {}; height: {}",
        size.x.to_css(precision),
        size.y.to_css(precision)
    );
    Ok(vec![with_style(interpreter, picture, style)])
}

pub fn get_put<B: Backend>() -> Implementation<B> {
    Implementation::new(put_fn).with_doc(PUT_DOC)
}

fn put_fn<B: Backend>(interpreter: &mut Interpreter<B>, mut arguments: Arguments<B::Node>) -> txl::Result<Vec<B::Node>> {
    let at = arguments.coordinate(0)?;
    let content = arguments.take_content(1)?;
    Ok(vec![placed(interpreter, content, at)])
}

pub fn get_line<B: Backend>() -> Implementation<B> {
    Implementation::new(line_fn).with_doc(LINE_DOC)
}

pub fn get_vector<B: Backend>() -> Implementation<B> {
    Implementation::new(line_fn).with_doc(LINE_DOC)
}

fn line_fn<B: Backend>(interpreter: &mut Interpreter<B>, arguments: Arguments<B::Node>) -> txl::Result<Vec<B::Node>> {
    let slope = arguments.coordinate(0)?;
    let extent = unit_length(&interpreter.scope).checked_mul(arguments.float(1)?)?;
    let end = segment_end(slope, extent)?;
    if arguments.name() != "vector" {
        return Ok(vec![interpreter.backend.line(origin(), end, false)]);
    }
    let head = interpreter.backend.arrow_length();
    let shaft = shaft_end(end, head)?;
    Ok(vec![interpreter.backend.line(origin(), shaft, true)])
}

/// The end of the shaft of an arrow from the origin to `end`,
///     leaving room for a head of the given length.
///
/// Arrows in relative units are not shortened.
fn shaft_end(end: Vector, head: Length) -> txl::Result<Vector> {
    if end.x.is_relative() {
        return Ok(end);
    }
    let norm = end.norm()?;
    let head = match norm.compare(&head)? {
        std::cmp::Ordering::Less => norm,
        _ => head,
    };
    Ok(end.shift_end(-head)?)
}

/// The end point of a segment from the origin with the given slope and extent.
fn segment_end(slope: Vector, extent: Length) -> txl::Result<Vector> {
    let sign = |l: Length| if l.raw() < 0 { -1.0 } else { 1.0 };
    if slope.x.raw() == 0 && slope.y.raw() == 0 {
        return Err(SimpleError::new("the slope of a line cannot be (0,0)").into());
    }
    if slope.x.raw() == 0 {
        return Ok(Vector::new(Length::zero(extent.unit()), extent * sign(slope.y)));
    }
    let x = extent * sign(slope.x);
    Ok(Vector::new(x, x * slope.y.ratio(&slope.x)?))
}

pub fn get_circle<B: Backend>() -> Implementation<B> {
    Implementation::new(circle_fn).with_doc(CIRCLE_DOC)
}

fn circle_fn<B: Backend>(interpreter: &mut Interpreter<B>, arguments: Arguments<B::Node>) -> txl::Result<Vec<B::Node>> {
    let diameter = arguments.float(1)?;
    if diameter < 0.0 {
        return Err(SimpleError::new("the diameter of a circle cannot be negative").into());
    }
    let radius = unit_length(&interpreter.scope).checked_mul(diameter / 2.0)?;
    Ok(vec![interpreter
        .backend
        .circle(origin(), radius, arguments.star(0))])
}

pub fn get_qbezier<B: Backend>() -> Implementation<B> {
    Implementation::new(qbezier_fn).with_doc(QBEZIER_DOC)
}

fn qbezier_fn<B: Backend>(interpreter: &mut Interpreter<B>, arguments: Arguments<B::Node>) -> txl::Result<Vec<B::Node>> {
    let from = arguments.coordinate(1)?;
    let control = arguments.coordinate(2)?;
    let to = arguments.coordinate(3)?;
    Ok(vec![interpreter.backend.curve(from, control, to)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use latexlang::output::tree::Tree;
    use latexlang_testing::*;

    fn library() -> latexlang::extension::Library<Tree> {
        crate::library()
    }

    fn pt(value: f64) -> Length {
        crate::lengths::points(value)
    }

    #[test]
    fn segment_ends() {
        let slope = Vector::new(pt(2.0), pt(-1.0));
        assert_eq!(
            segment_end(slope, pt(4.0)).unwrap(),
            Vector::new(pt(4.0), pt(-2.0))
        );
        let slope = Vector::new(pt(-1.0), pt(0.0));
        assert_eq!(
            segment_end(slope, pt(3.0)).unwrap(),
            Vector::new(pt(-3.0), pt(0.0))
        );
        let slope = Vector::new(pt(0.0), pt(-5.0));
        assert_eq!(
            segment_end(slope, pt(3.0)).unwrap(),
            Vector::new(Length::ZERO, pt(-3.0))
        );
        assert!(segment_end(Vector::new(pt(0.0), pt(0.0)), pt(1.0)).is_err());
    }

    #[test]
    fn shaft_ends() {
        assert_eq!(
            shaft_end(Vector::new(pt(10.0), pt(0.0)), pt(3.0)).unwrap(),
            Vector::new(pt(7.0), pt(0.0))
        );
        assert_eq!(
            shaft_end(Vector::new(pt(0.0), pt(-10.0)), pt(3.0)).unwrap(),
            Vector::new(Length::ZERO, pt(-7.0))
        );
        assert_eq!(
            shaft_end(Vector::new(pt(3.0), pt(4.0)), pt(5.0)).unwrap(),
            Vector::new(Length::ZERO, Length::ZERO)
        );
        assert_eq!(
            shaft_end(Vector::new(pt(1.0), pt(0.0)), pt(5.0)).unwrap(),
            Vector::new(Length::ZERO, Length::ZERO)
        );
        let relative: Length = "2em".parse().unwrap();
        let end = Vector::new(relative, Length::zero(relative.unit()));
        assert_eq!(shaft_end(end, pt(1.0)).unwrap(), end);
    }

    const INCH: &str = r"\setlength{\unitlength}{72.27pt}";

    const ARROW_1: &str = r#"<defs><marker id="arrow-1" markerUnits="userSpaceOnUse" markerWidth="10" markerHeight="10" refX="0" refY="5" orient="auto"><path d="M0,0 L10,5 L0,10 z"/></marker></defs>"#;

    const LINE_45: &str = r#"<svg class="line" overflow="visible" width="0" height="0"><line x1="0px" y1="0px" x2="96px" y2="-96px" stroke="currentColor"/></svg>"#;

    test_suite![
        output_tests(
            (
                empty_picture,
                r"\begin{picture}(72.27,36.135)\end{picture}",
                r#"<div class="picture" style="width: 96px; height: 48px"></div>"#
            ),
            (
                put_line,
                format!(r"{INCH}\begin{{picture}}(2,1)\put(1,0){{\line(1,1){{1}}}}\end{{picture}}"),
                format!(
                    r#"<div class="picture" style="width: 192px; height: 96px"><div class="put" style="left: 96px; bottom: 0px">{LINE_45}</div></div>"#
                )
            ),
            (
                picture_with_offset,
                format!(r"{INCH}\begin{{picture}}(1,1)(1,1)\put(1,1){{x}}\end{{picture}}"),
                concat!(
                    r#"<div class="picture" style="width: 96px; height: 96px">"#,
                    r#"<div class="put" style="left: -96px; bottom: -96px">"#,
                    r#"<div class="put" style="left: 96px; bottom: 96px">x</div>"#,
                    r#"</div></div>"#,
                )
            ),
            (
                coordinates_with_units,
                r"\begin{picture}(72.27pt,1in)\put(1in,0.5in){x}\end{picture}",
                r#"<div class="picture" style="width: 96px; height: 96px"><div class="put" style="left: 96px; bottom: 48px">x</div></div>"#
            ),
            (
                vertical_vector,
                format!(r"{INCH}\put(0,0){{\vector(0,-1){{1}}}}"),
                format!(r#"<div class="put" style="left: 0px; bottom: 0px"><svg class="line" overflow="visible" width="0" height="0">{ARROW_1}<line x1="0px" y1="0px" x2="0px" y2="86px" stroke="currentColor" marker-end="url(#arrow-1)"/></svg></div>"#)
            ),
            (
                diagonal_vector,
                format!(r"{INCH}\vector(1,1){{1}}"),
                format!(
                    r#"<svg class="line" overflow="visible" width="0" height="0">{ARROW_1}<line x1="0px" y1="0px" x2="88.929px" y2="-88.929px" stroke="currentColor" marker-end="url(#arrow-1)"/></svg>"#
                )
            ),
            (
                circle,
                format!(r"{INCH}\put(0,0){{\circle{{1}}}}\put(0,0){{\circle*{{2}}}}"),
                concat!(
                    r#"<div class="put" style="left: 0px; bottom: 0px"><svg class="circle" overflow="visible" width="0" height="0"><circle cx="0px" cy="0px" r="48px" stroke="currentColor" fill="none"/></svg></div>"#,
                    r#"<div class="put" style="left: 0px; bottom: 0px"><svg class="circle" overflow="visible" width="0" height="0"><circle cx="0px" cy="0px" r="96px" stroke="currentColor" fill="currentColor"/></svg></div>"#,
                )
            ),
            (
                qbezier,
                format!(r"{INCH}\qbezier[20](0,0)(1,1)(2,0)"),
                r#"<svg class="curve" overflow="visible" width="0" height="0"><path d="M 0 0 Q 96 -96 192 0" stroke="currentColor" fill="none"/></svg>"#
            ),
        ),
        failure_tests(
            (zero_slope, r"\line(0,0){1}"),
            (negative_diameter, r"\circle{-1}"),
            (missing_size, r"\begin{picture}\end{picture}"),
            (incompatible_offset, r"\begin{picture}(1,1)(1em,1em)\end{picture}"),
            (put_in_text, r"\textbf{\put(0,0){x}}"),
            (coordinate_too_large, r"\put(1e30,0){x}"),
            (line_too_long, r"\line(1,0){99999999}"),
            (circle_too_large, r"\circle{99999999}"),
        ),
    ];
}
