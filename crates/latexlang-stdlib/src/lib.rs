//! # The Latexlang standard library
//!
//! This crate contains the commands, document classes and packages of Latexlang.
//!
//! The [library] function returns everything at once, ready to be installed in an
//!     [Interpreter]:
//!
//! ```
//! use latexlang::output::tree::{self, Tree};
//! use latexlang::vm::Interpreter;
//! use latexlang::Config;
//!
//! let mut interpreter =
//!     Interpreter::with_library(Tree::default(), Config::default(), latexlang_stdlib::library()).unwrap();
//! let nodes = interpreter.run(r"\textbf{Hello}, world").unwrap();
//! assert_eq!(
//!     tree::to_html(&nodes, &interpreter.labels, 3),
//!     r#"<p><span class="bf">Hello</span>, world</p>"#,
//! );
//! ```

extern crate latexlang;

use std::collections::HashMap;

use latexlang::command::Implementation;
use latexlang::extension::{CommandProvider, Library, Options};
use latexlang::output::Backend;
use latexlang::prelude as txl;
use latexlang::vm::Interpreter;

pub mod alignment;
pub mod classes;
pub mod counters;
pub mod document;
pub mod fonts;
pub mod labels;
pub mod lengths;
pub mod lists;
pub mod packages;
pub mod picture;
pub mod sectioning;
pub mod text;
pub mod time;

/// Commands and signatures of a built-in layer, class or package.
///
/// Layers compose with [Provider::extend]; the entries of the later layer win.
pub struct Provider<B: Backend> {
    pub commands: HashMap<&'static str, Implementation<B>>,
    pub signatures: HashMap<&'static str, &'static str>,
}

impl<B: Backend> Provider<B> {
    pub fn new(
        commands: HashMap<&'static str, Implementation<B>>,
        signatures: HashMap<&'static str, &'static str>,
    ) -> Provider<B> {
        Provider {
            commands,
            signatures,
        }
    }

    pub fn extend(mut self, other: Provider<B>) -> Provider<B> {
        self.commands.extend(other.commands);
        self.signatures.extend(other.signatures);
        self
    }

    pub fn boxed(self) -> Box<dyn CommandProvider<B>> {
        Box::new(self)
    }
}

impl<B: Backend> CommandProvider<B> for Provider<B> {
    fn commands(&self) -> HashMap<&'static str, Implementation<B>> {
        self.commands.clone()
    }

    fn signatures(&self) -> HashMap<&'static str, &'static str> {
        self.signatures.clone()
    }
}

pub fn all_initial_built_ins<B: Backend>() -> HashMap<&'static str, Implementation<B>> {
    HashMap::from([
        ("\\", lengths::get_newline()),
        //
        ("Alph", counters::get_style()),
        ("addtocounter", counters::get_addtocounter()),
        ("addtolength", lengths::get_addtolength()),
        ("alph", counters::get_style()),
        ("arabic", counters::get_style()),
        //
        ("bf", fonts::get_old_declaration()),
        ("bfseries", fonts::get_declaration()),
        ("bigskip", lengths::get_skip()),
        //
        ("center", alignment::get_environment()),
        ("centering", alignment::get_declaration()),
        ("circle", picture::get_circle()),
        ("copyright", text::get_symbol()),
        ("counterwithin", counters::get_counterwithin()),
        ("counterwithout", counters::get_counterwithout()),
        //
        ("dag", text::get_symbol()),
        ("description", lists::get_description()),
        ("documentclass", document::get_documentclass()),
        ("dots", text::get_symbol()),
        //
        ("em", fonts::get_em()),
        ("emph", fonts::get_emph()),
        ("enumerate", lists::get_enumerate()),
        //
        ("flushleft", alignment::get_environment()),
        ("flushright", alignment::get_environment()),
        ("fnsymbol", counters::get_style()),
        ("footnote", text::get_footnote()),
        ("footnotesize", fonts::get_declaration()),
        //
        ("hspace", lengths::get_hspace()),
        ("Huge", fonts::get_declaration()),
        ("huge", fonts::get_declaration()),
        //
        ("indent", text::get_relax()),
        ("it", fonts::get_old_declaration()),
        ("itemize", lists::get_itemize()),
        ("itshape", fonts::get_declaration()),
        //
        ("label", labels::get_label()),
        ("LARGE", fonts::get_declaration()),
        ("Large", fonts::get_declaration()),
        ("large", fonts::get_declaration()),
        ("LaTeX", text::get_logo()),
        ("ldots", text::get_symbol()),
        ("line", picture::get_line()),
        //
        ("mdseries", fonts::get_declaration()),
        ("medskip", lengths::get_skip()),
        //
        ("newcounter", counters::get_newcounter()),
        ("newlength", lengths::get_newlength()),
        ("newline", lengths::get_newline()),
        ("noindent", text::get_relax()),
        ("normalfont", fonts::get_normalfont()),
        ("normalsize", fonts::get_declaration()),
        //
        ("P", text::get_symbol()),
        ("picture", picture::get_picture()),
        ("put", picture::get_put()),
        //
        ("qbezier", picture::get_qbezier()),
        ("qquad", text::get_symbol()),
        ("quad", text::get_symbol()),
        ("quotation", text::get_quote()),
        ("quote", text::get_quote()),
        //
        ("raggedleft", alignment::get_declaration()),
        ("raggedright", alignment::get_declaration()),
        ("ref", labels::get_ref()),
        ("refstepcounter", counters::get_refstepcounter()),
        ("relax", text::get_relax()),
        ("rm", fonts::get_old_declaration()),
        ("rmfamily", fonts::get_declaration()),
        ("Roman", counters::get_style()),
        ("roman", counters::get_style()),
        //
        ("S", text::get_symbol()),
        ("sc", fonts::get_old_declaration()),
        ("scriptsize", fonts::get_declaration()),
        ("scshape", fonts::get_declaration()),
        ("setcounter", counters::get_setcounter()),
        ("setlength", lengths::get_setlength()),
        ("sf", fonts::get_old_declaration()),
        ("sffamily", fonts::get_declaration()),
        ("sl", fonts::get_old_declaration()),
        ("slshape", fonts::get_declaration()),
        ("small", fonts::get_declaration()),
        ("smallskip", lengths::get_skip()),
        ("stepcounter", counters::get_stepcounter()),
        //
        ("TeX", text::get_logo()),
        ("textbackslash", text::get_symbol()),
        ("textbf", fonts::get_text()),
        ("textit", fonts::get_text()),
        ("textmd", fonts::get_text()),
        ("textnormal", fonts::get_textnormal()),
        ("textrm", fonts::get_text()),
        ("textsc", fonts::get_text()),
        ("textsf", fonts::get_text()),
        ("textsl", fonts::get_text()),
        ("texttt", fonts::get_text()),
        ("textup", fonts::get_text()),
        ("the", lengths::get_the()),
        ("tiny", fonts::get_declaration()),
        ("today", time::get_today()),
        ("tt", fonts::get_old_declaration()),
        ("ttfamily", fonts::get_declaration()),
        //
        ("underline", fonts::get_text()),
        ("upshape", fonts::get_declaration()),
        ("usepackage", document::get_usepackage()),
        //
        ("value", counters::get_value()),
        ("vector", picture::get_vector()),
        ("verse", text::get_quote()),
        ("vspace", lengths::get_vspace()),
    ])
}

/// Signatures of the built-in commands.
///
/// Commands missing here run in either mode and take no arguments.
pub fn all_initial_signatures() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        ("\\", "H s l?"),
        //
        ("Alph", "H i"),
        ("addtocounter", "HV i n"),
        ("addtolength", "HV m l"),
        ("alph", "H i"),
        ("arabic", "H i"),
        //
        ("bigskip", "V"),
        //
        ("center", "V"),
        ("circle", "V s f"),
        ("counterwithin", "HV s i i"),
        ("counterwithout", "HV s i i"),
        //
        ("description", "V items"),
        ("documentclass", "P csv? i"),
        //
        ("emph", "H X hg"),
        ("enumerate", "V X items"),
        //
        ("flushleft", "V"),
        ("flushright", "V"),
        ("fnsymbol", "H i"),
        ("footnote", "H n? X hg"),
        //
        ("hspace", "H s l"),
        //
        ("itemize", "V X items"),
        //
        ("label", "HV k"),
        ("line", "V c f"),
        //
        ("medskip", "V"),
        //
        ("newcounter", "HV i i?"),
        ("newlength", "HV m"),
        ("newline", "H"),
        //
        ("picture", "V c c? body"),
        ("put", "V c g"),
        //
        ("qbezier", "V n? c c c"),
        ("quotation", "V body"),
        ("quote", "V body"),
        //
        ("ref", "H k"),
        ("refstepcounter", "HV i"),
        ("Roman", "H i"),
        ("roman", "H i"),
        //
        ("setcounter", "HV i n"),
        ("setlength", "HV m l"),
        ("smallskip", "V"),
        ("stepcounter", "HV i"),
        //
        ("textbf", "H X hg"),
        ("textit", "H X hg"),
        ("textmd", "H X hg"),
        ("textnormal", "H X hg"),
        ("textrm", "H X hg"),
        ("textsc", "H X hg"),
        ("textsf", "H X hg"),
        ("textsl", "H X hg"),
        ("texttt", "H X hg"),
        ("textup", "H X hg"),
        ("the", "H m"),
        //
        ("underline", "H X hg"),
        ("usepackage", "P csv? csv"),
        //
        ("value", "H i"),
        ("vector", "V c f"),
        ("verse", "V body"),
        ("vspace", "V s l"),
    ])
}

/// Constructor of the built-in layer.
///
/// Creates the registers the built-in commands rely on.
pub fn built_ins<B: Backend>(
    interpreter: &mut Interpreter<B>,
    _: &mut Options,
) -> txl::Result<Box<dyn CommandProvider<B>>> {
    lengths::initialize(interpreter)?;
    lists::initialize(interpreter)?;
    Ok(Provider::new(all_initial_built_ins(), all_initial_signatures()).boxed())
}

/// Returns the standard library: the built-ins, the document classes and the packages.
pub fn library<B: Backend>() -> Library<B> {
    Library {
        built_ins: built_ins::<B>,
        classes: classes::all_classes(),
        packages: packages::all_packages(),
    }
}
