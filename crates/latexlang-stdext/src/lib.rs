//! Data structures and algorithms used in the Latexlang project
//! that are not specific to LaTeX.

pub mod algorithms {
    pub mod spellcheck;
}

pub mod collections {
    pub mod scopedmap;
}

pub mod color;
