//! tacit_core: Core utilities for the tacit compiler front end.
//!
//! Provides the text position types shared by the scanner, parser and
//! diagnostics.

pub mod text;

pub use text::{LineAndColumn, TextPos, TextRange, TextSpan};
