//! tacit_scanner: Tokenizer for tacit source text.
//!
//! Converts source text into a linear sequence of positioned tokens plus the
//! skipped trivia. The scanner owns interpolated-string segmentation: the
//! code between `$` delimiters is tokenized with the ordinary recognizers.

mod char_codes;
mod scanner;
mod token;

pub use scanner::{tokenize, Scanner};
pub use token::{ScanResult, Trivia, TriviaKind};
