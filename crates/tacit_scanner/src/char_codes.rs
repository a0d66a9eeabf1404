//! Character codes the scanner dispatches on.

pub const DOUBLE_QUOTE: u8 = b'"';
pub const DOLLAR_SIGN: u8 = b'$';
pub const BACKSLASH: u8 = b'\\';
