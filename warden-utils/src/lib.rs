//! Discord-facing helpers with no database or engine dependency.

pub mod embed;
pub mod formatting;
pub mod parse;
pub mod permissions;
pub mod time;

/// Prefix for message commands, also used in help and usage text.
pub const COMMAND_PREFIX: char = '!';
