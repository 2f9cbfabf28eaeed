// Command line surface
pub mod args;
pub mod literal;

pub use args::CliArgs;
pub use literal::{date_filter, key_filter, parse_literal, Literal, LiteralError};
