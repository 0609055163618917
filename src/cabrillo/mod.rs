//! Cabrillo log parsing.

/// Header table and tag policies.
pub mod headers;
/// Contest exchange layouts.
pub mod layout;
/// QSO line field mapping.
pub mod mapper;
/// Document assembly and entry points.
pub mod parser;
/// Tagged-line scanner.
pub mod scanner;

pub use parser::{CabrilloParser, ParseOptions, cabrillo_to_qson};
