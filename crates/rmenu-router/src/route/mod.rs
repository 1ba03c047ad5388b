/// Route pattern module
///
/// Pure components turning declared pattern strings into typed segments:
/// - `pattern` classifies a single part
/// - `parser` splits a whole pattern and derives canonical path, bindings and fit

pub mod parser;
pub mod pattern;

// Re-export commonly used types
pub use parser::{RoutePattern, DEFAULT_MAX_PARTS, MAX_PARTS_LIMIT};
pub use pattern::{classify_segment, is_function_name, Segment, WILDCARD};
