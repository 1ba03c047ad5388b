/// Segment classification for route patterns
///
/// Pure parsing of a single `/`-delimited part into a typed [`Segment`].
/// The only outside input is the [`NameResolver`] deciding whether a `%name`
/// part binds a loader or to-arg function.

use crate::resolver::{NameResolver, LOADER_SUFFIX, TO_ARG_SUFFIX};

/// Canonical text stored for every wildcard segment
pub const WILDCARD: &str = "%";

/// A single segment of a route pattern
///
/// # Examples
///
/// ```
/// use rmenu_router::{classify_segment, FunctionTable, Segment};
///
/// let functions = FunctionTable::new().with_function("node_load");
///
/// // Static text
/// assert_eq!(classify_segment("admin", &functions), Segment::Literal("admin".into()));
///
/// // Bare wildcard
/// assert_eq!(classify_segment("%", &functions), Segment::bare_wildcard());
///
/// // Wildcard bound to node_load
/// let seg = classify_segment("%node", &functions);
/// assert_eq!(seg.loader(), Some("node_load"));
///
/// // No user_load or user_to_arg: stays literal
/// assert_eq!(classify_segment("%user", &functions), Segment::Literal("%user".into()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Matches exactly this text (possibly empty)
    Literal(String),
    /// Matches any value at this position
    Wildcard {
        /// Loader function name (`node_load`)
        loader: Option<String>,
        /// To-arg function name (`user_to_arg`)
        to_arg: Option<String>,
    },
}

impl Segment {
    /// Wildcard without loader or to-arg binding
    pub fn bare_wildcard() -> Self {
        Segment::Wildcard {
            loader: None,
            to_arg: None,
        }
    }

    /// Whether this segment is a wildcard
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Segment::Wildcard { .. })
    }

    /// Text of this segment in a canonical path
    pub fn canonical(&self) -> &str {
        match self {
            Segment::Literal(text) => text,
            Segment::Wildcard { .. } => WILDCARD,
        }
    }

    /// Bound loader function, if any
    pub fn loader(&self) -> Option<&str> {
        match self {
            Segment::Wildcard { loader, .. } => loader.as_deref(),
            Segment::Literal(_) => None,
        }
    }

    /// Bound to-arg function, if any
    pub fn to_arg(&self) -> Option<&str> {
        match self {
            Segment::Wildcard { to_arg, .. } => to_arg.as_deref(),
            Segment::Literal(_) => None,
        }
    }
}

/// Whether `name` is usable as a function-name prefix
///
/// Letters, digits and underscores, not starting with a digit.
///
/// ```
/// use rmenu_router::is_function_name;
///
/// assert!(is_function_name("node"));
/// assert!(is_function_name("_menu_2"));
/// assert!(!is_function_name("2fa"));
/// assert!(!is_function_name("node-type"));
/// assert!(!is_function_name(""));
/// ```
pub fn is_function_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Classifies one pattern part (pure given the resolver)
///
/// # Rules (evaluated in order)
///
/// 1. `%` → bare wildcard
/// 2. `%name` with a valid function name and `name_to_arg` and/or
///    `name_load` known → wildcard bound to whichever exist
/// 3. Anything else, including `%name` with nothing bound → literal
pub fn classify_segment<R: NameResolver + ?Sized>(part: &str, resolver: &R) -> Segment {
    let Some(name) = part.strip_prefix('%') else {
        return Segment::Literal(part.to_string());
    };

    if name.is_empty() {
        return Segment::bare_wildcard();
    }

    if !is_function_name(name) {
        return Segment::Literal(part.to_string());
    }

    let to_arg = resolver
        .has_to_arg(name)
        .then(|| format!("{name}{TO_ARG_SUFFIX}"));
    let loader = resolver
        .has_loader(name)
        .then(|| format!("{name}{LOADER_SUFFIX}"));

    if loader.is_none() && to_arg.is_none() {
        Segment::Literal(part.to_string())
    } else {
        Segment::Wildcard { loader, to_arg }
    }
}
