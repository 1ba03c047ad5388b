/// Pattern parsing
///
/// Splits a declared pattern into segments and collects everything the trie
/// builder needs from it: the canonical path, positional wildcard bindings and
/// the specificity score (`fit`).

use std::collections::BTreeMap;

use super::pattern::{classify_segment, Segment};
use crate::resolver::NameResolver;

/// Default upper bound on the number of parts in a pattern
pub const DEFAULT_MAX_PARTS: usize = 9;

/// Largest part limit honored; `fit` keeps one bit per part in a `u32`
pub const MAX_PARTS_LIMIT: usize = u32::BITS as usize;

/// A parsed, immutable route pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    raw: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// Parses `raw` with the default part limit
    ///
    /// # Examples
    ///
    /// ```
    /// use rmenu_router::{FunctionTable, RoutePattern};
    ///
    /// let functions = FunctionTable::new().with_function("node_load");
    /// let pattern = RoutePattern::parse("node/%node/edit", &functions);
    ///
    /// assert_eq!(pattern.canonical_path(), "node/%/edit");
    /// assert_eq!(pattern.load_functions().get(&1).map(String::as_str), Some("node_load"));
    /// assert_eq!(pattern.fit(), 0b101);
    /// ```
    pub fn parse<R: NameResolver + ?Sized>(raw: &str, resolver: &R) -> Self {
        Self::parse_with_limit(raw, resolver, DEFAULT_MAX_PARTS)
    }

    /// Parses `raw`, folding any parts beyond `max_parts` into the last one
    ///
    /// Empty parts produced by leading, trailing or doubled slashes are kept
    /// as empty literal segments.
    pub fn parse_with_limit<R: NameResolver + ?Sized>(
        raw: &str,
        resolver: &R,
        max_parts: usize,
    ) -> Self {
        let segments = split_parts(raw, max_parts)
            .into_iter()
            .map(|part| classify_segment(part, resolver))
            .collect();

        Self {
            raw: raw.to_string(),
            segments,
        }
    }

    /// Pattern as declared
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Ordered segments
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of parts
    pub fn number_parts(&self) -> usize {
        self.segments.len()
    }

    /// Path with every wildcard replaced by `%`
    pub fn canonical_path(&self) -> String {
        self.canonical_parts().join("/")
    }

    /// Canonical text of each segment
    pub fn canonical_parts(&self) -> Vec<&str> {
        self.segments.iter().map(Segment::canonical).collect()
    }

    /// Loader functions by argument position
    pub fn load_functions(&self) -> BTreeMap<usize, String> {
        self.bindings(Segment::loader)
    }

    /// To-arg functions by argument position
    pub fn to_arg_functions(&self) -> BTreeMap<usize, String> {
        self.bindings(Segment::to_arg)
    }

    /// Specificity score: one bit per literal part, most significant first
    ///
    /// For an `n`-part pattern, literal part `k` sets bit `n - 1 - k`, so
    /// patterns with literals nearer the front outrank wildcards there.
    pub fn fit(&self) -> u32 {
        let n = self.segments.len();
        self.segments
            .iter()
            .enumerate()
            .filter(|(_, segment)| !segment.is_wildcard())
            .fold(0u32, |fit, (k, _)| fit | 1 << (n - 1 - k))
    }

    fn bindings(&self, pick: impl Fn(&Segment) -> Option<&str>) -> BTreeMap<usize, String> {
        self.segments
            .iter()
            .enumerate()
            .filter_map(|(position, segment)| pick(segment).map(|name| (position, name.to_string())))
            .collect()
    }
}

/// Splits on `/`, keeping at most `max_parts` parts
///
/// The last part keeps the unsplit remainder, mirroring a limited `split`.
/// The limit is clamped to `1..=MAX_PARTS_LIMIT`.
pub(crate) fn split_parts(raw: &str, max_parts: usize) -> Vec<&str> {
    raw.splitn(max_parts.clamp(1, MAX_PARTS_LIMIT), '/').collect()
}
