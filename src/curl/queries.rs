//! Query parameter resolution
//!
//! Splits decoded pairs into structured params and dangling leftovers that
//! must stay literally embedded in the endpoint string.

use crate::request::QueryParam;

/// Decoded query pair; the value is `None` when the segment had no `=`
pub type QueryPair = (String, Option<String>);

/// Structured params plus the pairs left for the endpoint string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedQueries {
    pub queries: Vec<QueryParam>,
    pub dangling: Vec<QueryPair>,
}

impl ResolvedQueries {
    /// Append another resolution after this one
    pub fn extend(&mut self, other: ResolvedQueries) {
        self.queries.extend(other.queries);
        self.dangling.extend(other.dangling);
    }
}

/// Resolve pairs into structured params and dangling leftovers
///
/// A pair without a value, or with an empty key, has no lossless
/// `key=value` form and is left dangling.
pub fn get_queries<'a, I>(pairs: I) -> ResolvedQueries
where
    I: IntoIterator<Item = &'a QueryPair>,
{
    let mut resolved = ResolvedQueries::default();

    for (key, value) in pairs {
        match value {
            Some(value) if !key.is_empty() => {
                resolved.queries.push(QueryParam::new(key.clone(), value.clone()));
            }
            _ => resolved.dangling.push((key.clone(), value.clone())),
        }
    }

    resolved
}
