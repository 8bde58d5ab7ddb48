use crate::common::data::{Error, StubRequest};

pub(crate) mod body_matcher;
pub(crate) mod comparison;
pub(crate) mod header_matcher;
pub(crate) mod method_matcher;
pub(crate) mod query_param_matcher;
pub(crate) mod url_matcher;

use body_matcher::BodyMatcher;
use header_matcher::HeaderMatcher;
use method_matcher::MethodMatcher;
use query_param_matcher::QueryParamMatcher;
use url_matcher::UrlMatcher;

pub(crate) trait Matcher {
    fn entity_name(&self) -> &'static str;
    fn matches(&self, pattern: &StubRequest, candidate: &StubRequest) -> Result<bool, Error>;
}

/// All matchers in evaluation order. The order only affects which check gets
/// to reject first; every check is pure, so the overall result is the same
/// for any ordering.
pub(crate) fn all() -> Vec<Box<dyn Matcher + Send + Sync>> {
    vec![
        Box::new(BodyMatcher),
        Box::new(MethodMatcher),
        Box::new(UrlMatcher),
        Box::new(HeaderMatcher),
        Box::new(QueryParamMatcher),
    ]
}

/// Tests whether `candidate` satisfies `pattern`.
///
/// The predicate is asymmetric: unset or empty fields of `pattern` act as
/// wildcards, while `candidate` fields are concrete values. Swapping the
/// arguments changes the result whenever either side carries wildcard
/// fields, so callers must keep the two roles straight.
///
/// # Errors
///
/// A pattern URL that starts with `^` but does not compile as a regular
/// expression yields [`Error::UrlPatternError`], and a binary body that is
/// not valid UTF-8 yields [`Error::BodyDecodeError`]. Both are per-pair
/// failures: a catalog-scanning caller should report the entry and move on
/// rather than abort the scan.
pub fn matches(pattern: &StubRequest, candidate: &StubRequest) -> Result<bool, Error> {
    for matcher in all() {
        if !matcher.matches(pattern, candidate)? {
            tracing::debug!(
                "request rejected by {} check: {}",
                matcher.entity_name(),
                candidate
            );
            return Ok(false);
        }
    }

    Ok(true)
}
