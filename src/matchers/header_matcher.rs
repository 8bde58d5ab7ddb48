use crate::{
    common::data::{Error, StubRequest, AUTH_HEADER},
    matchers::{comparison::map_contains, Matcher},
};

pub(crate) struct HeaderMatcher;

impl Matcher for HeaderMatcher {
    fn entity_name(&self) -> &'static str {
        "headers"
    }

    /// The authorization header is validated by an authentication
    /// collaborator after a stub has been selected, so it is stripped from
    /// the pattern before the containment check. A pattern whose headers
    /// reduce to an empty map passes unconditionally.
    fn matches(&self, pattern: &StubRequest, candidate: &StubRequest) -> Result<bool, Error> {
        let mut expected = pattern.headers().clone();
        expected.remove(AUTH_HEADER);

        if expected.is_empty() {
            return Ok(true);
        }

        let candidate_headers = candidate.headers();
        Ok(!candidate_headers.is_empty() && map_contains(&expected, candidate_headers))
    }
}
