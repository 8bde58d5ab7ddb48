use crate::{
    common::data::{Error, StubRequest},
    matchers::{comparison::pairs_contain, Matcher},
};

pub(crate) struct QueryParamMatcher;

impl Matcher for QueryParamMatcher {
    fn entity_name(&self) -> &'static str {
        "query parameters"
    }

    fn matches(&self, pattern: &StubRequest, candidate: &StubRequest) -> Result<bool, Error> {
        let expected = pattern.query();
        if expected.is_empty() {
            return Ok(true);
        }

        let candidate_query = candidate.query();
        Ok(!candidate_query.is_empty() && pairs_contain(expected, candidate_query))
    }
}
