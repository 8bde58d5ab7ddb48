use crate::{
    common::data::{Error, StubRequest},
    matchers::{comparison::strings_match, Matcher},
};

pub(crate) struct BodyMatcher;

impl Matcher for BodyMatcher {
    fn entity_name(&self) -> &'static str {
        "body"
    }

    fn matches(&self, pattern: &StubRequest, candidate: &StubRequest) -> Result<bool, Error> {
        let pattern_body = pattern.post_body()?;
        let candidate_body = candidate.post_body()?;

        Ok(strings_match(
            pattern_body.as_deref(),
            candidate_body.as_deref(),
        ))
    }
}
