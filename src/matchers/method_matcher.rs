use crate::{
    common::data::{Error, StubRequest},
    matchers::{comparison::arrays_intersect, Matcher},
};

pub(crate) struct MethodMatcher;

impl Matcher for MethodMatcher {
    fn entity_name(&self) -> &'static str {
        "method"
    }

    fn matches(&self, pattern: &StubRequest, candidate: &StubRequest) -> Result<bool, Error> {
        // Both sides are upper-cased by the accessor, so plain membership
        // intersection is sufficient here.
        Ok(arrays_intersect(&pattern.methods(), &candidate.methods()))
    }
}
