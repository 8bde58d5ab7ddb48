use regex::Regex;

use crate::{
    common::data::{Error, Error::UrlPatternError, StubRequest},
    matchers::{comparison::strings_match, Matcher},
};

const REGEX_START: char = '^';

pub(crate) struct UrlMatcher;

impl UrlMatcher {
    /// Compiles the pattern URL and requires a full-string match, the way
    /// Java's `Matcher.matches()` behaves. `regex` searches for substrings,
    /// so the pattern is wrapped in `\A(?:...)\z` anchors before compilation.
    fn regex_match(&self, pattern_url: &str, asserting_url: &str) -> Result<bool, Error> {
        let regex = Regex::new(&format!(r"\A(?:{})\z", pattern_url))
            .map_err(|err| UrlPatternError(err.to_string()))?;

        Ok(regex.is_match(asserting_url))
    }
}

impl Matcher for UrlMatcher {
    fn entity_name(&self) -> &'static str {
        "url"
    }

    /// A pattern URL starting with `^` is matched as a regular expression
    /// against the candidate's effective URL, query string included. Any
    /// other pattern URL is compared literally against the candidate's raw
    /// URL, query string ignored. The asymmetry is a documented contract of
    /// the matching behavior, not an accident of this implementation.
    fn matches(&self, pattern: &StubRequest, candidate: &StubRequest) -> Result<bool, Error> {
        match pattern.url() {
            Some(url) if url.starts_with(REGEX_START) => {
                self.regex_match(url, &candidate.effective_url())
            }
            url => Ok(strings_match(url, candidate.url())),
        }
    }
}
