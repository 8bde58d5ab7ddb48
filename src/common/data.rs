use crate::common::util::enforce_system_line_separator;
use bytes::Bytes;
use std::{collections::HashMap, fmt};

use crate::common::data::Error::{BodyDecodeError, RequestConversionError};

/// Name of the header that is excluded from generic header matching. Requests
/// carrying it are expected to be validated by an authentication collaborator
/// after a stub has been selected, not by the matching engine itself.
pub const AUTH_HEADER: &str = "authorization";

/// Name of the multipart form field a body extractor should read the stubbed
/// request body from when an admin frontend submits stubs as form data.
pub const POST_BODY_FIELD_NAME: &str = "stubs";

const DEFAULT_METHOD: &str = "GET";

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("cannot compile URL pattern: {0}")]
    UrlPatternError(String),
    #[error("cannot decode body as UTF-8: {0}")]
    BodyDecodeError(String),
    #[error("cannot convert request to internal structure: {0}")]
    RequestConversionError(String),
}

/// A general abstraction of an HTTP request of `httpstub`.
///
/// One structure serves two roles: a **pattern** (a stored stub definition,
/// where an unset or empty field matches anything) and a **candidate** (an
/// incoming request being asserted against patterns). The role is determined
/// only by the argument position a value is given in
/// [`matches`](crate::matches); there is no equality operation on this type.
///
/// Instances are populated through setters at construction time and are not
/// mutated once matching begins.
#[derive(Debug, Clone)]
pub struct StubRequest {
    url: Option<String>,
    method: Vec<String>,
    post: Option<String>,
    file: Option<Bytes>,
    headers: HashMap<String, String>,
    query: Vec<(String, String)>,
}

impl StubRequest {
    /// Creates an empty request entity. The method set starts out as
    /// `["GET"]`; all other fields are unset.
    pub fn new() -> Self {
        Self {
            url: None,
            method: vec![DEFAULT_METHOD.to_string()],
            post: None,
            file: None,
            headers: HashMap::new(),
            query: Vec::new(),
        }
    }

    /// Stores the URL verbatim. A value starting with `^` is treated as a
    /// regular expression by the matching engine. No regex validation happens
    /// here; a malformed pattern only surfaces when it is compiled at
    /// matching time.
    pub fn set_url<S: Into<String>>(&mut self, url: S) {
        self.url = Some(url.into());
    }

    /// Returns the raw URL field, without the query string.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Returns the URL including the canonical query string, or the raw URL
    /// alone if no query parameters are present. Query pairs are serialized
    /// in insertion order.
    pub fn effective_url(&self) -> String {
        let url = self.url.clone().unwrap_or_default();
        match self.query_string() {
            Some(query_string) => format!("{}?{}", url, query_string),
            None => url,
        }
    }

    /// Replaces the method set with a single entry, substituting `GET` when
    /// the given value is unset or empty. Multi-method stubs are populated
    /// through [`StubRequest::set_methods`] instead.
    pub fn set_method(&mut self, method: Option<String>) {
        let method = match method {
            Some(m) if !m.is_empty() => m,
            _ => DEFAULT_METHOD.to_string(),
        };
        self.method = vec![method];
    }

    /// Replaces the method set with the given sequence, stored verbatim. An
    /// empty sequence acts as a method wildcard during matching.
    pub fn set_methods(&mut self, methods: Vec<String>) {
        self.method = methods;
    }

    /// Returns all methods upper-cased. Stored casing is left untouched.
    pub fn methods(&self) -> Vec<String> {
        self.method.iter().map(|m| m.to_uppercase()).collect()
    }

    /// Stores the raw text payload.
    pub fn set_post<S: Into<String>>(&mut self, post: S) {
        self.post = Some(post.into());
    }

    /// Returns the raw text payload as stored, without any normalization.
    pub fn post(&self) -> Option<&str> {
        self.post.as_deref()
    }

    /// Stores a binary payload. When present it takes precedence over the
    /// text payload for body retrieval.
    pub fn set_file<B: Into<Bytes>>(&mut self, file: B) {
        self.file = Some(file.into());
    }

    pub fn file(&self) -> Option<&Bytes> {
        self.file.as_ref()
    }

    /// Returns the request body used for matching: the binary payload decoded
    /// as UTF-8 if one is present, the text payload otherwise. Line breaks
    /// are rewritten to the platform line separator on every read.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BodyDecodeError`] if the binary payload is not valid
    /// UTF-8.
    pub fn post_body(&self) -> Result<Option<String>, Error> {
        if let Some(file) = &self.file {
            let content =
                std::str::from_utf8(file).map_err(|err| BodyDecodeError(err.to_string()))?;
            return Ok(Some(enforce_system_line_separator(content)));
        }

        Ok(self
            .post
            .as_deref()
            .map(enforce_system_line_separator))
    }

    /// Merges the given headers into the entity, lower-casing every key.
    /// Existing entries with other keys are kept; the header map is
    /// case-insensitive by construction, not by comparison logic.
    pub fn set_headers<I>(&mut self, headers: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (name, value) in headers {
            self.headers.insert(name.to_lowercase(), value);
        }
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Replaces the query parameters. Insertion order is preserved and
    /// determines the canonical query string ordering.
    pub fn set_query<I>(&mut self, query: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.query = query.into_iter().collect();
    }

    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    /// Serializes the query parameters in insertion order, or `None` if there
    /// are none.
    pub fn query_string(&self) -> Option<String> {
        if self.query.is_empty() {
            return None;
        }

        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (name, value) in &self.query {
            serializer.append_pair(name, value);
        }

        Some(serializer.finish())
    }

    /// Builds a candidate-role entity from a live request.
    ///
    /// The method is taken as given by the transport, the URL is the path
    /// portion only, headers are stored with lower-cased keys and the query
    /// is parsed from the raw query string into the ordered parameter list.
    /// A request without headers or without a query string is legitimate
    /// empty state, not an error. The body is read through the given
    /// extractor, keyed by [`POST_BODY_FIELD_NAME`].
    pub fn from_live_request<E>(
        request: &http::Request<Bytes>,
        body_extractor: &E,
    ) -> Result<StubRequest, Error>
    where
        E: PostBodyExtractor + ?Sized,
    {
        let mut assertion = StubRequest::new();

        assertion.set_method(Some(request.method().as_str().to_string()));
        assertion.set_url(request.uri().path());

        if let Some(body) = body_extractor.extract(request, POST_BODY_FIELD_NAME)? {
            assertion.set_post(body);
        }

        assertion.set_headers(http_headers_to_vec(request)?);

        if let Some(raw_query) = request.uri().query() {
            assertion.set_query(form_urlencoded::parse(raw_query.as_bytes()).into_owned());
        }

        Ok(assertion)
    }
}

impl Default for StubRequest {
    fn default() -> Self {
        StubRequest::new()
    }
}

impl fmt::Display for StubRequest {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "StubRequest{{url={}, method={:?}",
            self.url.as_deref().unwrap_or(""),
            self.method
        )?;

        if let Some(post) = &self.post {
            write!(f, ", post={}", post)?;
        }

        write!(f, ", query={:?}, headers={:?}}}", self.query, self.headers)
    }
}

/// Extracts the stubbed request body from a live request. The transport layer
/// decides where the body actually comes from; an admin frontend posting
/// stubs as form data reads the field named by the `field_name` argument,
/// while plain stubbing reads the raw request body.
pub trait PostBodyExtractor {
    fn extract(
        &self,
        request: &http::Request<Bytes>,
        field_name: &str,
    ) -> Result<Option<String>, Error>;
}

/// A [`PostBodyExtractor`] that reads the raw request body as UTF-8 text. An
/// empty body yields `None`.
pub struct RawBodyExtractor;

impl PostBodyExtractor for RawBodyExtractor {
    fn extract(
        &self,
        request: &http::Request<Bytes>,
        _field_name: &str,
    ) -> Result<Option<String>, Error> {
        let body = request.body();
        if body.is_empty() {
            return Ok(None);
        }

        let content =
            std::str::from_utf8(body).map_err(|err| BodyDecodeError(err.to_string()))?;
        Ok(Some(content.to_string()))
    }
}

fn http_headers_to_vec(request: &http::Request<Bytes>) -> Result<Vec<(String, String)>, Error> {
    request
        .headers()
        .iter()
        .map(|(name, value)| {
            let value_str = value
                .to_str()
                .map_err(|err| RequestConversionError(err.to_string()))?;
            Ok((name.as_str().to_string(), value_str.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod test {
    use crate::common::data::StubRequest;

    #[test]
    fn methods_are_uppercased_on_read() {
        let mut request = StubRequest::new();
        request.set_methods(vec!["get".to_string(), "Post".to_string()]);

        assert_eq!(request.methods(), vec!["GET", "POST"]);
    }

    #[test]
    fn effective_url_without_query() {
        let mut request = StubRequest::new();
        request.set_url("/items");

        assert_eq!(request.effective_url(), "/items");
    }

    #[test]
    fn effective_url_with_query() {
        let mut request = StubRequest::new();
        request.set_url("/items");
        request.set_query(vec![
            ("page".to_string(), "2".to_string()),
            ("limit".to_string(), "50".to_string()),
        ]);

        assert_eq!(request.effective_url(), "/items?page=2&limit=50");
    }
}
