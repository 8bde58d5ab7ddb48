//! `httpstub` is the request-matching core of an HTTP stub server. Given a
//! catalog of stored stub definitions (URL pattern, method set, headers,
//! query parameters, body) and an incoming request, it answers one question:
//! does this request satisfy that definition?
//!
//! It contains two major components:
//!
//! * a **request entity** ([`StubRequest`]) that represents either a stored
//!   stub pattern or an incoming request under assertion, and
//! * a **matching engine** ([`matches`]) that compares a pattern against a
//!   candidate with wildcard-by-absence semantics.
//!
//! The comparison is deliberately asymmetric. An unset or empty field on the
//! pattern side matches anything, while candidate fields are always concrete:
//!
//! ```rust
//! use httpstub::{matches, StubRequest};
//!
//! let mut pattern = StubRequest::new();
//! pattern.set_url("^/users/[0-9]+$");
//! pattern.set_methods(vec!["GET".to_string(), "POST".to_string()]);
//!
//! let mut candidate = StubRequest::new();
//! candidate.set_url("/users/42");
//! candidate.set_method(Some("get".to_string()));
//!
//! assert!(matches(&pattern, &candidate).unwrap());
//! ```
//!
//! A pattern URL starting with `^` is compiled as a regular expression at
//! matching time and must match the candidate's full URL including the query
//! string; any other pattern URL is compared literally, ignoring the query.
//! Header and query matching are containment checks: every pattern entry must
//! be present in the candidate with the exact value, extra candidate entries
//! are ignored. The `authorization` header is exempt from header matching and
//! left to an authentication collaborator.
//!
//! Stub catalogs are typically loaded from YAML files through the
//! [`persistence`] module, which resolves every scalar to a string so pattern
//! fields keep their literal text:
//!
//! ```yaml
//! - request:
//!     url: ^/jobs/[0-9]+$
//!     method: [GET, POST]
//!     query:
//!       verbose: "true"
//! ```
//!
//! Candidates are built from live transport requests with
//! [`StubRequest::from_live_request`].
//!
//! This crate does not decide which stub wins when several match, does not
//! perform transport I/O and holds no mutable state: entities are immutable
//! once constructed, and matching the same catalog from many threads is safe.
//!
//! # Debugging
//!
//! `httpstub` logs rejected checks against the `tracing` crate at debug
//! level. With the `log` bridge, an `env_logger`-based test setup can enable
//! them by setting `RUST_LOG=debug`.

mod common;
mod matchers;
pub mod persistence;

pub use common::data::{
    Error, PostBodyExtractor, RawBodyExtractor, StubRequest, AUTH_HEADER, POST_BODY_FIELD_NAME,
};
pub use matchers::matches;
