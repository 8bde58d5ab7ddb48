use std::path::PathBuf;

use httpstub::{
    matches,
    persistence::{dump, parse, read_stub_requests, read_stub_requests_from_dir,
        serialize_stub_requests},
    StubRequest,
};

#[test]
fn scalars_resolve_to_strings() {
    // Arrange: values that a default YAML resolver would coerce.
    let yaml = "port: 8080\nactive: true\nratio: 0.5\n";

    // Act
    let tree = parse(yaml).unwrap();

    // Assert
    assert_eq!(tree["port"].as_str(), Some("8080"));
    assert_eq!(tree["active"].as_str(), Some("true"));
    assert_eq!(tree["ratio"].as_str(), Some("0.5"));
}

#[test]
fn parse_dump_round_trip() {
    let yaml = "request:\n  url: /status\n";

    let tree = parse(yaml).unwrap();
    let dumped = dump(&tree).unwrap();

    assert_eq!(parse(&dumped).unwrap(), tree);
}

#[test]
fn reads_a_stub_sequence() {
    // Arrange
    let yaml = r#"
- request:
    url: ^/jobs/[0-9]+$
    method: [GET, POST]
    headers:
      content-type: application/json
- request:
    url: /status
    query:
      id: 7
      verbose: true
"#;

    // Act
    let stubs = read_stub_requests(yaml).unwrap();

    // Assert
    assert_eq!(stubs.len(), 2);

    assert_eq!(stubs[0].url(), Some("^/jobs/[0-9]+$"));
    assert_eq!(stubs[0].methods(), vec!["GET", "POST"]);
    assert_eq!(
        stubs[0].headers().get("content-type"),
        Some(&"application/json".to_string())
    );

    // Unquoted scalars keep their literal text and their file order.
    assert_eq!(
        stubs[1].query(),
        &[
            ("id".to_string(), "7".to_string()),
            ("verbose".to_string(), "true".to_string()),
        ]
    );
}

#[test]
fn reads_multiple_documents() {
    let yaml = "request:\n  url: /one\n---\nrequest:\n  url: /two\n";

    let stubs = read_stub_requests(yaml).unwrap();

    assert_eq!(stubs.len(), 2);
    assert_eq!(stubs[0].url(), Some("/one"));
    assert_eq!(stubs[1].url(), Some("/two"));
}

#[test]
fn single_method_scalar_is_accepted() {
    let yaml = "request:\n  url: /submit\n  method: post\n";

    let stubs = read_stub_requests(yaml).unwrap();

    assert_eq!(stubs[0].methods(), vec!["POST"]);
}

#[test]
fn method_defaults_to_get_when_omitted() {
    let yaml = "request:\n  url: /status\n";

    let stubs = read_stub_requests(yaml).unwrap();

    assert_eq!(stubs[0].methods(), vec!["GET"]);
}

#[test]
fn post_body_is_read_verbatim() {
    let yaml = "request:\n  url: /orders\n  method: POST\n  post: '{\"total\": 3}'\n";

    let stubs = read_stub_requests(yaml).unwrap();

    assert_eq!(
        stubs[0].post_body().unwrap(),
        Some("{\"total\": 3}".to_string())
    );
}

#[test]
fn catalog_round_trip() {
    // Arrange
    let yaml = r#"
- request:
    url: /status
    method: [GET, HEAD]
    query:
      verbose: "true"
- request:
    url: /orders
    method: POST
    post: order payload
    headers:
      content-type: application/json
"#;
    let original = read_stub_requests(yaml).unwrap();

    // Act
    let serialized = serialize_stub_requests(&original).unwrap();
    let reloaded = read_stub_requests(&serialized).unwrap();

    // Assert
    assert_eq!(reloaded.len(), original.len());
    for (reloaded, original) in reloaded.iter().zip(original.iter()) {
        assert_eq!(reloaded.url(), original.url());
        assert_eq!(reloaded.methods(), original.methods());
        assert_eq!(reloaded.post(), original.post());
        assert_eq!(reloaded.headers(), original.headers());
        assert_eq!(reloaded.query(), original.query());
    }
}

#[test]
fn loads_stub_files_from_a_directory() {
    let _ = env_logger::try_init();

    // Arrange
    let resource_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/resources");

    // Act
    let stubs = read_stub_requests_from_dir(&resource_dir).unwrap();

    // Assert
    assert_eq!(stubs.len(), 2);
    assert_eq!(stubs[0].url(), Some("^/users/[0-9]+$"));
    assert_eq!(stubs[1].url(), Some("/status"));
}

#[test]
fn loaded_stubs_match_live_requests() {
    // Arrange
    let resource_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/resources");
    let catalog = read_stub_requests_from_dir(&resource_dir).unwrap();

    let mut candidate = StubRequest::new();
    candidate.set_url("/users/42");
    candidate.set_method(Some("POST".to_string()));
    candidate.set_headers(vec![(
        "Content-Type".to_string(),
        "application/json".to_string(),
    )]);

    // Act
    let matching: Vec<&StubRequest> = catalog
        .iter()
        .filter(|stub| matches(stub, &candidate).unwrap())
        .collect();

    // Assert
    assert_eq!(matching.len(), 1);
    assert_eq!(matching[0].url(), Some("^/users/[0-9]+$"));
}
