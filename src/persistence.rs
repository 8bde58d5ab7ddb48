use std::{convert::TryFrom, fs::read_dir, path::Path};

use serde::{Deserialize, Serialize};
use serde_yaml::{value::TaggedValue, Deserializer, Mapping, Value};
use thiserror::Error;

use crate::{
    common::{data::StubRequest, util::read_file},
    persistence::Error::{
        DataConversionError, DeserializationError, FileReadError, SerializationError,
    },
};

#[derive(Error, Debug)]
pub enum Error {
    #[error("cannot read stub file: {0}")]
    FileReadError(String),
    #[error("cannot deserialize YAML: {0}")]
    DeserializationError(String),
    #[error("cannot serialize YAML: {0}")]
    SerializationError(String),
    #[error("cannot convert stub definition: {0}")]
    DataConversionError(String),
}

/// Parses one YAML document into a generic tree in which every scalar is
/// resolved to a string. Stub definitions depend on this policy: a pattern
/// value like `8080` or `true` must keep its literal text and never arrive
/// pre-coerced to a number or boolean.
pub fn parse(yaml_content: &str) -> Result<Value, Error> {
    let value: Value =
        serde_yaml::from_str(yaml_content).map_err(|err| DeserializationError(err.to_string()))?;

    Ok(resolve_scalars_to_strings(value))
}

/// Serializes a generic tree back to YAML text.
pub fn dump(value: &Value) -> Result<String, Error> {
    serde_yaml::to_string(value).map_err(|err| SerializationError(err.to_string()))
}

/// serde_yaml has no pluggable resolver, so string-only resolution is applied
/// to the parsed tree instead: booleans and numbers are rewritten to their
/// literal rendering before any field is read out.
fn resolve_scalars_to_strings(value: Value) -> Value {
    match value {
        Value::Bool(value) => Value::String(value.to_string()),
        Value::Number(value) => Value::String(value.to_string()),
        Value::Sequence(seq) => {
            Value::Sequence(seq.into_iter().map(resolve_scalars_to_strings).collect())
        }
        Value::Mapping(mapping) => Value::Mapping(
            mapping
                .into_iter()
                .map(|(k, v)| (resolve_scalars_to_strings(k), resolve_scalars_to_strings(v)))
                .collect(),
        ),
        Value::Tagged(tagged) => {
            let TaggedValue { tag, value } = *tagged;
            Value::Tagged(Box::new(TaggedValue {
                tag,
                value: resolve_scalars_to_strings(value),
            }))
        }
        other => other,
    }
}

/// One stub catalog entry as it appears in a configuration file. Keys other
/// than `request` (e.g. a response section) belong to collaborators and are
/// ignored here.
#[derive(Debug, Serialize, Deserialize)]
pub struct StubDefinition {
    pub request: StubRequestConfig,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct StubRequestConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<MethodConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<String>,
    /// Path of a file whose bytes become the binary body payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<Mapping>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<Mapping>,
}

/// `method: GET` and `method: [GET, POST]` are both accepted.
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MethodConfig {
    Single(String),
    Many(Vec<String>),
}

impl TryFrom<StubDefinition> for StubRequest {
    type Error = Error;

    fn try_from(definition: StubDefinition) -> Result<Self, Self::Error> {
        let config = definition.request;
        let mut stub = StubRequest::new();

        if let Some(url) = config.url {
            stub.set_url(url);
        }

        match config.method {
            Some(MethodConfig::Single(method)) => stub.set_method(Some(method)),
            Some(MethodConfig::Many(methods)) => stub.set_methods(methods),
            None => {}
        }

        if let Some(post) = config.post {
            stub.set_post(post);
        }

        if let Some(path) = config.file {
            let content = read_file(&path)
                .map_err(|err| FileReadError(format!("{}: {}", path, err)))?;
            stub.set_file(content);
        }

        if let Some(headers) = config.headers {
            stub.set_headers(mapping_to_pairs(headers)?);
        }

        if let Some(query) = config.query {
            stub.set_query(mapping_to_pairs(query)?);
        }

        Ok(stub)
    }
}

impl From<&StubRequest> for StubDefinition {
    fn from(stub: &StubRequest) -> Self {
        let mut methods = stub.methods();
        let method = if methods.len() == 1 {
            methods.pop().map(MethodConfig::Single)
        } else {
            Some(MethodConfig::Many(methods))
        };

        // Header insertion order is not tracked by the entity, so headers are
        // dumped sorted to keep the output stable. The binary payload holds
        // bytes, not the path it was read from, and is not round-tripped.
        let mut header_pairs: Vec<(String, String)> = stub
            .headers()
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        header_pairs.sort();

        StubDefinition {
            request: StubRequestConfig {
                url: stub.url().map(str::to_string),
                method,
                post: stub.post().map(str::to_string),
                file: None,
                headers: if header_pairs.is_empty() {
                    None
                } else {
                    Some(pairs_to_mapping(header_pairs))
                },
                query: if stub.query().is_empty() {
                    None
                } else {
                    Some(pairs_to_mapping(stub.query().iter().cloned()))
                },
            },
        }
    }
}

/// Reads every stub definition from the given YAML text. Multiple documents
/// separated by `---` are supported; each document may hold a single
/// definition or a sequence of them.
pub fn read_stub_requests(yaml_content: &str) -> Result<Vec<StubRequest>, Error> {
    let mut stubs = Vec::new();

    for document in Deserializer::from_str(yaml_content) {
        let value =
            Value::deserialize(document).map_err(|err| DeserializationError(err.to_string()))?;
        let value = resolve_scalars_to_strings(value);

        let definitions: Vec<StubDefinition> = match value {
            Value::Null => Vec::new(),
            Value::Sequence(_) => serde_yaml::from_value(value)
                .map_err(|err| DeserializationError(err.to_string()))?,
            single => vec![serde_yaml::from_value(single)
                .map_err(|err| DeserializationError(err.to_string()))?],
        };

        for definition in definitions {
            stubs.push(StubRequest::try_from(definition)?);
        }
    }

    Ok(stubs)
}

/// Reads stub definitions from every `.yaml`/`.yml` file in a directory.
pub fn read_stub_requests_from_dir<P: AsRef<Path>>(path: P) -> Result<Vec<StubRequest>, Error> {
    let mut stubs = Vec::new();

    let entries = read_dir(path).map_err(|err| FileReadError(err.to_string()))?;
    for entry in entries {
        let file_path = entry.map_err(|err| FileReadError(err.to_string()))?.path();
        match file_path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => {}
            _ => continue,
        }

        tracing::info!("loading stub file from '{}'", file_path.to_string_lossy());

        let content = read_file(&file_path).map_err(|err| FileReadError(err.to_string()))?;
        let content = String::from_utf8(content).map_err(|err| FileReadError(err.to_string()))?;

        stubs.extend(read_stub_requests(&content)?);
    }

    Ok(stubs)
}

/// Dumps a stub catalog back to multi-document YAML text.
pub fn serialize_stub_requests(stubs: &[StubRequest]) -> Result<String, Error> {
    let mut buffer = String::new();

    for (idx, stub) in stubs.iter().enumerate() {
        if idx > 0 {
            buffer.push_str("---\n");
        }

        let definition = StubDefinition::from(stub);
        let yaml = serde_yaml::to_string(&definition)
            .map_err(|err| SerializationError(err.to_string()))?;
        buffer.push_str(&yaml);
    }

    Ok(buffer)
}

fn pairs_to_mapping<I>(pairs: I) -> Mapping
where
    I: IntoIterator<Item = (String, String)>,
{
    pairs
        .into_iter()
        .map(|(name, value)| (Value::String(name), Value::String(value)))
        .collect()
}

fn mapping_to_pairs(mapping: Mapping) -> Result<Vec<(String, String)>, Error> {
    mapping
        .into_iter()
        .map(|(name, value)| match (name, value) {
            (Value::String(name), Value::String(value)) => Ok((name, value)),
            (name, _) => Err(DataConversionError(format!(
                "expected a string-to-string mapping, got key {:?}",
                name
            ))),
        })
        .collect()
}
