use std::fmt;
use std::str::FromStr;

use crate::record::Record;

/// Error type for decoding or encoding a collection file.
#[derive(Debug)]
pub enum CodecError {
    Json(serde_json::Error),
    Yaml(serde_yaml::Error),
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::Json(e) => write!(f, "json: {}", e),
            CodecError::Yaml(e) => write!(f, "yaml: {}", e),
        }
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CodecError::Json(e) => Some(e),
            CodecError::Yaml(e) => Some(e),
        }
    }
}

impl From<serde_json::Error> for CodecError {
    fn from(err: serde_json::Error) -> Self {
        CodecError::Json(err)
    }
}

impl From<serde_yaml::Error> for CodecError {
    fn from(err: serde_yaml::Error) -> Self {
        CodecError::Yaml(err)
    }
}

/// On-disk representation of a collection.
///
/// A file holds one ordered sequence of records. Implementations must treat
/// an empty (or whitespace-only) file as an empty collection.
pub trait Codec: Send + Sync {
    /// File extension, without the dot.
    fn extension(&self) -> &'static str;

    fn decode(&self, bytes: &[u8]) -> Result<Vec<Record>, CodecError>;

    fn encode(&self, records: &[Record]) -> Result<Vec<u8>, CodecError>;
}

fn is_blank(bytes: &[u8]) -> bool {
    bytes.iter().all(u8::is_ascii_whitespace)
}

/// YAML files (`.yml`), a sequence of mappings.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlCodec;

impl Codec for YamlCodec {
    fn extension(&self) -> &'static str {
        "yml"
    }

    fn decode(&self, bytes: &[u8]) -> Result<Vec<Record>, CodecError> {
        if is_blank(bytes) {
            return Ok(Vec::new());
        }
        let records: Option<Vec<Record>> = serde_yaml::from_slice(bytes)?;
        Ok(records.unwrap_or_default())
    }

    fn encode(&self, records: &[Record]) -> Result<Vec<u8>, CodecError> {
        Ok(serde_yaml::to_string(records)?.into_bytes())
    }
}

/// JSON files (`.json`), an array of objects written pretty-printed.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn decode(&self, bytes: &[u8]) -> Result<Vec<Record>, CodecError> {
        if is_blank(bytes) {
            return Ok(Vec::new());
        }
        let records: Option<Vec<Record>> = serde_json::from_slice(bytes)?;
        Ok(records.unwrap_or_default())
    }

    fn encode(&self, records: &[Record]) -> Result<Vec<u8>, CodecError> {
        let mut bytes = serde_json::to_vec_pretty(records)?;
        bytes.push(b'\n');
        Ok(bytes)
    }
}

/// Selectable on-disk format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Format {
    #[default]
    Yaml,
    Json,
}

impl Format {
    pub fn codec(self) -> Box<dyn Codec> {
        match self {
            Format::Yaml => Box::new(YamlCodec),
            Format::Json => Box::new(JsonCodec),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Yaml => write!(f, "yaml"),
            Format::Json => write!(f, "json"),
        }
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Ok(Format::Yaml),
            "json" => Ok(Format::Json),
            other => Err(format!("unknown format: {} (expected yaml or json)", other)),
        }
    }
}
