use serde::{Deserialize, Serialize};
use std::fmt;

/// Deserialize a Steam id from either a JSON number or a string
fn deserialize_steam_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum SteamIdValue {
        Int(u64),
        String(String),
    }

    match SteamIdValue::deserialize(deserializer)? {
        SteamIdValue::Int(i) => Ok(i.to_string()),
        SteamIdValue::String(s) => Ok(s),
    }
}

/// Compression algorithms measured by CompactGUI, in `CompType` order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CompressionAlgorithm {
    Xpress4k,
    Xpress8k,
    Xpress16k,
    Lzx,
}

impl CompressionAlgorithm {
    /// All algorithms in display (and `CompType`) order
    pub const ALL: [CompressionAlgorithm; 4] = [
        CompressionAlgorithm::Xpress4k,
        CompressionAlgorithm::Xpress8k,
        CompressionAlgorithm::Xpress16k,
        CompressionAlgorithm::Lzx,
    ];

    /// Map a wire `CompType` code to an algorithm
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    /// Wire `CompType` code
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Position in an enum-indexed lookup table
    pub fn index(self) -> usize {
        self as usize
    }

    /// Human label used in rendered tables
    pub fn label(self) -> &'static str {
        match self {
            CompressionAlgorithm::Xpress4k => "XPRESS 4K",
            CompressionAlgorithm::Xpress8k => "XPRESS 8K",
            CompressionAlgorithm::Xpress16k => "XPRESS 16K",
            CompressionAlgorithm::Lzx => "LZX",
        }
    }

    /// Prefix used in sort keys (`xpress4k_size_asc`, ...)
    pub fn slug(self) -> &'static str {
        match self {
            CompressionAlgorithm::Xpress4k => "xpress4k",
            CompressionAlgorithm::Xpress8k => "xpress8k",
            CompressionAlgorithm::Xpress16k => "xpress16k",
            CompressionAlgorithm::Lzx => "lzx",
        }
    }
}

impl fmt::Display for CompressionAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One measured compression outcome
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompressionResult {
    /// Algorithm code (0..=3)
    #[serde(rename = "CompType")]
    pub comp_type: u8,

    /// Size before compression, in bytes
    #[serde(rename = "BeforeBytes", default)]
    pub before_bytes: u64,

    /// Size after compression, in bytes
    #[serde(rename = "AfterBytes", default)]
    pub after_bytes: u64,
}

impl CompressionResult {
    pub fn new(algorithm: CompressionAlgorithm, before_bytes: u64, after_bytes: u64) -> Self {
        Self {
            comp_type: algorithm.code(),
            before_bytes,
            after_bytes,
        }
    }

    /// Algorithm for this result, `None` for codes outside the known set
    pub fn algorithm(&self) -> Option<CompressionAlgorithm> {
        CompressionAlgorithm::from_code(self.comp_type)
    }
}

/// A game entry exactly as it appears in the database JSON
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawGameRecord {
    /// Steam application id
    #[serde(rename = "SteamID", deserialize_with = "deserialize_steam_id")]
    pub steam_id: String,

    /// Display name
    #[serde(rename = "GameName", default)]
    pub game_name: String,

    /// Measured compression results
    #[serde(rename = "CompressionResults", default)]
    pub compression_results: Vec<CompressionResult>,
}

impl RawGameRecord {
    /// Create a record with no results
    pub fn new(steam_id: impl Into<String>, game_name: impl Into<String>) -> Self {
        Self {
            steam_id: steam_id.into(),
            game_name: game_name.into(),
            compression_results: Vec::new(),
        }
    }

    /// Builder-style helper for attaching a result
    pub fn with_result(mut self, algorithm: CompressionAlgorithm, before: u64, after: u64) -> Self {
        self.compression_results
            .push(CompressionResult::new(algorithm, before, after));
        self
    }
}

/// Parse a full database document
pub fn parse_dataset(json: &str) -> serde_json::Result<Vec<RawGameRecord>> {
    serde_json::from_str(json)
}
