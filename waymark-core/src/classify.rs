// Tally failed probes by error message and by status code

use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use waymark_scanner::ProbeResult;

pub const UNKNOWN: &str = "Unknown";

/// Status code bucket. Failures without a response land in `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StatusKey {
    Code(u16),
    Unknown,
}

impl From<Option<u16>> for StatusKey {
    fn from(code: Option<u16>) -> Self {
        code.map(StatusKey::Code).unwrap_or(StatusKey::Unknown)
    }
}

impl fmt::Display for StatusKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusKey::Code(code) => write!(f, "{}", code),
            StatusKey::Unknown => f.write_str(UNKNOWN),
        }
    }
}

// JSON object keys must be strings
impl Serialize for StatusKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for StatusKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw == UNKNOWN {
            return Ok(StatusKey::Unknown);
        }
        raw.parse::<u16>()
            .map(StatusKey::Code)
            .map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ErrorAnalysis {
    pub error_types: BTreeMap<String, usize>,
    pub status_codes: BTreeMap<StatusKey, usize>,
    pub total_failures: usize,
}

impl ErrorAnalysis {
    pub fn count_for_status(&self, code: u16) -> usize {
        self.status_codes
            .get(&StatusKey::Code(code))
            .copied()
            .unwrap_or(0)
    }
}

pub fn classify(failed: &[ProbeResult]) -> ErrorAnalysis {
    let mut analysis = ErrorAnalysis {
        total_failures: failed.len(),
        ..ErrorAnalysis::default()
    };

    for result in failed {
        let error = result.error.clone().unwrap_or_else(|| UNKNOWN.to_string());
        *analysis.error_types.entry(error).or_insert(0) += 1;
        *analysis
            .status_codes
            .entry(StatusKey::from(result.status_code))
            .or_insert(0) += 1;
    }

    analysis
}
