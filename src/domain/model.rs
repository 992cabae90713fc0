use crate::domain::language::Language;
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// One fact in one language, as written to the output document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactRecord {
    pub fact_id: u64,
    pub language: String,
    pub fact: String,
    #[serde(with = "utc_offset_timestamp")]
    pub retrieved_at_utc: DateTime<Utc>,
}

impl FactRecord {
    /// Stamps the record with the current time. Sub-microsecond precision is
    /// dropped so the persisted timestamp parses back to the same value.
    pub fn new(fact_id: u64, language: Language, fact: String) -> Self {
        Self::retrieved_at(fact_id, language, fact, Utc::now())
    }

    pub fn retrieved_at(
        fact_id: u64,
        language: Language,
        fact: String,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            fact_id,
            language: language.name().to_string(),
            fact,
            retrieved_at_utc: at.trunc_subsecs(6),
        }
    }
}

/// Result of a single fetch attempt during bulk extraction.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    Fetched(FactRecord),
    Skipped {
        fact_id: u64,
        language: Language,
        reason: String,
    },
}

impl FetchOutcome {
    pub fn record(&self) -> Option<&FactRecord> {
        match self {
            FetchOutcome::Fetched(record) => Some(record),
            FetchOutcome::Skipped { .. } => None,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, FetchOutcome::Skipped { .. })
    }
}

/// ISO-8601 with an explicit `+00:00` offset and microsecond precision,
/// e.g. `2024-05-01T12:00:00.123456+00:00`.
mod utc_offset_timestamp {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f+00:00";

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&value.format(FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
