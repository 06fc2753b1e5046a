//! Provenance stamps attached to every merged record.
//!
//! A merge run takes one [`RunTimestamp`] when it starts. Every record written
//! by that run carries the same timestamp, so all records of one merged file
//! can be traced back to a single run.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Start time of a merge run (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RunTimestamp(DateTime<Utc>);

impl RunTimestamp {
    /// Timestamp for a run starting now
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Timestamp for a run starting at `at`
    pub fn at(at: DateTime<Utc>) -> Self {
        Self(at)
    }

    /// The underlying UTC time
    pub fn datetime(&self) -> DateTime<Utc> {
        self.0
    }

    /// Value written to the `MERGE_TIMESTAMP` field.
    ///
    /// RFC 3339 in UTC with millisecond precision (`2024-01-15T10:30:00.000Z`),
    /// which sorts lexically in time order.
    pub fn field_value(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// Rendering safe for file names: `2024-01-15-10-30-00`.
    pub fn file_safe(&self) -> String {
        self.0.format("%Y-%m-%d-%H-%M-%S").to_string()
    }
}

impl From<DateTime<Utc>> for RunTimestamp {
    fn from(at: DateTime<Utc>) -> Self {
        Self(at)
    }
}

/// Provenance attached to a record: where it came from and which run merged it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvenanceStamp {
    source_file: String,
    merge_timestamp: String,
}

impl ProvenanceStamp {
    /// Stamp for records of `source_file` merged by the run started at `run`
    pub fn new(source_file: impl Into<String>, run: &RunTimestamp) -> Self {
        Self {
            source_file: source_file.into(),
            merge_timestamp: run.field_value(),
        }
    }

    /// Same run, different source file
    pub fn for_source(&self, source_file: impl Into<String>) -> Self {
        Self {
            source_file: source_file.into(),
            merge_timestamp: self.merge_timestamp.clone(),
        }
    }

    /// Source file name
    pub fn source_file(&self) -> &str {
        &self.source_file
    }

    /// Rendered merge timestamp
    pub fn merge_timestamp(&self) -> &str {
        &self.merge_timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed() -> RunTimestamp {
        RunTimestamp::at(Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 5).unwrap())
    }

    #[test]
    fn test_field_value_is_rfc3339_millis() {
        assert_eq!(fixed().field_value(), "2024-01-15T10:30:05.000Z");
    }

    #[test]
    fn test_file_safe_has_no_colons() {
        let rendered = fixed().file_safe();
        assert_eq!(rendered, "2024-01-15-10-30-05");
        assert!(!rendered.contains(':'));
        assert!(!rendered.contains('T'));
    }

    #[test]
    fn test_for_source_keeps_timestamp() {
        let stamp = ProvenanceStamp::new("a.sdf", &fixed());
        let other = stamp.for_source("b.sdf");
        assert_eq!(other.source_file(), "b.sdf");
        assert_eq!(other.merge_timestamp(), stamp.merge_timestamp());
    }
}
