//! Canonical record identifiers and timestamp-ordered audit identifiers.

use crate::{UuidError, UuidResult};
use chrono::{DateTime, Duration, NaiveDateTime, SubsecRound, Utc};
use std::path::{Path, PathBuf};
use std::{fmt, str::FromStr};

/// Re-exported for convenience.
pub use ::uuid::Uuid;

/// Canonical record identifier (32 lowercase hex characters, no hyphens).
///
/// Once constructed, the contained UUID is guaranteed to be in canonical form, so callers can
/// derive storage paths from it without further checks.
///
/// # Construction
/// - [`ShardableUuid::new`] generates a fresh identifier for a new triage record.
/// - [`ShardableUuid::parse`] validates an externally supplied identifier (API path, CLI arg).
///
/// # Display format
/// Always the canonical 32-character lowercase hex form.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ShardableUuid(Uuid);

impl Default for ShardableUuid {
    fn default() -> Self {
        Self::new()
    }
}

impl ShardableUuid {
    /// Generates a new random (v4) identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Validates and parses an identifier that must already be canonical.
    ///
    /// Hyphenated or uppercase forms are **not** normalised; they are rejected so that one
    /// record can never be addressed through two different strings.
    ///
    /// # Errors
    ///
    /// Returns [`UuidError::InvalidInput`] if `input` is not in canonical form.
    pub fn parse(input: &str) -> UuidResult<Self> {
        if !Self::is_canonical(input) {
            return Err(UuidError::InvalidInput(format!(
                "UUID must be 32 lowercase hex characters without hyphens, got: '{}'",
                input
            )));
        }
        Uuid::parse_str(input)
            .map(Self)
            .map_err(|e| UuidError::InvalidInput(e.to_string()))
    }

    /// Returns the underlying `uuid::Uuid`.
    pub fn uuid(&self) -> Uuid {
        self.0
    }

    /// Returns true if `input` is exactly 32 lowercase hex characters.
    pub(crate) fn is_canonical(input: &str) -> bool {
        input.len() == 32
            && input
                .bytes()
                .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
    }

    /// Returns `parent_dir/<s1>/<s2>/<uuid>/` where `s1`/`s2` are the first four hex characters.
    pub fn sharded_dir(&self, parent_dir: &Path) -> PathBuf {
        let canonical = self.0.simple().to_string();
        let s1 = &canonical[0..2];
        let s2 = &canonical[2..4];
        parent_dir.join(s1).join(s2).join(&canonical)
    }
}

impl fmt::Display for ShardableUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

impl FromStr for ShardableUuid {
    type Err = UuidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShardableUuid::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ShardableUuid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ShardableUuid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ShardableUuid::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// A time-prefixed identifier for audit entries.
///
/// Format: `YYYYMMDDTHHMMSS.mmmZ-<canonical_uuid>`
///
/// Example: `20260111T143522.045Z-550e8400e29b41d4a716446655440000`
///
/// When generated with the previous id of the same record, the timestamp is strictly greater
/// than the previous one (bumped by 1 ms if the clock has not advanced), so entries of one
/// record sort in the order they were written.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TimestampId {
    timestamp: DateTime<Utc>,
    uuid: ShardableUuid,
}

const TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%S%.3f";

impl TimestampId {
    /// Generate a new id, strictly later than `last` when one is given.
    ///
    /// Callers must hold the write lock of the record the id belongs to.
    pub fn generate(last: Option<&TimestampId>) -> Self {
        Self::generate_at(Utc::now(), last)
    }

    /// Generate an id for an explicit instant, keeping the monotonic guarantee.
    pub fn generate_at(now: DateTime<Utc>, last: Option<&TimestampId>) -> Self {
        // Millisecond precision so the id round-trips through its string form.
        let now = now.trunc_subsecs(3);
        let timestamp = match last {
            Some(prev) if now <= prev.timestamp => prev.timestamp + Duration::milliseconds(1),
            _ => now,
        };

        Self {
            timestamp,
            uuid: ShardableUuid::new(),
        }
    }

    /// Returns the timestamp component.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns the UUID component.
    pub fn uuid(&self) -> &ShardableUuid {
        &self.uuid
    }
}

impl FromStr for TimestampId {
    type Err = UuidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (ts_str, uuid_str) = s.split_once('-').ok_or_else(|| {
            UuidError::InvalidInput(format!("Invalid timestamp id format: '{}'", s))
        })?;

        let ts_no_z = ts_str.strip_suffix('Z').ok_or_else(|| {
            UuidError::InvalidInput(format!("Timestamp must end with 'Z': '{}'", ts_str))
        })?;

        let naive = NaiveDateTime::parse_from_str(ts_no_z, TIMESTAMP_FORMAT).map_err(|e| {
            UuidError::InvalidInput(format!("Invalid timestamp format '{}': {}", ts_str, e))
        })?;

        Ok(Self {
            timestamp: DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc),
            uuid: ShardableUuid::parse(uuid_str)?,
        })
    }
}

impl fmt::Display for TimestampId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}Z-{}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.uuid
        )
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for TimestampId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for TimestampId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_new_generates_canonical_uuid() {
        let id = ShardableUuid::new();
        assert!(ShardableUuid::is_canonical(&id.to_string()));
    }

    #[test]
    fn test_parse_rejects_hyphenated_uuid() {
        let result = ShardableUuid::parse("550e8400-e29b-41d4-a716-446655440000");
        match result {
            Err(UuidError::InvalidInput(msg)) => {
                assert!(msg.contains("32 lowercase hex characters"));
            }
            _ => panic!("Expected InvalidInput error"),
        }
    }

    #[test]
    fn test_parse_rejects_uppercase_and_bad_lengths() {
        assert!(ShardableUuid::parse("550E8400E29B41D4A716446655440000").is_err());
        assert!(ShardableUuid::parse("550e8400e29b41d4a71644665544000").is_err());
        assert!(ShardableUuid::parse("550e8400e29b41d4a716446655440zzz").is_err());
        assert!(ShardableUuid::parse("").is_err());
    }

    #[test]
    fn test_parse_accepts_exactly_the_canonical_form() {
        let inputs = [
            "550e8400e29b41d4a716446655440000",
            "00000000000000000000000000000000",
            "550e8400-e29b-41d4-a716-446655440000",
            "550E8400E29B41D4A716446655440000",
            " 550e8400e29b41d4a716446655440000",
            "550e8400e29b41d4a7164466554400001",
        ];

        for input in inputs {
            assert_eq!(
                ShardableUuid::parse(input).is_ok(),
                ShardableUuid::is_canonical(input),
                "input {input:?}"
            );
        }
        assert_eq!(
            ShardableUuid::parse(inputs[0]).unwrap().to_string(),
            inputs[0]
        );
    }

    #[test]
    fn test_sharded_dir_structure() {
        let id = ShardableUuid::parse("550e8400e29b41d4a716446655440000").unwrap();
        let sharded = id.sharded_dir(Path::new("/triage_data/triages"));

        assert_eq!(
            sharded,
            PathBuf::from("/triage_data/triages/55/0e/550e8400e29b41d4a716446655440000")
        );
    }

    #[test]
    fn test_serde_uses_canonical_string() {
        let id = ShardableUuid::parse("550e8400e29b41d4a716446655440000").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"550e8400e29b41d4a716446655440000\"");

        let back: ShardableUuid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
        assert!(serde_json::from_str::<ShardableUuid>("\"not-an-id\"").is_err());
    }

    #[test]
    fn test_timestamp_id_monotonic_same_instant() {
        let now = Utc.with_ymd_and_hms(2026, 1, 11, 14, 35, 22).unwrap();
        let first = TimestampId::generate_at(now, None);
        let second = TimestampId::generate_at(now, Some(&first));

        assert!(second.timestamp() > first.timestamp());
        assert_eq!(
            second.timestamp() - first.timestamp(),
            Duration::milliseconds(1)
        );
    }

    #[test]
    fn test_timestamp_id_display_and_parse() {
        let now = Utc.with_ymd_and_hms(2026, 1, 11, 14, 35, 22).unwrap();
        let id = TimestampId::generate_at(now, None);
        let displayed = id.to_string();

        assert!(displayed.starts_with("20260111T143522.000Z-"));
        let parsed: TimestampId = displayed.parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_timestamp_id_rejects_missing_z() {
        let result = "20260111T143522.000-550e8400e29b41d4a716446655440000".parse::<TimestampId>();
        assert!(result.is_err());
    }
}
