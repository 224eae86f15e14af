//! The stream's opaque, monotonically non-decreasing entry ID.

use std::fmt;
use std::str::FromStr;

/// A Redis stream entry ID, `"<ms>-<seq>"`.
///
/// Wrapping the raw string (rather than parsing into `(u64, u64)`) keeps
/// the type trivially `Display`-compatible with what Redis hands back,
/// while still validating the shape on construction (spec §8 S1 checks
/// `message_id` against `/\d+-\d+/`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StreamId(String);

impl StreamId {
    /// Access the raw `"<ms>-<seq>"` form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for StreamId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(2, '-');
        let ms = parts.next().ok_or(())?;
        let seq = parts.next().ok_or(())?;
        if ms.is_empty() || seq.is_empty() || !ms.bytes().all(|b| b.is_ascii_digit()) || !seq.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(());
        }
        Ok(Self(s.to_string()))
    }
}

impl fmt::Display for StreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl serde::Serialize for StreamId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_id() {
        let id: StreamId = "1700000000000-0".parse().unwrap();
        assert_eq!(id.as_str(), "1700000000000-0");
    }

    #[test]
    fn rejects_missing_sequence() {
        assert!("1700000000000".parse::<StreamId>().is_err());
    }

    #[test]
    fn rejects_non_numeric_parts() {
        assert!("abc-0".parse::<StreamId>().is_err());
        assert!("0-abc".parse::<StreamId>().is_err());
    }

    #[test]
    fn display_round_trips() {
        let id: StreamId = "42-7".parse().unwrap();
        assert_eq!(id.to_string(), "42-7");
    }
}
