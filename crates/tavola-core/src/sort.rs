//! Sort descriptor
//!
//! A list endpoint accepts at most one active sort, encoded as `field:asc` or
//! `field:desc`. Absence of a descriptor means the server's natural order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TavolaError;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    /// Wire spelling used inside a sort descriptor
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

impl FromStr for SortDirection {
    type Err = TavolaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            other => Err(TavolaError::InvalidSort(format!(
                "unknown direction '{}'",
                other
            ))),
        }
    }
}

/// The single active sort of a table, `field:direction` on the wire
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SortDescriptor {
    field: String,
    direction: SortDirection,
}

impl SortDescriptor {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    pub fn ascending(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Ascending)
    }

    pub fn descending(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Descending)
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    /// Whether this descriptor sorts by `field`
    pub fn is_on(&self, field: &str) -> bool {
        self.field == field
    }
}

impl fmt::Display for SortDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.field, self.direction.as_str())
    }
}

impl FromStr for SortDescriptor {
    type Err = TavolaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, direction) = s
            .trim()
            .rsplit_once(':')
            .ok_or_else(|| TavolaError::InvalidSort(format!("missing direction in '{}'", s)))?;

        let field = field.trim();
        if field.is_empty() {
            return Err(TavolaError::InvalidSort(format!("missing field in '{}'", s)));
        }

        Ok(Self::new(field, direction.parse()?))
    }
}

impl Serialize for SortDescriptor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SortDescriptor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_parse() {
        let sort = SortDescriptor::ascending("name");
        assert_eq!(sort.to_string(), "name:asc");

        let parsed: SortDescriptor = "createdAt:desc".parse().unwrap();
        assert_eq!(parsed, SortDescriptor::descending("createdAt"));

        let parsed: SortDescriptor = " price : DESC ".parse().unwrap();
        assert_eq!(parsed.field(), "price");
        assert_eq!(parsed.direction(), SortDirection::Descending);
    }

    #[test]
    fn test_rejects_malformed() {
        assert!("name".parse::<SortDescriptor>().is_err());
        assert!(":asc".parse::<SortDescriptor>().is_err());
        assert!("name:sideways".parse::<SortDescriptor>().is_err());
    }

    #[test]
    fn test_serializes_as_string() {
        let json = serde_json::to_string(&SortDescriptor::descending("price")).unwrap();
        assert_eq!(json, "\"price:desc\"");

        let back: SortDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, SortDescriptor::descending("price"));
    }
}
