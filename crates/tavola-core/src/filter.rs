//! Filter expression types
//!
//! A filter set is a list of [`FilterCondition`]s combined with AND. Each
//! condition carries a typed [`FilterValue`] whose variant is its operand type.
//! On the wire a condition is `{"field": .., "operand": .., "value": ..}`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::TavolaError;

/// The declared comparison kind for a filterable field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperandType {
    /// One of an explicit option list
    Enum,
    Boolean,
    /// Free text, matched by the server (usually "contains")
    Text,
    NumberRange,
    DateRange,
}

impl OperandType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Enum => "is",
            Self::Boolean => "is",
            Self::Text => "contains",
            Self::NumberRange => "between",
            Self::DateRange => "between dates",
        }
    }
}

/// Inclusive numeric bounds; an open side is `None`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NumberRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl NumberRange {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    pub fn is_inverted(&self) -> bool {
        matches!((self.min, self.max), (Some(min), Some(max)) if min > max)
    }
}

/// Inclusive date bounds; an open side is `None`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    pub fn is_inverted(&self) -> bool {
        matches!((self.from, self.to), (Some(from), Some(to)) if from > to)
    }
}

/// A typed filter operand
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Enum(String),
    Boolean(bool),
    Text(String),
    NumberRange(NumberRange),
    DateRange(DateRange),
}

impl FilterValue {
    pub fn operand_type(&self) -> OperandType {
        match self {
            Self::Enum(_) => OperandType::Enum,
            Self::Boolean(_) => OperandType::Boolean,
            Self::Text(_) => OperandType::Text,
            Self::NumberRange(_) => OperandType::NumberRange,
            Self::DateRange(_) => OperandType::DateRange,
        }
    }

    fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Enum(value) | Self::Text(value) => serde_json::Value::String(value.clone()),
            Self::Boolean(value) => serde_json::Value::Bool(*value),
            Self::NumberRange(range) => {
                serde_json::to_value(range).unwrap_or(serde_json::Value::Null)
            }
            Self::DateRange(range) => {
                serde_json::to_value(range).unwrap_or(serde_json::Value::Null)
            }
        }
    }

    fn from_json(operand: OperandType, value: serde_json::Value) -> Result<Self, TavolaError> {
        Ok(match operand {
            OperandType::Enum => Self::Enum(serde_json::from_value(value)?),
            OperandType::Boolean => Self::Boolean(serde_json::from_value(value)?),
            OperandType::Text => Self::Text(serde_json::from_value(value)?),
            OperandType::NumberRange => Self::NumberRange(serde_json::from_value(value)?),
            OperandType::DateRange => Self::DateRange(serde_json::from_value(value)?),
        })
    }
}

/// A single filter condition on one field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WireCondition", into = "WireCondition")]
pub struct FilterCondition {
    pub field: String,
    pub value: FilterValue,
}

impl FilterCondition {
    pub fn new(field: impl Into<String>, value: FilterValue) -> Self {
        Self {
            field: field.into(),
            value,
        }
    }

    pub fn enumeration(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(field, FilterValue::Enum(value.into()))
    }

    pub fn boolean(field: impl Into<String>, value: bool) -> Self {
        Self::new(field, FilterValue::Boolean(value))
    }

    pub fn text(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(field, FilterValue::Text(value.into()))
    }

    pub fn number_range(field: impl Into<String>, min: Option<f64>, max: Option<f64>) -> Self {
        Self::new(field, FilterValue::NumberRange(NumberRange::new(min, max)))
    }

    pub fn date_range(
        field: impl Into<String>,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Self {
        Self::new(field, FilterValue::DateRange(DateRange::new(from, to)))
    }

    pub fn operand_type(&self) -> OperandType {
        self.value.operand_type()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WireCondition {
    field: String,
    operand: OperandType,
    value: serde_json::Value,
}

impl From<FilterCondition> for WireCondition {
    fn from(condition: FilterCondition) -> Self {
        Self {
            operand: condition.value.operand_type(),
            value: condition.value.to_json(),
            field: condition.field,
        }
    }
}

impl TryFrom<WireCondition> for FilterCondition {
    type Error = TavolaError;

    fn try_from(wire: WireCondition) -> Result<Self, Self::Error> {
        let value = FilterValue::from_json(wire.operand, wire.value).map_err(|err| {
            TavolaError::InvalidFilter(format!("field '{}': {}", wire.field, err))
        })?;
        Ok(Self {
            field: wire.field,
            value,
        })
    }
}
