//! Filter definition registry
//!
//! Each list page declares which fields can be filtered and with what operand
//! type. A filter-builder UI reads the registry to pick input widgets, and the
//! controller uses it to validate every condition before it joins the filter
//! set. Registries are authored per page and never change at runtime.

use tavola_core::{FilterCondition, FilterValue, OperandType};

use crate::error::FilterError;

/// One selectable value of an enum filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumOption {
    pub value: String,
    pub label: String,
}

impl EnumOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// A filterable field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterDefinition {
    pub field: String,
    pub label: String,
    pub operand: OperandType,
    /// Allowed values; only populated for [`OperandType::Enum`]
    pub options: Vec<EnumOption>,
}

impl FilterDefinition {
    pub fn option(&self, value: &str) -> Option<&EnumOption> {
        self.options.iter().find(|o| o.value == value)
    }

    /// Check a condition against this definition
    pub fn validate(&self, condition: &FilterCondition) -> Result<(), FilterError> {
        let actual = condition.operand_type();
        if actual != self.operand {
            return Err(FilterError::OperandMismatch {
                field: self.field.clone(),
                expected: self.operand,
                actual,
            });
        }

        match &condition.value {
            FilterValue::Enum(value) => {
                if self.option(value).is_none() {
                    return Err(FilterError::UnknownOption {
                        field: self.field.clone(),
                        value: value.clone(),
                    });
                }
            }
            FilterValue::Text(value) => {
                if value.trim().is_empty() {
                    return Err(FilterError::EmptyValue(self.field.clone()));
                }
            }
            FilterValue::NumberRange(range) => {
                if range.is_unbounded() {
                    return Err(FilterError::EmptyValue(self.field.clone()));
                }
                if range.is_inverted() {
                    return Err(FilterError::InvertedRange(self.field.clone()));
                }
            }
            FilterValue::DateRange(range) => {
                if range.is_unbounded() {
                    return Err(FilterError::EmptyValue(self.field.clone()));
                }
                if range.is_inverted() {
                    return Err(FilterError::InvertedRange(self.field.clone()));
                }
            }
            FilterValue::Boolean(_) => {}
        }

        Ok(())
    }
}

/// The filterable fields of one list page, in display order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterRegistry {
    definitions: Vec<FilterDefinition>,
}

impl FilterRegistry {
    pub fn builder() -> FilterRegistryBuilder {
        FilterRegistryBuilder::default()
    }

    /// A registry that accepts no filters
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn definitions(&self) -> &[FilterDefinition] {
        &self.definitions
    }

    pub fn get(&self, field: &str) -> Option<&FilterDefinition> {
        self.definitions.iter().find(|d| d.field == field)
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn validate(&self, condition: &FilterCondition) -> Result<(), FilterError> {
        let definition = self
            .get(&condition.field)
            .ok_or_else(|| FilterError::UnknownField(condition.field.clone()))?;
        definition.validate(condition)
    }

    /// Validate a whole filter set, stopping at the first rejected condition
    pub fn validate_all(&self, conditions: &[FilterCondition]) -> Result<(), FilterError> {
        conditions.iter().try_for_each(|c| self.validate(c))
    }
}

/// Builder for [`FilterRegistry`]
#[derive(Debug, Default)]
pub struct FilterRegistryBuilder {
    definitions: Vec<FilterDefinition>,
}

impl FilterRegistryBuilder {
    fn push(
        mut self,
        field: impl Into<String>,
        label: impl Into<String>,
        operand: OperandType,
        options: Vec<EnumOption>,
    ) -> Self {
        let field = field.into();
        if self.definitions.iter().any(|d| d.field == field) {
            tracing::warn!(field = %field, "Duplicate filter definition replaced");
            self.definitions.retain(|d| d.field != field);
        }
        self.definitions.push(FilterDefinition {
            field,
            label: label.into(),
            operand,
            options,
        });
        self
    }

    /// An enum field with `(value, label)` options
    pub fn enumeration<I, V, L>(
        self,
        field: impl Into<String>,
        label: impl Into<String>,
        options: I,
    ) -> Self
    where
        I: IntoIterator<Item = (V, L)>,
        V: Into<String>,
        L: Into<String>,
    {
        let options = options
            .into_iter()
            .map(|(value, label)| EnumOption::new(value, label))
            .collect();
        self.push(field, label, OperandType::Enum, options)
    }

    pub fn boolean(self, field: impl Into<String>, label: impl Into<String>) -> Self {
        self.push(field, label, OperandType::Boolean, Vec::new())
    }

    pub fn text(self, field: impl Into<String>, label: impl Into<String>) -> Self {
        self.push(field, label, OperandType::Text, Vec::new())
    }

    pub fn number_range(self, field: impl Into<String>, label: impl Into<String>) -> Self {
        self.push(field, label, OperandType::NumberRange, Vec::new())
    }

    pub fn date_range(self, field: impl Into<String>, label: impl Into<String>) -> Self {
        self.push(field, label, OperandType::DateRange, Vec::new())
    }

    pub fn build(self) -> FilterRegistry {
        FilterRegistry {
            definitions: self.definitions,
        }
    }
}
