//! Compiled rules and their evaluation against a record.

use serde::Serialize;

use super::types::{FieldType, RuleConfig, RuleError};
use crate::dates::{self, DateCheck, DateCheckKind};
use crate::numbers::{self, NumberCheck, NumberCheckKind};
use crate::options::ValidationOptions;
use crate::record::RecordAccess;
use crate::strings::{self, StringCheck, StringCheckKind};

/// A check bound to its family-specific formatting.
#[derive(Debug, Clone, PartialEq)]
pub enum Check {
    Date { check: DateCheck, format: Option<String> },
    String(StringCheck),
    Number { check: NumberCheck, precision: Option<usize> },
}

impl Check {
    /// `family.check`, e.g. `date.before`.
    pub fn name(&self) -> String {
        match self {
            Self::Date { check, .. } => format!("date.{}", check.kind()),
            Self::String(check) => format!("string.{}", check.kind()),
            Self::Number { check, .. } => format!("number.{}", check.kind()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub field: String,
    pub check: Check,
    pub options: ValidationOptions,
}

impl Rule {
    /// Compile one config entry. `index` only labels errors.
    pub fn from_config(index: usize, cfg: &RuleConfig) -> Result<Self, RuleError> {
        if cfg.field.trim().is_empty() {
            return Err(RuleError::EmptyField { index });
        }

        let unknown = || RuleError::UnknownCheck {
            index,
            field: cfg.field.clone(),
            field_type: cfg.field_type,
            check: cfg.check.clone(),
        };

        let check = match cfg.field_type {
            FieldType::Date => {
                let kind: DateCheckKind = cfg.check.parse().map_err(|_| unknown())?;
                Check::Date { check: DateCheck::from_args(kind, &cfg.args), format: cfg.format.clone() }
            }
            FieldType::String => {
                let kind: StringCheckKind = cfg.check.parse().map_err(|_| unknown())?;
                if cfg.format.is_some() {
                    tracing::warn!(field = %cfg.field, "string rules ignore `format`");
                }
                Check::String(StringCheck::from_args(kind, &cfg.args))
            }
            FieldType::Number => {
                let kind: NumberCheckKind = cfg.check.parse().map_err(|_| unknown())?;
                let precision = cfg
                    .format
                    .as_deref()
                    .map(|f| {
                        f.trim().parse::<usize>().map_err(|_| RuleError::BadPrecision {
                            index,
                            field: cfg.field.clone(),
                            format: f.to_string(),
                        })
                    })
                    .transpose()?;
                Check::Number { check: NumberCheck::from_args(kind, &cfg.args), precision }
            }
        };

        Ok(Self { field: cfg.field.clone(), check, options: cfg.options.clone() })
    }

    /// Run the check and its formatting step. Returns the verdict.
    pub fn apply(&self, record: &mut dyn RecordAccess) -> bool {
        match &self.check {
            Check::Date { check, format } => dates::evaluate_and_format(
                record,
                &self.field,
                check,
                format.as_deref(),
                &self.options,
            ),
            Check::String(check) => {
                strings::evaluate_and_format(record, &self.field, check, &self.options)
            }
            Check::Number { check, precision } => numbers::evaluate_and_format(
                record,
                &self.field,
                check,
                *precision,
                &self.options,
            ),
        }
    }
}

/// Ordered list of compiled rules.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Compile every entry. The first invalid entry fails the whole set.
    pub fn from_configs(configs: &[RuleConfig]) -> Result<Self, RuleError> {
        let rules = configs
            .iter()
            .enumerate()
            .map(|(i, cfg)| Rule::from_config(i, cfg))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    /// Apply every rule, in order, to the same record.
    ///
    /// Later rules see the values earlier rules wrote.
    pub fn apply(&self, record: &mut dyn RecordAccess) -> RecordReport {
        let outcomes = self
            .rules
            .iter()
            .map(|rule| {
                let passed = rule.apply(record);
                tracing::debug!(field = %rule.field, check = %rule.check.name(), passed, "rule");
                RuleOutcome { field: rule.field.clone(), check: rule.check.name(), passed }
            })
            .collect();
        RecordReport { outcomes }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleOutcome {
    pub field: String,
    pub check: String,
    pub passed: bool,
}

/// Verdicts of one rule set against one record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecordReport {
    pub outcomes: Vec<RuleOutcome>,
}

impl RecordReport {
    pub fn is_valid(&self) -> bool {
        self.outcomes.iter().all(|o| o.passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &RuleOutcome> {
        self.outcomes.iter().filter(|o| !o.passed)
    }
}
