use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::client::MatchServiceError;
use super::registry::{Ethnicity, FieldName, Gender};

/// Raw value captured from a form control before any type checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Flag(bool),
    Number(serde_json::Number),
    Text(String),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    /// Empty or whitespace-only text is treated the same as an unset field.
    pub fn is_blank(&self) -> bool {
        matches!(self, FieldValue::Text(text) if text.trim().is_empty())
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Number(value.into())
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value.into())
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

/// Field name to raw value mapping, continuously edited by the form binding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicantInput(BTreeMap<FieldName, FieldValue>);

impl ApplicantInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: FieldName, value: impl Into<FieldValue>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: FieldName, value: impl Into<FieldValue>) {
        self.0.insert(name, value.into());
    }

    pub fn remove(&mut self, name: FieldName) -> Option<FieldValue> {
        self.0.remove(&name)
    }

    pub fn get(&self, name: FieldName) -> Option<&FieldValue> {
        self.0.get(&name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &FieldValue)> {
        self.0.iter().map(|(name, value)| (*name, value))
    }
}

impl FromIterator<(FieldName, FieldValue)> for ApplicantInput {
    fn from_iter<I: IntoIterator<Item = (FieldName, FieldValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Declared income, kept in the representation the applicant supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Income {
    Number(serde_json::Number),
    Text(String),
}

impl Income {
    pub fn amount(&self) -> f64 {
        match self {
            Income::Number(number) => number.as_f64().unwrap_or_default(),
            Income::Text(text) => text.trim().parse().unwrap_or_default(),
        }
    }
}

/// Type-checked applicant record. Only produced by a successful validation pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidatedApplicant {
    pub(super) gender: Gender,
    pub(super) age: u32,
    pub(super) ethnicity: Ethnicity,
    pub(super) location: String,
    pub(super) income: Income,
    pub(super) marital_status: bool,
    pub(super) employed: bool,
    pub(super) disabled: bool,
}

impl ValidatedApplicant {
    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn ethnicity(&self) -> Ethnicity {
        self.ethnicity
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn income(&self) -> &Income {
        &self.income
    }

    pub fn marital_status(&self) -> bool {
        self.marital_status
    }

    pub fn employed(&self) -> bool {
        self.employed
    }

    pub fn disabled(&self) -> bool {
        self.disabled
    }
}

/// Field-level validation messages; empty iff the input validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ErrorSet(BTreeMap<FieldName, String>);

impl ErrorSet {
    pub fn insert(&mut self, name: FieldName, message: impl Into<String>) {
        self.0.insert(name, message.into());
    }

    pub fn get(&self, name: FieldName) -> Option<&str> {
        self.0.get(&name).map(String::as_str)
    }

    pub fn contains(&self, name: FieldName) -> bool {
        self.0.contains_key(&name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &str)> {
        self.0.iter().map(|(name, message)| (*name, message.as_str()))
    }

    pub fn summary(&self) -> String {
        self.iter()
            .map(|(name, message)| format!("{name} {message}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Wire body for `POST /match`. Field order matches the remote contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRequestPayload {
    pub age: u32,
    pub gender: u8,
    pub ethnicity: String,
    pub location: String,
    pub marital_status: u8,
    pub income: Income,
    pub employed: u8,
    pub disabled: u8,
}

/// Lifecycle of one submit action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionPhase {
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

impl SubmissionPhase {
    pub const fn label(self) -> &'static str {
        match self {
            SubmissionPhase::Idle => "idle",
            SubmissionPhase::Validating => "validating",
            SubmissionPhase::Submitting => "submitting",
            SubmissionPhase::Succeeded => "succeeded",
            SubmissionPhase::Failed => "failed",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, SubmissionPhase::Succeeded | SubmissionPhase::Failed)
    }
}

/// Outcome of a submission attempt that reached the matching service.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "snake_case")]
pub enum SubmissionResult {
    Success(serde_json::Value),
    Failure(MatchServiceError),
}

impl SubmissionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionResult::Success(_))
    }

    pub fn summary(&self) -> String {
        match self {
            SubmissionResult::Success(_) => "match request accepted".to_string(),
            SubmissionResult::Failure(error) => error.to_string(),
        }
    }
}

/// Read-only copy of the controller state for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntakeSnapshot {
    pub phase: SubmissionPhase,
    pub input: ApplicantInput,
    pub errors: ErrorSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<SubmissionResult>,
    pub updated_at: DateTime<Utc>,
}
