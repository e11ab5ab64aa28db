//! Applicant intake: field registry, validation, payload normalization, and submission to the
//! remote matching service.

pub mod client;
pub mod controller;
pub mod domain;
pub mod normalizer;
pub mod registry;
pub mod router;
pub mod validation;

#[cfg(test)]
mod tests;

pub use client::{HttpMatchClient, MatchService, MatchServiceError};
pub use controller::{SubmissionController, SubmitRejection};
pub use domain::{
    ApplicantInput, ErrorSet, FieldValue, Income, IntakeSnapshot, MatchRequestPayload,
    SubmissionPhase, SubmissionResult, ValidatedApplicant,
};
pub use normalizer::normalize;
pub use registry::{
    descriptor, field_views, fields, Choice, Ethnicity, FieldDescriptor, FieldGroup, FieldKind,
    FieldName, FieldView, Gender, UnknownField,
};
pub use router::intake_router;
pub use validation::validate;
