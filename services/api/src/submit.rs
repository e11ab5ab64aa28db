use crate::infra::build_controller;
use adopt_match::config::{AppConfig, MatchServiceConfig};
use adopt_match::error::AppError;
use adopt_match::telemetry;
use adopt_match::workflows::intake::{
    fields, ApplicantInput, FieldName, FieldValue, SubmissionResult, SubmitRejection,
};
use clap::Args;
use std::time::Duration;
use tracing::info;

#[derive(Args, Debug, Default)]
pub(crate) struct SubmitArgs {
    /// Applicant gender (male or female)
    #[arg(long)]
    pub(crate) gender: Option<String>,
    /// Applicant age in years
    #[arg(long)]
    pub(crate) age: Option<String>,
    /// Ethnicity key or label, e.g. asian or "Hispanic/Latino"
    #[arg(long)]
    pub(crate) ethnicity: Option<String>,
    /// Postal code (12345 or 12345-6789)
    #[arg(long)]
    pub(crate) location: Option<String>,
    /// Annual household income
    #[arg(long)]
    pub(crate) income: Option<String>,
    /// Applicant is married
    #[arg(long)]
    pub(crate) marital_status: bool,
    /// Applicant is employed
    #[arg(long)]
    pub(crate) employed: bool,
    /// Open to a child with a disability
    #[arg(long)]
    pub(crate) disabled: bool,
    /// Override MATCH_SERVICE_URL for this submission
    #[arg(long)]
    pub(crate) match_url: Option<String>,
    /// Request timeout in seconds when --match-url is given
    #[arg(long, default_value_t = 30)]
    pub(crate) timeout_secs: u64,
}

pub(crate) async fn run_submit(args: SubmitArgs) -> Result<(), AppError> {
    let config = submit_config(&args)?;
    telemetry::init(&config.telemetry)?;

    let controller = build_controller(&config.match_service)?;
    let input = applicant_input(&args);

    info!(endpoint = %config.match_service.endpoint, "submitting applicant from the command line");
    let outcome = controller.submit_input(input).await;
    if let Err(SubmitRejection::Invalid(errors)) = &outcome {
        println!("Applicant details are invalid");
        for (name, message) in errors.iter() {
            println!("- {name}: {message}");
        }
    }

    match outcome? {
        SubmissionResult::Success(body) => {
            println!("Match request accepted");
            match serde_json::to_string_pretty(&body) {
                Ok(json) => println!("{json}"),
                Err(_) => println!("{body}"),
            }
            Ok(())
        }
        SubmissionResult::Failure(error) => {
            println!("Match request failed: {error}");
            if !error.detail().is_empty() {
                println!("  detail: {}", error.detail());
            }
            Err(error.into())
        }
    }
}

/// Environment configuration, with the matching service replaced when `--match-url` is given.
pub(crate) fn submit_config(args: &SubmitArgs) -> Result<AppConfig, AppError> {
    let mut config = AppConfig::load()?;
    if let Some(url) = &args.match_url {
        let timeout = Duration::from_secs(args.timeout_secs.max(1));
        config.match_service = MatchServiceConfig::new(url, timeout)?;
    }
    Ok(config)
}

pub(crate) fn applicant_input(args: &SubmitArgs) -> ApplicantInput {
    let mut input = ApplicantInput::new();

    let text_fields = [
        (FieldName::Gender, &args.gender),
        (FieldName::Age, &args.age),
        (FieldName::Ethnicity, &args.ethnicity),
        (FieldName::Location, &args.location),
        (FieldName::Income, &args.income),
    ];
    for (name, value) in text_fields {
        if let Some(value) = value {
            input.set(name, FieldValue::text(value.as_str()));
        }
    }

    input.set(FieldName::MaritalStatus, args.marital_status);
    input.set(FieldName::Employed, args.employed);
    input.set(FieldName::Disabled, args.disabled);
    input
}

pub(crate) fn run_fields() {
    let mut current_group = None;
    for field in fields() {
        if current_group != Some(field.group) {
            println!("\n{}", field.group.label());
            current_group = Some(field.group);
        }

        let requirement = if field.required { "required" } else { "optional" };
        println!(
            "- {} ({}, {:?}, {})",
            field.name, field.label, field.kind, requirement
        );
        for choice in field.choices() {
            println!("    {} = {}", choice.value, choice.label);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adopt_match::workflows::intake::validate;

    #[test]
    fn applicant_input_maps_flags_and_text_fields() {
        let args = SubmitArgs {
            gender: Some("female".to_string()),
            age: Some("34".to_string()),
            ethnicity: Some("asian".to_string()),
            location: Some("90210".to_string()),
            income: Some("50000".to_string()),
            marital_status: true,
            employed: true,
            ..SubmitArgs::default()
        };

        let input = applicant_input(&args);
        assert_eq!(input.get(FieldName::Age), Some(&FieldValue::text("34")));
        assert_eq!(input.get(FieldName::Disabled), Some(&FieldValue::Flag(false)));

        let record = validate(&input).expect("cli input validates");
        assert_eq!(record.age(), 34);
        assert!(record.employed());
    }

    #[test]
    fn match_url_overrides_the_configured_endpoint() {
        let args = SubmitArgs {
            match_url: Some("http://matcher.test:9000/v2".to_string()),
            timeout_secs: 5,
            ..SubmitArgs::default()
        };

        let config = submit_config(&args).expect("config resolves");
        assert_eq!(
            config.match_service.endpoint.as_str(),
            "http://matcher.test:9000/v2/match"
        );
        assert_eq!(config.match_service.timeout, Duration::from_secs(5));
    }

    #[test]
    fn invalid_match_url_is_a_config_error() {
        let args = SubmitArgs {
            match_url: Some("ftp://matcher.test".to_string()),
            ..SubmitArgs::default()
        };

        assert!(matches!(submit_config(&args), Err(AppError::Config(_))));
    }

    #[test]
    fn omitted_text_fields_stay_unset() {
        let input = applicant_input(&SubmitArgs::default());

        assert!(input.get(FieldName::Gender).is_none());
        let errors = validate(&input).expect_err("required fields missing");
        assert!(errors.contains(FieldName::Gender));
        assert!(errors.contains(FieldName::Income));
    }
}
