use super::domain::{ApplicantInput, ErrorSet, FieldValue, Income, ValidatedApplicant};
use super::registry::{descriptor, Ethnicity, FieldName, Gender};

pub const REQUIRED: &str = "is required";
pub const INVALID_AGE: &str = "must be a valid age";
pub const INVALID_SELECTION: &str = "invalid selection";
pub const INVALID_POSTAL_CODE: &str = "must be a valid postal code";
pub const INVALID_INCOME: &str = "must be a valid income";
pub const INVALID_FLAG: &str = "must be true or false";

type Rule<T> = fn(&FieldValue) -> Result<T, &'static str>;

/// Check every field of the raw input, collecting all violations before failing.
pub fn validate(input: &ApplicantInput) -> Result<ValidatedApplicant, ErrorSet> {
    let mut errors = ErrorSet::default();

    let gender = check(&mut errors, input, FieldName::Gender, parse_gender);
    let age = check(&mut errors, input, FieldName::Age, parse_age);
    let ethnicity = check(&mut errors, input, FieldName::Ethnicity, parse_ethnicity);
    let location = check(&mut errors, input, FieldName::Location, parse_location);
    let income = check(&mut errors, input, FieldName::Income, parse_income);
    let marital_status = check(&mut errors, input, FieldName::MaritalStatus, parse_flag);
    let employed = check(&mut errors, input, FieldName::Employed, parse_flag);
    let disabled = check(&mut errors, input, FieldName::Disabled, parse_flag);

    match (gender, age, ethnicity, location, income) {
        (Some(gender), Some(age), Some(ethnicity), Some(location), Some(income))
            if errors.is_empty() =>
        {
            Ok(ValidatedApplicant {
                gender,
                age,
                ethnicity,
                location,
                income,
                marital_status: marital_status.unwrap_or(false),
                employed: employed.unwrap_or(false),
                disabled: disabled.unwrap_or(false),
            })
        }
        _ => Err(errors),
    }
}

/// Apply a rule to one field. Unset optional fields yield `None` without an error.
fn check<T>(
    errors: &mut ErrorSet,
    input: &ApplicantInput,
    name: FieldName,
    rule: Rule<T>,
) -> Option<T> {
    match input.get(name).filter(|value| !value.is_blank()) {
        None => {
            if descriptor(name).required {
                errors.insert(name, REQUIRED);
            }
            None
        }
        Some(value) => match rule(value) {
            Ok(parsed) => Some(parsed),
            Err(message) => {
                errors.insert(name, message);
                None
            }
        },
    }
}

fn parse_gender(value: &FieldValue) -> Result<Gender, &'static str> {
    match value {
        FieldValue::Text(text) => Gender::from_selection(text).ok_or(INVALID_SELECTION),
        _ => Err(INVALID_SELECTION),
    }
}

fn parse_ethnicity(value: &FieldValue) -> Result<Ethnicity, &'static str> {
    match value {
        FieldValue::Text(text) => Ethnicity::from_selection(text).ok_or(INVALID_SELECTION),
        _ => Err(INVALID_SELECTION),
    }
}

fn parse_age(value: &FieldValue) -> Result<u32, &'static str> {
    match value {
        FieldValue::Number(number) => match number.as_u64() {
            Some(age) => u32::try_from(age).map_err(|_| INVALID_AGE),
            None => number.as_f64().map_or(Err(INVALID_AGE), whole_age),
        },
        FieldValue::Text(text) => {
            let text = text.trim();
            if !is_plain_decimal(text) {
                return Err(INVALID_AGE);
            }
            text.parse::<f64>().map_or(Err(INVALID_AGE), whole_age)
        }
        FieldValue::Flag(_) => Err(INVALID_AGE),
    }
}

/// Integral values such as `34.0` count as whole years.
fn whole_age(age: f64) -> Result<u32, &'static str> {
    if age >= 0.0 && age.fract() == 0.0 && age <= f64::from(u32::MAX) {
        Ok(age as u32)
    } else {
        Err(INVALID_AGE)
    }
}

fn parse_location(value: &FieldValue) -> Result<String, &'static str> {
    match value {
        FieldValue::Text(text) if is_postal_code(text.trim()) => Ok(text.trim().to_string()),
        _ => Err(INVALID_POSTAL_CODE),
    }
}

/// US ZIP (`12345`) or ZIP+4 (`12345-6789`).
pub(crate) fn is_postal_code(value: &str) -> bool {
    let all_digits = |part: &str, len: usize| {
        part.len() == len && part.chars().all(|c| c.is_ascii_digit())
    };

    match value.split_once('-') {
        None => all_digits(value, 5),
        Some((zip, plus_four)) => all_digits(zip, 5) && all_digits(plus_four, 4),
    }
}

fn parse_income(value: &FieldValue) -> Result<Income, &'static str> {
    match value {
        FieldValue::Number(number) => match number.as_f64() {
            Some(amount) if amount.is_finite() && amount >= 0.0 => {
                Ok(Income::Number(number.clone()))
            }
            _ => Err(INVALID_INCOME),
        },
        FieldValue::Text(text) if is_plain_decimal(text.trim()) => {
            Ok(Income::Text(text.trim().to_string()))
        }
        _ => Err(INVALID_INCOME),
    }
}

/// Digits with an optional fractional part: `50000`, `50000.75`. No sign, exponent or separators.
pub(crate) fn is_plain_decimal(value: &str) -> bool {
    let digits = |part: &str| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit());

    match value.split_once('.') {
        None => digits(value),
        Some((whole, fraction)) => digits(whole) && digits(fraction),
    }
}

fn parse_flag(value: &FieldValue) -> Result<bool, &'static str> {
    match value {
        FieldValue::Flag(flag) => Ok(*flag),
        FieldValue::Number(number) => match number.as_u64() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(INVALID_FLAG),
        },
        FieldValue::Text(text) => match text.trim().to_ascii_lowercase().as_str() {
            "true" | "on" | "yes" | "1" => Ok(true),
            "false" | "off" | "no" | "0" => Ok(false),
            _ => Err(INVALID_FLAG),
        },
    }
}
