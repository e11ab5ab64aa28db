use super::domain::{MatchRequestPayload, ValidatedApplicant};
use super::registry::Gender;

/// Map a validated applicant onto the matching service's coded request body.
pub fn normalize(record: &ValidatedApplicant) -> MatchRequestPayload {
    MatchRequestPayload {
        age: record.age(),
        gender: encode_gender(record.gender()),
        ethnicity: record.ethnicity().key().to_string(),
        location: record.location().to_string(),
        marital_status: encode_flag(record.marital_status()),
        income: record.income().clone(),
        employed: encode_flag(record.employed()),
        disabled: encode_flag(record.disabled()),
    }
}

pub(crate) fn encode_gender(gender: Gender) -> u8 {
    match gender {
        Gender::Female => 0,
        _ => 1,
    }
}

pub(crate) fn encode_flag(flag: bool) -> u8 {
    u8::from(flag)
}
