use super::common::*;
use crate::workflows::intake::normalizer::{encode_flag, encode_gender, normalize};
use crate::workflows::intake::registry::{FieldName, Gender};
use crate::workflows::intake::validation::validate;

#[test]
fn scenario_a_normalizes_to_wire_payload() {
    let record = validate(&scenario_a_input()).expect("valid applicant");
    let payload = normalize(&record);

    let encoded = serde_json::to_value(&payload).expect("payload serializes");
    assert_eq!(encoded, scenario_a_payload());
}

#[test]
fn payload_keys_follow_the_remote_contract_order() {
    let record = validate(&scenario_a_input()).expect("valid applicant");
    let body = serde_json::to_string(&normalize(&record)).expect("payload serializes");

    assert_eq!(
        body,
        r#"{"age":34,"gender":0,"ethnicity":"asian","location":"90210","marital_status":1,"income":"50000","employed":1,"disabled":0}"#
    );
}

#[test]
fn normalization_is_deterministic() {
    let input = scenario_a_input();
    let first = normalize(&validate(&input).expect("valid applicant"));
    let second = normalize(&validate(&input).expect("valid applicant"));

    assert_eq!(first, second);
}

#[test]
fn only_female_encodes_to_zero() {
    assert_eq!(encode_gender(Gender::Female), 0);
    assert_eq!(encode_gender(Gender::Male), 1);

    for (selection, expected) in [("female", 0), ("Female", 0), ("male", 1), ("Male", 1)] {
        let input = scenario_a_input().with(FieldName::Gender, selection);
        let payload = normalize(&validate(&input).expect("valid applicant"));
        assert_eq!(payload.gender, expected, "{selection}");
    }
}

#[test]
fn flags_encode_independently() {
    assert_eq!(encode_flag(true), 1);
    assert_eq!(encode_flag(false), 0);

    let input = scenario_a_input()
        .with(FieldName::MaritalStatus, false)
        .with(FieldName::Employed, true)
        .with(FieldName::Disabled, true);
    let payload = normalize(&validate(&input).expect("valid applicant"));

    assert_eq!(payload.marital_status, 0);
    assert_eq!(payload.employed, 1);
    assert_eq!(payload.disabled, 1);
}

#[test]
fn ethnicity_is_sent_as_canonical_key_and_income_passes_through() {
    let input = scenario_a_input()
        .with(FieldName::Ethnicity, "Middle Eastern")
        .with(FieldName::Income, 61500u32);
    let payload = normalize(&validate(&input).expect("valid applicant"));

    assert_eq!(payload.ethnicity, "middle_eastern");
    let encoded = serde_json::to_value(&payload).expect("payload serializes");
    assert_eq!(encoded["income"], serde_json::json!(61500));
}

#[test]
fn padded_text_reaches_the_wire_trimmed() {
    let input = scenario_a_input()
        .with(FieldName::Income, " 50000 ")
        .with(FieldName::Location, " 90210 ");
    let payload = normalize(&validate(&input).expect("valid applicant"));

    let encoded = serde_json::to_value(&payload).expect("payload serializes");
    assert_eq!(encoded["income"], "50000");
    assert_eq!(encoded["location"], "90210");
    assert_eq!(encoded, scenario_a_payload());
}
