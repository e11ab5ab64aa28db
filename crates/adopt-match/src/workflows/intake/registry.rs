use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Closed set of inputs collected by the applicant form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldName {
    Gender,
    Age,
    Ethnicity,
    Location,
    Income,
    MaritalStatus,
    Employed,
    Disabled,
}

impl FieldName {
    pub const ALL: [FieldName; 8] = [
        FieldName::Gender,
        FieldName::Age,
        FieldName::Ethnicity,
        FieldName::Location,
        FieldName::Income,
        FieldName::MaritalStatus,
        FieldName::Employed,
        FieldName::Disabled,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            FieldName::Gender => "gender",
            FieldName::Age => "age",
            FieldName::Ethnicity => "ethnicity",
            FieldName::Location => "location",
            FieldName::Income => "income",
            FieldName::MaritalStatus => "marital_status",
            FieldName::Employed => "employed",
            FieldName::Disabled => "disabled",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a binding refers to a field the registry does not declare.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown form field '{0}'")]
pub struct UnknownField(pub String);

impl FromStr for FieldName {
    type Err = UnknownField;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        FieldName::ALL
            .into_iter()
            .find(|name| name.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownField(value.to_string()))
    }
}

/// Value shape a field accepts before validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Choice,
    Integer,
    PostalCode,
    Decimal,
    Flag,
}

/// Section of the form a field is rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldGroup {
    Applicant,
    Child,
}

impl FieldGroup {
    pub const fn label(self) -> &'static str {
        match self {
            FieldGroup::Applicant => "Your Info",
            FieldGroup::Child => "Kid Info",
        }
    }
}

/// One entry of an enumerated choice set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub value: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub const fn key(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }

    /// Resolve a submitted value by canonical key or display label.
    pub fn from_selection(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|gender| matches_choice(value, gender.key(), gender.label()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ethnicity {
    AfricanAmerican,
    Arab,
    Asian,
    Caribbean,
    Caucasian,
    European,
    HispanicLatino,
    Indigenous,
    MiddleEastern,
    NativeAmerican,
    PacificIslander,
}

impl Ethnicity {
    pub const ALL: [Ethnicity; 11] = [
        Ethnicity::AfricanAmerican,
        Ethnicity::Arab,
        Ethnicity::Asian,
        Ethnicity::Caribbean,
        Ethnicity::Caucasian,
        Ethnicity::European,
        Ethnicity::HispanicLatino,
        Ethnicity::Indigenous,
        Ethnicity::MiddleEastern,
        Ethnicity::NativeAmerican,
        Ethnicity::PacificIslander,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            Ethnicity::AfricanAmerican => "african_american",
            Ethnicity::Arab => "arab",
            Ethnicity::Asian => "asian",
            Ethnicity::Caribbean => "caribbean",
            Ethnicity::Caucasian => "caucasian",
            Ethnicity::European => "european",
            Ethnicity::HispanicLatino => "hispanic_latino",
            Ethnicity::Indigenous => "indigenous",
            Ethnicity::MiddleEastern => "middle_eastern",
            Ethnicity::NativeAmerican => "native_american",
            Ethnicity::PacificIslander => "pacific_islander",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Ethnicity::AfricanAmerican => "African American",
            Ethnicity::Arab => "Arab",
            Ethnicity::Asian => "Asian",
            Ethnicity::Caribbean => "Caribbean",
            Ethnicity::Caucasian => "Caucasian",
            Ethnicity::European => "European",
            Ethnicity::HispanicLatino => "Hispanic/Latino",
            Ethnicity::Indigenous => "Indigenous",
            Ethnicity::MiddleEastern => "Middle Eastern",
            Ethnicity::NativeAmerican => "Native American",
            Ethnicity::PacificIslander => "Pacific Islander",
        }
    }

    pub fn from_selection(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|ethnicity| matches_choice(value, ethnicity.key(), ethnicity.label()))
    }
}

fn matches_choice(value: &str, key: &str, label: &str) -> bool {
    value.eq_ignore_ascii_case(key) || value.eq_ignore_ascii_case(label)
}

/// Static declaration of a single form input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: FieldName,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub group: FieldGroup,
}

impl FieldDescriptor {
    /// Enumerated options for choice fields; empty for free-form inputs.
    pub fn choices(&self) -> Vec<Choice> {
        match self.name {
            FieldName::Gender => Gender::ALL
                .into_iter()
                .map(|gender| Choice {
                    value: gender.key(),
                    label: gender.label(),
                })
                .collect(),
            FieldName::Ethnicity => Ethnicity::ALL
                .into_iter()
                .map(|ethnicity| Choice {
                    value: ethnicity.key(),
                    label: ethnicity.label(),
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn view(&self) -> FieldView {
        FieldView {
            name: self.name,
            label: self.label,
            kind: self.kind,
            required: self.required,
            group: self.group,
            group_label: self.group.label(),
            choices: self.choices(),
        }
    }
}

const FIELD_REGISTRY: [FieldDescriptor; 8] = [
    FieldDescriptor {
        name: FieldName::Gender,
        label: "Select Gender",
        kind: FieldKind::Choice,
        required: true,
        group: FieldGroup::Applicant,
    },
    FieldDescriptor {
        name: FieldName::Age,
        label: "Age",
        kind: FieldKind::Integer,
        required: true,
        group: FieldGroup::Applicant,
    },
    FieldDescriptor {
        name: FieldName::Ethnicity,
        label: "Ethnicity",
        kind: FieldKind::Choice,
        required: true,
        group: FieldGroup::Applicant,
    },
    FieldDescriptor {
        name: FieldName::Location,
        label: "Postal Code",
        kind: FieldKind::PostalCode,
        required: true,
        group: FieldGroup::Applicant,
    },
    FieldDescriptor {
        name: FieldName::Income,
        label: "Income",
        kind: FieldKind::Decimal,
        required: true,
        group: FieldGroup::Applicant,
    },
    FieldDescriptor {
        name: FieldName::MaritalStatus,
        label: "Marital Status",
        kind: FieldKind::Flag,
        required: false,
        group: FieldGroup::Applicant,
    },
    FieldDescriptor {
        name: FieldName::Employed,
        label: "Employment Status",
        kind: FieldKind::Flag,
        required: false,
        group: FieldGroup::Applicant,
    },
    FieldDescriptor {
        name: FieldName::Disabled,
        label: "Disabled",
        kind: FieldKind::Flag,
        required: false,
        group: FieldGroup::Child,
    },
];

/// All declared fields in render order.
pub fn fields() -> &'static [FieldDescriptor] {
    &FIELD_REGISTRY
}

pub fn descriptor(name: FieldName) -> &'static FieldDescriptor {
    // Registry order mirrors `FieldName::ALL`, so the discriminant doubles as the index.
    &FIELD_REGISTRY[name as usize]
}

/// Serializable registry entry handed to rendering collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldView {
    pub name: FieldName,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub group: FieldGroup,
    pub group_label: &'static str,
    pub choices: Vec<Choice>,
}

pub fn field_views() -> Vec<FieldView> {
    fields().iter().map(FieldDescriptor::view).collect()
}
