use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::AppError;
use crate::utils::date::normalize_date;
use crate::utils::validation::{
    validate_bounded_text, validate_date, validate_email_address, validate_gender,
    validate_marital_status, validate_payload, validate_phone, validate_required,
};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            _ => None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MaritalStatus {
    Single,
    Married,
    Divorced,
    Widowed,
    Separated,
    Engaged,
}

impl MaritalStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "single" => Some(MaritalStatus::Single),
            "married" => Some(MaritalStatus::Married),
            "divorced" => Some(MaritalStatus::Divorced),
            "widowed" => Some(MaritalStatus::Widowed),
            "separated" => Some(MaritalStatus::Separated),
            "engaged" => Some(MaritalStatus::Engaged),
            _ => None,
        }
    }
}

/// One stored employee. Dates are already in `dd-mm-yyyy` form.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRecord {
    pub name: String,
    pub gender: Gender,
    pub marital_status: MaritalStatus,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub dob: String,
    pub nationality: String,
    pub hire_date: String,
    pub department: String,
}

/// Raw submitted values. Missing fields are empty strings so that they
/// surface as `required` failures rather than decode errors.
#[derive(Validate, Debug, Clone, Default)]
pub struct EmployeeSubmission {
    #[validate(custom = "validate_bounded_text")]
    pub name: String,
    #[validate(custom = "validate_gender")]
    pub gender: String,
    #[validate(custom = "validate_marital_status")]
    pub marital_status: String,
    #[validate(custom = "validate_phone")]
    pub phone: String,
    #[validate(custom = "validate_email_address")]
    pub email: String,
    #[validate(custom = "validate_required")]
    pub address: String,
    #[validate(custom = "validate_date")]
    pub dob: String,
    #[validate(custom = "validate_required")]
    pub nationality: String,
    #[validate(custom = "validate_date")]
    pub hire_date: String,
    #[validate(custom = "validate_bounded_text")]
    pub department: String,
}

impl EmployeeSubmission {
    /// Builds a submission from decoded form fields, keyed by wire name.
    /// Values are trimmed; unknown keys are ignored.
    pub fn from_fields(fields: &HashMap<String, String>) -> Self {
        let field = |key: &str| {
            fields
                .get(key)
                .map(|value| value.trim().to_string())
                .unwrap_or_default()
        };

        EmployeeSubmission {
            name: field("name"),
            gender: field("gender"),
            marital_status: field("maritalStatus"),
            phone: field("phone"),
            email: field("email"),
            address: field("address"),
            dob: field("dob"),
            nationality: field("nationality"),
            hire_date: field("hireDate"),
            department: field("department"),
        }
    }

    /// Validates every field, then converts to the persisted shape.
    pub fn into_record(self) -> Result<EmployeeRecord, AppError> {
        validate_payload(&self)?;

        let gender = Gender::parse(&self.gender)
            .ok_or_else(|| AppError::InternalServerError("gender passed validation but did not parse".to_string()))?;
        let marital_status = MaritalStatus::parse(&self.marital_status)
            .ok_or_else(|| AppError::InternalServerError("marital status passed validation but did not parse".to_string()))?;
        let dob = normalize_date(&self.dob)
            .ok_or_else(|| AppError::InternalServerError("dob passed validation but did not parse".to_string()))?;
        let hire_date = normalize_date(&self.hire_date)
            .ok_or_else(|| AppError::InternalServerError("hire date passed validation but did not parse".to_string()))?;

        Ok(EmployeeRecord {
            name: self.name,
            gender,
            marital_status,
            phone: self.phone,
            email: self.email,
            address: self.address,
            dob,
            nationality: self.nationality,
            hire_date,
            department: self.department,
        })
    }
}

#[cfg(test)]
pub(crate) fn sample_fields() -> HashMap<String, String> {
    [
        ("name", "Aisyah Rahman"),
        ("gender", "female"),
        ("maritalStatus", "married"),
        ("phone", "60123456789"),
        ("email", "aisyah@example.com"),
        ("address", "12 Jalan Ampang, Kuala Lumpur"),
        ("dob", "1990-07-04"),
        ("nationality", "Malaysia"),
        ("hireDate", "2021-01-15"),
        ("department", "Finance"),
    ]
    .into_iter()
    .map(|(key, value)| (key.to_string(), value.to_string()))
    .collect()
}
