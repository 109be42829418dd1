use std::collections::BTreeMap;

use validator::{Validate, ValidationError, ValidationErrors};

use crate::errors::AppError;
use crate::models::employee::{Gender, MaritalStatus};
use crate::utils::date;

pub const MAX_TEXT_LENGTH: usize = 255;
pub const PHONE_MIN_DIGITS: usize = 6;
pub const PHONE_MAX_DIGITS: usize = 15;

pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), AppError> {
    payload
        .validate()
        .map_err(|err| AppError::Validation(field_messages(&err)))
}

/// Flattens validator output into `{wireName: [messages]}`.
pub fn field_messages(errors: &ValidationErrors) -> BTreeMap<String, Vec<String>> {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let key = wire_name(field);
            let label = field_label(&key);
            let messages = errs.iter().map(|err| message_for(&label, err)).collect();
            (key, messages)
        })
        .collect()
}

fn message_for(label: &str, err: &ValidationError) -> String {
    match err.code.as_ref() {
        "required" => format!("The {} field is required.", label),
        "max_length" => format!(
            "The {} field must not be greater than {} characters.",
            label, MAX_TEXT_LENGTH
        ),
        "in" => format!("The selected {} is invalid.", label),
        "format" => format!("The {} field format is invalid.", label),
        "email" => format!("The {} field must be a valid email address.", label),
        "date" => format!("The {} field must be a valid date.", label),
        _ => err
            .message
            .as_ref()
            .map(|message| message.to_string())
            .unwrap_or_else(|| format!("The {} field is invalid.", label)),
    }
}

/// `marital_status` -> `maritalStatus`; already camelCase names pass through.
fn wire_name(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for ch in field.chars() {
        if ch == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}

/// `hireDate` -> `hire date`
fn field_label(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for ch in key.chars() {
        if ch.is_uppercase() {
            out.push(' ');
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

pub fn validate_required(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

pub fn validate_bounded_text(value: &str) -> Result<(), ValidationError> {
    validate_required(value)?;
    if value.chars().count() > MAX_TEXT_LENGTH {
        return Err(ValidationError::new("max_length"));
    }
    Ok(())
}

pub fn validate_gender(gender: &str) -> Result<(), ValidationError> {
    validate_required(gender)?;
    Gender::parse(gender)
        .map(|_| ())
        .ok_or_else(|| ValidationError::new("in"))
}

pub fn validate_marital_status(status: &str) -> Result<(), ValidationError> {
    validate_required(status)?;
    MaritalStatus::parse(status)
        .map(|_| ())
        .ok_or_else(|| ValidationError::new("in"))
}

pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    validate_required(phone)?;
    let digits_only = phone.bytes().all(|b| b.is_ascii_digit());
    if !digits_only || !(PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&phone.len()) {
        return Err(ValidationError::new("format"));
    }
    Ok(())
}

pub fn validate_email_address(email: &str) -> Result<(), ValidationError> {
    validate_required(email)?;
    if !validator::validate_email(email) {
        return Err(ValidationError::new("email"));
    }
    Ok(())
}

pub fn validate_date(value: &str) -> Result<(), ValidationError> {
    validate_required(value)?;
    if date::parse_date(value).is_none() {
        return Err(ValidationError::new("date"));
    }
    Ok(())
}
