//! Persistence entities for the repair desk catalog and intake flow.
//!
//! Each module holds one SeaORM entity plus the field validators and insert
//! helpers that belong to it. Business rules spanning several tables live in
//! the `service` crate.

pub mod errors;
pub mod db;
pub mod brand;
pub mod device_model;
pub mod repair_type;
pub mod price_override;
pub mod booking;
pub mod booking_line;
pub mod contact_message;

#[cfg(test)]
mod tests;

/// Trim a required display name and enforce the column length.
pub(crate) fn required_name(field: &str, value: &str, max_len: usize) -> Result<String, errors::ModelError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(errors::ModelError::Validation(format!("{field} required")));
    }
    if trimmed.chars().count() > max_len {
        return Err(errors::ModelError::Validation(format!("{field} longer than {max_len} characters")));
    }
    Ok(trimmed.to_string())
}
