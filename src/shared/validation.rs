use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationErrors;

lazy_static! {
    /// Regex for validating phone numbers
    /// Digits only, no separators or country prefix symbols
    /// - Valid: "5551234567", "0"
    /// - Invalid: "555-1234", "+15551234", "555 1234", ""
    pub static ref PHONE_REGEX: Regex = Regex::new(r"^[0-9]+$").unwrap();
}

/// Flatten `validator` errors into one message per failed rule, sorted by
/// field name so responses are stable.
pub fn error_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| match &err.message {
                Some(message) => message.to_string(),
                None => format!("{} is invalid ({})", field, err.code),
            })
        })
        .collect()
}
