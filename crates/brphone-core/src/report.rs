use crate::normalize::{
    classify, digits, generate_variants, to_display_form, to_persistence_form,
    to_spreadsheet_form, to_storage_form,
};
use serde::Serialize;

/// Every representation derived from one raw input, for troubleshooting joins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhoneReport {
    pub original: String,
    pub kind: &'static str,
    pub matching_key: String,
    pub storage_form: String,
    pub spreadsheet_form: String,
    pub persistence_form: String,
    pub display_form: String,
    pub variants: Vec<String>,
    pub is_valid: bool,
}

impl PhoneReport {
    pub fn new(input: &str) -> Self {
        let key = classify(input);
        let kind = key.kind();
        let is_valid = key.is_canonical();
        let spreadsheet_form = if digits(input).len() == 12 {
            to_spreadsheet_form(input)
        } else {
            String::new()
        };

        Self {
            original: input.to_string(),
            kind,
            matching_key: key.into_key(),
            storage_form: to_storage_form(input),
            spreadsheet_form,
            persistence_form: to_persistence_form(input),
            display_form: to_display_form(input),
            variants: generate_variants(input),
            is_valid,
        }
    }
}
