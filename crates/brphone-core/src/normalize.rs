//! Conversions between the phone representations found across lead sources:
//!
//! - storage form (legacy database): `553191156109`
//! - spreadsheet form: `+5531991156109`
//! - display form: `(31) 99115-6109`
//! - matching key: `5531991156109`
//!
//! Every function here is total. Inputs that cannot be normalized come back as
//! an empty string (matching key) or unchanged (form conversions); use
//! [`classify`] when the caller needs to tell those cases apart.

use crate::domain::{is_valid_area_code, PhoneNumber, COUNTRY_CODE, MOBILE_PREFIX};
use std::collections::BTreeSet;

const MIN_DIGITS: usize = 8;
const STORAGE_LEN: usize = 12;
const CANONICAL_LEN: usize = 13;
const NATIONAL_LEN: usize = 11;
const NATIONAL_NO_PREFIX_LEN: usize = 10;

/// Outcome of normalizing one raw phone string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchKey {
    /// A fully validated mobile number.
    Canonical(PhoneNumber),
    /// Cleaned digits that could not be verified; safe for exact joins only.
    Partial(String),
    /// Fewer than eight digits after cleaning.
    Unparseable,
}

impl MatchKey {
    pub fn phone(&self) -> Option<&PhoneNumber> {
        match self {
            MatchKey::Canonical(phone) => Some(phone),
            _ => None,
        }
    }

    pub fn is_canonical(&self) -> bool {
        matches!(self, MatchKey::Canonical(_))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            MatchKey::Canonical(_) => "canonical",
            MatchKey::Partial(_) => "partial",
            MatchKey::Unparseable => "unparseable",
        }
    }

    pub fn into_key(self) -> String {
        match self {
            MatchKey::Canonical(phone) => phone.canonical_key(),
            MatchKey::Partial(digits) => digits,
            MatchKey::Unparseable => String::new(),
        }
    }
}

pub fn classify(input: &str) -> MatchKey {
    let clean = digits(strip_domain(input));
    if clean.len() < MIN_DIGITS {
        return MatchKey::Unparseable;
    }

    let has_country = clean.starts_with(COUNTRY_CODE);
    let candidate = match clean.len() {
        // Storage form: the mobile prefix was dropped.
        STORAGE_LEN if has_country => PhoneNumber::new(&clean[2..4], &clean[4..]).ok(),
        CANONICAL_LEN if has_country => PhoneNumber::from_canonical(&clean).ok(),
        NATIONAL_NO_PREFIX_LEN => PhoneNumber::new(&clean[..2], &clean[2..]).ok(),
        NATIONAL_LEN if clean.as_bytes()[2] == MOBILE_PREFIX as u8 => {
            PhoneNumber::new(&clean[..2], &clean[3..]).ok()
        }
        _ => None,
    };

    match candidate {
        Some(phone) => MatchKey::Canonical(phone),
        None => MatchKey::Partial(clean),
    }
}

/// Canonical 13-digit key when the input is a valid mobile number, the cleaned
/// digits when it is not, and an empty string when nothing usable remains.
pub fn to_matching_key(input: &str) -> String {
    classify(input).into_key()
}

/// Drops the mobile prefix from a valid number; anything else is returned as given.
pub fn to_storage_form(input: &str) -> String {
    match classify(input) {
        MatchKey::Canonical(phone) => phone.storage_form(),
        _ => input.to_string(),
    }
}

/// Reinserts the mobile prefix into a 12-digit storage form: `+55AA9NNNNNNNN`.
pub fn to_spreadsheet_form(input: &str) -> String {
    match add_mobile_prefix(&digits(strip_domain(input))) {
        Some(full) => format!("+{full}"),
        None => input.to_string(),
    }
}

pub fn to_display_form(input: &str) -> String {
    match classify(input) {
        MatchKey::Canonical(phone) => phone.display_form(),
        MatchKey::Unparseable => input.to_string(),
        MatchKey::Partial(_) => {
            let raw = digits(input);
            match raw.len() {
                NATIONAL_LEN => {
                    let (area, rest) = raw.split_at(2);
                    let (prefix, local) = rest.split_at(1);
                    format!("({area}) {prefix}{}-{}", &local[..4], &local[4..])
                }
                NATIONAL_NO_PREFIX_LEN => {
                    let (area, local) = raw.split_at(2);
                    format!("({area}) {}-{}", &local[..4], &local[4..])
                }
                _ => input.to_string(),
            }
        }
    }
}

/// Value for a spreadsheet cell: `'+5531991156109`.
pub fn to_persistence_form(input: &str) -> String {
    match classify(input) {
        MatchKey::Canonical(phone) => phone.persistence_form(),
        MatchKey::Unparseable => input.to_string(),
        MatchKey::Partial(key) => {
            if let Some(full) = add_mobile_prefix(&key) {
                return format!("'+{full}");
            }
            let raw = digits(input);
            if raw.len() >= NATIONAL_LEN {
                return format!("'+{COUNTRY_CODE}{}", &raw[raw.len() - NATIONAL_LEN..]);
            }
            input.to_string()
        }
    }
}

/// Every representation a legacy record may have been stored under, sorted
/// and without duplicates.
pub fn generate_variants(input: &str) -> Vec<String> {
    let key = to_matching_key(input);
    if key.is_empty() {
        return Vec::new();
    }

    let mut variants = BTreeSet::new();
    if key.len() == CANONICAL_LEN {
        variants.extend(drop_mobile_prefix(&key));
    }
    if key.len() == STORAGE_LEN {
        variants.extend(add_mobile_prefix(&key));
    }
    if key.starts_with(COUNTRY_CODE) && key.len() == COUNTRY_CODE.len() + NATIONAL_LEN {
        variants.insert(key[COUNTRY_CODE.len()..].to_string());
    }
    if !key.starts_with(COUNTRY_CODE) && key.len() == NATIONAL_LEN {
        variants.insert(format!("{COUNTRY_CODE}{key}"));
    }
    variants.insert(key);
    variants.into_iter().collect()
}

pub fn is_valid_mobile_number(input: &str) -> bool {
    classify(input).is_canonical()
}

/// `5531991156109` -> `553191156109`. Checks the area code and prefix only.
fn drop_mobile_prefix(digits: &str) -> Option<String> {
    if digits.len() != CANONICAL_LEN || !digits.starts_with(COUNTRY_CODE) {
        return None;
    }
    let area = &digits[2..4];
    if !is_valid_area_code(area) || digits.as_bytes()[4] != MOBILE_PREFIX as u8 {
        return None;
    }
    Some(format!("{COUNTRY_CODE}{area}{}", &digits[5..]))
}

/// `553191156109` -> `5531991156109`. Checks the area code only.
fn add_mobile_prefix(digits: &str) -> Option<String> {
    if digits.len() != STORAGE_LEN || !digits.starts_with(COUNTRY_CODE) {
        return None;
    }
    let area = &digits[2..4];
    if !is_valid_area_code(area) {
        return None;
    }
    Some(format!("{COUNTRY_CODE}{area}{MOBILE_PREFIX}{}", &digits[4..]))
}

/// Chat handles look like `5531991156109@s.whatsapp.net`.
pub(crate) fn strip_domain(input: &str) -> &str {
    match input.split_once('@') {
        Some((head, _)) => head,
        None => input,
    }
}

pub(crate) fn digits(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}
