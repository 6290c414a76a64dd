use crate::domain::area_code::AreaCode;
use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const COUNTRY_CODE: &str = "55";
pub const MOBILE_PREFIX: char = '9';

const LOCAL_LEN: usize = 8;
const CANONICAL_LEN: usize = 13;

/// A Brazilian mobile number that satisfies every validity rule: whitelisted
/// area code, `9` mobile prefix, and an 8-digit local number starting with 6-9.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber {
    area: AreaCode,
    local: String,
}

impl PhoneNumber {
    pub fn new(area: &str, local: &str) -> Result<Self, CoreError> {
        let area = AreaCode::new(area)?;
        if !is_mobile_local(local) {
            return Err(CoreError::InvalidLocalNumber(local.to_string()));
        }
        Ok(Self {
            area,
            local: local.to_string(),
        })
    }

    /// Parses `55 + area + 9 + local`, with or without a leading `+`.
    pub fn from_canonical(raw: &str) -> Result<Self, CoreError> {
        let digits = raw.strip_prefix('+').unwrap_or(raw);
        if digits.len() != CANONICAL_LEN || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CoreError::InvalidLength {
                expected: CANONICAL_LEN,
                actual: digits.chars().filter(char::is_ascii_digit).count(),
            });
        }
        if &digits[..2] != COUNTRY_CODE {
            return Err(CoreError::InvalidCountryCode(digits[..2].to_string()));
        }
        if digits.as_bytes()[4] != MOBILE_PREFIX as u8 {
            return Err(CoreError::MissingMobilePrefix);
        }
        Self::new(&digits[2..4], &digits[5..])
    }

    pub fn area_code(&self) -> AreaCode {
        self.area
    }

    pub fn local_number(&self) -> &str {
        &self.local
    }

    /// `5531991156109`
    pub fn canonical_key(&self) -> String {
        format!("{COUNTRY_CODE}{}{MOBILE_PREFIX}{}", self.area, self.local)
    }

    /// Legacy database form without the mobile prefix: `553191156109`.
    pub fn storage_form(&self) -> String {
        format!("{COUNTRY_CODE}{}{}", self.area, self.local)
    }

    /// `+5531991156109`
    pub fn spreadsheet_form(&self) -> String {
        format!("+{}", self.canonical_key())
    }

    /// `(31) 99115-6109`
    pub fn display_form(&self) -> String {
        let (head, tail) = self.local.split_at(4);
        format!("({}) {MOBILE_PREFIX}{head}-{tail}", self.area)
    }

    /// Spreadsheet cell value; the apostrophe keeps the leading `+` from being
    /// read as a formula.
    pub fn persistence_form(&self) -> String {
        format!("'{}", self.spreadsheet_form())
    }

    /// Country-less form: `31991156109`
    pub fn national_form(&self) -> String {
        format!("{}{MOBILE_PREFIX}{}", self.area, self.local)
    }
}

pub(crate) fn is_mobile_local(local: &str) -> bool {
    local.len() == LOCAL_LEN
        && local.bytes().all(|b| b.is_ascii_digit())
        && matches!(local.as_bytes()[0], b'6'..=b'9')
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical_key())
    }
}

impl FromStr for PhoneNumber {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_canonical(s.trim())
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_canonical(&value)
    }
}

impl From<PhoneNumber> for String {
    fn from(value: PhoneNumber) -> Self {
        value.canonical_key()
    }
}
