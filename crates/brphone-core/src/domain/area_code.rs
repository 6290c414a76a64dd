use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Brazilian DDD codes accepted for mobile numbers.
pub const VALID_AREA_CODES: [&str; 67] = [
    // São Paulo
    "11", "12", "13", "14", "15", "16", "17", "18", "19",
    // Rio de Janeiro / Espírito Santo
    "21", "22", "24", "27", "28",
    // Minas Gerais
    "31", "32", "33", "34", "35", "37", "38",
    // Paraná / Santa Catarina
    "41", "42", "43", "44", "45", "46", "47", "48", "49",
    // Rio Grande do Sul
    "51", "53", "54", "55",
    // Centro-Oeste
    "61", "62", "63", "64", "65", "66", "67", "68", "69",
    // Bahia / Sergipe
    "71", "73", "74", "75", "77", "79",
    // Nordeste
    "81", "82", "83", "84", "85", "86", "87", "88", "89",
    // Norte
    "91", "92", "93", "94", "95", "96", "97", "98", "99",
];

pub fn is_valid_area_code(code: &str) -> bool {
    VALID_AREA_CODES.contains(&code)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AreaCode([u8; 2]);

impl AreaCode {
    pub fn new(raw: &str) -> Result<Self, CoreError> {
        if !is_valid_area_code(raw) {
            return Err(CoreError::InvalidAreaCode(raw.to_string()));
        }
        let bytes = raw.as_bytes();
        Ok(Self([bytes[0], bytes[1]]))
    }

    pub fn as_str(&self) -> &str {
        // Only ASCII digits are ever stored.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl fmt::Display for AreaCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for AreaCode {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<AreaCode> for String {
    fn from(value: AreaCode) -> Self {
        value.as_str().to_string()
    }
}
