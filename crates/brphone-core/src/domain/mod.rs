pub mod area_code;
pub mod phone;

pub use area_code::{is_valid_area_code, AreaCode, VALID_AREA_CODES};
pub use phone::{PhoneNumber, COUNTRY_CODE, MOBILE_PREFIX};
