pub mod domain;
pub mod error;
pub mod matching;
pub mod memo;
pub mod normalize;
pub mod report;

pub use domain::*;
pub use error::CoreError;
pub use matching::{MatchKind, MatchOutcome, MatchReport, MatchStats, PhoneIndex, PhoneMatch};
pub use memo::Memoized;
pub use normalize::{
    classify, generate_variants, is_valid_mobile_number, to_display_form, to_matching_key,
    to_persistence_form, to_spreadsheet_form, to_storage_form, MatchKey,
};
pub use report::PhoneReport;
