//! Joins phones seen in conversation logs against spreadsheet rows whose phone
//! column was filled in under different conventions over time.

use crate::normalize::{generate_variants, strip_domain};
use serde::Serialize;
use std::collections::HashMap;

const SUFFIX_LEN: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    /// One of the variants matched a variant of the record.
    Exact,
    /// Only the last eight digits matched.
    Last8,
}

impl MatchKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MatchKind::Exact => "exact",
            MatchKind::Last8 => "last8",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PhoneMatch {
    /// Position of the record in the indexed sequence.
    pub record: usize,
    pub kind: MatchKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchOutcome {
    pub input: String,
    pub matched: Option<PhoneMatch>,
}

impl MatchOutcome {
    pub fn match_type(&self) -> &'static str {
        match self.matched {
            Some(found) => found.kind.as_str(),
            None => "unmatched",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MatchStats {
    pub exact: usize,
    pub last8: usize,
    pub unmatched: usize,
}

impl MatchStats {
    pub fn total(&self) -> usize {
        self.exact + self.last8 + self.unmatched
    }

    /// Matched share of all lookups, as a percentage. Zero when nothing was looked up.
    pub fn match_rate(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        (self.exact + self.last8) as f64 / total as f64 * 100.0
    }

    fn record(&mut self, matched: Option<PhoneMatch>) {
        match matched.map(|found| found.kind) {
            Some(MatchKind::Exact) => self.exact += 1,
            Some(MatchKind::Last8) => self.last8 += 1,
            None => self.unmatched += 1,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MatchReport {
    pub outcomes: Vec<MatchOutcome>,
    pub stats: MatchStats,
}

#[derive(Debug, Clone, Default)]
pub struct PhoneIndex {
    variants: HashMap<String, usize>,
    suffixes: HashMap<String, usize>,
    last8_disabled: bool,
}

impl PhoneIndex {
    /// Indexes records by position. The first record to claim a variant (or a
    /// last-8 suffix) keeps it.
    pub fn build<I, S>(phones: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut index = Self::default();
        for (record, phone) in phones.into_iter().enumerate() {
            for variant in generate_variants(phone.as_ref()) {
                if let Some(suffix) = last8(&variant) {
                    index.suffixes.entry(suffix.to_string()).or_insert(record);
                }
                index.variants.entry(variant).or_insert(record);
            }
        }
        index
    }

    pub fn with_last8(mut self, enabled: bool) -> Self {
        self.last8_disabled = !enabled;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    pub fn variant_count(&self) -> usize {
        self.variants.len()
    }

    pub fn lookup(&self, phone: &str) -> Option<PhoneMatch> {
        let variants = generate_variants(strip_domain(phone));

        let exact = variants
            .iter()
            .find_map(|variant| self.variants.get(variant))
            .map(|&record| PhoneMatch {
                record,
                kind: MatchKind::Exact,
            });
        if exact.is_some() || self.last8_disabled {
            return exact;
        }

        variants
            .iter()
            .filter_map(|variant| last8(variant))
            .find_map(|suffix| self.suffixes.get(suffix))
            .map(|&record| PhoneMatch {
                record,
                kind: MatchKind::Last8,
            })
    }

    pub fn match_all<I, S>(&self, phones: I) -> MatchReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut report = MatchReport::default();
        for phone in phones {
            let phone = phone.as_ref();
            let matched = self.lookup(phone);
            report.stats.record(matched);
            report.outcomes.push(MatchOutcome {
                input: phone.to_string(),
                matched,
            });
        }
        report
    }
}

fn last8(variant: &str) -> Option<&str> {
    variant
        .len()
        .checked_sub(SUFFIX_LEN)
        .map(|start| &variant[start..])
}

#[cfg(test)]
mod tests {
    use super::{MatchKind, PhoneIndex, PhoneMatch};

    fn sheet() -> PhoneIndex {
        PhoneIndex::build(["+5531991156109", "", "(11) 98765-4321", "+5531991156109"])
    }

    #[test]
    fn exact_match_across_formats() {
        let index = sheet();
        assert_eq!(
            index.lookup("553191156109@s.whatsapp.net"),
            Some(PhoneMatch {
                record: 0,
                kind: MatchKind::Exact
            })
        );
        assert_eq!(index.lookup("11987654321").map(|m| m.record), Some(2));
    }

    #[test]
    fn first_record_wins_duplicates() {
        let index = sheet();
        assert_eq!(index.lookup("31991156109").map(|m| m.record), Some(0));
    }

    #[test]
    fn falls_back_to_last_eight_digits() {
        let index = sheet();
        let found = index.lookup("+1 305 91156109").expect("match");
        assert_eq!(found.kind, MatchKind::Last8);
        assert_eq!(found.record, 0);
    }

    #[test]
    fn last8_fallback_can_be_disabled() {
        let index = sheet().with_last8(false);
        assert!(index.lookup("+1 305 91156109").is_none());
    }

    #[test]
    fn match_all_collects_stats() {
        let index = sheet();
        let report = index.match_all(["5531991156109", "1230591156109", "5521988887777", ""]);
        assert_eq!(report.stats.exact, 1);
        assert_eq!(report.stats.last8, 1);
        assert_eq!(report.stats.unmatched, 2);
        assert_eq!(report.outcomes[0].match_type(), "exact");
        assert_eq!(report.outcomes[1].match_type(), "last8");
        assert_eq!(report.outcomes[3].match_type(), "unmatched");
        assert!((report.stats.match_rate() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_index_matches_nothing() {
        let index = PhoneIndex::build(Vec::<String>::new());
        assert!(index.is_empty());
        assert!(index.lookup("5531991156109").is_none());
        assert_eq!(index.match_all(Vec::<&str>::new()).stats.match_rate(), 0.0);
    }
}
