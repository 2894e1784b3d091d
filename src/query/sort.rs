use std::cmp::Ordering;
use std::fmt;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::core::{CompressionAlgorithm, DerivedGameRecord};

/// Orderings offered by the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    NameAsc,
    NameDesc,
    SizeDesc,
    SizeAsc,
    /// Compressed size for one algorithm, smallest first
    AlgorithmSizeAsc(CompressionAlgorithm),
    /// Savings for one algorithm, largest first
    AlgorithmSavingsDesc(CompressionAlgorithm),
}

impl Default for SortKey {
    fn default() -> Self {
        SortKey::NameAsc
    }
}

impl SortKey {
    /// Every key, in the order a picker would list them
    pub fn all() -> Vec<SortKey> {
        let mut keys = vec![SortKey::NameAsc, SortKey::NameDesc, SortKey::SizeDesc, SortKey::SizeAsc];
        for alg in CompressionAlgorithm::ALL {
            keys.push(SortKey::AlgorithmSizeAsc(alg));
            keys.push(SortKey::AlgorithmSavingsDesc(alg));
        }
        keys
    }

    /// Parse a key such as `name_asc` or `lzx_ratio_desc`.
    ///
    /// Unknown keys yield `None`, which callers treat as "keep current order".
    pub fn parse(value: &str) -> Option<SortKey> {
        let value = value.trim();
        match value {
            "name_asc" => return Some(SortKey::NameAsc),
            "name_desc" => return Some(SortKey::NameDesc),
            "size_desc" => return Some(SortKey::SizeDesc),
            "size_asc" => return Some(SortKey::SizeAsc),
            _ => {}
        }

        CompressionAlgorithm::ALL.iter().find_map(|&alg| {
            let rest = value.strip_prefix(alg.slug())?;
            match rest {
                "_size_asc" => Some(SortKey::AlgorithmSizeAsc(alg)),
                "_ratio_desc" => Some(SortKey::AlgorithmSavingsDesc(alg)),
                _ => None,
            }
        })
    }

    /// Compare two records under this key
    pub fn compare(self, a: &DerivedGameRecord, b: &DerivedGameRecord) -> Ordering {
        match self {
            SortKey::NameAsc => compare_names(a.name(), b.name()),
            SortKey::NameDesc => compare_names(b.name(), a.name()),
            SortKey::SizeDesc => b.original_size.cmp(&a.original_size),
            SortKey::SizeAsc => a.original_size.cmp(&b.original_size),
            SortKey::AlgorithmSizeAsc(alg) => missing_last(
                a.result(alg).map(|r| r.after_bytes),
                b.result(alg).map(|r| r.after_bytes),
                |x, y| x.cmp(&y),
            ),
            SortKey::AlgorithmSavingsDesc(alg) => missing_last(
                a.result(alg).map(|r| r.savings),
                b.result(alg).map(|r| r.savings),
                |x, y| y.total_cmp(&x),
            ),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::NameAsc => f.write_str("name_asc"),
            SortKey::NameDesc => f.write_str("name_desc"),
            SortKey::SizeDesc => f.write_str("size_desc"),
            SortKey::SizeAsc => f.write_str("size_asc"),
            SortKey::AlgorithmSizeAsc(alg) => write!(f, "{}_size_asc", alg.slug()),
            SortKey::AlgorithmSavingsDesc(alg) => write!(f, "{}_ratio_desc", alg.slug()),
        }
    }
}

/// Lowercased name with diacritics removed, so "Éclair" files under E
fn fold_name(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Accent- and case-insensitive name order.
///
/// Ties break on the lowercased name, then on the raw strings, so the
/// order is total.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    fold_name(a)
        .cmp(&fold_name(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| a.cmp(b))
}

fn missing_last<T: Copy>(a: Option<T>, b: Option<T>, present: impl Fn(T, T) -> Ordering) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => present(x, y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Stable sort in place; `None` leaves the order untouched
pub fn sort_records(records: &mut [&DerivedGameRecord], key: Option<SortKey>) {
    if let Some(key) = key {
        records.sort_by(|a, b| key.compare(a, b));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RawGameRecord;

    #[test]
    fn test_parse_all_keys() {
        for key in SortKey::all() {
            assert_eq!(SortKey::parse(&key.to_string()), Some(key));
        }
        assert_eq!(SortKey::all().len(), 12);
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(SortKey::parse("popularity"), None);
        assert_eq!(SortKey::parse("lzx_size_desc"), None);
        assert_eq!(SortKey::parse(""), None);
    }

    #[test]
    fn test_compare_names() {
        assert_eq!(compare_names("alpha", "Beta"), Ordering::Less);
        assert_eq!(compare_names("Zeta", "alpha"), Ordering::Greater);
        assert_eq!(compare_names("Same", "Same"), Ordering::Equal);
        assert_eq!(compare_names("Éclair", "Zeta"), Ordering::Less);
        assert_eq!(compare_names("Pokémon", "Pokemon"), Ordering::Greater);
    }

    #[test]
    fn test_savings_missing_ranks_below_negative() {
        // after > before gives negative savings; still above a missing result
        let worse = DerivedGameRecord::from_raw(
            &RawGameRecord::new("1", "Grew").with_result(CompressionAlgorithm::Lzx, 100, 120),
        );
        let missing = DerivedGameRecord::from_raw(&RawGameRecord::new("2", "None"));

        let key = SortKey::AlgorithmSavingsDesc(CompressionAlgorithm::Lzx);
        assert_eq!(key.compare(&worse, &missing), Ordering::Less);
        assert_eq!(key.compare(&missing, &worse), Ordering::Greater);
    }

    #[test]
    fn test_unknown_key_keeps_order() {
        let a = DerivedGameRecord::from_raw(&RawGameRecord::new("1", "Zed"));
        let b = DerivedGameRecord::from_raw(&RawGameRecord::new("2", "Abe"));
        let mut records = vec![&a, &b];

        sort_records(&mut records, SortKey::parse("bogus"));
        assert_eq!(records[0].name(), "Zed");

        sort_records(&mut records, Some(SortKey::NameAsc));
        assert_eq!(records[0].name(), "Abe");
    }

    #[test]
    fn test_accented_names_sort_with_their_base_letter() {
        let records: Vec<DerivedGameRecord> = ["Zeta", "Ōkami HD", "Éclair", "Alpha"]
            .iter()
            .enumerate()
            .map(|(i, name)| DerivedGameRecord::from_raw(&RawGameRecord::new(i.to_string(), *name)))
            .collect();
        let mut refs: Vec<&DerivedGameRecord> = records.iter().collect();

        sort_records(&mut refs, Some(SortKey::NameAsc));
        let names: Vec<&str> = refs.iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["Alpha", "Éclair", "Ōkami HD", "Zeta"]);
    }
}
