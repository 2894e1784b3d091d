use crate::core::game_record::{CompressionAlgorithm, RawGameRecord};

/// Per-algorithm result with its savings percentage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlgorithmResult {
    pub before_bytes: u64,
    pub after_bytes: u64,
    /// Percentage saved relative to `before_bytes`, 0 when `before_bytes` is 0
    pub savings: f64,
}

impl AlgorithmResult {
    pub fn new(before_bytes: u64, after_bytes: u64) -> Self {
        Self {
            before_bytes,
            after_bytes,
            savings: savings_percent(before_bytes, after_bytes),
        }
    }
}

/// `(1 - after / before) * 100`, defined as 0 for an empty input
pub fn savings_percent(before_bytes: u64, after_bytes: u64) -> f64 {
    if before_bytes == 0 {
        return 0.0;
    }
    (1.0 - after_bytes as f64 / before_bytes as f64) * 100.0
}

/// Raw record plus the values the catalog sorts and renders by
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedGameRecord {
    pub raw: RawGameRecord,
    /// Largest `BeforeBytes` across all results, 0 without results
    pub original_size: u64,
    results: [Option<AlgorithmResult>; 4],
}

impl DerivedGameRecord {
    pub fn from_raw(raw: &RawGameRecord) -> Self {
        let original_size = raw
            .compression_results
            .iter()
            .map(|r| r.before_bytes)
            .max()
            .unwrap_or(0);

        let mut results = [None; 4];
        for result in &raw.compression_results {
            match result.algorithm() {
                // later entries for the same algorithm replace earlier ones
                Some(algorithm) => {
                    results[algorithm.index()] =
                        Some(AlgorithmResult::new(result.before_bytes, result.after_bytes));
                }
                None => {
                    tracing::debug!(
                        "Ignoring unknown CompType {} for {}",
                        result.comp_type,
                        raw.game_name
                    );
                }
            }
        }

        Self {
            raw: raw.clone(),
            original_size,
            results,
        }
    }

    pub fn name(&self) -> &str {
        &self.raw.game_name
    }

    pub fn steam_id(&self) -> &str {
        &self.raw.steam_id
    }

    /// Result for one algorithm, if it was measured
    pub fn result(&self, algorithm: CompressionAlgorithm) -> Option<&AlgorithmResult> {
        self.results[algorithm.index()].as_ref()
    }

    /// Measured results in algorithm order
    pub fn results(&self) -> impl Iterator<Item = (CompressionAlgorithm, &AlgorithmResult)> {
        CompressionAlgorithm::ALL
            .into_iter()
            .filter_map(move |alg| self.result(alg).map(|r| (alg, r)))
    }

    pub fn has_results(&self) -> bool {
        self.results.iter().any(Option::is_some)
    }
}

/// Derive every record, preserving input order
pub fn derive_all(raw_records: &[RawGameRecord]) -> Vec<DerivedGameRecord> {
    raw_records.iter().map(DerivedGameRecord::from_raw).collect()
}
