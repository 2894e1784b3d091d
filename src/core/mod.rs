pub mod derived;
pub mod game_record;

pub use derived::{derive_all, savings_percent, AlgorithmResult, DerivedGameRecord};
pub use game_record::{parse_dataset, CompressionAlgorithm, CompressionResult, RawGameRecord};
