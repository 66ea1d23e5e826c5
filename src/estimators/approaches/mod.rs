pub mod discrete;

// Unified re-exports so tests and users can import
// infosel::estimators::approaches::* ergonomically.
pub use discrete::cardinality::CardinalityTable;
pub use discrete::dense::{DenseBlock, DenseColumns};
pub use discrete::histogram::{ConditionalHistogram, CountHistogram};
pub use discrete::probability::ProbabilityTables;
pub use discrete::sparse::{SparseColumn, SparseColumns};
pub use discrete::{Redundancy, mutual_information, redundancy};
