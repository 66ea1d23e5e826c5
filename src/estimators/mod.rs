pub mod approaches;
pub mod info_theory;
pub mod mutual_information;
pub mod traits;

pub use info_theory::InfoTheory;
pub use traits::{ColumnStore, DatasetShape};
