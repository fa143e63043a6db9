pub mod orchestration;
pub mod analysis;

pub use orchestration::*;
pub use analysis::*;
