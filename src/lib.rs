pub mod dimred;
pub mod error;
mod utils;

pub use error::PcaError;
pub use utils::FloatOps;
