pub mod verification;

pub use verification::*;
