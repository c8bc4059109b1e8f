//! pstat math utilities.

pub mod math;

pub use math::combinatorics::*;
pub use math::erf::{complementary_error_function, error_function};
pub use math::search::bisect;
