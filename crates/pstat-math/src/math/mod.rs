//! Core math modules.

pub mod combinatorics;
pub mod erf;
pub mod search;
