//! Concrete constraint systems.

pub mod avm_mini;
