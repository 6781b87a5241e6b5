//! Agent System
//! 
//! - **Safety Agent**: sends an incident photo with a fixed prompt to the
//!   model and returns its immediate-safety instructions

pub mod safety;

pub use safety::{SafetyAgent, SAFETY_PROMPT};
