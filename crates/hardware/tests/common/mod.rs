//! Shared test infrastructure.


/// Simulator harness.
pub mod harness;

pub use builder::instruction::InstructionBuilder;
pub use harness::TestContext;
