
/// Control flow, prediction and held fetch faults.
pub mod control_flow;


/// Renaming, operand resolution and structural stalls in the Tomasulo engine.
pub mod o3_scheduling;
