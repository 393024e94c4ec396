/// Pipeline behaviour on both backends.
pub mod pipeline;
