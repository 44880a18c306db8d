pub mod chain;
pub mod gate;
pub mod role;
pub mod rule;
