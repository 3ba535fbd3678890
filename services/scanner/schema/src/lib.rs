//! sea-orm entities for the scanner service tables.

pub mod doors;
pub mod exit_logs;
pub mod operators;
pub mod students;
