// Worker modules
pub mod core;
pub mod history;
pub mod snapshot;
