// Service exports
pub mod postgres;

pub use postgres::{ProgramStore, ProgramStoreError};
