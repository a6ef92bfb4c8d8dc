//! Store layer - the application state machine and the actor that owns it

pub mod actor;
pub mod commands;
pub mod state;

pub use actor::StoreActor;
pub use state::{Notice, NoticeLevel, Store};
