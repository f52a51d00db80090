//! Data models shared by the handler and its collaborators

mod display;
mod selection;

pub use display::*;
pub use selection::*;
