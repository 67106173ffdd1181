//! Domain model for multi-tenant transit line definitions.

pub mod booking;
pub mod day_type;
pub mod identifier;
pub mod journey;
pub mod line;
pub mod provider;

pub use booking::*;
pub use day_type::*;
pub use identifier::*;
pub use journey::*;
pub use line::*;
pub use provider::*;
