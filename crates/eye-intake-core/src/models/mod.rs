//! Domain models for the intake form.

mod choice;
mod entries;
mod record;
mod registration;

pub use choice::*;
pub use entries::*;
pub use record::*;
pub use registration::*;
