//! Core data types for Proxima.

mod id;
mod neighbor;

pub use id::{ItemId, UserSlot};
pub use neighbor::Neighbor;
