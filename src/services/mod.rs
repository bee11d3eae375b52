pub mod server;
pub mod tiering;

pub use tiering::{TierService, TierUpdate};
