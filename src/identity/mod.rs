mod resolver;

pub use resolver::{IdentityResolver, PlayerLookup};
