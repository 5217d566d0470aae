pub mod easing;
pub mod lnglat;
pub mod time;

// Foundation crate: small, well-tested primitives only.
pub use easing::*;
pub use lnglat::*;
pub use time::*;
