pub mod arena;
pub mod bounds;
pub mod geo;
pub mod handles;
pub mod ids;
pub mod math;

// Foundation crate: small, well-tested primitives only.
pub use arena::*;
pub use bounds::*;
pub use geo::*;
pub use handles::*;
pub use ids::*;
