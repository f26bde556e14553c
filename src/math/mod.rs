//! Vector and linear-algebra primitives.
//!
//! Everything here is plain `f64` value math: two fixed-dimension vector
//! types and a small Gaussian-elimination routine. The projection layer
//! builds on these; nothing in this module knows about screens or buffers.

pub mod solve;
pub mod vec2;
pub mod vec3;

// Re-export the working set so callers don't need the submodule paths
pub use solve::solve;
pub use vec2::Vec2;
pub use vec3::Vec3;
