//! Depth-buffered stereo projection geometry for autostereogram generation.
//!
//! This crate projects 3D geometry through an arbitrary oblique screen plane
//! onto per-eye depth buffers, then derives pixel-level correspondences
//! between the two projections. A pattern generator turns those
//! correspondences into the repeating texture of a single-image stereogram;
//! everything up to that point lives here.
//!
//! # Quick Start
//!
//! ```
//! use magiceye::prelude::*;
//!
//! // A 320x240 pair: eyes 14 units back, 2.5 apart, at the default 72 dpi.
//! let mut views = BiView::new(320, 240, 14.0, 2.5);
//!
//! // Background plane 8 units behind the screen, subject in front of it.
//! views.flatten(8.0);
//! views.draw_triangle(
//!     Vec3::new(-1.0, -0.5, 5.0),
//!     Vec3::new(1.0, -0.5, 5.0),
//!     Vec3::new(0.0, 0.8, 4.0),
//! );
//!
//! // Correspondences shift right by the disparity at each pixel's depth.
//! let pairs = StereoBlank::from_biview(&views);
//! assert!(pairs.get_right(10, 120) > 10);
//!
//! // Sampling lattice for seeding a repeating pattern.
//! let grid = pairs.isometric_grid(1);
//! assert!(grid.vgap() >= 1);
//! ```

pub mod biview;
pub mod math;
pub mod screen;
pub mod stereo;
pub mod view;

// Re-export the top-level types so simple uses don't need the module paths
pub use biview::BiView;
pub use screen::Screen;
pub use stereo::{IsometricGrid, StereoBlank};
pub use view::View;

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use magiceye::prelude::*;
/// ```
pub mod prelude {
    // Views
    pub use crate::biview::BiView;
    pub use crate::view::View;

    // Stereo correspondence
    pub use crate::stereo::{IsometricGrid, StereoBlank};

    // Geometry
    pub use crate::screen::Screen;

    // Math
    pub use crate::math::{Vec2, Vec3};
}
