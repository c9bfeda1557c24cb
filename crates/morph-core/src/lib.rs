//! Platform-independent core of the scroll-driven particle sections.
//!
//! Shapes, progress plumbing, interpolation and the two scene types live
//! here so they can be exercised on the host; the web crate only wires
//! them to the DOM and the GPU.

pub mod camera;
pub mod constants;
pub mod error;
pub mod guides;
pub mod morph;
pub mod progress;
pub mod scene;
pub mod shape;
pub mod viewport;

pub use camera::*;
pub use constants::*;
pub use error::*;
pub use guides::*;
pub use morph::*;
pub use progress::*;
pub use scene::*;
pub use shape::*;
pub use viewport::*;
