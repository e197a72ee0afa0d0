//! The surface sampling pipeline: tangent frames, disc samples, projection
//! onto scene geometry, and the conformed ring outline.

mod disc;
mod frame;
mod projector;
mod ring;

pub use disc::{sample_unit_disc, SampleDisc};
pub use frame::{TangentFrame, FRAME_EPSILON};
pub use projector::{SurfaceProjector, DEFAULT_CLEARANCE};
pub use ring::{RingBuilder, RingOutline, DEFAULT_RING_SEGMENTS, DEFAULT_SURFACE_OFFSET};
