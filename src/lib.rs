pub mod error;
pub mod math;
pub mod sampling;
pub mod scene;
pub mod tool;

pub use error::{Result, ScatterError};
