//! Domain error types.

mod media_error;
mod pipeline_error;

pub use media_error::MediaError;
pub use pipeline_error::{PipelineError, PipelineResult};
