use fx_handle::Handle;

pub use config::*;
pub use debounce::*;
pub use errors::*;
pub use models::*;
pub use normalizer::*;

mod config;
mod debounce;
mod errors;
mod models;
mod normalizer;

/// The unique identifier handle of a status normalizer instance.
pub type NormalizerHandle = Handle;
