pub use player::*;
pub use status::*;

mod player;
mod status;
