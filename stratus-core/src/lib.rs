mod params;
mod registration;
mod resources;

pub use params::*;
pub use registration::*;
pub use resources::*;
