pub mod generation;
pub mod image;
pub mod style;
pub mod video;
pub mod wire;

pub use generation::*;
pub use image::*;
pub use style::*;
pub use video::*;
pub use wire::*;
