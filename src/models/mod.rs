pub mod image;
pub mod request;
pub mod summary;

pub use image::*;
pub use request::*;
pub use summary::*;
