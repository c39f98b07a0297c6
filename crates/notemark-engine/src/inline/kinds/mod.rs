//! Delimiter and format knowledge of the individual built-in tags.

pub mod html;
pub mod link;
pub mod math;
pub mod media;
pub mod youtube;

pub use html::Html;
pub use link::Link;
pub use math::Math;
pub use media::{MediaSize, compute_media_size, format_dimension, parse_dimension};
pub use youtube::YouTube;
