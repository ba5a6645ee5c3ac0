pub mod color;
pub mod geometry;
pub mod image_buf;
pub mod pipeline;
pub mod presets;
