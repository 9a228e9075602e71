pub mod render;
pub mod svg;
