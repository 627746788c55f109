pub mod canvas;
pub mod color;
pub mod field_lines;
pub mod potential_map;
pub mod scene;
#[cfg(feature = "vectors")]
pub mod vector;
