pub mod level_file;
pub mod render;
pub mod seed;
