pub mod audio;
pub mod entity;
pub mod generation;
