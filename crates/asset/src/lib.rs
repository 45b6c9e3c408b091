//! Asset loading (shaders).
//! S1: the six built-in shader sources, embedded at compile time or read from disk.

pub mod shader;

pub use shader::{ShaderError, ShaderName, ShaderProgram, ShaderResult, ShaderStage, Shaders, lookup};
