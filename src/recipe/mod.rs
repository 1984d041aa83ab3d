// src/recipe/mod.rs

//! BitBake recipe generation

mod emitter;

pub use emitter::{bb_name, Emitter, PythonVariant};
