//! Cubist: a rotating cube whose vertex and fragment shaders can be swapped
//! at runtime through an on-screen control panel.

pub mod camera;
pub mod config;
pub mod cube;
pub mod renderer;
pub mod shader;
pub mod ui;
