//! Shader program management: stage compilation, program linking, and the
//! registry of named vertex×fragment combinations.

pub mod compiler;
pub mod registry;

pub use compiler::{compile_stage, create_program, CompiledStage};
pub use registry::{composite_key, ProgramRegistry};

use std::path::PathBuf;
use thiserror::Error;

/// The two stages a shader program links together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageKind {
    Vertex,
    Fragment,
}

impl StageKind {
    pub(crate) fn naga_stage(self) -> naga::ShaderStage {
        match self {
            StageKind::Vertex => naga::ShaderStage::Vertex,
            StageKind::Fragment => naga::ShaderStage::Fragment,
        }
    }
}

impl std::fmt::Display for StageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StageKind::Vertex => write!(f, "vertex"),
            StageKind::Fragment => write!(f, "fragment"),
        }
    }
}

/// Errors from the shader subsystem.
///
/// Per-variant errors are contained at the registry boundary: a variant that
/// fails to read, compile, or link is logged and skipped, never fatal to the
/// rest of the build.
#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("failed to read shader source {path:?}")]
    SourceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{kind} shader failed to compile: {log}")]
    Compile { kind: StageKind, log: String },

    #[error("shader program '{name}' failed to link: {log}")]
    Link { name: String, log: String },

    #[error("shader program '{name}' not found")]
    NotFound { name: String },
}
