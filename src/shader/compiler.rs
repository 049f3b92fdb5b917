//! GLSL stage compilation via naga.
//!
//! "Compiling" a stage parses and validates the GLSL source and lowers it to
//! WGSL; this is where compile diagnostics surface. Linking the two stages
//! into a GPU pipeline happens in the renderer, which owns the device, so
//! `create_program` takes the link step as an injected function.

use super::{ShaderError, StageKind};
use naga::front::glsl::{Frontend, Options};
use naga::valid::{Capabilities, ValidationFlags, Validator};
use std::fs;
use std::path::Path;
use tracing::debug;

/// A compiled shader stage, ready to be linked into a program.
///
/// Consumed by value when linking; nothing retains a stage after its program
/// is built.
#[derive(Debug, Clone)]
pub struct CompiledStage {
    pub kind: StageKind,
    pub wgsl: String,
}

/// Compiles one GLSL stage to WGSL, surfacing any diagnostic in the error.
pub fn compile_stage(source: &str, kind: StageKind) -> Result<CompiledStage, ShaderError> {
    let mut frontend = Frontend::default();
    let options = Options::from(kind.naga_stage());

    let module = frontend
        .parse(&options, source)
        .map_err(|e| ShaderError::Compile {
            kind,
            log: e.emit_to_string(source),
        })?;

    // An empty or truncated file parses as a module with no entry point.
    if module.entry_points.is_empty() {
        return Err(ShaderError::Compile {
            kind,
            log: "no entry point found (expected `main`)".to_string(),
        });
    }

    let mut validator = Validator::new(ValidationFlags::all(), Capabilities::all());
    let info = validator
        .validate(&module)
        .map_err(|e| ShaderError::Compile {
            kind,
            log: e.emit_to_string(source),
        })?;

    let wgsl = naga::back::wgsl::write_string(&module, &info, naga::back::wgsl::WriterFlags::empty())
        .map_err(|e| ShaderError::Compile {
            kind,
            log: e.to_string(),
        })?;

    Ok(CompiledStage { kind, wgsl })
}

/// Reads, compiles, and links one vertex/fragment pair into a program.
///
/// Short-circuits at the first failing step. The caller decides what a
/// linked program is by supplying `link`; on the GPU path this creates a
/// render pipeline, in tests it can be anything.
pub fn create_program<P>(
    name: &str,
    vertex_path: &Path,
    fragment_path: &Path,
    link: impl FnOnce(CompiledStage, CompiledStage) -> Result<P, ShaderError>,
) -> Result<P, ShaderError> {
    let vertex_source = read_stage_source(vertex_path)?;
    let fragment_source = read_stage_source(fragment_path)?;

    let vertex = compile_stage(&vertex_source, StageKind::Vertex)?;
    let fragment = compile_stage(&fragment_source, StageKind::Fragment)?;
    debug!(name, "compiled vertex and fragment stages");

    link(vertex, fragment)
}

fn read_stage_source(path: &Path) -> Result<String, ShaderError> {
    fs::read_to_string(path).map_err(|source| ShaderError::SourceRead {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL_VERTEX: &str = r#"
#version 450
layout(location = 0) in vec3 position;
void main() {
    gl_Position = vec4(position, 1.0);
}
"#;

    const MINIMAL_FRAGMENT: &str = r#"
#version 450
layout(location = 0) out vec4 fragColor;
void main() {
    fragColor = vec4(1.0, 0.0, 0.0, 1.0);
}
"#;

    #[test]
    fn compiles_minimal_vertex_stage() {
        let stage = compile_stage(MINIMAL_VERTEX, StageKind::Vertex).unwrap();
        assert_eq!(stage.kind, StageKind::Vertex);
        assert!(!stage.wgsl.is_empty());
    }

    #[test]
    fn compiles_minimal_fragment_stage() {
        let stage = compile_stage(MINIMAL_FRAGMENT, StageKind::Fragment).unwrap();
        assert_eq!(stage.kind, StageKind::Fragment);
        assert!(stage.wgsl.contains("fn main"));
    }

    #[test]
    fn syntax_error_surfaces_diagnostic() {
        let broken = "#version 450\nvoid main( {\n";
        let err = compile_stage(broken, StageKind::Fragment).unwrap_err();
        match err {
            ShaderError::Compile { kind, log } => {
                assert_eq!(kind, StageKind::Fragment);
                assert!(!log.is_empty());
            }
            other => panic!("expected compile error, got {other}"),
        }
    }

    #[test]
    fn empty_source_fails_compilation() {
        assert!(compile_stage("", StageKind::Vertex).is_err());
    }

    #[test]
    fn create_program_short_circuits_on_missing_file() {
        let mut linked = false;
        let result = create_program::<u32>(
            "missing_missing",
            Path::new("no/such/file.vert"),
            Path::new("no/such/file.frag"),
            |_, _| {
                linked = true;
                Ok(0)
            },
        );
        assert!(matches!(result, Err(ShaderError::SourceRead { .. })));
        assert!(!linked);
    }

    #[test]
    fn default_shader_files_all_compile() {
        let root = Path::new(env!("CARGO_MANIFEST_DIR"));
        let paths = crate::config::ShaderPaths::default();
        for (name, path) in &paths.vertex {
            let source = fs::read_to_string(root.join(path)).unwrap();
            compile_stage(&source, StageKind::Vertex)
                .unwrap_or_else(|e| panic!("vertex shader '{name}' failed: {e}"));
        }
        for (name, path) in &paths.fragment {
            let source = fs::read_to_string(root.join(path)).unwrap();
            compile_stage(&source, StageKind::Fragment)
                .unwrap_or_else(|e| panic!("fragment shader '{name}' failed: {e}"));
        }
    }
}
