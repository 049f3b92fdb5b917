//! Program registry: owns the full vertex×fragment cross-product of linked
//! programs and the single current selection.
//!
//! Generic over the linked-program handle so the build/select/teardown state
//! machine can be exercised without a GPU device; the application
//! instantiates it with `P = wgpu::RenderPipeline`.

use super::ShaderError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Joins two logical stage names into the registry lookup key.
///
/// The `"<vertex>_<fragment>"` convention is shared with the UI layer and
/// must not change.
pub fn composite_key(vertex: &str, fragment: &str) -> String {
    format!("{vertex}_{fragment}")
}

pub struct ProgramRegistry<P> {
    programs: HashMap<String, P>,
    current: Option<String>,
    vertex_names: Vec<String>,
    fragment_names: Vec<String>,
}

impl<P> Default for ProgramRegistry<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> ProgramRegistry<P> {
    pub fn new() -> Self {
        Self {
            programs: HashMap::new(),
            current: None,
            vertex_names: Vec::new(),
            fragment_names: Vec::new(),
        }
    }

    /// Builds a program for every pair in the cross-product of the given
    /// name→path lists.
    ///
    /// A pair that fails to build is logged and skipped; the rest of the
    /// build continues, so the registry may end up with fewer entries than
    /// the full cross-product. Finishes by activating the default program
    /// (first vertex name + first fragment name) if it exists.
    pub fn build_all(
        &mut self,
        vertex_paths: &[(String, PathBuf)],
        fragment_paths: &[(String, PathBuf)],
        mut create: impl FnMut(&str, &Path, &Path) -> Result<P, ShaderError>,
    ) {
        self.vertex_names = vertex_paths.iter().map(|(n, _)| n.clone()).collect();
        self.fragment_names = fragment_paths.iter().map(|(n, _)| n.clone()).collect();

        for (vertex_name, vertex_path) in vertex_paths {
            for (fragment_name, fragment_path) in fragment_paths {
                let name = composite_key(vertex_name, fragment_name);
                match create(&name, vertex_path, fragment_path) {
                    Ok(program) => {
                        self.programs.insert(name, program);
                    }
                    Err(e) => warn!("skipping shader program '{}': {}", name, e),
                }
            }
        }
        info!(
            "built {} of {} shader programs",
            self.programs.len(),
            vertex_paths.len() * fragment_paths.len()
        );

        if let Err(e) = self.set_current_by_indices(0, 0) {
            warn!("no default shader program available: {}", e);
        }
    }

    /// Makes `name` the current program. An unknown name leaves the previous
    /// selection untouched.
    pub fn set_current(&mut self, name: &str) -> Result<(), ShaderError> {
        if !self.programs.contains_key(name) {
            return Err(ShaderError::NotFound {
                name: name.to_string(),
            });
        }
        self.current = Some(name.to_string());
        Ok(())
    }

    /// Selects a program by positional indices into the ordered name lists.
    ///
    /// An out-of-range index falls back to index 0, so UI widgets can never
    /// desynchronize the selection.
    pub fn set_current_by_indices(
        &mut self,
        vertex_index: usize,
        fragment_index: usize,
    ) -> Result<(), ShaderError> {
        let name = {
            let vertex = indexed_name(&self.vertex_names, vertex_index).unwrap_or("");
            let fragment = indexed_name(&self.fragment_names, fragment_index).unwrap_or("");
            composite_key(vertex, fragment)
        };
        self.set_current(&name)
    }

    /// The currently active program handle, if any selection has succeeded.
    pub fn current(&self) -> Option<&P> {
        self.current.as_ref().and_then(|name| self.programs.get(name))
    }

    pub fn current_name(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// All composite keys present in the registry, sorted for stable display.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.programs.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn vertex_names(&self) -> &[String] {
        &self.vertex_names
    }

    pub fn fragment_names(&self) -> &[String] {
        &self.fragment_names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.programs.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.programs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }

    /// Drops every owned program and clears the registry. Idempotent; a torn
    /// down registry stays empty.
    pub fn teardown(&mut self) {
        if !self.programs.is_empty() {
            info!("destroying {} shader programs", self.programs.len());
        }
        self.programs.clear();
        self.current = None;
        self.vertex_names.clear();
        self.fragment_names.clear();
    }
}

fn indexed_name(names: &[String], index: usize) -> Option<&str> {
    names
        .get(index)
        .or_else(|| names.first())
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ShaderPaths;
    use crate::shader::{compile_stage, create_program, StageKind};

    fn test_paths() -> (Vec<(String, PathBuf)>, Vec<(String, PathBuf)>) {
        let vertex = ["normal", "wave", "breathing"]
            .iter()
            .map(|n| (n.to_string(), PathBuf::from(format!("{n}.vert"))))
            .collect();
        let fragment = ["normal", "pulse", "rainbow"]
            .iter()
            .map(|n| (n.to_string(), PathBuf::from(format!("{n}.frag"))))
            .collect();
        (vertex, fragment)
    }

    fn built_registry() -> ProgramRegistry<u32> {
        let (vertex, fragment) = test_paths();
        let mut registry = ProgramRegistry::new();
        let mut next = 0u32;
        registry.build_all(&vertex, &fragment, |_, _, _| {
            next += 1;
            Ok(next)
        });
        registry
    }

    #[test]
    fn builds_full_cross_product_with_default_current() {
        let registry = built_registry();
        assert_eq!(registry.len(), 9);
        assert_eq!(registry.current_name(), Some("normal_normal"));
        assert!(registry.current().is_some());
    }

    #[test]
    fn every_built_pair_is_selectable() {
        let mut registry = built_registry();
        for vertex in ["normal", "wave", "breathing"] {
            for fragment in ["normal", "pulse", "rainbow"] {
                let name = composite_key(vertex, fragment);
                registry.set_current(&name).unwrap();
                assert_eq!(registry.current_name(), Some(name.as_str()));
            }
        }
    }

    #[test]
    fn failed_pair_is_absent_and_rest_remain() {
        let (vertex, fragment) = test_paths();
        let mut registry: ProgramRegistry<u32> = ProgramRegistry::new();
        registry.build_all(&vertex, &fragment, |name, _, _| {
            if name == "wave_pulse" {
                Err(ShaderError::Compile {
                    kind: StageKind::Fragment,
                    log: "deliberate failure".to_string(),
                })
            } else {
                Ok(1)
            }
        });

        assert_eq!(registry.len(), 8);
        assert!(!registry.contains("wave_pulse"));
        assert!(registry.set_current("wave_pulse").is_err());
        for name in registry.names() {
            assert_ne!(name, "wave_pulse");
        }
    }

    #[test]
    fn unknown_name_keeps_previous_selection() {
        let mut registry = built_registry();
        registry.set_current("wave_rainbow").unwrap();
        let err = registry.set_current("nonexistent_name").unwrap_err();
        assert!(matches!(err, ShaderError::NotFound { .. }));
        assert_eq!(registry.current_name(), Some("wave_rainbow"));
    }

    #[test]
    fn out_of_range_indices_fall_back_to_first() {
        let mut registry = built_registry();
        registry.set_current_by_indices(99, 99).unwrap();
        assert_eq!(registry.current_name(), Some("normal_normal"));

        registry.set_current_by_indices(1, 2).unwrap();
        assert_eq!(registry.current_name(), Some("wave_rainbow"));
    }

    #[test]
    fn teardown_is_idempotent() {
        let mut registry = built_registry();
        registry.teardown();
        assert!(registry.is_empty());
        assert!(registry.current().is_none());

        registry.teardown();
        assert!(registry.is_empty());
        assert!(registry.set_current("normal_normal").is_err());
    }

    // End-to-end over the CPU half: default paths, real GLSL compilation,
    // stub link step.
    #[test]
    fn default_paths_build_nine_programs() {
        let root = Path::new(env!("CARGO_MANIFEST_DIR"));
        let paths = ShaderPaths::default();
        let vertex: Vec<_> = paths
            .vertex
            .iter()
            .map(|(n, p)| (n.clone(), root.join(p)))
            .collect();
        let fragment: Vec<_> = paths
            .fragment
            .iter()
            .map(|(n, p)| (n.clone(), root.join(p)))
            .collect();

        let mut registry: ProgramRegistry<usize> = ProgramRegistry::new();
        let mut linked = 0usize;
        registry.build_all(&vertex, &fragment, |name, vertex_path, fragment_path| {
            create_program(name, vertex_path, fragment_path, |vertex, fragment| {
                assert_eq!(vertex.kind, StageKind::Vertex);
                assert_eq!(fragment.kind, StageKind::Fragment);
                linked += 1;
                Ok(linked)
            })
        });

        assert_eq!(registry.len(), 9);
        assert_eq!(registry.current_name(), Some("normal_normal"));
    }

    #[test]
    fn broken_fragment_source_skips_only_that_variant() {
        let (vertex, fragment) = test_paths();
        let good_vertex = "#version 450\nvoid main() { gl_Position = vec4(0.0); }";
        let good_fragment =
            "#version 450\nlayout(location = 0) out vec4 c;\nvoid main() { c = vec4(1.0); }";
        let broken_fragment = "#version 450\nvoid main( {";

        let mut registry: ProgramRegistry<u32> = ProgramRegistry::new();
        registry.build_all(&vertex, &fragment, |_, _, fragment_path| {
            let fragment_source = if fragment_path.to_str() == Some("pulse.frag") {
                broken_fragment
            } else {
                good_fragment
            };
            compile_stage(good_vertex, StageKind::Vertex)?;
            compile_stage(fragment_source, StageKind::Fragment)?;
            Ok(1)
        });

        assert_eq!(registry.len(), 6);
        for vertex_name in ["normal", "wave", "breathing"] {
            assert!(!registry.contains(&composite_key(vertex_name, "pulse")));
            assert!(registry.contains(&composite_key(vertex_name, "normal")));
            assert!(registry.contains(&composite_key(vertex_name, "rainbow")));
        }
    }
}
