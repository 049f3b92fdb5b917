//! Shader source resolution: logical shader names → file paths.
//!
//! Paths come from a YAML configuration file with `ShaderPaths`,
//! `VertexShaders`, and `FragmentShaders` sections; a missing or malformed
//! file falls back to the built-in defaults so startup never aborts over
//! configuration.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Logical vertex shader names, in UI index order.
pub const VERTEX_SHADER_NAMES: [&str; 3] = ["normal", "wave", "breathing"];
/// Logical fragment shader names, in UI index order.
pub const FRAGMENT_SHADER_NAMES: [&str; 3] = ["normal", "pulse", "rainbow"];

#[derive(Debug, Default, Clone, Deserialize)]
struct RawConfig {
    #[serde(rename = "ShaderPaths", default)]
    paths: ShaderDirs,
    #[serde(rename = "VertexShaders", default)]
    vertex_shaders: HashMap<String, String>,
    #[serde(rename = "FragmentShaders", default)]
    fragment_shaders: HashMap<String, String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
struct ShaderDirs {
    #[serde(default)]
    vertex_shaders_dir: String,
    #[serde(default)]
    fragment_shaders_dir: String,
}

/// Resolved name→path lists for both stage kinds, in UI index order.
#[derive(Debug, Clone)]
pub struct ShaderPaths {
    pub vertex: Vec<(String, PathBuf)>,
    pub fragment: Vec<(String, PathBuf)>,
}

impl Default for ShaderPaths {
    /// Built-in fallback paths, used when no configuration can be loaded.
    fn default() -> Self {
        Self {
            vertex: VERTEX_SHADER_NAMES
                .iter()
                .map(|n| (n.to_string(), PathBuf::from(format!("shaders/vertex/{n}.vert"))))
                .collect(),
            fragment: FRAGMENT_SHADER_NAMES
                .iter()
                .map(|n| (n.to_string(), PathBuf::from(format!("shaders/fragment/{n}.frag"))))
                .collect(),
        }
    }
}

impl ShaderPaths {
    /// Loads shader paths from a YAML configuration file.
    ///
    /// A missing or malformed file is recoverable: the built-in default
    /// paths are substituted and the condition is logged.
    pub fn load(path: &Path) -> Self {
        let raw = match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str::<RawConfig>(&content) {
                Ok(raw) => raw,
                Err(e) => {
                    warn!(
                        "failed to parse shader config {:?}: {}; using default shader paths",
                        path, e
                    );
                    return Self::default();
                }
            },
            Err(e) => {
                warn!(
                    "failed to read shader config {:?}: {}; using default shader paths",
                    path, e
                );
                return Self::default();
            }
        };
        info!("loaded shader config from {:?}", path);
        Self::from_raw(&raw)
    }

    /// Every fixed logical name gets an entry. A name the config does not
    /// mention resolves to the bare directory; the later compile attempt for
    /// it fails gracefully.
    fn from_raw(raw: &RawConfig) -> Self {
        Self {
            vertex: resolve_section(
                &raw.paths.vertex_shaders_dir,
                &raw.vertex_shaders,
                &VERTEX_SHADER_NAMES,
            ),
            fragment: resolve_section(
                &raw.paths.fragment_shaders_dir,
                &raw.fragment_shaders,
                &FRAGMENT_SHADER_NAMES,
            ),
        }
    }
}

fn resolve_section(
    dir: &str,
    files: &HashMap<String, String>,
    names: &[&str],
) -> Vec<(String, PathBuf)> {
    names
        .iter()
        .map(|name| {
            let file = files.get(*name).cloned().unwrap_or_default();
            (name.to_string(), Path::new(dir).join(file))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let paths = ShaderPaths::load(Path::new("definitely/not/here.yaml"));
        assert_eq!(paths.vertex.len(), 3);
        assert_eq!(paths.fragment.len(), 3);
        assert_eq!(paths.vertex[0].0, "normal");
        assert_eq!(paths.vertex[0].1, PathBuf::from("shaders/vertex/normal.vert"));
        assert_eq!(paths.fragment[2].1, PathBuf::from("shaders/fragment/rainbow.frag"));
    }

    #[test]
    fn sections_join_directory_and_filename() {
        let yaml = r#"
ShaderPaths:
  vertex_shaders_dir: assets/vs
  fragment_shaders_dir: assets/fs
VertexShaders:
  normal: n.vert
  wave: w.vert
  breathing: b.vert
FragmentShaders:
  normal: n.frag
  pulse: p.frag
  rainbow: r.frag
"#;
        let raw: RawConfig = serde_yaml::from_str(yaml).unwrap();
        let paths = ShaderPaths::from_raw(&raw);
        assert_eq!(paths.vertex[1], ("wave".to_string(), PathBuf::from("assets/vs/w.vert")));
        assert_eq!(paths.fragment[1], ("pulse".to_string(), PathBuf::from("assets/fs/p.frag")));
    }

    #[test]
    fn missing_keys_still_cover_every_name() {
        let yaml = r#"
ShaderPaths:
  vertex_shaders_dir: assets/vs
VertexShaders:
  normal: n.vert
"#;
        let raw: RawConfig = serde_yaml::from_str(yaml).unwrap();
        let paths = ShaderPaths::from_raw(&raw);
        assert_eq!(paths.vertex.len(), 3);
        assert_eq!(paths.fragment.len(), 3);
        // Unnamed entries resolve to the directory alone.
        assert_eq!(paths.vertex[1], ("wave".to_string(), PathBuf::from("assets/vs")));
    }
}
