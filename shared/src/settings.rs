//! View settings (`colview.toml`)
//!
//! One section per feature view. Every field has a default, so a partial or
//! empty file is valid and a missing file yields [`ViewSettings::default`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings: {0}")]
    Parse(#[from] toml::de::Error),
}

/// How solid geometry is depth-tested against the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SurfaceMode {
    /// Regular depth test; geometry can be hidden by coplanar scene faces
    #[default]
    #[serde(alias = "normal", alias = "surface-only")]
    Surface,
    /// Decal depth mode; drawn on top of coplanar scene faces
    Decal,
}

impl SurfaceMode {
    pub fn is_decal(self) -> bool {
        self == Self::Decal
    }
}

/// All feature views
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ViewSettings {
    #[serde(default)]
    pub collision: CollisionViewSettings,
    #[serde(default)]
    pub hitbox: HitboxViewSettings,
    #[serde(default)]
    pub path: PathViewSettings,
    #[serde(default)]
    pub water: WaterViewSettings,
}

/// Scene collision view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollisionViewSettings {
    #[serde(default)]
    pub enabled: bool,
    /// Depth mode (default: decal)
    #[serde(default = "default_collision_mode")]
    pub mode: SurfaceMode,
    #[serde(default = "default_true")]
    pub translucent: bool,
    #[serde(default = "default_true")]
    pub shade: bool,
    /// Overlay polygon edges
    #[serde(default)]
    pub wireframe: bool,
    /// Only draw polygons with special surface properties
    #[serde(default)]
    pub restricted_only: bool,
    /// Rebuild dynamic collision every frame
    #[serde(default = "default_true")]
    pub update_continuously: bool,
}

/// Actor hitbox view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitboxViewSettings {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_true")]
    pub translucent: bool,
    #[serde(default = "default_true")]
    pub shade: bool,
    /// Draw object-collision (push) colliders
    #[serde(default = "default_true")]
    pub oc: bool,
    /// Draw attack-collision (vulnerable) colliders
    #[serde(default = "default_true")]
    pub ac: bool,
    /// Draw attack (hurting) colliders
    #[serde(default = "default_true")]
    pub at: bool,
}

/// Waypoint path view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathViewSettings {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_true")]
    pub translucent: bool,
    /// Draw a marker sphere per waypoint
    #[serde(default = "default_true")]
    pub points: bool,
    /// Connect consecutive waypoints
    #[serde(default = "default_true")]
    pub lines: bool,
}

/// Water box view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterViewSettings {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_true")]
    pub translucent: bool,
    #[serde(default = "default_true")]
    pub shade: bool,
}

fn default_true() -> bool {
    true
}
fn default_collision_mode() -> SurfaceMode {
    SurfaceMode::Decal
}

impl Default for CollisionViewSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            mode: default_collision_mode(),
            translucent: default_true(),
            shade: default_true(),
            wireframe: false,
            restricted_only: false,
            update_continuously: default_true(),
        }
    }
}

impl Default for HitboxViewSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            translucent: default_true(),
            shade: default_true(),
            oc: default_true(),
            ac: default_true(),
            at: default_true(),
        }
    }
}

impl Default for PathViewSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            translucent: default_true(),
            points: default_true(),
            lines: default_true(),
        }
    }
}

impl Default for WaterViewSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            translucent: default_true(),
            shade: default_true(),
        }
    }
}

impl ViewSettings {
    /// Parse settings from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(content)?)
    }

    /// Load settings from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Load settings, falling back to defaults if the file is missing
    ///
    /// A file that exists but fails to parse is still an error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        match Self::load(path) {
            Err(SettingsError::Io { source, path })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                tracing::debug!(path = %path.display(), "no settings file, using defaults");
                Ok(Self::default())
            }
            other => other,
        }
    }
}
