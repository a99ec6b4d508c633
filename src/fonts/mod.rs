//! Font discovery and loading.
//!
//! Fonts are an external resource supplied by the platform; the node only
//! needs a rasterizable face. `FontLibrary` scans the usual system font
//! directories so hosts can offer a dropdown of names, and resolves a
//! `FontSelection` into a `LoadedFont` at invocation time. Resolution
//! failures are configuration errors, never silently substituted.

use crate::error::{OverlayError, Result};
use ab_glyph::{Font, FontVec, PxScale, PxScaleFont};
use std::path::{Path, PathBuf};
use tracing::debug;

const FONT_EXTENSIONS: [&str; 2] = ["ttf", "otf"];

/// How the host names the font to render with.
///
/// Serialized as a plain string: values containing a path separator or a
/// font-file extension are treated as paths, anything else as a face name
/// resolved against the system font directories.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FontSelection {
    /// A face name such as "DejaVuSans", resolved against system directories.
    Named(String),
    /// An explicit path to a .ttf/.otf file.
    Path(PathBuf),
}

impl From<String> for FontSelection {
    fn from(value: String) -> FontSelection {
        let looks_like_path = value.contains('/')
            || value.contains('\\')
            || Path::new(&value)
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| FONT_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()));
        if looks_like_path {
            FontSelection::Path(PathBuf::from(value))
        } else {
            FontSelection::Named(value)
        }
    }
}

impl From<FontSelection> for String {
    fn from(value: FontSelection) -> String {
        match value {
            FontSelection::Named(name) => name,
            FontSelection::Path(path) => path.to_string_lossy().into_owned(),
        }
    }
}

impl std::fmt::Display for FontSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            FontSelection::Named(name) => write!(f, "{}", name),
            FontSelection::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Scans platform font directories and loads faces by name or path.
#[derive(Debug, Clone)]
pub struct FontLibrary {
    directories: Vec<PathBuf>,
}

impl FontLibrary {
    /// Creates a library over the platform's standard font directories.
    pub fn new() -> FontLibrary {
        FontLibrary {
            directories: platform_font_directories(),
        }
    }

    /// Creates a library over explicit directories (used by tests and hosts
    /// that bundle their own fonts).
    pub fn with_directories(directories: Vec<PathBuf>) -> FontLibrary {
        FontLibrary { directories }
    }

    /// Sorted, deduplicated face names found in the library's directories,
    /// suitable for a host UI dropdown.
    pub fn available_fonts(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .font_files()
            .iter()
            .filter_map(|path| path.file_stem().and_then(|s| s.to_str()).map(str::to_owned))
            .collect();
        names.sort();
        names.dedup();
        names
    }

    /// Resolves the selection and loads it at the given pixel size.
    pub fn load(&self, selection: &FontSelection, size: f32) -> Result<LoadedFont> {
        let path = match selection {
            FontSelection::Path(path) => path.clone(),
            FontSelection::Named(name) => self.resolve_named(name).ok_or_else(|| {
                OverlayError::FontLoad(format!(
                    "Font '{}' was not found in any font directory ({:?})",
                    name, self.directories
                ))
            })?,
        };
        debug!(font = %path.display(), size, "loading font");
        LoadedFont::from_file(&path, size)
    }

    fn resolve_named(&self, name: &str) -> Option<PathBuf> {
        let wanted = name.to_ascii_lowercase();
        self.font_files().into_iter().find(|path| {
            path.file_stem()
                .and_then(|s| s.to_str())
                .is_some_and(|stem| stem.to_ascii_lowercase() == wanted)
        })
    }

    fn font_files(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();
        for directory in &self.directories {
            collect_font_files(directory, &mut files);
        }
        files
    }
}

impl Default for FontLibrary {
    fn default() -> FontLibrary {
        FontLibrary::new()
    }
}

/// A parsed font face plus the pixel scale it will be rendered at.
pub struct LoadedFont {
    font: FontVec,
    scale: PxScale,
}

impl LoadedFont {
    /// Reads and parses a font file.
    pub fn from_file(path: &Path, size: f32) -> Result<LoadedFont> {
        let bytes = std::fs::read(path).map_err(|e| {
            OverlayError::FontLoad(format!("Could not read font file {}: {}", path.display(), e))
        })?;
        Self::from_bytes(bytes, size)
    }

    /// Parses font bytes (TTF/OTF).
    pub fn from_bytes(bytes: Vec<u8>, size: f32) -> Result<LoadedFont> {
        let font = FontVec::try_from_vec(bytes)
            .map_err(|e| OverlayError::FontLoad(format!("Could not parse font data: {}", e)))?;
        Ok(LoadedFont {
            font,
            scale: PxScale::from(size),
        })
    }

    /// The face scaled to the configured pixel size.
    pub(crate) fn scaled(&self) -> PxScaleFont<&FontVec> {
        self.font.as_scaled(self.scale)
    }
}

impl std::fmt::Debug for LoadedFont {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "LoadedFont(scale: {:?})", self.scale)
    }
}

fn collect_font_files(directory: &Path, out: &mut Vec<PathBuf>) {
    let Ok(entries) = std::fs::read_dir(directory) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_font_files(&path, out);
        } else if path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| FONT_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        {
            out.push(path);
        }
    }
}

fn platform_font_directories() -> Vec<PathBuf> {
    let home = std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from);

    let mut directories: Vec<PathBuf> = match std::env::consts::OS {
        "windows" => {
            let windir = std::env::var_os("WINDIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("C:\\Windows"));
            vec![windir.join("Fonts")]
        }
        "macos" => {
            let mut dirs = vec![
                PathBuf::from("/System/Library/Fonts"),
                PathBuf::from("/Library/Fonts"),
            ];
            if let Some(home) = &home {
                dirs.push(home.join("Library/Fonts"));
            }
            dirs
        }
        _ => {
            let mut dirs = vec![
                PathBuf::from("/usr/share/fonts"),
                PathBuf::from("/usr/local/share/fonts"),
            ];
            if let Some(home) = &home {
                dirs.push(home.join(".fonts"));
                dirs.push(home.join(".local/share/fonts"));
            }
            dirs
        }
    };
    directories.retain(|d| d.is_dir());
    directories
}
