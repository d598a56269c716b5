//! Scene input sources.
//!
//! A scene is read once, either from a file path or from piped stdin.

use crate::model::error::InputError;
use std::io::Read;
use std::path::PathBuf;

pub mod scene;

pub use scene::{BoxSnapshot, Scene, ScrollSource, ViewportSnapshot, WindowSnapshot};

/// Where the scene comes from.
///
/// Sum type enforces exactly one variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Scene file on disk.
    File(PathBuf),
    /// Scene piped to stdin.
    Stdin,
}

impl InputSource {
    /// Read and decode the scene.
    ///
    /// # Errors
    ///
    /// Returns `InputError::FileNotFound` if the file vanished, `InputError::Io`
    /// for read failures and `InputError::InvalidScene` for bad JSON.
    pub fn read_scene(&self) -> Result<Scene, InputError> {
        match self {
            InputSource::File(path) => {
                if !path.exists() {
                    return Err(InputError::FileNotFound { path: path.clone() });
                }
                let text = std::fs::read_to_string(path)?;
                Scene::from_json(&text)
            }
            InputSource::Stdin => read_scene_from(std::io::stdin().lock()),
        }
    }
}

/// Read a scene from any reader.
///
/// # Errors
///
/// Returns `InputError::Io` for read failures and `InputError::InvalidScene` for bad JSON.
pub fn read_scene_from<R: Read>(mut reader: R) -> Result<Scene, InputError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    Scene::from_json(&text)
}

/// Detect and create the appropriate input source.
///
/// # Logic:
/// 1. If a file path is provided: `InputSource::File` (must exist)
/// 2. If stdin is piped: `InputSource::Stdin`
/// 3. Else: `InputError::NoInput`
///
/// # Errors
///
/// Returns `InputError::FileNotFound` if the file does not exist and
/// `InputError::NoInput` if no file is given and stdin is a terminal.
pub fn detect_input_source(file: Option<PathBuf>) -> Result<InputSource, InputError> {
    use std::io::IsTerminal;

    match file {
        Some(path) if !path.exists() => Err(InputError::FileNotFound { path }),
        Some(path) => Ok(InputSource::File(path)),
        None if std::io::stdin().is_terminal() => Err(InputError::NoInput),
        None => Ok(InputSource::Stdin),
    }
}
