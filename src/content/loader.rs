//! Loader for RON content files at startup.

use ron::Options;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::content::validation::{ValidationError, validate_tuning};
use crate::movement::MovementTuning;

/// Error type for content loading failures.
#[derive(Debug, Error)]
pub enum ContentLoadError {
    #[error("failed to read {}: {source}", .file.display())]
    Io {
        file: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", .file.display())]
    Parse {
        file: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("invalid values in {}: {}", .file.display(), join_errors(.errors))]
    Invalid {
        file: PathBuf,
        errors: Vec<ValidationError>,
    },
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Parse and validate tuning from RON text. `file` only labels errors.
pub fn parse_movement_tuning(
    contents: &str,
    file: &Path,
) -> Result<MovementTuning, ContentLoadError> {
    let tuning: MovementTuning = ron_options()
        .from_str(contents)
        .map_err(|source| ContentLoadError::Parse {
            file: file.to_path_buf(),
            source,
        })?;

    let errors = validate_tuning(&tuning);
    if !errors.is_empty() {
        return Err(ContentLoadError::Invalid {
            file: file.to_path_buf(),
            errors,
        });
    }

    Ok(tuning)
}

/// Load movement tuning from a RON file. Fields missing from the file keep
/// their defaults.
pub fn load_movement_tuning(path: &Path) -> Result<MovementTuning, ContentLoadError> {
    let contents = fs::read_to_string(path).map_err(|source| ContentLoadError::Io {
        file: path.to_path_buf(),
        source,
    })?;

    parse_movement_tuning(&contents, path)
}
