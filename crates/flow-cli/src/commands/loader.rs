//! Reading Flow source from a file, stdin, or inline text.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("source is required: use a positional FILE, \"-\" for stdin, or -e/--eval")]
    Missing,
    #[error("source cannot be empty")]
    Empty,
    #[error("failed to read stdin: {0}")]
    Stdin(#[source] io::Error),
    #[error("failed to read '{}': {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Loaded text and the name diagnostics show for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Input {
    pub text: String,
    pub path: Option<String>,
}

pub fn load_source(
    source_path: Option<&Path>,
    source_text: Option<&str>,
) -> Result<Input, LoadError> {
    let input = match (source_text, source_path) {
        (Some(text), _) => Input {
            text: text.to_owned(),
            path: None,
        },
        (None, Some(path)) if path.as_os_str() == "-" => load_stdin()?,
        (None, Some(path)) => load_file(path)?,
        (None, None) => return Err(LoadError::Missing),
    };

    if input.text.trim().is_empty() {
        return Err(LoadError::Empty);
    }
    tracing::debug!(path = ?input.path, bytes = input.text.len(), "loaded source");
    Ok(input)
}

fn load_stdin() -> Result<Input, LoadError> {
    let mut text = String::new();
    io::stdin()
        .read_to_string(&mut text)
        .map_err(LoadError::Stdin)?;
    Ok(Input {
        text,
        path: Some("<stdin>".to_string()),
    })
}

fn load_file(path: &Path) -> Result<Input, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::File {
        path: path.to_owned(),
        source,
    })?;
    Ok(Input {
        text,
        path: Some(path.to_string_lossy().into_owned()),
    })
}
