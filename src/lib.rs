pub mod catalog;

pub mod compile;

pub mod strings;

use std::{error::Error, fmt::Display, io, path::PathBuf};

pub use catalog::Catalog;
pub use compile::{CompiledTable, compile_catalog, compile_catalog_file};
pub use strings::StringsTable;

#[derive(Debug)]
pub enum CompileError {
    /// The catalog path given on the command line does not exist.
    InputNotFound(PathBuf),
    /// The catalog could not be deserialised. Covers both malformed JSON and JSON of the wrong shape.
    CatalogParse(serde_json::Error),
    /// Reading the catalog or writing an output table failed.
    Io { path: PathBuf, source: io::Error },
    /// A `.strings` line that is not of the form `"key" = "value";`.
    MalformedStringsLine { line: usize, content: String },
}

impl CompileError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> CompileError {
        let path = path.into();
        move |source| CompileError::Io { path, source }
    }
}

impl From<serde_json::Error> for CompileError {
    fn from(value: serde_json::Error) -> Self {
        CompileError::CatalogParse(value)
    }
}

impl Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompileError::InputNotFound(path) => write!(f, "{} not found", path.display()),
            CompileError::CatalogParse(e) => write!(f, "Unable to parse catalog: {}", e),
            CompileError::Io { path, source } => write!(f, "{}: {}", path.display(), source),
            CompileError::MalformedStringsLine { line, content } => {
                write!(f, "Malformed .strings entry on line {}: {}", line, content)
            }
        }
    }
}

impl Error for CompileError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CompileError::CatalogParse(e) => Some(e),
            CompileError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
