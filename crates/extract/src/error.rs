use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum ExtractError {
    /// The document could not be opened or converted to text. Caught per
    /// document by the batch walker; never aborts the batch.
    DocumentRead { path: PathBuf, detail: String },
    /// `pdftotext` is not installed.
    ToolMissing(String),
    /// Filesystem error while walking the bulletin tree.
    Io(String),
    /// The filename-prefix pattern could not be compiled.
    Pattern(String),
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DocumentRead { path, detail } => {
                write!(f, "cannot read document {}: {detail}", path.display())
            }
            Self::ToolMissing(tool) => write!(f, "{tool} not installed (poppler-utils)"),
            Self::Io(msg) => write!(f, "IO error: {msg}"),
            Self::Pattern(msg) => write!(f, "filename pattern error: {msg}"),
        }
    }
}

impl std::error::Error for ExtractError {}
