pub mod extract;
pub mod folder;

use std::path::PathBuf;

use thiserror::Error;

use crate::config::Thresholds;

/// A chunk of source text to type, and the file it came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Excerpt {
    pub text: String,
    pub source: PathBuf,
}

#[derive(Debug, Error)]
pub enum ExcerptError {
    #[error("folder {} does not exist", folder.display())]
    FolderNotFound { folder: PathBuf },
    #[error("no source files found in {}", folder.display())]
    NoSourceFiles { folder: PathBuf },
    #[error("no functions between {min} and {max} lines found after {attempts} attempts")]
    NoMatchingFunctions {
        min: usize,
        max: usize,
        attempts: usize,
    },
}

pub trait ExcerptProvider {
    fn next_excerpt(&mut self, thresholds: Thresholds) -> Result<Excerpt, ExcerptError>;
}
