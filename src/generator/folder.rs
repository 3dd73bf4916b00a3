use std::fs;
use std::path::{Path, PathBuf};

use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use walkdir::{DirEntry, WalkDir};

use crate::config::Thresholds;
use crate::generator::extract::{count_lines, extract_functions, language_for_path};
use crate::generator::{Excerpt, ExcerptError, ExcerptProvider};

/// Picks random functions out of the source files under a folder.
pub struct FolderExcerptProvider {
    root: PathBuf,
    rng: SmallRng,
}

impl FolderExcerptProvider {
    pub fn new(root: PathBuf) -> Self {
        Self::with_rng(root, SmallRng::from_entropy())
    }

    pub fn with_rng(root: PathBuf, rng: SmallRng) -> Self {
        Self { root, rng }
    }

    /// Every file under the root with a known source extension. Hidden
    /// directories are not entered; unreadable entries are skipped.
    pub fn source_files(&self) -> Result<Vec<PathBuf>, ExcerptError> {
        if !self.root.is_dir() {
            return Err(ExcerptError::FolderNotFound {
                folder: self.root.clone(),
            });
        }

        let mut files: Vec<PathBuf> = WalkDir::new(&self.root)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e))
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
            .filter(|e| language_for_path(e.path()).is_some())
            .map(DirEntry::into_path)
            .collect();
        files.sort();

        if files.is_empty() {
            return Err(ExcerptError::NoSourceFiles {
                folder: self.root.clone(),
            });
        }
        Ok(files)
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}

/// Tab only works as indentation; a tab later in a line could never be typed.
fn has_inner_tab(text: &str) -> bool {
    text.lines()
        .any(|line| line.trim_start_matches([' ', '\t']).contains('\t'))
}

fn functions_in(path: &Path, thresholds: Thresholds) -> Vec<String> {
    let Some(lang) = language_for_path(path) else {
        return Vec::new();
    };
    let Ok(source) = fs::read_to_string(path) else {
        return Vec::new();
    };
    extract_functions(&source, &lang.block_style)
        .into_iter()
        .filter(|f| {
            let lines = count_lines(f);
            lines >= thresholds.min_lines && lines <= thresholds.max_lines && !has_inner_tab(f)
        })
        .collect()
}

impl ExcerptProvider for FolderExcerptProvider {
    fn next_excerpt(&mut self, thresholds: Thresholds) -> Result<Excerpt, ExcerptError> {
        let files = self.source_files()?;
        let max_attempts = files.len() * 3;

        for attempt in 0..max_attempts {
            let Some(path) = files.choose(&mut self.rng) else {
                break;
            };
            let candidates = functions_in(path, thresholds);
            if let Some(text) = candidates.choose(&mut self.rng) {
                tracing::debug!(
                    file = %path.display(),
                    attempt,
                    candidates = candidates.len(),
                    "picked excerpt"
                );
                return Ok(Excerpt {
                    text: text.clone(),
                    source: path.clone(),
                });
            }
        }

        Err(ExcerptError::NoMatchingFunctions {
            min: thresholds.min_lines,
            max: thresholds.max_lines,
            attempts: max_attempts,
        })
    }
}
