//! Picking the next level from a directory of level files.

use std::fs;
use std::path::{Path, PathBuf};

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, info};

use crate::error::{LevelError, LevelResult};
use crate::game::Game;
use crate::level::Level;

/// A set of level files played in random order, never the same level twice
/// in a row unless it is the only one.
#[derive(Debug, Clone)]
pub struct LevelRotation {
    files: Vec<PathBuf>,
    previous: Option<PathBuf>,
}

impl LevelRotation {
    /// Collect every `.txt` and `.json` file directly inside `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`LevelError::Io`] if the directory cannot be read and
    /// [`LevelError::NoLevels`] if it holds no level files.
    pub fn from_dir(dir: impl AsRef<Path>) -> LevelResult<Self> {
        let dir = dir.as_ref();
        let io_error = |source| LevelError::Io {
            path: dir.to_path_buf(),
            source,
        };
        let mut files = Vec::new();
        for entry in fs::read_dir(dir).map_err(io_error)? {
            let path = entry.map_err(io_error)?.path();
            let is_level = path.is_file()
                && path.extension().is_some_and(|ext| {
                    ext.eq_ignore_ascii_case("txt") || ext.eq_ignore_ascii_case("json")
                });
            if is_level {
                files.push(path);
            }
        }
        files.sort();
        info!(dir = %dir.display(), levels = files.len(), "level directory scanned");
        Self::from_files(files).ok_or_else(|| LevelError::NoLevels {
            path: dir.to_path_buf(),
        })
    }

    /// Rotate through `files`. Returns `None` if the list is empty.
    #[must_use]
    pub fn from_files(files: Vec<PathBuf>) -> Option<Self> {
        if files.is_empty() {
            return None;
        }
        Some(Self {
            files,
            previous: None,
        })
    }

    /// Level files in the rotation.
    #[must_use]
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// The level handed out last, if any.
    #[must_use]
    pub fn previous(&self) -> Option<&Path> {
        self.previous.as_deref()
    }

    /// Choose the next level file, different from the previous one when
    /// there is a choice.
    pub fn next_path<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &Path {
        let only_one = self.files.len() == 1;
        let candidates: Vec<&PathBuf> = self
            .files
            .iter()
            .filter(|path| only_one || Some(path.as_path()) != self.previous.as_deref())
            .collect();
        let chosen = candidates
            .choose(rng)
            .map_or_else(|| self.files[0].clone(), |path| (*path).clone());
        debug!(level = %chosen.display(), "next level chosen");
        self.previous.insert(chosen).as_path()
    }

    /// Load and build the next level as a fresh game.
    ///
    /// # Errors
    ///
    /// Returns any error from loading or building the chosen level.
    pub fn next_game<R: Rng + ?Sized>(&mut self, rng: &mut R) -> LevelResult<Game> {
        Level::load(self.next_path(rng))?.build()
    }
}
