use anyhow::{Context, Result, bail};
use std::fs;
use std::path::{Path, PathBuf};

use crate::evaluator::WORD_LENGTH;

/// Solutions shipped with the game, level 1 first.
pub const BUILTIN_LEVELS: [&str; 2] = ["SMOKE", "HOUSE"];

const LEVELS_FILE_NAME: &str = "levels.txt";

/// Ordered, read-only table of level solutions. Level numbers start at 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelTable {
    words: Vec<String>,
}

impl Default for LevelTable {
    fn default() -> Self {
        Self::builtin()
    }
}

fn is_valid_word(word: &str) -> bool {
    word.len() == WORD_LENGTH && word.chars().all(|c| c.is_ascii_alphabetic())
}

impl LevelTable {
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            words: BUILTIN_LEVELS.iter().map(|w| (*w).to_string()).collect(),
        }
    }

    /// Build a table from explicit words.
    ///
    /// # Errors
    /// Fails if the list is empty or any word is not 5 letters.
    pub fn new<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = Vec::new();
        for word in words {
            let word = word.as_ref().trim().to_uppercase();
            if !is_valid_word(&word) {
                bail!("level word '{word}' is not {WORD_LENGTH} letters");
            }
            table.push(word);
        }
        if table.is_empty() {
            bail!("level table is empty");
        }
        Ok(Self { words: table })
    }

    /// Parse a newline-delimited level list. Blank lines and `#` comments are
    /// ignored, invalid words are skipped with a warning.
    ///
    /// # Errors
    /// Fails if no valid word remains.
    pub fn parse(data: &str) -> Result<Self> {
        let mut words = Vec::new();
        for (line_no, line) in data.lines().enumerate() {
            let word = line.trim();
            if word.is_empty() || word.starts_with('#') {
                continue;
            }
            let word = word.to_uppercase();
            if is_valid_word(&word) {
                words.push(word);
            } else {
                log::warn!("Skipping invalid level word '{}' on line {}", word, line_no + 1);
            }
        }
        if words.is_empty() {
            bail!("no valid {WORD_LENGTH}-letter words found");
        }
        Ok(Self { words })
    }

    /// # Errors
    /// Fails if the file can't be read or holds no valid word.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read level file '{}'", path.display()))?;
        Self::parse(&data).with_context(|| format!("invalid level file '{}'", path.display()))
    }

    /// Pick the table to play: an explicit file, then the per-user config file,
    /// then the built-in levels.
    ///
    /// # Errors
    /// Fails only when `explicit` is given and can't be loaded, or when the
    /// per-user file exists but is unusable.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from_file(path);
        }
        if let Some(path) = default_levels_path()
            && path.is_file()
        {
            log::info!("Loading levels from {}", path.display());
            return Self::load_from_file(&path);
        }
        Ok(Self::builtin())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Whether `level` is a real entry in the table.
    #[must_use]
    pub fn contains_level(&self, level: usize) -> bool {
        (1..=self.words.len()).contains(&level)
    }

    /// Solution for `level`. Out-of-range numbers get the last level's word.
    #[must_use]
    pub fn solution_for(&self, level: usize) -> &str {
        level
            .checked_sub(1)
            .and_then(|i| self.words.get(i))
            .or_else(|| self.words.last())
            .map_or("", String::as_str)
    }
}

/// Per-user level file, e.g. `~/.config/wordle-levels/levels.txt` on Linux.
#[must_use]
pub fn default_levels_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("wordle-levels").join(LEVELS_FILE_NAME))
}
