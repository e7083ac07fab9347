//! Loading and selecting questions from the flat-file database
//!
//! The question database is a UTF-8 text file with one record per line
//! (see [`QuestionRecord::parse_line`] for the line format). This module
//! loads such files and offers the two selection algorithms the game
//! needs: a fresh random draw with one question per difficulty tier, and
//! re-selection by id set, which is how a mid-game language switch keeps
//! the player on the same questions in the other language.
//!
//! Loading is deliberately forgiving: malformed lines are skipped with a
//! diagnostic, a read failure yields whatever was parsed before it, and
//! a file that cannot be opened yields an empty list. It is the caller's
//! job to decide whether an empty or short result is playable.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::PathBuf,
};

use itertools::Itertools;

use crate::{constants::ladder, question::QuestionRecord};

/// Access to the question database files of all languages
///
/// The store itself is stateless between calls; every selection reloads
/// the file, exactly like a fresh deal of cards. File names come from
/// the language packs and are resolved against the store's base
/// directory.
#[derive(Debug, Clone)]
pub struct QuestionStore {
    /// Directory the database file names are resolved against
    base: PathBuf,
}

impl QuestionStore {
    /// Creates a store reading database files from the given directory
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// Loads every well-formed record from the named database file
    ///
    /// Records are returned in file order with their 1-based line number
    /// as id. Malformed lines are skipped with a warning; an unreadable
    /// file yields an empty vector. This method never fails.
    pub fn load_all(&self, file: &str) -> Vec<QuestionRecord> {
        let path = self.base.join(file);
        log::debug!("loading question database {}", path.display());

        let reader = match File::open(&path) {
            Ok(file) => BufReader::new(file),
            Err(err) => {
                log::error!("cannot open question database {}: {err}", path.display());
                return Vec::new();
            }
        };

        let mut records = Vec::new();
        for (number, line) in reader.lines().enumerate() {
            let id = number as u32 + 1;
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    // keep what was parsed before the failure
                    log::error!("read error in {} at line {id}: {err}", path.display());
                    break;
                }
            };
            match QuestionRecord::parse_line(id, &line) {
                Ok(record) => records.push(record),
                Err(err) => log::warn!("skipping line {id} of {}: {err}", path.display()),
            }
        }

        log::info!("loaded {} questions from {}", records.len(), path.display());
        records
    }

    /// Draws a random question set, one per difficulty tier
    ///
    /// For every tier from 1 up to the ladder size, one question of
    /// exactly that difficulty is chosen uniformly at random. Tiers with
    /// no candidates are skipped with a warning, so the result may be
    /// shorter than the ladder; it is never longer, and it is always in
    /// strictly ascending difficulty order.
    pub fn select_random(&self, file: &str) -> Vec<QuestionRecord> {
        let all = self.load_all(file);
        let mut selected = Vec::with_capacity(ladder::LEVELS);

        for tier in 1..=ladder::LEVELS as u8 {
            let candidates = all
                .iter()
                .filter(|question| question.difficulty() == tier)
                .collect_vec();
            if candidates.is_empty() {
                log::warn!("no questions of difficulty {tier} in {file}");
                continue;
            }
            selected.push(candidates[fastrand::usize(..candidates.len())].clone());
        }

        selected
    }

    /// Reloads a specific question set by id
    ///
    /// Returns every record of the file whose id is in `ids`, sorted
    /// ascending by difficulty. This relies on the data contract that
    /// parallel language files keep their questions on identical line
    /// numbers; the store does not (and cannot) verify that here.
    pub fn select_by_ids(&self, file: &str, ids: &[u32]) -> Vec<QuestionRecord> {
        let sorted_ids = ids.iter().copied().sorted().collect_vec();

        self.load_all(file)
            .into_iter()
            .filter(|question| sorted_ids.binary_search(&question.id()).is_ok())
            .sorted_by_key(QuestionRecord::difficulty)
            .collect_vec()
    }
}
