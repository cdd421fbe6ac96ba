use crate::error::{Result, SessionError};
use crate::hints::{HintAction, HintBoard};
use chrono::{DateTime, Utc};
use cp_core::{normalize_item, CategoryColor, MistakeBudget, Palette, Puzzle};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

/// First line of the shareable result.
pub const SHARE_HEADER: &str = "Connections PLUS!";

/// Emoji for a guessed category the palette has no color for.
const UNKNOWN_EMOJI: &str = "⬜";

/// One word on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// Stable across shuffles.
    pub id: usize,
    pub word: String,
    pub category: usize,
}

/// Tile as shown to the player; the category stays hidden.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileView {
    pub id: usize,
    pub word: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameState {
    Playing,
    Won,
    Lost,
}

impl GameState {
    pub fn is_over(&self) -> bool {
        !matches!(self, Self::Playing)
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameState::Playing => write!(f, "playing"),
            GameState::Won => write!(f, "won"),
            GameState::Lost => write!(f, "lost"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum GuessOutcome {
    Correct { category: usize },
    Incorrect { one_away: bool },
}

/// A category revealed to the player, with its display color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealedCategory {
    pub index: usize,
    pub name: String,
    pub items: Vec<String>,
    pub color: CategoryColor,
}

/// Serializable view of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub title: Option<String>,
    pub prompt: String,
    pub state: GameState,
    pub words_per_category: usize,
    /// Unsolved tiles in board order.
    pub tiles: Vec<TileView>,
    pub selected: Vec<usize>,
    /// In the order they were found.
    pub solved: Vec<RevealedCategory>,
    pub mistakes_used: u32,
    /// `None` for an unlimited budget.
    pub mistakes_remaining: Option<u32>,
    pub guess_count: usize,
    pub hints: HintBoard,
    /// Every category, once the game is over.
    pub answers: Option<Vec<RevealedCategory>>,
    pub started_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A single game of one puzzle.
#[derive(Debug, Clone)]
pub struct GameSession {
    puzzle: Puzzle,
    palette: Palette,
    tiles: Vec<Tile>,
    /// Tile ids in click order.
    selected: Vec<usize>,
    solved: Vec<usize>,
    mistakes_used: u32,
    state: GameState,
    /// Category index of every tile in every submitted guess.
    guesses: Vec<Vec<usize>>,
    /// Sorted tile ids of every submitted guess.
    guessed_sets: Vec<Vec<usize>>,
    hints: HintBoard,
    started_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl GameSession {
    pub fn new(puzzle: Puzzle, rng: &mut impl Rng) -> Result<Self> {
        Self::with_palette(puzzle, Palette::default(), rng)
    }

    pub fn with_palette(puzzle: Puzzle, palette: Palette, rng: &mut impl Rng) -> Result<Self> {
        if !puzzle.is_playable(&palette) {
            return Err(SessionError::Unplayable(format!(
                "{} categories of uneven or zero width (palette holds {})",
                puzzle.categories.len(),
                palette.len()
            )));
        }

        let mut tiles: Vec<Tile> = puzzle
            .categories
            .iter()
            .enumerate()
            .flat_map(|(category, c)| c.items.iter().map(move |w| (category, w.to_uppercase())))
            .enumerate()
            .map(|(id, (category, word))| Tile { id, word, category })
            .collect();
        tiles.shuffle(rng);

        let now = Utc::now();
        debug!(tiles = tiles.len(), categories = puzzle.categories.len(), "game started");
        Ok(Self {
            puzzle,
            palette,
            tiles,
            selected: Vec::new(),
            solved: Vec::new(),
            mistakes_used: 0,
            state: GameState::Playing,
            guesses: Vec::new(),
            guessed_sets: Vec::new(),
            hints: HintBoard::new(),
            started_at: now,
            updated_at: now,
        })
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Board order, solved tiles included.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn selected(&self) -> &[usize] {
        &self.selected
    }

    /// Solved category indices in the order they were found.
    pub fn solved(&self) -> &[usize] {
        &self.solved
    }

    pub fn guesses(&self) -> &[Vec<usize>] {
        &self.guesses
    }

    pub fn hints(&self) -> &HintBoard {
        &self.hints
    }

    pub fn mistakes_used(&self) -> u32 {
        self.mistakes_used
    }

    /// `None` when the budget is unlimited.
    pub fn mistakes_remaining(&self) -> Option<u32> {
        self.puzzle
            .max_mistakes
            .limit()
            .map(|limit| limit.saturating_sub(self.mistakes_used))
    }

    pub fn words_per_category(&self) -> usize {
        self.puzzle.words_per_category()
    }

    fn is_solved(&self, category: usize) -> bool {
        self.solved.contains(&category)
    }

    fn ensure_playing(&self) -> Result<()> {
        if self.state.is_over() {
            Err(SessionError::GameOver)
        } else {
            Ok(())
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Select or deselect a tile. Returns whether it is now selected.
    pub fn toggle(&mut self, tile_id: usize) -> Result<bool> {
        self.ensure_playing()?;
        let tile = self
            .tiles
            .iter()
            .find(|t| t.id == tile_id)
            .ok_or(SessionError::UnknownTile(tile_id))?;
        if self.is_solved(tile.category) {
            return Err(SessionError::TileSolved(tile_id));
        }

        if let Some(pos) = self.selected.iter().position(|&id| id == tile_id) {
            self.selected.remove(pos);
            self.touch();
            return Ok(false);
        }
        let limit = self.words_per_category();
        if self.selected.len() >= limit {
            return Err(SessionError::SelectionFull { limit });
        }
        self.selected.push(tile_id);
        self.touch();
        Ok(true)
    }

    pub fn deselect_all(&mut self) {
        self.selected.clear();
        self.touch();
    }

    /// Check the current selection against the categories.
    pub fn submit(&mut self) -> Result<GuessOutcome> {
        self.ensure_playing()?;
        let expected = self.words_per_category();
        if self.selected.len() != expected {
            return Err(SessionError::IncompleteSelection { expected, selected: self.selected.len() });
        }
        let mut tile_set = self.selected.clone();
        tile_set.sort_unstable();
        if self.guessed_sets.contains(&tile_set) {
            return Err(SessionError::AlreadyGuessed);
        }

        let picked: Vec<usize> = self
            .selected
            .iter()
            .filter_map(|id| self.tiles.iter().find(|t| t.id == *id))
            .map(|t| t.category)
            .collect();
        self.selected.clear();
        self.guessed_sets.push(tile_set);
        self.guesses.push(picked.clone());
        self.touch();

        let Some(&first) = picked.first() else {
            return Err(SessionError::IncompleteSelection { expected, selected: 0 });
        };
        if picked.iter().all(|&c| c == first) {
            self.solved.push(first);
            debug!(category = first, "category solved");
            if self.solved.len() == self.puzzle.categories.len() {
                self.state = GameState::Won;
                info!(mistakes = self.mistakes_used, guesses = self.guesses.len(), "game won");
            }
            return Ok(GuessOutcome::Correct { category: first });
        }

        let mut counts = vec![0usize; self.puzzle.categories.len()];
        for &c in &picked {
            counts[c] += 1;
        }
        let best = counts.into_iter().max().unwrap_or(0);
        let one_away = best + 1 == expected;

        self.mistakes_used = self.mistakes_used.saturating_add(1);
        if let MistakeBudget::Limited(limit) = self.puzzle.max_mistakes {
            if self.mistakes_used >= limit {
                self.state = GameState::Lost;
                info!(mistakes = self.mistakes_used, solved = self.solved.len(), "game lost");
            }
        }
        debug!(one_away, mistakes = self.mistakes_used, "wrong guess");
        Ok(GuessOutcome::Incorrect { one_away })
    }

    /// Reorder the unsolved tiles in place; solved tiles keep their slots.
    pub fn shuffle(&mut self, rng: &mut impl Rng) {
        let slots: Vec<usize> = (0..self.tiles.len())
            .filter(|&i| !self.is_solved(self.tiles[i].category))
            .collect();
        let mut unsolved: Vec<Tile> = slots.iter().map(|&i| self.tiles[i].clone()).collect();
        unsolved.shuffle(rng);
        for (slot, tile) in slots.into_iter().zip(unsolved) {
            self.tiles[slot] = tile;
        }
        self.selected.clear();
        self.touch();
    }

    /// Mark a board word with a hint color. Returns the word's marks afterwards.
    pub fn hint(&mut self, word: &str, action: HintAction) -> Result<&[CategoryColor]> {
        let key = normalize_item(word);
        if !self.tiles.iter().any(|t| normalize_item(&t.word) == key) {
            return Err(SessionError::UnknownWord(word.to_string()));
        }
        self.hints.apply(&key, action);
        self.touch();
        Ok(self.hints.marks(&key))
    }

    /// Emoji grid of every guess, one row per guess.
    pub fn share_text(&self, palette: &Palette) -> String {
        let rows: Vec<String> = self
            .guesses
            .iter()
            .map(|guess| {
                guess
                    .iter()
                    .map(|&c| palette.color_for(c).map_or(UNKNOWN_EMOJI, |color| color.emoji()))
                    .collect()
            })
            .collect();
        format!("{SHARE_HEADER}\n\n{}", rows.join("\n"))
    }

    fn reveal(&self, index: usize) -> Option<RevealedCategory> {
        let category = self.puzzle.categories.get(index)?;
        Some(RevealedCategory {
            index,
            name: category.name.clone(),
            items: category.items.clone(),
            color: self.palette.color_for(index)?,
        })
    }

    pub fn summary(&self) -> SessionSnapshot {
        let tiles = self
            .tiles
            .iter()
            .filter(|t| !self.is_solved(t.category))
            .map(|t| TileView { id: t.id, word: t.word.clone() })
            .collect();
        let answers = self
            .state
            .is_over()
            .then(|| (0..self.puzzle.categories.len()).filter_map(|i| self.reveal(i)).collect());

        SessionSnapshot {
            title: self.puzzle.name.clone(),
            prompt: format!(
                "Find {} groups of {}!",
                self.puzzle.categories.len(),
                self.words_per_category()
            ),
            state: self.state,
            words_per_category: self.words_per_category(),
            tiles,
            selected: self.selected.clone(),
            solved: self.solved.iter().filter_map(|&i| self.reveal(i)).collect(),
            mistakes_used: self.mistakes_used,
            mistakes_remaining: self.mistakes_remaining(),
            guess_count: self.guesses.len(),
            hints: self.hints.clone(),
            answers,
            started_at: self.started_at,
            updated_at: self.updated_at,
        }
    }
}

impl fmt::Display for GameSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GameSession(state={}, solved={}/{}, mistakes={})",
            self.state,
            self.solved.len(),
            self.puzzle.categories.len(),
            self.mistakes_used
        )
    }
}
