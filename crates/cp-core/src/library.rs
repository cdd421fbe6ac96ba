//! Built-in puzzles.

use crate::puzzle::{Category, MistakeBudget, Puzzle};
use serde::Serialize;
use std::sync::LazyLock;

/// Id of the puzzle served when a link is missing or broken.
pub const FALLBACK_ID: &str = "starter";

#[derive(Debug, Clone, Serialize)]
pub struct LibraryEntry {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub puzzle: Puzzle,
}

static LIBRARY: LazyLock<Vec<LibraryEntry>> = LazyLock::new(|| {
    vec![
        entry(
            FALLBACK_ID,
            "Starter Puzzle",
            "",
            [
                ("Things that start with FIRE", ["ANT", "DRILL", "ISLAND", "OPAL"]),
                ("Types of FISH", ["BASS", "FLOUNDER", "SALMON", "TROUT"]),
                ("___ STONE", ["COBBLE", "CORNER", "GREY", "LIME"]),
                ("Can be \"ROLLING\"", ["HILLS", "PIN", "STOCK", "THUNDER"]),
            ],
        ),
        entry(
            "glenn1",
            "Glenn 1",
            "",
            [
                ("Dog Breeds", ["Boxer", "Hound", "Pointer", "Shepherd"]),
                ("Baseball Pitches", ["Knuckle", "Fast", "Curve", "Screw"]),
                ("Famous Glen(n)'s", ["Powell", "Close", "Beck", "Quagmire"]),
                ("Golden _____", ["Retriever", "Gate", "Ratio", "Ticket"]),
            ],
        ),
        entry(
            "motorsports",
            "Motorsports Legends",
            "Racing drivers across different series",
            [
                ("NASCAR Drivers", ["EARNHARDT", "JOHNSON", "PETTY", "WALTRIP"]),
                ("IndyCar Drivers", ["DIXON", "ANDRETTI", "PALOU", "FOYT"]),
                ("Formula 1 Drivers", ["HAMILTON", "SCHUMACHER", "VERSTAPPEN", "ALONSO"]),
                ("MotoGP Riders", ["ROSSI", "MARQUEZ", "AGOSTINI", "DOOHAN"]),
            ],
        ),
        entry(
            "ohio",
            "All About Ohio",
            "The Buckeye State",
            [
                ("Ohio State University", ["BUCKEYES", "SCARLET", "SCRIPT OHIO", "HAYES"]),
                ("Ohio State Symbols", ["CARDINAL", "CARNATION", "FLINT", "LADYBUG"]),
                ("Rivers in Ohio", ["CUYAHOGA", "MAUMEE", "SCIOTO", "MIAMI"]),
                ("Famous Ohioans", ["ARMSTRONG", "JAMES", "GLENN", "SPIELBERG"]),
            ],
        ),
    ]
});

fn entry<const N: usize>(
    id: &'static str,
    name: &'static str,
    description: &'static str,
    groups: [(&str, [&str; 4]); N],
) -> LibraryEntry {
    let categories = groups
        .into_iter()
        .map(|(cat, items)| Category::new(cat, items))
        .collect();
    LibraryEntry {
        id,
        name,
        description,
        puzzle: Puzzle::new(Some(name.to_string()), MistakeBudget::Limited(4), categories),
    }
}

pub fn library() -> &'static [LibraryEntry] {
    &LIBRARY
}

pub fn find(id: &str) -> Option<&'static LibraryEntry> {
    LIBRARY.iter().find(|e| e.id == id)
}

/// The puzzle substituted for missing or undecodable links.
pub fn fallback_puzzle() -> Puzzle {
    LIBRARY
        .iter()
        .find(|e| e.id == FALLBACK_ID)
        .map(|e| e.puzzle.clone())
        .unwrap_or_else(|| Puzzle::new(None, MistakeBudget::default(), Vec::new()))
}
