//! Gallows drawings, one per miss count from 0 to 6.

use crate::game_state::MAX_MISSES;

/// Colour hint for a gallows stage. Each front end maps it onto its own
/// styling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StageColor {
    Green,
    Blue,
    Cyan,
    White,
    Yellow,
    Red,
}

const STAGES: [&str; MAX_MISSES + 1] = [
    "
 -----
 |   |
 |
 |
 |
---",
    "
 -----
 |   |
 |   O
 |
 |
---",
    "
 -----
 |   |
 |   O
 |   |
 |
---",
    "
 -----
 |   |
 |   O
 |  /|
 |
---",
    "
 -----
 |   |
 |   O
 |  /|\\
 |
---",
    "
 -----
 |   |
 |   O
 |  /|\\
 |  /
---",
    "
 -----
 |   |
 |   O
 |  /|\\
 |  / \\
---",
];

const COLORS: [StageColor; MAX_MISSES + 1] = [
    StageColor::Green,
    StageColor::Blue,
    StageColor::Cyan,
    StageColor::White,
    StageColor::Yellow,
    StageColor::Red,
    StageColor::Red,
];

/// Drawing for `misses`. Counts past the last stage show the full body.
#[must_use]
pub fn body(misses: usize) -> &'static str {
    STAGES[misses.min(MAX_MISSES)].trim_start_matches('\n')
}

#[must_use]
pub fn stage_color(misses: usize) -> StageColor {
    COLORS[misses.min(MAX_MISSES)]
}
