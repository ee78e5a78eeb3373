//! Status marks and their display glyphs.
//!
//! Screen tables, the print register and the flat sheet all render a day
//! through [`glyph`], so a cell reads the same everywhere and the count
//! panel always agrees with the grid.

use crate::libs::record::{AttendanceStatus, DayRecord};
use serde::{Deserialize, Serialize};

/// What a single cell of the register shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Mark {
    Present,
    HalfDay,
    Leave,
    Absent,
}

impl Mark {
    pub const ALL: [Mark; 4] = [Mark::Present, Mark::HalfDay, Mark::Leave, Mark::Absent];

    pub fn of(record: &DayRecord) -> Mark {
        match record.status {
            AttendanceStatus::Present => Mark::Present,
            AttendanceStatus::HalfDay => Mark::HalfDay,
            AttendanceStatus::Absent if record.on_leave => Mark::Leave,
            AttendanceStatus::Absent => Mark::Absent,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GlyphMode {
    #[default]
    Short,
    Full,
}

pub fn glyph(mark: Mark, mode: GlyphMode) -> &'static str {
    match (mode, mark) {
        (GlyphMode::Short, Mark::Present) => "P",
        (GlyphMode::Short, Mark::HalfDay) => "H",
        (GlyphMode::Short, Mark::Leave) => "L",
        (GlyphMode::Short, Mark::Absent) => "A",
        (GlyphMode::Full, Mark::Present) => "Present",
        (GlyphMode::Full, Mark::HalfDay) => "Half Day",
        (GlyphMode::Full, Mark::Leave) => "Leave",
        (GlyphMode::Full, Mark::Absent) => "Absent",
    }
}

/// Legend line, e.g. `P = Present, H = Half Day, L = Leave, A = Absent`.
pub fn legend() -> String {
    Mark::ALL
        .iter()
        .map(|&mark| format!("{} = {}", glyph(mark, GlyphMode::Short), glyph(mark, GlyphMode::Full)))
        .collect::<Vec<_>>()
        .join(", ")
}
