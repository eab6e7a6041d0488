//! Drawing coordinates for a bracket: one column per round plus one for the champion.

use crate::models::BracketError;
use serde::{Deserialize, Serialize};

fn default_padding() -> u32 {
    16
}

fn default_slot_height() -> u32 {
    120
}

fn default_connector_before() -> u32 {
    20
}

fn default_connector_after() -> u32 {
    40
}

/// Layout constants, in pixels. Missing fields fall back to the defaults when deserialized.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_padding")]
    pub padding: u32,
    #[serde(default = "default_slot_height")]
    pub slot_height: u32,
    /// Horizontal connector length leaving a match.
    #[serde(default = "default_connector_before")]
    pub connector_before: u32,
    /// Horizontal connector length entering the parent.
    #[serde(default = "default_connector_after")]
    pub connector_after: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            padding: default_padding(),
            slot_height: default_slot_height(),
            connector_before: default_connector_before(),
            connector_after: default_connector_after(),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

/// Rectangle drawn for one match.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SlotRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Derived dimensions of the drawing surface for a given participants count.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BracketLayout {
    pub participants_count: u32,
    pub rounds: u32,
    /// `rounds + 1`: the last column holds the champion.
    pub columns: u32,
    pub width: u32,
    pub height: u32,
    pub cell_width: u32,
    pub slot_width: u32,
    pub slot_step: u32,
    canvas_width: u32,
    canvas_height: u32,
    config: LayoutConfig,
}

fn overflow(what: &str) -> BracketError {
    BracketError::InvalidLayout(format!("{} does not fit in a u32 pixel range", what))
}

impl BracketLayout {
    pub fn new(participants_count: u32, config: &LayoutConfig) -> Result<Self, BracketError> {
        if participants_count < 2 || !participants_count.is_power_of_two() {
            return Err(BracketError::InvalidParticipantsCount(participants_count));
        }
        if config.slot_height == 0 {
            return Err(BracketError::InvalidLayout("slot height must be positive".into()));
        }
        let rounds = participants_count.trailing_zeros();
        let columns = rounds + 1;
        let width = columns
            .checked_mul(config.slot_height)
            .and_then(|w| w.checked_mul(2))
            .ok_or_else(|| overflow("width"))?;
        let height = participants_count
            .checked_mul(config.slot_height)
            .ok_or_else(|| overflow("height"))?;
        let cell_width = width / columns;
        let slot_width = config
            .padding
            .checked_mul(2)
            .and_then(|p| cell_width.checked_sub(p))
            .filter(|w| *w > 0)
            .ok_or_else(|| {
                BracketError::InvalidLayout(format!(
                    "padding {} leaves no room in a {}px column",
                    config.padding, cell_width
                ))
            })?;
        let slot_step = slot_width
            .checked_add(config.connector_before)
            .and_then(|s| s.checked_add(config.connector_after))
            .ok_or_else(|| overflow("slot step"))?;
        // Rightmost pixel drawn: the final's box. Every x and connector point lies left of it.
        (rounds - 1)
            .checked_mul(slot_step)
            .and_then(|x| x.checked_add(config.padding))
            .and_then(|x| x.checked_add(slot_width))
            .ok_or_else(|| overflow("final column"))?;
        let canvas_width = config
            .padding
            .checked_mul(2)
            .and_then(|p| p.checked_add(width))
            .ok_or_else(|| overflow("canvas width"))?;
        let canvas_height = config
            .padding
            .checked_mul(2)
            .and_then(|p| p.checked_add(height))
            .ok_or_else(|| overflow("canvas height"))?;
        Ok(Self {
            participants_count,
            rounds,
            columns,
            width,
            height,
            cell_width,
            slot_width,
            slot_step,
            canvas_width,
            canvas_height,
            config: *config,
        })
    }

    /// Reject coordinates that name no match of this bracket.
    fn check(&self, round: u32, index: u32) -> Result<(), BracketError> {
        if round < 1 || round > self.rounds || index >= self.participants_count >> round {
            return Err(BracketError::InvalidLayout(format!(
                "no match at round {} index {}",
                round, index
            )));
        }
        Ok(())
    }

    /// Left edge of the column for `round`.
    pub fn x(&self, round: u32) -> Result<u32, BracketError> {
        self.check(round, 0)?;
        Ok(self.config.padding + (round - 1) * self.slot_step)
    }

    /// Vertical center of match `index` in `round`.
    pub fn y(&self, round: u32, index: u32) -> Result<u32, BracketError> {
        self.check(round, index)?;
        let group = (1u32 << (round - 1)) * self.config.slot_height;
        Ok(index * group + group / 2)
    }

    pub fn position(&self, round: u32, index: u32) -> Result<Point, BracketError> {
        Ok(Point {
            x: self.x(round)?,
            y: self.y(round, index)?,
        })
    }

    /// Box for a match, half a slot tall and centered on its row.
    pub fn slot_rect(&self, round: u32, index: u32) -> Result<SlotRect, BracketError> {
        let origin = self.position(round, index)?;
        Ok(SlotRect {
            x: origin.x,
            y: origin.y - self.config.slot_height / 4,
            width: self.slot_width,
            height: self.config.slot_height / 2,
        })
    }

    /// Polyline from a match to its parent, or None for the final.
    pub fn connector(&self, round: u32, index: u32) -> Result<Option<[Point; 5]>, BracketError> {
        let origin = self.position(round, index)?;
        if round == self.rounds {
            return Ok(None);
        }
        let from = Point {
            x: origin.x + self.slot_width,
            y: origin.y,
        };
        let to = self.position(round + 1, index / 2)?;
        let mid_x1 = from.x + self.config.connector_before;
        let mid_x2 = mid_x1 + self.config.connector_after;
        Ok(Some([
            from,
            Point { x: mid_x1, y: from.y },
            Point { x: mid_x1, y: to.y },
            Point { x: mid_x2, y: to.y },
            to,
        ]))
    }

    /// Full canvas size including the outer padding.
    pub fn canvas_size(&self) -> (u32, u32) {
        (self.canvas_width, self.canvas_height)
    }
}
