//! Per-player piece supply
//!
//! Each player owns four slots with fixed ids: black holds 0-3 and white
//! holds 4-7. Using a slot immediately refills it with a freshly drawn type.
//! Which slot is currently selected is tracked by [`crate::Game`], which
//! holds at most one selection for both players.

use serde::Serialize;

use crate::error::{GameError, GameResult};
use crate::piece::PieceType;
use crate::position::Color;
use crate::source::PieceSource;

/// Number of supply slots per player
pub const SLOTS_PER_HAND: usize = 4;

/// Globally unique supply slot identifier; the id alone determines the owner
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
#[serde(transparent)]
pub struct SlotId(u8);

impl SlotId {
    pub fn new(id: u8) -> GameResult<Self> {
        if id as usize >= SLOTS_PER_HAND * 2 {
            return Err(GameError::UnknownSlot(id));
        }
        Ok(SlotId(id))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn owner(self) -> Color {
        if (self.0 as usize) < SLOTS_PER_HAND {
            Color::Black
        } else {
            Color::White
        }
    }

    /// Position of this slot within its owner's hand
    fn offset(self) -> usize {
        self.0 as usize % SLOTS_PER_HAND
    }

    /// The four ids owned by `color`
    pub fn all_for(color: Color) -> [SlotId; SLOTS_PER_HAND] {
        let base = match color {
            Color::Black => 0,
            Color::White => SLOTS_PER_HAND as u8,
        };
        [SlotId(base), SlotId(base + 1), SlotId(base + 2), SlotId(base + 3)]
    }
}

impl std::fmt::Display for SlotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HandSlot {
    pub id: SlotId,
    pub color: Color,
    #[serde(rename = "type")]
    pub kind: PieceType,
    pub is_used: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Hand {
    color: Color,
    slots: [HandSlot; SLOTS_PER_HAND],
}

impl Hand {
    /// A hand holding the given types in slot order
    pub fn new(color: Color, kinds: [PieceType; SLOTS_PER_HAND]) -> Self {
        let ids = SlotId::all_for(color);
        let slots = std::array::from_fn(|i| HandSlot {
            id: ids[i],
            color,
            kind: kinds[i],
            is_used: false,
        });
        Hand { color, slots }
    }

    /// A hand whose four types are drawn from `source`
    pub fn drawn(color: Color, source: &mut dyn PieceSource) -> Self {
        let mut kinds = [PieceType::Normal; SLOTS_PER_HAND];
        for i in 0..SLOTS_PER_HAND {
            let kind = source.draw(&kinds[..i]);
            kinds[i] = kind;
        }
        Hand::new(color, kinds)
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn slots(&self) -> &[HandSlot] {
        &self.slots
    }

    pub fn slot(&self, id: SlotId) -> Option<&HandSlot> {
        if id.owner() != self.color {
            return None;
        }
        Some(&self.slots[id.offset()])
    }

    pub fn has_available_slots(&self) -> bool {
        self.slots.iter().any(|slot| !slot.is_used)
    }

    /// Unused slots in id order
    pub fn available(&self) -> impl Iterator<Item = &HandSlot> {
        self.slots.iter().filter(|slot| !slot.is_used)
    }

    /// Check that `id` may be selected from this hand
    pub fn select(&self, id: SlotId) -> GameResult<SlotId> {
        let slot = self.slot(id).ok_or(GameError::UnknownSlot(id.value()))?;
        if slot.is_used {
            return Err(GameError::SlotUsed(id.value()));
        }
        Ok(id)
    }

    /// Spend the selected slot and refill it from `source`; the other three
    /// slots are untouched
    pub fn use_selected(
        &self,
        selection: Option<SlotId>,
        source: &mut dyn PieceSource,
    ) -> GameResult<Hand> {
        let id = self.select(selection.ok_or(GameError::NoSelection)?)?;
        let others: Vec<PieceType> = self
            .slots
            .iter()
            .filter(|slot| slot.id != id)
            .map(|slot| slot.kind)
            .collect();

        let mut next = *self;
        next.slots[id.offset()] = HandSlot {
            id,
            color: self.color,
            kind: source.draw(&others),
            is_used: false,
        };
        Ok(next)
    }

    /// A copy with `id` marked as spent. Placement refills slots at once,
    /// so only tests build hands holding a used slot.
    #[cfg(test)]
    pub(crate) fn mark_used(&self, id: SlotId) -> GameResult<Hand> {
        self.select(id)?;
        let mut next = *self;
        next.slots[id.offset()].is_used = true;
        Ok(next)
    }
}
