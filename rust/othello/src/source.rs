//! Where replenished pieces come from
//!
//! Every piece drawn into a supply slot goes through a [`PieceSource`], so
//! games can be made reproducible by seeding [`RandomSource`] or by scripting
//! the outcomes with [`ScriptedSource`].

use std::collections::VecDeque;
use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::piece::PieceType;

/// Supplies the piece type for a freshly filled slot.
///
/// `others` holds the types already sitting in the other slots of the same
/// hand. Sources are cloned along with the game they feed.
pub trait PieceSource: fmt::Debug + Send {
    fn draw(&mut self, others: &[PieceType]) -> PieceType;

    fn box_clone(&self) -> Box<dyn PieceSource>;
}

impl Clone for Box<dyn PieceSource> {
    fn clone(&self) -> Self {
        self.box_clone()
    }
}

/// Rule used when refilling a slot
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReplenishPolicy {
    /// 70% normal, 10% each special, whatever the hand holds
    #[default]
    Flat,
    /// A special is guaranteed when the other three slots are all normal
    ForcedVariety,
}

/// Draws from a seedable PRNG
#[derive(Clone, Debug)]
pub struct RandomSource {
    rng: StdRng,
    policy: ReplenishPolicy,
}

impl RandomSource {
    pub fn new(policy: ReplenishPolicy) -> Self {
        RandomSource {
            rng: StdRng::from_entropy(),
            policy,
        }
    }

    pub fn seeded(seed: u64, policy: ReplenishPolicy) -> Self {
        RandomSource {
            rng: StdRng::seed_from_u64(seed),
            policy,
        }
    }

    pub fn policy(&self) -> ReplenishPolicy {
        self.policy
    }

    fn draw_flat(&mut self) -> PieceType {
        match self.rng.gen_range(0..10) {
            0..=6 => PieceType::Normal,
            7 => PieceType::Butter,
            8 => PieceType::Cat,
            _ => PieceType::ButterCat,
        }
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::new(ReplenishPolicy::Flat)
    }
}

impl PieceSource for RandomSource {
    fn draw(&mut self, others: &[PieceType]) -> PieceType {
        let degenerate = others.len() == 3 && others.iter().all(|kind| *kind == PieceType::Normal);
        if self.policy == ReplenishPolicy::ForcedVariety && degenerate {
            return PieceType::SPECIALS[self.rng.gen_range(0..PieceType::SPECIALS.len())];
        }
        self.draw_flat()
    }

    fn box_clone(&self) -> Box<dyn PieceSource> {
        Box::new(self.clone())
    }
}

/// Hands out a fixed sequence of types, then normals forever
#[derive(Clone, Debug, Default)]
pub struct ScriptedSource {
    queue: VecDeque<PieceType>,
}

impl ScriptedSource {
    pub fn new(outcomes: impl IntoIterator<Item = PieceType>) -> Self {
        ScriptedSource {
            queue: outcomes.into_iter().collect(),
        }
    }

    /// Outcomes not yet drawn
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl PieceSource for ScriptedSource {
    fn draw(&mut self, _others: &[PieceType]) -> PieceType {
        self.queue.pop_front().unwrap_or(PieceType::Normal)
    }

    fn box_clone(&self) -> Box<dyn PieceSource> {
        Box::new(self.clone())
    }
}
