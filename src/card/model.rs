use serde::{Deserialize, Serialize};

use crate::assets::color::ColorDef;
use crate::card::number::abbreviate;
use crate::card::progress::ProgressFraction;
use crate::foundation::error::RankCardResult;

/// The per-user values shown on a card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankCard {
    pub username: String,
    pub level: u64,
    pub current_exp: u64,
    pub max_exp: u64,
    #[serde(default)]
    pub rank: Option<u64>,
}

impl RankCard {
    pub fn progress(&self) -> RankCardResult<ProgressFraction> {
        ProgressFraction::new(self.current_exp, self.max_exp)
    }

    /// `cur/max` with both sides abbreviated.
    pub fn exp_label(&self) -> String {
        format!("{}/{}", abbreviate(self.current_exp), abbreviate(self.max_exp))
    }

    /// `LEVEL - 12`
    pub fn dashed_level_label(&self) -> String {
        format!("LEVEL - {}", abbreviate(self.level))
    }

    /// `LEVEL: 12       RANK: 3`, dropping the rank part when no rank is known.
    pub fn level_rank_label(&self) -> String {
        match self.rank {
            Some(rank) => format!("LEVEL: {}       RANK: {rank}", abbreviate(self.level)),
            None => format!("LEVEL: {}", abbreviate(self.level)),
        }
    }
}

/// User-facing colors of a card.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardSettings {
    /// Fill behind the inset panel of solid cards.
    pub background_color: ColorDef,
    /// Experience bar fill.
    pub bar_color: ColorDef,
    /// Label fill.
    pub text_color: ColorDef,
    /// Decorative panel and bar backing of classic cards.
    pub card_color: ColorDef,
}

impl Default for CardSettings {
    fn default() -> Self {
        Self {
            background_color: ColorDef::from_rgba8(0x36, 0x39, 0x3f, 255),
            bar_color: ColorDef::WHITE,
            text_color: ColorDef::WHITE,
            card_color: ColorDef::BLACK,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/card/model.rs"]
mod tests;
