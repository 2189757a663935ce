/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use crate::Color;

/// Which edge of the board White starts on.
///
/// Row `0` is always the top of the board. The orientation decides which way each side's Pawns advance.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Debug)]
pub enum Orientation {
    /// White starts on rows `0` and `1` and advances toward increasing row indices ("south").
    #[default]
    WhiteTop,

    /// White starts on rows `6` and `7` and advances toward decreasing row indices ("north").
    WhiteBottom,
}

impl Orientation {
    /// The row offset of a single forward step for `color`.
    ///
    /// # Example
    /// ```
    /// # use fchess::{Color, Orientation};
    /// assert_eq!(Orientation::WhiteTop.forward(Color::White), 1);
    /// assert_eq!(Orientation::WhiteTop.forward(Color::Black), -1);
    /// assert_eq!(Orientation::WhiteBottom.forward(Color::White), -1);
    /// ```
    #[inline(always)]
    pub const fn forward(&self, color: Color) -> i8 {
        match (self, color) {
            (Self::WhiteTop, Color::White) | (Self::WhiteBottom, Color::Black) => 1,
            (Self::WhiteTop, Color::Black) | (Self::WhiteBottom, Color::White) => -1,
        }
    }

    /// The row holding `color`'s major pieces at the start of the game.
    #[inline(always)]
    pub const fn back_row(&self, color: Color) -> u8 {
        if self.forward(color) > 0 {
            0
        } else {
            7
        }
    }

    /// The row holding `color`'s Pawns at the start of the game.
    #[inline(always)]
    pub const fn pawn_row(&self, color: Color) -> u8 {
        if self.forward(color) > 0 {
            1
        } else {
            6
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WhiteTop => write!(f, "white-top"),
            Self::WhiteBottom => write!(f, "white-bottom"),
        }
    }
}

/// How the engine treats a piece that shields its own King from an enemy line piece.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Debug)]
pub enum PinPolicy {
    /// A pinned piece may not move at all.
    #[default]
    Freeze,

    /// A pinned piece may make any move after which the pinning pieces still do not reach the King,
    /// such as sliding along the pin line or capturing the pinner.
    AlongLine,
}

impl fmt::Display for PinPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Freeze => write!(f, "freeze"),
            Self::AlongLine => write!(f, "along-line"),
        }
    }
}

/// Tunable behavior of the rules engine.
///
/// The default matches classic free play: White on top, pinned pieces frozen, and no turn order enforced.
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct RulesConfig {
    /// Board orientation used to set up the starting position and to move Pawns.
    pub orientation: Orientation,

    /// Treatment of pinned pieces.
    pub pin_policy: PinPolicy,

    /// If set, only the side to move may move a piece.
    pub enforce_turns: bool,
}

impl RulesConfig {
    /// Returns a copy of this config with the provided orientation.
    #[inline(always)]
    pub const fn with_orientation(self, orientation: Orientation) -> Self {
        Self {
            orientation,
            ..self
        }
    }

    /// Returns a copy of this config with the provided pin policy.
    #[inline(always)]
    pub const fn with_pin_policy(self, pin_policy: PinPolicy) -> Self {
        Self { pin_policy, ..self }
    }
}

impl fmt::Display for RulesConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "orientation={} pin-policy={} enforce-turns={}",
            self.orientation, self.pin_policy, self.enforce_turns
        )
    }
}
