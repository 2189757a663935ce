/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use clap::{builder::PossibleValue, ArgAction, Parser, ValueEnum};
use tracing::Level;

use crate::{Cell, Color, Orientation, Piece, PinPolicy, RulesConfig};

/// Command-line options given when launching the program.
#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct Cli {
    /// Which edge of the board White starts on.
    #[arg(short, long, value_enum, default_value_t)]
    pub orientation: Orientation,

    /// How pieces pinned to their King are treated.
    #[arg(short, long, value_enum, default_value_t)]
    pub pin_policy: PinPolicy,

    /// If set, White and Black must alternate moves.
    #[arg(short, long, default_value = "false")]
    pub enforce_turns: bool,

    /// Start from this placement string instead of the starting position.
    ///
    /// Rows are listed from row 0 to row 7, separated by `/`. Uppercase letters are White.
    #[arg(long)]
    pub placements: Option<String>,

    /// Log rules decisions to stderr. Repeat for more detail.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// The rules config described by these options.
    pub fn config(&self) -> RulesConfig {
        RulesConfig {
            orientation: self.orientation,
            pin_policy: self.pin_policy,
            enforce_turns: self.enforce_turns,
        }
    }

    /// Maximum level of log events to emit.
    pub fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::WARN,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}

/// A command to be sent to the engine.
#[derive(Debug, Clone, Parser)]
#[command(
    multicall = true,
    about,
    rename_all = "lower",
    override_usage("<COMMAND> [ARGS]")
)]
pub enum EngineCommand {
    /// Print which enemies attack the King of the provided color.
    Check { color: Color },

    /// Print a visual representation of the current board state.
    #[command(alias = "d")]
    Display,

    /// Quit the engine.
    #[command(aliases = ["quit", "q"])]
    Exit,

    /// Flips the side-to-move.
    Flip,

    /// Move the piece on `from` to `to`, if that is one of its legal moves.
    #[command(alias = "mv")]
    Move { from: Cell, to: Cell },

    /// Shows the legal moves of the piece on the provided cell.
    Moves {
        cell: Cell,

        /// If set, a grid of all available moves will also be displayed.
        #[arg(short, long, default_value = "false")]
        pretty: bool,
    },

    /// Place a piece on the provided cell.
    Place { piece: Piece, cell: Cell },

    /// Print the placement string for the current position.
    Placements,

    /// Restore the starting position.
    Reset,

    /// Remove the piece on the provided cell.
    Take { cell: Cell },
}

impl ValueEnum for Orientation {
    fn value_variants<'a>() -> &'a [Self] {
        &[Orientation::WhiteTop, Orientation::WhiteBottom]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        // Short aliases name the edge White starts on
        let value = match self {
            Orientation::WhiteTop => PossibleValue::new("white-top").alias("top"),
            Orientation::WhiteBottom => PossibleValue::new("white-bottom").alias("bottom"),
        };

        Some(value)
    }
}

impl ValueEnum for PinPolicy {
    fn value_variants<'a>() -> &'a [Self] {
        &[PinPolicy::Freeze, PinPolicy::AlongLine]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        let value = match self {
            PinPolicy::Freeze => PossibleValue::new("freeze"),
            PinPolicy::AlongLine => PossibleValue::new("along-line"),
        };

        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startup_options() {
        let cli = Cli::try_parse_from(["fchess", "-o", "bottom", "--pin-policy", "along-line", "-vv"]).unwrap();
        assert_eq!(cli.orientation, Orientation::WhiteBottom);
        assert_eq!(cli.pin_policy, PinPolicy::AlongLine);
        assert!(!cli.enforce_turns);
        assert_eq!(cli.log_level(), Level::TRACE);

        let cli = Cli::try_parse_from(["fchess"]).unwrap();
        assert_eq!(cli.config(), RulesConfig::default());
        assert_eq!(cli.log_level(), Level::WARN);
    }

    #[test]
    fn test_engine_commands() {
        let cmd = EngineCommand::try_parse_from("move 6,4 4,4".split_ascii_whitespace()).unwrap();
        assert!(matches!(cmd, EngineCommand::Move { from, to } if from.index() == 52 && to.index() == 36));

        let cmd = EngineCommand::try_parse_from(["place", "q", "3,3"]).unwrap();
        assert!(matches!(cmd, EngineCommand::Place { piece, .. } if piece.char() == 'q'));

        assert!(EngineCommand::try_parse_from(["moves", "8,0"]).is_err());
        assert!(EngineCommand::try_parse_from(["castle"]).is_err());
    }
}
