use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TranspileError;

/// Target engine variant. Selected once per transpile call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Game {
    /// Baseline variant.
    #[serde(rename = "SkyrimSE")]
    SkyrimSE,
    /// Extended variant: structs, groups, `var`, const/mandatory modifiers.
    #[serde(rename = "FO4")]
    Fallout4,
}

impl Game {
    pub const NAMES: [&'static str; 2] = ["SkyrimSE", "FO4"];

    pub fn name(self) -> &'static str {
        match self {
            Self::SkyrimSE => "SkyrimSE",
            Self::Fallout4 => "FO4",
        }
    }

    pub fn supports(self, feature: Feature) -> bool {
        feature.supported_games().contains(&self)
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Game {
    type Err = TranspileError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "SkyrimSE" => Ok(Self::SkyrimSE),
            "FO4" => Ok(Self::Fallout4),
            other => Err(TranspileError::InvalidConfiguration(other.to_string())),
        }
    }
}

/// Constructs whose availability depends on the target game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    BetaOnlyScript,
    DebugOnlyScript,
    ConstScript,
    NativeScript,
    ConstModifier,
    MandatoryModifier,
    InferredVariable,
    StructDecl,
    GroupDecl,
    StructInitializer,
    NewStruct,
}

impl Feature {
    /// Source-level name used in diagnostics.
    pub fn construct(self) -> &'static str {
        match self {
            Self::BetaOnlyScript => "beta",
            Self::DebugOnlyScript => "debug",
            Self::ConstScript | Self::ConstModifier => "const",
            Self::NativeScript => "native",
            Self::MandatoryModifier => "mandatory",
            Self::InferredVariable => "var",
            Self::StructDecl => "struct",
            Self::GroupDecl => "group",
            Self::StructInitializer => "struct initializer",
            Self::NewStruct => "new struct",
        }
    }

    pub fn supported_games(self) -> &'static [Game] {
        match self {
            Self::BetaOnlyScript
            | Self::DebugOnlyScript
            | Self::ConstScript
            | Self::NativeScript
            | Self::ConstModifier
            | Self::MandatoryModifier
            | Self::InferredVariable
            | Self::StructDecl
            | Self::GroupDecl
            | Self::StructInitializer
            | Self::NewStruct => &[Game::Fallout4],
        }
    }

    /// First game in the table that supports the feature.
    pub fn required_game(self) -> Game {
        self.supported_games()
            .first()
            .copied()
            .unwrap_or(Game::Fallout4)
    }
}

pub fn is_allowed(feature: Feature, game: Game) -> bool {
    game.supports(feature)
}

pub fn require(feature: Feature, game: Game) -> Result<(), TranspileError> {
    if is_allowed(feature, game) {
        return Ok(());
    }
    Err(TranspileError::unsupported(
        feature.construct(),
        feature.required_game(),
    ))
}
