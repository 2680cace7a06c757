// Copyright © glimmer 2024-present
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//   https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use enum_iterator::Sequence;
use enumset::EnumSetType;
use serde::{Deserialize, Serialize};

/// Identifies one of the players in a game
#[derive(Debug, Hash, Serialize, Deserialize, EnumSetType, Ord, PartialOrd, Sequence)]
pub enum PlayerName {
    /// The player who plays first, who skips their first draw step
    One,
    /// The player who plays second
    Two,
}

impl PlayerName {
    pub fn opponent(self) -> PlayerName {
        match self {
            PlayerName::One => PlayerName::Two,
            PlayerName::Two => PlayerName::One,
        }
    }

    /// Graph node id for this player, `"p1"` or `"p2"`.
    pub fn node_id(self) -> &'static str {
        match self {
            PlayerName::One => "p1",
            PlayerName::Two => "p2",
        }
    }

    pub fn parse(value: &str) -> Option<PlayerName> {
        match value {
            "p1" => Some(PlayerName::One),
            "p2" => Some(PlayerName::Two),
            _ => None,
        }
    }
}

/// A zone is a place where a card can be during the game.
///
/// Cards still in a player's deck have no node at all; the `Deck` zone only
/// appears when reconstructing states from external data.
#[derive(Debug, Hash, Serialize, Deserialize, EnumSetType, Ord, PartialOrd)]
pub enum Zone {
    Hand,
    Play,
    Ink,
    Discard,
    Deck,
    Unknown,
}

impl Zone {
    pub fn as_str(self) -> &'static str {
        match self {
            Zone::Hand => "hand",
            Zone::Play => "play",
            Zone::Ink => "ink",
            Zone::Discard => "discard",
            Zone::Deck => "deck",
            Zone::Unknown => "unknown",
        }
    }

    pub fn parse(value: &str) -> Option<Zone> {
        match value {
            "hand" => Some(Zone::Hand),
            "play" => Some(Zone::Play),
            "ink" => Some(Zone::Ink),
            "discard" => Some(Zone::Discard),
            "deck" => Some(Zone::Deck),
            "unknown" => Some(Zone::Unknown),
            _ => None,
        }
    }
}

/// Phases of a single player's turn, in order.
///
/// Only `Main` is interactive; the others run as a contiguous side-effect
/// block when the active player passes. The [Sequence] derive provides the
/// successor function used by the turn state machine.
#[derive(Debug, Hash, Serialize, Deserialize, EnumSetType, Ord, PartialOrd, Sequence)]
pub enum StepPhase {
    Ready,
    Set,
    Draw,
    Main,
    End,
}

impl StepPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            StepPhase::Ready => "ready",
            StepPhase::Set => "set",
            StepPhase::Draw => "draw",
            StepPhase::Main => "main",
            StepPhase::End => "end",
        }
    }

    pub fn parse(value: &str) -> Option<StepPhase> {
        match value {
            "ready" => Some(StepPhase::Ready),
            "set" => Some(StepPhase::Set),
            "draw" => Some(StepPhase::Draw),
            "main" => Some(StepPhase::Main),
            "end" => Some(StepPhase::End),
            _ => None,
        }
    }
}

/// The keyword abilities the engine implements.
///
/// A card in play has a keyword iff a live ability node points at it with an
/// edge carrying that keyword's label. Cards not yet in play are checked
/// against their printed abilities instead.
#[derive(Debug, Hash, Serialize, Deserialize, EnumSetType, Ord, PartialOrd)]
pub enum Keyword {
    Rush,
    Evasive,
    Alert,
    Bodyguard,
    Reckless,
}

impl Keyword {
    /// Lowercase form used as graph edge label and ability node id prefix.
    pub fn label(self) -> &'static str {
        match self {
            Keyword::Rush => "rush",
            Keyword::Evasive => "evasive",
            Keyword::Alert => "alert",
            Keyword::Bodyguard => "bodyguard",
            Keyword::Reckless => "reckless",
        }
    }

    pub fn parse_label(value: &str) -> Option<Keyword> {
        match value {
            "rush" => Some(Keyword::Rush),
            "evasive" => Some(Keyword::Evasive),
            "alert" => Some(Keyword::Alert),
            "bodyguard" => Some(Keyword::Bodyguard),
            "reckless" => Some(Keyword::Reckless),
            _ => None,
        }
    }

    /// Parses the capitalized keyword name used in card ability text, e.g.
    /// `"Rush"`. Unknown keywords return None and are ignored by ability
    /// creation.
    pub fn parse_printed(value: &str) -> Option<Keyword> {
        match value {
            "Rush" => Some(Keyword::Rush),
            "Evasive" => Some(Keyword::Evasive),
            "Alert" => Some(Keyword::Alert),
            "Bodyguard" => Some(Keyword::Bodyguard),
            "Reckless" => Some(Keyword::Reckless),
            _ => None,
        }
    }
}

/// Types of card an action edge can represent.
///
/// Variants are declared in the lexicographic order of their wire names
/// (`can_challenge` < `can_ink` < `can_pass` < `can_play` < `can_quest`). The
/// derived [Ord] is the primary key of the deterministic action sort, so this
/// declaration order is load-bearing.
#[derive(
    Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize,
)]
pub enum ActionType {
    CanChallenge,
    CanInk,
    CanPass,
    CanPlay,
    CanQuest,
}

impl ActionType {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionType::CanChallenge => "can_challenge",
            ActionType::CanInk => "can_ink",
            ActionType::CanPass => "can_pass",
            ActionType::CanPlay => "can_play",
            ActionType::CanQuest => "can_quest",
        }
    }

    pub fn parse(value: &str) -> Option<ActionType> {
        match value {
            "can_challenge" => Some(ActionType::CanChallenge),
            "can_ink" => Some(ActionType::CanInk),
            "can_pass" => Some(ActionType::CanPass),
            "can_play" => Some(ActionType::CanPlay),
            "can_quest" => Some(ActionType::CanQuest),
            _ => None,
        }
    }
}

/// Printed types of a card.
#[derive(Debug, Hash, Serialize, Deserialize, EnumSetType, Ord, PartialOrd)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    #[serde(alias = "Character")]
    Character,
    #[serde(alias = "Action")]
    Action,
    #[serde(alias = "Item")]
    Item,
    #[serde(alias = "Location")]
    Location,
}

/// Tag carried by every graph node.
#[derive(Debug, Hash, Serialize, Deserialize, EnumSetType, Ord, PartialOrd)]
pub enum NodeType {
    Game,
    Player,
    Card,
    Step,
    Ability,
}

impl NodeType {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeType::Game => "game",
            NodeType::Player => "player",
            NodeType::Card => "card",
            NodeType::Step => "step",
            NodeType::Ability => "ability",
        }
    }

    pub fn parse(value: &str) -> Option<NodeType> {
        match value {
            "game" => Some(NodeType::Game),
            "player" => Some(NodeType::Player),
            "card" => Some(NodeType::Card),
            "step" => Some(NodeType::Step),
            "ability" => Some(NodeType::Ability),
            _ => None,
        }
    }
}
