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

/// Turn counter. Increments on every player switch, so two consecutive values
/// belong to different players.
pub type TurnNumber = u64;

/// A player's score toward the 20-point win condition.
pub type LoreValue = u64;

/// Damage marked on a character.
pub type Damage = u64;

/// Printed strength of a character.
pub type Strength = u64;

/// Printed willpower of a character.
pub type Willpower = u64;

/// A quantity of ink (cards in the inkwell, or ink remaining to spend).
pub type InkValue = u64;

/// The lore total at which a player immediately wins the game.
pub const WINNING_LORE: LoreValue = 20;

/// Cards drawn into each starting hand.
pub const STARTING_HAND_SIZE: usize = 7;
