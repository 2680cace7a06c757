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

/// Represents the result of some game mutation.
///
/// Mutations and action handlers are total on well-typed states; an `Err`
/// value here always represents a caller mistake (unknown card, unknown
/// action, missing state) or an I/O failure, never a legal game situation.
/// Deck-out, for example, is a terminal transition and not an error.
pub type Outcome = color_eyre::Result<()>;

/// Equivalent alias to [Outcome] which wraps a returned value
pub type Value<T> = color_eyre::Result<T>;

/// Mutation completed successfully, execution can continue
pub const OK: Outcome = Ok(());
