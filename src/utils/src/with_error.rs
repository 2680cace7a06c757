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

use std::fmt::Display;

use color_eyre::eyre::eyre;
use color_eyre::Result;

/// Converts `Option` and `Result` values into [color_eyre] results with a
/// lazily-built error message.
pub trait WithError<T> {
    fn with_error(self, message: impl FnOnce() -> String) -> Result<T>;
}

impl<T> WithError<T> for Option<T> {
    fn with_error(self, message: impl FnOnce() -> String) -> Result<T> {
        match self {
            Some(value) => Ok(value),
            None => Err(eyre!(message())),
        }
    }
}

impl<T, E: Display> WithError<T> for Result<T, E> {
    fn with_error(self, message: impl FnOnce() -> String) -> Result<T> {
        match self {
            Ok(value) => Ok(value),
            Err(error) => Err(eyre!("{}: {error}", message())),
        }
    }
}
