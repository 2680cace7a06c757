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

pub mod outcome;
pub mod with_error;

/// Returns an error from the current function with the provided format string
/// and arguments.
#[macro_export]
macro_rules! fail {
    ($($arg:tt)*) => {
        return Err(::color_eyre::eyre::eyre!($($arg)*).into())
    };
}

/// Returns an error from the current function unless `condition` is true.
///
/// The remaining arguments are a format string and its arguments, used to
/// describe the failed expectation.
#[macro_export]
macro_rules! verify {
    ($condition:expr) => {
        if !$condition {
            $crate::fail!("Expectation failed: {}", stringify!($condition));
        }
    };
    ($condition:expr, $($arg:tt)*) => {
        if !$condition {
            $crate::fail!($($arg)*);
        }
    };
}
