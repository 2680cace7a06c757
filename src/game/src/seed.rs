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

//! Seed parsing and detection.
//!
//! A seed is either a **hand-spec** (`xxxxxxx.xxxxxxx.yy`: seven hand
//! indices per player plus a two-letter shuffle tail) or any other string,
//! used purely as a deterministic RNG seed. Each hand-spec character maps to
//! an index: `0-9` → 0..9, `a-z` → 10..35.

use md5::{Digest, Md5};
use once_cell::sync::Lazy;
use rand_xoshiro::rand_core::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use regex::Regex;

/// Starting-hand indices parsed from a hand-spec seed.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct HandSpec {
    pub p1_hand: Vec<usize>,
    pub p2_hand: Vec<usize>,
}

static HAND_SPEC_SEED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]{7}\.[a-z0-9]{7}\.[a-z]{2}$").expect("Invalid seed regex"));

static SIMPLE_SEED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]{8}$").expect("Invalid seed regex"));

/// Parses a hand-spec seed into its index lists. Returns None when the
/// string does not have the `7.7.2` shape or contains invalid characters.
pub fn parse_hand_spec(seed: &str) -> Option<HandSpec> {
    let parts: Vec<&str> = seed.split('.').collect();
    let [p1_spec, p2_spec, suffix] = parts.as_slice() else {
        return None;
    };
    if p1_spec.len() != 7 || p2_spec.len() != 7 || suffix.len() != 2 {
        return None;
    }
    let p1_hand: Option<Vec<usize>> = p1_spec.chars().map(char_to_index).collect();
    let p2_hand: Option<Vec<usize>> = p2_spec.chars().map(char_to_index).collect();
    Some(HandSpec { p1_hand: p1_hand?, p2_hand: p2_hand? })
}

/// `0-9` → 0..9, `a-z` → 10..35.
pub fn char_to_index(c: char) -> Option<usize> {
    match c {
        '0'..='9' => Some(c as usize - '0' as usize),
        'a'..='z' => Some(c as usize - 'a' as usize + 10),
        _ => None,
    }
}

/// Finds the seed segment of a tree path: the first segment matching either
/// seed shape. Returns the path prefix up to and including that segment.
pub fn find_seed_path(path: &str) -> Option<String> {
    let parts: Vec<&str> = path.split('/').collect();
    for (index, part) in parts.iter().enumerate() {
        if HAND_SPEC_SEED.is_match(part) || SIMPLE_SEED.is_match(part) {
            return Some(parts[..=index].join("/"));
        }
    }
    None
}

/// Deterministic RNG for a seed string: the first eight bytes of its MD5
/// digest seed a Xoshiro generator. Only determinism matters here, not the
/// specific stream.
pub fn rng_for_seed(seed: &str) -> Xoshiro256StarStar {
    let digest = Md5::digest(seed.as_bytes());
    let bytes: [u8; 8] = digest[..8].try_into().expect("MD5 digest is 16 bytes");
    Xoshiro256StarStar::seed_from_u64(u64::from_be_bytes(bytes))
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;

    #[test]
    fn parses_hand_spec_seeds() {
        let spec = parse_hand_spec("b123456.0123456.ab").unwrap();
        assert_eq!(spec.p1_hand, vec![11, 1, 2, 3, 4, 5, 6]);
        assert_eq!(spec.p2_hand, vec![0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn rejects_malformed_hand_specs() {
        assert!(parse_hand_spec("b123456.0123456").is_none());
        assert!(parse_hand_spec("b12345.0123456.ab").is_none());
        assert!(parse_hand_spec("b123456.0123456.abc").is_none());
        assert!(parse_hand_spec("B123456.0123456.ab").is_none());
    }

    #[test]
    fn finds_seed_segments_in_paths() {
        assert_eq!(
            find_seed_path("output/b013/b123456.0123456.ab/0/1"),
            Some("output/b013/b123456.0123456.ab".to_string())
        );
        assert_eq!(
            find_seed_path("output/b013/xzp8iq8p/2"),
            Some("output/b013/xzp8iq8p".to_string())
        );
        assert_eq!(find_seed_path("output/b013"), None);
    }

    #[test]
    fn seed_rngs_are_deterministic() {
        let a: u64 = rng_for_seed("xzp8iq8p").gen();
        let b: u64 = rng_for_seed("xzp8iq8p").gen();
        let c: u64 = rng_for_seed("different").gen();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
