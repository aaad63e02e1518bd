//! Deterministic random streams keyed by context text.
//!
//! Every use-site builds its own context string (for example
//! `seed|chunk|3,-2`), hashes it into a 32-bit state and draws from a
//! small counter-based mixer. Two streams with different contexts never
//! influence each other, so chunks and edges can be generated in any order.

use std::fmt;

use rand::{Error, Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::chunk::ChunkCoord;
use crate::constants::RANDOM_SEED_LEN;

/// Weyl increment added to the state before each draw
const STATE_INCREMENT: u32 = 0x6D2B_79F5;

/// Text identity of a world. Everything generated is a pure function of it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Seed(String);

impl Seed {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Fresh uppercase seed from the thread RNG.
    pub fn random() -> Self {
        let mut rng = rand::thread_rng();
        let text = (0..RANDOM_SEED_LEN)
            .map(|_| rng.gen_range(b'A'..=b'Z') as char)
            .collect::<String>();
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Stream driving the layout of one chunk.
    pub fn chunk_stream(&self, coord: ChunkCoord) -> DungeonRng {
        DungeonRng::from_context(&format!("{}|chunk|{}", self.0, coord.key()))
    }

    /// Stream for the border between two chunks. Callers pass the pair in
    /// canonical order.
    pub fn edge_stream(&self, first: ChunkCoord, second: ChunkCoord) -> DungeonRng {
        DungeonRng::from_context(&format!(
            "{}|edge|{}|{}",
            self.0,
            first.key(),
            second.key()
        ))
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reduce text to a 32-bit state.
///
/// Each character is folded in with a multiply and a rotate, then the
/// result is avalanched so similar strings land far apart.
pub fn hash_text(text: &str) -> u32 {
    let mut h: u32 = 1_779_033_703 ^ text.chars().count() as u32;
    for c in text.chars() {
        h = (h ^ c as u32).wrapping_mul(3_432_918_353);
        h = h.rotate_left(13);
    }
    h = (h ^ (h >> 16)).wrapping_mul(2_246_822_507);
    h = (h ^ (h >> 13)).wrapping_mul(3_266_489_909);
    h ^ (h >> 16)
}

/// A reproducible pseudorandom stream.
#[derive(Debug, Clone)]
pub struct DungeonRng {
    state: u32,
}

impl DungeonRng {
    /// Stream for an arbitrary context string.
    pub fn from_context(context: &str) -> Self {
        Self {
            state: hash_text(context),
        }
    }

    /// Next raw 32-bit value.
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(STATE_INCREMENT);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    /// Uniform value in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / 4_294_967_296.0
    }

    /// Uniform integer in `lo..=hi`. Returns `lo` when the range is empty.
    pub fn range_int(&mut self, lo: i32, hi: i32) -> i32 {
        if hi <= lo {
            return lo;
        }
        let span = (hi - lo + 1) as f64;
        lo + (self.next_f64() * span).floor() as i32
    }

    /// True with probability `p`.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Uniformly chosen element, or `None` for an empty slice.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let idx = self.range_int(0, items.len() as i32 - 1);
        items.get(idx as usize)
    }

    /// Weighted choice over `(item, weight)` pairs.
    /// Zero total weight yields `None`.
    pub fn pick_weighted<T: Copy>(&mut self, choices: &[(T, u32)]) -> Option<T> {
        let total: u32 = choices.iter().map(|(_, w)| w).sum();
        if total == 0 {
            return None;
        }
        let roll = self.range_int(0, total as i32 - 1) as u32;
        let mut cumulative = 0;
        for &(item, weight) in choices {
            cumulative += weight;
            if roll < cumulative {
                return Some(item);
            }
        }
        None
    }
}

impl RngCore for DungeonRng {
    fn next_u32(&mut self) -> u32 {
        DungeonRng::next_u32(self)
    }

    fn next_u64(&mut self) -> u64 {
        let hi = DungeonRng::next_u32(self) as u64;
        let lo = DungeonRng::next_u32(self) as u64;
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = DungeonRng::next_u32(self).to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
