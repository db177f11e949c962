use itertools::Itertools;
use rand::seq::SliceRandom;
use rand::Rng;
use std::iter;
use std::num::NonZeroUsize;

use crate::error::{GhostError, Result};
use crate::words::WordList;

pub const DEFAULT_WORD_COUNT: usize = 10;
pub const MAX_WORD_COUNT: usize = 100;

/// Clamp a user-supplied word count into `1..=MAX_WORD_COUNT`
pub fn clamp_word_count(count: usize) -> NonZeroUsize {
    NonZeroUsize::new(count.clamp(1, MAX_WORD_COUNT)).unwrap_or(NonZeroUsize::MIN)
}

/// Word count read from the command line or config. Zero is rejected,
/// anything above `MAX_WORD_COUNT` is clamped down.
pub fn validate_word_count(count: usize) -> Result<NonZeroUsize> {
    match count {
        0 => Err(GhostError::InvalidWordCount(count)),
        n => Ok(clamp_word_count(n)),
    }
}

/// Draw `count` words uniformly with replacement and join them with single spaces
pub fn generate_sentence<R: Rng + ?Sized>(
    words: &WordList,
    count: NonZeroUsize,
    rng: &mut R,
) -> String {
    iter::repeat_with(|| words.words().choose(&mut *rng))
        .take(count.get())
        .flatten()
        .join(" ")
}
