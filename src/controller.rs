use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::num::NonZeroUsize;
use tracing::info;

use crate::error::Result;
use crate::profile::{LatencyProfile, ProfileTable};
use crate::sentence::{clamp_word_count, generate_sentence, validate_word_count};
use crate::session::Session;
use crate::words::WordList;

/// Owns the test parameters and the current session; every parameter change
/// replaces the session wholesale.
#[derive(Debug)]
pub struct SessionController {
    words: WordList,
    profiles: ProfileTable,
    profile_id: String,
    profile: LatencyProfile,
    word_count: NonZeroUsize,
    rng: StdRng,
    next_session_id: u64,
    session: Session,
}

impl SessionController {
    pub fn new(
        words: WordList,
        profiles: ProfileTable,
        profile_id: &str,
        word_count: usize,
        mut rng: StdRng,
    ) -> Result<Self> {
        let profile = *profiles.get(profile_id)?;
        let word_count = validate_word_count(word_count)?;
        let session = build_session(1, &words, profile_id, profile, word_count, &mut rng);
        info!(
            session = 1,
            profile = profile_id,
            words = word_count.get(),
            "session created"
        );

        Ok(Self {
            words,
            profiles,
            profile_id: profile_id.to_string(),
            profile,
            word_count,
            rng,
            next_session_id: 2,
            session,
        })
    }

    /// Cancel the current session and start a fresh one with a new sentence.
    /// Safe in any ghost state.
    pub fn reset(&mut self) {
        self.session.cancel();

        let id = self.next_session_id;
        self.next_session_id += 1;
        self.session = build_session(
            id,
            &self.words,
            &self.profile_id,
            self.profile,
            self.word_count,
            &mut self.rng,
        );
        info!(
            session = id,
            profile = %self.profile_id,
            words = self.word_count.get(),
            "session reset"
        );
    }

    pub fn set_profile(&mut self, id: &str) -> Result<()> {
        self.profile = *self.profiles.get(id)?;
        self.profile_id = id.to_string();
        self.reset();
        Ok(())
    }

    /// Move the profile selector one step and reset
    pub fn cycle_profile(&mut self, forward: bool) {
        let id = if forward {
            self.profiles.next_id(&self.profile_id)
        } else {
            self.profiles.prev_id(&self.profile_id)
        }
        .to_string();
        if let Ok(profile) = self.profiles.get(&id) {
            self.profile = *profile;
            self.profile_id = id;
        }
        self.reset();
    }

    /// Clamp into range and reset
    pub fn set_word_count(&mut self, count: usize) {
        self.word_count = clamp_word_count(count);
        self.reset();
    }

    pub fn adjust_word_count(&mut self, delta: isize) {
        let count = self.word_count.get().saturating_add_signed(delta);
        self.set_word_count(count);
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn profile_id(&self) -> &str {
        &self.profile_id
    }

    pub fn word_count(&self) -> usize {
        self.word_count.get()
    }

    pub fn profiles(&self) -> &ProfileTable {
        &self.profiles
    }
}

fn build_session(
    id: u64,
    words: &WordList,
    profile_id: &str,
    profile: LatencyProfile,
    word_count: NonZeroUsize,
    rng: &mut StdRng,
) -> Session {
    let sentence = generate_sentence(words, word_count, rng);
    let jitter = StdRng::seed_from_u64(rng.gen());
    Session::new(id, &sentence, profile_id, profile, jitter)
}
