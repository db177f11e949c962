use rand::rngs::StdRng;
use std::rc::Rc;
use std::time::Duration;
use tracing::debug;

use crate::chart::ComparisonChart;
use crate::ghost::{GhostReplay, GhostTick};
use crate::profile::LatencyProfile;
use crate::summary::SessionSummary;
use crate::tracker::{KeyStroke, LiveTracker};

/// Notable transitions caused by one input change
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionEvents {
    pub ghost_started: bool,
    pub ended: bool,
}

/// One attempt at the typing test. Live tracking and ghost replay share the
/// same sentence instance; a reset replaces the whole session.
#[derive(Debug)]
pub struct Session {
    id: u64,
    sentence: Rc<[char]>,
    profile_id: String,
    profile: LatencyProfile,
    tracker: LiveTracker,
    ghost: GhostReplay,
    jitter: StdRng,
    chart_visible: bool,
}

impl Session {
    pub fn new(
        id: u64,
        sentence: &str,
        profile_id: impl Into<String>,
        profile: LatencyProfile,
        jitter: StdRng,
    ) -> Self {
        let sentence: Rc<[char]> = sentence.chars().collect::<Vec<_>>().into();
        Self {
            id,
            tracker: LiveTracker::new(Rc::clone(&sentence)),
            ghost: GhostReplay::new(id, Rc::clone(&sentence)),
            sentence,
            profile_id: profile_id.into(),
            profile,
            jitter,
            chart_visible: false,
        }
    }

    pub fn on_key_down(&mut self, key: KeyStroke, now: Duration) {
        if self.tracker.has_ended() {
            return;
        }
        self.tracker.on_key_down(key, now);
        debug!(
            session = self.id,
            ?key,
            timestamps = self.tracker.timestamps().len(),
            "key down"
        );
    }

    pub fn on_input_changed(&mut self, typed: &str, now: Duration) -> SessionEvents {
        let update = self.tracker.on_input_changed(typed);
        let mut events = SessionEvents::default();

        if update.started {
            events.ghost_started = self.ghost.start(&self.profile, &mut self.jitter, now);
        }
        if update.ended {
            self.chart_visible = true;
            events.ended = true;
            debug!(
                session = self.id,
                latencies = self.tracker.latencies().len(),
                "test ended"
            );
        }

        events
    }

    /// Run every ghost tick due at `now`
    pub fn advance(&mut self, now: Duration) -> Vec<GhostTick> {
        self.ghost.advance(now)
    }

    pub fn next_due(&self) -> Option<Duration> {
        self.ghost.next_due()
    }

    /// Forget timing recorded before the test was focused
    pub fn clear_sequences(&mut self) {
        self.tracker.clear_timing();
        self.ghost.cancel();
    }

    /// Cancel the pending ghost tick; the session must not be reused after this
    pub fn cancel(&mut self) {
        self.ghost.cancel();
    }

    /// Chart data for the current sequences
    pub fn chart(&self) -> ComparisonChart {
        ComparisonChart::new(self.tracker.latencies(), self.ghost.latencies())
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary::new(
            self.tracker.latencies(),
            self.ghost.latencies(),
            self.tracker.accuracy(),
        )
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn sentence(&self) -> &[char] {
        &self.sentence
    }

    pub fn sentence_text(&self) -> String {
        self.sentence.iter().collect()
    }

    pub fn profile_id(&self) -> &str {
        &self.profile_id
    }

    pub fn tracker(&self) -> &LiveTracker {
        &self.tracker
    }

    pub fn ghost(&self) -> &GhostReplay {
        &self.ghost
    }

    pub fn is_chart_visible(&self) -> bool {
        self.chart_visible
    }

    pub fn has_started(&self) -> bool {
        self.tracker.has_started()
    }

    pub fn has_ended(&self) -> bool {
        self.tracker.has_ended()
    }
}
