//! Ghost typist replay.
//!
//! The ghost "types" the session sentence on its own cadence: one delay per
//! adjacent character pair, looked up from the profile by bigram-direction
//! class and jittered by a factor in `[JITTER_MIN, JITTER_MAX]`. Ticks are
//! cooperative; the event loop asks for [`GhostReplay::next_due`], sleeps at
//! most that long and then calls [`GhostReplay::advance`].

use rand::Rng;
use std::rc::Rc;
use std::time::Duration;
use tracing::debug;

use crate::direction::{bigram_classes, BigramClass};
use crate::profile::LatencyProfile;

pub const JITTER_MIN: f64 = 0.75;
pub const JITTER_MAX: f64 = 1.25;

/// Delay the ghost waits before typing the next character
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GhostDelay {
    pub class: BigramClass,
    pub base_ms: f64,
    pub jittered_ms: f64,
}

/// Compute the full jittered delay plan for a sentence, `len - 1` entries
pub fn plan_delays<R: Rng + ?Sized>(
    sentence: &[char],
    profile: &LatencyProfile,
    rng: &mut R,
) -> Vec<GhostDelay> {
    bigram_classes(sentence)
        .into_iter()
        .map(|class| {
            let base_ms = profile.latency(class);
            GhostDelay {
                class,
                base_ms,
                jittered_ms: base_ms * rng.gen_range(JITTER_MIN..=JITTER_MAX),
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GhostState {
    Idle,
    Running,
    Done,
}

/// Handle to the one pending ghost tick. Dropping it from the replay is the
/// cancellation; nothing else can fire a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskHandle {
    pub session: u64,
    pub due: Duration,
}

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GhostTick {
    /// Number of characters the ghost has typed after this tick
    pub typed: usize,
    pub delay_ms: f64,
    pub finished: bool,
}

#[derive(Debug, Clone)]
pub struct GhostReplay {
    session: u64,
    sentence: Rc<[char]>,
    state: GhostState,
    plan: Vec<GhostDelay>,
    cursor: usize,
    latencies: Vec<f64>,
    pending: Option<TaskHandle>,
}

impl GhostReplay {
    pub fn new(session: u64, sentence: Rc<[char]>) -> Self {
        Self {
            session,
            sentence,
            state: GhostState::Idle,
            plan: Vec::new(),
            cursor: 0,
            latencies: Vec::new(),
            pending: None,
        }
    }

    /// Idle -> Running. The ghost types the first character at `now`.
    /// Returns false if the replay was not idle.
    pub fn start<R: Rng + ?Sized>(
        &mut self,
        profile: &LatencyProfile,
        rng: &mut R,
        now: Duration,
    ) -> bool {
        if self.state != GhostState::Idle {
            return false;
        }

        self.plan = plan_delays(&self.sentence, profile, rng);
        self.cursor = 0;
        self.latencies.clear();

        match self.plan.first() {
            Some(first) => {
                self.state = GhostState::Running;
                self.pending = Some(TaskHandle {
                    session: self.session,
                    due: now + from_millis(first.jittered_ms),
                });
            }
            None => {
                self.state = GhostState::Done;
                self.pending = None;
            }
        }

        debug!(
            session = self.session,
            delays = self.plan.len(),
            state = ?self.state,
            "ghost started"
        );
        true
    }

    pub fn next_due(&self) -> Option<Duration> {
        self.pending.map(|handle| handle.due)
    }

    /// Fire the pending tick if it is due at `now`
    pub fn tick(&mut self, now: Duration) -> Option<GhostTick> {
        let handle = self.pending.filter(|handle| handle.due <= now)?;
        let delay = *self.plan.get(self.cursor)?;

        self.latencies.push(delay.jittered_ms);
        self.cursor += 1;

        let finished = self.cursor == self.plan.len();
        if finished {
            self.state = GhostState::Done;
            self.pending = None;
            debug!(session = self.session, "ghost done");
        } else {
            let next = self.plan[self.cursor];
            self.pending = Some(TaskHandle {
                session: handle.session,
                due: handle.due + from_millis(next.jittered_ms),
            });
        }

        Some(GhostTick {
            typed: self.cursor + 1,
            delay_ms: delay.jittered_ms,
            finished,
        })
    }

    /// Fire every tick due at `now`, in schedule order
    pub fn advance(&mut self, now: Duration) -> Vec<GhostTick> {
        std::iter::from_fn(|| self.tick(now)).collect()
    }

    /// Drop the pending tick and all partial replay state
    pub fn cancel(&mut self) {
        if self.pending.take().is_some() {
            debug!(session = self.session, typed = self.cursor, "ghost cancelled");
        }
        self.state = GhostState::Idle;
        self.plan.clear();
        self.cursor = 0;
        self.latencies.clear();
    }

    pub fn state(&self) -> GhostState {
        self.state
    }

    pub fn plan(&self) -> &[GhostDelay] {
        &self.plan
    }

    pub fn latencies(&self) -> &[f64] {
        &self.latencies
    }

    pub fn pending(&self) -> Option<TaskHandle> {
        self.pending
    }

    /// Characters typed by the ghost so far; the ghost caret sits right after
    /// them. `None` while idle.
    pub fn caret(&self) -> Option<usize> {
        match self.state {
            GhostState::Idle => None,
            GhostState::Running | GhostState::Done => {
                Some((self.cursor + 1).min(self.sentence.len()))
            }
        }
    }
}

fn from_millis(ms: f64) -> Duration {
    Duration::from_secs_f64(ms.max(0.0) / 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::ProfileTable;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const SCENARIO: &str = r#"{
        "P1": { "LL": 300, "LR": 400, "LS": 380, "RL": 420, "RR": 280, "RS": 390, "SL": 400, "SR": 420, "SS": 200 }
    }"#;

    fn profile() -> LatencyProfile {
        *ProfileTable::from_json(SCENARIO).unwrap().get("P1").unwrap()
    }

    fn sentence(s: &str) -> Rc<[char]> {
        s.chars().collect::<Vec<_>>().into()
    }

    #[test]
    fn test_plan_scenario() {
        let chars: Vec<char> = "ab cd".chars().collect();
        let mut rng = StdRng::seed_from_u64(3);
        let plan = plan_delays(&chars, &profile(), &mut rng);

        let bases: Vec<f64> = plan.iter().map(|d| d.base_ms).collect();
        assert_eq!(bases, vec![280.0, 390.0, 420.0, 280.0]);
        for delay in &plan {
            assert!(delay.jittered_ms >= delay.base_ms * JITTER_MIN);
            assert!(delay.jittered_ms <= delay.base_ms * JITTER_MAX);
        }
    }

    #[test]
    fn test_plan_uses_left_hand_classes() {
        let chars: Vec<char> = "AP Q".chars().collect();
        let mut rng = StdRng::seed_from_u64(3);
        let codes: Vec<String> = plan_delays(&chars, &profile(), &mut rng)
            .iter()
            .map(|d| d.class.to_string())
            .collect();
        assert_eq!(codes, vec!["LR", "RS", "SL"]);
    }

    #[test]
    fn test_jitter_bounds_many_seeds() {
        let chars: Vec<char> = "The Quick brown FOX jumps".chars().collect();
        for seed in 0..100 {
            let mut rng = StdRng::seed_from_u64(seed);
            for delay in plan_delays(&chars, &profile(), &mut rng) {
                let factor = delay.jittered_ms / delay.base_ms;
                assert!((JITTER_MIN..=JITTER_MAX).contains(&factor), "{factor}");
            }
        }
    }

    #[test]
    fn test_runs_exactly_len_minus_one_ticks() {
        let s = sentence("hello world");
        let mut ghost = GhostReplay::new(1, s.clone());
        let mut rng = StdRng::seed_from_u64(9);
        assert!(ghost.start(&profile(), &mut rng, Duration::ZERO));
        assert_eq!(ghost.state(), GhostState::Running);
        assert_eq!(ghost.caret(), Some(1));

        let mut ticks = 0;
        while let Some(due) = ghost.next_due() {
            let tick = ghost.tick(due).unwrap();
            ticks += 1;
            assert_eq!(tick.typed, ticks + 1);
            assert_eq!(tick.finished, ticks == s.len() - 1);
        }

        assert_eq!(ticks, s.len() - 1);
        assert_eq!(ghost.latencies().len(), s.len() - 1);
        assert_eq!(ghost.state(), GhostState::Done);
        assert_eq!(ghost.caret(), Some(s.len()));
    }

    #[test]
    fn test_tick_waits_for_due_time() {
        let mut ghost = GhostReplay::new(1, sentence("ab"));
        let mut rng = StdRng::seed_from_u64(1);
        ghost.start(&profile(), &mut rng, Duration::from_secs(10));

        assert!(ghost.tick(Duration::from_secs(10)).is_none());
        assert!(ghost.latencies().is_empty());

        let due = ghost.next_due().unwrap();
        assert!(due > Duration::from_secs(10));
        assert!(ghost.tick(due).is_some());
    }

    #[test]
    fn test_advance_catches_up_in_order() {
        let mut ghost = GhostReplay::new(1, sentence("abcd"));
        let mut rng = StdRng::seed_from_u64(5);
        ghost.start(&profile(), &mut rng, Duration::ZERO);

        let ticks = ghost.advance(Duration::from_secs(60));
        assert_eq!(ticks.len(), 3);
        assert!(ticks[2].finished);
        let planned: Vec<f64> = ghost.plan().iter().map(|d| d.jittered_ms).collect();
        assert_eq!(ghost.latencies(), planned.as_slice());
    }

    #[test]
    fn test_schedule_keeps_cadence_when_late() {
        let mut ghost = GhostReplay::new(1, sentence("abc"));
        let mut rng = StdRng::seed_from_u64(5);
        ghost.start(&profile(), &mut rng, Duration::ZERO);

        let first_due = ghost.next_due().unwrap();
        ghost.tick(first_due + Duration::from_millis(50));
        let second_due = ghost.next_due().unwrap();
        let gap = second_due - first_due;
        let expected = from_millis(ghost.plan()[1].jittered_ms);
        assert_eq!(gap, expected);
    }

    #[test]
    fn test_single_char_sentence_is_done_immediately() {
        let mut ghost = GhostReplay::new(1, sentence("a"));
        let mut rng = StdRng::seed_from_u64(5);
        ghost.start(&profile(), &mut rng, Duration::ZERO);
        assert_eq!(ghost.state(), GhostState::Done);
        assert!(ghost.next_due().is_none());
        assert_eq!(ghost.caret(), Some(1));
    }

    #[test]
    fn test_start_only_from_idle() {
        let mut ghost = GhostReplay::new(1, sentence("abc"));
        let mut rng = StdRng::seed_from_u64(5);
        assert!(ghost.start(&profile(), &mut rng, Duration::ZERO));
        assert!(!ghost.start(&profile(), &mut rng, Duration::ZERO));
    }

    #[test]
    fn test_cancel_while_running() {
        let mut ghost = GhostReplay::new(1, sentence("hello"));
        let mut rng = StdRng::seed_from_u64(5);
        ghost.start(&profile(), &mut rng, Duration::ZERO);
        let due = ghost.next_due().unwrap();
        ghost.tick(due);
        assert_eq!(ghost.latencies().len(), 1);

        ghost.cancel();
        assert_eq!(ghost.state(), GhostState::Idle);
        assert!(ghost.pending().is_none());
        assert!(ghost.latencies().is_empty());
        assert!(ghost.caret().is_none());

        assert!(ghost.advance(Duration::from_secs(600)).is_empty());
        assert!(ghost.latencies().is_empty());
    }

    #[test]
    fn test_cancel_is_safe_in_every_state() {
        let mut ghost = GhostReplay::new(1, sentence("ab"));
        ghost.cancel();
        assert_eq!(ghost.state(), GhostState::Idle);

        let mut rng = StdRng::seed_from_u64(5);
        ghost.start(&profile(), &mut rng, Duration::ZERO);
        ghost.advance(Duration::from_secs(5));
        assert_eq!(ghost.state(), GhostState::Done);
        ghost.cancel();
        assert_eq!(ghost.state(), GhostState::Idle);
    }

    #[test]
    fn test_handle_carries_session() {
        let mut ghost = GhostReplay::new(42, sentence("abc"));
        let mut rng = StdRng::seed_from_u64(5);
        ghost.start(&profile(), &mut rng, Duration::ZERO);
        assert_eq!(ghost.pending().unwrap().session, 42);
    }
}
