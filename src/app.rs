use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;
use tracing::debug;

use crate::controller::SessionController;
use crate::session::Session;
use crate::tracker::KeyStroke;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    /// Sentence shown behind a start gate; settings can change
    Overlay,
    Typing,
    Results,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    Quit,
}

#[derive(Debug)]
pub struct App {
    pub controller: SessionController,
    pub state: AppState,
    typed: String,
}

impl App {
    pub fn new(controller: SessionController) -> Self {
        Self {
            controller,
            state: AppState::Overlay,
            typed: String::new(),
        }
    }

    pub fn session(&self) -> &Session {
        self.controller.session()
    }

    pub fn typed(&self) -> &str {
        &self.typed
    }

    pub fn next_due(&self) -> Option<Duration> {
        self.controller.session().next_due()
    }

    /// Fire due ghost ticks; returns how many fired so the caller knows to redraw
    pub fn on_tick(&mut self, now: Duration) -> usize {
        let ticks = self.controller.session_mut().advance(now);
        for tick in &ticks {
            debug!(
                typed = tick.typed,
                delay_ms = tick.delay_ms,
                finished = tick.finished,
                "ghost tick"
            );
        }
        ticks.len()
    }

    pub fn reset(&mut self) {
        self.controller.reset();
        self.typed.clear();
        self.state = AppState::Overlay;
    }

    pub fn on_key(&mut self, key: KeyEvent, now: Duration) -> KeyOutcome {
        if key.kind != KeyEventKind::Press {
            return KeyOutcome::Continue;
        }
        if key.code == KeyCode::Esc
            || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
        {
            return KeyOutcome::Quit;
        }

        match self.state {
            AppState::Overlay => self.on_overlay_key(key),
            AppState::Typing => self.on_typing_key(key, now),
            AppState::Results => self.on_results_key(key),
        }
        KeyOutcome::Continue
    }

    fn on_overlay_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                self.controller.session_mut().clear_sequences();
                self.state = AppState::Typing;
            }
            KeyCode::Right => self.change_settings(|c| c.cycle_profile(true)),
            KeyCode::Left => self.change_settings(|c| c.cycle_profile(false)),
            KeyCode::Up => self.change_settings(|c| c.adjust_word_count(1)),
            KeyCode::Down => self.change_settings(|c| c.adjust_word_count(-1)),
            _ => {}
        }
    }

    fn on_typing_key(&mut self, key: KeyEvent, now: Duration) {
        let word_delete = key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);

        match key.code {
            KeyCode::Tab => self.reset(),
            KeyCode::Backspace if !word_delete => {
                let session = self.controller.session_mut();
                session.on_key_down(KeyStroke::Delete, now);
                self.typed.pop();
                session.on_input_changed(&self.typed, now);
            }
            KeyCode::Char(c) if !word_delete => {
                let session = self.controller.session_mut();
                session.on_key_down(KeyStroke::Char(c), now);
                self.typed.push(c);
                if session.on_input_changed(&self.typed, now).ended {
                    self.state = AppState::Results;
                }
            }
            _ => {}
        }
    }

    fn on_results_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('r') | KeyCode::Tab => self.reset(),
            KeyCode::Char('p') => self.change_settings(|c| c.cycle_profile(true)),
            KeyCode::Char('P') => self.change_settings(|c| c.cycle_profile(false)),
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.change_settings(|c| c.adjust_word_count(1))
            }
            KeyCode::Char('-') => self.change_settings(|c| c.adjust_word_count(-1)),
            _ => {}
        }
    }

    /// Selector changes always start over behind the overlay
    fn change_settings<F: FnOnce(&mut SessionController)>(&mut self, change: F) {
        change(&mut self.controller);
        self.typed.clear();
        self.state = AppState::Overlay;
    }
}
