use std::rc::Rc;
use std::time::Duration;

/// A keydown as seen by the tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyStroke {
    Char(char),
    /// Backspace or any other correction command
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    Pending,
    Correct,
    Incorrect,
}

/// One rendered character of the target sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharCell {
    pub expected: char,
    pub glyph: char,
    pub mark: Mark,
}

impl CharCell {
    fn pending(expected: char) -> Self {
        Self {
            expected,
            glyph: expected,
            mark: Mark::Pending,
        }
    }
}

/// Side effects the caller must perform after an input change
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputUpdate {
    /// First non-empty input of the session; the ghost should start now
    pub started: bool,
    /// Typed length reached the sentence length for the first time
    pub ended: bool,
}

/// Captures the user's keystroke timing and correctness against the sentence
#[derive(Debug, Clone)]
pub struct LiveTracker {
    sentence: Rc<[char]>,
    timestamps: Vec<Duration>,
    latencies: Vec<f64>,
    typed: Vec<char>,
    cells: Vec<CharCell>,
    caret: usize,
    started: bool,
    ended: bool,
}

impl LiveTracker {
    pub fn new(sentence: Rc<[char]>) -> Self {
        let cells = sentence.iter().copied().map(CharCell::pending).collect();
        Self {
            sentence,
            timestamps: Vec::new(),
            latencies: Vec::new(),
            typed: Vec::new(),
            cells,
            caret: 0,
            started: false,
            ended: false,
        }
    }

    pub fn on_key_down(&mut self, key: KeyStroke, now: Duration) {
        match key {
            KeyStroke::Delete => {
                if self.timestamps.len() > 1 {
                    self.timestamps.pop();
                    self.latencies.pop();
                } else {
                    self.timestamps.pop();
                }
            }
            KeyStroke::Char(_) => {
                if let Some(&previous) = self.timestamps.last() {
                    self.latencies.push(millis(now.saturating_sub(previous)));
                }
                self.timestamps.push(now);
            }
        }
    }

    pub fn on_input_changed(&mut self, typed: &str) -> InputUpdate {
        let mut update = InputUpdate::default();
        self.typed = typed.chars().collect();

        if !self.started && !self.typed.is_empty() {
            self.started = true;
            update.started = true;
        }

        for (idx, cell) in self.cells.iter_mut().enumerate() {
            *cell = match self.typed.get(idx) {
                None => CharCell::pending(cell.expected),
                Some(&actual) if actual == cell.expected => CharCell {
                    mark: Mark::Correct,
                    ..CharCell::pending(cell.expected)
                },
                Some(_) => CharCell {
                    expected: cell.expected,
                    glyph: if cell.expected == ' ' {
                        '_'
                    } else {
                        cell.expected
                    },
                    mark: Mark::Incorrect,
                },
            };
        }

        self.caret = self.typed.len().min(self.sentence.len());

        if self.typed.len() == self.sentence.len() && !self.ended {
            self.ended = true;
            update.ended = true;
        }

        update
    }

    /// Forget recorded timing without touching the typed text
    pub fn clear_timing(&mut self) {
        self.timestamps.clear();
        self.latencies.clear();
    }

    pub fn timestamps(&self) -> &[Duration] {
        &self.timestamps
    }

    pub fn latencies(&self) -> &[f64] {
        &self.latencies
    }

    pub fn cells(&self) -> &[CharCell] {
        &self.cells
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn typed_len(&self) -> usize {
        self.typed.len()
    }

    pub fn has_started(&self) -> bool {
        self.started
    }

    pub fn has_ended(&self) -> bool {
        self.ended
    }

    /// Percentage of sentence positions typed correctly
    pub fn accuracy(&self) -> f64 {
        if self.cells.is_empty() {
            return 0.0;
        }
        let correct = self
            .cells
            .iter()
            .filter(|cell| cell.mark == Mark::Correct)
            .count();
        (correct as f64 / self.cells.len() as f64 * 100.0).round()
    }
}

fn millis(d: Duration) -> f64 {
    d.as_nanos() as f64 / 1_000_000.0
}
