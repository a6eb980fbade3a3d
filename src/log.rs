use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

const MIN_HISTORY_CAPACITY: usize = 8;
const DEFAULT_HISTORY_CAPACITY: usize = 32;

/// How a log entry is surfaced to the player.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    /// Displayed in insertion order; the next entry waits for an
    /// acknowledgment.
    Blocking,
    /// Fire-and-replace idle text (latest wins, no acknowledgment).
    Prompt,
}

/// One unit of battle narration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub text: String,
    pub kind: LogKind,
}

impl LogEntry {
    pub fn blocking(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: LogKind::Blocking,
        }
    }

    pub fn prompt(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: LogKind::Prompt,
        }
    }
}

/// Acknowledgment-gated message queue between the battle engine (sole
/// producer) and the presentation layer (sole consumer).
///
/// Blocking entries render strictly in insertion order, one at a time; each
/// needs an `acknowledge` call before the next is shown. Prompt entries
/// replace a cached idle line that is shown whenever no blocking entry is
/// displayed. An acknowledgment that arrives while nothing is displayed is
/// buffered and consumed by the next blocking entry, so input is never lost.
#[derive(Debug)]
pub struct LogChannel {
    displayed: Option<String>,
    queue: VecDeque<String>,
    cached_prompt: Option<String>,
    ack_buffered: bool,
    history: VecDeque<String>,
    history_capacity: usize,
}

impl Default for LogChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl LogChannel {
    pub fn new() -> Self {
        Self::with_history_capacity(DEFAULT_HISTORY_CAPACITY)
    }

    pub fn with_history_capacity(capacity: usize) -> Self {
        Self {
            displayed: None,
            queue: VecDeque::new(),
            cached_prompt: None,
            ack_buffered: false,
            history: VecDeque::new(),
            history_capacity: capacity.max(MIN_HISTORY_CAPACITY),
        }
    }

    /// True while a blocking entry is displayed or more are queued.
    pub fn is_busy(&self) -> bool {
        self.displayed.is_some() || !self.queue.is_empty()
    }

    /// The line the presentation layer should render right now: the displayed
    /// blocking entry, else the cached prompt.
    pub fn current(&self) -> Option<&str> {
        self.displayed
            .as_deref()
            .or(self.cached_prompt.as_deref())
    }

    pub fn push(&mut self, entry: LogEntry) {
        if entry.text.is_empty() {
            return;
        }

        match entry.kind {
            LogKind::Prompt => {
                self.cached_prompt = Some(entry.text);
            }
            LogKind::Blocking => {
                self.record_history(&entry.text);
                if self.displayed.is_none() {
                    self.begin_display(entry.text);
                } else {
                    self.queue.push_back(entry.text);
                }
            }
        }
    }

    /// Advance past the displayed blocking entry. When nothing is displayed
    /// the acknowledgment is buffered; on a fully idle channel it is a no-op
    /// for everything already rendered.
    pub fn acknowledge(&mut self) {
        if self.displayed.is_some() {
            self.advance();
        } else {
            self.ack_buffered = true;
        }
    }

    /// Drop everything pending and displayed; the cached prompt survives.
    pub fn clear(&mut self) {
        self.displayed = None;
        self.queue.clear();
        self.ack_buffered = false;
    }

    /// Bounded history of every blocking line pushed, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &str> {
        self.history.iter().map(String::as_str)
    }

    fn begin_display(&mut self, text: String) {
        self.displayed = Some(text);
        if self.ack_buffered {
            self.ack_buffered = false;
            self.advance();
        }
    }

    fn advance(&mut self) {
        self.displayed = self.queue.pop_front();
    }

    fn record_history(&mut self, text: &str) {
        if self.history.len() >= self.history_capacity {
            self.history.pop_front();
        }
        self.history.push_back(text.to_string());
    }
}
