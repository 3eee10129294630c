//! One-shot number ramp for the hero statistics.

use std::time::Duration;

use crate::dom::NodeId;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CounterState {
    NotStarted,
    Running { current: f64 },
    Done,
}

#[derive(Debug, Clone)]
pub struct CounterAnimation {
    pub node: NodeId,
    target: u64,
    /// Trailing text after the number ("+", "%"), kept as displayed.
    suffix: String,
    step: f64,
    state: CounterState,
}

/// Leading integer of a displayed value, `parseInt` style.
pub fn parse_target(text: &str) -> Option<(u64, String)> {
    let t = text.trim();
    let digits: String = t.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let value = digits.parse().ok()?;
    Some((value, t[digits.len()..].trim().to_string()))
}

impl CounterAnimation {
    /// Build a counter from the element's current text. `None` when the
    /// text does not start with a number.
    pub fn from_text(node: NodeId, text: &str, duration: Duration, tick: Duration) -> Option<Self> {
        let (target, suffix) = parse_target(text)?;
        let ticks = if tick.is_zero() {
            1.0
        } else {
            (duration.as_secs_f64() / tick.as_secs_f64()).max(1.0)
        };
        Some(Self {
            node,
            target,
            suffix,
            step: target as f64 / ticks,
            state: CounterState::NotStarted,
        })
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    pub fn state(&self) -> CounterState {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.state == CounterState::Done
    }

    /// Begin the ramp from zero. Only the first call has any effect.
    pub fn start(&mut self) -> bool {
        if self.state != CounterState::NotStarted {
            return false;
        }
        self.state = CounterState::Running { current: 0.0 };
        true
    }

    /// Advance one tick. Returns `true` while more ticks are needed.
    pub fn tick(&mut self) -> bool {
        let CounterState::Running { current } = self.state else {
            return false;
        };
        let next = current + self.step;
        if next >= self.target as f64 {
            self.state = CounterState::Done;
            log::debug!("counter {:?} reached {}", self.node, self.target);
            false
        } else {
            self.state = CounterState::Running { current: next };
            true
        }
    }

    /// Text to show right now.
    pub fn display(&self) -> String {
        let value = match self.state {
            CounterState::NotStarted => 0,
            CounterState::Running { current } => current.floor() as u64,
            CounterState::Done => self.target,
        };
        format!("{}{}", value, self.suffix)
    }
}
