//! Per-evaluation state
//!
//! An [`EvaluationContext`] lives for exactly one evaluation. It holds the
//! record's attributes (read-only) and one optional [`IterationCursor`] per
//! quantifier slot of the compiled tree. Nothing in it is shared between
//! evaluations, so a compiled expression can be evaluated from many threads at
//! once, each with its own context.

use crate::record::AttributeLookup;
use ael_types::{TemporalFormats, Value};
use chrono::{DateTime, FixedOffset, Utc};

/// Index of a quantifier's loop variable within the context
pub type SlotId = usize;

/// One binding a quantifier iterates over
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Candidate {
    /// An attribute name; its value is looked up when the loop variable is read
    Attribute(String),
    /// A literal value, e.g. one piece of a delimited list
    Value(String),
}

/// Position of one quantifier in its candidate list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IterationCursor {
    candidates: Vec<Candidate>,
    position: usize,
}

impl IterationCursor {
    /// A cursor bound to the first candidate; `None` when there are none
    pub fn start(candidates: Vec<Candidate>) -> Option<Self> {
        (!candidates.is_empty()).then_some(Self {
            candidates,
            position: 0,
        })
    }

    pub fn current(&self) -> Option<&Candidate> {
        self.candidates.get(self.position)
    }

    /// Candidates still to be bound after the current one
    pub fn remaining(&self) -> usize {
        self.candidates.len().saturating_sub(self.position + 1)
    }

    /// The cursor bound to the next candidate
    pub fn advanced(self) -> Option<Self> {
        (self.remaining() > 0).then(|| Self {
            position: self.position + 1,
            ..self
        })
    }
}

pub struct EvaluationContext<'a> {
    attributes: &'a dyn AttributeLookup,
    formats: &'a TemporalFormats,
    cursors: Vec<Option<IterationCursor>>,
    iterations: usize,
    clock: Option<DateTime<FixedOffset>>,
}

impl<'a> EvaluationContext<'a> {
    pub fn new(attributes: &'a dyn AttributeLookup, formats: &'a TemporalFormats) -> Self {
        Self {
            attributes,
            formats,
            cursors: Vec::new(),
            iterations: 0,
            clock: None,
        }
    }

    /// Pin the instant returned by `now()`
    pub fn with_clock(mut self, now: DateTime<FixedOffset>) -> Self {
        self.clock = Some(now);
        self
    }

    pub fn attributes(&self) -> &'a dyn AttributeLookup {
        self.attributes
    }

    pub fn formats(&self) -> &'a TemporalFormats {
        self.formats
    }

    /// Attribute value, or [`Value::Unset`] when the record lacks it
    pub fn lookup(&self, name: &str) -> Value {
        match self.attributes.lookup(name) {
            Some(value) => Value::String(value.into_owned()),
            None => Value::Unset,
        }
    }

    pub fn now(&self) -> DateTime<FixedOffset> {
        self.clock.unwrap_or_else(|| Utc::now().into())
    }

    /// Number of candidate bindings evaluated so far
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub(crate) fn ensure_slots(&mut self, slots: usize) {
        if self.cursors.len() < slots {
            self.cursors.resize(slots, None);
        }
    }

    pub(crate) fn cursor(&self, slot: SlotId) -> Option<&IterationCursor> {
        self.cursors.get(slot).and_then(Option::as_ref)
    }

    pub(crate) fn bind(&mut self, slot: SlotId, cursor: IterationCursor) {
        self.ensure_slots(slot + 1);
        self.cursors[slot] = Some(cursor);
    }

    /// Move the slot to its next candidate; false when it was on the last one
    pub(crate) fn advance(&mut self, slot: SlotId) -> bool {
        let next = self
            .cursors
            .get_mut(slot)
            .and_then(Option::take)
            .and_then(IterationCursor::advanced);
        let moved = next.is_some();
        if let Some(cell) = self.cursors.get_mut(slot) {
            *cell = next;
        }
        moved
    }

    pub(crate) fn release(&mut self, slot: SlotId) {
        if let Some(cell) = self.cursors.get_mut(slot) {
            *cell = None;
        }
    }

    pub(crate) fn record_iteration(&mut self) {
        self.iterations += 1;
    }
}
