//! In-memory backend.
//!
//! Keeps the current contents of every destination plus the full, ordered
//! log of operations, which is what driver tests assert against.  A failure
//! can be armed per `(sink, op)` to exercise error propagation.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use lr_core::SinkId;

use crate::sink::Sink;
use crate::{SinkError, SinkResult};

/// One recorded sink call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SinkOp {
    Clear(SinkId),
    Append(SinkId, String),
}

impl SinkOp {
    pub fn sink(&self) -> &SinkId {
        match self {
            SinkOp::Clear(s) | SinkOp::Append(s, _) => s,
        }
    }
}

#[derive(Default)]
struct State {
    contents: HashMap<SinkId, Vec<String>>,
    ops:      Vec<SinkOp>,
    failures: HashSet<(SinkId, &'static str)>,
}

/// Thread-safe recording sink.
#[derive(Default)]
pub struct MemorySink {
    state: Mutex<State>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every future `op` (`"clear"` or `"append"`) on `sink` fail.
    pub fn fail_on(&self, sink: impl Into<SinkId>, op: &'static str) {
        self.lock().failures.insert((sink.into(), op));
    }

    /// Lines currently held by `sink` (empty if never written).
    pub fn lines(&self, sink: &SinkId) -> Vec<String> {
        self.lock().contents.get(sink).cloned().unwrap_or_default()
    }

    /// Every successful operation, in call order.
    pub fn ops(&self) -> Vec<SinkOp> {
        self.lock().ops.clone()
    }

    pub fn op_count(&self) -> usize {
        self.lock().ops.len()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check(state: &State, sink: &SinkId, op: &'static str) -> SinkResult<()> {
        if state.failures.contains(&(sink.clone(), op)) {
            return Err(SinkError::Injected { sink: sink.clone(), op });
        }
        Ok(())
    }
}

impl Sink for MemorySink {
    fn append(&self, sink: &SinkId, text: &str) -> SinkResult<()> {
        let mut state = self.lock();
        Self::check(&state, sink, "append")?;
        state.contents.entry(sink.clone()).or_default().push(text.to_owned());
        state.ops.push(SinkOp::Append(sink.clone(), text.to_owned()));
        Ok(())
    }

    fn clear(&self, sink: &SinkId) -> SinkResult<()> {
        let mut state = self.lock();
        Self::check(&state, sink, "clear")?;
        state.contents.insert(sink.clone(), Vec::new());
        state.ops.push(SinkOp::Clear(sink.clone()));
        Ok(())
    }
}
