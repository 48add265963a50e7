//! Per-call stream state
//!
//! `Idle → Opened → Streaming → {Finished | Aborted | Errored}`.
//! Terminal phases are sticky: the first `terminate` wins and every later
//! attempt is refused, which is what makes the finish callback fire once.

/// Lifecycle phase of one chat call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamPhase {
    Idle,
    Opened,
    Streaming,
    Finished,
    Aborted,
    Errored,
}

impl StreamPhase {
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Finished | Self::Aborted | Self::Errored)
    }
}

/// Text buffers plus phase, owned by exactly one call.
///
/// `released` is what the caller has seen (accumulated text); `pending`
/// holds text received from the network but not yet released by the
/// animator. Lengths are counted in chars.
#[derive(Debug)]
pub struct StreamState {
    phase: StreamPhase,
    released: String,
    pending: String,
    pending_chars: usize,
    received_chars: usize,
}

impl Default for StreamState {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamState {
    pub fn new() -> Self {
        Self {
            phase: StreamPhase::Idle,
            released: String::new(),
            pending: String::new(),
            pending_chars: 0,
            received_chars: 0,
        }
    }

    pub const fn phase(&self) -> StreamPhase {
        self.phase
    }

    pub const fn is_finished(&self) -> bool {
        self.phase.is_terminal()
    }

    pub fn is_aborted(&self) -> bool {
        self.phase == StreamPhase::Aborted
    }

    /// Response headers arrived.
    pub fn open(&mut self) -> bool {
        self.advance(StreamPhase::Idle, StreamPhase::Opened)
    }

    /// Headers were accepted; frames follow.
    pub fn start_streaming(&mut self) -> bool {
        self.advance(StreamPhase::Opened, StreamPhase::Streaming)
    }

    fn advance(&mut self, from: StreamPhase, to: StreamPhase) -> bool {
        if self.phase == from {
            self.phase = to;
            true
        } else {
            false
        }
    }

    /// Move into a terminal phase. Returns `true` only for the first call.
    pub fn terminate(&mut self, phase: StreamPhase) -> bool {
        debug_assert!(phase.is_terminal());
        if self.phase.is_terminal() {
            return false;
        }
        self.phase = phase;
        true
    }

    /// Append a delta in arrival order. Ignored once terminal.
    pub fn push_delta(&mut self, delta: &str) -> bool {
        if self.phase.is_terminal() || delta.is_empty() {
            return false;
        }
        let n = delta.chars().count();
        self.pending.push_str(delta);
        self.pending_chars += n;
        self.received_chars += n;
        true
    }

    /// Move up to `count` chars from the front of `pending` into
    /// `released`, returning the moved chunk.
    pub fn release(&mut self, count: usize) -> String {
        let count = count.min(self.pending_chars);
        let split = self
            .pending
            .char_indices()
            .nth(count)
            .map_or(self.pending.len(), |(idx, _)| idx);
        let chunk: String = self.pending.drain(..split).collect();
        self.pending_chars -= count;
        self.released.push_str(&chunk);
        chunk
    }

    /// Release everything still pending.
    pub fn flush(&mut self) {
        self.release(self.pending_chars);
    }

    pub fn released(&self) -> &str {
        &self.released
    }

    pub const fn pending_len(&self) -> usize {
        self.pending_chars
    }

    pub fn released_len(&self) -> usize {
        self.received_chars - self.pending_chars
    }

    pub const fn received_len(&self) -> usize {
        self.received_chars
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_path_transitions() {
        let mut state = StreamState::new();
        assert!(state.open());
        assert!(!state.open());
        assert!(state.start_streaming());
        assert_eq!(state.phase(), StreamPhase::Streaming);
        assert!(state.terminate(StreamPhase::Finished));
        assert!(state.is_finished());
    }

    #[test]
    fn terminate_is_idempotent() {
        let mut state = StreamState::new();
        assert!(state.terminate(StreamPhase::Aborted));
        assert!(!state.terminate(StreamPhase::Finished));
        assert!(!state.terminate(StreamPhase::Aborted));
        assert!(state.is_aborted());
    }

    #[test]
    fn opened_can_jump_to_terminal_without_streaming() {
        let mut state = StreamState::new();
        state.open();
        assert!(state.terminate(StreamPhase::Errored));
        assert!(!state.start_streaming());
    }

    #[test]
    fn deltas_after_terminal_are_ignored() {
        let mut state = StreamState::new();
        state.push_delta("ab");
        state.terminate(StreamPhase::Finished);
        assert!(!state.push_delta("cd"));
        assert_eq!(state.received_len(), 2);
        state.flush();
        assert_eq!(state.released(), "ab");
    }

    #[test]
    fn release_respects_char_boundaries() {
        let mut state = StreamState::new();
        state.push_delta("héllo wörld");
        assert_eq!(state.release(2), "hé");
        assert_eq!(state.pending_len(), 9);
        assert_eq!(state.released_len() + state.pending_len(), state.received_len());
        state.flush();
        assert_eq!(state.released(), "héllo wörld");
        assert_eq!(state.pending_len(), 0);
    }
}
