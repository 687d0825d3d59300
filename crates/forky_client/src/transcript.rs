//! Transcript view: where chat entries and the loading indicator live.

use parking_lot::Mutex;

use crate::message::ChatMessage;

/// A message together with the markup it was rendered to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage {
    pub message: ChatMessage,
    pub html: String,
}

/// Chat surface the lifecycle writes to.
///
/// Methods take `&self` so overlapping requests can share one view;
/// implementations synchronise internally.
pub trait ChatView: Send + Sync {
    /// Append an entry and bring it into view.
    fn append_message(&self, entry: RenderedMessage);
    fn set_loading(&self, visible: bool);
    fn clear_input(&self);
}

#[derive(Debug, Default)]
struct TranscriptState {
    entries: Vec<RenderedMessage>,
    scroll_index: Option<usize>,
    loading: bool,
    loading_hidden_count: usize,
    input_cleared_count: usize,
}

/// Ordered, append-only in-memory transcript.
#[derive(Debug, Default)]
pub struct Transcript {
    state: Mutex<TranscriptState>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn entries(&self) -> Vec<RenderedMessage> {
        self.state.lock().entries.clone()
    }

    pub fn last(&self) -> Option<RenderedMessage> {
        self.state.lock().entries.last().cloned()
    }

    /// Index of the entry currently scrolled into view.
    pub fn scroll_index(&self) -> Option<usize> {
        self.state.lock().scroll_index
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().loading
    }

    /// Number of times the loading indicator was hidden.
    pub fn loading_hidden_count(&self) -> usize {
        self.state.lock().loading_hidden_count
    }

    pub fn input_cleared_count(&self) -> usize {
        self.state.lock().input_cleared_count
    }

    /// Concatenated markup of all entries, in order.
    pub fn to_html(&self) -> String {
        let state = self.state.lock();
        let mut out = String::from(r#"<div id="chat-messages">"#);
        for entry in &state.entries {
            out.push_str(&entry.html);
        }
        out.push_str("</div>");
        out
    }
}

impl ChatView for Transcript {
    fn append_message(&self, entry: RenderedMessage) {
        let mut state = self.state.lock();
        state.entries.push(entry);
        state.scroll_index = Some(state.entries.len() - 1);
    }

    fn set_loading(&self, visible: bool) {
        let mut state = self.state.lock();
        if !visible {
            state.loading_hidden_count += 1;
        }
        state.loading = visible;
    }

    fn clear_input(&self) {
        self.state.lock().input_cleared_count += 1;
    }
}
