//! Terminal implementations of the client's view traits.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use forky_client::slider::SliderControl;
use forky_client::{ChatView, Clipboard, ClientError, MemoryPage, PageView, RenderedMessage, Role, Transcript};
use forky_constant::app::{ASSISTANT_NAME, USER_NAME};
use indicatif::ProgressBar;
use parking_lot::Mutex;

use crate::output;

/// Prints entries as they are appended and keeps them for `--html`.
pub struct TerminalChat {
    transcript: Transcript,
    pending: AtomicUsize,
    spinner: Mutex<Option<ProgressBar>>,
}

impl TerminalChat {
    pub fn new() -> Self {
        Self {
            transcript: Transcript::new(),
            pending: AtomicUsize::new(0),
            spinner: Mutex::new(None),
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    fn with_spinner(&self, f: impl FnOnce(&mut Option<ProgressBar>)) {
        f(&mut self.spinner.lock());
    }
}

impl ChatView for TerminalChat {
    fn append_message(&self, entry: RenderedMessage) {
        self.with_spinner(|spinner| {
            let print = || match entry.message.role {
                Role::User => output::chat_entry(USER_NAME, false, &entry.message.content),
                Role::Assistant => output::chat_entry(ASSISTANT_NAME, true, &entry.message.content),
            };
            match spinner {
                Some(bar) => bar.suspend(print),
                None => print(),
            }
        });
        self.transcript.append_message(entry);
    }

    fn set_loading(&self, visible: bool) {
        if visible {
            if self.pending.fetch_add(1, Ordering::SeqCst) == 0 {
                self.with_spinner(|spinner| *spinner = Some(output::spinner("Thinking...")));
            }
        } else if self.pending.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.with_spinner(|spinner| {
                if let Some(bar) = spinner.take() {
                    bar.finish_and_clear();
                }
            });
        }
        self.transcript.set_loading(visible);
    }

    fn clear_input(&self) {
        self.transcript.clear_input();
    }
}

/// Ingest page backed by markup, reporting to the terminal.
pub struct TerminalPage {
    page: MemoryPage,
    spinner: Option<ProgressBar>,
}

impl TerminalPage {
    pub fn new(page: MemoryPage) -> Self {
        Self {
            page,
            spinner: None,
        }
    }

    pub fn page(&self) -> &MemoryPage {
        &self.page
    }
}

impl PageView for TerminalPage {
    fn show_error(&mut self, message: &str) {
        output::error(message);
        self.page.show_error(message);
    }

    fn set_submitting(&mut self, submitting: bool) {
        if submitting {
            self.spinner = Some(output::spinner("Processing..."));
        } else if let Some(bar) = self.spinner.take() {
            bar.finish_and_clear();
        }
        self.page.set_submitting(submitting);
    }

    fn replace_content(&mut self, markup: &str) {
        if let Some(bar) = self.spinner.take() {
            bar.finish_and_clear();
        }
        self.page.replace_content(markup);
    }

    fn slider(&mut self) -> Option<&mut dyn SliderControl> {
        self.page.slider()
    }

    fn stars_text(&self) -> Option<String> {
        self.page.stars_text()
    }

    fn set_stars_text(&mut self, text: &str) {
        self.page.set_stars_text(text);
    }

    fn scroll_to_results(&mut self) -> bool {
        self.page.scroll_to_results()
    }
}

/// "Clipboard" that writes the copied text to a file, or stdout.
pub struct DigestSink {
    out: Option<PathBuf>,
}

impl DigestSink {
    pub fn new(out: Option<PathBuf>) -> Self {
        Self { out }
    }
}

#[async_trait]
impl Clipboard for DigestSink {
    async fn write_text(&self, text: &str) -> forky_client::Result<()> {
        match &self.out {
            Some(path) => tokio::fs::write(path, text)
                .await
                .map_err(|e| ClientError::Clipboard(format!("{}: {e}", path.display()))),
            None => {
                println!("{text}");
                Ok(())
            }
        }
    }
}

/// The desktop clipboard.
pub struct SystemClipboard;

#[async_trait]
impl Clipboard for SystemClipboard {
    async fn write_text(&self, text: &str) -> forky_client::Result<()> {
        cli_clipboard::set_contents(text.to_string())
            .map_err(|e| ClientError::Clipboard(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::panic::{catch_unwind, AssertUnwindSafe};

    use super::*;

    #[test]
    fn spinner_spans_overlapping_requests() {
        let chat = TerminalChat::new();
        chat.set_loading(true);
        chat.set_loading(true);
        chat.set_loading(false);
        assert!(chat.spinner.lock().is_some());
        chat.set_loading(false);
        assert!(chat.spinner.lock().is_none());
        assert_eq!(chat.transcript().loading_hidden_count(), 2);
    }

    #[test]
    fn spinner_usable_after_panic_while_held() {
        let chat = TerminalChat::new();
        let panicked = catch_unwind(AssertUnwindSafe(|| {
            chat.with_spinner(|_| panic!("render failed"));
        }));
        assert!(panicked.is_err());

        chat.set_loading(true);
        assert!(chat.spinner.lock().is_some());
        chat.set_loading(false);
        assert!(chat.spinner.lock().is_none());
    }
}
