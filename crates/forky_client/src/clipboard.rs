//! Copy buttons on the results page.
//!
//! A button's label switches to a feedback text while the copy settles and
//! reverts after the feedback period.

use std::time::Duration;

use async_trait::async_trait;
use forky_constant::messages;
use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::error::{ClientError, Result};
use crate::ingest::MemoryPage;
use crate::markup::{element_by_class, element_by_id};

/// Class of the text area holding the files content.
pub const RESULT_TEXT_CLASS: &str = "result-text";
/// Id of the hidden input holding the directory tree.
pub const DIRECTORY_STRUCTURE_ID: &str = "directory-structure-content";

#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<()>;
}

pub trait CopyButton {
    fn label(&self) -> String;
    fn set_label(&mut self, label: &str);
}

/// Where copyable text lives on the page.
pub trait CopySource {
    fn directory_structure(&self) -> Option<String>;
    fn text_area(&self, class: &str) -> Option<String>;
}

/// What a copy button copies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyTarget {
    DirectoryStructure,
    /// Text area found by class name
    TextArea(String),
}

impl CopyTarget {
    /// Button argument as used by the page: `directory-structure` or a class.
    pub fn from_name(name: &str) -> Self {
        if name == "directory-structure" {
            CopyTarget::DirectoryStructure
        } else {
            CopyTarget::TextArea(name.to_string())
        }
    }

    fn read(&self, source: &dyn CopySource) -> Option<String> {
        match self {
            CopyTarget::DirectoryStructure => source.directory_structure(),
            CopyTarget::TextArea(class) => source.text_area(class),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    Failed,
    /// Nothing to copy; the button was left alone
    Missing,
}

/// Copy `target` and show feedback on `button` for `feedback`.
///
/// A clipboard failure only changes the label to `Failed to copy`.
pub async fn copy_text(
    source: &dyn CopySource,
    target: &CopyTarget,
    clipboard: &dyn Clipboard,
    button: &mut dyn CopyButton,
    feedback: Duration,
) -> CopyOutcome {
    let Some(text) = target.read(source) else {
        debug!(copy_target = ?target, "copy source not found");
        return CopyOutcome::Missing;
    };

    let original = button.label();
    let outcome = match clipboard.write_text(&text).await {
        Ok(()) => {
            button.set_label(messages::COPIED);
            CopyOutcome::Copied
        }
        Err(error) => {
            warn!(%error, "copy failed");
            button.set_label(messages::COPY_FAILED);
            CopyOutcome::Failed
        }
    };
    tokio::time::sleep(feedback).await;
    button.set_label(&original);
    outcome
}

/// Directory tree followed by the files content, as one text.
pub fn full_digest(directory: &str, files: &str) -> String {
    format!("{directory}{}{files}", messages::DIGEST_FILES_HEADER)
}

/// Copy the full digest. On failure the button is left unchanged and the
/// error is only logged.
pub async fn copy_full_digest(
    source: &dyn CopySource,
    clipboard: &dyn Clipboard,
    button: &mut dyn CopyButton,
    feedback: Duration,
) -> CopyOutcome {
    let (Some(directory), Some(files)) = (
        source.directory_structure(),
        source.text_area(RESULT_TEXT_CLASS),
    ) else {
        return CopyOutcome::Missing;
    };

    if let Err(error) = clipboard.write_text(&full_digest(&directory, &files)).await {
        warn!(%error, "failed to copy full digest");
        return CopyOutcome::Failed;
    }

    let original = button.label();
    button.set_label(messages::COPIED);
    tokio::time::sleep(feedback).await;
    button.set_label(&original);
    CopyOutcome::Copied
}

impl CopySource for MemoryPage {
    fn directory_structure(&self) -> Option<String> {
        element_by_id(self.markup(), DIRECTORY_STRUCTURE_ID)
            .and_then(|el| el.attr("value").map(str::to_owned))
    }

    fn text_area(&self, class: &str) -> Option<String> {
        element_by_class(self.markup(), class).map(|el| el.text().to_string())
    }
}

/// Clipboard kept in memory. Can be told to refuse writes.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
    refuse: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard whose writes always fail.
    pub fn refusing() -> Self {
        Self {
            contents: Mutex::new(None),
            refuse: true,
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.lock().clone()
    }
}

#[async_trait]
impl Clipboard for MemoryClipboard {
    async fn write_text(&self, text: &str) -> Result<()> {
        if self.refuse {
            return Err(ClientError::Clipboard("write permission denied".into()));
        }
        *self.contents.lock() = Some(text.to_string());
        Ok(())
    }
}

/// Button with a plain text label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelButton {
    label: String,
}

impl LabelButton {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl CopyButton for LabelButton {
    fn label(&self) -> String {
        self.label.clone()
    }

    fn set_label(&mut self, label: &str) {
        self.label = label.to_string();
    }
}
