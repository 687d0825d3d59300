//! The page hosting the ingest form.

use forky_constant::defaults::{SLIDER_DEFAULT_POSITION, SLIDER_MAX};

use crate::markup::{element_by_id, has_data_attribute};
use crate::slider::{SizeSlider, SliderControl};

/// Id of the file-size range input.
pub const SLIDER_ID: &str = "file_size";
/// Id of the element showing the repository's star count.
pub const STARS_ID: &str = "github-stars";
/// Attribute marking the results section.
pub const RESULTS_ATTRIBUTE: &str = "data-results";

/// Page operations the ingest flow needs.
pub trait PageView {
    /// Show (or update) the error banner near the form.
    fn show_error(&mut self, message: &str);

    /// Toggle the submit button's loading state.
    fn set_submitting(&mut self, submitting: bool);

    /// Swap in a server-rendered page. Controls of the old page are gone
    /// afterwards and must be looked up again.
    fn replace_content(&mut self, markup: &str);

    /// The current file-size slider, if the page has one.
    fn slider(&mut self) -> Option<&mut dyn SliderControl>;

    fn stars_text(&self) -> Option<String>;
    fn set_stars_text(&mut self, text: &str);

    /// Bring the results section into view. Returns false when there is none.
    fn scroll_to_results(&mut self) -> bool;
}

/// Page held as markup, with its controls bound from element ids.
#[derive(Debug, Clone, Default)]
pub struct MemoryPage {
    markup: String,
    error: Option<String>,
    submitting: bool,
    slider: Option<SizeSlider>,
    stars: Option<String>,
    scrolled_to_results: bool,
    replacements: usize,
}

impl MemoryPage {
    pub fn new(markup: impl Into<String>) -> Self {
        let mut page = Self::default();
        page.load(markup.into());
        page
    }

    fn load(&mut self, markup: String) {
        self.slider = element_by_id(&markup, SLIDER_ID).map(|el| {
            let max = el
                .attr("max")
                .and_then(|v| v.parse().ok())
                .unwrap_or(SLIDER_MAX);
            let position = el
                .attr("value")
                .and_then(|v| v.parse().ok())
                .unwrap_or(SLIDER_DEFAULT_POSITION);
            SizeSlider::new(position, max)
        });
        self.stars = element_by_id(&markup, STARS_ID).map(|el| el.text().to_string());
        self.scrolled_to_results = false;
        self.markup = markup;
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn size_slider(&self) -> Option<&SizeSlider> {
        self.slider.as_ref()
    }

    pub fn size_slider_mut(&mut self) -> Option<&mut SizeSlider> {
        self.slider.as_mut()
    }

    pub fn scrolled_to_results(&self) -> bool {
        self.scrolled_to_results
    }

    /// Number of times the content was replaced.
    pub fn replacements(&self) -> usize {
        self.replacements
    }
}

impl PageView for MemoryPage {
    fn show_error(&mut self, message: &str) {
        self.error = Some(message.to_string());
    }

    fn set_submitting(&mut self, submitting: bool) {
        self.submitting = submitting;
    }

    fn replace_content(&mut self, markup: &str) {
        self.load(markup.to_string());
        self.error = None;
        self.submitting = false;
        self.replacements += 1;
    }

    fn slider(&mut self) -> Option<&mut dyn SliderControl> {
        self.slider.as_mut().map(|s| s as &mut dyn SliderControl)
    }

    fn stars_text(&self) -> Option<String> {
        self.stars.clone()
    }

    fn set_stars_text(&mut self, text: &str) {
        // Only an existing stars element can be updated.
        if self.stars.is_some() {
            self.stars = Some(text.to_string());
        }
    }

    fn scroll_to_results(&mut self) -> bool {
        self.scrolled_to_results = has_data_attribute(&self.markup, RESULTS_ATTRIBUTE);
        self.scrolled_to_results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<form id="ingestForm">
  <input id="input_text" name="input_text">
  <input type="range" id="file_size" name="max_file_size" min="0" max="500" value="300">
</form>
<span id="github-stars">1.2k</span>"#;

    #[test]
    fn binds_slider_and_stars() {
        let page = MemoryPage::new(PAGE);
        let slider = page.size_slider().unwrap();
        assert_eq!(slider.position(), 300);
        assert_eq!(slider.max(), 500);
        assert_eq!(slider.label(), "213kb");
        assert_eq!(page.stars_text().as_deref(), Some("1.2k"));
    }

    #[test]
    fn slider_without_value_uses_default_position() {
        let page = MemoryPage::new(r#"<input type="range" id="file_size">"#);
        let slider = page.size_slider().unwrap();
        assert_eq!(slider.position(), 243);
        assert_eq!(slider.label(), "50kb");
    }

    #[test]
    fn replacement_discards_old_controls() {
        let mut page = MemoryPage::new(PAGE);
        page.show_error("boom");
        page.set_submitting(true);

        page.replace_content("<main data-results>done</main>");

        assert!(page.slider().is_none());
        assert!(page.stars_text().is_none());
        assert!(page.error().is_none());
        assert!(!page.is_submitting());
        assert_eq!(page.replacements(), 1);
        assert!(page.scroll_to_results());
    }

    #[test]
    fn scroll_without_results_section() {
        let mut page = MemoryPage::new(PAGE);
        assert!(!page.scroll_to_results());
        assert!(!page.scrolled_to_results());
    }
}
