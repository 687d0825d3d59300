//! Binding between a slider control and its size label.

use crate::size::{format_size, log_slider_to_size};

/// A file-size slider as rendered on the page.
///
/// Implementations own the control; the binding only reads the position and
/// writes the label and track fill back.
pub trait SliderControl {
    fn position(&self) -> u32;
    fn max(&self) -> u32;
    fn set_label(&mut self, label: &str);
    /// Percentage (0..=100) of the track drawn as filled.
    fn set_fill_percent(&mut self, percent: f64);
}

/// Values derived from one slider position.
#[derive(Debug, Clone, PartialEq)]
pub struct SliderReading {
    pub position: u32,
    pub size_kb: u64,
    pub label: String,
    pub fill_percent: f64,
}

impl SliderReading {
    pub fn at(position: u32, max: u32) -> Self {
        let size_kb = log_slider_to_size(position);
        let fill_percent = if max == 0 {
            0.0
        } else {
            (f64::from(position.min(max)) / f64::from(max)) * 100.0
        };
        Self {
            position,
            size_kb,
            label: format_size(size_kb),
            fill_percent,
        }
    }
}

/// Recompute label and fill from the control's current position.
///
/// Call on every input event, and once after a control is created (including
/// after the page was replaced and the old control discarded).
pub fn refresh_slider(control: &mut dyn SliderControl) -> SliderReading {
    let reading = SliderReading::at(control.position(), control.max());
    control.set_label(&reading.label);
    control.set_fill_percent(reading.fill_percent);
    reading
}

/// Plain in-memory slider, used by the terminal driver and in tests.
#[derive(Debug, Clone, PartialEq)]
pub struct SizeSlider {
    position: u32,
    max: u32,
    label: String,
    fill_percent: f64,
}

impl SizeSlider {
    pub fn new(position: u32, max: u32) -> Self {
        let mut slider = Self {
            position: position.min(max),
            max,
            label: String::new(),
            fill_percent: 0.0,
        };
        refresh_slider(&mut slider);
        slider
    }

    /// Move the thumb and refresh, like an `input` event would.
    pub fn set_position(&mut self, position: u32) -> SliderReading {
        self.position = position.min(self.max);
        refresh_slider(self)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn fill_percent(&self) -> f64 {
        self.fill_percent
    }

    pub fn size_kb(&self) -> u64 {
        log_slider_to_size(self.position)
    }
}

impl Default for SizeSlider {
    fn default() -> Self {
        use forky_constant::defaults::{SLIDER_DEFAULT_POSITION, SLIDER_MAX};
        Self::new(SLIDER_DEFAULT_POSITION, SLIDER_MAX)
    }
}

impl SliderControl for SizeSlider {
    fn position(&self) -> u32 {
        self.position
    }

    fn max(&self) -> u32 {
        self.max
    }

    fn set_label(&mut self, label: &str) {
        self.label = label.to_string();
    }

    fn set_fill_percent(&mut self, percent: f64) {
        self.fill_percent = percent;
    }
}
