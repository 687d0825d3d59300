//! `forky size`: file-size limits for slider positions.

use anyhow::{ensure, Result};
use comfy_table::Cell;
use forky_client::slider::SliderReading;
use forky_constant::defaults::SLIDER_MAX;
use serde::Serialize;

use crate::output;

#[derive(Serialize)]
struct Row {
    position: u32,
    size_kb: u64,
    label: String,
    fill_percent: f64,
}

impl From<SliderReading> for Row {
    fn from(reading: SliderReading) -> Self {
        Self {
            position: reading.position,
            size_kb: reading.size_kb,
            label: reading.label,
            fill_percent: reading.fill_percent,
        }
    }
}

pub fn handle(positions: &[u32]) -> Result<()> {
    for &position in positions {
        ensure!(
            position <= SLIDER_MAX,
            "position {position} is outside the slider range 0-{SLIDER_MAX}"
        );
    }

    let rows: Vec<Row> = positions
        .iter()
        .map(|&p| SliderReading::at(p, SLIDER_MAX).into())
        .collect();

    let mut table = output::table(&["Position", "Size (KB)", "Label", "Fill"]);
    for row in &rows {
        table.add_row(vec![
            Cell::new(row.position),
            Cell::new(row.size_kb),
            Cell::new(&row.label),
            Cell::new(format!("{:.1}%", row.fill_percent)),
        ]);
    }
    output::table_print(&table, &rows);
    Ok(())
}
