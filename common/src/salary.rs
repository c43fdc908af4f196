//! Salary-band selector for the search form.
//!
//! The form offers a fixed sequence of salary bands in two dropdowns, and
//! the max dropdown is kept consistent with the chosen min: options below
//! the min are disabled wholesale on every min change, and a selected max
//! that falls under the new min is raised to it. The constraint runs in one
//! direction only; changing the max leaves the min options alone.

use serde::Serialize;

const BAND_STEP: i64 = 10_000;
const BAND_COUNT: i64 = 14;

/// The fixed band values: 10 000 through 140 000 in 10 000 steps.
pub fn salary_bands() -> Vec<i64> {
    (1..=BAND_COUNT).map(|i| i * BAND_STEP).collect()
}

fn band_label(value: i64) -> String {
    format!("£{},000", value / 1_000)
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct SalaryOption {
    pub value: i64,
    pub label: String,
    pub enabled: bool,
}

impl SalaryOption {
    fn new(value: i64) -> Self {
        Self {
            value,
            label: band_label(value),
            enabled: true,
        }
    }
}

/// The two dropdowns and their current selections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalarySelector {
    pub min_options: Vec<SalaryOption>,
    pub max_options: Vec<SalaryOption>,
    pub selected_min: Option<i64>,
    pub selected_max: Option<i64>,
}

impl SalarySelector {
    pub fn new() -> Self {
        Self {
            min_options: salary_bands().into_iter().map(SalaryOption::new).collect(),
            max_options: salary_bands().into_iter().map(SalaryOption::new).collect(),
            selected_min: None,
            selected_max: None,
        }
    }

    /// Change the selected min and rebuild the enabled state of every max
    /// option: below the min disabled, at or above it enabled. A selected
    /// max left under the new min is raised to exactly the new min.
    pub fn set_min(&mut self, min: Option<i64>) {
        self.selected_min = min;
        let floor = min.unwrap_or(i64::MIN);

        for option in &mut self.max_options {
            option.enabled = option.value >= floor;
        }

        if let (Some(min), Some(max)) = (self.selected_min, self.selected_max)
            && max < min
        {
            self.selected_max = Some(min);
        }
    }

    /// Change the selected max. The min options are not constrained by the
    /// max; the consistency rule runs in the min-to-max direction only.
    pub fn set_max(&mut self, max: Option<i64>) {
        self.selected_max = max;
    }
}

impl Default for SalarySelector {
    fn default() -> Self {
        Self::new()
    }
}
