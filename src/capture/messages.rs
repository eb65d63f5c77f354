//! Human-readable notices, phrased in terms of the input that caused them.

use std::collections::BTreeSet;

use crate::burst::record::{BurstField, SliderRef};
use crate::burst::validate::SettingField;
use crate::foundation::error::CREATION_PROBLEM;

/// The engine has no expression with this id.
pub fn no_such_expression(slider: &SliderRef) -> String {
    format!("There is no expression with ID {slider}.")
}

/// The expression exists but does not assign a single variable.
pub fn not_a_slider(slider: &SliderRef) -> String {
    format!("Looks like expression with ID {slider} doesn't define a slider.")
}

/// Any failed assembly or export.
pub fn creation_problem() -> String {
    CREATION_PROBLEM.to_owned()
}

fn burst_label(field: BurstField) -> &'static str {
    match field {
        BurstField::Slider => "Slider ID",
        BurstField::Min => "Slider Min",
        BurstField::Max => "Slider Max",
        BurstField::Step => "Slider Step",
        BurstField::Interval => "Interval",
        BurstField::Fps => "Frame Rate",
        BurstField::Duration => "Duration",
        BurstField::EaseSlope => "Ease Slope",
        BurstField::EasePosition => "Ease Position",
    }
}

/// Notice for a burst that failed validation.
pub fn bad_burst_input(invalid: &BTreeSet<BurstField>) -> String {
    let label = match (invalid.len(), invalid.first()) {
        (1, Some(&field)) => burst_label(field),
        (2, _) if invalid.contains(&BurstField::Slider) => burst_label(BurstField::Slider),
        _ => "input",
    };

    if label == burst_label(BurstField::Slider) {
        return "Please choose a slider or define an expression.".to_owned();
    }
    format!("Your {label} isn't quite right.")
}

fn setting_label(field: SettingField) -> &'static str {
    match field {
        SettingField::Width => "Image Width",
        SettingField::Height => "Image Height",
        SettingField::Interval => "Interval",
    }
}

/// Notice for image settings that are not positive integers.
pub fn bad_settings_input(invalid: &BTreeSet<SettingField>) -> String {
    match (invalid.len(), invalid.first()) {
        (1, Some(&field)) => format!(
            "The {} setting must be a positive integer.",
            setting_label(field)
        ),
        _ => "Image settings must be positive integers.".to_owned(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/messages.rs"]
mod tests;
