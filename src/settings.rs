//! Plot configuration: which fields feed which channel, the selector list,
//! frame insets and window size. Every field has a default so a settings file
//! only needs to name what it overrides.

use crate::error::Result;
use crate::layout::Insets;
use crate::models::FieldBindings;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Fields offered by the selector dropdowns, in display order.
pub const SELECTABLE_FIELDS: [&str; 12] = [
    "F2012",
    "M2012",
    "TeamSize",
    "Gold",
    "Silver",
    "Bronze",
    "Adult literacy rate (%)",
    "Population (in thousands) total",
    "Population median age (years)",
    "Community and traditional health workers density (per 10 000 population)",
    "General government expenditure on health as percentage of total expenditure on health",
    "General government expenditure on health as percentage of total government expenditure",
];

/// Medal columns quoted by the hover tooltip.
pub const TOOLTIP_FIELDS: [&str; 3] = ["Gold", "Silver", "Bronze"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotSettings {
    pub x_field: String,
    pub y_field: String,
    pub size_field: String,
    pub category_field: String,
    pub label_field: String,
    pub selectable_fields: Vec<String>,
    pub insets: Insets,
    pub window_width: u32,
    pub window_height: u32,
    pub locale: String,
}

impl Default for PlotSettings {
    fn default() -> Self {
        Self {
            x_field: "TeamSize".into(),
            y_field: "Gold".into(),
            size_field: "Population (in thousands) total".into(),
            category_field: "Continent".into(),
            label_field: "Country".into(),
            selectable_fields: SELECTABLE_FIELDS.iter().map(|s| s.to_string()).collect(),
            insets: Insets::default(),
            window_width: 720,
            window_height: 500,
            locale: "en".into(),
        }
    }
}

impl PlotSettings {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Initial channel bindings.
    pub fn bindings(&self) -> FieldBindings {
        FieldBindings {
            x: self.x_field.clone(),
            y: self.y_field.clone(),
            size: self.size_field.clone(),
            color: self.category_field.clone(),
        }
    }

    /// Every column the dataset must provide, deduplicated, in first-seen order.
    pub fn required_columns(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        let fixed = [
            self.label_field.as_str(),
            self.category_field.as_str(),
            self.x_field.as_str(),
            self.y_field.as_str(),
            self.size_field.as_str(),
        ];
        let names = fixed
            .into_iter()
            .chain(TOOLTIP_FIELDS)
            .chain(self.selectable_fields.iter().map(String::as_str));
        for name in names {
            if !out.contains(&name) {
                out.push(name);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_selector_positions() {
        let s = PlotSettings::default();
        assert_eq!(s.selectable_fields[2], s.x_field);
        assert_eq!(s.selectable_fields[3], s.y_field);
        assert_eq!(s.selectable_fields[7], s.size_field);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let s: PlotSettings = serde_json::from_str(r#"{ "x_field": "Silver" }"#).unwrap();
        assert_eq!(s.x_field, "Silver");
        assert_eq!(s.y_field, "Gold");
        assert_eq!(s.window_width, 720);
    }

    #[test]
    fn required_columns_are_unique() {
        let s = PlotSettings::default();
        let req = s.required_columns();
        assert_eq!(req[0], "Country");
        assert_eq!(req[1], "Continent");
        let gold = req.iter().filter(|c| **c == "Gold").count();
        assert_eq!(gold, 1);
        assert_eq!(req.len(), 2 + SELECTABLE_FIELDS.len());
    }
}
