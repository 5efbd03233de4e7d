//! Axis scales and tick labels.
//!
//! A scale maps a field's values onto one dimension of a region. Numeric columns
//! get a linear scale over their observed range; text columns an ordinal scale over
//! their sorted distinct values.

use crate::layout::Rect;
use crate::models::{ColumnKind, Table, Value};
use num_format::{Locale, ToFormattedString};
use std::collections::BTreeSet;

/// Pixels of axis length per tick label.
pub const LABEL_SPACING_PX: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScaleDomain {
    Numeric { min: f64, max: f64, integral: bool },
    Ordinal(Vec<String>),
    /// No usable values; nothing is positioned.
    Empty,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisScale {
    pub field: String,
    pub orientation: Orientation,
    pub domain: ScaleDomain,
}

impl AxisScale {
    /// Scan the bound column and derive its domain.
    pub fn from_table(table: &Table, field: &str, orientation: Orientation) -> Self {
        let domain = match table.column_index(field) {
            None => ScaleDomain::Empty,
            Some(col) => match table.columns()[col].kind {
                ColumnKind::Integer | ColumnKind::Real => {
                    let mut min = f64::INFINITY;
                    let mut max = f64::NEG_INFINITY;
                    for v in table.column_values(col).filter_map(Value::as_f64) {
                        min = min.min(v);
                        max = max.max(v);
                    }
                    if min.is_finite() {
                        ScaleDomain::Numeric {
                            min,
                            max,
                            integral: table.columns()[col].kind == ColumnKind::Integer,
                        }
                    } else {
                        ScaleDomain::Empty
                    }
                }
                ColumnKind::Text => {
                    let values: BTreeSet<String> = table
                        .column_values(col)
                        .filter(|v| !v.is_missing())
                        .map(|v| v.to_string())
                        .collect();
                    if values.is_empty() {
                        ScaleDomain::Empty
                    } else {
                        ScaleDomain::Ordinal(values.into_iter().collect())
                    }
                }
            },
        };
        Self {
            field: field.to_string(),
            orientation,
            domain,
        }
    }

    /// Position of `value` along the axis in `0..=1`, or `None` when it cannot be placed.
    pub fn fraction(&self, value: &Value) -> Option<f64> {
        match &self.domain {
            ScaleDomain::Numeric { .. } => value.as_f64().map(|v| self.numeric_fraction(v)),
            ScaleDomain::Ordinal(values) => {
                if value.is_missing() {
                    return None;
                }
                let idx = values.binary_search(&value.to_string()).ok()?;
                Some(spread(idx, values.len()))
            }
            ScaleDomain::Empty => None,
        }
    }

    fn numeric_fraction(&self, v: f64) -> f64 {
        match self.domain {
            ScaleDomain::Numeric { min, max, .. } if max > min => (v - min) / (max - min),
            _ => 0.5,
        }
    }

    /// Map a fraction onto the axis dimension of `rect`. Vertical axes grow upward.
    pub fn to_pixel(&self, fraction: f64, rect: &Rect) -> f64 {
        match self.orientation {
            Orientation::Horizontal => rect.x as f64 + fraction * rect.width as f64,
            Orientation::Vertical => rect.bottom() as f64 - fraction * rect.height as f64,
        }
    }

    pub fn position(&self, value: &Value, rect: &Rect) -> Option<f64> {
        self.fraction(value).map(|f| self.to_pixel(f, rect))
    }

    /// Tick labels laid out along `rect`.
    pub fn labels(&self, rect: &Rect, locale: &Locale, decimal_sep: char) -> Vec<AxisLabel> {
        let length = match self.orientation {
            Orientation::Horizontal => rect.width,
            Orientation::Vertical => rect.height,
        } as f64;

        match &self.domain {
            ScaleDomain::Empty => Vec::new(),
            ScaleDomain::Ordinal(values) => values
                .iter()
                .enumerate()
                .map(|(i, v)| AxisLabel {
                    text: v.clone(),
                    position: self.to_pixel(spread(i, values.len()), rect),
                })
                .collect(),
            ScaleDomain::Numeric { min, max, integral } => {
                let target = (length / LABEL_SPACING_PX).floor().max(1.0);
                let span = max - min;
                if span <= 0.0 {
                    return vec![AxisLabel {
                        text: format_tick(*min, 1.0, locale, decimal_sep),
                        position: self.to_pixel(0.5, rect),
                    }];
                }
                let mut step = nice_step(span / target);
                if *integral {
                    step = step.max(1.0);
                }
                tick_values(*min, *max, step)
                    .into_iter()
                    .map(|v| AxisLabel {
                        text: format_tick(v, step, locale, decimal_sep),
                        position: self.to_pixel(self.numeric_fraction(v), rect),
                    })
                    .collect()
            }
        }
    }
}

fn spread(idx: usize, n: usize) -> f64 {
    if n <= 1 {
        0.5
    } else {
        idx as f64 / (n - 1) as f64
    }
}

/// A tick: display text and its pixel coordinate along the axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisLabel {
    pub text: String,
    pub position: f64,
}

/// Round a raw step up to 1, 2 or 5 times a power of ten.
pub fn nice_step(raw: f64) -> f64 {
    if !(raw.is_finite() && raw > 0.0) {
        return 1.0;
    }
    let magnitude = 10f64.powf(raw.log10().floor());
    let residual = raw / magnitude;
    let m = if residual <= 1.0 {
        1.0
    } else if residual <= 2.0 {
        2.0
    } else if residual <= 5.0 {
        5.0
    } else {
        10.0
    };
    m * magnitude
}

/// Multiples of `step` inside `[min, max]`.
pub fn tick_values(min: f64, max: f64, step: f64) -> Vec<f64> {
    const EPS: f64 = 1e-9;
    if step <= 0.0 || max < min {
        return Vec::new();
    }
    let first = (min / step - EPS).ceil() as i64;
    let last = (max / step + EPS).floor() as i64;
    (first..=last).take(1000).map(|k| k as f64 * step).collect()
}

/// Format a tick value with the precision implied by `step`.
pub fn format_tick(value: f64, step: f64, locale: &Locale, decimal_sep: char) -> String {
    let decimals = if step >= 1.0 || step <= 0.0 {
        0
    } else {
        (-step.log10().floor()) as usize
    };
    if decimals == 0 {
        return (value.round() as i64).to_formatted_string(locale);
    }
    let s = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = s.split_once('.').unwrap_or((s.as_str(), ""));
    let int: i64 = int_part.parse().unwrap_or(0);
    let sign = if value < 0.0 && s.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };
    format!(
        "{sign}{}{decimal_sep}{frac_part}",
        int.to_formatted_string(locale)
    )
}

/// Map a user-provided locale tag to a `num_format::Locale` and its decimal separator char.
///
/// Supported tags (case-insensitive): `en`, `us`, `en_US`, `de`, `de_DE`, `german`,
/// `fr`, `es`, `it`, `pt`, `nl`. Defaults to English.
pub fn map_locale(tag: &str) -> (&'static Locale, char) {
    match tag.to_lowercase().as_str() {
        "de" | "de_de" | "german" => (&Locale::de, ','),
        "fr" | "fr_fr" => (&Locale::fr, ','),
        "es" | "es_es" => (&Locale::es, ','),
        "it" | "it_it" => (&Locale::it, ','),
        "pt" | "pt_pt" | "pt_br" => (&Locale::pt, ','),
        "nl" | "nl_nl" => (&Locale::nl, ','),
        _ => (&Locale::en, '.'),
    }
}
