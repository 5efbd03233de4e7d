//! Category fill colors.
//!
//! Distinct values of the category field are put in nominal order and take palette
//! entries in that order, so a value's color depends only on the set of values in
//! the dataset, never on row order or frequency.

use crate::models::Value;
use std::collections::BTreeMap;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
    }
}

/// One semi-transparent color per continent code, in code order.
pub const CONTINENT_PALETTE: [Rgba; 7] = [
    Rgba::new(20, 120, 100, 125),  // Middle East
    Rgba::new(105, 245, 40, 125),  // Europe
    Rgba::new(200, 200, 135, 125), // Africa
    Rgba::new(35, 50, 225, 125),   // North America
    Rgba::new(190, 115, 20, 125),  // South America
    Rgba::new(95, 175, 210, 125),  // Oceania & some Asia
    Rgba::new(220, 15, 40, 125),   // Asia
];

/// Fill for records without a category value.
pub const MISSING_COLOR: Rgba = Rgba::new(160, 160, 160, 125);

/// Nominal identity of a category value. Integers order numerically and come
/// before text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CategoryKey {
    Integer(i64),
    Text(String),
}

impl CategoryKey {
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Missing => None,
            Value::Integer(i) => Some(CategoryKey::Integer(*i)),
            Value::Real(_) | Value::Text(_) => Some(CategoryKey::Text(value.to_string())),
        }
    }
}

impl std::fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryKey::Integer(i) => write!(f, "{i}"),
            CategoryKey::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryColors {
    assigned: BTreeMap<CategoryKey, Rgba>,
}

impl CategoryColors {
    /// Assign palette entries to every distinct value, wrapping when there are more
    /// values than colors.
    pub fn assign<'a, I>(palette: &[Rgba], values: I) -> Self
    where
        I: IntoIterator<Item = &'a Value>,
    {
        let mut assigned: BTreeMap<CategoryKey, Rgba> = values
            .into_iter()
            .filter_map(CategoryKey::from_value)
            .map(|k| (k, MISSING_COLOR))
            .collect();
        if !palette.is_empty() {
            for (i, color) in assigned.values_mut().enumerate() {
                *color = palette[i % palette.len()];
            }
        }
        Self { assigned }
    }

    pub fn color_for(&self, value: &Value) -> Rgba {
        CategoryKey::from_value(value)
            .and_then(|k| self.assigned.get(&k).copied())
            .unwrap_or(MISSING_COLOR)
    }

    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }
}
