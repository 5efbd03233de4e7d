use crate::error::{Result, ScatterError};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

static MISSING: Value = Value::Missing;

/// One cell of the dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Missing,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl Value {
    /// Parse a raw cell according to an already inferred column kind.
    pub fn parse(raw: &str, kind: ColumnKind) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            return Value::Missing;
        }
        match kind {
            ColumnKind::Integer => raw
                .parse::<i64>()
                .map(Value::Integer)
                .unwrap_or_else(|_| Value::Text(raw.to_string())),
            ColumnKind::Real => raw
                .parse::<f64>()
                .map(Value::Real)
                .unwrap_or_else(|_| Value::Text(raw.to_string())),
            ColumnKind::Text => Value::Text(raw.to_string()),
        }
    }

    /// Numeric view of the cell; `None` for text and missing cells.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Real(r) if r.is_finite() => Some(*r),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Missing => f.write_str("NA"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Real(r) => {
                // Up to 4 decimals, trailing zeros and dot trimmed.
                let s = format!("{:.4}", r);
                f.write_str(s.trim_end_matches('0').trim_end_matches('.'))
            }
            Value::Text(s) => f.write_str(s),
        }
    }
}

/// Storage type of a column, inferred from its cells at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Integer,
    Real,
    Text,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ColumnKind::Integer => "integer",
            ColumnKind::Real => "real",
            ColumnKind::Text => "text",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
}

/// In-memory typed table. Row identity is the row index.
#[derive(Debug, Clone)]
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Vec<Value>>,
    index: AHashMap<String, usize>,
}

impl Table {
    pub fn new(columns: Vec<Column>, rows: Vec<Vec<Value>>) -> Self {
        let index = columns
            .iter()
            .enumerate()
            .map(|(i, c)| (c.name.clone(), i))
            .collect();
        Self {
            columns,
            rows,
            index,
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.column_index(name).map(|i| &self.columns[i])
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Value of `field` in `row`, `Missing` when the column is unknown.
    pub fn get(&self, row: usize, field: &str) -> &Value {
        match self.column_index(field) {
            Some(col) => self.rows[row].get(col).unwrap_or(&MISSING),
            None => &MISSING,
        }
    }

    /// All cells of one column in row order.
    pub fn column_values(&self, col: usize) -> impl Iterator<Item = &Value> + '_ {
        self.rows.iter().map(move |r| r.get(col).unwrap_or(&MISSING))
    }

    /// Fail with the first name that is not a column of this table.
    pub fn require_columns<'a, I>(&self, names: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a str>,
    {
        for name in names {
            if !self.has_column(name) {
                return Err(ScatterError::MissingColumn(name.to_string()));
            }
        }
        Ok(())
    }
}

/// Visual property fed by one data field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    X,
    Y,
    Size,
    Color,
}

impl Channel {
    pub const ALL: [Channel; 4] = [Channel::X, Channel::Y, Channel::Size, Channel::Color];

    /// Only the category color channel is fixed for the session.
    pub fn is_rebindable(self) -> bool {
        !matches!(self, Channel::Color)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Channel::X => "x",
            Channel::Y => "y",
            Channel::Size => "size",
            Channel::Color => "color",
        })
    }
}

/// Exactly one field per channel; there is no unbound state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldBindings {
    pub x: String,
    pub y: String,
    pub size: String,
    pub color: String,
}

impl FieldBindings {
    pub fn get(&self, channel: Channel) -> &str {
        match channel {
            Channel::X => &self.x,
            Channel::Y => &self.y,
            Channel::Size => &self.size,
            Channel::Color => &self.color,
        }
    }

    pub(crate) fn set(&mut self, channel: Channel, field: &str) {
        let slot = match channel {
            Channel::X => &mut self.x,
            Channel::Y => &mut self.y,
            Channel::Size => &mut self.size,
            Channel::Color => &mut self.color,
        };
        *slot = field.to_string();
    }
}
