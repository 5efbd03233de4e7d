use crate::error::{Result, ScatterError};
use crate::models::Table;
use crate::palette::CategoryKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Summary statistics of one field within a group.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    /// Group value, or `"all"` when ungrouped.
    pub group: String,
    pub field: String,
    pub count: usize,
    pub missing: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub median: Option<f64>,
}

/// Compute statistics of `field`, optionally split by the values of `group_by`.
/// Groups come out in nominal order; rows with no group value are grouped as `NA`.
pub fn field_summary(table: &Table, field: &str, group_by: Option<&str>) -> Result<Vec<Summary>> {
    if !table.has_column(field) {
        return Err(ScatterError::UnknownField(field.to_string()));
    }
    if let Some(g) = group_by
        && !table.has_column(g)
    {
        return Err(ScatterError::UnknownField(g.to_string()));
    }

    // `None` sorts first and stands for the missing group.
    let mut groups: BTreeMap<Option<CategoryKey>, (Vec<f64>, usize)> = BTreeMap::new();
    for row in 0..table.len() {
        let key = match group_by {
            Some(g) => CategoryKey::from_value(table.get(row, g)),
            None => Some(CategoryKey::Text("all".into())),
        };
        let entry = groups.entry(key).or_default();
        match table.get(row, field).as_f64() {
            Some(v) => entry.0.push(v),
            None => entry.1 += 1,
        }
    }

    let mut out = Vec::new();
    for (key, (mut vals, missing)) in groups {
        vals.sort_by(|a, b| a.total_cmp(b));
        let count = vals.len();
        let min = vals.first().cloned();
        let max = vals.last().cloned();
        let mean = if count > 0 {
            Some(vals.iter().copied().sum::<f64>() / count as f64)
        } else {
            None
        };
        let median = if count == 0 {
            None
        } else if count % 2 == 1 {
            Some(vals[count / 2])
        } else {
            Some((vals[count / 2 - 1] + vals[count / 2]) / 2.0)
        };
        out.push(Summary {
            group: key.map(|k| k.to_string()).unwrap_or_else(|| "NA".into()),
            field: field.to_string(),
            count,
            missing,
            min,
            max,
            mean,
            median,
        });
    }
    Ok(out)
}
