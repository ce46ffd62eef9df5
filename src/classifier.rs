//! Column classification into named categories.
//!
//! Columns are matched against an ordered [`CategoryTable`] by exact,
//! case-insensitive name. The first category to match a column claims it;
//! later categories never see claimed columns. Whatever is left over lands in
//! the catch-all category.

use crate::constants::{CATCH_ALL_CATEGORY, TIME_SERIES_CATEGORY, categories};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One declared category and its canonical column names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDefinition {
    pub label: String,
    pub patterns: Vec<String>,
}

impl CategoryDefinition {
    pub fn new<S: Into<String>>(label: impl Into<String>, patterns: Vec<S>) -> Self {
        Self {
            label: label.into(),
            patterns: patterns.into_iter().map(Into::into).collect(),
        }
    }
}

fn default_time_series_label() -> String {
    TIME_SERIES_CATEGORY.to_string()
}

fn default_catch_all_label() -> String {
    CATCH_ALL_CATEGORY.to_string()
}

/// Ordered category declarations, highest priority first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTable {
    pub categories: Vec<CategoryDefinition>,

    /// Category that receives the derived date-time column
    #[serde(default = "default_time_series_label")]
    pub time_series_label: String,

    /// Category that collects unclaimed columns
    #[serde(default = "default_catch_all_label")]
    pub catch_all_label: String,
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self {
            categories: categories::DEFAULT_TABLE
                .iter()
                .map(|(label, patterns)| CategoryDefinition::new(*label, patterns.to_vec()))
                .collect(),
            time_series_label: default_time_series_label(),
            catch_all_label: default_catch_all_label(),
        }
    }
}

impl CategoryTable {
    pub fn new(categories: Vec<CategoryDefinition>) -> Self {
        Self {
            categories,
            time_series_label: default_time_series_label(),
            catch_all_label: default_catch_all_label(),
        }
    }

    pub fn labels(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.label.as_str()).collect()
    }
}

/// Columns assigned to one category, in assignment order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryColumns {
    pub label: String,
    pub columns: Vec<String>,
}

/// Result of classifying a table's columns
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Classification {
    groups: Vec<CategoryColumns>,
}

impl Classification {
    pub fn labels(&self) -> Vec<&str> {
        self.groups.iter().map(|g| g.label.as_str()).collect()
    }

    pub fn get(&self, label: &str) -> Option<&[String]> {
        self.groups
            .iter()
            .find(|g| g.label == label)
            .map(|g| g.columns.as_slice())
    }

    pub fn contains(&self, label: &str) -> bool {
        self.get(label).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryColumns> {
        self.groups.iter()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Pure classifier over a fixed category table
#[derive(Debug, Clone, Default)]
pub struct ColumnClassifier {
    table: CategoryTable,
}

impl ColumnClassifier {
    pub fn new(table: CategoryTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &CategoryTable {
        &self.table
    }

    /// Partition `columns` into categories.
    ///
    /// `datetime_column` names the synthesized date-time column, if the table
    /// has one. It is never matched or claimed; it is prepended to the
    /// time-series category when that category matched anything.
    pub fn classify<S: AsRef<str>>(
        &self,
        columns: &[S],
        datetime_column: Option<&str>,
    ) -> Classification {
        let datetime_column =
            datetime_column.filter(|name| columns.iter().any(|c| c.as_ref() == *name));

        let candidates: Vec<(&str, String)> = columns
            .iter()
            .map(|name| AsRef::<str>::as_ref(name))
            .filter(|name| Some(*name) != datetime_column)
            .map(|name| (name, name.to_lowercase()))
            .collect();
        let mut claimed = vec![false; candidates.len()];
        let mut groups: Vec<CategoryColumns> = Vec::new();

        for category in &self.table.categories {
            let mut matched = Vec::new();
            for pattern in &category.patterns {
                let pattern = pattern.to_lowercase();
                for (index, (name, lowered)) in candidates.iter().enumerate() {
                    if !claimed[index] && *lowered == pattern {
                        claimed[index] = true;
                        matched.push((*name).to_string());
                    }
                }
            }

            if matched.is_empty() {
                continue;
            }

            if category.label == self.table.time_series_label {
                if let Some(datetime) = datetime_column {
                    matched.insert(0, datetime.to_string());
                }
            }

            debug!("Category {} claimed {} columns", category.label, matched.len());
            groups.push(CategoryColumns {
                label: category.label.clone(),
                columns: matched,
            });
        }

        let leftovers: Vec<String> = candidates
            .iter()
            .zip(&claimed)
            .filter(|(_, claimed)| !**claimed)
            .map(|((name, _), _)| (*name).to_string())
            .collect();

        if !leftovers.is_empty() {
            debug!(
                "{} unclaimed columns go to {}",
                leftovers.len(),
                self.table.catch_all_label
            );
            match groups
                .iter_mut()
                .find(|g| g.label == self.table.catch_all_label)
            {
                Some(group) => group.columns.extend(leftovers),
                None => groups.push(CategoryColumns {
                    label: self.table.catch_all_label.clone(),
                    columns: leftovers,
                }),
            }
        }

        Classification { groups }
    }
}
