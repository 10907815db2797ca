//! Reference dataset model: current-rating, resistance and reactance tables.
//!
//! The dataset is supplied as a single structured JSON document and is
//! treated as opaque, externally-versioned reference data. It is loaded
//! once at process start and read-only thereafter; concurrent calculations
//! share it without locking. Beyond defensive emptiness checks the engine
//! does not validate its internal consistency — that is the loader's job
//! (see the cst-io validation pass).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Which of the three table collections a [`ReferenceTable`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    CurrentRating,
    Resistance,
    Reactance,
}

impl TableKind {
    pub fn label(self) -> &'static str {
        match self {
            TableKind::CurrentRating => "current-rating",
            TableKind::Resistance => "resistance",
            TableKind::Reactance => "reactance",
        }
    }
}

/// Metadata for one column of a reference table.
///
/// Current-rating columns carry an installation arrangement; impedance
/// columns are keyed by material and temperature only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingColumn {
    /// Column identifier, unique within its table
    pub id: String,
    /// Conductor material label ("copper" / "aluminium")
    pub material: String,
    /// Canonical arrangement code; absent on impedance columns
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrangement: Option<String>,
    /// Temperature the column's values assume (°C)
    pub temp_c: f64,
}

/// One row of a reference table: a conductor size and its per-column values.
///
/// Values are current ratings in amperes for current-rating tables, and
/// ohms per kilometre for resistance/reactance tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableRow {
    pub size_mm2: f64,
    pub values: BTreeMap<String, f64>,
}

/// One reference table: typed columns plus rows keyed by conductor size.
///
/// Invariant: all columns share the table's cable-type/insulation
/// classification, and rows are unique per conductor size. Row order
/// follows the document, which lists sizes ascending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceTable {
    /// Table identifier, e.g. "4" or "30"
    pub id: String,
    /// Cable-type labels this table covers
    pub cable_types: Vec<String>,
    /// Equivalent insulation-type names (e.g. ["pvc", "v75"])
    pub insulation: Vec<String>,
    /// Rated conductor temperature the table assumes (°C)
    pub rated_temp_c: f64,
    pub columns: Vec<RatingColumn>,
    pub rows: Vec<TableRow>,
}

impl ReferenceTable {
    /// Conductor sizes present in this table, in row order.
    pub fn sizes(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.size_mm2).collect()
    }

    /// Look up the value for a size/column pair.
    pub fn value(&self, size_mm2: f64, column_id: &str) -> Option<f64> {
        self.rows
            .iter()
            .find(|r| (r.size_mm2 - size_mm2).abs() < 1e-9)
            .and_then(|r| r.values.get(column_id))
            .copied()
    }

    /// First declared column, the fallback target for degraded matches.
    pub fn first_column(&self) -> Option<&RatingColumn> {
        self.columns.first()
    }

    pub fn column(&self, id: &str) -> Option<&RatingColumn> {
        self.columns.iter().find(|c| c.id == id)
    }

    /// Largest conductor size present, if any.
    pub fn max_size(&self) -> Option<f64> {
        self.rows
            .iter()
            .map(|r| r.size_mm2)
            .fold(None, |acc, s| Some(acc.map_or(s, |a: f64| a.max(s))))
    }

    /// Whether two rows share a conductor size (an invariant violation).
    pub fn has_duplicate_sizes(&self) -> bool {
        for (i, row) in self.rows.iter().enumerate() {
            if self.rows[i + 1..]
                .iter()
                .any(|other| (other.size_mm2 - row.size_mm2).abs() < 1e-9)
            {
                return true;
            }
        }
        false
    }
}

/// The full reference dataset: three ordered collections of tables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CableDataset {
    #[serde(default)]
    pub current_rating_tables: Vec<ReferenceTable>,
    #[serde(default)]
    pub resistance_tables: Vec<ReferenceTable>,
    #[serde(default)]
    pub reactance_tables: Vec<ReferenceTable>,
}

impl CableDataset {
    pub fn tables_for(&self, kind: TableKind) -> &[ReferenceTable] {
        match kind {
            TableKind::CurrentRating => &self.current_rating_tables,
            TableKind::Resistance => &self.resistance_tables,
            TableKind::Reactance => &self.reactance_tables,
        }
    }

    /// True when no tables of any kind are present.
    pub fn is_empty(&self) -> bool {
        self.current_rating_tables.is_empty()
            && self.resistance_tables.is_empty()
            && self.reactance_tables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> ReferenceTable {
        let mut row1 = BTreeMap::new();
        row1.insert("cu".to_string(), 24.0);
        row1.insert("al".to_string(), 19.0);
        let mut row2 = BTreeMap::new();
        row2.insert("cu".to_string(), 31.0);
        row2.insert("al".to_string(), 24.0);

        ReferenceTable {
            id: "4".to_string(),
            cable_types: vec!["multicore".to_string()],
            insulation: vec!["pvc".to_string(), "v75".to_string()],
            rated_temp_c: 75.0,
            columns: vec![
                RatingColumn {
                    id: "cu".to_string(),
                    material: "copper".to_string(),
                    arrangement: Some("unenclosed_spaced".to_string()),
                    temp_c: 75.0,
                },
                RatingColumn {
                    id: "al".to_string(),
                    material: "aluminium".to_string(),
                    arrangement: Some("unenclosed_spaced".to_string()),
                    temp_c: 75.0,
                },
            ],
            rows: vec![
                TableRow {
                    size_mm2: 2.5,
                    values: row1,
                },
                TableRow {
                    size_mm2: 4.0,
                    values: row2,
                },
            ],
        }
    }

    #[test]
    fn test_value_lookup() {
        let table = sample_table();
        assert_eq!(table.value(2.5, "cu"), Some(24.0));
        assert_eq!(table.value(4.0, "al"), Some(24.0));
        assert_eq!(table.value(6.0, "cu"), None);
        assert_eq!(table.value(2.5, "missing"), None);
    }

    #[test]
    fn test_sizes_and_max() {
        let table = sample_table();
        assert_eq!(table.sizes(), vec![2.5, 4.0]);
        assert_eq!(table.max_size(), Some(4.0));
    }

    #[test]
    fn test_duplicate_sizes() {
        let mut table = sample_table();
        assert!(!table.has_duplicate_sizes());
        let dup = table.rows[0].clone();
        table.rows.push(dup);
        assert!(table.has_duplicate_sizes());
    }

    #[test]
    fn test_dataset_sections() {
        let mut dataset = CableDataset::default();
        assert!(dataset.is_empty());

        dataset.current_rating_tables.push(sample_table());
        assert!(!dataset.is_empty());
        assert_eq!(dataset.tables_for(TableKind::CurrentRating).len(), 1);
        assert!(dataset.tables_for(TableKind::Resistance).is_empty());
    }

    #[test]
    fn test_deserialize_missing_sections() {
        let dataset: CableDataset = serde_json::from_str("{}").unwrap();
        assert!(dataset.is_empty());
    }

    #[test]
    fn test_table_json_roundtrip() {
        let table = sample_table();
        let json = serde_json::to_string(&table).unwrap();
        let back: ReferenceTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, "4");
        assert_eq!(back.value(2.5, "cu"), Some(24.0));
        assert_eq!(back.columns[0].arrangement.as_deref(), Some("unenclosed_spaced"));
    }
}
