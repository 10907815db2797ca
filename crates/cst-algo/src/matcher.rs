//! Table and column matching against the reference dataset.
//!
//! Given a design configuration, selects the single current-rating table
//! and column — and, independently, the resistance/reactance table and
//! column — that matches cable type, insulation family, rated temperature,
//! conductor material and installation arrangement.
//!
//! Matching is pure: nothing here mutates the dataset. Degraded matches
//! (fallback to a default table or column) are not failures; they are
//! recorded in the supplied [`Diagnostics`] and in the match's provenance.
//! Only an empty table collection interrupts the calculation.

use cst_core::diagnostics::Diagnostics;
use cst_core::design::DesignState;
use cst_core::result::Provenance;
use cst_core::tables::{CableDataset, RatingColumn, ReferenceTable, TableKind};
use cst_core::{CstError, CstResult};

use crate::select::first_matching;

/// How far above the insulation's rated temperature an impedance column may
/// sit and still be considered (°C).
pub const IMPEDANCE_TEMP_TOLERANCE_C: f64 = 15.0;

/// A resolved table/column pair for one lookup.
#[derive(Debug, Clone, Copy)]
pub struct TableMatch<'a> {
    pub table: &'a ReferenceTable,
    pub column: &'a RatingColumn,
    /// True when either the table or the column selection fell back to a
    /// default rather than an exact match.
    pub degraded: bool,
}

impl TableMatch<'_> {
    pub fn provenance(&self) -> Provenance {
        if self.degraded {
            Provenance::degraded(&self.table.id, &self.column.id)
        } else {
            Provenance::table(&self.table.id, &self.column.id)
        }
    }
}

fn insulation_matches(table: &ReferenceTable, design: &DesignState) -> bool {
    let family_ok = table
        .insulation
        .iter()
        .any(|label| design.insulation.family_matches_label(label));
    // Rated temperature must match exactly, no tolerance
    family_ok && (table.rated_temp_c - design.insulation.max_temp_c()).abs() < 1e-9
}

fn cable_type_matches(table: &ReferenceTable, design: &DesignState) -> bool {
    table
        .cable_types
        .iter()
        .any(|label| design.cable_type.matches_label(label))
}

/// Select the current-rating table and column for a design.
///
/// Fails only when the dataset has no current-rating tables at all; a
/// design with no matching table degrades to the first table in
/// declaration order, with a warning recorded in `diag`.
pub fn match_current_rating_table<'a>(
    dataset: &'a CableDataset,
    design: &DesignState,
    diag: &mut Diagnostics,
) -> CstResult<TableMatch<'a>> {
    let tables = dataset.tables_for(TableKind::CurrentRating);
    let selected = first_matching(tables, |t| {
        cable_type_matches(t, design) && insulation_matches(t, design)
    })
    .ok_or_else(|| CstError::EmptyDataset("no current-rating tables".into()))?;

    if selected.degraded {
        diag.add_warning_with_entity(
            "match",
            &format!(
                "no current-rating table matches cable type '{}' with insulation '{}', using first table",
                design.cable_type.code(),
                design.insulation.code()
            ),
            &format!("Table {}", selected.value.id),
        );
    }
    let table = selected.value;

    let wanted_arrangement = design.arrangement.code();
    let wanted_material = design.material.label();
    let column = first_matching(&table.columns, |c| {
        c.material.eq_ignore_ascii_case(wanted_material)
            && c.arrangement.as_deref() == Some(wanted_arrangement)
    })
    .ok_or_else(|| {
        CstError::EmptyDataset(format!("current-rating table {} has no columns", table.id))
    })?;

    if column.degraded {
        diag.add_warning_with_entity(
            "match",
            &format!(
                "no column for {} / {}, using first column",
                wanted_material, wanted_arrangement
            ),
            &format!("Table {} / {}", table.id, column.value.id),
        );
    }

    Ok(TableMatch {
        table,
        column: column.value,
        degraded: selected.degraded || column.degraded,
    })
}

/// Select a resistance or reactance table and column for a design.
///
/// Table selection is a simplified two-stage match: a table specific to the
/// design's cable type if one exists, otherwise the collection's first
/// table, which serves as the general default for its kind. Column
/// selection is by conductor material plus closest rated temperature not
/// exceeding the insulation's rating by more than
/// [`IMPEDANCE_TEMP_TOLERANCE_C`], preferring an exact temperature match.
/// When every material column sits outside that window the closest one is
/// still used, but the pick is degraded and warned like the material
/// fallback.
pub fn match_impedance_table<'a>(
    dataset: &'a CableDataset,
    kind: TableKind,
    design: &DesignState,
    diag: &mut Diagnostics,
) -> CstResult<TableMatch<'a>> {
    let tables = dataset.tables_for(kind);
    if tables.is_empty() {
        return Err(CstError::EmptyDataset(format!(
            "no {} tables",
            kind.label()
        )));
    }

    // The first table in each impedance collection is the designated
    // general default; preferring a cable-type-specific table over it is
    // normal selection, not a degraded match.
    let table = tables
        .iter()
        .find(|t| cable_type_matches(t, design))
        .unwrap_or(&tables[0]);

    let wanted_material = design.material.label();
    let rated = design.insulation.max_temp_c();

    let material_columns: Vec<&RatingColumn> = table
        .columns
        .iter()
        .filter(|c| c.material.eq_ignore_ascii_case(wanted_material))
        .collect();

    let (column, degraded) = if material_columns.is_empty() {
        let first = table.first_column().ok_or_else(|| {
            CstError::EmptyDataset(format!("{} table {} has no columns", kind.label(), table.id))
        })?;
        diag.add_warning_with_entity(
            "match",
            &format!(
                "no {} column for {}, using first column",
                kind.label(),
                wanted_material
            ),
            &format!("Table {} / {}", table.id, first.id),
        );
        (first, true)
    } else {
        let in_window: Vec<&RatingColumn> = material_columns
            .iter()
            .copied()
            .filter(|c| c.temp_c <= rated + IMPEDANCE_TEMP_TOLERANCE_C)
            .collect();
        let out_of_window = in_window.is_empty();
        let pool = if out_of_window {
            &material_columns
        } else {
            &in_window
        };
        let best = pool
            .iter()
            .copied()
            .min_by(|a, b| {
                let da = (a.temp_c - rated).abs();
                let db = (b.temp_c - rated).abs();
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            })
            .ok_or_else(|| {
                CstError::EmptyDataset(format!(
                    "{} table {} has no columns",
                    kind.label(),
                    table.id
                ))
            })?;
        if out_of_window {
            diag.add_warning_with_entity(
                "match",
                &format!(
                    "no {} column within {IMPEDANCE_TEMP_TOLERANCE_C} °C of the {rated} °C rating, using closest ({} °C)",
                    kind.label(),
                    best.temp_c
                ),
                &format!("Table {} / {}", table.id, best.id),
            );
        }
        (best, out_of_window)
    };

    Ok(TableMatch {
        table,
        column,
        degraded,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cst_core::design::{
        Arrangement, CableType, ConductorMaterial, DesignState, InsulationCode,
    };
    use cst_core::tables::TableRow;
    use std::collections::BTreeMap;

    fn column(id: &str, material: &str, arrangement: Option<&str>, temp_c: f64) -> RatingColumn {
        RatingColumn {
            id: id.to_string(),
            material: material.to_string(),
            arrangement: arrangement.map(str::to_string),
            temp_c,
        }
    }

    fn row(size: f64, entries: &[(&str, f64)]) -> TableRow {
        let mut values = BTreeMap::new();
        for (k, v) in entries {
            values.insert(k.to_string(), *v);
        }
        TableRow {
            size_mm2: size,
            values,
        }
    }

    fn rating_table(id: &str, cable_type: &str, insulation: &[&str], temp: f64) -> ReferenceTable {
        ReferenceTable {
            id: id.to_string(),
            cable_types: vec![cable_type.to_string()],
            insulation: insulation.iter().map(|s| s.to_string()).collect(),
            rated_temp_c: temp,
            columns: vec![
                column("cu-spaced", "copper", Some("unenclosed_spaced"), temp),
                column("cu-enclosed", "copper", Some("enclosed_air"), temp),
                column("al-spaced", "aluminium", Some("unenclosed_spaced"), temp),
            ],
            rows: vec![
                row(2.5, &[("cu-spaced", 24.0), ("cu-enclosed", 20.0), ("al-spaced", 19.0)]),
                row(4.0, &[("cu-spaced", 31.0), ("cu-enclosed", 27.0), ("al-spaced", 24.0)]),
            ],
        }
    }

    fn dataset() -> CableDataset {
        CableDataset {
            current_rating_tables: vec![
                rating_table("4", "multicore circular", &["pvc", "v75"], 75.0),
                rating_table("12", "multicore circular", &["xlpe", "x90"], 90.0),
            ],
            resistance_tables: vec![ReferenceTable {
                id: "34".to_string(),
                cable_types: vec!["multicore".to_string()],
                insulation: vec!["all".to_string()],
                rated_temp_c: 0.0,
                columns: vec![
                    column("cu-45", "copper", None, 45.0),
                    column("cu-75", "copper", None, 75.0),
                    column("cu-90", "copper", None, 90.0),
                    column("al-75", "aluminium", None, 75.0),
                ],
                rows: vec![row(2.5, &[("cu-45", 8.0), ("cu-75", 9.01), ("cu-90", 9.45), ("al-75", 14.8)])],
            }],
            reactance_tables: vec![],
        }
    }

    fn design() -> DesignState {
        DesignState {
            cable_type: CableType::MulticoreCircular,
            insulation: InsulationCode::V75,
            arrangement: Arrangement::UnenclosedSpaced,
            material: ConductorMaterial::Copper,
            ..DesignState::example()
        }
    }

    #[test]
    fn test_exact_current_rating_match() {
        let dataset = dataset();
        let mut diag = Diagnostics::new();
        let matched = match_current_rating_table(&dataset, &design(), &mut diag).unwrap();

        assert_eq!(matched.table.id, "4");
        assert_eq!(matched.column.id, "cu-spaced");
        assert!(!matched.degraded);
        assert!(!diag.has_issues());
        assert_eq!(matched.provenance().to_string(), "Table 4 / cu-spaced");
    }

    #[test]
    fn test_insulation_temperature_selects_table() {
        let dataset = dataset();
        let mut diag = Diagnostics::new();
        let mut d = design();
        d.insulation = InsulationCode::X90;
        let matched = match_current_rating_table(&dataset, &d, &mut diag).unwrap();

        assert_eq!(matched.table.id, "12");
        assert!(!matched.degraded);
    }

    #[test]
    fn test_degraded_table_fallback() {
        let dataset = dataset();
        let mut diag = Diagnostics::new();
        let mut d = design();
        d.cable_type = CableType::Flexible;
        let matched = match_current_rating_table(&dataset, &d, &mut diag).unwrap();

        // Falls back to the first table rather than failing
        assert_eq!(matched.table.id, "4");
        assert!(matched.degraded);
        assert!(diag.has_warnings());
        assert!(matched.provenance().to_string().contains("closest match"));
    }

    #[test]
    fn test_degraded_column_fallback() {
        let dataset = dataset();
        let mut diag = Diagnostics::new();
        let mut d = design();
        d.arrangement = Arrangement::BuriedDirect;
        let matched = match_current_rating_table(&dataset, &d, &mut diag).unwrap();

        assert_eq!(matched.column.id, "cu-spaced");
        assert!(matched.degraded);
        assert_eq!(diag.warning_count(), 1);
    }

    #[test]
    fn test_empty_dataset_is_fatal() {
        let dataset = CableDataset::default();
        let mut diag = Diagnostics::new();
        let err = match_current_rating_table(&dataset, &design(), &mut diag).unwrap_err();
        assert!(matches!(err, CstError::EmptyDataset(_)));
    }

    #[test]
    fn test_impedance_column_exact_temperature() {
        let dataset = dataset();
        let mut diag = Diagnostics::new();
        let matched =
            match_impedance_table(&dataset, TableKind::Resistance, &design(), &mut diag).unwrap();

        assert_eq!(matched.table.id, "34");
        assert_eq!(matched.column.id, "cu-75");
        assert!(!matched.degraded);
    }

    #[test]
    fn test_impedance_column_closest_within_tolerance() {
        let dataset = dataset();
        let mut diag = Diagnostics::new();
        let mut d = design();
        // X110 rated 110 °C: 90 °C column is closest; 45/75 further away
        d.insulation = InsulationCode::X110;
        let matched =
            match_impedance_table(&dataset, TableKind::Resistance, &d, &mut diag).unwrap();
        assert_eq!(matched.column.id, "cu-90");
    }

    #[test]
    fn test_impedance_column_outside_window_is_degraded() {
        let mut dataset = dataset();
        // Only a 110 °C copper column remains; for a 75 °C insulation the
        // window tops out at 90 °C
        dataset.resistance_tables[0]
            .columns
            .retain(|c| c.id == "al-75");
        dataset.resistance_tables[0].columns.push(column(
            "cu-110",
            "copper",
            None,
            110.0,
        ));
        let mut diag = Diagnostics::new();
        let matched =
            match_impedance_table(&dataset, TableKind::Resistance, &design(), &mut diag).unwrap();

        assert_eq!(matched.column.id, "cu-110");
        assert!(matched.degraded);
        assert!(diag.has_warnings());
        assert!(matched.provenance().to_string().contains("closest match"));
    }

    #[test]
    fn test_impedance_material_fallback() {
        let mut dataset = dataset();
        // Copper-only table, aluminium design: material cannot be matched
        dataset.resistance_tables[0]
            .columns
            .retain(|c| c.material == "copper");
        let mut diag = Diagnostics::new();
        let mut d = design();
        d.material = ConductorMaterial::Aluminium;
        let matched =
            match_impedance_table(&dataset, TableKind::Resistance, &d, &mut diag).unwrap();

        assert!(matched.degraded);
        assert!(diag.has_warnings());
        assert_eq!(matched.column.material, "copper");
    }

    #[test]
    fn test_impedance_empty_collection_is_fatal() {
        let dataset = dataset();
        let mut diag = Diagnostics::new();
        let err = match_impedance_table(&dataset, TableKind::Reactance, &design(), &mut diag)
            .unwrap_err();
        assert!(matches!(err, CstError::EmptyDataset(_)));
    }
}
