//! Load-time dataset validation.
//!
//! Every label in a dataset document is checked against the closed domain
//! enumerations once, at load time, so calculation-time matching can trust
//! them. Recognition problems (a label no enumeration claims) are
//! warnings — the matcher degrades around them; structural inconsistencies
//! (duplicate row sizes, values keyed to undeclared columns, an all-empty
//! document) are errors and refuse the dataset.

use cst_core::design::{Arrangement, CableType, ConductorMaterial, InsulationCode, InsulationFamily};
use cst_core::diagnostics::Diagnostics;
use cst_core::tables::{CableDataset, ReferenceTable, TableKind};

/// Insulation label that marks an impedance table as insulation-agnostic.
const INSULATION_ANY: &str = "all";

/// Validate a parsed dataset, returning the full issue report.
///
/// The caller decides policy: [`crate::DatasetStore::init`] refuses on
/// errors and tolerates warnings; the CLI prints both.
pub fn validate_dataset(dataset: &CableDataset) -> Diagnostics {
    let mut diag = Diagnostics::new();

    if dataset.is_empty() {
        diag.add_error("dataset", "document contains no tables of any kind");
        return diag;
    }

    for kind in [
        TableKind::CurrentRating,
        TableKind::Resistance,
        TableKind::Reactance,
    ] {
        let tables = dataset.tables_for(kind);
        if tables.is_empty() {
            diag.add_warning(
                "dataset",
                &format!("no {} tables in document", kind.label()),
            );
        }
        for table in tables {
            validate_table(table, kind, &mut diag);
        }
    }

    diag
}

fn validate_table(table: &ReferenceTable, kind: TableKind, diag: &mut Diagnostics) {
    let entity = format!("Table {} ({})", table.id, kind.label());

    if table.cable_types.is_empty() {
        diag.add_warning_with_entity("dataset", "table declares no cable types", &entity);
    }
    for label in &table.cable_types {
        let recognized = CableType::ALL.iter().any(|t| t.matches_label(label));
        if !recognized {
            diag.add_warning_with_entity(
                "dataset",
                &format!("cable-type label {label:?} matches no known cable type"),
                &entity,
            );
        }
    }

    // Impedance tables apply across insulation types; only rating tables
    // carry meaningful insulation labels.
    if kind == TableKind::CurrentRating {
        for label in &table.insulation {
            if !insulation_label_recognized(label) {
                diag.add_warning_with_entity(
                    "dataset",
                    &format!("insulation label {label:?} matches no known insulation"),
                    &entity,
                );
            }
        }
    }

    if table.columns.is_empty() {
        diag.add_error_with_entity("dataset", "table has no columns", &entity);
    }
    for column in &table.columns {
        if ConductorMaterial::from_label(&column.material).is_none() {
            diag.add_warning_with_entity(
                "dataset",
                &format!(
                    "column {:?} has unknown material label {:?}",
                    column.id, column.material
                ),
                &entity,
            );
        }
        if let Some(code) = &column.arrangement {
            if Arrangement::from_code(code).is_none() {
                diag.add_warning_with_entity(
                    "dataset",
                    &format!(
                        "column {:?} has unknown arrangement code {:?}",
                        column.id, code
                    ),
                    &entity,
                );
            }
        }
    }

    if table.has_duplicate_sizes() {
        diag.add_error_with_entity("dataset", "duplicate conductor sizes in rows", &entity);
    }
    for row in &table.rows {
        for column_id in row.values.keys() {
            if table.column(column_id).is_none() {
                diag.add_error_with_entity(
                    "dataset",
                    &format!(
                        "row {} mm² has a value for undeclared column {:?}",
                        row.size_mm2, column_id
                    ),
                    &entity,
                );
            }
        }
    }
}

fn insulation_label_recognized(label: &str) -> bool {
    if label.eq_ignore_ascii_case(INSULATION_ANY) {
        return true;
    }
    let lower = label.to_ascii_lowercase();
    InsulationCode::ALL.iter().any(|c| c.code() == lower)
        || [InsulationFamily::Pvc, InsulationFamily::Xlpe]
            .iter()
            .any(|f| f.dataset_labels().contains(&lower.as_str()))
}
