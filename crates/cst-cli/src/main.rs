use std::io::{self, Write};
use std::path::Path;

use clap::Parser;
use tabwriter::TabWriter;
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

use cst_algo::calculate;
use cst_core::design::DesignState;
use cst_core::result::CalculationResult;
use cst_core::tables::{CableDataset, TableKind};
use cst_core::units::{Amperes, Metres, Volts};
use cst_io::{default_dataset, global, load_dataset_file, validate_dataset};

mod cli;

use cli::{
    parse_arrangement, parse_cable_type, parse_insulation, parse_material, parse_phases,
    parse_size_spec, Cli, Commands, SizeArgs,
};

/// Load the requested dataset (or the embedded default) into the
/// process-wide store, reporting validation findings. Validation errors
/// refuse the dataset.
fn load_dataset(path: Option<&Path>) -> anyhow::Result<&'static CableDataset> {
    let dataset = match path {
        Some(path) => {
            info!("Loading dataset from {}", path.display());
            load_dataset_file(path)?
        }
        None => default_dataset()?,
    };
    let report = validate_dataset(&dataset);
    for issue in report.warnings() {
        warn!("{issue}");
    }
    if report.has_errors() {
        for issue in report.errors() {
            tracing::error!("{issue}");
        }
        anyhow::bail!("dataset failed validation: {}", report.summary());
    }
    Ok(global().init(dataset)?)
}

fn design_from_args(args: &SizeArgs) -> anyhow::Result<DesignState> {
    if !(args.current.is_finite() && args.current > 0.0) {
        anyhow::bail!("--current must be positive");
    }
    if !(args.length.is_finite() && args.length > 0.0) {
        anyhow::bail!("--length must be positive");
    }
    if !(args.voltage.is_finite() && args.voltage > 0.0) {
        anyhow::bail!("--voltage must be positive");
    }
    Ok(DesignState {
        cable_type: parse_cable_type(&args.cable_type)?,
        insulation: parse_insulation(&args.insulation)?,
        arrangement: parse_arrangement(&args.arrangement)?,
        material: parse_material(&args.material)?,
        phases: parse_phases(&args.phases)?,
        voltage: Volts(args.voltage),
        load_current: Amperes(args.current),
        active_size: parse_size_spec(&args.size)?,
        earth_size: parse_size_spec(&args.earth_size)?,
        length: Metres(args.length),
        max_drop_percent: args.max_drop,
    })
}

fn print_result(result: &CalculationResult) -> anyhow::Result<()> {
    let mut writer = TabWriter::new(io::stdout());
    writeln!(
        writer,
        "Conductor size\t{} mm²\t",
        result.selected_size_mm2
    )?;
    writeln!(
        writer,
        "Current rating\t{:.1} A base, {:.1} A derated\t{}",
        result.rating.base.value(),
        result.rating.adjusted.value(),
        result.rating.provenance
    )?;
    writeln!(
        writer,
        "Resistance\t{:.4} Ω/km\t{}",
        result.impedance.resistance.value(),
        result.impedance.resistance_provenance
    )?;
    writeln!(
        writer,
        "Reactance\t{:.4} Ω/km\t{}",
        result.impedance.reactance.value(),
        result.impedance.reactance_provenance
    )?;
    writeln!(
        writer,
        "Voltage drop\t{:.2} V ({:.2}%)\tlimit {:.2}%",
        result.voltage_drop.volts.value(),
        result.voltage_drop.percent,
        result.max_drop_percent
    )?;
    writeln!(
        writer,
        "Voltage at load\t{:.1} V\tmax run {:.1} m",
        result.voltage_drop.voltage_at_load.value(),
        result.voltage_drop.max_run.value()
    )?;
    writeln!(
        writer,
        "Earth conductor\t{} mm²\t",
        result.earth.size_mm2
    )?;
    writeln!(
        writer,
        "Loop impedance\t{:.4} Ω/km\tphase {:.4} + earth {:.4}",
        result.loop_impedance.total.value(),
        result.loop_impedance.phase.value(),
        result.loop_impedance.earth.value()
    )?;
    writeln!(
        writer,
        "Short circuit\t{}\tI²t {:.0} vs K²S² {:.0}",
        if result.short_circuit.passes { "pass" } else { "FAIL" },
        result.short_circuit.fault_energy,
        result.short_circuit.withstand
    )?;
    writeln!(
        writer,
        "Protection\t{:.0} A type {:?}\ttrip {:.0} A",
        result.protection.rating.value(),
        result.protection.curve,
        result.protection.trip_current.value()
    )?;
    writeln!(
        writer,
        "Compliant\t{}\t",
        if result.fully_compliant() { "yes" } else { "NO" }
    )?;
    writer.flush()?;

    if result.diagnostics.has_issues() {
        println!();
        print!("{}", result.diagnostics);
    }
    Ok(())
}

fn run_size(args: &SizeArgs) -> anyhow::Result<()> {
    let dataset = load_dataset(args.dataset.as_deref())?;
    let design = design_from_args(args)?;
    let result = calculate(dataset, &design)?;

    if args.json {
        serde_json::to_writer_pretty(io::stdout(), &result)?;
        println!();
    } else {
        print_result(&result)?;
    }
    Ok(())
}

fn run_tables(dataset_path: Option<&Path>, json: bool) -> anyhow::Result<()> {
    let dataset = load_dataset(dataset_path)?;

    if json {
        serde_json::to_writer_pretty(io::stdout(), &dataset)?;
        println!();
        return Ok(());
    }

    let mut writer = TabWriter::new(io::stdout());
    writeln!(writer, "KIND\tTABLE\tCABLE TYPES\tINSULATION\tCOLUMNS\tSIZES")?;
    for kind in [
        TableKind::CurrentRating,
        TableKind::Resistance,
        TableKind::Reactance,
    ] {
        for table in dataset.tables_for(kind) {
            writeln!(
                writer,
                "{}\t{}\t{}\t{}\t{}\t{}",
                kind.label(),
                table.id,
                table.cable_types.join(", "),
                table.insulation.join(", "),
                table.columns.len(),
                table.rows.len()
            )?;
        }
    }
    writer.flush()?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let result = match &cli.command {
        Commands::Size(args) => run_size(args),
        Commands::Tables { dataset, json } => run_tables(dataset.as_deref(), *json),
    };

    if let Err(e) = result {
        tracing::error!("{e:#}");
        std::process::exit(1);
    }
}
