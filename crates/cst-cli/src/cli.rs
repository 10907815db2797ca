use clap::{Parser, Subcommand};
use std::path::PathBuf;

use cst_core::design::{
    Arrangement, CableType, ConductorMaterial, InsulationCode, PhaseConfig, SizeSpec,
};

#[derive(Parser, Debug)]
#[command(name = "cst", author, version, about = "Cable sizing toolkit", long_about = None)]
pub struct Cli {
    /// Set the logging level
    #[arg(long, default_value = "warn")]
    pub log_level: tracing::Level,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Size a cable for a load, or evaluate a fixed size
    Size(SizeArgs),
    /// List the reference tables in the dataset
    Tables {
        /// Path to a dataset JSON document (defaults to the embedded dataset)
        #[arg(long)]
        dataset: Option<PathBuf>,
        /// Emit the listing as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(clap::Args, Debug)]
pub struct SizeArgs {
    /// Load current in amperes
    #[arg(long)]
    pub current: f64,

    /// Cable run length in metres
    #[arg(long)]
    pub length: f64,

    /// Nominal supply voltage in volts
    #[arg(long, default_value_t = 400.0)]
    pub voltage: f64,

    /// Maximum voltage drop, percent of nominal
    #[arg(long, default_value_t = 5.0)]
    pub max_drop: f64,

    /// Cable type: two-core-earth, single-core, multicore, armoured, flexible
    #[arg(long, default_value = "multicore")]
    pub cable_type: String,

    /// Insulation code: v75, v90, x90, x110
    #[arg(long, default_value = "v75")]
    pub insulation: String,

    /// Installation arrangement code (e.g. unenclosed_spaced, buried_direct)
    #[arg(long, default_value = "unenclosed_spaced")]
    pub arrangement: String,

    /// Conductor material: copper or aluminium
    #[arg(long, default_value = "copper")]
    pub material: String,

    /// Phase configuration: dc, 1ph, 2ph, 2ph-3w, 3ph
    #[arg(long, default_value = "3ph")]
    pub phases: String,

    /// Active conductor size: "auto" or a size in mm²
    #[arg(long, default_value = "auto")]
    pub size: String,

    /// Earth conductor size: "auto" or a size in mm²
    #[arg(long, default_value = "auto")]
    pub earth_size: String,

    /// Path to a dataset JSON document (defaults to the embedded dataset)
    #[arg(long)]
    pub dataset: Option<PathBuf>,

    /// Emit the full result as JSON
    #[arg(long)]
    pub json: bool,
}

fn codes_list<I: IntoIterator<Item = &'static str>>(codes: I) -> String {
    codes.into_iter().collect::<Vec<_>>().join(", ")
}

pub fn parse_cable_type(code: &str) -> anyhow::Result<CableType> {
    CableType::from_code(code).ok_or_else(|| {
        anyhow::anyhow!(
            "unknown cable type {code:?} (expected one of: {})",
            codes_list(CableType::ALL.map(|c| c.code()))
        )
    })
}

pub fn parse_insulation(code: &str) -> anyhow::Result<InsulationCode> {
    InsulationCode::from_code(code).ok_or_else(|| {
        anyhow::anyhow!(
            "unknown insulation code {code:?} (expected one of: {})",
            codes_list(InsulationCode::ALL.map(|c| c.code()))
        )
    })
}

pub fn parse_arrangement(code: &str) -> anyhow::Result<Arrangement> {
    Arrangement::from_code(code).ok_or_else(|| {
        anyhow::anyhow!(
            "unknown arrangement {code:?} (expected one of: {})",
            codes_list(Arrangement::ALL.map(|a| a.code()))
        )
    })
}

pub fn parse_material(label: &str) -> anyhow::Result<ConductorMaterial> {
    ConductorMaterial::from_label(label).ok_or_else(|| {
        anyhow::anyhow!(
            "unknown conductor material {label:?} (expected copper or aluminium)"
        )
    })
}

pub fn parse_phases(code: &str) -> anyhow::Result<PhaseConfig> {
    PhaseConfig::from_code(code).ok_or_else(|| {
        anyhow::anyhow!(
            "unknown phase configuration {code:?} (expected one of: {})",
            codes_list(PhaseConfig::ALL.map(|p| p.code()))
        )
    })
}

/// Parse a size argument: the literal "auto" or a positive size in mm².
pub fn parse_size_spec(value: &str) -> anyhow::Result<SizeSpec> {
    if value.eq_ignore_ascii_case("auto") {
        return Ok(SizeSpec::Auto);
    }
    let size: f64 = value
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid size {value:?} (expected \"auto\" or a number)"))?;
    if !size.is_finite() || size <= 0.0 {
        anyhow::bail!("invalid size {value:?} (must be positive)");
    }
    Ok(SizeSpec::Fixed(size))
}
