use crate::utils::parser::{self, RotationStep};
use clap::{Args, Parser, Subcommand};
use conformers::engine::thermostat::Ensemble;
use nalgebra::Vector3;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Conformers CLI - compute conformer ensemble populations and inspect per-frame view transforms.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Assign uniform (NVE) or Boltzmann (NVT) populations to the frames of an energy table.
    Populate(PopulateArgs),
    /// Drive the trackball handler with rotation steps and print a frame's model matrix.
    Transform(TransformArgs),
}

/// Arguments for the `populate` subcommand.
#[derive(Args, Debug)]
pub struct PopulateArgs {
    /// Path to the per-frame energy table (CSV with a `frame,energy` header).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub energies: PathBuf,

    /// Treat the energy file as plain text holding one energy per token in frame order.
    #[arg(long)]
    pub text: bool,

    /// Path for the `frame,energy,population` output table. Defaults to stdout.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the statistical ensemble ('nve' or 'nvt').
    #[arg(long, value_name = "ENSEMBLE")]
    pub ensemble: Option<Ensemble>,

    /// Override the temperature in Kelvin.
    #[arg(short, long, value_name = "KELVIN")]
    pub temperature: Option<f64>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S thermostat.temperature=310
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `transform` subcommand.
#[derive(Args, Debug)]
pub struct TransformArgs {
    /// Number of frames tracked by the handler.
    #[arg(short = 'n', long, default_value_t = 1, value_name = "INT")]
    pub frames: usize,

    /// Frame whose model matrix is printed and which receives unblocked rotations.
    #[arg(short, long, default_value_t = 0, value_name = "INDEX")]
    pub frame: usize,

    /// Rotation step 'ANGLE:X,Y,Z' in degrees. Can be used multiple times; steps apply in order.
    #[arg(
        short,
        long = "rotate",
        value_name = "ANGLE:X,Y,Z",
        value_parser = parser::parse_rotation,
        allow_hyphen_values = true
    )]
    pub rotations: Vec<RotationStep>,

    /// Rotation center of the printed frame.
    #[arg(
        long,
        value_name = "X,Y,Z",
        value_parser = parser::parse_vector,
        allow_hyphen_values = true
    )]
    pub center: Option<Vector3<f64>>,

    /// Override the uniform scale factor.
    #[arg(short, long, value_name = "FLOAT")]
    pub scale: Option<f64>,

    /// Rotate only the addressed frame instead of all frames.
    #[arg(long)]
    pub unblocked: bool,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S view.scale=2.0
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}
