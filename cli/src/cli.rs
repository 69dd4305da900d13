use std::path::PathBuf;

use geoverlay::{BoundaryNodeRule, OpCode};

/// Overlay, relate and union GeoJSON geometries
#[derive(clap::Parser, Debug)]
#[command(name = "geoverlay", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Compute a boolean overlay of two geometries
    Overlay(OverlayArgs),

    /// Compute the DE-9IM relationship of two geometries
    Relate(RelateArgs),

    /// Union every component of one or more geometries
    Union(UnionArgs),
}

#[derive(clap::Args, Debug)]
pub struct OutputArgs {
    /// Output GeoJSON file, defaults to stdout
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Pretty-print the GeoJSON output
    #[arg(long)]
    pub pretty: bool,
}

#[derive(clap::Args, Debug)]
pub struct OverlayArgs {
    /// First input (GeoJSON geometry, Feature or FeatureCollection)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub a: PathBuf,

    /// Second input
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub b: PathBuf,

    /// intersection, union, difference or symdifference
    #[arg(long, default_value = "intersection")]
    pub op: OpCode,

    /// Fail instead of retrying with snapped inputs
    #[arg(long)]
    pub no_snap: bool,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(clap::Args, Debug)]
pub struct RelateArgs {
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub a: PathBuf,

    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub b: PathBuf,

    /// Boundary node rule: mod2, endpoint, multivalent or monovalent
    #[arg(long, default_value = "mod2")]
    pub rule: BoundaryNodeRule,

    /// Test the matrix against a pattern such as T*F**FFF*
    #[arg(long)]
    pub pattern: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct UnionArgs {
    /// Input files
    #[arg(required = true, value_hint = clap::ValueHint::FilePath)]
    pub inputs: Vec<PathBuf>,

    #[command(flatten)]
    pub output: OutputArgs,
}
