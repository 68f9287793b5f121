//! Command-line interface orchestration for the kultura toolkit.
//!
//! Offers lookup, export, clustering, layout and spread commands over the
//! bundled cultural-dimension datasets. Commands parse with clap, produce a
//! [`Report`], and render through [`render_report`].

mod commands;
mod export;
mod render;
mod suggest;

pub use commands::{
    Cli, CliError, ClusterArgs, Command, CountryArgs, DatasetArg, DimensionRow, DimensionsArgs,
    ExportArgs, ExtremesArgs, LayoutArgs, PairArgs, Report, SpreadArgs, run_cli,
};
pub use render::render_report;
