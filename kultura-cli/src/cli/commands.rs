//! Command implementations and argument parsing for the kultura CLI.

use std::collections::BTreeSet;
use std::io;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use kultura_catalog::{CatalogError, Dataset, load};
use kultura_core::{
    ClusterError, DistanceMatrix, Distribution, EngineError, Entity, EntityExtremes, LayoutPoint,
    MatrixError, MatrixSummary, PairDistance, Score, distribution, entity_distances,
    entity_extremes, k_medoids, mds_layout, off_diagonal, scaled_euclidean_matrix, summarise,
};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

use super::{export, suggest};

const DEFAULT_CLUSTERS: usize = 4;
const DEFAULT_SEED: u64 = 42;
const DEFAULT_ITERATIONS: usize = 300;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "kultura",
    about = "Explore cultural distance between countries."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Show the distance between two countries.
    Pair(PairArgs),
    /// Show the farthest, closest, and average pair across the dataset.
    Extremes(ExtremesArgs),
    /// Show the countries farthest from and nearest to one country.
    Country(CountryArgs),
    /// Print raw dimension scores as a table.
    Dimensions(DimensionsArgs),
    /// Write the full distance matrix to a CSV file.
    Export(ExportArgs),
    /// Partition countries into clusters around medoids.
    Cluster(ClusterArgs),
    /// Embed countries in the plane for plotting.
    Layout(LayoutArgs),
    /// Summarise the spread of distances, overall or for one country.
    Spread(SpreadArgs),
}

/// Dataset selector shared by every command.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DatasetArg {
    /// Hofstede's six-dimension country scores.
    Hofstede,
    /// The eight Culture Map scales.
    CultureMap,
}

impl From<DatasetArg> for Dataset {
    fn from(arg: DatasetArg) -> Self {
        match arg {
            DatasetArg::Hofstede => Self::Hofstede,
            DatasetArg::CultureMap => Self::CultureMap,
        }
    }
}

/// Options accepted by the `pair` command.
#[derive(Debug, Args, Clone)]
pub struct PairArgs {
    /// First country name.
    pub first: String,

    /// Second country name.
    pub second: String,

    /// Dataset to analyse.
    #[arg(long, value_enum, default_value = "hofstede")]
    pub dataset: DatasetArg,
}

/// Options accepted by the `extremes` command.
#[derive(Debug, Args, Clone)]
pub struct ExtremesArgs {
    /// Dataset to analyse.
    #[arg(long, value_enum, default_value = "hofstede")]
    pub dataset: DatasetArg,
}

/// Options accepted by the `country` command.
#[derive(Debug, Args, Clone)]
pub struct CountryArgs {
    /// Country to report on.
    pub name: String,

    /// Dataset to analyse.
    #[arg(long, value_enum, default_value = "hofstede")]
    pub dataset: DatasetArg,
}

/// Options accepted by the `dimensions` command.
#[derive(Debug, Args, Clone)]
pub struct DimensionsArgs {
    /// Countries to include; all countries when omitted.
    pub countries: Vec<String>,

    /// Dataset to analyse.
    #[arg(long, value_enum, default_value = "hofstede")]
    pub dataset: DatasetArg,
}

/// Options accepted by the `export` command.
#[derive(Debug, Args, Clone)]
pub struct ExportArgs {
    /// Destination CSV path.
    pub path: PathBuf,

    /// Dataset to analyse.
    #[arg(long, value_enum, default_value = "hofstede")]
    pub dataset: DatasetArg,
}

/// Options accepted by the `cluster` command.
#[derive(Debug, Args, Clone)]
pub struct ClusterArgs {
    /// Dataset to analyse.
    #[arg(long, value_enum, default_value = "hofstede")]
    pub dataset: DatasetArg,

    /// Number of clusters to form.
    #[arg(long, default_value_t = DEFAULT_CLUSTERS)]
    pub clusters: usize,

    /// Seed for the medoid initialisation.
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,
}

/// Options accepted by the `layout` command.
#[derive(Debug, Args, Clone)]
pub struct LayoutArgs {
    /// Countries to embed; the whole dataset when omitted.
    pub countries: Vec<String>,

    /// Dataset to analyse.
    #[arg(long, value_enum, default_value = "hofstede")]
    pub dataset: DatasetArg,

    /// Majorisation iterations to run.
    #[arg(long, default_value_t = DEFAULT_ITERATIONS)]
    pub iterations: usize,

    /// Seed for the starting configuration.
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,
}

/// Options accepted by the `spread` command.
#[derive(Debug, Args, Clone)]
pub struct SpreadArgs {
    /// Restrict the spread to one country's distances.
    pub country: Option<String>,

    /// Dataset to analyse.
    #[arg(long, value_enum, default_value = "hofstede")]
    pub dataset: DatasetArg,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CliError {
    /// A requested country is not part of the selected dataset.
    #[error("country `{name}` is not in the {dataset} dataset{}", suggestion_hint(.suggestion))]
    UnknownCountry {
        /// Human-readable dataset title.
        dataset: &'static str,
        /// The name that failed to resolve.
        name: String,
        /// Closest catalogued name, when one is plausible.
        suggestion: Option<String>,
    },
    /// Distance computation failed.
    #[error(transparent)]
    Engine(#[from] EngineError),
    /// Matrix lookup failed.
    #[error(transparent)]
    Matrix(#[from] MatrixError),
    /// Dataset loading failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    /// Clustering failed.
    #[error(transparent)]
    Cluster(#[from] ClusterError),
    /// File I/O failed while writing an export.
    #[error("failed to write `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// CSV serialisation failed while writing an export.
    #[error("failed to write CSV to `{path}`: {source}")]
    Csv {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying CSV writer error.
        #[source]
        source: csv::Error,
    },
}

impl CliError {
    /// Stable machine-readable code for the error variant.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::UnknownCountry { .. } => "CLI_UNKNOWN_COUNTRY",
            Self::Engine(err) => err.code(),
            Self::Matrix(err) => err.code(),
            Self::Catalog(err) => err.code(),
            Self::Cluster(err) => err.code(),
            Self::Io { .. } => "CLI_IO",
            Self::Csv { .. } => "CLI_CSV",
        }
    }
}

fn suggestion_hint(suggestion: &Option<String>) -> String {
    suggestion
        .as_deref()
        .map(|name| format!("; did you mean `{name}`?"))
        .unwrap_or_default()
}

/// One row of the dimensions table: a country and its scores in the report's
/// dimension order.
#[derive(Debug, Clone)]
pub struct DimensionRow {
    /// Country name.
    pub country: String,
    /// Scores aligned with the report's dimension list.
    pub scores: Vec<Score>,
}

/// Structured outcome of a CLI command, ready for rendering.
#[derive(Debug, Clone)]
pub enum Report {
    /// Distance between two countries.
    Pair(PairDistance),
    /// Dataset-wide farthest, closest, and average pair.
    Extremes(MatrixSummary),
    /// One country's farthest and nearest counterparts.
    Country(EntityExtremes),
    /// Raw dimension scores.
    Dimensions {
        /// Dimension names, in table column order.
        dimensions: Vec<String>,
        /// One row per requested country.
        rows: Vec<DimensionRow>,
    },
    /// Confirmation of a CSV export.
    Exported {
        /// Destination path.
        path: PathBuf,
        /// Number of countries in the matrix.
        entities: usize,
    },
    /// Medoid clustering of the dataset.
    Cluster {
        /// Member names per cluster, in cluster order.
        clusters: Vec<Vec<String>>,
        /// Medoid name per cluster.
        medoids: Vec<String>,
        /// Highlighted countries and the cluster each landed in.
        focus: Vec<(String, usize)>,
    },
    /// 2D embedding of the dataset.
    Layout {
        /// One point per country, in matrix order.
        points: Vec<LayoutPoint>,
    },
    /// Five-number summary of distances.
    Spread {
        /// What the summary covers, for display.
        scope: String,
        /// The distribution statistics.
        stats: Distribution,
        /// Number of distances summarised.
        samples: usize,
    },
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when loading, analysis, or export fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use kultura_cli::cli::{Cli, Command, DatasetArg, PairArgs, Report, run_cli};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let cli = Cli {
///     command: Command::Pair(PairArgs {
///         first: "Germany".into(),
///         second: "Japan".into(),
///         dataset: DatasetArg::Hofstede,
///     }),
/// };
/// let Report::Pair(pair) = run_cli(cli)? else {
///     panic!("pair command must yield a pair report");
/// };
/// assert!(pair.distance > 0.0);
/// # Ok(())
/// # }
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<Report, CliError> {
    let span = Span::current();
    match cli.command {
        Command::Pair(args) => {
            span.record("command", field::display("pair"));
            run_pair(args)
        }
        Command::Extremes(args) => {
            span.record("command", field::display("extremes"));
            run_extremes(args)
        }
        Command::Country(args) => {
            span.record("command", field::display("country"));
            run_country(args)
        }
        Command::Dimensions(args) => {
            span.record("command", field::display("dimensions"));
            run_dimensions(args)
        }
        Command::Export(args) => {
            span.record("command", field::display("export"));
            run_export(args)
        }
        Command::Cluster(args) => {
            span.record("command", field::display("cluster"));
            run_cluster(args)
        }
        Command::Layout(args) => {
            span.record("command", field::display("layout"));
            run_layout(args)
        }
        Command::Spread(args) => {
            span.record("command", field::display("spread"));
            run_spread(args)
        }
    }
}

fn load_matrix(dataset: Dataset) -> Result<(Vec<Entity>, DistanceMatrix), CliError> {
    let entities = load(dataset)?;
    let matrix = scaled_euclidean_matrix(&entities)?;
    Ok((entities, matrix))
}

fn require_country(matrix: &DistanceMatrix, dataset: Dataset, name: &str) -> Result<(), CliError> {
    if matrix.contains(name) {
        return Ok(());
    }
    let suggestion = suggest::closest_match(matrix.names().iter().map(String::as_str), name);
    Err(CliError::UnknownCountry {
        dataset: dataset.title(),
        name: name.to_owned(),
        suggestion,
    })
}

#[instrument(name = "cli.pair", err, skip(args), fields(dataset = field::Empty))]
fn run_pair(args: PairArgs) -> Result<Report, CliError> {
    let dataset = Dataset::from(args.dataset);
    Span::current().record("dataset", field::display(dataset));
    let (_, matrix) = load_matrix(dataset)?;
    require_country(&matrix, dataset, &args.first)?;
    require_country(&matrix, dataset, &args.second)?;
    let distance = matrix.distance(&args.first, &args.second)?;
    Ok(Report::Pair(PairDistance {
        first: args.first,
        second: args.second,
        distance,
    }))
}

#[instrument(name = "cli.extremes", err, skip(args), fields(dataset = field::Empty))]
fn run_extremes(args: ExtremesArgs) -> Result<Report, CliError> {
    let dataset = Dataset::from(args.dataset);
    Span::current().record("dataset", field::display(dataset));
    let (_, matrix) = load_matrix(dataset)?;
    Ok(Report::Extremes(summarise(&matrix)?))
}

#[instrument(name = "cli.country", err, skip(args), fields(dataset = field::Empty))]
fn run_country(args: CountryArgs) -> Result<Report, CliError> {
    let dataset = Dataset::from(args.dataset);
    Span::current().record("dataset", field::display(dataset));
    let (_, matrix) = load_matrix(dataset)?;
    require_country(&matrix, dataset, &args.name)?;
    Ok(Report::Country(entity_extremes(&matrix, &args.name)?))
}

#[instrument(name = "cli.dimensions", err, skip(args), fields(dataset = field::Empty))]
fn run_dimensions(args: DimensionsArgs) -> Result<Report, CliError> {
    let dataset = Dataset::from(args.dataset);
    Span::current().record("dataset", field::display(dataset));
    let entities = load(dataset)?;

    let dimensions: Vec<String> = entities
        .iter()
        .flat_map(Entity::dimensions)
        .map(ToOwned::to_owned)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let selected: Vec<&Entity> = if args.countries.is_empty() {
        entities.iter().collect()
    } else {
        let mut picked = Vec::with_capacity(args.countries.len());
        for name in &args.countries {
            let Some(entity) = entities.iter().find(|e| e.name() == name) else {
                let suggestion =
                    suggest::closest_match(entities.iter().map(Entity::name), name);
                return Err(CliError::UnknownCountry {
                    dataset: dataset.title(),
                    name: name.clone(),
                    suggestion,
                });
            };
            picked.push(entity);
        }
        picked
    };

    let rows = selected
        .iter()
        .map(|entity| DimensionRow {
            country: entity.name().to_owned(),
            scores: dimensions.iter().map(|dim| entity.score(dim)).collect(),
        })
        .collect();
    Ok(Report::Dimensions { dimensions, rows })
}

#[instrument(
    name = "cli.export",
    err,
    skip(args),
    fields(dataset = field::Empty, path = field::Empty)
)]
fn run_export(args: ExportArgs) -> Result<Report, CliError> {
    let dataset = Dataset::from(args.dataset);
    let span = Span::current();
    span.record("dataset", field::display(dataset));
    span.record("path", field::display(args.path.display()));
    let (_, matrix) = load_matrix(dataset)?;
    export::write_matrix(&matrix, &args.path)?;
    info!(
        path = %args.path.display(),
        entities = matrix.len(),
        "matrix exported"
    );
    Ok(Report::Exported {
        path: args.path,
        entities: matrix.len(),
    })
}

#[instrument(
    name = "cli.cluster",
    err,
    skip(args),
    fields(dataset = field::Empty, clusters = args.clusters, seed = args.seed)
)]
fn run_cluster(args: ClusterArgs) -> Result<Report, CliError> {
    let dataset = Dataset::from(args.dataset);
    Span::current().record("dataset", field::display(dataset));
    let (_, matrix) = load_matrix(dataset)?;
    let partition = k_medoids(&matrix, args.clusters, args.seed)?;

    let names = matrix.names();
    let clusters: Vec<Vec<String>> = (0..partition.cluster_count())
        .map(|cluster| {
            partition
                .members(cluster)
                .into_iter()
                .map(|index| names[index].clone())
                .collect()
        })
        .collect();
    let medoids: Vec<String> = partition
        .medoids()
        .iter()
        .map(|&index| names[index].clone())
        .collect();
    let focus: Vec<(String, usize)> = dataset
        .focus_countries()
        .iter()
        .filter_map(|country| {
            matrix
                .position(country)
                .map(|index| ((*country).to_owned(), partition.assignments()[index]))
        })
        .collect();
    Ok(Report::Cluster {
        clusters,
        medoids,
        focus,
    })
}

#[instrument(
    name = "cli.layout",
    err,
    skip(args),
    fields(dataset = field::Empty, iterations = args.iterations, seed = args.seed)
)]
fn run_layout(args: LayoutArgs) -> Result<Report, CliError> {
    let dataset = Dataset::from(args.dataset);
    Span::current().record("dataset", field::display(dataset));
    let (_, matrix) = load_matrix(dataset)?;
    let matrix = if args.countries.is_empty() {
        matrix
    } else {
        for name in &args.countries {
            require_country(&matrix, dataset, name)?;
        }
        let keep: Vec<&str> = args.countries.iter().map(String::as_str).collect();
        matrix.restrict(&keep)?
    };
    let points = mds_layout(&matrix, args.iterations, args.seed);
    Ok(Report::Layout { points })
}

#[instrument(name = "cli.spread", err, skip(args), fields(dataset = field::Empty))]
fn run_spread(args: SpreadArgs) -> Result<Report, CliError> {
    let dataset = Dataset::from(args.dataset);
    Span::current().record("dataset", field::display(dataset));
    let (_, matrix) = load_matrix(dataset)?;

    let (scope, values) = match args.country {
        Some(name) => {
            require_country(&matrix, dataset, &name)?;
            let values = entity_distances(&matrix, &name)?;
            (format!("distances from {name}"), values)
        }
        None => ("all pairwise distances".to_owned(), off_diagonal(&matrix)),
    };
    let stats = distribution(&values).ok_or(CliError::Matrix(MatrixError::TooSmall {
        len: matrix.len(),
        required: 2,
    }))?;
    Ok(Report::Spread {
        scope,
        stats,
        samples: values.len(),
    })
}
