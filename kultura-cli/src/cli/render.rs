//! Plain-text rendering of command reports.

use std::io::{self, Write};

use super::commands::{DimensionRow, Report};

/// Renders `report` to `writer` in a human-readable text format.
///
/// Distances print with two decimal places; layout coordinates with four.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
pub fn render_report(report: &Report, mut writer: impl Write) -> io::Result<()> {
    match report {
        Report::Pair(pair) => {
            writeln!(
                writer,
                "distance between {} and {}: {:.2}",
                pair.first, pair.second, pair.distance
            )?;
        }
        Report::Extremes(summary) => {
            writeln!(
                writer,
                "farthest: {} and {} ({:.2})",
                summary.farthest.first, summary.farthest.second, summary.farthest.distance
            )?;
            writeln!(
                writer,
                "closest: {} and {} ({:.2})",
                summary.closest.first, summary.closest.second, summary.closest.distance
            )?;
            writeln!(writer, "average distance: {:.2}", summary.average)?;
        }
        Report::Country(extremes) => {
            writeln!(writer, "country: {}", extremes.entity)?;
            writeln!(
                writer,
                "farthest: {} ({:.2})",
                extremes.farthest.name, extremes.farthest.distance
            )?;
            writeln!(
                writer,
                "nearest: {} ({:.2})",
                extremes.nearest.name, extremes.nearest.distance
            )?;
        }
        Report::Dimensions { dimensions, rows } => {
            render_dimension_table(dimensions, rows, &mut writer)?;
        }
        Report::Exported { path, entities } => {
            writeln!(
                writer,
                "wrote {entities}-country matrix to {}",
                path.display()
            )?;
        }
        Report::Cluster {
            clusters,
            medoids,
            focus,
        } => {
            for (index, members) in clusters.iter().enumerate() {
                writeln!(
                    writer,
                    "cluster {} (medoid: {}, {} members):",
                    index + 1,
                    medoids[index],
                    members.len()
                )?;
                writeln!(writer, "  {}", members.join(", "))?;
            }
            for (country, cluster) in focus {
                writeln!(writer, "{country} is in cluster {}", cluster + 1)?;
            }
        }
        Report::Layout { points } => {
            for point in points {
                writeln!(writer, "{}\t{:.4}\t{:.4}", point.name, point.x, point.y)?;
            }
        }
        Report::Spread {
            scope,
            stats,
            samples,
        } => {
            writeln!(writer, "spread of {scope} ({samples} samples)")?;
            writeln!(writer, "min: {:.2}", stats.min)?;
            writeln!(writer, "lower quartile: {:.2}", stats.lower_quartile)?;
            writeln!(writer, "median: {:.2}", stats.median)?;
            writeln!(writer, "upper quartile: {:.2}", stats.upper_quartile)?;
            writeln!(writer, "max: {:.2}", stats.max)?;
            writeln!(writer, "mean: {:.2}", stats.mean)?;
        }
    }
    Ok(())
}

fn render_dimension_table(
    dimensions: &[String],
    rows: &[DimensionRow],
    writer: &mut impl Write,
) -> io::Result<()> {
    let name_width = rows
        .iter()
        .map(|row| row.country.len())
        .chain(std::iter::once("country".len()))
        .max()
        .unwrap_or(0);
    let widths: Vec<usize> = dimensions
        .iter()
        .enumerate()
        .map(|(column, dimension)| {
            rows.iter()
                .map(|row| row.scores[column].to_string().len())
                .chain(std::iter::once(dimension.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    write!(writer, "{:<name_width$}", "country")?;
    for (dimension, &width) in dimensions.iter().zip(&widths) {
        write!(writer, "  {dimension:>width$}")?;
    }
    writeln!(writer)?;
    for row in rows {
        write!(writer, "{:<name_width$}", row.country)?;
        for (score, &width) in row.scores.iter().zip(&widths) {
            write!(writer, "  {:>width$}", score.to_string())?;
        }
        writeln!(writer)?;
    }
    Ok(())
}
