use log::{debug, info, warn};

use snafu::{prelude::*, Snafu};
use vote_aggregation::*;

use std::fs;

use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;

mod config_reader;
mod io_common;
mod io_csv;
mod io_json;
mod tables;

use crate::report::config_reader::*;

#[derive(Debug, Snafu)]
pub enum ReportError {
    #[snafu(display("Error opening file {path}"))]
    OpeningFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Expected an array of points or an object with a points array"))]
    UnexpectedFeedLayout {},
    #[snafu(display("Malformed point at index {index}: {message}"))]
    MalformedPoint { index: usize, message: String },
    #[snafu(display("Unknown grouping mode {mode:?}: expected points, address or city"))]
    UnknownGrouping { mode: String },
    #[snafu(display("Unknown output field {field:?}"))]
    UnknownField { field: String },
    #[snafu(display("No input file: use --input or the filePath of the config source"))]
    MissingInput {},
    #[snafu(display("Error writing CSV to {path}"))]
    WritingCsv { source: csv::Error, path: String },
    #[snafu(display("Error writing summary to {path}"))]
    WritingSummary {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Difference detected between calculated summary and reference summary"))]
    SummaryMismatch {},
}

pub type ReportResult<T> = Result<T, ReportError>;

pub type BReportResult<T> = Result<T, Box<ReportError>>;

/// How the points are merged before being written out.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum GroupingMode {
    /// One row per polling station.
    Points,
    Address,
    City,
}

impl GroupingMode {
    pub fn parse(mode: &str) -> ReportResult<GroupingMode> {
        match mode {
            "points" => Ok(GroupingMode::Points),
            "address" => Ok(GroupingMode::Address),
            "city" => Ok(GroupingMode::City),
            x => UnknownGroupingSnafu { mode: x }.fail(),
        }
    }
}

fn build_summary_js(points: &[Point], groups: usize) -> JSValue {
    let totals = compute_vote_totals(points);
    let winner = winner_of(&totals);

    let mut js_totals: JSMap<String, JSValue> = JSMap::new();
    for kind in BallotKind::ALL {
        let mut tally: JSMap<String, JSValue> = JSMap::new();
        for (party, count) in totals.ballot(kind).iter() {
            tally.insert(party.key().to_string(), json!(count));
        }
        js_totals.insert(kind.key().to_string(), JSValue::Object(tally));
    }

    json!({
        "stations": points.len(),
        "reportedStations": count_reported_stations(points),
        "winner": winner.key(),
        "winnerColor": winner_color_of(winner),
        "groups": groups,
        "totals": js_totals,
    })
}

fn write_summary(pretty_js: &str, dest: &str) -> BReportResult<()> {
    if dest == "stdout" {
        println!("{}", pretty_js);
    } else {
        fs::write(dest, pretty_js).context(WritingSummarySnafu { path: dest })?;
        info!("Summary written to {:?}", dest);
    }
    Ok(())
}

fn check_reference(pretty_js_stats: &str, reference_path: &str) -> BReportResult<()> {
    let summary_ref = read_summary(reference_path)?;
    debug!("check_reference: reference summary: {:?}", summary_ref);
    let pretty_js_summary_ref =
        serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
    if pretty_js_summary_ref != pretty_js_stats {
        warn!("Found differences with the reference summary");
        print_diff(pretty_js_summary_ref.as_str(), pretty_js_stats, "\n");
        return Err(Box::new(ReportError::SummaryMismatch {}));
    }
    info!("Summary matches the reference {:?}", reference_path);
    Ok(())
}

pub fn run_report(args: &Args) -> BReportResult<()> {
    let settings = ReportSettings::resolve(args)?;
    info!("settings: {:?}", settings);

    let points = io_json::read_points(&settings.input)?;

    let (rows, default_fields) = match settings.group_by {
        GroupingMode::Points => (tables::point_rows(&points), tables::point_fields()),
        GroupingMode::Address => (
            tables::grouped_rows(&group_by_address(&points)),
            tables::grouped_fields(),
        ),
        GroupingMode::City => (
            tables::grouped_rows(&group_by_city(&points)),
            tables::grouped_fields(),
        ),
    };
    let fields = tables::select_fields(default_fields, settings.fields.as_deref())?;
    debug!("run_report: fields: {:?}", fields);

    io_csv::write_to_csv(&rows, &fields, &settings.output)?;

    let summary_js = build_summary_js(&points, rows.len());
    let pretty_js_stats = serde_json::to_string_pretty(&summary_js).context(ParsingJsonSnafu {})?;

    if let Some(dest) = &settings.summary {
        write_summary(&pretty_js_stats, dest)?;
    }

    // The reference summary, if provided for comparison
    if let Some(reference) = &settings.reference {
        check_reference(&pretty_js_stats, reference)?;
    }

    Ok(())
}
