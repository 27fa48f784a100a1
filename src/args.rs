use clap::Parser;

/// Aggregates polling-station results and exports them to CSV.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON file describing the source of the points and the outputs.
    /// All the other options override the values of this file.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path) The JSON file containing the polling stations.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (file path or 'stdout') Where to write the CSV table. Defaults to stdout.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (points, address or city, default points) How the points are merged before export.
    #[clap(short, long, value_parser)]
    pub group_by: Option<String>,

    /// (file path or 'stdout') If specified, a summary of the results is written in JSON format
    /// to the given location.
    #[clap(short, long, value_parser)]
    pub summary: Option<String>,

    /// (file path) A reference summary in JSON format. If provided, electmap will check that
    /// the computed summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
