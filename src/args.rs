use clap::Parser;

/// This is a dashboard of electoral results by neighborhood.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) The file describing the dashboard: vote sources, geometries, parties and filters.
    /// For more information about the file format, read the manual of the electoral_map crate.
    #[clap(short, long, value_parser)]
    pub config: String,

    /// (file path) A reference file containing the expected summary in JSON format. If provided, elmap will
    /// check that the computed summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary will be written in JSON format to the given
    /// location. Setting this option overrides the path that may be specified in the configuration.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (year) The election year to display. Overrides the year of the configuration.
    #[clap(short, long, value_parser)]
    pub year: Option<i32>,

    /// (party id or empty) The party to highlight on the map. An empty value shows the winning
    /// parties. Overrides the party of the configuration.
    #[clap(short, long, value_parser)]
    pub party: Option<String>,

    /// (year) The election year to compare against. Overrides the comparison year of the configuration.
    #[clap(long, value_parser)]
    pub comparison_year: Option<i32>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
