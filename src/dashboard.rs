use log::{debug, info, warn};

use electoral_map::builder::Builder;
use electoral_map::format::{format_number, format_percentage, format_share};
use electoral_map::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::dashboard::config_reader::*;

mod config_reader;
mod io_geojson;
mod io_json;
mod io_xlsx;

#[derive(Debug, Snafu)]
pub enum DashboardError {
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("Missing worksheet in {path}"))]
    EmptyExcel { path: String },
    #[snafu(display("Could not understand cell in line {lineno}: {content}"))]
    ExcelWrongCellType { lineno: u64, content: String },
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON file {path}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error writing the summary"))]
    WritingSummary { source: std::io::Error },
    #[snafu(display("Expected a non-negative integer, got {content}"))]
    ParsingJsonNumber { content: String },
    #[snafu(display("Invalid geometry for feature {name}: {reason}"))]
    InvalidGeometry { name: String, reason: String },
    #[snafu(display("Invalid vote data in {path}"))]
    InvalidRecord {
        source: ValidationError,
        path: String,
    },
    #[snafu(display("No election year selected"))]
    MissingYear {},
    #[snafu(display("The configuration file has no parent directory"))]
    MissingParentDir {},

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type DashboardResult<T> = Result<T, DashboardError>;

/// Filters passed on the command line. They take precedence over the filters
/// of the configuration.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct FilterOverrides {
    pub year: Option<Year>,
    pub party: Option<String>,
    pub comparison_year: Option<Year>,
}

fn trend_to_json(trend: &Option<Trend>) -> JSValue {
    match trend {
        Some(t) => json!({"direction": t.direction.to_string(), "change": t.to_string()}),
        None => JSValue::Null,
    }
}

fn statistics_to_json(stats: &Statistics) -> JSValue {
    let mut parties: Vec<JSValue> = Vec::new();
    for ps in stats.parties.iter() {
        parties.push(json!({
            "party": ps.party,
            "name": ps.name,
            "color": ps.color,
            "votes": format_number(ps.votes),
            "share": format_share(ps.share),
            "comparisonShare": ps.comparison_share.map(format_share),
            "trend": trend_to_json(&ps.trend),
        }));
    }
    json!({
        "totalVotes": format_number(stats.total_votes),
        "comparisonTotalVotes": stats.comparison_total_votes.map(format_number),
        "totalTrend": trend_to_json(&stats.total_trend),
        "parties": parties,
    })
}

fn table_to_json(rows: &[NeighborhoodRow]) -> Vec<JSValue> {
    let mut l: Vec<JSValue> = Vec::new();
    for row in rows.iter() {
        let cells: Vec<JSValue> = row
            .cells
            .iter()
            .map(|c| {
                json!({
                    "party": c.party,
                    "votes": format_number(c.votes),
                    "share": format_share(c.share),
                    "trend": trend_to_json(&c.trend),
                })
            })
            .collect();
        let locations: Vec<JSValue> = row
            .locations
            .iter()
            .map(|loc| {
                json!({
                    "id": loc.id,
                    "name": loc.name,
                    "address": loc.address,
                    "totalVotes": format_number(loc.total_votes),
                    "share": format_percentage(loc.total_votes, row.total_votes),
                })
            })
            .collect();
        l.push(json!({
            "neighborhood": row.neighborhood,
            "totalVotes": format_number(row.total_votes),
            "totalTrend": trend_to_json(&row.total_trend),
            "parties": cells,
            "locations": locations,
        }));
    }
    l
}

fn features_to_json(features: &[StyledFeature]) -> Vec<JSValue> {
    let mut l: Vec<JSValue> = Vec::new();
    for sf in features.iter() {
        let mut props: JSMap<String, JSValue> = JSMap::new();
        props.insert("id".to_string(), json!(sf.feature.geometry.id));
        props.insert("name".to_string(), json!(sf.feature.geometry.name));
        // Neighborhoods without a record carry no vote properties at all.
        if let Some(fv) = &sf.feature.votes {
            let mut votes: JSMap<String, JSValue> = JSMap::new();
            for (party, count) in fv.votes.iter() {
                votes.insert(party.to_string(), json!(count));
            }
            props.insert("votes".to_string(), JSValue::Object(votes));
            props.insert("totalVotes".to_string(), json!(fv.total_votes));
            props.insert("winningParty".to_string(), json!(fv.winning_party));
            props.insert("winningShare".to_string(), json!(fv.winning_share));
        }
        let style = &sf.style;
        props.insert(
            "style".to_string(),
            json!({
                "fillColor": style.fill_color,
                "fillOpacity": style.fill_opacity,
                "color": style.stroke_color,
                "weight": style.stroke_weight,
                "opacity": style.stroke_opacity,
            }),
        );
        l.push(JSValue::Object(props));
    }
    l
}

fn bounds_to_json(bounds: &Option<BoundingBox>) -> JSValue {
    match bounds {
        Some(bb) => {
            let (cx, cy) = bb.center();
            json!({
                "minX": bb.min_x,
                "minY": bb.min_y,
                "maxX": bb.max_x,
                "maxY": bb.max_y,
                "center": [cx, cy],
            })
        }
        None => JSValue::Null,
    }
}

fn build_summary_js(config: &DashboardConfig, view: &DashboardView) -> JSValue {
    let c = OutputConfig {
        title: config.output_settings.title.clone(),
        year: view.filters.year,
        party: view.filters.party.clone(),
        comparison_year: view.filters.comparison_year,
    };
    json!({
        "config": c,
        "statistics": statistics_to_json(&view.statistics),
        "neighborhoods": table_to_json(&view.table),
        "features": features_to_json(&view.features),
        "bounds": bounds_to_json(&view.bounds),
    })
}

fn read_vote_data(root_path: &Path, source: &VoteSource, builder: &mut Builder) -> DashboardResult<()> {
    let p: PathBuf = root_path.join(&source.file_path);
    let p2 = p.as_path().display().to_string();
    info!("Attempting to read vote file {:?}", p2);
    match source.provider.as_str() {
        "json" => io_json::read_json_records(&p2, builder),
        "xlsx" => io_xlsx::read_xlsx_records(&p2, source, builder),
        x => {
            whatever!("Provider not implemented {:?}", x)
        }
    }
}

fn write_summary(out: &str, contents: &str) -> DashboardResult<()> {
    if out == "stdout" {
        println!("{}", contents);
    } else {
        info!("Writing summary to {:?}", out);
        fs::write(out, contents).context(WritingSummarySnafu {})?;
    }
    Ok(())
}

pub fn run_dashboard(
    config_path: String,
    overrides: &FilterOverrides,
    out: Option<String>,
    check_summary_path: Option<String>,
) -> DashboardResult<()> {
    let config_p = Path::new(config_path.as_str());
    let config = read_config(&config_path)?;
    info!("config: {:?}", config);

    let filters = validate_filters(config.filters.as_ref(), overrides)?;
    let parties = validate_parties(&config.parties);

    if config.vote_sources.is_empty() {
        warn!("No vote sources: all the neighborhoods will be displayed without data");
    }

    let root_p = config_p.parent().context(MissingParentDirSnafu {})?;
    let mut builder = Builder::new(&parties);
    for source in config.vote_sources.iter() {
        read_vote_data(root_p, source, &mut builder)?;
    }
    let records = builder.build();
    debug!("records: {:?}", records);

    if let Err(e) = validate_records(&records, &parties) {
        warn!("Suspicious vote data: {}", e);
    }

    let geometries: Vec<NeighborhoodGeometry> = match &config.geometry_source {
        Some(gs) => {
            let p = root_p.join(&gs.file_path).display().to_string();
            io_geojson::read_geojson(&p)?
        }
        None => {
            warn!("No geometry source: the map will be empty");
            Vec::new()
        }
    };

    let view = render_dashboard(&geometries, &records, &parties, &filters);

    // Assemble the final json
    let result_js = build_summary_js(&config, &view);
    let pretty_js_stats = serde_json::to_string_pretty(&result_js).context(ParsingJsonSnafu {
        path: config_path.clone(),
    })?;

    let out_path: String = match (out, &config.output_settings.output_path) {
        (Some(o), _) if !o.is_empty() => o,
        (_, Some(o)) if !o.is_empty() => root_p.join(o).display().to_string(),
        _ => "stdout".to_string(),
    };
    write_summary(&out_path, &pretty_js_stats)?;

    // The reference summary, if provided for comparison
    if let Some(summary_p) = check_summary_path {
        let summary_ref = read_summary(&summary_p)?;
        debug!("summary: {:?}", summary_ref);
        if summary_ref != result_js {
            let pretty_js_summary_ref =
                serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {
                    path: summary_p.clone(),
                })?;
            warn!("Found differences with the reference summary");
            print_diff(
                pretty_js_summary_ref.as_str(),
                pretty_js_stats.as_ref(),
                "\n",
            );
            whatever!("Difference detected between calculated summary and reference summary")
        }
    }

    Ok(())
}

#[cfg(test)]
fn run_dashboard_test(
    test_name: &str,
    config_lpath: &str,
    summary_lpath: &str,
    overrides: &FilterOverrides,
) -> DashboardResult<()> {
    let test_dir = format!("{}/tests/data", env!("CARGO_MANIFEST_DIR"));
    info!("Running test {}", test_name);
    run_dashboard(
        format!("{}/{}/{}", test_dir, test_name, config_lpath),
        overrides,
        Some("stdout".to_string()),
        Some(format!("{}/{}/{}", test_dir, test_name, summary_lpath)),
    )
}

#[cfg(test)]
pub fn test_wrapper(test_name: &str) {
    let res = run_dashboard_test(
        test_name,
        format!("{}_config.json", test_name).as_str(),
        format!("{}_expected_summary.json", test_name).as_str(),
        &FilterOverrides::default(),
    );
    if let Err(e) = res {
        panic!("test {} failed: {}", test_name, e);
    }
}
