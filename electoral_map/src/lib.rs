mod config;
use log::{debug, info};

pub mod aggregate;
pub mod bounds;
pub mod builder;
pub mod enrich;
pub mod format;
pub mod manual;
pub mod style;
pub mod summary;
pub mod trend;
pub mod winner;

pub use crate::aggregate::{aggregate, aggregate_with_comparison, YearAggregates};
pub use crate::bounds::{bounding_box, BoundingBox};
pub use crate::builder::validate_records;
pub use crate::config::*;
pub use crate::enrich::enrich;
pub use crate::style::style_for;
pub use crate::summary::{LocationRow, NeighborhoodRow, PartyCell, PartyStatistics, Statistics};
pub use crate::trend::{share_trend, total_trend, Trend, TrendDirection, TrendUnit};
pub use crate::winner::{resolve_winner, share, WinnerResult};

/// A feature with its resting style.
#[derive(PartialEq, Debug, Clone)]
pub struct StyledFeature {
    pub feature: EnrichedFeature,
    pub style: VisualStyle,
}

/// Everything the views need for one selection.
#[derive(PartialEq, Debug, Clone)]
pub struct DashboardView {
    pub filters: MapFilters,
    pub features: Vec<StyledFeature>,
    pub statistics: Statistics,
    pub table: Vec<NeighborhoodRow>,
    pub bounds: Option<BoundingBox>,
}

/// Computes all the views for the given selection.
///
/// Nothing is cached or updated in place: the same inputs always produce
/// the same view, and a change of the filters means a new call.
///
/// Arguments:
/// * `geometries` the neighborhoods of the map
/// * `records` the votes of all the neighborhoods, for all the years
/// * `parties` the parties of the dataset, in display order
/// * `filters` the selected year, focus party and comparison year
pub fn render_dashboard(
    geometries: &[NeighborhoodGeometry],
    records: &[VoteRecord],
    parties: &PartyTable,
    filters: &MapFilters,
) -> DashboardView {
    info!(
        "Processing {:?} geometries, {:?} records, {:?} parties, filters: {:?}",
        geometries.len(),
        records.len(),
        parties.len(),
        filters
    );

    let features: Vec<StyledFeature> = enrich(geometries, records, filters.year)
        .into_iter()
        .map(|feature| {
            let style = style_for(&feature, filters.party.as_deref(), parties);
            debug!(
                "render_dashboard: {:?}: fill {} opacity {}",
                feature.geometry.name, style.fill_color, style.fill_opacity
            );
            StyledFeature { feature, style }
        })
        .collect();

    let statistics = summary::statistics(records, parties, filters);
    info!(
        "Year {}: {} votes (comparison: {:?})",
        statistics.year, statistics.total_votes, statistics.comparison_total_votes
    );
    for ps in statistics.parties.iter() {
        info!(
            "{:>12} {:>8} {}",
            ps.party,
            ps.votes,
            format::format_share(ps.share)
        );
    }

    DashboardView {
        filters: filters.clone(),
        features,
        statistics,
        table: summary::neighborhood_table(records, parties, filters),
        bounds: bounding_box(geometries),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn geometry(name: &str, x: f64) -> NeighborhoodGeometry {
        NeighborhoodGeometry {
            id: name.to_lowercase(),
            name: name.to_string(),
            rings: vec![vec![(x, 0.0), (x + 1.0, 0.0), (x + 1.0, 1.0), (x, 0.0)]],
        }
    }

    fn parties() -> PartyTable {
        PartyTable::new(&[
            Party {
                id: "a".to_string(),
                name: "Party A".to_string(),
                color: "#E63946".to_string(),
            },
            Party {
                id: "b".to_string(),
                name: "Party B".to_string(),
                color: "#1D3557".to_string(),
            },
        ])
    }

    fn records() -> Vec<VoteRecord> {
        let mut builder = builder::Builder::new(&parties());
        builder
            .add_record(
                None,
                "X",
                2023,
                &[("a".to_string(), 600), ("b".to_string(), 400)],
                Some(1000),
            )
            .unwrap();
        builder
            .add_record(
                None,
                "X",
                2018,
                &[("a".to_string(), 500), ("b".to_string(), 500)],
                Some(1000),
            )
            .unwrap();
        builder.build()
    }

    #[test]
    fn winner_view() {
        init();
        let geometries = vec![geometry("X", 0.0), geometry("Y", 1.0)];
        let view = render_dashboard(&geometries, &records(), &parties(), &MapFilters::for_year(2023));
        assert_eq!(view.features.len(), 2);
        let x = &view.features[0];
        assert_eq!(x.feature.votes.as_ref().unwrap().winning_party, "a");
        assert_eq!(x.feature.votes.as_ref().unwrap().winning_share, 0.6);
        assert_eq!(x.style.fill_color, "#E63946");
        assert_eq!(x.style.fill_opacity, 0.7);
        let y = &view.features[1];
        assert_eq!(y.feature.votes, None);
        assert_eq!(y.style, VisualStyle::no_data());
        assert_eq!(view.statistics.total_votes, 1000);
        assert_eq!(view.table.len(), 1);
        assert_eq!(view.bounds.unwrap().center(), (1.0, 0.5));
    }

    #[test]
    fn focus_view_is_recomputed() {
        init();
        let geometries = vec![geometry("X", 0.0)];
        let filters = MapFilters {
            year: 2023,
            party: Some("b".to_string()),
            comparison_year: Some(2018),
        };
        let view = render_dashboard(&geometries, &records(), &parties(), &filters);
        let x = &view.features[0];
        assert_eq!(x.style.fill_color, "#1D3557");
        assert_eq!(x.style.fill_opacity, 0.8);
        assert_eq!(view.table[0].cells.len(), 1);
        assert_eq!(
            view.statistics.parties[1].trend.unwrap().direction,
            TrendDirection::Down
        );

        // Same inputs, same output.
        let again = render_dashboard(&geometries, &records(), &parties(), &filters);
        assert_eq!(again, view);

        // Switching year does not keep anything from the previous view.
        let view_2018 = render_dashboard(&geometries, &records(), &parties(), &MapFilters::for_year(2018));
        assert_eq!(view_2018.features[0].style.fill_color, "#E63946");
        assert_eq!(
            view_2018.features[0].feature.votes.as_ref().unwrap().winning_share,
            0.5
        );
    }
}
