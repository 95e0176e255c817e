use log::{debug, info};
use std::collections::HashMap;

use crate::aggregate::records_for_year;
use crate::config::*;
use crate::winner::{resolve_winner, winning_share};

/// Joins the geometries with the records of a year.
///
/// A geometry matches the record whose neighborhood is exactly its name
/// (no case or whitespace normalization). If several records of the year
/// share a name, the first one is used. Geometries without a match are
/// kept, without votes. The output follows the order of the geometries.
pub fn enrich(
    geometries: &[NeighborhoodGeometry],
    records: &[VoteRecord],
    year: Year,
) -> Vec<EnrichedFeature> {
    let mut by_name: HashMap<&str, &VoteRecord> = HashMap::new();
    for r in records_for_year(records, year) {
        by_name.entry(r.neighborhood.as_str()).or_insert(r);
    }

    let res: Vec<EnrichedFeature> = geometries
        .iter()
        .map(|g| EnrichedFeature {
            geometry: g.clone(),
            votes: by_name.get(g.name.as_str()).map(|r| feature_votes(r)),
        })
        .collect();

    let num_matched = res.iter().filter(|f| f.votes.is_some()).count();
    info!(
        "enrich: year {}: {} of {} geometries matched a record",
        year,
        num_matched,
        res.len()
    );
    for f in res.iter().filter(|f| f.votes.is_none()) {
        debug!("enrich: no record for {:?} in {}", f.geometry.name, year);
    }
    res
}

fn feature_votes(record: &VoteRecord) -> FeatureVotes {
    let winner = resolve_winner(&record.votes);
    FeatureVotes {
        votes: record.votes.clone(),
        total_votes: record.total_votes,
        winning_share: winning_share(&winner, record.total_votes),
        winning_party: winner.winning_party,
    }
}
