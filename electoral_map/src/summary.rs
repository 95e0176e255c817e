//! The statistics panel and the neighborhood table.

use log::debug;

use crate::aggregate::{aggregate_with_comparison, records_for_year};
use crate::config::*;
use crate::trend::*;
use crate::winner::share;

/// The results of one party over all the neighborhoods.
#[derive(PartialEq, Debug, Clone)]
pub struct PartyStatistics {
    pub party: PartyId,
    pub name: String,
    pub color: String,
    pub votes: u64,
    pub share: f64,
    /// Only present with a comparison year.
    pub comparison_share: Option<f64>,
    pub trend: Option<Trend>,
}

#[derive(PartialEq, Debug, Clone)]
pub struct Statistics {
    pub year: Year,
    pub total_votes: u64,
    pub comparison_year: Option<Year>,
    pub comparison_total_votes: Option<u64>,
    pub total_trend: Option<Trend>,
    /// In the order of the party table.
    pub parties: Vec<PartyStatistics>,
}

/// The results of one party in one neighborhood.
#[derive(PartialEq, Debug, Clone)]
pub struct PartyCell {
    pub party: PartyId,
    pub votes: u64,
    pub share: f64,
    /// Only present if the neighborhood has a record in the comparison year.
    pub trend: Option<Trend>,
}

/// A polling location of a neighborhood.
#[derive(PartialEq, Debug, Clone)]
pub struct LocationRow {
    pub id: String,
    pub name: String,
    pub address: String,
    pub total_votes: u64,
    /// Share of the total of the neighborhood, 0 if the neighborhood has no votes.
    pub share: f64,
}

#[derive(PartialEq, Debug, Clone)]
pub struct NeighborhoodRow {
    pub neighborhood: String,
    pub total_votes: u64,
    pub total_trend: Option<Trend>,
    pub cells: Vec<PartyCell>,
    /// In the order of the record.
    pub locations: Vec<LocationRow>,
}

pub fn statistics(records: &[VoteRecord], parties: &PartyTable, filters: &MapFilters) -> Statistics {
    let aggs = aggregate_with_comparison(records, filters);
    let current = &aggs.current;
    let party_stats: Vec<PartyStatistics> = parties
        .iter()
        .map(|p| PartyStatistics {
            party: p.id.clone(),
            name: p.name.clone(),
            color: p.color.clone(),
            votes: current.votes_for(&p.id),
            share: share(current.votes_for(&p.id), current.total_votes),
            comparison_share: aggs
                .comparison
                .as_ref()
                .map(|c| share(c.votes_for(&p.id), c.total_votes)),
            trend: aggs
                .comparison
                .as_ref()
                .map(|c| aggregate_share_trend(current, c, &p.id)),
        })
        .collect();
    Statistics {
        year: filters.year,
        total_votes: current.total_votes,
        comparison_year: filters.comparison_year,
        comparison_total_votes: aggs.comparison.as_ref().map(|c| c.total_votes),
        total_trend: aggs
            .comparison
            .as_ref()
            .map(|c| total_trend(current.total_votes, c.total_votes)),
        parties: party_stats,
    }
}

/// The breakdown of a neighborhood by polling location.
pub fn location_rows(record: &VoteRecord) -> Vec<LocationRow> {
    record
        .locations
        .iter()
        .map(|loc| LocationRow {
            id: loc.id.clone(),
            name: loc.name.clone(),
            address: loc.address.clone(),
            total_votes: loc.total_votes,
            share: share(loc.total_votes, record.total_votes),
        })
        .collect()
}

/// One row per record of the selected year, sorted by neighborhood name.
///
/// With a focus party, the rows only have the cell of that party. Otherwise
/// they have a cell for every party of the table.
pub fn neighborhood_table(
    records: &[VoteRecord],
    parties: &PartyTable,
    filters: &MapFilters,
) -> Vec<NeighborhoodRow> {
    let columns: Vec<&str> = match filters.party.as_deref() {
        Some(p) => vec![p],
        None => parties.iter().map(|p| p.id.as_str()).collect(),
    };

    let mut current: Vec<&VoteRecord> = records_for_year(records, filters.year).collect();
    current.sort_by(|a, b| a.neighborhood.cmp(&b.neighborhood));

    let mut res: Vec<NeighborhoodRow> = Vec::new();
    for record in current {
        let previous: Option<&VoteRecord> = filters.comparison_year.and_then(|y| {
            records_for_year(records, y).find(|r| r.neighborhood == record.neighborhood)
        });
        debug!(
            "neighborhood_table: {:?}: comparison record {:?}",
            record.neighborhood,
            previous.map(|r| &r.id)
        );
        let cells: Vec<PartyCell> = columns
            .iter()
            .map(|party| PartyCell {
                party: party.to_string(),
                votes: record.votes.votes_for(party),
                share: share(record.votes.votes_for(party), record.total_votes),
                trend: previous.map(|prev| record_share_trend(record, Some(prev), party)),
            })
            .collect();
        res.push(NeighborhoodRow {
            neighborhood: record.neighborhood.clone(),
            total_votes: record.total_votes,
            total_trend: previous.map(|prev| total_trend(record.total_votes, prev.total_votes)),
            cells,
            locations: location_rows(record),
        });
    }
    res
}
