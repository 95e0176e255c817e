use log::debug;

use crate::config::*;

/// The aggregates of the selected year and, if requested, of the
/// comparison year.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct YearAggregates {
    pub current: AggregateResult,
    pub comparison: Option<AggregateResult>,
}

/// The records of a given year, in input order.
pub fn records_for_year(records: &[VoteRecord], year: Year) -> impl Iterator<Item = &VoteRecord> {
    records.iter().filter(move |r| r.year == year)
}

/// Sums the votes of all the records of a year.
///
/// The total is the sum of the totals of the records: it is not derived
/// from the party counts. A year without records gives an empty result.
pub fn aggregate(records: &[VoteRecord], year: Year) -> AggregateResult {
    let mut res = AggregateResult::default();
    let mut num_records = 0;
    for record in records_for_year(records, year) {
        for (party, count) in record.votes.iter() {
            *res.totals_by_party.entry(party.to_string()).or_insert(0) += count;
        }
        res.total_votes += record.total_votes;
        num_records += 1;
    }
    debug!(
        "aggregate: year {}: {} records, {} votes",
        year, num_records, res.total_votes
    );
    res
}

pub fn aggregate_with_comparison(records: &[VoteRecord], filters: &MapFilters) -> YearAggregates {
    YearAggregates {
        current: aggregate(records, filters.year),
        comparison: filters.comparison_year.map(|y| aggregate(records, y)),
    }
}
