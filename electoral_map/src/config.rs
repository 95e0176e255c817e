// ********* Input data structures ***********

use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::Display;

/// The identifier of a political party. It is stable across election years.
pub type PartyId = String;

/// An election year.
pub type Year = i32;

/// A coordinate pair, in the (x, y) order of the geometry source
/// (longitude, latitude for GeoJSON).
pub type Coordinate = (f64, f64);

/// The votes received by each party, in insertion order.
///
/// Keys are unique: inserting an existing party replaces its count but keeps
/// its position. The iteration order is the order in which the tally was
/// written by the data provider, and it is the order used to break ties
/// when resolving the winner.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct PartyVotes(Vec<(PartyId, u64)>);

impl PartyVotes {
    pub fn new() -> PartyVotes {
        PartyVotes(Vec::new())
    }

    /// Sets the count for a party and returns the previous count, if any.
    pub fn insert(&mut self, party: &str, votes: u64) -> Option<u64> {
        if let Some(entry) = self.0.iter_mut().find(|(p, _)| p == party) {
            let previous = entry.1;
            entry.1 = votes;
            Some(previous)
        } else {
            self.0.push((party.to_string(), votes));
            None
        }
    }

    /// The count for a party. Parties absent from the tally have 0 votes.
    pub fn votes_for(&self, party: &str) -> u64 {
        self.get(party).unwrap_or(0)
    }

    pub fn get(&self, party: &str) -> Option<u64> {
        self.0.iter().find(|(p, _)| p == party).map(|(_, v)| *v)
    }

    pub fn contains(&self, party: &str) -> bool {
        self.0.iter().any(|(p, _)| p == party)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.0.iter().map(|(p, v)| (p.as_str(), *v))
    }

    pub fn parties(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.iter().map(|(p, _)| p.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The sum of the individual counts. This is not necessarily the total
    /// number of votes of a record, see [`VoteRecord::total_votes`].
    pub fn sum(&self) -> u64 {
        self.0.iter().map(|(_, v)| *v).sum()
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for PartyVotes {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        let mut res = PartyVotes::new();
        for (party, votes) in iter {
            let party: String = party.into();
            res.insert(&party, votes);
        }
        res
    }
}

/// A physical polling location inside a neighborhood.
///
/// The totals of the locations are not required to add up to the total of
/// the neighborhood.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct PollingLocation {
    pub id: String,
    pub name: String,
    pub address: String,
    pub votes: PartyVotes,
    pub total_votes: u64,
}

/// The results of one neighborhood for one election year.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct VoteRecord {
    pub id: String,
    /// Display name, also used to join against the geometries.
    pub neighborhood: String,
    pub votes: PartyVotes,
    /// The total number of votes cast, as supplied by the data provider.
    /// It may include votes for parties that are not tracked individually,
    /// and it is never recomputed from `votes`.
    pub total_votes: u64,
    pub year: Year,
    pub locations: Vec<PollingLocation>,
}

/// The boundary of a neighborhood, as supplied by the geometry provider.
#[derive(PartialEq, Debug, Clone)]
pub struct NeighborhoodGeometry {
    pub id: String,
    pub name: String,
    /// All the rings of the polygon(s). Multi-polygons are flattened.
    pub rings: Vec<Vec<Coordinate>>,
}

// ******** Output data structures *********

/// The vote-derived properties of a feature that matched a record.
#[derive(PartialEq, Debug, Clone)]
pub struct FeatureVotes {
    pub votes: PartyVotes,
    pub total_votes: u64,
    /// Empty if no party received any vote.
    pub winning_party: PartyId,
    /// In [0, 1]. Defined as 0 when there are no votes.
    pub winning_share: f64,
}

/// A geometry joined with the votes of its neighborhood for a given year.
///
/// Features are built fresh for every change of the filters and are never
/// updated in place.
#[derive(PartialEq, Debug, Clone)]
pub struct EnrichedFeature {
    pub geometry: NeighborhoodGeometry,
    /// None when no record of the year matches the name of the geometry.
    pub votes: Option<FeatureVotes>,
}

/// The resting visual encoding of a neighborhood polygon.
#[derive(PartialEq, Debug, Clone)]
pub struct VisualStyle {
    pub fill_color: String,
    pub fill_opacity: f64,
    pub stroke_color: String,
    pub stroke_weight: u32,
    pub stroke_opacity: f64,
}

/// The totals over all the neighborhoods of one year.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct AggregateResult {
    pub totals_by_party: BTreeMap<PartyId, u64>,
    /// The sum of the totals of the records, not of `totals_by_party`.
    pub total_votes: u64,
}

impl AggregateResult {
    pub fn votes_for(&self, party: &str) -> u64 {
        self.totals_by_party.get(party).cloned().unwrap_or(0)
    }
}

/// Errors reported by the optional validation of the inputs.
///
/// The core functions do not require valid inputs: they are total over
/// their domain, and these checks are only offered to the callers that want
/// to reject or report suspicious data.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum ValidationError {
    /// Two records for the same neighborhood and year.
    DuplicateRecord { neighborhood: String, year: Year },
    /// A party that is not part of the party table.
    UnknownParty(PartyId),
    /// The same party listed twice in one tally.
    DuplicateParty(PartyId),
    /// No record to attach a polling location to.
    MissingRecord { neighborhood: String, year: Year },
}

impl Error for ValidationError {}

impl Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::DuplicateRecord { neighborhood, year } => {
                write!(f, "duplicate record for {} in {}", neighborhood, year)
            }
            ValidationError::UnknownParty(p) => write!(f, "unknown party {:?}", p),
            ValidationError::DuplicateParty(p) => write!(f, "party {:?} listed twice", p),
            ValidationError::MissingRecord { neighborhood, year } => {
                write!(f, "no record for {} in {}", neighborhood, year)
            }
        }
    }
}

// ********* Configuration **********

/// Fill color for neighborhoods without data and for unknown parties.
pub const NEUTRAL_COLOR: &str = "#CCCCCC";
/// Resting stroke color of every polygon.
pub const STROKE_COLOR: &str = "#666";
pub const STROKE_WEIGHT: u32 = 1;
pub const STROKE_OPACITY: f64 = 1.0;
/// Fill opacity when coloring by winning party.
pub const DEFAULT_FILL_OPACITY: f64 = 0.7;
/// Fill opacity of the neighborhoods without data.
pub const NO_DATA_FILL_OPACITY: f64 = 0.4;

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Party {
    pub id: PartyId,
    pub name: String,
    pub color: String,
}

/// The parties of a dataset, in display order.
///
/// This is read-only reference data: it is passed explicitly to the
/// functions that need colors or the list of parties.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct PartyTable {
    parties: Vec<Party>,
}

impl PartyTable {
    /// Builds the table. If an id appears more than once, the first
    /// occurrence is kept.
    pub fn new(parties: &[Party]) -> PartyTable {
        let mut res: Vec<Party> = Vec::new();
        for p in parties {
            if !res.iter().any(|q| q.id == p.id) {
                res.push(p.clone());
            }
        }
        PartyTable { parties: res }
    }

    pub fn get(&self, party: &str) -> Option<&Party> {
        self.parties.iter().find(|p| p.id == party)
    }

    pub fn contains(&self, party: &str) -> bool {
        self.get(party).is_some()
    }

    /// The configured color of a party, or the neutral color.
    pub fn color_for(&self, party: &str) -> &str {
        self.get(party).map(|p| p.color.as_str()).unwrap_or(NEUTRAL_COLOR)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Party> + '_ {
        self.parties.iter()
    }

    pub fn len(&self) -> usize {
        self.parties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parties.is_empty()
    }
}

/// The selection made by the user. Every view is a function of it.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct MapFilters {
    pub year: Year,
    /// The focus party, if any.
    pub party: Option<PartyId>,
    pub comparison_year: Option<Year>,
}

impl MapFilters {
    pub fn for_year(year: Year) -> MapFilters {
        MapFilters {
            year,
            party: None,
            comparison_year: None,
        }
    }
}
