pub use crate::config::*;

use std::collections::HashSet;

/// A builder for assembling vote records.
///
/// The builder checks the tallies as they are added: a party may only
/// appear once per tally and, if the party table is not empty, it must be
/// part of it.
///
/// ```
/// pub use electoral_map::builder::Builder;
/// # use electoral_map::{Party, PartyTable, ValidationError};
///
/// let parties = PartyTable::new(&[Party {
///     id: "anr".to_string(),
///     name: "ANR".to_string(),
///     color: "#E63946".to_string(),
/// }]);
/// let mut builder = Builder::new(&parties);
///
/// builder.add_record_simple("Centro", 2023, &[("anr".to_string(), 600)])?;
/// let records = builder.build();
///
/// # Ok::<(), ValidationError>(())
/// ```
pub struct Builder {
    pub(crate) _parties: PartyTable,
    pub(crate) _records: Vec<VoteRecord>,
}

impl Builder {
    pub fn new(parties: &PartyTable) -> Builder {
        Builder {
            _parties: parties.clone(),
            _records: Vec::new(),
        }
    }

    /// Adds a record whose total is the sum of the tally.
    pub fn add_record_simple(
        &mut self,
        neighborhood: &str,
        year: Year,
        votes: &[(PartyId, u64)],
    ) -> Result<(), ValidationError> {
        self.add_record(None, neighborhood, year, votes, None)
    }

    /// Adds a record.
    ///
    /// id: generated from the year and the neighborhood if not provided.
    /// total_votes: the sum of the tally if not provided. When provided, it
    /// is kept as is, even if it differs from the sum.
    pub fn add_record(
        &mut self,
        id: Option<&str>,
        neighborhood: &str,
        year: Year,
        votes: &[(PartyId, u64)],
        total_votes: Option<u64>,
    ) -> Result<(), ValidationError> {
        let tally = self.checked_tally(votes)?;
        let record = VoteRecord {
            id: id
                .map(|s| s.to_string())
                .unwrap_or_else(|| format!("{}-{}", year, neighborhood)),
            neighborhood: neighborhood.to_string(),
            total_votes: total_votes.unwrap_or_else(|| tally.sum()),
            votes: tally,
            year,
            locations: Vec::new(),
        };
        self.add_record_2(&record)
    }

    /// Adds a record as is, after checking its tally.
    pub fn add_record_2(&mut self, record: &VoteRecord) -> Result<(), ValidationError> {
        for party in record.votes.parties() {
            self.check_party(party)?;
        }
        self._records.push(record.clone());
        Ok(())
    }

    /// Attaches a polling location to the record of a neighborhood and year.
    ///
    /// If several records share the neighborhood and the year, the location
    /// goes to the one added last.
    pub fn add_location(
        &mut self,
        neighborhood: &str,
        year: Year,
        location: &PollingLocation,
    ) -> Result<(), ValidationError> {
        for party in location.votes.parties() {
            self.check_party(party)?;
        }
        let record = self
            ._records
            .iter_mut()
            .rev()
            .find(|r| r.neighborhood == neighborhood && r.year == year)
            .ok_or_else(|| ValidationError::MissingRecord {
                neighborhood: neighborhood.to_string(),
                year,
            })?;
        record.locations.push(location.clone());
        Ok(())
    }

    pub fn build(self) -> Vec<VoteRecord> {
        self._records
    }

    fn checked_tally(&self, votes: &[(PartyId, u64)]) -> Result<PartyVotes, ValidationError> {
        let mut tally = PartyVotes::new();
        for (party, count) in votes {
            self.check_party(party)?;
            if tally.insert(party, *count).is_some() {
                return Err(ValidationError::DuplicateParty(party.clone()));
            }
        }
        Ok(tally)
    }

    fn check_party(&self, party: &str) -> Result<(), ValidationError> {
        if self._parties.is_empty() || self._parties.contains(party) {
            Ok(())
        } else {
            Err(ValidationError::UnknownParty(party.to_string()))
        }
    }
}

/// Checks a set of records against the party table.
///
/// Reports the first record that refers to a party missing from the table
/// or that duplicates the neighborhood and year of an earlier record.
pub fn validate_records(records: &[VoteRecord], parties: &PartyTable) -> Result<(), ValidationError> {
    let mut seen: HashSet<(&str, Year)> = HashSet::new();
    for r in records {
        if !seen.insert((r.neighborhood.as_str(), r.year)) {
            return Err(ValidationError::DuplicateRecord {
                neighborhood: r.neighborhood.clone(),
                year: r.year,
            });
        }
        let location_parties = r.locations.iter().flat_map(|l| l.votes.parties());
        for party in r.votes.parties().chain(location_parties) {
            if !parties.contains(party) {
                return Err(ValidationError::UnknownParty(party.to_string()));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parties() -> PartyTable {
        PartyTable::new(&[
            Party {
                id: "anr".to_string(),
                name: "ANR".to_string(),
                color: "#E63946".to_string(),
            },
            Party {
                id: "plra".to_string(),
                name: "PLRA".to_string(),
                color: "#1D3557".to_string(),
            },
        ])
    }

    fn votes(pairs: &[(&str, u64)]) -> Vec<(PartyId, u64)> {
        pairs.iter().map(|(p, v)| (p.to_string(), *v)).collect()
    }

    fn location(anr: u64) -> PollingLocation {
        PollingLocation {
            id: "loc-1".to_string(),
            name: "Colegio Nacional".to_string(),
            address: "Eligio Ayala 1234".to_string(),
            votes: [("anr", anr)].into_iter().collect(),
            total_votes: anr,
        }
    }

    #[test]
    fn builds_records() {
        let mut builder = Builder::new(&parties());
        builder
            .add_record_simple("Centro", 2023, &votes(&[("plra", 40), ("anr", 60)]))
            .unwrap();
        builder
            .add_record(Some("c-18"), "Centro", 2018, &votes(&[("anr", 10)]), Some(25))
            .unwrap();
        builder.add_location("Centro", 2023, &location(30)).unwrap();
        let records = builder.build();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "2023-Centro");
        assert_eq!(records[0].total_votes, 100);
        let order: Vec<&str> = records[0].votes.parties().collect();
        assert_eq!(order, vec!["plra", "anr"]);
        assert_eq!(records[0].locations.len(), 1);
        assert_eq!(records[1].id, "c-18");
        // Supplied totals are kept.
        assert_eq!(records[1].total_votes, 25);
        assert!(validate_records(&records, &parties()).is_ok());
    }

    #[test]
    fn locations_go_to_the_last_matching_record() {
        let mut builder = Builder::new(&parties());
        builder
            .add_record(Some("a"), "Centro", 2023, &votes(&[("anr", 10)]), None)
            .unwrap();
        builder
            .add_record(Some("b"), "Centro", 2023, &votes(&[("anr", 20)]), None)
            .unwrap();
        builder.add_location("Centro", 2023, &location(20)).unwrap();
        let records = builder.build();
        assert_eq!(records[0].id, "a");
        assert!(records[0].locations.is_empty());
        assert_eq!(records[1].id, "b");
        assert_eq!(records[1].locations.len(), 1);
    }

    #[test]
    fn rejects_bad_tallies() {
        let mut builder = Builder::new(&parties());
        assert_eq!(
            builder.add_record_simple("Centro", 2023, &votes(&[("anr", 1), ("anr", 2)])),
            Err(ValidationError::DuplicateParty("anr".to_string()))
        );
        assert_eq!(
            builder.add_record_simple("Centro", 2023, &votes(&[("otro", 1)])),
            Err(ValidationError::UnknownParty("otro".to_string()))
        );
        assert_eq!(
            builder.add_location("Centro", 2023, &location(3)),
            Err(ValidationError::MissingRecord {
                neighborhood: "Centro".to_string(),
                year: 2023
            })
        );
        assert!(builder.build().is_empty());
    }

    #[test]
    fn empty_party_table_accepts_any_party() {
        let mut builder = Builder::new(&PartyTable::default());
        builder
            .add_record_simple("Centro", 2023, &votes(&[("otro", 1)]))
            .unwrap();
        assert_eq!(builder.build().len(), 1);
    }

    #[test]
    fn validation() {
        let mut builder = Builder::new(&PartyTable::default());
        builder
            .add_record_simple("Centro", 2023, &votes(&[("anr", 1)]))
            .unwrap();
        builder
            .add_record_simple("Centro", 2023, &votes(&[("anr", 2)]))
            .unwrap();
        let records = builder.build();
        assert_eq!(
            validate_records(&records, &parties()),
            Err(ValidationError::DuplicateRecord {
                neighborhood: "Centro".to_string(),
                year: 2023
            })
        );
        assert_eq!(
            validate_records(&records[..1], &PartyTable::default()),
            Err(ValidationError::UnknownParty("anr".to_string()))
        );
    }
}
