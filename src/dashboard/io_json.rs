// Primitives for reading vote records written in JSON.

use serde::{Deserialize, Serialize};
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;

use crate::dashboard::*;

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
struct JsonLocation {
    id: Option<String>,
    name: String,
    address: Option<String>,
    votes: JSMap<String, JSValue>,
    #[serde(rename = "totalVotes")]
    total_votes: Option<JSValue>,
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
struct JsonRecord {
    id: Option<String>,
    neighborhood: String,
    votes: JSMap<String, JSValue>,
    #[serde(rename = "totalVotes")]
    total_votes: Option<JSValue>,
    year: Year,
    #[serde(default)]
    locations: Vec<JsonLocation>,
}

pub fn read_json_records(path: &str, builder: &mut Builder) -> DashboardResult<()> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let records: Vec<JsonRecord> =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    info!("read_json_records: {} records in {:?}", records.len(), path);
    add_records(&records, path, builder)
}

fn add_records(records: &[JsonRecord], path: &str, builder: &mut Builder) -> DashboardResult<()> {
    for jr in records.iter() {
        debug!("add_records: {:?} {}", jr.neighborhood, jr.year);
        let votes = read_tally(&jr.votes)?;
        let total_votes = jr.total_votes.as_ref().map(read_js_int).transpose()?;
        builder
            .add_record(
                jr.id.as_deref(),
                &jr.neighborhood,
                jr.year,
                &votes,
                total_votes,
            )
            .context(InvalidRecordSnafu { path })?;

        for (idx, jl) in jr.locations.iter().enumerate() {
            let tally: PartyVotes = read_tally(&jl.votes)?.into_iter().collect();
            let location = PollingLocation {
                id: jl
                    .id
                    .clone()
                    .unwrap_or_else(|| format!("{}-{:03}", jr.neighborhood, idx + 1)),
                name: jl.name.clone(),
                address: jl.address.clone().unwrap_or_default(),
                total_votes: match &jl.total_votes {
                    Some(x) => read_js_int(x)?,
                    None => tally.sum(),
                },
                votes: tally,
            };
            builder
                .add_location(&jr.neighborhood, jr.year, &location)
                .context(InvalidRecordSnafu { path })?;
        }
    }
    Ok(())
}

// The parties are kept in the order of the file.
fn read_tally(votes: &JSMap<String, JSValue>) -> DashboardResult<Vec<(PartyId, u64)>> {
    let mut res: Vec<(PartyId, u64)> = Vec::new();
    for (party, count) in votes.iter() {
        res.push((party.clone(), read_js_int(count)?));
    }
    Ok(res)
}
