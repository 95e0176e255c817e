use crate::dashboard::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    pub title: String,
    #[serde(rename = "outputPath")]
    pub output_path: Option<String>,
}

/// The configuration echoed at the top of the summary.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub title: String,
    pub year: Year,
    pub party: Option<String>,
    #[serde(rename = "comparisonYear")]
    pub comparison_year: Option<Year>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct VoteSource {
    pub provider: String,
    #[serde(rename = "filePath")]
    pub file_path: String,
    // Options of the xlsx provider. The column indices start at 1.
    #[serde(rename = "worksheetName")]
    pub worksheet_name: Option<String>,
    #[serde(rename = "neighborhoodColumnIndex")]
    _neighborhood_column_index: Option<JSValue>,
    #[serde(rename = "yearColumnIndex")]
    _year_column_index: Option<JSValue>,
    #[serde(rename = "totalColumnIndex")]
    _total_column_index: Option<JSValue>,
    #[serde(rename = "firstPartyColumnIndex")]
    _first_party_column_index: Option<JSValue>,
}

impl VoteSource {
    pub fn neighborhood_column_index(&self) -> DashboardResult<usize> {
        column_index(&self._neighborhood_column_index, 1)
    }

    pub fn year_column_index(&self) -> DashboardResult<usize> {
        column_index(&self._year_column_index, 2)
    }

    pub fn first_party_column_index(&self) -> DashboardResult<usize> {
        column_index(&self._first_party_column_index, 3)
    }

    pub fn total_column_index(&self) -> DashboardResult<Option<usize>> {
        match &self._total_column_index {
            Some(JSValue::Null) | None => Ok(None),
            x => column_index(x, 1).map(Some),
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct GeometrySource {
    #[serde(rename = "filePath")]
    pub file_path: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct DashboardParty {
    pub id: String,
    pub name: Option<String>,
    pub color: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct FilterSettings {
    pub year: Option<Year>,
    pub party: Option<String>,
    #[serde(rename = "comparisonYear")]
    pub comparison_year: Option<Year>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(rename = "outputSettings")]
    pub output_settings: OutputSettings,
    #[serde(rename = "voteSources", default)]
    pub vote_sources: Vec<VoteSource>,
    #[serde(rename = "geometrySource")]
    pub geometry_source: Option<GeometrySource>,
    pub parties: Vec<DashboardParty>,
    pub filters: Option<FilterSettings>,
}

pub fn read_config(path: &str) -> DashboardResult<DashboardConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    serde_json::from_str(&contents).context(ParsingJsonSnafu { path })
}

pub fn read_summary(path: &str) -> DashboardResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    debug!("read content: {:?}", contents);
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    Ok(js)
}

/// Reads a count written either as a JSON number or as a string.
pub fn read_js_int(x: &JSValue) -> DashboardResult<u64> {
    match x {
        JSValue::Number(n) => n.as_u64().context(ParsingJsonNumberSnafu {
            content: n.to_string(),
        }),
        JSValue::String(s) => s.trim().parse::<u64>().ok().context(ParsingJsonNumberSnafu {
            content: s.clone(),
        }),
        _ => None.context(ParsingJsonNumberSnafu {
            content: x.to_string(),
        }),
    }
}

// Converts a 1-based column index to a 0-based one.
fn column_index(x: &Option<JSValue>, default: usize) -> DashboardResult<usize> {
    let idx = match x {
        Some(js) => read_js_int(js)? as usize,
        None => default,
    };
    if idx == 0 {
        whatever!("Column indices start at 1, got 0");
    }
    Ok(idx - 1)
}

pub fn validate_parties(parties: &[DashboardParty]) -> PartyTable {
    let ps: Vec<Party> = parties
        .iter()
        .map(|p| Party {
            id: p.id.clone(),
            name: match p.name.clone() {
                Some(x) if !x.is_empty() => x,
                _ => p.id.clone(),
            },
            color: p.color.clone(),
        })
        .collect();
    PartyTable::new(&ps)
}

/// Merges the filters of the configuration with the command line.
/// An empty party means no focus party.
pub fn validate_filters(
    settings: Option<&FilterSettings>,
    overrides: &FilterOverrides,
) -> DashboardResult<MapFilters> {
    let year = overrides
        .year
        .or_else(|| settings.and_then(|s| s.year))
        .context(MissingYearSnafu {})?;
    let party = match overrides.party.clone() {
        Some(p) => Some(p),
        None => settings.and_then(|s| s.party.clone()),
    }
    .filter(|p| !p.is_empty());
    let comparison_year = overrides
        .comparison_year
        .or_else(|| settings.and_then(|s| s.comparison_year));
    if comparison_year == Some(year) {
        warn!("The comparison year is the selected year: all the trends will be flat");
    }
    Ok(MapFilters {
        year,
        party,
        comparison_year,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn js_ints() {
        assert_eq!(read_js_int(&json!(12)).unwrap(), 12);
        assert_eq!(read_js_int(&json!("1200")).unwrap(), 1200);
        assert!(read_js_int(&json!(-3)).is_err());
        assert!(read_js_int(&json!(1.5)).is_err());
        assert!(read_js_int(&json!("abc")).is_err());
        assert!(read_js_int(&json!(null)).is_err());
    }

    #[test]
    fn column_indices() {
        let source: VoteSource = serde_json::from_value(json!({
            "provider": "xlsx",
            "filePath": "votes.xlsx",
            "yearColumnIndex": "4",
            "totalColumnIndex": 5
        }))
        .unwrap();
        assert_eq!(source.neighborhood_column_index().unwrap(), 0);
        assert_eq!(source.year_column_index().unwrap(), 3);
        assert_eq!(source.first_party_column_index().unwrap(), 2);
        assert_eq!(source.total_column_index().unwrap(), Some(4));

        let source: VoteSource = serde_json::from_value(json!({
            "provider": "xlsx",
            "filePath": "votes.xlsx",
            "firstPartyColumnIndex": 0
        }))
        .unwrap();
        assert_eq!(source.total_column_index().unwrap(), None);
        assert!(source.first_party_column_index().is_err());
    }

    #[test]
    fn parties_default_to_their_id() {
        let parties = validate_parties(&[
            DashboardParty {
                id: "anr".to_string(),
                name: Some("".to_string()),
                color: "#E63946".to_string(),
            },
            DashboardParty {
                id: "plra".to_string(),
                name: Some("Partido Liberal".to_string()),
                color: "#1D3557".to_string(),
            },
        ]);
        assert_eq!(parties.get("anr").unwrap().name, "anr");
        assert_eq!(parties.get("plra").unwrap().name, "Partido Liberal");
    }

    #[test]
    fn filters_from_config() {
        let settings = FilterSettings {
            year: Some(2023),
            party: Some("anr".to_string()),
            comparison_year: Some(2018),
        };
        let filters = validate_filters(Some(&settings), &FilterOverrides::default()).unwrap();
        assert_eq!(
            filters,
            MapFilters {
                year: 2023,
                party: Some("anr".to_string()),
                comparison_year: Some(2018),
            }
        );
    }

    #[test]
    fn command_line_takes_precedence() {
        let settings = FilterSettings {
            year: Some(2023),
            party: Some("anr".to_string()),
            comparison_year: None,
        };
        let overrides = FilterOverrides {
            year: Some(2018),
            party: Some("".to_string()),
            comparison_year: Some(2013),
        };
        let filters = validate_filters(Some(&settings), &overrides).unwrap();
        assert_eq!(
            filters,
            MapFilters {
                year: 2018,
                party: None,
                comparison_year: Some(2013),
            }
        );
    }

    #[test]
    fn year_is_required() {
        let res = validate_filters(None, &FilterOverrides::default());
        assert!(matches!(res, Err(DashboardError::MissingYear {})));
    }
}
