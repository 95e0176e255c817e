// Primitives for reading vote records from Excel spreadsheets.

use calamine::{open_workbook, DataType, Range, Reader, Xlsx};

use crate::dashboard::*;

pub fn read_xlsx_records(path: &str, source: &VoteSource, builder: &mut Builder) -> DashboardResult<()> {
    let wrange = get_range(path, source)?;
    add_rows(wrange.rows(), path, source, builder)
}

fn get_range(path: &str, source: &VoteSource) -> DashboardResult<Range<DataType>> {
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;
    let range = match &source.worksheet_name {
        Some(name) => workbook.worksheet_range(name),
        None => workbook.worksheet_range_at(0),
    };
    range
        .context(EmptyExcelSnafu { path })?
        .context(OpeningExcelSnafu { path })
}

/// Reads the rows of the spreadsheet. The first row is the header, which
/// holds the ids of the parties.
fn add_rows<'a>(
    mut rows: impl Iterator<Item = &'a [DataType]>,
    path: &str,
    source: &VoteSource,
    builder: &mut Builder,
) -> DashboardResult<()> {
    let neighborhood_idx = source.neighborhood_column_index()?;
    let year_idx = source.year_column_index()?;
    let total_idx_o = source.total_column_index()?;
    let first_party_idx = source.first_party_column_index()?;

    let header = rows.next().context(EmptyExcelSnafu { path })?;
    debug!("add_rows: header: {:?}", header);
    // (column, party). Columns with an empty header are skipped.
    let mut party_columns: Vec<(usize, PartyId)> = Vec::new();
    for (idx, cell) in header.iter().enumerate().skip(first_party_idx) {
        if Some(idx) == total_idx_o || idx == year_idx || idx == neighborhood_idx {
            continue;
        }
        if let Some(party) = read_label(cell) {
            party_columns.push((idx, party));
        }
    }
    info!("add_rows: parties in {:?}: {:?}", path, party_columns);

    for (row_idx, row) in rows.enumerate() {
        // The header is line 1.
        let lineno = (row_idx + 2) as u64;
        let neighborhood = match row.get(neighborhood_idx).and_then(read_label) {
            Some(n) => n,
            None => {
                warn!("add_rows: line {}: no neighborhood, skipping row", lineno);
                continue;
            }
        };
        let year_cell = row.get(year_idx).unwrap_or(&DataType::Empty);
        let year = match read_count(year_cell).flatten().map(Year::try_from) {
            Some(Ok(y)) => y,
            _ => {
                return Err(DashboardError::ExcelWrongCellType {
                    lineno,
                    content: format!("{:?}", year_cell),
                });
            }
        };

        let mut votes: Vec<(PartyId, u64)> = Vec::new();
        for (col, party) in party_columns.iter() {
            let cell = row.get(*col).unwrap_or(&DataType::Empty);
            let count = read_count(cell).context(ExcelWrongCellTypeSnafu {
                lineno,
                content: format!("{:?}", cell),
            })?;
            votes.push((party.clone(), count.unwrap_or(0)));
        }

        let total_votes = match total_idx_o {
            Some(idx) => {
                let cell = row.get(idx).unwrap_or(&DataType::Empty);
                read_count(cell).context(ExcelWrongCellTypeSnafu {
                    lineno,
                    content: format!("{:?}", cell),
                })?
            }
            None => None,
        };
        debug!(
            "add_rows: line {}: {:?} {} {:?} total {:?}",
            lineno, neighborhood, year, votes, total_votes
        );
        builder
            .add_record(None, &neighborhood, year, &votes, total_votes)
            .context(InvalidRecordSnafu { path })?;
    }
    Ok(())
}

fn read_label(cell: &DataType) -> Option<String> {
    match cell {
        DataType::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        DataType::Int(i) => Some(i.to_string()),
        DataType::Float(f) => Some(f.to_string()),
        _ => None,
    }
}

// None: not a count. Some(None): empty cell.
fn read_count(cell: &DataType) -> Option<Option<u64>> {
    match cell {
        DataType::Empty => Some(None),
        DataType::Int(i) if *i >= 0 => Some(Some(*i as u64)),
        DataType::Float(f) if *f >= 0.0 && f.fract() == 0.0 => Some(Some(*f as u64)),
        DataType::String(s) if s.trim().is_empty() => Some(None),
        DataType::String(s) => s.trim().parse::<u64>().ok().map(Some),
        _ => None,
    }
}
