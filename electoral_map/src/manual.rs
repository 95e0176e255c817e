/*!

This is the long-form manual for `electoral_map` and `elmap`.

## Concepts

* a **record** holds the votes of one neighborhood for one election year. Its total
  is supplied by the data provider and may be larger than the sum of the parties
  (blank votes, untracked parties). It is never recomputed.
* a **share** is a number of votes divided by a total. It is 0 when the total is 0.
* a **percentage point** (`pp`) is the unit of the difference between two shares.
* the **focus party** is the party highlighted on the map, if any.

## Map colors

Without a focus party, each neighborhood takes the color of its winning party with
an opacity of 0.7. The winner is the party with strictly the most votes; ties go to
the party listed first in the tally. Neighborhoods without any vote have no winner
and are painted in neutral gray.

With a focus party, every neighborhood takes the color of that party. The opacity
is twice the share of the party, bounded to [0.1, 0.9]: a party with 30% of the
votes gets an opacity of 0.6, a party with 50% or more gets 0.9.

Neighborhoods of the map that have no record for the selected year are painted in
gray (`#CCCCCC`) with an opacity of 0.4. The names of the geometries must match
the names of the records exactly.

## Comparisons

Shares are compared in percentage points. Changes of 0.5pp or less are reported
as unchanged (`0pp`). Totals are compared as a relative change (`12.5%`). When
there is nothing to compare against (missing record, year without votes), the
comparison is reported as unchanged.

## Input formats

The following vote providers are supported:
* `json` an array of records
* `xlsx` an Excel spreadsheet

### `json`

```json
[
  {
    "id": "centro-2023",
    "neighborhood": "Centro",
    "votes": { "anr": 600, "plra": 400 },
    "totalVotes": 1050,
    "year": 2023,
    "locations": [
      {
        "id": "centro-1",
        "name": "Colegio Nacional",
        "address": "Eligio Ayala 1234",
        "votes": { "anr": 300, "plra": 200 },
        "totalVotes": 520
      }
    ]
  }
]
```

The order of the parties in `votes` is preserved: it decides the ties. `id`,
`totalVotes` and `locations` are optional: the id defaults to `<year>-<neighborhood>`
and the total to the sum of the votes. Counts may be written as numbers or strings.

Each row of the neighborhood table lists the polling locations of its record, with
their share of the votes of the neighborhood.

### `xlsx`

One row per neighborhood and year, after a header row. The columns are given as
1-based indices in the configuration:
* `neighborhoodColumnIndex` (default 1)
* `yearColumnIndex` (default 2)
* `totalColumnIndex` (optional: the total defaults to the sum of the parties)
* `firstPartyColumnIndex` (default 3): this column and all the following ones hold
  the votes of the parties. The header of each column is the id of the party.

Empty cells count as 0 votes.

## Geometries

The neighborhoods are read from a GeoJSON `FeatureCollection`. Each feature must
be a `Polygon` or a `MultiPolygon` and carry a `name` property. The `id` property
defaults to the name.

## Configuration

```json
{
  "outputSettings": { "title": "Asunción", "outputPath": "summary.json" },
  "voteSources": [ { "provider": "json", "filePath": "votes.json" } ],
  "geometrySource": { "filePath": "barrios.geojson" },
  "parties": [ { "id": "anr", "name": "ANR", "color": "#E63946" } ],
  "filters": { "year": 2023, "party": null, "comparisonYear": 2018 }
}
```

File paths are relative to the configuration file. The filters may be overridden
on the command line with `--year`, `--party` and `--comparison-year`.

*/
