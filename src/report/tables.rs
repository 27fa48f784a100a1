// Flattening of points and groups into CSV rows.

use std::collections::HashMap;
use vote_aggregation::*;

use crate::report::io_common::{coord, to_title_case};
use crate::report::{ReportError, ReportResult};

pub type Row = HashMap<String, String>;

// Columns shared by points and groups, after the id column.
const LOCATION_FIELDS: [&str; 7] = [
    "address",
    "city",
    "county",
    "countyCode",
    "coord",
    "lat",
    "lng",
];

fn vote_field(kind: BallotKind, party: Party) -> String {
    format!("{}_{}", kind.key(), party.key())
}

fn vote_fields() -> Vec<String> {
    BallotKind::ALL
        .into_iter()
        .flat_map(|kind| Party::ALL.into_iter().map(move |party| vote_field(kind, party)))
        .collect()
}

pub fn point_fields() -> Vec<String> {
    let mut fields = vec!["id".to_string()];
    fields.extend(LOCATION_FIELDS.iter().map(|f| f.to_string()));
    fields.extend(["winner", "winnerColor"].iter().map(|f| f.to_string()));
    fields.extend(vote_fields());
    fields
}

pub fn grouped_fields() -> Vec<String> {
    let mut fields = vec!["ids".to_string()];
    fields.extend(LOCATION_FIELDS.iter().map(|f| f.to_string()));
    fields.extend(
        ["reportedStations", "winner", "winnerColor"]
            .iter()
            .map(|f| f.to_string()),
    );
    fields.extend(vote_fields());
    fields
}

/// Keeps the requested fields, in the requested order.
pub fn select_fields(defaults: Vec<String>, requested: Option<&[String]>) -> ReportResult<Vec<String>> {
    match requested {
        None => Ok(defaults),
        Some(fields) => {
            if let Some(unknown) = fields.iter().find(|f| !defaults.contains(f)) {
                return Err(ReportError::UnknownField {
                    field: unknown.clone(),
                });
            }
            Ok(fields.to_vec())
        }
    }
}

fn location_row(point: &Point, totals: &VoteTotals) -> Row {
    let mut row: Row = HashMap::new();
    row.insert("address".to_string(), point.address.clone());
    row.insert("city".to_string(), point.city.clone());
    if let Some(county) = &point.county {
        row.insert("county".to_string(), to_title_case(county));
        if let Some(code) = county_code(county) {
            row.insert("countyCode".to_string(), code.to_string());
        }
    }
    row.insert("coord".to_string(), coord(point));
    row.insert("lat".to_string(), point.lat.to_string());
    row.insert("lng".to_string(), point.lng.to_string());

    let winner = winner_of(totals);
    row.insert("winner".to_string(), winner.key().to_string());
    row.insert("winnerColor".to_string(), winner_color_of(winner).to_string());
    for kind in BallotKind::ALL {
        for (party, count) in totals.ballot(kind).iter() {
            row.insert(vote_field(kind, party), count.to_string());
        }
    }
    row
}

pub fn point_rows(points: &[Point]) -> Vec<Row> {
    points
        .iter()
        .map(|p| {
            let mut row = location_row(p, &compute_vote_totals([p]));
            row.insert("id".to_string(), p.id.clone());
            row
        })
        .collect()
}

pub fn grouped_rows(groups: &[GroupedPoint]) -> Vec<Row> {
    groups
        .iter()
        .map(|g| {
            let mut row = location_row(&g.point, &g.totals());
            row.insert("ids".to_string(), g.ids.join(";"));
            if let Some(reported) = g.reported_stations {
                row.insert("reportedStations".to_string(), reported.to_string());
            }
            row
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(id: &str, county: Option<&str>, psd: &str, usr: u64) -> Point {
        Point {
            id: id.to_string(),
            address: "Piata Unirii 1".to_string(),
            city: "Timisoara".to_string(),
            county: county.map(|c| c.to_string()),
            lat: 45.75,
            lng: 21.22,
            votes: Votes {
                cdep: Ballot::new().with("psd", psd),
                senat: Ballot::new().with("usr", usr),
            },
        }
    }

    #[test]
    fn field_lists() {
        let pf = point_fields();
        assert_eq!(pf.len(), 1 + 7 + 2 + 16);
        assert_eq!(pf[0], "id");
        assert_eq!(pf[10], "cdep_psd");
        assert_eq!(pf.last().map(|s| s.as_str()), Some("senat_altele"));

        let gf = grouped_fields();
        assert_eq!(gf.len(), pf.len() + 1);
        assert_eq!(gf[0], "ids");
        assert_eq!(gf[8], "reportedStations");
    }

    #[test]
    fn rows_of_points() {
        let rows = point_rows(&[station("10", Some("TIMIS"), "4", 9), station("11", None, "x", 0)]);
        assert_eq!(rows[0]["id"], "10");
        assert_eq!(rows[0]["county"], "Timis");
        assert_eq!(rows[0]["countyCode"], "TM");
        assert_eq!(rows[0]["coord"], "45.75,21.22");
        assert_eq!(rows[0]["cdep_psd"], "4");
        assert_eq!(rows[0]["senat_usr"], "9");
        assert_eq!(rows[0]["cdep_pru"], "0");
        assert_eq!(rows[0]["winner"], "usr");
        assert_eq!(rows[0]["winnerColor"], "#01a0e4");

        assert!(rows[1].get("county").is_none());
        assert!(rows[1].get("countyCode").is_none());
        assert_eq!(rows[1]["cdep_psd"], "0");
        assert_eq!(rows[1]["winner"], "none");
        assert_eq!(rows[1]["winnerColor"], "#363636");
    }

    #[test]
    fn rows_of_groups() {
        let points = vec![station("1", Some("TIMIS"), "4", 0), station("2", Some("TIMIS"), "6", 1)];
        let rows = grouped_rows(&group_by_address(&points));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["ids"], "1;2");
        assert_eq!(rows[0]["reportedStations"], "2");
        assert_eq!(rows[0]["cdep_psd"], "10");
        assert_eq!(rows[0]["senat_usr"], "1");
        assert_eq!(rows[0]["winner"], "psd");

        let rows = grouped_rows(&group_by_address(&points[..1]));
        assert!(rows[0].get("reportedStations").is_none());
    }

    #[test]
    fn field_selection() {
        let requested = vec!["winner".to_string(), "id".to_string()];
        assert_eq!(
            select_fields(point_fields(), Some(requested.as_slice())).unwrap(),
            requested
        );
        assert_eq!(select_fields(point_fields(), None).unwrap(), point_fields());
        let bad = vec!["ids".to_string()];
        assert!(matches!(
            select_fields(point_fields(), Some(bad.as_slice())),
            Err(ReportError::UnknownField { .. })
        ));
    }
}
