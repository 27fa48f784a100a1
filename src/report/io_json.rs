// Primitives for reading the JSON feeds of polling stations.

use log::{debug, info, warn};
use snafu::prelude::*;

use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use std::fs;
use vote_aggregation::*;

use crate::report::*;

pub fn read_points(path: &str) -> BReportResult<Vec<Point>> {
    info!("Attempting to read points file {:?}", path);
    let contents = fs::read_to_string(path).context(OpeningFileSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    let points = parse_points(&js)?;
    info!("Read {} points from {:?}", points.len(), path);
    Ok(points)
}

/// The feed is either a list of points or an object with a `points` list.
pub fn parse_points(js: &JSValue) -> ReportResult<Vec<Point>> {
    let records = match js {
        JSValue::Array(l) => l,
        JSValue::Object(obj) => match obj.get("points") {
            Some(JSValue::Array(l)) => l,
            _ => return UnexpectedFeedLayoutSnafu {}.fail(),
        },
        _ => return UnexpectedFeedLayoutSnafu {}.fail(),
    };
    records
        .iter()
        .enumerate()
        .map(|(index, record)| parse_point(index, record))
        .collect()
}

fn parse_point(index: usize, js: &JSValue) -> ReportResult<Point> {
    let obj = js.as_object().context(MalformedPointSnafu {
        index,
        message: "not an object",
    })?;
    let id = match obj.get("id") {
        Some(JSValue::String(s)) => s.clone(),
        Some(JSValue::Number(n)) => n.to_string(),
        x => {
            return MalformedPointSnafu {
                index,
                message: format!("missing or invalid id {:?}", x),
            }
            .fail()
        }
    };
    debug!("parse_point: index: {:?} id: {:?}", index, id);

    let votes = match obj.get("votes") {
        Some(JSValue::Object(v)) => Votes {
            cdep: read_ballot(&id, v, BallotKind::Cdep),
            senat: read_ballot(&id, v, BallotKind::Senat),
        },
        None | Some(JSValue::Null) => Votes::default(),
        Some(x) => {
            warn!("parse_point: point {}: ignoring votes {:?}", id, x);
            Votes::default()
        }
    };

    Ok(Point {
        address: read_string(obj, "address"),
        city: read_string(obj, "city"),
        county: match obj.get("county") {
            Some(JSValue::String(s)) => Some(s.clone()),
            _ => None,
        },
        lat: read_coordinate(obj, "lat"),
        lng: read_coordinate(obj, "lng"),
        votes,
        id,
    })
}

fn read_string(obj: &JSMap<String, JSValue>, key: &str) -> String {
    match obj.get(key) {
        Some(JSValue::String(s)) => s.clone(),
        _ => "".to_string(),
    }
}

fn read_coordinate(obj: &JSMap<String, JSValue>, key: &str) -> f64 {
    match obj.get(key) {
        Some(JSValue::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(JSValue::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    }
}

fn read_ballot(id: &str, votes: &JSMap<String, JSValue>, kind: BallotKind) -> Ballot {
    let mut ballot = Ballot::new();
    match votes.get(kind.key()) {
        Some(JSValue::Object(entries)) => {
            for (key, value) in entries.iter() {
                ballot.insert(key, read_count(value));
            }
        }
        None | Some(JSValue::Null) => {}
        Some(x) => {
            warn!("read_ballot: point {}: ignoring {} ballot {:?}", id, kind.key(), x);
        }
    }
    ballot
}

fn read_count(value: &JSValue) -> RawCount {
    match value {
        JSValue::Number(n) => n.as_f64().map(RawCount::Number).unwrap_or(RawCount::Invalid),
        JSValue::String(s) => RawCount::Text(s.clone()),
        _ => RawCount::Invalid,
    }
}
