mod model;
mod tables;
use log::{debug, info};

pub use crate::model::*;
pub use crate::tables::*;

/// Sums the votes of every canonical party over a set of points.
///
/// Only the 8 known parties are looked at. Missing or unreadable counts
/// are 0.
pub fn compute_vote_totals<'a, I>(points: I) -> VoteTotals
where
    I: IntoIterator<Item = &'a Point>,
{
    let mut totals = VoteTotals::default();
    for point in points {
        for party in Party::ALL {
            totals.cdep.add(party, point.votes.cdep.party_count(party));
            totals.senat.add(party, point.votes.senat.party_count(party));
        }
    }
    totals
}

/// A station is reported when the entries of its ballots sum to a positive value.
///
/// Unlike [`compute_vote_totals`], all the keys of the ballots are summed,
/// including the ones that are not canonical parties, and entries are read
/// with [`RawCount::value`] instead of [`RawCount::count`].
pub fn is_reported(point: &Point) -> bool {
    point.votes.cdep.raw_sum() + point.votes.senat.raw_sum() > 0.0
}

pub fn count_reported_stations<'a, I>(points: I) -> usize
where
    I: IntoIterator<Item = &'a Point>,
{
    points.into_iter().filter(|p| is_reported(p)).count()
}

/// The party with the largest number of votes over both ballots.
///
/// Ties go to the first party in canonical order.
pub fn determine_winner<'a, I>(points: I) -> Winner
where
    I: IntoIterator<Item = &'a Point>,
{
    winner_of(&compute_vote_totals(points))
}

pub fn winner_of(totals: &VoteTotals) -> Winner {
    // no votes, no winner
    if totals.grand_total() == 0 {
        return Winner::None;
    }
    let mut best: Option<(Party, u64)> = None;
    for party in Party::ALL {
        let count = totals.combined(party);
        match best {
            Some((_, best_count)) if best_count >= count => {}
            _ => best = Some((party, count)),
        }
    }
    best.map(|(p, _)| Winner::Party(p)).unwrap_or(Winner::None)
}

pub fn winner_color<'a, I>(points: I) -> &'static str
where
    I: IntoIterator<Item = &'a Point>,
{
    winner_color_of(determine_winner(points))
}

impl GroupedPoint {
    fn new(point: &Point, reported_stations: Option<u32>) -> GroupedPoint {
        GroupedPoint {
            point: point.clone(),
            ids: vec![point.id.clone()],
            reported_stations,
        }
    }

    pub fn totals(&self) -> VoteTotals {
        compute_vote_totals([&self.point])
    }

    pub fn winner(&self) -> Winner {
        determine_winner([&self.point])
    }
}

/// Merges the points that share the same address.
///
/// The first point seen for an address gives its fields to the group. The
/// reported stations are only known after a merge, and they are recounted
/// from the group and the incoming point alone.
pub fn group_by_address(points: &[Point]) -> Vec<GroupedPoint> {
    let mut groups: Vec<GroupedPoint> = Vec::new();
    for point in points.iter() {
        let existing = groups.iter().position(|g| g.point.address == point.address);
        match existing {
            None => {
                groups.push(GroupedPoint::new(point, None));
            }
            Some(idx) => {
                let group = &mut groups[idx];
                let votes = compute_vote_totals([&group.point, point]);
                let reported = count_reported_stations([&group.point, point]) as u32;
                group.point.votes = Votes::from(&votes);
                group.reported_stations = Some(reported);
                group.ids.push(point.id.clone());
            }
        }
    }
    info!(
        "group_by_address: {} points merged into {} groups",
        points.len(),
        groups.len()
    );
    groups
}

/// Merges the points that share the same city.
///
/// Every point that reported increments the reported stations of its group.
pub fn group_by_city(points: &[Point]) -> Vec<GroupedPoint> {
    let mut groups: Vec<GroupedPoint> = Vec::new();
    for point in points.iter() {
        let reported = is_reported(point);
        let existing = groups.iter().position(|g| g.point.city == point.city);
        match existing {
            None => {
                groups.push(GroupedPoint::new(point, Some(reported as u32)));
            }
            Some(idx) => {
                let group = &mut groups[idx];
                let votes = compute_vote_totals([&group.point, point]);
                if reported {
                    group.reported_stations = Some(group.reported_stations.unwrap_or(0) + 1);
                }
                group.point.votes = Votes::from(&votes);
                group.ids.push(point.id.clone());
            }
        }
        debug!("group_by_city: point {} reported: {}", point.id, reported);
    }
    info!(
        "group_by_city: {} points merged into {} groups",
        points.len(),
        groups.len()
    );
    groups
}
