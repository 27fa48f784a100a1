// ********* Input data structures ***********

use std::collections::BTreeMap;
use std::fmt::Display;

/// The parties tracked on the map.
///
/// The declaration order is the canonical order: it is used for iteration,
/// for the CSV columns and to resolve ties when picking a winner.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum Party {
    Psd,
    Usr,
    Pnl,
    Udmr,
    Alde,
    Pmp,
    Pru,
    Altele,
}

impl Party {
    pub const ALL: [Party; 8] = [
        Party::Psd,
        Party::Usr,
        Party::Pnl,
        Party::Udmr,
        Party::Alde,
        Party::Pmp,
        Party::Pru,
        Party::Altele,
    ];

    /// The key used for this party in the data feeds.
    pub fn key(&self) -> &'static str {
        match self {
            Party::Psd => "psd",
            Party::Usr => "usr",
            Party::Pnl => "pnl",
            Party::Udmr => "udmr",
            Party::Alde => "alde",
            Party::Pmp => "pmp",
            Party::Pru => "pru",
            Party::Altele => "altele",
        }
    }

    pub fn from_key(key: &str) -> Option<Party> {
        Party::ALL.iter().find(|p| p.key() == key).copied()
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl Display for Party {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// The two ballots cast at every polling station.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum BallotKind {
    /// Chamber of deputies.
    Cdep,
    /// Senate.
    Senat,
}

impl BallotKind {
    pub const ALL: [BallotKind; 2] = [BallotKind::Cdep, BallotKind::Senat];

    pub fn key(&self) -> &'static str {
        match self {
            BallotKind::Cdep => "cdep",
            BallotKind::Senat => "senat",
        }
    }
}

/// A vote count as it was found in the source data.
///
/// Feeds are not consistent: counts may be numbers, numeric strings or
/// garbage. The conversions never fail, see [`RawCount::count`] and
/// [`RawCount::value`].
#[derive(PartialEq, Debug, Clone)]
pub enum RawCount {
    /// An exact count, as produced by a merge.
    Count(u64),
    Number(f64),
    Text(String),
    /// Anything else (null, booleans, nested structures).
    Invalid,
}

impl RawCount {
    /// The integer value of this count.
    ///
    /// Numbers are truncated, strings are read from their leading integer
    /// prefix (`"12 votes"` is 12). Everything unreadable or negative is 0.
    pub fn count(&self) -> u64 {
        match self {
            RawCount::Count(n) => *n,
            RawCount::Number(n) if n.is_finite() && *n >= 1.0 => n.trunc() as u64,
            RawCount::Number(_) => 0,
            RawCount::Text(s) => parse_integer_prefix(s),
            RawCount::Invalid => 0,
        }
    }

    /// The value of this count when the whole entry is numeric.
    ///
    /// Numbers keep their value, fractions and signs included. A string
    /// counts only when all of it (once trimmed) is a number: `"12 votes"`
    /// is 0 here while [`RawCount::count`] reads 12.
    pub fn value(&self) -> f64 {
        match self {
            RawCount::Count(n) => *n as f64,
            RawCount::Number(n) if n.is_finite() => *n,
            RawCount::Number(_) => 0.0,
            RawCount::Text(s) => match s.trim().parse::<f64>() {
                Ok(v) if v.is_finite() => v,
                _ => 0.0,
            },
            RawCount::Invalid => 0.0,
        }
    }
}

impl From<u64> for RawCount {
    fn from(n: u64) -> Self {
        RawCount::Count(n)
    }
}

impl From<&str> for RawCount {
    fn from(s: &str) -> Self {
        RawCount::Text(s.to_string())
    }
}

fn parse_integer_prefix(s: &str) -> u64 {
    let trimmed = s.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..end];
    if negative || digits.is_empty() {
        return 0;
    }
    // Only digits are left: the parse can only fail on overflow.
    digits.parse::<u64>().unwrap_or(u64::MAX)
}

/// The counts recorded for one ballot, keyed by party key.
///
/// Keys are kept as found in the source: unknown parties stay in the ballot.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct Ballot {
    entries: BTreeMap<String, RawCount>,
}

impl Ballot {
    pub fn new() -> Ballot {
        Ballot::default()
    }

    pub fn insert(&mut self, key: &str, count: RawCount) {
        self.entries.insert(key.to_string(), count);
    }

    /// Chained version of [`Ballot::insert`].
    pub fn with(mut self, key: &str, count: impl Into<RawCount>) -> Ballot {
        self.insert(key, count.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&RawCount> {
        self.entries.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &RawCount)> {
        self.entries.iter()
    }

    /// The count of a canonical party. Missing entries count as 0.
    pub fn party_count(&self, party: Party) -> u64 {
        self.get(party.key()).map(|c| c.count()).unwrap_or(0)
    }

    /// The sum of the values of all the entries, including the keys that are
    /// not parties.
    pub fn raw_sum(&self) -> f64 {
        self.entries.values().map(|c| c.value()).sum()
    }
}

impl From<&PartyVoteTotals> for Ballot {
    fn from(totals: &PartyVoteTotals) -> Self {
        let mut b = Ballot::new();
        for (party, count) in totals.iter() {
            b.insert(party.key(), RawCount::from(count));
        }
        b
    }
}

#[derive(PartialEq, Debug, Clone, Default)]
pub struct Votes {
    pub cdep: Ballot,
    pub senat: Ballot,
}

impl From<&VoteTotals> for Votes {
    fn from(totals: &VoteTotals) -> Self {
        Votes {
            cdep: Ballot::from(&totals.cdep),
            senat: Ballot::from(&totals.senat),
        }
    }
}

/// A polling station and its results.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct Point {
    pub id: String,
    pub address: String,
    pub city: String,
    pub county: Option<String>,
    pub lat: f64,
    pub lng: f64,
    pub votes: Votes,
}

// ******** Output data structures *********

/// Vote count for each of the canonical parties.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Default)]
pub struct PartyVoteTotals {
    counts: [u64; 8],
}

impl PartyVoteTotals {
    pub fn get(&self, party: Party) -> u64 {
        self.counts[party.index()]
    }

    pub fn add(&mut self, party: Party, count: u64) {
        let c = &mut self.counts[party.index()];
        *c = c.saturating_add(count);
    }

    /// The counts in canonical party order.
    pub fn iter(&self) -> impl Iterator<Item = (Party, u64)> + '_ {
        Party::ALL.into_iter().map(move |p| (p, self.get(p)))
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().fold(0u64, |acc, c| acc.saturating_add(*c))
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Copy, Default)]
pub struct VoteTotals {
    pub cdep: PartyVoteTotals,
    pub senat: PartyVoteTotals,
}

impl VoteTotals {
    pub fn ballot(&self, kind: BallotKind) -> &PartyVoteTotals {
        match kind {
            BallotKind::Cdep => &self.cdep,
            BallotKind::Senat => &self.senat,
        }
    }

    /// The votes of a party over both ballots.
    pub fn combined(&self, party: Party) -> u64 {
        self.cdep.get(party).saturating_add(self.senat.get(party))
    }

    pub fn grand_total(&self) -> u64 {
        self.cdep.total().saturating_add(self.senat.total())
    }
}

/// One or more points merged together because they share an address or a city.
///
/// The fields of the first merged point are kept. After a merge, `point.votes`
/// only holds the canonical parties.
#[derive(PartialEq, Debug, Clone)]
pub struct GroupedPoint {
    pub point: Point,
    /// The ids of all the merged points, in input order.
    pub ids: Vec<String>,
    /// Not set for an address group that never received a second point.
    pub reported_stations: Option<u32>,
}

/// The party with the most votes, or no one when nothing was reported.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Winner {
    None,
    Party(Party),
}

impl Winner {
    pub fn key(&self) -> &'static str {
        match self {
            Winner::None => "none",
            Winner::Party(p) => p.key(),
        }
    }
}

impl Display for Winner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_count_coercion() {
        assert_eq!(RawCount::from("5").count(), 5);
        assert_eq!(RawCount::from("  42 votes").count(), 42);
        assert_eq!(RawCount::from("+7").count(), 7);
        assert_eq!(RawCount::from("abc").count(), 0);
        assert_eq!(RawCount::from("").count(), 0);
        assert_eq!(RawCount::from("-3").count(), 0);
        assert_eq!(RawCount::Number(3.9).count(), 3);
        assert_eq!(RawCount::Number(-2.0).count(), 0);
        assert_eq!(RawCount::Number(f64::NAN).count(), 0);
        assert_eq!(RawCount::Invalid.count(), 0);
    }

    #[test]
    fn raw_count_value() {
        assert_eq!(RawCount::from("5").value(), 5.0);
        assert_eq!(RawCount::from(" 2.5 ").value(), 2.5);
        assert_eq!(RawCount::from("12 votes").value(), 0.0);
        assert_eq!(RawCount::from("abc").value(), 0.0);
        assert_eq!(RawCount::from("").value(), 0.0);
        assert_eq!(RawCount::from("NaN").value(), 0.0);
        assert_eq!(RawCount::Number(0.5).value(), 0.5);
        assert_eq!(RawCount::Number(-2.0).value(), -2.0);
        assert_eq!(RawCount::Number(f64::INFINITY).value(), 0.0);
        assert_eq!(RawCount::from(4u64).value(), 4.0);
        assert_eq!(RawCount::Invalid.value(), 0.0);
    }

    #[test]
    fn party_keys() {
        for p in Party::ALL {
            assert_eq!(Party::from_key(p.key()), Some(p));
        }
        assert_eq!(Party::from_key("xyz"), None);
        assert_eq!(Party::ALL[0], Party::Psd);
        assert_eq!(Party::ALL[7], Party::Altele);
    }

    #[test]
    fn ballot_sums() {
        let b = Ballot::new().with("psd", "4").with("xyz", 3u64);
        assert_eq!(b.party_count(Party::Psd), 4);
        assert_eq!(b.party_count(Party::Usr), 0);
        assert_eq!(b.raw_sum(), 7.0);
    }

    #[test]
    fn totals_to_ballot() {
        let mut t = PartyVoteTotals::default();
        t.add(Party::Pnl, 12);
        let b = Ballot::from(&t);
        assert_eq!(b.iter().count(), 8);
        assert_eq!(b.party_count(Party::Pnl), 12);
        assert_eq!(b.raw_sum(), 12.0);
    }
}
