use std::fmt::Display;

use crate::config::*;
use crate::winner::share;

/// Share changes within this many percentage points (inclusive) are
/// reported as unchanged.
pub const DEAD_ZONE_POINTS: f64 = 0.5;

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum TrendDirection {
    Up,
    Down,
    Flat,
}

impl Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TrendDirection::Up => "up",
            TrendDirection::Down => "down",
            TrendDirection::Flat => "same",
        };
        write!(f, "{}", s)
    }
}

/// The unit of the magnitude of a trend.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum TrendUnit {
    /// Difference between two shares, in percentage points.
    Points,
    /// Relative change between two counts, in percent.
    Percent,
}

#[derive(PartialEq, Debug, Clone, Copy)]
pub struct Trend {
    pub direction: TrendDirection,
    /// Always non-negative, and exactly 0 for flat trends.
    pub magnitude: f64,
    pub unit: TrendUnit,
}

impl Trend {
    pub fn flat(unit: TrendUnit) -> Trend {
        Trend {
            direction: TrendDirection::Flat,
            magnitude: 0.0,
            unit,
        }
    }
}

impl Display for Trend {
    /// "0.6pp", "12.5%". Flat trends are "0pp" and "0%".
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.direction, self.unit) {
            (TrendDirection::Flat, TrendUnit::Points) => write!(f, "0pp"),
            (TrendDirection::Flat, TrendUnit::Percent) => write!(f, "0%"),
            (_, TrendUnit::Points) => write!(f, "{:.1}pp", self.magnitude),
            (_, TrendUnit::Percent) => write!(f, "{:.1}%", self.magnitude),
        }
    }
}

/// Compares two shares (in [0, 1]).
///
/// The difference is measured in percentage points. Differences inside the
/// dead zone, as well as non-finite inputs, are flat.
pub fn share_trend(current_share: f64, previous_share: f64) -> Trend {
    let diff_points = (current_share - previous_share) * 100.0;
    if diff_points > DEAD_ZONE_POINTS {
        Trend {
            direction: TrendDirection::Up,
            magnitude: diff_points,
            unit: TrendUnit::Points,
        }
    } else if diff_points < -DEAD_ZONE_POINTS {
        Trend {
            direction: TrendDirection::Down,
            magnitude: diff_points.abs(),
            unit: TrendUnit::Points,
        }
    } else {
        Trend::flat(TrendUnit::Points)
    }
}

/// Compares two raw counts, such as the total number of votes.
///
/// The magnitude is the relative change with respect to `previous`. There
/// is nothing to compare against when `previous` is 0: the trend is flat.
pub fn total_trend(current: u64, previous: u64) -> Trend {
    if previous == 0 || current == previous {
        return Trend::flat(TrendUnit::Percent);
    }
    let direction = if current > previous {
        TrendDirection::Up
    } else {
        TrendDirection::Down
    };
    Trend {
        direction,
        magnitude: current.abs_diff(previous) as f64 / previous as f64 * 100.0,
        unit: TrendUnit::Percent,
    }
}

/// Compares the share of a party between two tallies given as counts.
///
/// If either total is 0, one of the shares is undefined and the trend is flat.
pub fn count_share_trend(
    current_votes: u64,
    current_total: u64,
    previous_votes: u64,
    previous_total: u64,
) -> Trend {
    if current_total == 0 || previous_total == 0 {
        return Trend::flat(TrendUnit::Points);
    }
    share_trend(
        share(current_votes, current_total),
        share(previous_votes, previous_total),
    )
}

/// Compares the share of a party in a neighborhood with the same
/// neighborhood in another year. Flat if there is no previous record.
pub fn record_share_trend(current: &VoteRecord, previous: Option<&VoteRecord>, party: &str) -> Trend {
    match previous {
        Some(prev) => count_share_trend(
            current.votes.votes_for(party),
            current.total_votes,
            prev.votes.votes_for(party),
            prev.total_votes,
        ),
        None => Trend::flat(TrendUnit::Points),
    }
}

pub fn aggregate_share_trend(
    current: &AggregateResult,
    previous: &AggregateResult,
    party: &str,
) -> Trend {
    count_share_trend(
        current.votes_for(party),
        current.total_votes,
        previous.votes_for(party),
        previous.total_votes,
    )
}
