pub mod client;
pub mod espn;
pub mod extract;
pub mod fetch;
pub mod names;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Domain types — clean model, independent of ESPN wire format
// ---------------------------------------------------------------------------

/// Leagues this crate knows how to fetch. Fixed at compile time; each key
/// maps 1:1 to the sport/league path segments of the upstream URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeagueKey {
    Nba,
    Nfl,
    Ncaam,
    Ncaaf,
}

impl LeagueKey {
    /// The `(sport, league)` URL path segments for the upstream API.
    pub fn sport_path(self) -> (&'static str, &'static str) {
        match self {
            LeagueKey::Nba => ("basketball", "nba"),
            LeagueKey::Nfl => ("football", "nfl"),
            LeagueKey::Ncaam => ("basketball", "mens-college-basketball"),
            LeagueKey::Ncaaf => ("football", "college-football"),
        }
    }

    pub fn family(self) -> SportFamily {
        match self {
            LeagueKey::Nba | LeagueKey::Ncaam => SportFamily::Basketball,
            LeagueKey::Nfl | LeagueKey::Ncaaf => SportFamily::Football,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LeagueKey::Nba => "nba",
            LeagueKey::Nfl => "nfl",
            LeagueKey::Ncaam => "ncaam",
            LeagueKey::Ncaaf => "ncaaf",
        }
    }
}

impl FromStr for LeagueKey {
    type Err = UnknownLeague;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nba" => Ok(LeagueKey::Nba),
            "nfl" => Ok(LeagueKey::Nfl),
            "ncaam" => Ok(LeagueKey::Ncaam),
            "ncaaf" => Ok(LeagueKey::Ncaaf),
            _ => Err(UnknownLeague(s.to_owned())),
        }
    }
}

impl fmt::Display for LeagueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLeague(pub String);

impl fmt::Display for UnknownLeague {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown league key: {}", self.0)
    }
}

impl std::error::Error for UnknownLeague {}

/// Grouping of leagues sharing a stat-category vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SportFamily {
    Basketball,
    Football,
}

/// Which side of the matchup a competitor plays on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeAway {
    Home,
    Away,
}

impl HomeAway {
    /// The tag value the upstream API uses for this side.
    pub fn as_str(self) -> &'static str {
        match self {
            HomeAway::Home => "home",
            HomeAway::Away => "away",
        }
    }
}

/// Stat categories a team leader can be reported for. Basketball and
/// football use disjoint subsets; the variant order fixes display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StatCategory {
    Points,
    Rebounds,
    Assists,
    Passing,
    Receiving,
    Rushing,
}

impl StatCategory {
    pub fn label(&self) -> &'static str {
        match self {
            StatCategory::Points => "PTS",
            StatCategory::Rebounds => "REB",
            StatCategory::Assists => "AST",
            StatCategory::Passing => "QB",
            StatCategory::Receiving => "WR",
            StatCategory::Rushing => "RB",
        }
    }
}

/// The top performer on one team for one category.
#[derive(Debug, Clone, PartialEq)]
pub struct Leader {
    pub name: String,
    pub stat: LeaderStat,
}

/// Basketball leaders carry the winning number; football leaders carry a
/// pre-formatted summary like `"245 YDS, 3 TD"`.
#[derive(Debug, Clone, PartialEq)]
pub enum LeaderStat {
    Value(u32),
    Summary(String),
}

impl fmt::Display for LeaderStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeaderStat::Value(v) => write!(f, "{v}"),
            LeaderStat::Summary(s) => f.write_str(s),
        }
    }
}

/// Per-team category → leader mapping. Extractors return `None` instead of
/// an empty map, so `Some` always means at least one qualifying leader.
pub type LeaderSet = BTreeMap<StatCategory, Leader>;

/// One live game, normalized from the upstream event shape. Built once per
/// fetch cycle and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedGame {
    pub id: String,
    pub home_abbr: String,
    pub away_abbr: String,
    pub home_score: u16,
    pub away_score: u16,
    pub period: u8,
    pub clock: String,
    pub period_text: String,
    /// `None` = leader data not yet available (distinct from "no leaders",
    /// which this crate never emits as an empty set).
    pub home_leaders: Option<LeaderSet>,
    pub away_leaders: Option<LeaderSet>,
}

impl NormalizedGame {
    /// One-line header for display surfaces, e.g. `"LAL 98 @ BOS 102 · Q4 2:31"`.
    pub fn summary_line(&self) -> String {
        let mut line = format!(
            "{} {} @ {} {}",
            self.away_abbr, self.away_score, self.home_abbr, self.home_score
        );
        if !self.period_text.is_empty() {
            line.push_str(" · ");
            line.push_str(&self.period_text);
        }
        line
    }
}
