/// ESPN API raw wire types — serde shapes for deserializing ESPN responses.
/// Everything is `Option` because the upstream omits fields freely; the
/// extraction layer in `extract.rs`/`fetch.rs` owns all defaulting.
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Scoreboard  (site v2 API)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ScoreboardResponse {
    pub events: Option<Vec<EspnEvent>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnEvent {
    pub id: Option<String>,
    pub name: Option<String>,
    pub status: Option<EspnStatus>,
    pub competitions: Option<Vec<EspnCompetition>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnStatus {
    #[serde(rename = "type")]
    pub status_type: Option<EspnStatusType>,
    pub period: Option<u8>,
    #[serde(rename = "displayClock")]
    pub display_clock: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnStatusType {
    /// "pre" | "in" | "post"
    pub state: Option<String>,
    #[serde(rename = "shortDetail")]
    pub short_detail: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnCompetition {
    pub competitors: Option<Vec<EspnCompetitor>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnCompetitor {
    #[serde(rename = "homeAway")]
    pub home_away: Option<String>, // "home" | "away"
    pub team: Option<EspnTeam>,
    pub score: Option<String>, // ESPN sends scores as strings
    /// Coarse per-competitor stat sections ("athletes", "passing", ...);
    /// only populated on some scoreboards, used by the fallback extractor.
    pub statistics: Option<Vec<EspnStatGroup>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnTeam {
    pub abbreviation: Option<String>,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
    /// Present on boxscore `players[].team` entries; tags the side.
    #[serde(rename = "homeAway")]
    pub home_away: Option<String>,
}

// ---------------------------------------------------------------------------
// Game summary / boxscore  (site web API)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct SummaryResponse {
    pub boxscore: Option<EspnBoxscore>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnBoxscore {
    pub players: Option<Vec<EspnTeamPlayers>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnTeamPlayers {
    pub team: Option<EspnTeam>,
    pub statistics: Option<Vec<EspnStatGroup>>,
}

/// A named block of per-athlete stat lines. The same shape appears both in
/// the boxscore `players[].statistics` and in the scoreboard competitor
/// `statistics` sections.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnStatGroup {
    pub name: Option<String>,
    pub athletes: Option<Vec<EspnAthleteLine>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnAthleteLine {
    pub athlete: Option<EspnAthlete>,
    /// String-encoded numeric stats; field order is sport- and
    /// source-dependent, see the index tables in `extract.rs`.
    pub stats: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnAthlete {
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
    #[serde(rename = "shortName")]
    pub short_name: Option<String>,
}
