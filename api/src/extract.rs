/// Stat-leader extraction: walks the raw boxscore and scoreboard payloads
/// and produces per-team `LeaderSet`s.
///
/// The upstream encodes athlete stats as positional string arrays whose
/// field order differs between the boxscore and scoreboard payloads (and
/// between sports). Each source shape gets its own named index table below;
/// a future upstream reshuffle should be a one-table edit.
use crate::espn::{EspnAthleteLine, EspnCompetitor, EspnStatGroup, SummaryResponse};
use crate::names::abbreviate;
use crate::{HomeAway, Leader, LeaderSet, LeaderStat, SportFamily, StatCategory};
use log::debug;

// ---------------------------------------------------------------------------
// Index tables, one per source shape
// ---------------------------------------------------------------------------

/// Where a stat lives inside an athlete's string-encoded stat array.
#[derive(Debug, Clone, Copy)]
enum FieldPos {
    /// Fixed offset from the front of the array.
    At(usize),
    /// Final element, whatever the array length.
    Last,
}

struct BasketballTable {
    points: FieldPos,
    rebounds: FieldPos,
    assists: FieldPos,
}

impl BasketballTable {
    fn categories(&self) -> [(StatCategory, FieldPos); 3] {
        [
            (StatCategory::Points, self.points),
            (StatCategory::Rebounds, self.rebounds),
            (StatCategory::Assists, self.assists),
        ]
    }
}

/// Boxscore per-player stat block. The order is not schema-guaranteed by the
/// upstream, only typical; the length gate below is the sole validation.
const BOXSCORE_BASKETBALL: BasketballTable = BasketballTable {
    points: FieldPos::Last,
    rebounds: FieldPos::At(6),
    assists: FieldPos::At(7),
};

/// A boxscore stat line shorter than this is not a full player line and the
/// athlete is skipped for every category.
const BOXSCORE_BASKETBALL_MIN_LEN: usize = 13;

/// Scoreboard "athletes" section. Different field order and length than the
/// boxscore table above; the two are not interchangeable.
const SCOREBOARD_BASKETBALL: BasketballTable = BasketballTable {
    points: FieldPos::At(15),
    rebounds: FieldPos::At(10),
    assists: FieldPos::At(11),
};

/// Yards/touchdown offsets inside a football stat group; passing differs
/// from receiving and rushing.
#[derive(Debug, Clone, Copy)]
struct FootballOffsets {
    yards: usize,
    touchdowns: usize,
}

const FOOTBALL_PASSING: FootballOffsets = FootballOffsets { yards: 2, touchdowns: 3 };
const FOOTBALL_RECEIVING: FootballOffsets = FootballOffsets { yards: 1, touchdowns: 3 };
const FOOTBALL_RUSHING: FootballOffsets = FootballOffsets { yards: 1, touchdowns: 3 };

/// Football stat arrays need at least this many elements for the offsets
/// above to be meaningful.
const FOOTBALL_MIN_STATS: usize = 4;

// ---------------------------------------------------------------------------
// Per-sport strategy dispatch
// ---------------------------------------------------------------------------

impl SportFamily {
    /// Extract a team's leaders from a detailed boxscore payload.
    pub fn boxscore_leaders(self, summary: &SummaryResponse, side: HomeAway) -> Option<LeaderSet> {
        match self {
            SportFamily::Basketball => basketball_boxscore_leaders(summary, side),
            // The football boxscore shape has never been mapped; callers fall
            // through to the scoreboard competitor data instead. Known gap.
            SportFamily::Football => None,
        }
    }

    /// Extract a team's leaders from the lighter scoreboard competitor
    /// payload. Used only when no boxscore is available.
    pub fn competitor_leaders(self, competitor: &EspnCompetitor) -> Option<LeaderSet> {
        match self {
            SportFamily::Basketball => basketball_competitor_leaders(competitor),
            SportFamily::Football => football_competitor_leaders(competitor),
        }
    }
}

// ---------------------------------------------------------------------------
// Basketball
// ---------------------------------------------------------------------------

fn basketball_boxscore_leaders(summary: &SummaryResponse, side: HomeAway) -> Option<LeaderSet> {
    let players = summary.boxscore.as_ref()?.players.as_deref()?;

    // Match the side by tag, never by position in the array.
    let Some(team) = players.iter().find(|p| {
        p.team.as_ref().and_then(|t| t.home_away.as_deref()) == Some(side.as_str())
    }) else {
        debug!("no {} team entry in boxscore", side.as_str());
        return None;
    };

    // First statistics group is the main per-player stat block.
    let group = team.statistics.as_deref()?.first()?;
    let athletes = group.athletes.as_deref()?;

    let mut top_points: Option<(String, u32)> = None;
    let mut top_rebounds: Option<(String, u32)> = None;
    let mut top_assists: Option<(String, u32)> = None;

    for line in athletes {
        let Some(stats) = line.stats.as_deref() else { continue };
        if stats.len() < BOXSCORE_BASKETBALL_MIN_LEN {
            continue;
        }
        // Whole-line parse: one bad field disqualifies the athlete from
        // every category, matching the atomicity of the source data.
        let Some((pts, reb, ast)) = parse_boxscore_line(stats) else {
            continue;
        };
        let name = stat_line_name(line);
        update_running_max(&mut top_points, &name, pts);
        update_running_max(&mut top_rebounds, &name, reb);
        update_running_max(&mut top_assists, &name, ast);
    }

    let mut leaders = LeaderSet::new();
    let tops = [
        (StatCategory::Points, top_points),
        (StatCategory::Rebounds, top_rebounds),
        (StatCategory::Assists, top_assists),
    ];
    for (category, top) in tops {
        if let Some((name, value)) = top {
            leaders.insert(category, Leader { name, stat: LeaderStat::Value(value) });
        }
    }
    non_empty(leaders)
}

fn basketball_competitor_leaders(competitor: &EspnCompetitor) -> Option<LeaderSet> {
    let sections = competitor.statistics.as_deref()?;
    let athletes = find_group(sections, "athletes")?.athletes.as_deref()?;

    let mut leaders = LeaderSet::new();
    for (category, pos) in SCOREBOARD_BASKETBALL.categories() {
        let lines = athletes
            .iter()
            .map(|line| (stat_line_name(line), line.stats.as_deref().unwrap_or(&[])));
        if let Some((name, value)) = rank_by_field(lines, pos) {
            leaders.insert(category, Leader { name, stat: LeaderStat::Value(value) });
        }
    }
    non_empty(leaders)
}

/// Strict `>` against a running maximum that starts at 0: ties keep the
/// first-encountered athlete, and non-positive values never qualify.
/// Malformed lines (index out of range, non-numeric field) are skipped.
fn rank_by_field<'a, I>(lines: I, pos: FieldPos) -> Option<(String, u32)>
where
    I: Iterator<Item = (String, &'a [String])>,
{
    let mut best: Option<(String, u32)> = None;
    for (name, stats) in lines {
        let Some(value) = field_value(stats, pos) else { continue };
        if value > best.as_ref().map_or(0, |(_, v)| *v) {
            best = Some((name, value));
        }
    }
    best
}

fn update_running_max(slot: &mut Option<(String, u32)>, name: &str, value: u32) {
    if value > slot.as_ref().map_or(0, |(_, v)| *v) {
        *slot = Some((name.to_owned(), value));
    }
}

fn field_str(stats: &[String], pos: FieldPos) -> Option<&str> {
    match pos {
        FieldPos::At(i) => stats.get(i).map(String::as_str),
        FieldPos::Last => stats.last().map(String::as_str),
    }
}

fn field_value(stats: &[String], pos: FieldPos) -> Option<u32> {
    field_str(stats, pos)?.parse().ok()
}

/// Boxscore lines treat an empty field as 0 (players on the bench have
/// blank columns) while any other unparsable field fails the line.
fn lenient_field(stats: &[String], pos: FieldPos) -> Option<u32> {
    let s = field_str(stats, pos)?;
    if s.is_empty() { Some(0) } else { s.parse().ok() }
}

fn parse_boxscore_line(stats: &[String]) -> Option<(u32, u32, u32)> {
    Some((
        lenient_field(stats, BOXSCORE_BASKETBALL.points)?,
        lenient_field(stats, BOXSCORE_BASKETBALL.rebounds)?,
        lenient_field(stats, BOXSCORE_BASKETBALL.assists)?,
    ))
}

// ---------------------------------------------------------------------------
// Football
// ---------------------------------------------------------------------------

fn football_competitor_leaders(competitor: &EspnCompetitor) -> Option<LeaderSet> {
    let sections = competitor.statistics.as_deref()?;

    let groups = [
        (StatCategory::Passing, "passing", FOOTBALL_PASSING),
        (StatCategory::Receiving, "receiving", FOOTBALL_RECEIVING),
        (StatCategory::Rushing, "rushing", FOOTBALL_RUSHING),
    ];

    let mut leaders = LeaderSet::new();
    // Each section may be independently absent; presence is per-category.
    for (category, group_name, offsets) in groups {
        if let Some(leader) = football_group_leader(sections, group_name, offsets) {
            leaders.insert(category, leader);
        }
    }
    non_empty(leaders)
}

/// The first athlete of a named group is that position's leader — upstream
/// ordering is trusted as rank order, no re-sorting.
fn football_group_leader(
    sections: &[EspnStatGroup],
    group_name: &str,
    offsets: FootballOffsets,
) -> Option<Leader> {
    let group = find_group(sections, group_name)?;
    let first = group.athletes.as_deref()?.first()?;
    let stats = first.stats.as_deref()?;
    if stats.len() < FOOTBALL_MIN_STATS {
        return None;
    }

    // Yards/TD values are relayed verbatim, not re-parsed.
    let yards = &stats[offsets.yards];
    let tds = &stats[offsets.touchdowns];
    Some(Leader {
        name: abbreviate(&full_name(first)),
        stat: LeaderStat::Summary(format!("{yards} YDS, {tds} TD")),
    })
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn find_group<'a>(sections: &'a [EspnStatGroup], name: &str) -> Option<&'a EspnStatGroup> {
    sections.iter().find(|s| s.name.as_deref() == Some(name))
}

/// Compact name for a basketball stat line: shortName when present.
fn stat_line_name(line: &EspnAthleteLine) -> String {
    line.athlete
        .as_ref()
        .and_then(|a| a.short_name.clone().or_else(|| a.display_name.clone()))
        .unwrap_or_else(|| "Unknown".to_owned())
}

fn full_name(line: &EspnAthleteLine) -> String {
    line.athlete
        .as_ref()
        .and_then(|a| a.display_name.clone())
        .unwrap_or_else(|| "Unknown".to_owned())
}

fn non_empty(leaders: LeaderSet) -> Option<LeaderSet> {
    if leaders.is_empty() { None } else { Some(leaders) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn summary(value: Value) -> SummaryResponse {
        serde_json::from_value(value).unwrap()
    }

    fn competitor(value: Value) -> EspnCompetitor {
        serde_json::from_value(value).unwrap()
    }

    /// Boxscore-shaped stat line: 13 columns, REB at 6, AST at 7, PTS last.
    fn box_line(name: &str, pts: &str, reb: &str, ast: &str) -> Value {
        let mut stats: Vec<String> = vec!["0".into(); 13];
        stats[6] = reb.into();
        stats[7] = ast.into();
        stats[12] = pts.into();
        json!({ "athlete": { "displayName": name }, "stats": stats })
    }

    /// Scoreboard-shaped stat line: 16 columns, REB at 10, AST at 11, PTS at 15.
    fn sb_line(name: &str, pts: &str, reb: &str, ast: &str) -> Value {
        let mut stats: Vec<String> = vec!["0".into(); 16];
        stats[10] = reb.into();
        stats[11] = ast.into();
        stats[15] = pts.into();
        json!({ "athlete": { "displayName": name }, "stats": stats })
    }

    fn box_summary(home_away: &str, athletes: Vec<Value>) -> SummaryResponse {
        summary(json!({
            "boxscore": {
                "players": [{
                    "team": { "homeAway": home_away, "abbreviation": "BOS" },
                    "statistics": [{ "name": "starters", "athletes": athletes }]
                }]
            }
        }))
    }

    fn leader(set: &LeaderSet, category: StatCategory) -> &Leader {
        set.get(&category).expect("category should be present")
    }

    #[test]
    fn boxscore_picks_max_per_category() {
        let s = box_summary(
            "home",
            vec![
                box_line("Jayson Tatum", "31", "8", "4"),
                box_line("Derrick White", "18", "3", "9"),
                box_line("Luke Kornet", "6", "11", "1"),
            ],
        );
        let set = SportFamily::Basketball
            .boxscore_leaders(&s, HomeAway::Home)
            .unwrap();
        assert_eq!(leader(&set, StatCategory::Points).name, "Jayson Tatum");
        assert_eq!(leader(&set, StatCategory::Points).stat, LeaderStat::Value(31));
        assert_eq!(leader(&set, StatCategory::Rebounds).name, "Luke Kornet");
        assert_eq!(leader(&set, StatCategory::Assists).name, "Derrick White");
    }

    #[test]
    fn boxscore_prefers_short_name() {
        let line = json!({
            "athlete": { "displayName": "Jayson Tatum", "shortName": "J. Tatum" },
            "stats": ["0","0","0","0","0","0","7","2","0","0","0","0","25"]
        });
        let s = box_summary("home", vec![line]);
        let set = SportFamily::Basketball
            .boxscore_leaders(&s, HomeAway::Home)
            .unwrap();
        assert_eq!(leader(&set, StatCategory::Points).name, "J. Tatum");
    }

    #[test]
    fn boxscore_short_stat_line_contributes_nothing() {
        let short = json!({
            "athlete": { "displayName": "Bench Guy" },
            "stats": ["44", "44", "44", "44"]
        });
        let s = box_summary("home", vec![short, box_line("Al Horford", "12", "5", "2")]);
        let set = SportFamily::Basketball
            .boxscore_leaders(&s, HomeAway::Home)
            .unwrap();
        assert_eq!(leader(&set, StatCategory::Points).name, "Al Horford");
        assert_eq!(leader(&set, StatCategory::Rebounds).name, "Al Horford");
    }

    #[test]
    fn boxscore_tie_keeps_first_encountered() {
        let s = box_summary(
            "home",
            vec![
                box_line("First Scorer", "20", "1", "1"),
                box_line("Second Scorer", "20", "2", "2"),
            ],
        );
        let set = SportFamily::Basketball
            .boxscore_leaders(&s, HomeAway::Home)
            .unwrap();
        assert_eq!(leader(&set, StatCategory::Points).name, "First Scorer");
    }

    #[test]
    fn boxscore_empty_field_reads_as_zero() {
        // Blank points column does not disqualify the rebound total.
        let s = box_summary(
            "home",
            vec![box_line("Role Player", "", "9", "0")],
        );
        let set = SportFamily::Basketball
            .boxscore_leaders(&s, HomeAway::Home)
            .unwrap();
        assert!(set.get(&StatCategory::Points).is_none());
        assert_eq!(leader(&set, StatCategory::Rebounds).stat, LeaderStat::Value(9));
    }

    #[test]
    fn boxscore_non_numeric_field_disqualifies_whole_athlete() {
        let s = box_summary(
            "home",
            vec![
                box_line("Bad Line", "30", "DNP", "5"),
                box_line("Good Line", "10", "4", "3"),
            ],
        );
        let set = SportFamily::Basketball
            .boxscore_leaders(&s, HomeAway::Home)
            .unwrap();
        // 30 points never count because the rebound field was unparsable.
        assert_eq!(leader(&set, StatCategory::Points).name, "Good Line");
    }

    #[test]
    fn boxscore_all_zero_lines_yield_none_not_empty_set() {
        let s = box_summary("home", vec![box_line("Scoreless", "0", "0", "0")]);
        assert_eq!(
            SportFamily::Basketball.boxscore_leaders(&s, HomeAway::Home),
            None
        );
    }

    #[test]
    fn boxscore_missing_side_yields_none() {
        let s = box_summary("home", vec![box_line("Jayson Tatum", "31", "8", "4")]);
        assert_eq!(
            SportFamily::Basketball.boxscore_leaders(&s, HomeAway::Away),
            None
        );
    }

    #[test]
    fn football_boxscore_is_a_permanent_stub() {
        // Whatever the payload looks like, the football boxscore path
        // reports no data.
        let with_groups = summary(json!({
            "boxscore": {
                "players": [{
                    "team": { "homeAway": "home" },
                    "statistics": [{
                        "name": "passing",
                        "athletes": [{
                            "athlete": { "displayName": "Patrick Mahomes" },
                            "stats": ["24/31", "0", "245", "3"]
                        }]
                    }]
                }]
            }
        }));
        assert_eq!(
            SportFamily::Football.boxscore_leaders(&with_groups, HomeAway::Home),
            None
        );
        assert_eq!(
            SportFamily::Football.boxscore_leaders(&SummaryResponse::default(), HomeAway::Away),
            None
        );
    }

    #[test]
    fn scoreboard_basketball_uses_its_own_index_table() {
        let c = competitor(json!({
            "statistics": [{
                "name": "athletes",
                "athletes": [
                    sb_line("LeBron James", "24", "6", "8"),
                    sb_line("Anthony Davis", "19", "12", "2"),
                ]
            }]
        }));
        let set = SportFamily::Basketball.competitor_leaders(&c).unwrap();
        assert_eq!(leader(&set, StatCategory::Points).name, "LeBron James");
        assert_eq!(leader(&set, StatCategory::Rebounds).name, "Anthony Davis");
        assert_eq!(leader(&set, StatCategory::Assists).stat, LeaderStat::Value(8));
    }

    #[test]
    fn scoreboard_short_line_skips_only_missing_categories() {
        // 12 columns: rebounds (10) and assists (11) resolve, points (15)
        // is out of range for this athlete only.
        let mut stats: Vec<String> = vec!["0".into(); 12];
        stats[10] = "14".into();
        stats[11] = "3".into();
        let c = competitor(json!({
            "statistics": [{
                "name": "athletes",
                "athletes": [
                    { "athlete": { "displayName": "Short Line" }, "stats": stats },
                    sb_line("Full Line", "22", "5", "4"),
                ]
            }]
        }));
        let set = SportFamily::Basketball.competitor_leaders(&c).unwrap();
        assert_eq!(leader(&set, StatCategory::Points).name, "Full Line");
        assert_eq!(leader(&set, StatCategory::Rebounds).name, "Short Line");
    }

    #[test]
    fn scoreboard_without_athletes_section_yields_none() {
        let c = competitor(json!({
            "statistics": [{ "name": "totals", "athletes": [] }]
        }));
        assert_eq!(SportFamily::Basketball.competitor_leaders(&c), None);
    }

    #[test]
    fn football_scoreboard_formats_first_athlete_per_group() {
        let c = competitor(json!({
            "statistics": [
                {
                    "name": "passing",
                    "athletes": [
                        {
                            "athlete": { "displayName": "Patrick Mahomes" },
                            "stats": ["24/31", "0", "245", "3"]
                        },
                        {
                            "athlete": { "displayName": "Backup Guy" },
                            "stats": ["1/1", "0", "12", "0"]
                        }
                    ]
                },
                {
                    "name": "rushing",
                    "athletes": [{
                        "athlete": { "displayName": "Isiah Pacheco" },
                        "stats": ["14", "87", "6.2", "1"]
                    }]
                }
            ]
        }));
        let set = SportFamily::Football.competitor_leaders(&c).unwrap();
        let qb = leader(&set, StatCategory::Passing);
        assert_eq!(qb.name, "Mahomes");
        assert_eq!(qb.stat, LeaderStat::Summary("245 YDS, 3 TD".into()));
        let rb = leader(&set, StatCategory::Rushing);
        assert_eq!(rb.stat, LeaderStat::Summary("87 YDS, 1 TD".into()));
        // No receiving section, no WR entry.
        assert!(set.get(&StatCategory::Receiving).is_none());
    }

    #[test]
    fn football_group_with_short_stats_produces_no_entry() {
        let c = competitor(json!({
            "statistics": [{
                "name": "receiving",
                "athletes": [{
                    "athlete": { "displayName": "Travis Kelce" },
                    "stats": ["7", "69"]
                }]
            }]
        }));
        assert_eq!(SportFamily::Football.competitor_leaders(&c), None);
    }

    #[test]
    fn football_empty_group_produces_no_entry() {
        let c = competitor(json!({
            "statistics": [{ "name": "passing", "athletes": [] }]
        }));
        assert_eq!(SportFamily::Football.competitor_leaders(&c), None);
    }
}
