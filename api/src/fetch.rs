/// Live-game discovery: fetch the league scoreboard, keep in-progress
/// events, and normalize each into a `NormalizedGame` with stat leaders.
use crate::client::StatsProvider;
use crate::espn::{EspnCompetitor, EspnEvent, ScoreboardResponse, SummaryResponse};
use crate::{HomeAway, LeagueKey, NormalizedGame};
use chrono::Local;
use log::{debug, info, warn};
use std::time::Duration;

const ESPN_SUMMARY_API: &str = "https://site.web.api.espn.com/apis/site/v2/sports";

/// Freshness window for live data. The provider owns the caching mechanics;
/// this module only picks how stale a live payload may be.
const LIVE_TTL: Duration = Duration::from_secs(60);

/// Upstream status-state marker for an in-progress game.
const STATE_IN_PROGRESS: &str = "in";

/// Live stat-leader feed over some `StatsProvider`.
pub struct LeaderFeed<P> {
    provider: P,
}

impl<P: StatsProvider> LeaderFeed<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Fetch the league's in-progress games, bounded by `max_games`, with
    /// stat leaders extracted per team. Never errors: upstream failures
    /// degrade to an empty list and a failed event is dropped whole.
    pub async fn fetch_live_games(
        &self,
        league: LeagueKey,
        max_games: usize,
    ) -> Vec<NormalizedGame> {
        let (sport, slug) = league.sport_path();
        let date = Local::now().format("%Y%m%d");
        let cache_key = format!("live_stats_{league}_{date}");

        let Some(raw) = self
            .provider
            .fetch_scoreboard(sport, slug, &cache_key, LIVE_TTL)
            .await
        else {
            warn!("no scoreboard data for {league}");
            return Vec::new();
        };

        let scoreboard: ScoreboardResponse = match serde_json::from_value(raw) {
            Ok(scoreboard) => scoreboard,
            Err(err) => {
                warn!("scoreboard for {league} did not parse: {err}");
                return Vec::new();
            }
        };

        let events = scoreboard.events.unwrap_or_default();
        debug!("processing {} events for {league}", events.len());

        let mut live_games = Vec::new();
        for event in &events {
            if live_games.len() >= max_games {
                info!("reached max_games limit ({max_games}) for {league}");
                break;
            }

            let state = event
                .status
                .as_ref()
                .and_then(|s| s.status_type.as_ref())
                .and_then(|t| t.state.as_deref());
            if state != Some(STATE_IN_PROGRESS) {
                continue;
            }

            if let Some(game) = self.parse_event(event, league).await {
                debug!(
                    "parsed live game: {} @ {}, home_leaders: {}, away_leaders: {}",
                    game.away_abbr,
                    game.home_abbr,
                    game.home_leaders.is_some(),
                    game.away_leaders.is_some()
                );
                live_games.push(game);
            }
        }

        info!(
            "found {} live games in {league} (out of {} events, max={max_games})",
            live_games.len(),
            events.len()
        );
        live_games
    }

    /// Normalize one event. Parsing is atomic: an event that cannot resolve
    /// a home/away pair is dropped, never partially emitted.
    async fn parse_event(&self, event: &EspnEvent, league: LeagueKey) -> Option<NormalizedGame> {
        let competition = event.competitions.as_deref()?.first()?;
        let competitors = competition.competitors.as_deref()?;
        if competitors.len() < 2 {
            return None;
        }

        let home = find_side(competitors, HomeAway::Home)?;
        let away = find_side(competitors, HomeAway::Away)?;

        let status = event.status.as_ref();
        let mut game = NormalizedGame {
            id: event.id.clone().unwrap_or_default(),
            home_abbr: team_abbr(home, "HOME"),
            away_abbr: team_abbr(away, "AWAY"),
            home_score: parse_score(home),
            away_score: parse_score(away),
            period: status.and_then(|s| s.period).unwrap_or(0),
            clock: status
                .and_then(|s| s.display_clock.clone())
                .unwrap_or_default(),
            period_text: status
                .and_then(|s| s.status_type.as_ref())
                .and_then(|t| t.short_detail.clone())
                .unwrap_or_default(),
            home_leaders: None,
            away_leaders: None,
        };

        let family = league.family();
        let boxscore = match event.id.as_deref() {
            Some(event_id) => self.fetch_boxscore(event_id, league).await,
            None => None,
        };

        match boxscore {
            Some(summary) => {
                game.home_leaders = family.boxscore_leaders(&summary, HomeAway::Home);
                game.away_leaders = family.boxscore_leaders(&summary, HomeAway::Away);
            }
            // No boxscore (or no event id): fall back to the coarse
            // competitor statistics already on the scoreboard.
            None => {
                game.home_leaders = family.competitor_leaders(home);
                game.away_leaders = family.competitor_leaders(away);
            }
        }

        Some(game)
    }

    async fn fetch_boxscore(&self, event_id: &str, league: LeagueKey) -> Option<SummaryResponse> {
        let (sport, slug) = league.sport_path();
        let url = format!("{ESPN_SUMMARY_API}/{sport}/{slug}/summary");
        let params = [("event".to_owned(), event_id.to_owned())];
        let cache_key = format!("boxscore_{league}_{event_id}");

        let raw = self.provider.get(&url, &params, &cache_key, LIVE_TTL).await?;
        match serde_json::from_value(raw) {
            Ok(summary) => Some(summary),
            Err(err) => {
                debug!("boxscore for event {event_id} did not parse: {err}");
                None
            }
        }
    }
}

fn find_side(competitors: &[EspnCompetitor], side: HomeAway) -> Option<&EspnCompetitor> {
    competitors
        .iter()
        .find(|c| c.home_away.as_deref() == Some(side.as_str()))
}

fn team_abbr(competitor: &EspnCompetitor, fallback: &str) -> String {
    competitor
        .team
        .as_ref()
        .and_then(|t| t.abbreviation.clone())
        .unwrap_or_else(|| fallback.to_owned())
}

fn parse_score(competitor: &EspnCompetitor) -> u16 {
    competitor
        .score
        .as_deref()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0)
}
