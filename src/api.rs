use reqwest::blocking::Response;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use crate::duels::{CreateDuelRequest, Duel};
use crate::http_client::{api_base_url, http_client};
use crate::session::{PlayerProfile, SessionsPage};
use crate::state::{
    CareerStats, CoachReply, Conversation, Fundraiser, LeaguesOverview, NotificationItem,
    PlayerSummary, StartSessionAck,
};

/// Failure shapes the presenter distinguishes. Whatever the variant, the
/// display string is what the viewer sees; server-supplied messages pass
/// through verbatim.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Structured error body from the backend.
    #[error("{0}")]
    Server(String),
    /// Non-success status without a parseable error body.
    #[error("HTTP error! status: {0}")]
    Http(u16),
    /// The request never produced a response.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// Success status whose body did not match the expected shape.
    #[error("unexpected response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

fn endpoint(path: &str) -> String {
    format!("{}{path}", api_base_url())
}

fn get(path: &str) -> Result<String, ApiError> {
    get_with_query(path, &[])
}

fn get_with_query(path: &str, query: &[(&str, String)]) -> Result<String, ApiError> {
    let client = http_client()?;
    let mut req = client.get(endpoint(path));
    if !query.is_empty() {
        req = req.query(query);
    }
    read_body(req.send()?)
}

fn post(path: &str, body: &serde_json::Value) -> Result<String, ApiError> {
    let client = http_client()?;
    read_body(client.post(endpoint(path)).json(body).send()?)
}

fn read_body(resp: Response) -> Result<String, ApiError> {
    let status = resp.status();
    let body = resp.text()?;
    if status.is_success() {
        Ok(body)
    } else {
        Err(error_from_body(status.as_u16(), &body))
    }
}

/// Normalizes a non-success response: a JSON body carrying `error` (or
/// `message`) surfaces verbatim, anything else falls back to a generic
/// status-code message.
pub fn error_from_body(status: u16, body: &str) -> ApiError {
    #[derive(Deserialize)]
    struct ErrorBody {
        #[serde(default)]
        error: Option<String>,
        #[serde(default)]
        message: Option<String>,
    }
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body)
        && let Some(msg) = parsed.error.or(parsed.message)
    {
        return ApiError::Server(msg);
    }
    ApiError::Http(status)
}

// --- Auth ---

pub fn login(email: &str, password: &str) -> Result<PlayerProfile, ApiError> {
    let body = post("/login", &json!({ "email": email, "password": password }))?;
    parse_player_profile_json(&body)
}

pub fn register(email: &str, password: &str, name: &str) -> Result<PlayerProfile, ApiError> {
    let body = post(
        "/register",
        &json!({ "email": email, "password": password, "name": name }),
    )?;
    parse_player_profile_json(&body)
}

// --- Player data & sessions ---

pub fn fetch_player_data(player_id: u64) -> Result<PlayerProfile, ApiError> {
    let body = get(&format!("/player/{player_id}/data"))?;
    parse_player_profile_json(&body)
}

pub fn fetch_career_stats(player_id: u64) -> Result<CareerStats, ApiError> {
    let body = get(&format!("/player/{player_id}/career-stats"))?;
    parse_career_stats_json(&body)
}

pub fn fetch_player_sessions(
    player_id: u64,
    page: u32,
    limit: u32,
) -> Result<SessionsPage, ApiError> {
    let body = get_with_query(
        &format!("/player/{player_id}/sessions"),
        &[("page", page.to_string()), ("limit", limit.to_string())],
    )?;
    parse_sessions_page_json(&body)
}

pub fn start_session(
    player_id: u64,
    duel_id: Option<u64>,
    league_round_id: Option<u64>,
) -> Result<StartSessionAck, ApiError> {
    let mut payload = json!({ "player_id": player_id });
    if let Some(duel_id) = duel_id {
        payload["duel_id"] = json!(duel_id);
    }
    if let Some(round_id) = league_round_id {
        payload["league_round_id"] = json!(round_id);
    }
    let body = post("/start-session", &payload)?;
    Ok(serde_json::from_str(&body)?)
}

pub fn search_players(term: &str) -> Result<Vec<PlayerSummary>, ApiError> {
    let body = get_with_query("/players/search", &[("search_term", term.to_string())])?;
    parse_players_json(&body)
}

// --- Duels ---

pub fn list_duels(player_id: u64) -> Result<Vec<Duel>, ApiError> {
    let body = get(&format!("/duels/list/{player_id}"))?;
    parse_duels_json(&body)
}

pub fn create_duel(request: &CreateDuelRequest) -> Result<Duel, ApiError> {
    let body = post(
        "/duels",
        &json!({
            "creator_id": request.creator_id,
            "invited_player_id": request.invited_player_id,
            "invitation_expiry_minutes": request.invitation_expiry_minutes,
            "session_duration_limit_minutes": request.session_duration_limit_minutes,
        }),
    )?;
    Ok(serde_json::from_str(&body)?)
}

pub fn accept_duel(duel_id: u64, player_id: u64) -> Result<Duel, ApiError> {
    let body = post(
        &format!("/duels/{duel_id}/accept"),
        &json!({ "player_id": player_id }),
    )?;
    Ok(serde_json::from_str(&body)?)
}

pub fn reject_duel(duel_id: u64, player_id: u64) -> Result<Duel, ApiError> {
    let body = post(
        &format!("/duels/{duel_id}/reject"),
        &json!({ "player_id": player_id }),
    )?;
    Ok(serde_json::from_str(&body)?)
}

pub fn submit_duel_session(
    duel_id: u64,
    session_id: u64,
    player_id: u64,
    score: i64,
    duration: f64,
) -> Result<(), ApiError> {
    post(
        &format!("/duels/{duel_id}/submit-session"),
        &json!({
            "session_id": session_id,
            "player_id": player_id,
            "score": score,
            "duration": duration,
        }),
    )?;
    Ok(())
}

// --- Leagues ---

pub fn list_leagues(player_id: u64) -> Result<LeaguesOverview, ApiError> {
    let body = get_with_query("/leagues", &[("player_id", player_id.to_string())])?;
    parse_leagues_json(&body)
}

pub fn create_league(
    creator_id: u64,
    name: &str,
    description: &str,
    privacy_type: &str,
) -> Result<(), ApiError> {
    post(
        "/leagues",
        &json!({
            "creator_id": creator_id,
            "name": name,
            "description": description,
            "privacy_type": privacy_type,
            "settings": {},
        }),
    )?;
    Ok(())
}

pub fn join_league(league_id: u64, player_id: u64) -> Result<(), ApiError> {
    post(
        &format!("/leagues/{league_id}/join"),
        &json!({ "player_id": player_id }),
    )?;
    Ok(())
}

pub fn respond_league_invite(
    league_id: u64,
    player_id: u64,
    accept: bool,
) -> Result<(), ApiError> {
    let action = if accept { "accept" } else { "decline" };
    post(
        &format!("/leagues/invites/{league_id}/respond"),
        &json!({ "player_id": player_id, "action": action }),
    )?;
    Ok(())
}

// --- Fundraising ---

pub fn list_fundraisers() -> Result<Vec<Fundraiser>, ApiError> {
    let body = get("/fundraisers")?;
    parse_fundraisers_json(&body)
}

// --- Notifications ---

pub fn list_notifications(
    player_id: u64,
    limit: u32,
    offset: u32,
) -> Result<Vec<NotificationItem>, ApiError> {
    let body = get_with_query(
        &format!("/notifications/{player_id}"),
        &[("limit", limit.to_string()), ("offset", offset.to_string())],
    )?;
    parse_notifications_json(&body)
}

pub fn unread_notifications_count(player_id: u64) -> Result<u64, ApiError> {
    let body = get(&format!("/notifications/{player_id}/unread_count"))?;
    parse_unread_count_json(&body)
}

pub fn mark_notification_read(notification_id: u64, player_id: u64) -> Result<(), ApiError> {
    post(
        &format!("/notifications/{notification_id}/mark_read"),
        &json!({ "player_id": player_id }),
    )?;
    Ok(())
}

pub fn mark_all_notifications_read(player_id: u64) -> Result<(), ApiError> {
    post(
        &format!("/notifications/{player_id}/mark_all_read"),
        &json!({ "player_id": player_id }),
    )?;
    Ok(())
}

// --- AI coach ---

pub fn coach_chat(
    player_id: u64,
    conversation_id: Option<u64>,
    message: &str,
) -> Result<CoachReply, ApiError> {
    let mut payload = json!({ "player_id": player_id, "message": message });
    if let Some(id) = conversation_id {
        payload["conversation_id"] = json!(id);
    }
    let body = post("/coach/chat", &payload)?;
    Ok(serde_json::from_str(&body)?)
}

pub fn list_conversations(player_id: u64) -> Result<Vec<Conversation>, ApiError> {
    let body = get_with_query(
        "/coach/conversations",
        &[("player_id", player_id.to_string())],
    )?;
    Ok(serde_json::from_str(&body)?)
}

// --- Parsing (split out so fixtures can exercise it offline) ---

pub fn parse_player_profile_json(raw: &str) -> Result<PlayerProfile, ApiError> {
    Ok(serde_json::from_str(raw)?)
}

pub fn parse_career_stats_json(raw: &str) -> Result<CareerStats, ApiError> {
    Ok(serde_json::from_str(raw)?)
}

pub fn parse_sessions_page_json(raw: &str) -> Result<SessionsPage, ApiError> {
    Ok(serde_json::from_str(raw)?)
}

pub fn parse_duels_json(raw: &str) -> Result<Vec<Duel>, ApiError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(trimmed)?)
}

pub fn parse_players_json(raw: &str) -> Result<Vec<PlayerSummary>, ApiError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(trimmed)?)
}

pub fn parse_leagues_json(raw: &str) -> Result<LeaguesOverview, ApiError> {
    Ok(serde_json::from_str(raw)?)
}

pub fn parse_fundraisers_json(raw: &str) -> Result<Vec<Fundraiser>, ApiError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(trimmed)?)
}

pub fn parse_notifications_json(raw: &str) -> Result<Vec<NotificationItem>, ApiError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    // Some backend builds wrap the list in `{ "notifications": [...] }`.
    #[derive(Deserialize)]
    struct Wrapped {
        notifications: Vec<NotificationItem>,
    }
    if let Ok(wrapped) = serde_json::from_str::<Wrapped>(trimmed) {
        return Ok(wrapped.notifications);
    }
    Ok(serde_json::from_str(trimmed)?)
}

pub fn parse_unread_count_json(raw: &str) -> Result<u64, ApiError> {
    #[derive(Deserialize)]
    struct UnreadCount {
        #[serde(alias = "count")]
        unread_count: u64,
    }
    let parsed: UnreadCount = serde_json::from_str(raw)?;
    Ok(parsed.unread_count)
}
