use std::fs;
use std::path::PathBuf;

use putt_terminal::api::{
    error_from_body, parse_duels_json, parse_leagues_json, parse_notifications_json,
    parse_player_profile_json, parse_players_json, parse_sessions_page_json,
    parse_unread_count_json, ApiError,
};
use putt_terminal::duels::DuelStatus;

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn parses_duels_fixture() {
    let raw = read_fixture("duels_list.json");
    let duels = parse_duels_json(&raw).expect("fixture should parse");
    assert_eq!(duels.len(), 5);

    assert_eq!(duels[0].status, DuelStatus::Pending);
    assert_eq!(duels[0].invited_player_id, 1);
    assert_eq!(
        duels[0].invitation_expires_at.as_deref(),
        Some("2026-09-01T10:00:00Z")
    );

    // Draw: both scores present, winner_id explicitly null.
    let draw = &duels[2];
    assert_eq!(draw.status, DuelStatus::Completed);
    assert_eq!(draw.creator_score, Some(27));
    assert_eq!(draw.invited_player_score, Some(27));
    assert!(draw.winner_id.is_none());
    // `invited_duration` is the older wire name for the invitee's duration.
    assert_eq!(draw.invited_player_duration, Some(301.5));

    assert_eq!(duels[3].status, DuelStatus::Expired);
    assert_eq!(duels[4].status, DuelStatus::Declined);
}

#[test]
fn duels_null_and_empty_are_empty() {
    assert!(parse_duels_json("null").expect("null parses").is_empty());
    assert!(parse_duels_json("  ").expect("blank parses").is_empty());
    assert!(parse_duels_json("[]").expect("empty list parses").is_empty());
}

#[test]
fn unknown_duel_status_is_rejected() {
    let raw = r#"[{ "duel_id": 1, "creator_id": 1, "invited_player_id": 2, "status": "haggling" }]"#;
    assert!(matches!(parse_duels_json(raw), Err(ApiError::Decode(_))));
}

#[test]
fn parses_player_profile_fixture() {
    let raw = read_fixture("player_profile.json");
    let profile = parse_player_profile_json(&raw).expect("fixture should parse");
    assert_eq!(profile.player_id, 1);
    assert!(profile.has_full_access());
    assert_eq!(profile.sessions.len(), 2);
    // `start_time` and `timestamp` both land in the same field.
    assert_eq!(
        profile.sessions[0].timestamp.as_deref(),
        Some("2026-08-27T19:30:00Z")
    );
    assert_eq!(
        profile.sessions[1].timestamp.as_deref(),
        Some("2026-08-26T18:10:00Z")
    );
    let stats = profile.stats.expect("profile carries stats");
    let accuracy = stats.accuracy_percent().expect("accuracy from totals");
    assert!((accuracy - 71.87).abs() < 0.1);
}

#[test]
fn parses_players_search_fixture() {
    let raw = read_fixture("players_search.json");
    let players = parse_players_json(&raw).expect("fixture should parse");
    assert_eq!(players.len(), 3);
    assert_eq!(players[0].name, "Marta Keel");
    assert_eq!(players[1].email, None);
    assert_eq!(players[2].email, None);
}

#[test]
fn parses_leagues_fixture() {
    let raw = read_fixture("leagues.json");
    let overview = parse_leagues_json(&raw).expect("fixture should parse");
    assert_eq!(overview.my_leagues.len(), 1);
    assert_eq!(overview.public_leagues.len(), 2);
    assert_eq!(overview.pending_invites.len(), 1);
    assert_eq!(
        overview.pending_invites[0].inviter_name.as_deref(),
        Some("Marta Keel")
    );
}

#[test]
fn parses_sessions_page_fixture() {
    let raw = read_fixture("sessions_page.json");
    let page = parse_sessions_page_json(&raw).expect("fixture should parse");
    assert_eq!(page.sessions.len(), 3);
    assert_eq!(page.total_pages, 4);
    assert_eq!(page.sessions[0].session_id, 510);
    assert_eq!(page.sessions[0].total_putts, Some(80));
}

#[test]
fn parses_wrapped_notifications_fixture() {
    let raw = read_fixture("notifications_wrapped.json");
    let items = parse_notifications_json(&raw).expect("fixture should parse");
    assert_eq!(items.len(), 2);
    assert!(items[0].is_unread());
    assert!(!items[1].is_unread());

    // A bare list works too.
    let bare = r#"[{ "notification_id": 9, "message": "hi" }]"#;
    let items = parse_notifications_json(bare).expect("bare list parses");
    assert_eq!(items.len(), 1);
    assert!(items[0].is_unread());
}

#[test]
fn unread_count_accepts_both_field_names() {
    assert_eq!(
        parse_unread_count_json(r#"{ "unread_count": 3 }"#).expect("parses"),
        3
    );
    assert_eq!(
        parse_unread_count_json(r#"{ "count": 7 }"#).expect("parses"),
        7
    );
}

#[test]
fn structured_error_body_surfaces_verbatim() {
    let err = error_from_body(403, r#"{ "error": "Duel already resolved." }"#);
    assert_eq!(err.to_string(), "Duel already resolved.");

    let err = error_from_body(400, r#"{ "message": "Bad terms" }"#);
    assert_eq!(err.to_string(), "Bad terms");
}

#[test]
fn malformed_error_body_falls_back_to_status() {
    let err = error_from_body(502, "<html>bad gateway</html>");
    assert_eq!(err.to_string(), "HTTP error! status: 502");

    let err = error_from_body(404, r#"{ "detail": "nope" }"#);
    assert_eq!(err.to_string(), "HTTP error! status: 404");
}
