use std::fs;
use std::path::PathBuf;

use chrono::{Duration, Utc};
use putt_terminal::api::parse_duels_json;
use putt_terminal::duels::{
    self, DuelStatus, DuelView, ExpiryDisplay, Outcome, PLACEHOLDER_DASH,
};
use putt_terminal::state::{apply_delta, AppState, Delta};

const VIEWER_ID: u64 = 1;

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

fn fixture_duels() -> Vec<putt_terminal::duels::Duel> {
    parse_duels_json(&read_fixture("duels_list.json")).expect("fixture should parse")
}

#[test]
fn fetched_snapshot_buckets_and_hides_declined() {
    let mut state = AppState::new();
    apply_delta(&mut state, Delta::SetDuels(fixture_duels()));

    assert_eq!(state.buckets.pending.len(), 1);
    assert_eq!(state.buckets.active.len(), 1);
    assert_eq!(state.buckets.completed.len(), 2);
    // The declined record stays in the raw list for transition checks but
    // never reaches a bucket.
    assert_eq!(state.duels.len(), 5);
    assert!(state
        .duels
        .iter()
        .any(|d| d.status == DuelStatus::Declined));
}

#[test]
fn pending_invitation_is_actionable_by_invitee_only() {
    let duels = fixture_duels();
    let pending = &duels[0];

    let mine = DuelView::project(pending, VIEWER_ID);
    assert!(mine.is_my_turn_to_act);
    assert_eq!(mine.opponent, "Marta Keel");

    let theirs = DuelView::project(pending, pending.creator_id);
    assert!(!theirs.is_my_turn_to_act);
    assert_eq!(theirs.opponent, "Alex Doyle");
}

#[test]
fn active_duel_start_gate_follows_submission() {
    let duels = fixture_duels();
    let active = &duels[1];
    assert_eq!(active.status, DuelStatus::Accepted);

    // Creator already submitted; the invitee still owes a session.
    assert!(!DuelView::project(active, active.creator_id).can_start_session);
    assert!(DuelView::project(active, active.invited_player_id).can_start_session);
}

#[test]
fn draw_shows_for_both_players() {
    let duels = fixture_duels();
    let draw = &duels[2];

    let creator = DuelView::project(draw, draw.creator_id);
    let invitee = DuelView::project(draw, draw.invited_player_id);
    assert_eq!(creator.outcome, Some(Outcome::Draw));
    assert_eq!(invitee.outcome, Some(Outcome::Draw));
    assert_eq!(creator.status_label(), "Draw");
    assert_eq!(creator.result_date, "Aug 20, 2026");
    // Recorded durations replace the limit once the duel is resolved.
    assert_eq!(creator.session_length, "5 minutes");
    assert_eq!(invitee.session_length, "5 minutes");
}

#[test]
fn expired_duel_reports_no_outcome() {
    let duels = fixture_duels();
    let expired = &duels[3];
    let view = DuelView::project(expired, VIEWER_ID);
    assert_eq!(view.outcome, None);
    assert_eq!(view.status_label(), "expired");
    assert!(view.can_rematch);
    assert_eq!(view.session_length, PLACEHOLDER_DASH);
}

#[test]
fn rematch_reuses_terms_from_fixture_duel() {
    let duels = fixture_duels();
    let expired = &duels[3];

    let request = duels::rematch_request(expired, VIEWER_ID).expect("expired duel rematches");
    assert_eq!(request.creator_id, VIEWER_ID);
    assert_eq!(request.invited_player_id, expired.creator_id);
    assert_eq!(request.invitation_expiry_minutes, 1440);
    assert_eq!(request.session_duration_limit_minutes, 5);

    // Active duels never offer a rematch.
    assert!(duels::rematch_request(&duels[1], VIEWER_ID).is_none());
}

#[test]
fn expiry_column_switches_at_the_window() {
    let now = Utc::now();
    let mut pending = fixture_duels().swap_remove(0);

    pending.invitation_expires_at = Some((now + Duration::hours(99)).to_rfc3339());
    match duels::expiry_display(&pending, now) {
        ExpiryDisplay::Countdown(end) => {
            let text = duels::format_countdown(end, now);
            assert!(text.starts_with("98h") || text.starts_with("99h"), "{text}");
        }
        other => panic!("expected countdown, got {other:?}"),
    }

    pending.invitation_expires_at = Some((now + Duration::hours(101)).to_rfc3339());
    assert!(matches!(
        duels::expiry_display(&pending, now),
        ExpiryDisplay::Date(_)
    ));
}

#[test]
fn refetch_after_accept_moves_duel_between_buckets() {
    let mut state = AppState::new();
    apply_delta(&mut state, Delta::SetDuels(fixture_duels()));
    assert_eq!(state.buckets.pending.len(), 1);

    // The provider refetches after a successful accept and only then reports
    // success; replay that ordering.
    let mut refreshed = fixture_duels();
    refreshed[0].status = DuelStatus::Accepted;
    state.action_in_flight = true;
    apply_delta(&mut state, Delta::SetDuels(refreshed));
    apply_delta(&mut state, Delta::ActionOk("Duel accepted!".to_string()));

    assert!(state.buckets.pending.is_empty());
    assert_eq!(state.buckets.active.len(), 2);
    assert!(!state.action_in_flight);
    let toast = state.toast.expect("success raises a toast");
    assert_eq!(toast.message, "Duel accepted!");
}

#[test]
fn backend_can_expire_an_accepted_duel() {
    let mut state = AppState::new();
    apply_delta(&mut state, Delta::SetDuels(fixture_duels()));
    assert_eq!(state.buckets.active.len(), 1);

    // The session window lapsed before both players submitted; the backend
    // reports the duel expired on the next refetch.
    let mut refreshed = fixture_duels();
    assert_eq!(refreshed[1].status, DuelStatus::Accepted);
    refreshed[1].status = DuelStatus::Expired;
    apply_delta(&mut state, Delta::SetDuels(refreshed));

    let duel = state.duels.iter().find(|d| d.duel_id == 12).expect("still present");
    assert_eq!(duel.status, DuelStatus::Expired);
    assert!(state.buckets.active.is_empty());
    assert_eq!(state.buckets.completed.len(), 3);
    assert!(!state
        .logs
        .iter()
        .any(|l| l.contains("impossible status change")));
}

#[test]
fn regressed_snapshot_keeps_known_terminal_state() {
    let mut state = AppState::new();
    apply_delta(&mut state, Delta::SetDuels(fixture_duels()));

    // A later snapshot claims the completed draw went back to accepted.
    let mut regressed = fixture_duels();
    regressed[2].status = DuelStatus::Accepted;
    apply_delta(&mut state, Delta::SetDuels(regressed));

    let draw = state.duels.iter().find(|d| d.duel_id == 13).expect("still present");
    assert_eq!(draw.status, DuelStatus::Completed);
    assert!(state
        .logs
        .iter()
        .any(|l| l.contains("impossible status change")));
}
