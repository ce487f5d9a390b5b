use chrono::{DateTime, Duration as ChronoDuration, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// A pending invitation switches from a live countdown to an absolute date
/// once the deadline is further out than this.
pub const COUNTDOWN_WINDOW_HOURS: i64 = 100;

pub const PLACEHOLDER_DASH: &str = "—";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuelStatus {
    Pending,
    Accepted,
    Declined,
    Completed,
    Expired,
}

impl DuelStatus {
    pub fn label(self) -> &'static str {
        match self {
            DuelStatus::Pending => "pending",
            DuelStatus::Accepted => "accepted",
            DuelStatus::Declined => "declined",
            DuelStatus::Completed => "completed",
            DuelStatus::Expired => "expired",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            DuelStatus::Declined | DuelStatus::Completed | DuelStatus::Expired
        )
    }

    /// Transition table. The backend owns the lifecycle; this is the guard the
    /// client applies before trusting a refetched status for a known duel.
    pub fn can_transition_to(self, next: DuelStatus) -> bool {
        if self == next {
            return true;
        }
        match self {
            DuelStatus::Pending => matches!(
                next,
                DuelStatus::Accepted | DuelStatus::Declined | DuelStatus::Expired
            ),
            DuelStatus::Accepted => matches!(next, DuelStatus::Completed | DuelStatus::Expired),
            DuelStatus::Declined | DuelStatus::Completed | DuelStatus::Expired => false,
        }
    }
}

/// One duel record as the backend reports it. The client never mutates these;
/// it only projects them for display and asks the backend for transitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Duel {
    pub duel_id: u64,
    pub creator_id: u64,
    pub invited_player_id: u64,
    #[serde(default)]
    pub creator_name: String,
    #[serde(default)]
    pub invited_player_name: String,
    pub status: DuelStatus,
    #[serde(default)]
    pub invitation_expiry_minutes: Option<i64>,
    #[serde(default)]
    pub session_duration_limit_minutes: Option<i64>,
    #[serde(default)]
    pub creator_submitted_session_id: Option<u64>,
    #[serde(default)]
    pub invited_player_submitted_session_id: Option<u64>,
    #[serde(default)]
    pub creator_score: Option<i64>,
    #[serde(default)]
    pub invited_player_score: Option<i64>,
    /// Recorded play time in seconds.
    #[serde(default)]
    pub creator_duration: Option<f64>,
    // Older backends report this as `invited_duration`.
    #[serde(default, alias = "invited_duration")]
    pub invited_player_duration: Option<f64>,
    #[serde(default)]
    pub winner_id: Option<u64>,
    #[serde(default)]
    pub invitation_expires_at: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
}

impl Duel {
    pub fn opponent_id(&self, viewer_id: u64) -> u64 {
        if self.creator_id == viewer_id {
            self.invited_player_id
        } else {
            self.creator_id
        }
    }

    pub fn opponent_name(&self, viewer_id: u64) -> &str {
        if self.creator_id == viewer_id {
            &self.invited_player_name
        } else {
            &self.creator_name
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
    Draw,
}

impl Outcome {
    pub fn label(self) -> &'static str {
        match self {
            Outcome::Won => "Won",
            Outcome::Lost => "Lost",
            Outcome::Draw => "Draw",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExpiryDisplay {
    /// Deadline within the countdown window; render a live timer toward it.
    Countdown(DateTime<Utc>),
    /// Deadline too far out, or already elapsed while still pending.
    Date(String),
    None,
}

/// Everything a duel row needs, computed once from the record and the
/// viewer's id. Pure; never touches the server data.
#[derive(Debug, Clone, PartialEq)]
pub struct DuelView {
    pub duel_id: u64,
    pub status: DuelStatus,
    pub opponent: String,
    pub opponent_id: u64,
    pub my_score: Option<i64>,
    pub opponent_score: Option<i64>,
    pub is_my_turn_to_act: bool,
    pub can_start_session: bool,
    pub session_length: String,
    pub outcome: Option<Outcome>,
    pub result_date: String,
    pub can_rematch: bool,
}

impl DuelView {
    pub fn project(duel: &Duel, viewer_id: u64) -> DuelView {
        let is_creator = duel.creator_id == viewer_id;
        let (my_score, opponent_score) = if is_creator {
            (duel.creator_score, duel.invited_player_score)
        } else {
            (duel.invited_player_score, duel.creator_score)
        };
        let my_submitted = if is_creator {
            duel.creator_submitted_session_id.is_some()
        } else {
            duel.invited_player_submitted_session_id.is_some()
        };
        let my_duration = if is_creator {
            duel.creator_duration
        } else {
            duel.invited_player_duration
        };

        let session_length = match duel.status {
            DuelStatus::Pending | DuelStatus::Accepted => duel
                .session_duration_limit_minutes
                .map(format_minutes)
                .unwrap_or_else(|| PLACEHOLDER_DASH.to_string()),
            _ => format_duration_secs(my_duration),
        };

        let outcome = if duel.status == DuelStatus::Completed {
            Some(match duel.winner_id {
                None => Outcome::Draw,
                Some(id) if id == viewer_id => Outcome::Won,
                Some(_) => Outcome::Lost,
            })
        } else {
            None
        };

        let result_date = if duel.status.is_terminal() {
            duel.end_time
                .as_deref()
                .and_then(parse_timestamp)
                .map(format_date)
                .unwrap_or_else(|| PLACEHOLDER_DASH.to_string())
        } else {
            PLACEHOLDER_DASH.to_string()
        };

        DuelView {
            duel_id: duel.duel_id,
            status: duel.status,
            opponent: duel.opponent_name(viewer_id).to_string(),
            opponent_id: duel.opponent_id(viewer_id),
            my_score,
            opponent_score,
            is_my_turn_to_act: duel.status == DuelStatus::Pending
                && duel.invited_player_id == viewer_id,
            can_start_session: duel.status == DuelStatus::Accepted && !my_submitted,
            session_length,
            outcome,
            result_date,
            can_rematch: matches!(duel.status, DuelStatus::Completed | DuelStatus::Expired),
        }
    }

    /// Text for the status column: the outcome from the viewer's perspective
    /// once completed, the raw status otherwise.
    pub fn status_label(&self) -> &'static str {
        match self.outcome {
            Some(outcome) => outcome.label(),
            None => self.status.label(),
        }
    }
}

/// Expiration column content, meaningful only while the invitation is open.
pub fn expiry_display(duel: &Duel, now: DateTime<Utc>) -> ExpiryDisplay {
    if duel.status != DuelStatus::Pending {
        return ExpiryDisplay::None;
    }
    let Some(expires) = duel.invitation_expires_at.as_deref().and_then(parse_timestamp) else {
        return ExpiryDisplay::None;
    };
    let remaining = expires - now;
    if remaining > ChronoDuration::zero()
        && remaining <= ChronoDuration::hours(COUNTDOWN_WINDOW_HOURS)
    {
        ExpiryDisplay::Countdown(expires)
    } else {
        ExpiryDisplay::Date(format_date(expires))
    }
}

pub fn format_countdown(end: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let remaining = (end - now).max(ChronoDuration::zero());
    let total_secs = remaining.num_seconds();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    format!("{hours:02}h {minutes:02}m {seconds:02}s")
}

pub fn format_minutes(minutes: i64) -> String {
    if minutes == 1 {
        "1 minute".to_string()
    } else {
        format!("{minutes} minutes")
    }
}

/// Recorded play time, seconds rounded to the nearest whole minute.
pub fn format_duration_secs(seconds: Option<f64>) -> String {
    match seconds {
        Some(secs) => format_minutes((secs / 60.0).round() as i64),
        None => PLACEHOLDER_DASH.to_string(),
    }
}

pub fn format_date(when: DateTime<Utc>) -> String {
    when.format("%b %-d, %Y").to_string()
}

pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }
    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];
    for fmt in FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(Utc.from_utc_datetime(&dt));
        }
    }
    None
}

/// The three display buckets. Declined duels land in none of them; they stay
/// in the raw list only so transition checks can still see them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DuelBuckets {
    pub pending: Vec<Duel>,
    pub active: Vec<Duel>,
    pub completed: Vec<Duel>,
}

impl DuelBuckets {
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty() && self.active.is_empty() && self.completed.is_empty()
    }
}

pub fn classify(duels: &[Duel]) -> DuelBuckets {
    let mut buckets = DuelBuckets::default();
    for duel in duels {
        match duel.status {
            DuelStatus::Pending => buckets.pending.push(duel.clone()),
            DuelStatus::Accepted => buckets.active.push(duel.clone()),
            DuelStatus::Completed | DuelStatus::Expired => buckets.completed.push(duel.clone()),
            DuelStatus::Declined => {}
        }
    }
    buckets
}

/// Replaces the local duel list with a refetched snapshot, except where the
/// snapshot claims a status the transition table does not allow from what we
/// last saw. Those records keep their previous state and a warning is
/// returned for the log.
pub fn merge_snapshot(current: &[Duel], fetched: Vec<Duel>) -> (Vec<Duel>, Vec<String>) {
    let mut warnings = Vec::new();
    let merged = fetched
        .into_iter()
        .map(|incoming| {
            let Some(known) = current.iter().find(|d| d.duel_id == incoming.duel_id) else {
                return incoming;
            };
            if known.status.can_transition_to(incoming.status) {
                incoming
            } else {
                warnings.push(format!(
                    "duel {}: ignored impossible status change {} -> {}",
                    incoming.duel_id,
                    known.status.label(),
                    incoming.status.label()
                ));
                known.clone()
            }
        })
        .collect();
    (merged, warnings)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateDuelRequest {
    pub creator_id: u64,
    pub invited_player_id: u64,
    pub invitation_expiry_minutes: i64,
    pub session_duration_limit_minutes: i64,
}

/// A rematch is a brand-new duel against the same opponent under the
/// original terms, whoever won. Only resolved duels qualify, and the original
/// terms must be known.
pub fn rematch_request(original: &Duel, viewer_id: u64) -> Option<CreateDuelRequest> {
    if !matches!(
        original.status,
        DuelStatus::Completed | DuelStatus::Expired
    ) {
        return None;
    }
    Some(CreateDuelRequest {
        creator_id: viewer_id,
        invited_player_id: original.opponent_id(viewer_id),
        invitation_expiry_minutes: original.invitation_expiry_minutes?,
        session_duration_limit_minutes: original.session_duration_limit_minutes?,
    })
}

/// Client-side check before a create-duel request is built. Failing this
/// never sends anything over the wire.
pub fn validate_terms(
    opponent: Option<u64>,
    expiry_minutes: i64,
    duration_minutes: i64,
) -> Result<(), String> {
    if opponent.is_none() || expiry_minutes <= 0 || duration_minutes <= 0 {
        return Err("Please select a player and provide valid time limits.".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn duel(status: DuelStatus) -> Duel {
        Duel {
            duel_id: 1,
            creator_id: 10,
            invited_player_id: 20,
            creator_name: "Alice".to_string(),
            invited_player_name: "Bob".to_string(),
            status,
            invitation_expiry_minutes: Some(4320),
            session_duration_limit_minutes: Some(5),
            creator_submitted_session_id: None,
            invited_player_submitted_session_id: None,
            creator_score: None,
            invited_player_score: None,
            creator_duration: None,
            invited_player_duration: None,
            winner_id: None,
            invitation_expires_at: None,
            end_time: None,
        }
    }

    #[test]
    fn transition_table_matches_lifecycle() {
        use DuelStatus::*;
        assert!(Pending.can_transition_to(Accepted));
        assert!(Pending.can_transition_to(Declined));
        assert!(Pending.can_transition_to(Expired));
        assert!(!Pending.can_transition_to(Completed));
        assert!(Accepted.can_transition_to(Completed));
        assert!(Accepted.can_transition_to(Expired));
        assert!(!Accepted.can_transition_to(Pending));
        assert!(!Accepted.can_transition_to(Declined));
        for terminal in [Declined, Completed, Expired] {
            assert!(terminal.is_terminal());
            assert!(terminal.can_transition_to(terminal));
            assert!(!terminal.can_transition_to(Pending));
            assert!(!terminal.can_transition_to(Accepted));
        }
    }

    #[test]
    fn buckets_partition_and_hide_declined() {
        let mut a = duel(DuelStatus::Pending);
        a.duel_id = 1;
        let mut b = duel(DuelStatus::Accepted);
        b.duel_id = 2;
        let mut c = duel(DuelStatus::Completed);
        c.duel_id = 3;
        let mut d = duel(DuelStatus::Expired);
        d.duel_id = 4;
        let mut e = duel(DuelStatus::Declined);
        e.duel_id = 5;

        let buckets = classify(&[a, b, c, d, e]);
        assert_eq!(buckets.pending.len(), 1);
        assert_eq!(buckets.active.len(), 1);
        assert_eq!(buckets.completed.len(), 2);
        let shown: Vec<u64> = buckets
            .pending
            .iter()
            .chain(&buckets.active)
            .chain(&buckets.completed)
            .map(|d| d.duel_id)
            .collect();
        assert_eq!(shown, vec![1, 2, 3, 4]);
    }

    #[test]
    fn projection_selects_by_role() {
        let mut d = duel(DuelStatus::Accepted);
        d.creator_score = Some(31);
        d.invited_player_score = Some(27);
        d.creator_submitted_session_id = Some(900);

        let creator = DuelView::project(&d, 10);
        assert_eq!(creator.opponent, "Bob");
        assert_eq!(creator.opponent_id, 20);
        assert_eq!(creator.my_score, Some(31));
        assert_eq!(creator.opponent_score, Some(27));
        assert!(!creator.can_start_session);

        let invitee = DuelView::project(&d, 20);
        assert_eq!(invitee.opponent, "Alice");
        assert_eq!(invitee.opponent_id, 10);
        assert_eq!(invitee.my_score, Some(27));
        assert_eq!(invitee.opponent_score, Some(31));
        assert!(invitee.can_start_session);
    }

    #[test]
    fn turn_to_act_is_invitee_and_pending_only() {
        let pending = duel(DuelStatus::Pending);
        assert!(DuelView::project(&pending, 20).is_my_turn_to_act);
        assert!(!DuelView::project(&pending, 10).is_my_turn_to_act);
        for status in [
            DuelStatus::Accepted,
            DuelStatus::Declined,
            DuelStatus::Completed,
            DuelStatus::Expired,
        ] {
            let d = duel(status);
            assert!(!DuelView::project(&d, 20).is_my_turn_to_act);
            assert!(!DuelView::project(&d, 10).is_my_turn_to_act);
        }
    }

    #[test]
    fn session_length_shows_limit_until_resolved() {
        let mut d = duel(DuelStatus::Accepted);
        d.session_duration_limit_minutes = Some(10);
        d.creator_duration = Some(125.0);
        assert_eq!(DuelView::project(&d, 10).session_length, "10 minutes");

        d.status = DuelStatus::Completed;
        assert_eq!(DuelView::project(&d, 10).session_length, "2 minutes");
        // Invitee never recorded a duration for this one.
        assert_eq!(DuelView::project(&d, 20).session_length, PLACEHOLDER_DASH);

        d.status = DuelStatus::Pending;
        d.session_duration_limit_minutes = Some(1);
        assert_eq!(DuelView::project(&d, 10).session_length, "1 minute");
        d.session_duration_limit_minutes = None;
        assert_eq!(DuelView::project(&d, 10).session_length, PLACEHOLDER_DASH);
    }

    #[test]
    fn outcome_labels() {
        let mut d = duel(DuelStatus::Completed);
        assert_eq!(DuelView::project(&d, 10).outcome, Some(Outcome::Draw));
        assert_eq!(DuelView::project(&d, 20).outcome, Some(Outcome::Draw));
        d.winner_id = Some(10);
        assert_eq!(DuelView::project(&d, 10).outcome, Some(Outcome::Won));
        assert_eq!(DuelView::project(&d, 20).outcome, Some(Outcome::Lost));
        d.status = DuelStatus::Accepted;
        assert_eq!(DuelView::project(&d, 10).outcome, None);
    }

    #[test]
    fn expiry_picks_countdown_inside_window() {
        let now = Utc::now();
        let mut d = duel(DuelStatus::Pending);

        d.invitation_expires_at = Some((now + ChronoDuration::hours(50)).to_rfc3339());
        assert!(matches!(
            expiry_display(&d, now),
            ExpiryDisplay::Countdown(_)
        ));

        d.invitation_expires_at = Some((now + ChronoDuration::hours(200)).to_rfc3339());
        assert!(matches!(expiry_display(&d, now), ExpiryDisplay::Date(_)));

        // Deadline already passed but the backend still says pending: show the
        // date, never a negative countdown.
        d.invitation_expires_at = Some((now - ChronoDuration::hours(2)).to_rfc3339());
        assert!(matches!(expiry_display(&d, now), ExpiryDisplay::Date(_)));

        d.status = DuelStatus::Accepted;
        assert_eq!(expiry_display(&d, now), ExpiryDisplay::None);
    }

    #[test]
    fn countdown_never_negative() {
        let now = Utc::now();
        assert_eq!(
            format_countdown(now - ChronoDuration::minutes(5), now),
            "00h 00m 00s"
        );
        let end = now + ChronoDuration::hours(49) + ChronoDuration::minutes(30);
        assert_eq!(format_countdown(end, now), "49h 30m 00s");
    }

    #[test]
    fn rematch_carries_original_terms() {
        let mut original = duel(DuelStatus::Completed);
        original.winner_id = Some(20);
        let req = rematch_request(&original, 10).expect("completed duel should rematch");
        assert_eq!(req.creator_id, 10);
        assert_eq!(req.invited_player_id, 20);
        assert_eq!(req.invitation_expiry_minutes, 4320);
        assert_eq!(req.session_duration_limit_minutes, 5);

        // Invitee rematching targets the creator.
        let req = rematch_request(&original, 20).expect("either side can rematch");
        assert_eq!(req.invited_player_id, 10);

        original.status = DuelStatus::Accepted;
        assert!(rematch_request(&original, 10).is_none());
    }

    #[test]
    fn snapshot_merge_rejects_impossible_transitions() {
        let completed = duel(DuelStatus::Completed);
        let mut regressed = completed.clone();
        regressed.status = DuelStatus::Pending;

        let (merged, warnings) = merge_snapshot(&[completed.clone()], vec![regressed]);
        assert_eq!(merged[0].status, DuelStatus::Completed);
        assert_eq!(warnings.len(), 1);

        let mut accepted = completed.clone();
        accepted.status = DuelStatus::Pending;
        let mut now_accepted = accepted.clone();
        now_accepted.status = DuelStatus::Accepted;
        let (merged, warnings) = merge_snapshot(&[accepted], vec![now_accepted]);
        assert_eq!(merged[0].status, DuelStatus::Accepted);
        assert!(warnings.is_empty());
    }

    #[test]
    fn term_validation() {
        assert!(validate_terms(Some(5), 4320, 5).is_ok());
        assert!(validate_terms(None, 4320, 5).is_err());
        assert!(validate_terms(Some(5), 0, 5).is_err());
        assert!(validate_terms(Some(5), 4320, -1).is_err());
    }

    #[test]
    fn timestamps_parse_with_and_without_offset() {
        assert!(parse_timestamp("2026-03-01T12:30:00Z").is_some());
        assert!(parse_timestamp("2026-03-01T12:30:00+08:00").is_some());
        assert!(parse_timestamp("2026-03-01 12:30:00").is_some());
        assert!(parse_timestamp("not a date").is_none());
        assert!(parse_timestamp("").is_none());
    }
}
