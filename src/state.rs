use std::collections::VecDeque;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::duels::{self, CreateDuelRequest, Duel, DuelBuckets};
use crate::session::{PlayerProfile, SessionContext, SessionSummary};

const LOG_CAPACITY: usize = 200;

// --- Wire types shared with the API client ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub player_id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct League {
    pub league_id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub privacy_type: Option<String>,
    #[serde(default)]
    pub member_count: Option<i64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub inviter_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeaguesOverview {
    #[serde(default)]
    pub my_leagues: Vec<League>,
    #[serde(default)]
    pub public_leagues: Vec<League>,
    #[serde(default)]
    pub pending_invites: Vec<League>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationItem {
    pub notification_id: u64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl NotificationItem {
    pub fn is_unread(&self) -> bool {
        self.status.as_deref() != Some("read")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fundraiser {
    pub fundraiser_id: u64,
    #[serde(default, alias = "title")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub goal_amount: Option<f64>,
    #[serde(default, alias = "amount_raised")]
    pub raised_amount: Option<f64>,
    #[serde(default)]
    pub status: Option<String>,
}

impl Fundraiser {
    pub fn progress_percent(&self) -> Option<f64> {
        let goal = self.goal_amount?;
        if goal <= 0.0 {
            return None;
        }
        Some((self.raised_amount.unwrap_or(0.0) / goal * 100.0).min(100.0))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CareerStats {
    #[serde(default)]
    pub player_name: Option<String>,
    #[serde(default)]
    pub total_sessions: Option<i64>,
    #[serde(default)]
    pub total_makes: Option<i64>,
    #[serde(default)]
    pub total_misses: Option<i64>,
    #[serde(default)]
    pub best_streak: Option<i64>,
    #[serde(default)]
    pub fastest_21_makes: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StartSessionAck {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoachReply {
    #[serde(default)]
    pub conversation_id: Option<u64>,
    #[serde(default, alias = "response", alias = "message")]
    pub reply: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub conversation_id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

// --- UI structure ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Auth,
    Dashboard,
    Duels,
    Leagues,
    Sessions,
    Notifications,
    Fundraising,
    Coach,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuelSection {
    Pending,
    Active,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeagueSection {
    Mine,
    Public,
    Invites,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Register,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthField {
    Email,
    Name,
    Password,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateDuelField {
    Search,
    ExpiryHours,
    DurationMinutes,
}

#[derive(Debug, Clone)]
pub struct CreateDuelForm {
    pub search_term: String,
    pub results: Vec<PlayerSummary>,
    pub result_selected: usize,
    pub chosen: Option<PlayerSummary>,
    pub expiry_hours: i64,
    pub duration_minutes: i64,
    pub field: CreateDuelField,
    pub error: Option<String>,
}

impl Default for CreateDuelForm {
    fn default() -> Self {
        // Same defaults the create-duel dialog has always offered.
        Self {
            search_term: String::new(),
            results: Vec::new(),
            result_selected: 0,
            chosen: None,
            expiry_hours: 72,
            duration_minutes: 5,
            field: CreateDuelField::Search,
            error: None,
        }
    }
}

impl CreateDuelForm {
    pub fn request(&self, creator_id: u64) -> Result<CreateDuelRequest, String> {
        let opponent = self.chosen.as_ref().map(|p| p.player_id);
        duels::validate_terms(opponent, self.expiry_hours * 60, self.duration_minutes)?;
        Ok(CreateDuelRequest {
            creator_id,
            invited_player_id: opponent.unwrap_or_default(),
            invitation_expiry_minutes: self.expiry_hours * 60,
            session_duration_limit_minutes: self.duration_minutes,
        })
    }
}

/// Overlay for picking which recorded session to submit against a duel.
#[derive(Debug, Clone)]
pub struct SessionPicker {
    pub duel_id: u64,
    pub selected: usize,
}

#[derive(Debug, Clone)]
pub struct CoachMessage {
    pub from_coach: bool,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub is_error: bool,
    pub raised_at: Instant,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub session: SessionContext,
    pub screen: Screen,
    pub help_overlay: bool,
    pub logs: VecDeque<String>,
    pub toast: Option<Toast>,
    /// A duel lifecycle request is on the wire; its trigger keys are inert
    /// until the provider reports back.
    pub action_in_flight: bool,

    // Auth form
    pub auth_mode: AuthMode,
    pub auth_email: String,
    pub auth_name: String,
    pub auth_password: String,
    pub auth_field: AuthField,
    pub auth_error: Option<String>,
    pub auth_in_flight: bool,

    // Duels
    pub duels: Vec<Duel>,
    pub buckets: DuelBuckets,
    pub duels_loading: bool,
    pub duel_section: DuelSection,
    pub duel_selected: usize,
    pub create_duel: Option<CreateDuelForm>,
    pub session_picker: Option<SessionPicker>,
    pub career_overlay: Option<CareerStats>,

    // Leagues
    pub leagues: LeaguesOverview,
    pub leagues_loading: bool,
    pub league_section: LeagueSection,
    pub league_selected: usize,
    /// Name being typed into the create-league prompt, when it is open.
    pub create_league_name: Option<String>,

    // Session history
    pub sessions: Vec<SessionSummary>,
    pub sessions_page: u32,
    pub sessions_total_pages: u32,
    pub sessions_loading: bool,
    pub session_selected: usize,

    // Notifications
    pub notifications: Vec<NotificationItem>,
    pub unread_count: u64,
    pub notifications_loading: bool,
    pub notification_selected: usize,

    // Fundraising
    pub fundraisers: Vec<Fundraiser>,
    pub fundraisers_loading: bool,
    pub fundraiser_selected: usize,

    // Coach
    pub coach_messages: Vec<CoachMessage>,
    pub coach_input: String,
    pub coach_conversation_id: Option<u64>,
    pub coach_conversations: Vec<Conversation>,
    pub coach_waiting: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            session: SessionContext::default(),
            screen: Screen::Auth,
            help_overlay: false,
            logs: VecDeque::with_capacity(LOG_CAPACITY),
            toast: None,
            action_in_flight: false,
            auth_mode: AuthMode::Login,
            auth_email: String::new(),
            auth_name: String::new(),
            auth_password: String::new(),
            auth_field: AuthField::Email,
            auth_error: None,
            auth_in_flight: false,
            duels: Vec::new(),
            buckets: DuelBuckets::default(),
            duels_loading: false,
            duel_section: DuelSection::Pending,
            duel_selected: 0,
            create_duel: None,
            session_picker: None,
            career_overlay: None,
            leagues: LeaguesOverview::default(),
            leagues_loading: false,
            league_section: LeagueSection::Mine,
            league_selected: 0,
            create_league_name: None,
            sessions: Vec::new(),
            sessions_page: 1,
            sessions_total_pages: 1,
            sessions_loading: false,
            session_selected: 0,
            notifications: Vec::new(),
            unread_count: 0,
            notifications_loading: false,
            notification_selected: 0,
            fundraisers: Vec::new(),
            fundraisers_loading: false,
            fundraiser_selected: 0,
            coach_messages: Vec::new(),
            coach_input: String::new(),
            coach_conversation_id: None,
            coach_conversations: Vec::new(),
            coach_waiting: false,
        }
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        if self.logs.len() >= LOG_CAPACITY {
            self.logs.pop_front();
        }
        self.logs.push_back(msg.into());
    }

    pub fn raise_toast(&mut self, message: impl Into<String>, is_error: bool) {
        self.toast = Some(Toast {
            message: message.into(),
            is_error,
            raised_at: Instant::now(),
        });
    }

    pub fn maybe_clear_toast(&mut self, now: Instant, keep_secs: u64) {
        if let Some(toast) = &self.toast
            && now.duration_since(toast.raised_at).as_secs() >= keep_secs
        {
            self.toast = None;
        }
    }

    pub fn duel_section_list(&self, section: DuelSection) -> &[Duel] {
        match section {
            DuelSection::Pending => &self.buckets.pending,
            DuelSection::Active => &self.buckets.active,
            DuelSection::Completed => &self.buckets.completed,
        }
    }

    pub fn selected_duel(&self) -> Option<&Duel> {
        self.duel_section_list(self.duel_section).get(self.duel_selected)
    }

    pub fn cycle_duel_section(&mut self) {
        self.duel_section = match self.duel_section {
            DuelSection::Pending => DuelSection::Active,
            DuelSection::Active => DuelSection::Completed,
            DuelSection::Completed => DuelSection::Pending,
        };
        self.duel_selected = 0;
    }

    pub fn cycle_league_section(&mut self) {
        self.league_section = match self.league_section {
            LeagueSection::Mine => LeagueSection::Public,
            LeagueSection::Public => LeagueSection::Invites,
            LeagueSection::Invites => LeagueSection::Mine,
        };
        self.league_selected = 0;
    }

    pub fn league_section_list(&self, section: LeagueSection) -> &[League] {
        match section {
            LeagueSection::Mine => &self.leagues.my_leagues,
            LeagueSection::Public => &self.leagues.public_leagues,
            LeagueSection::Invites => &self.leagues.pending_invites,
        }
    }

    pub fn selected_league(&self) -> Option<&League> {
        self.league_section_list(self.league_section)
            .get(self.league_selected)
    }

    fn current_list_len(&self) -> usize {
        match self.screen {
            Screen::Duels => self.duel_section_list(self.duel_section).len(),
            Screen::Leagues => self.league_section_list(self.league_section).len(),
            Screen::Sessions => self.sessions.len(),
            Screen::Notifications => self.notifications.len(),
            Screen::Fundraising => self.fundraisers.len(),
            _ => 0,
        }
    }

    fn current_selected_mut(&mut self) -> Option<&mut usize> {
        match self.screen {
            Screen::Duels => Some(&mut self.duel_selected),
            Screen::Leagues => Some(&mut self.league_selected),
            Screen::Sessions => Some(&mut self.session_selected),
            Screen::Notifications => Some(&mut self.notification_selected),
            Screen::Fundraising => Some(&mut self.fundraiser_selected),
            _ => None,
        }
    }

    pub fn select_next(&mut self) {
        let len = self.current_list_len();
        if let Some(selected) = self.current_selected_mut()
            && len > 0
        {
            *selected = (*selected + 1).min(len - 1);
        }
    }

    pub fn select_prev(&mut self) {
        if let Some(selected) = self.current_selected_mut() {
            *selected = selected.saturating_sub(1);
        }
    }

    fn clamp_selections(&mut self) {
        self.duel_selected = clamp_index(
            self.duel_selected,
            self.duel_section_list(self.duel_section).len(),
        );
        self.league_selected = clamp_index(
            self.league_selected,
            self.league_section_list(self.league_section).len(),
        );
        self.session_selected = clamp_index(self.session_selected, self.sessions.len());
        self.notification_selected =
            clamp_index(self.notification_selected, self.notifications.len());
        self.fundraiser_selected = clamp_index(self.fundraiser_selected, self.fundraisers.len());
    }
}

fn clamp_index(idx: usize, len: usize) -> usize {
    if len == 0 { 0 } else { idx.min(len - 1) }
}

// --- Messages between the UI thread and the provider thread ---

#[derive(Debug, Clone)]
pub enum ProviderCommand {
    Login {
        email: String,
        password: String,
    },
    Register {
        email: String,
        password: String,
        name: String,
    },
    FetchPlayerData {
        player_id: u64,
    },
    FetchCareerStats {
        player_id: u64,
    },
    FetchDuels {
        player_id: u64,
    },
    CreateDuel {
        request: CreateDuelRequest,
        success_message: String,
    },
    AcceptDuel {
        duel_id: u64,
        player_id: u64,
    },
    RejectDuel {
        duel_id: u64,
        player_id: u64,
    },
    StartSession {
        player_id: u64,
        duel_id: Option<u64>,
    },
    SubmitDuelSession {
        duel_id: u64,
        session_id: u64,
        player_id: u64,
        score: i64,
        /// Seconds, matching the duel's stored durations.
        duration: f64,
    },
    SearchPlayers {
        term: String,
        requester_id: u64,
    },
    FetchLeagues {
        player_id: u64,
    },
    CreateLeague {
        creator_id: u64,
        name: String,
        description: String,
        privacy_type: String,
    },
    JoinLeague {
        league_id: u64,
        player_id: u64,
    },
    RespondLeagueInvite {
        league_id: u64,
        player_id: u64,
        accept: bool,
    },
    FetchSessions {
        player_id: u64,
        page: u32,
    },
    FetchNotifications {
        player_id: u64,
    },
    MarkNotificationRead {
        notification_id: u64,
        player_id: u64,
    },
    MarkAllNotificationsRead {
        player_id: u64,
    },
    FetchFundraisers,
    CoachChat {
        player_id: u64,
        conversation_id: Option<u64>,
        message: String,
    },
    FetchConversations {
        player_id: u64,
    },
}

#[derive(Debug, Clone)]
pub enum Delta {
    SignedIn(PlayerProfile),
    AuthFailed(String),
    SetPlayerData(PlayerProfile),
    SetCareerStats(CareerStats),
    SetDuels(Vec<Duel>),
    SetSearchResults {
        term: String,
        players: Vec<PlayerSummary>,
    },
    SetLeagues(LeaguesOverview),
    SetSessions {
        page: u32,
        total_pages: u32,
        sessions: Vec<SessionSummary>,
    },
    SetNotifications(Vec<NotificationItem>),
    SetUnreadCount(u64),
    SetFundraisers(Vec<Fundraiser>),
    SetConversations(Vec<Conversation>),
    CoachReplyReceived {
        conversation_id: Option<u64>,
        reply: String,
    },
    ActionOk(String),
    ActionFailed(String),
    Log(String),
}

/// The single place UI state mutates in response to the provider. Failures
/// never touch the fetched lists: classification only changes when a fresh
/// snapshot arrives.
pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::SignedIn(profile) => {
            state.push_log(format!("[INFO] Signed in as {}", profile.name));
            state.session.sign_in(profile);
            state.screen = Screen::Dashboard;
            state.auth_in_flight = false;
            state.auth_error = None;
            state.auth_password.clear();
        }
        Delta::AuthFailed(message) => {
            state.auth_in_flight = false;
            state.auth_error = Some(message);
        }
        Delta::SetPlayerData(profile) => {
            if state.session.player_id() == Some(profile.player_id) {
                state.session.sign_in(profile);
            }
        }
        Delta::SetCareerStats(stats) => {
            state.career_overlay = Some(stats);
        }
        Delta::SetDuels(fetched) => {
            state.duels_loading = false;
            let (merged, warnings) = duels::merge_snapshot(&state.duels, fetched);
            for warning in warnings {
                state.push_log(format!("[WARN] {warning}"));
            }
            state.buckets = duels::classify(&merged);
            state.duels = merged;
            state.clamp_selections();
        }
        Delta::SetSearchResults { term, players } => {
            if let Some(form) = &mut state.create_duel
                && form.search_term == term
            {
                form.results = players;
                form.result_selected = 0;
            }
        }
        Delta::SetLeagues(overview) => {
            state.leagues = overview;
            state.leagues_loading = false;
            state.clamp_selections();
        }
        Delta::SetSessions {
            page,
            total_pages,
            sessions,
        } => {
            state.sessions = sessions;
            state.sessions_page = page;
            state.sessions_total_pages = total_pages.max(1);
            state.sessions_loading = false;
            state.clamp_selections();
        }
        Delta::SetNotifications(items) => {
            state.notifications = items;
            state.notifications_loading = false;
            state.clamp_selections();
        }
        Delta::SetUnreadCount(count) => {
            state.unread_count = count;
        }
        Delta::SetFundraisers(items) => {
            state.fundraisers = items;
            state.fundraisers_loading = false;
            state.clamp_selections();
        }
        Delta::SetConversations(items) => {
            state.coach_conversations = items;
        }
        Delta::CoachReplyReceived {
            conversation_id,
            reply,
        } => {
            state.coach_waiting = false;
            if conversation_id.is_some() {
                state.coach_conversation_id = conversation_id;
            }
            state.coach_messages.push(CoachMessage {
                from_coach: true,
                text: reply,
            });
        }
        Delta::ActionOk(message) => {
            state.action_in_flight = false;
            state.create_duel = None;
            state.session_picker = None;
            state.create_league_name = None;
            state.push_log(format!("[INFO] {message}"));
            state.raise_toast(message, false);
        }
        Delta::ActionFailed(message) => {
            state.action_in_flight = false;
            state.coach_waiting = false;
            state.push_log(format!("[WARN] {message}"));
            if let Some(form) = &mut state.create_duel {
                form.error = Some(message);
            } else {
                state.raise_toast(message, true);
            }
        }
        Delta::Log(message) => state.push_log(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duels::DuelStatus;

    fn pending_duel(id: u64) -> Duel {
        Duel {
            duel_id: id,
            creator_id: 1,
            invited_player_id: 2,
            creator_name: "Alice".to_string(),
            invited_player_name: "Bob".to_string(),
            status: DuelStatus::Pending,
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
    fn set_duels_reclassifies() {
        let mut state = AppState::new();
        let mut accepted = pending_duel(1);
        accepted.status = DuelStatus::Accepted;
        apply_delta(
            &mut state,
            Delta::SetDuels(vec![pending_duel(2), accepted]),
        );
        assert_eq!(state.buckets.pending.len(), 1);
        assert_eq!(state.buckets.active.len(), 1);
        assert!(state.buckets.completed.is_empty());
    }

    #[test]
    fn set_duels_rejects_impossible_status_change() {
        let mut state = AppState::new();
        let mut completed = pending_duel(1);
        completed.status = DuelStatus::Completed;
        apply_delta(&mut state, Delta::SetDuels(vec![completed]));

        apply_delta(&mut state, Delta::SetDuels(vec![pending_duel(1)]));
        assert_eq!(state.duels[0].status, DuelStatus::Completed);
        assert!(state.logs.iter().any(|l| l.starts_with("[WARN]")));
    }

    #[test]
    fn failed_action_keeps_classification_and_surfaces_message() {
        let mut state = AppState::new();
        apply_delta(&mut state, Delta::SetDuels(vec![pending_duel(1)]));
        state.action_in_flight = true;

        apply_delta(
            &mut state,
            Delta::ActionFailed("Duel already resolved.".to_string()),
        );
        assert!(!state.action_in_flight);
        assert_eq!(state.buckets.pending.len(), 1);
        let toast = state.toast.expect("failure should raise a toast");
        assert!(toast.is_error);
        assert_eq!(toast.message, "Duel already resolved.");
    }

    #[test]
    fn failed_action_lands_in_open_create_form() {
        let mut state = AppState::new();
        state.create_duel = Some(CreateDuelForm::default());
        apply_delta(&mut state, Delta::ActionFailed("No such player.".to_string()));
        let form = state.create_duel.expect("form stays open on failure");
        assert_eq!(form.error.as_deref(), Some("No such player."));
        assert!(state.toast.is_none());
    }

    #[test]
    fn successful_action_closes_overlays() {
        let mut state = AppState::new();
        state.create_duel = Some(CreateDuelForm::default());
        state.action_in_flight = true;
        apply_delta(&mut state, Delta::ActionOk("Challenge Sent".to_string()));
        assert!(state.create_duel.is_none());
        assert!(!state.action_in_flight);
        let toast = state.toast.expect("success raises a toast");
        assert!(!toast.is_error);
    }

    #[test]
    fn sign_in_moves_to_dashboard_and_clears_password() {
        let mut state = AppState::new();
        state.auth_password = "secret".to_string();
        state.auth_in_flight = true;
        apply_delta(
            &mut state,
            Delta::SignedIn(PlayerProfile {
                player_id: 9,
                name: "Cara".to_string(),
                email: "cara@example.com".to_string(),
                subscription_status: Some("active".to_string()),
                timezone: None,
                stats: None,
                sessions: Vec::new(),
            }),
        );
        assert_eq!(state.screen, Screen::Dashboard);
        assert!(state.auth_password.is_empty());
        assert!(state.session.has_full_access());
    }

    #[test]
    fn stale_search_results_are_dropped() {
        let mut state = AppState::new();
        let mut form = CreateDuelForm::default();
        form.search_term = "bo".to_string();
        state.create_duel = Some(form);

        apply_delta(
            &mut state,
            Delta::SetSearchResults {
                term: "b".to_string(),
                players: vec![PlayerSummary {
                    player_id: 3,
                    name: "Bea".to_string(),
                    email: None,
                }],
            },
        );
        assert!(state.create_duel.as_ref().unwrap().results.is_empty());

        apply_delta(
            &mut state,
            Delta::SetSearchResults {
                term: "bo".to_string(),
                players: vec![PlayerSummary {
                    player_id: 4,
                    name: "Bob".to_string(),
                    email: None,
                }],
            },
        );
        assert_eq!(state.create_duel.as_ref().unwrap().results.len(), 1);
    }

    #[test]
    fn create_form_validation_blocks_bad_terms() {
        let form = CreateDuelForm::default();
        assert!(form.request(1).is_err());

        let mut form = CreateDuelForm::default();
        form.chosen = Some(PlayerSummary {
            player_id: 5,
            name: "Dee".to_string(),
            email: None,
        });
        let req = form.request(1).expect("valid form builds a request");
        assert_eq!(req.invitation_expiry_minutes, 72 * 60);
        assert_eq!(req.session_duration_limit_minutes, 5);

        form.duration_minutes = 0;
        assert!(form.request(1).is_err());
    }
}
