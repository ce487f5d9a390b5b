use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use chrono::Utc;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use putt_terminal::duels::{self, Duel, DuelBuckets, DuelView, ExpiryDisplay, PLACEHOLDER_DASH};
use putt_terminal::session::{
    RESTRICTED_CREATE_DUEL_MESSAGE, RESTRICTED_CREATE_LEAGUE_MESSAGE, SessionSummary,
};
use putt_terminal::state::{
    apply_delta, AppState, AuthField, AuthMode, CoachMessage, CreateDuelField, CreateDuelForm,
    Delta, DuelSection, LeagueSection, LeaguesOverview, ProviderCommand, Screen, SessionPicker,
};
use putt_terminal::{demo_feed, http_client, provider};

const TOAST_SECS: u64 = 4;

struct App {
    state: AppState,
    should_quit: bool,
    cmd_tx: mpsc::Sender<ProviderCommand>,
}

impl App {
    fn new(cmd_tx: mpsc::Sender<ProviderCommand>) -> Self {
        Self {
            state: AppState::new(),
            should_quit: false,
            cmd_tx,
        }
    }

    fn send(&mut self, cmd: ProviderCommand) {
        if self.cmd_tx.send(cmd).is_err() {
            self.state.push_log("[WARN] Provider unavailable");
        }
    }

    fn player_id(&self) -> Option<u64> {
        self.state.session.player_id()
    }

    fn goto(&mut self, screen: Screen) {
        let Some(player_id) = self.player_id() else {
            return;
        };
        self.state.screen = screen;
        match screen {
            Screen::Auth => {}
            Screen::Dashboard => self.send(ProviderCommand::FetchPlayerData { player_id }),
            Screen::Duels => {
                self.state.duels_loading = true;
                self.send(ProviderCommand::FetchDuels { player_id });
            }
            Screen::Leagues => {
                self.state.leagues_loading = true;
                self.send(ProviderCommand::FetchLeagues { player_id });
            }
            Screen::Sessions => {
                self.state.sessions_loading = true;
                let page = self.state.sessions_page;
                self.send(ProviderCommand::FetchSessions { player_id, page });
            }
            Screen::Notifications => {
                self.state.notifications_loading = true;
                self.send(ProviderCommand::FetchNotifications { player_id });
            }
            Screen::Fundraising => {
                self.state.fundraisers_loading = true;
                self.send(ProviderCommand::FetchFundraisers);
            }
            Screen::Coach => self.send(ProviderCommand::FetchConversations { player_id }),
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if self.state.help_overlay {
            if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
                self.state.help_overlay = false;
            }
            return;
        }
        if self.state.career_overlay.is_some() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('o') | KeyCode::Enter) {
                self.state.career_overlay = None;
            }
            return;
        }
        if self.state.create_duel.is_some() {
            self.on_create_duel_key(key);
            return;
        }
        if self.state.session_picker.is_some() {
            self.on_session_picker_key(key);
            return;
        }
        if self.state.create_league_name.is_some() {
            self.on_create_league_key(key);
            return;
        }

        match self.state.screen {
            Screen::Auth => self.on_auth_key(key),
            Screen::Coach => self.on_coach_key(key),
            _ => self.on_global_key(key),
        }
    }

    fn on_global_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.state.help_overlay = true,
            KeyCode::Char('1') => self.goto(Screen::Dashboard),
            KeyCode::Char('2') => self.goto(Screen::Duels),
            KeyCode::Char('3') => self.goto(Screen::Leagues),
            KeyCode::Char('4') => self.goto(Screen::Sessions),
            KeyCode::Char('5') => self.goto(Screen::Notifications),
            KeyCode::Char('6') => self.goto(Screen::Fundraising),
            KeyCode::Char('7') => self.goto(Screen::Coach),
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
            _ => match self.state.screen {
                Screen::Dashboard => self.on_dashboard_key(key),
                Screen::Duels => self.on_duels_key(key),
                Screen::Leagues => self.on_leagues_key(key),
                Screen::Sessions => self.on_sessions_key(key),
                Screen::Notifications => self.on_notifications_key(key),
                _ => {}
            },
        }
    }

    fn on_auth_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::F(2) => {
                self.state.auth_mode = match self.state.auth_mode {
                    AuthMode::Login => AuthMode::Register,
                    AuthMode::Register => AuthMode::Login,
                };
                self.state.auth_field = AuthField::Email;
                self.state.auth_error = None;
            }
            KeyCode::Tab => {
                self.state.auth_field = match (self.state.auth_field, self.state.auth_mode) {
                    (AuthField::Email, AuthMode::Register) => AuthField::Name,
                    (AuthField::Email, AuthMode::Login) => AuthField::Password,
                    (AuthField::Name, _) => AuthField::Password,
                    (AuthField::Password, _) => AuthField::Email,
                };
            }
            KeyCode::Backspace => {
                self.active_auth_field_mut().pop();
            }
            KeyCode::Char(c) => {
                self.active_auth_field_mut().push(c);
            }
            KeyCode::Enter => self.submit_auth(),
            _ => {}
        }
    }

    fn active_auth_field_mut(&mut self) -> &mut String {
        match self.state.auth_field {
            AuthField::Email => &mut self.state.auth_email,
            AuthField::Name => &mut self.state.auth_name,
            AuthField::Password => &mut self.state.auth_password,
        }
    }

    fn submit_auth(&mut self) {
        if self.state.auth_in_flight {
            return;
        }
        let email = self.state.auth_email.trim().to_string();
        let password = self.state.auth_password.clone();
        if email.is_empty() || password.is_empty() {
            self.state.auth_error = Some("Email and password are required.".to_string());
            return;
        }
        let cmd = match self.state.auth_mode {
            AuthMode::Login => ProviderCommand::Login { email, password },
            AuthMode::Register => {
                let name = self.state.auth_name.trim().to_string();
                if name.is_empty() {
                    self.state.auth_error = Some("Name is required.".to_string());
                    return;
                }
                ProviderCommand::Register {
                    email,
                    password,
                    name,
                }
            }
        };
        self.state.auth_error = None;
        self.state.auth_in_flight = true;
        self.send(cmd);
    }

    fn on_dashboard_key(&mut self, key: KeyEvent) {
        let Some(player_id) = self.player_id() else {
            return;
        };
        match key.code {
            KeyCode::Char('s') => {
                if !self.state.action_in_flight {
                    self.state.action_in_flight = true;
                    self.send(ProviderCommand::StartSession {
                        player_id,
                        duel_id: None,
                    });
                }
            }
            KeyCode::Char('r') => self.send(ProviderCommand::FetchPlayerData { player_id }),
            KeyCode::Char('o') => self.send(ProviderCommand::FetchCareerStats { player_id }),
            KeyCode::Char('L') => self.sign_out(),
            _ => {}
        }
    }

    fn sign_out(&mut self) {
        self.state.session.sign_out();
        self.state.screen = Screen::Auth;
        self.state.duels.clear();
        self.state.buckets = DuelBuckets::default();
        self.state.leagues = LeaguesOverview::default();
        self.state.sessions.clear();
        self.state.notifications.clear();
        self.state.unread_count = 0;
        self.state.fundraisers.clear();
        self.state.coach_messages.clear();
        self.state.coach_conversations.clear();
        self.state.coach_conversation_id = None;
        self.state.push_log("[INFO] Signed out");
    }

    fn on_duels_key(&mut self, key: KeyEvent) {
        let Some(player_id) = self.player_id() else {
            return;
        };
        match key.code {
            KeyCode::Tab => self.state.cycle_duel_section(),
            KeyCode::Char('r') if key.modifiers.is_empty() => {
                self.state.duels_loading = true;
                self.send(ProviderCommand::FetchDuels { player_id });
            }
            KeyCode::Char('n') => {
                if self.state.session.has_full_access() {
                    self.state.create_duel = Some(CreateDuelForm::default());
                } else {
                    self.state.raise_toast(RESTRICTED_CREATE_DUEL_MESSAGE, true);
                }
            }
            KeyCode::Char('o') => {
                if let Some(duel) = self.state.selected_duel() {
                    let opponent_id = duel.opponent_id(player_id);
                    self.send(ProviderCommand::FetchCareerStats {
                        player_id: opponent_id,
                    });
                }
            }
            _ if self.state.action_in_flight => {}
            KeyCode::Char('a') => {
                if let Some(duel) = self.state.selected_duel()
                    && DuelView::project(duel, player_id).is_my_turn_to_act
                {
                    let duel_id = duel.duel_id;
                    self.state.action_in_flight = true;
                    self.send(ProviderCommand::AcceptDuel { duel_id, player_id });
                }
            }
            KeyCode::Char('x') => {
                if let Some(duel) = self.state.selected_duel()
                    && DuelView::project(duel, player_id).is_my_turn_to_act
                {
                    let duel_id = duel.duel_id;
                    self.state.action_in_flight = true;
                    self.send(ProviderCommand::RejectDuel { duel_id, player_id });
                }
            }
            KeyCode::Char('s') => {
                if let Some(duel) = self.state.selected_duel()
                    && DuelView::project(duel, player_id).can_start_session
                {
                    let duel_id = duel.duel_id;
                    self.state.action_in_flight = true;
                    self.send(ProviderCommand::StartSession {
                        player_id,
                        duel_id: Some(duel_id),
                    });
                }
            }
            KeyCode::Char('S') => {
                if let Some(duel) = self.state.selected_duel()
                    && DuelView::project(duel, player_id).can_start_session
                {
                    let duel_id = duel.duel_id;
                    self.state.session_picker = Some(SessionPicker {
                        duel_id,
                        selected: 0,
                    });
                    if self.state.sessions.is_empty() {
                        let page = self.state.sessions_page;
                        self.send(ProviderCommand::FetchSessions { player_id, page });
                    }
                }
            }
            KeyCode::Char('m') => self.request_rematch(player_id),
            _ => {}
        }
    }

    fn request_rematch(&mut self, player_id: u64) {
        let Some(duel) = self.state.selected_duel() else {
            return;
        };
        if !DuelView::project(duel, player_id).can_rematch {
            return;
        }
        if !self.state.session.has_full_access() {
            self.state.raise_toast(RESTRICTED_CREATE_DUEL_MESSAGE, true);
            return;
        }
        let opponent = duel.opponent_name(player_id).to_string();
        let Some(request) = duels::rematch_request(duel, player_id) else {
            self.state
                .raise_toast("Original duel terms are unavailable.", true);
            return;
        };
        self.state.action_in_flight = true;
        self.send(ProviderCommand::CreateDuel {
            request,
            success_message: format!("Rematch challenge sent to {opponent}!"),
        });
    }

    fn on_create_duel_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Esc {
            self.state.create_duel = None;
            return;
        }
        let Some(player_id) = self.player_id() else {
            self.state.create_duel = None;
            return;
        };

        let mut trigger_search = false;
        let mut submit = false;
        if let Some(form) = &mut self.state.create_duel {
            match key.code {
                KeyCode::Tab => {
                    form.field = match form.field {
                        CreateDuelField::Search => CreateDuelField::ExpiryHours,
                        CreateDuelField::ExpiryHours => CreateDuelField::DurationMinutes,
                        CreateDuelField::DurationMinutes => CreateDuelField::Search,
                    };
                }
                KeyCode::Char(c) if form.field == CreateDuelField::Search => {
                    form.search_term.push(c);
                    form.chosen = None;
                    trigger_search = form.search_term.len() >= 2;
                }
                KeyCode::Backspace if form.field == CreateDuelField::Search => {
                    form.search_term.pop();
                    form.chosen = None;
                    if form.search_term.len() < 2 {
                        form.results.clear();
                    } else {
                        trigger_search = true;
                    }
                }
                KeyCode::Up => match form.field {
                    CreateDuelField::Search => {
                        form.result_selected = form.result_selected.saturating_sub(1);
                    }
                    CreateDuelField::ExpiryHours => form.expiry_hours += 1,
                    CreateDuelField::DurationMinutes => form.duration_minutes += 1,
                },
                KeyCode::Down => match form.field {
                    CreateDuelField::Search => {
                        if !form.results.is_empty() {
                            form.result_selected =
                                (form.result_selected + 1).min(form.results.len() - 1);
                        }
                    }
                    CreateDuelField::ExpiryHours => {
                        form.expiry_hours = (form.expiry_hours - 1).max(1);
                    }
                    CreateDuelField::DurationMinutes => {
                        form.duration_minutes = (form.duration_minutes - 1).max(1);
                    }
                },
                KeyCode::Enter => {
                    if form.field == CreateDuelField::Search && form.chosen.is_none() {
                        if let Some(player) = form.results.get(form.result_selected).cloned() {
                            form.search_term = player.name.clone();
                            form.chosen = Some(player);
                            form.field = CreateDuelField::ExpiryHours;
                        }
                    } else {
                        submit = true;
                    }
                }
                _ => {}
            }
        }

        if trigger_search {
            self.request_player_search(player_id);
        }
        if submit && !self.state.action_in_flight {
            self.submit_create_duel(player_id);
        }
    }

    fn request_player_search(&mut self, player_id: u64) {
        let Some(form) = &self.state.create_duel else {
            return;
        };
        if form.search_term.len() < 2 {
            return;
        }
        let term = form.search_term.clone();
        self.send(ProviderCommand::SearchPlayers {
            term,
            requester_id: player_id,
        });
    }

    fn submit_create_duel(&mut self, player_id: u64) {
        let Some(form) = &mut self.state.create_duel else {
            return;
        };
        match form.request(player_id) {
            Ok(request) => {
                let opponent = form
                    .chosen
                    .as_ref()
                    .map(|p| p.name.clone())
                    .unwrap_or_default();
                self.state.action_in_flight = true;
                self.send(ProviderCommand::CreateDuel {
                    request,
                    success_message: format!("Duel challenge sent to {opponent}!"),
                });
            }
            Err(message) => form.error = Some(message),
        }
    }

    fn on_session_picker_key(&mut self, key: KeyEvent) {
        let Some(player_id) = self.player_id() else {
            self.state.session_picker = None;
            return;
        };
        let Some(picker) = &mut self.state.session_picker else {
            return;
        };
        match key.code {
            KeyCode::Esc => self.state.session_picker = None,
            KeyCode::Up | KeyCode::Char('k') => {
                picker.selected = picker.selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if !self.state.sessions.is_empty() {
                    picker.selected = (picker.selected + 1).min(self.state.sessions.len() - 1);
                }
            }
            KeyCode::Enter => {
                if self.state.action_in_flight {
                    return;
                }
                let duel_id = picker.duel_id;
                let Some(session) = self.state.sessions.get(picker.selected) else {
                    return;
                };
                let cmd = ProviderCommand::SubmitDuelSession {
                    duel_id,
                    session_id: session.session_id,
                    player_id,
                    score: session.total_putts.unwrap_or(0),
                    // Recorded sessions track minutes; duel scores carry seconds.
                    duration: session.duration_minutes.unwrap_or(0.0) * 60.0,
                };
                self.state.action_in_flight = true;
                self.send(cmd);
            }
            _ => {}
        }
    }

    fn on_leagues_key(&mut self, key: KeyEvent) {
        let Some(player_id) = self.player_id() else {
            return;
        };
        match key.code {
            KeyCode::Tab => self.state.cycle_league_section(),
            KeyCode::Char('r') => {
                self.state.leagues_loading = true;
                self.send(ProviderCommand::FetchLeagues { player_id });
            }
            KeyCode::Char('n') => {
                if self.state.session.has_full_access() {
                    self.state.create_league_name = Some(String::new());
                } else {
                    self.state.raise_toast(RESTRICTED_CREATE_LEAGUE_MESSAGE, true);
                }
            }
            _ if self.state.action_in_flight => {}
            KeyCode::Enter => {
                let Some(league) = self.state.selected_league() else {
                    return;
                };
                let league_id = league.league_id;
                match self.state.league_section {
                    LeagueSection::Public => {
                        self.state.action_in_flight = true;
                        self.send(ProviderCommand::JoinLeague {
                            league_id,
                            player_id,
                        });
                    }
                    LeagueSection::Invites => {
                        self.state.action_in_flight = true;
                        self.send(ProviderCommand::RespondLeagueInvite {
                            league_id,
                            player_id,
                            accept: true,
                        });
                    }
                    LeagueSection::Mine => {}
                }
            }
            KeyCode::Char('x') => {
                if self.state.league_section == LeagueSection::Invites
                    && let Some(league) = self.state.selected_league()
                {
                    let league_id = league.league_id;
                    self.state.action_in_flight = true;
                    self.send(ProviderCommand::RespondLeagueInvite {
                        league_id,
                        player_id,
                        accept: false,
                    });
                }
            }
            _ => {}
        }
    }

    fn on_create_league_key(&mut self, key: KeyEvent) {
        let Some(player_id) = self.player_id() else {
            self.state.create_league_name = None;
            return;
        };
        let Some(name) = &mut self.state.create_league_name else {
            return;
        };
        match key.code {
            KeyCode::Esc => self.state.create_league_name = None,
            KeyCode::Backspace => {
                name.pop();
            }
            KeyCode::Char(c) => name.push(c),
            KeyCode::Enter => {
                let trimmed = name.trim().to_string();
                if trimmed.is_empty() || self.state.action_in_flight {
                    return;
                }
                self.state.action_in_flight = true;
                self.send(ProviderCommand::CreateLeague {
                    creator_id: player_id,
                    name: trimmed,
                    description: String::new(),
                    privacy_type: "private".to_string(),
                });
            }
            _ => {}
        }
    }

    fn on_sessions_key(&mut self, key: KeyEvent) {
        let Some(player_id) = self.player_id() else {
            return;
        };
        let page = self.state.sessions_page;
        match key.code {
            KeyCode::Left if page > 1 => {
                self.state.sessions_loading = true;
                self.send(ProviderCommand::FetchSessions {
                    player_id,
                    page: page - 1,
                });
            }
            KeyCode::Right if page < self.state.sessions_total_pages => {
                self.state.sessions_loading = true;
                self.send(ProviderCommand::FetchSessions {
                    player_id,
                    page: page + 1,
                });
            }
            KeyCode::Char('r') => {
                self.state.sessions_loading = true;
                self.send(ProviderCommand::FetchSessions { player_id, page });
            }
            _ => {}
        }
    }

    fn on_notifications_key(&mut self, key: KeyEvent) {
        let Some(player_id) = self.player_id() else {
            return;
        };
        match key.code {
            KeyCode::Enter | KeyCode::Char('m') => {
                if let Some(item) = self
                    .state
                    .notifications
                    .get(self.state.notification_selected)
                    && item.is_unread()
                {
                    let notification_id = item.notification_id;
                    self.send(ProviderCommand::MarkNotificationRead {
                        notification_id,
                        player_id,
                    });
                }
            }
            KeyCode::Char('M') => {
                self.send(ProviderCommand::MarkAllNotificationsRead { player_id });
            }
            _ => {}
        }
    }

    fn on_coach_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.state.screen = Screen::Dashboard,
            KeyCode::Up => self.cycle_conversation(-1),
            KeyCode::Down => self.cycle_conversation(1),
            KeyCode::Backspace => {
                self.state.coach_input.pop();
            }
            KeyCode::Char(c) => self.state.coach_input.push(c),
            KeyCode::Enter => self.submit_coach_message(),
            _ => {}
        }
    }

    fn cycle_conversation(&mut self, step: i64) {
        let conversations = &self.state.coach_conversations;
        if conversations.is_empty() {
            return;
        }
        let current = self
            .state
            .coach_conversation_id
            .and_then(|id| conversations.iter().position(|c| c.conversation_id == id));
        let next = match current {
            Some(idx) => {
                (idx as i64 + step).rem_euclid(conversations.len() as i64) as usize
            }
            None => 0,
        };
        self.state.coach_conversation_id = Some(conversations[next].conversation_id);
    }

    fn submit_coach_message(&mut self) {
        if self.state.coach_waiting {
            return;
        }
        let Some(player_id) = self.player_id() else {
            return;
        };
        let message = self.state.coach_input.trim().to_string();
        if message.is_empty() {
            return;
        }
        self.state.coach_messages.push(CoachMessage {
            from_coach: false,
            text: message.clone(),
        });
        self.state.coach_input.clear();
        self.state.coach_waiting = true;
        let conversation_id = self.state.coach_conversation_id;
        self.send(ProviderCommand::CoachChat {
            player_id,
            conversation_id,
            message,
        });
    }
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    if http_client::offline_mode() {
        demo_feed::spawn_demo_provider(tx, cmd_rx);
    } else {
        provider::spawn_provider(tx, cmd_rx);
    }

    let mut app = App::new(cmd_tx);
    let res = run_app(&mut terminal, &mut app, rx);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<Delta>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            apply_delta(&mut app.state, delta);
        }

        app.state.maybe_clear_toast(Instant::now(), TOAST_SECS);

        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header =
        Paragraph::new(header_text(&app.state)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    match app.state.screen {
        Screen::Auth => render_auth(frame, chunks[1], &app.state),
        Screen::Dashboard => render_dashboard(frame, chunks[1], &app.state),
        Screen::Duels => render_duels(frame, chunks[1], &app.state),
        Screen::Leagues => render_leagues(frame, chunks[1], &app.state),
        Screen::Sessions => render_sessions(frame, chunks[1], &app.state),
        Screen::Notifications => render_notifications(frame, chunks[1], &app.state),
        Screen::Fundraising => render_fundraising(frame, chunks[1], &app.state),
        Screen::Coach => render_coach(frame, chunks[1], &app.state),
    }

    render_status_line(frame, chunks[2], &app.state);

    let footer =
        Paragraph::new(footer_text(&app.state)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, chunks[3]);

    if let Some(form) = &app.state.create_duel {
        render_create_duel_overlay(frame, frame.size(), form);
    }
    if app.state.session_picker.is_some() {
        render_session_picker_overlay(frame, frame.size(), &app.state);
    }
    if let Some(name) = &app.state.create_league_name {
        render_create_league_overlay(frame, frame.size(), name);
    }
    if let Some(stats) = &app.state.career_overlay {
        render_career_overlay(frame, frame.size(), stats);
    }
    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let screen = match state.screen {
        Screen::Auth => "SIGN IN",
        Screen::Dashboard => "DASHBOARD",
        Screen::Duels => "DUELS",
        Screen::Leagues => "LEAGUES",
        Screen::Sessions => "SESSIONS",
        Screen::Notifications => "NOTIFICATIONS",
        Screen::Fundraising => "FUNDRAISING",
        Screen::Coach => "COACH",
    };
    let who = state
        .session
        .player()
        .map(|p| p.name.as_str())
        .unwrap_or("not signed in");
    format!(
        "PUTT TERMINAL | {screen} | {who} | unread: {}",
        state.unread_count
    )
}

fn footer_text(state: &AppState) -> String {
    match state.screen {
        Screen::Auth => {
            "Tab Field | F2 Login/Register | Enter Submit | Esc Quit".to_string()
        }
        Screen::Dashboard => {
            "1-7 Screens | s Start session | r Refresh | o Career | L Log out | ? Help | q Quit"
                .to_string()
        }
        Screen::Duels => {
            "Tab Section | a Accept | x Decline | s Start | S Submit | m Rematch | n New | o Opponent | r Refresh | ? Help"
                .to_string()
        }
        Screen::Leagues => {
            "Tab Section | Enter Join/Accept | x Decline invite | n New | r Refresh | ? Help"
                .to_string()
        }
        Screen::Sessions => "←/→ Page | r Refresh | ? Help | q Quit".to_string(),
        Screen::Notifications => {
            "Enter/m Mark read | M Mark all | j/k Move | ? Help | q Quit".to_string()
        }
        Screen::Fundraising => "j/k Move | ? Help | q Quit".to_string(),
        Screen::Coach => "Type message | Enter Send | ↑/↓ Conversation | Esc Back".to_string(),
    }
}

fn render_status_line(frame: &mut Frame, area: Rect, state: &AppState) {
    if let Some(toast) = &state.toast {
        let color = if toast.is_error { Color::Red } else { Color::Green };
        let line = Paragraph::new(toast.message.as_str()).style(Style::default().fg(color));
        frame.render_widget(line, area);
        return;
    }
    if let Some(last) = state.logs.back() {
        let line = Paragraph::new(last.as_str()).style(Style::default().fg(Color::DarkGray));
        frame.render_widget(line, area);
    }
}

fn render_auth(frame: &mut Frame, area: Rect, state: &AppState) {
    let popup = centered_rect(50, 50, area);
    let title = match state.auth_mode {
        AuthMode::Login => "Sign In",
        AuthMode::Register => "Create Account",
    };
    let block = Block::default().title(title).borders(Borders::ALL);
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let mut lines = Vec::new();
    lines.push(field_line(
        "Email",
        &state.auth_email,
        state.auth_field == AuthField::Email,
    ));
    if state.auth_mode == AuthMode::Register {
        lines.push(field_line(
            "Name",
            &state.auth_name,
            state.auth_field == AuthField::Name,
        ));
    }
    let masked = "*".repeat(state.auth_password.chars().count());
    lines.push(field_line(
        "Password",
        &masked,
        state.auth_field == AuthField::Password,
    ));
    lines.push(String::new());
    if state.auth_in_flight {
        lines.push("Signing in...".to_string());
    } else if let Some(error) = &state.auth_error {
        lines.push(format!("! {error}"));
    }

    let paragraph = Paragraph::new(lines.join("\n"));
    frame.render_widget(paragraph, inner);
}

fn field_line(label: &str, value: &str, active: bool) -> String {
    let marker = if active { ">" } else { " " };
    format!("{marker} {label:<9} {value}")
}

fn render_dashboard(frame: &mut Frame, area: Rect, state: &AppState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(1)])
        .split(area);

    let Some(player) = state.session.player() else {
        frame.render_widget(Paragraph::new("Not signed in"), area);
        return;
    };

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
        ])
        .split(rows[0]);

    let stats = player.stats.as_ref();
    let makes = stats.and_then(|s| s.total_makes);
    let misses = stats.and_then(|s| s.total_misses);
    let accuracy = stats.and_then(|s| s.accuracy_percent());
    let streak = stats.and_then(|s| s.best_streak);
    let fastest = stats.and_then(|s| s.fastest_21_makes);

    render_stat_card(frame, cards[0], "Total Makes", opt_i64(makes));
    render_stat_card(frame, cards[1], "Total Misses", opt_i64(misses));
    render_stat_card(
        frame,
        cards[2],
        "Accuracy",
        accuracy
            .map(|a| format!("{a:.1}%"))
            .unwrap_or_else(|| PLACEHOLDER_DASH.to_string()),
    );
    render_stat_card(frame, cards[3], "Best Streak", opt_i64(streak));
    render_stat_card(
        frame,
        cards[4],
        "Fastest 21",
        fastest
            .map(|f| format!("{f:.1}s"))
            .unwrap_or_else(|| PLACEHOLDER_DASH.to_string()),
    );

    let recent = player
        .sessions
        .iter()
        .map(session_row)
        .collect::<Vec<_>>()
        .join("\n");
    let body = if recent.is_empty() {
        "No sessions recorded yet. Press s to start one.".to_string()
    } else {
        format!("{}\n{recent}", session_header())
    };
    let sessions = Paragraph::new(body)
        .block(Block::default().title("Recent Sessions").borders(Borders::ALL));
    frame.render_widget(sessions, rows[1]);
}

fn render_stat_card(frame: &mut Frame, area: Rect, title: &str, value: String) {
    let card = Paragraph::new(value)
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(card, area);
}

fn opt_i64(value: Option<i64>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| PLACEHOLDER_DASH.to_string())
}

fn session_header() -> String {
    format!(
        "{:<14} {:>7} {:>6} {:>7} {:>8} {:>10}",
        "Date", "Putts", "Made", "Missed", "Streak", "Duration"
    )
}

fn session_row(session: &SessionSummary) -> String {
    let date = session
        .timestamp
        .as_deref()
        .and_then(duels::parse_timestamp)
        .map(duels::format_date)
        .unwrap_or_else(|| PLACEHOLDER_DASH.to_string());
    format!(
        "{:<14} {:>7} {:>6} {:>7} {:>8} {:>10}",
        date,
        opt_i64(session.total_putts),
        opt_i64(session.made_putts),
        opt_i64(session.missed_putts),
        opt_i64(session.best_streak),
        session
            .duration_minutes
            .map(|m| duels::format_minutes(m.round() as i64))
            .unwrap_or_else(|| PLACEHOLDER_DASH.to_string()),
    )
}

fn render_duels(frame: &mut Frame, area: Rect, state: &AppState) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(area);

    render_duel_section(frame, sections[0], state, DuelSection::Pending, "Pending");
    render_duel_section(frame, sections[1], state, DuelSection::Active, "Active");
    render_duel_section(
        frame,
        sections[2],
        state,
        DuelSection::Completed,
        "Completed",
    );
}

fn render_duel_section(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    section: DuelSection,
    title: &str,
) {
    let duels_list = state.duel_section_list(section);
    let focused = state.duel_section == section;
    let title = format!("{title} ({})", duels_list.len());
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if state.duels_loading && duels_list.is_empty() {
        frame.render_widget(Paragraph::new("Loading..."), inner);
        return;
    }
    if duels_list.is_empty() {
        let empty = Paragraph::new(empty_section_text(section))
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, inner);
        return;
    }
    let Some(viewer_id) = state.session.player_id() else {
        return;
    };

    let mut lines = vec![duel_header(section)];
    let now = Utc::now();
    let visible = (inner.height as usize).saturating_sub(1);
    let selected = if focused { state.duel_selected } else { 0 };
    let (start, end) = visible_range(selected, duels_list.len(), visible.max(1));
    for idx in start..end {
        let duel = &duels_list[idx];
        let view = DuelView::project(duel, viewer_id);
        let marker = if focused && idx == state.duel_selected {
            "> "
        } else {
            "  "
        };
        lines.push(format!("{marker}{}", duel_row(duel, &view, section, now)));
    }

    frame.render_widget(Paragraph::new(lines.join("\n")), inner);
}

fn empty_section_text(section: DuelSection) -> &'static str {
    match section {
        DuelSection::Pending => "No pending challenges",
        DuelSection::Active => "No active duels",
        DuelSection::Completed => "No completed duels yet",
    }
}

fn duel_header(section: DuelSection) -> String {
    let third = match section {
        DuelSection::Pending => "Expires",
        DuelSection::Active => "State",
        DuelSection::Completed => "Result Date",
    };
    format!(
        "  {:<10} {:<18} {:<20} {:>8} {:>10} {:<12}",
        "Status", "Opponent", third, "My Score", "Opp Score", "Session"
    )
}

fn duel_row(
    duel: &Duel,
    view: &DuelView,
    section: DuelSection,
    now: chrono::DateTime<Utc>,
) -> String {
    let third = match section {
        DuelSection::Pending => match duels::expiry_display(duel, now) {
            ExpiryDisplay::Countdown(end) => duels::format_countdown(end, now),
            ExpiryDisplay::Date(date) => date,
            ExpiryDisplay::None => PLACEHOLDER_DASH.to_string(),
        },
        DuelSection::Active => {
            if view.can_start_session {
                "your turn to putt".to_string()
            } else {
                "waiting on opponent".to_string()
            }
        }
        DuelSection::Completed => view.result_date.clone(),
    };
    let status = if view.is_my_turn_to_act {
        format!("{}*", view.status_label())
    } else {
        view.status_label().to_string()
    };
    format!(
        "{:<10} {:<18} {:<20} {:>8} {:>10} {:<12}",
        status,
        view.opponent,
        third,
        view.my_score
            .map(|s| s.to_string())
            .unwrap_or_else(|| PLACEHOLDER_DASH.to_string()),
        view.opponent_score
            .map(|s| s.to_string())
            .unwrap_or_else(|| PLACEHOLDER_DASH.to_string()),
        view.session_length,
    )
}

fn render_leagues(frame: &mut Frame, area: Rect, state: &AppState) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(area);

    render_league_section(frame, sections[0], state, LeagueSection::Mine, "My Leagues");
    render_league_section(
        frame,
        sections[1],
        state,
        LeagueSection::Public,
        "Public Leagues",
    );
    render_league_section(frame, sections[2], state, LeagueSection::Invites, "Invites");
}

fn render_league_section(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    section: LeagueSection,
    title: &str,
) {
    let leagues = state.league_section_list(section);
    let focused = state.league_section == section;
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let block = Block::default()
        .title(format!("{title} ({})", leagues.len()))
        .borders(Borders::ALL)
        .border_style(border_style);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if state.leagues_loading && leagues.is_empty() {
        frame.render_widget(Paragraph::new("Loading..."), inner);
        return;
    }
    if leagues.is_empty() {
        let empty = Paragraph::new("Nothing here").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, inner);
        return;
    }

    let mut lines = Vec::new();
    for (idx, league) in leagues.iter().enumerate() {
        let marker = if focused && idx == state.league_selected {
            "> "
        } else {
            "  "
        };
        let members = league
            .member_count
            .map(|m| format!("{m} members"))
            .unwrap_or_default();
        let extra = match section {
            LeagueSection::Invites => league
                .inviter_name
                .as_deref()
                .map(|n| format!("invited by {n}"))
                .unwrap_or_default(),
            _ => league.status.clone().unwrap_or_default(),
        };
        lines.push(format!(
            "{marker}{:<24} {:<14} {}",
            league.name, members, extra
        ));
    }
    frame.render_widget(Paragraph::new(lines.join("\n")), inner);
}

fn render_sessions(frame: &mut Frame, area: Rect, state: &AppState) {
    let title = format!(
        "Session History (page {}/{})",
        state.sessions_page, state.sessions_total_pages
    );
    let block = Block::default().title(title).borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if state.sessions_loading && state.sessions.is_empty() {
        frame.render_widget(Paragraph::new("Loading..."), inner);
        return;
    }
    if state.sessions.is_empty() {
        let empty =
            Paragraph::new("No sessions on this page").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, inner);
        return;
    }

    let mut lines = vec![format!("  {}", session_header())];
    for (idx, session) in state.sessions.iter().enumerate() {
        let marker = if idx == state.session_selected {
            "> "
        } else {
            "  "
        };
        lines.push(format!("{marker}{}", session_row(session)));
    }
    frame.render_widget(Paragraph::new(lines.join("\n")), inner);
}

fn render_notifications(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .title(format!("Notifications ({} unread)", state.unread_count))
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if state.notifications_loading && state.notifications.is_empty() {
        frame.render_widget(Paragraph::new("Loading..."), inner);
        return;
    }
    if state.notifications.is_empty() {
        let empty = Paragraph::new("All caught up").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, inner);
        return;
    }

    let visible = inner.height as usize;
    let (start, end) = visible_range(state.notification_selected, state.notifications.len(), visible.max(1));
    let lines: Vec<Line> = (start..end)
        .map(|idx| {
            let item = &state.notifications[idx];
            let marker = if idx == state.notification_selected {
                "> "
            } else {
                "  "
            };
            let bullet = if item.is_unread() { "●" } else { " " };
            let style = if item.is_unread() {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Line::styled(format!("{marker}{bullet} {}", item.message), style)
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_fundraising(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default().title("Fundraisers").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if state.fundraisers_loading && state.fundraisers.is_empty() {
        frame.render_widget(Paragraph::new("Loading..."), inner);
        return;
    }
    if state.fundraisers.is_empty() {
        let empty =
            Paragraph::new("No active fundraisers").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, inner);
        return;
    }

    let mut lines = Vec::new();
    for (idx, fundraiser) in state.fundraisers.iter().enumerate() {
        let marker = if idx == state.fundraiser_selected {
            "> "
        } else {
            "  "
        };
        let progress = match (fundraiser.raised_amount, fundraiser.goal_amount) {
            (Some(raised), Some(goal)) => {
                let pct = fundraiser.progress_percent().unwrap_or(0.0);
                format!("${raised:.0} of ${goal:.0} ({pct:.0}%)")
            }
            _ => PLACEHOLDER_DASH.to_string(),
        };
        lines.push(format!("{marker}{:<30} {}", fundraiser.name, progress));
        if idx == state.fundraiser_selected
            && let Some(description) = &fundraiser.description
        {
            lines.push(format!("    {description}"));
        }
    }
    frame.render_widget(Paragraph::new(lines.join("\n")), inner);
}

fn render_coach(frame: &mut Frame, area: Rect, state: &AppState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(3)])
        .split(area);

    let conversation = state
        .coach_conversation_id
        .map(|id| format!("Coach (conversation #{id})"))
        .unwrap_or_else(|| "Coach".to_string());
    let block = Block::default().title(conversation).borders(Borders::ALL);
    let inner = block.inner(rows[0]);
    frame.render_widget(block, rows[0]);

    if state.coach_messages.is_empty() {
        let empty = Paragraph::new("Ask the coach anything about your putting.")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, inner);
    } else {
        let visible = inner.height as usize;
        let start = state.coach_messages.len().saturating_sub(visible);
        let lines: Vec<Line> = state.coach_messages[start..]
            .iter()
            .map(|m| {
                if m.from_coach {
                    Line::styled(
                        format!("coach: {}", m.text),
                        Style::default().fg(Color::Green),
                    )
                } else {
                    Line::raw(format!("you:   {}", m.text))
                }
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);
    }

    let prompt = if state.coach_waiting {
        "waiting for the coach...".to_string()
    } else {
        format!("> {}", state.coach_input)
    };
    let input = Paragraph::new(prompt).block(Block::default().borders(Borders::ALL));
    frame.render_widget(input, rows[1]);
}

fn render_create_duel_overlay(frame: &mut Frame, area: Rect, form: &CreateDuelForm) {
    let popup = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup);
    let block = Block::default().title("New Duel").borders(Borders::ALL);
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let mut lines = Vec::new();
    lines.push(field_line(
        "Opponent",
        &form.search_term,
        form.field == CreateDuelField::Search,
    ));
    if form.chosen.is_none() {
        if form.results.is_empty() && form.search_term.len() >= 2 {
            lines.push("   no players found".to_string());
        }
        for (idx, player) in form.results.iter().take(5).enumerate() {
            let marker = if idx == form.result_selected { " * " } else { "   " };
            lines.push(format!("{marker}{}", player.name));
        }
    }
    lines.push(field_line(
        "Expires",
        &format!("{} hours", form.expiry_hours),
        form.field == CreateDuelField::ExpiryHours,
    ));
    lines.push(field_line(
        "Session",
        &duels::format_minutes(form.duration_minutes),
        form.field == CreateDuelField::DurationMinutes,
    ));
    lines.push(String::new());
    if let Some(error) = &form.error {
        lines.push(format!("! {error}"));
    }
    lines.push("Tab Field | ↑/↓ Adjust/Select | Enter Choose/Send | Esc Cancel".to_string());

    frame.render_widget(Paragraph::new(lines.join("\n")), inner);
}

fn render_session_picker_overlay(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(picker) = &state.session_picker else {
        return;
    };
    let popup = centered_rect(60, 50, area);
    frame.render_widget(Clear, popup);
    let block = Block::default()
        .title("Submit a Session")
        .borders(Borders::ALL);
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    if state.sessions.is_empty() {
        let empty = Paragraph::new("No recorded sessions to submit. Play one first.")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, inner);
        return;
    }

    let mut lines = vec![format!("  {}", session_header())];
    for (idx, session) in state.sessions.iter().enumerate() {
        let marker = if idx == picker.selected { "> " } else { "  " };
        lines.push(format!("{marker}{}", session_row(session)));
    }
    lines.push(String::new());
    lines.push("Enter Submit | Esc Cancel".to_string());
    frame.render_widget(Paragraph::new(lines.join("\n")), inner);
}

fn render_create_league_overlay(frame: &mut Frame, area: Rect, name: &str) {
    let popup = centered_rect(50, 20, area);
    frame.render_widget(Clear, popup);
    let block = Block::default().title("New League").borders(Borders::ALL);
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let text = format!("Name: {name}\n\nEnter Create | Esc Cancel");
    frame.render_widget(Paragraph::new(text), inner);
}

fn render_career_overlay(frame: &mut Frame, area: Rect, stats: &putt_terminal::state::CareerStats) {
    let popup = centered_rect(40, 40, area);
    frame.render_widget(Clear, popup);
    let title = stats
        .player_name
        .clone()
        .unwrap_or_else(|| "Career Stats".to_string());
    let block = Block::default().title(title).borders(Borders::ALL);
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let text = [
        format!("Sessions:    {}", opt_i64(stats.total_sessions)),
        format!("Makes:       {}", opt_i64(stats.total_makes)),
        format!("Misses:      {}", opt_i64(stats.total_misses)),
        format!("Best streak: {}", opt_i64(stats.best_streak)),
        format!(
            "Fastest 21:  {}",
            stats
                .fastest_21_makes
                .map(|f| format!("{f:.1}s"))
                .unwrap_or_else(|| PLACEHOLDER_DASH.to_string())
        ),
        String::new(),
        "Esc Close".to_string(),
    ]
    .join("\n");
    frame.render_widget(Paragraph::new(text), inner);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Putt Terminal - Help",
        "",
        "Global:",
        "  1-7          Dashboard / Duels / Leagues / Sessions /",
        "               Notifications / Fundraising / Coach",
        "  j/k or ↑/↓   Move selection",
        "  ?            Toggle help",
        "  L            Log out (from the dashboard)",
        "  q            Quit",
        "",
        "Duels:",
        "  Tab          Cycle Pending / Active / Completed",
        "  a / x        Accept / decline a pending challenge",
        "  s            Start a putting session for the duel",
        "  S            Submit a recorded session",
        "  m            Rematch a finished duel",
        "  n            Challenge a new opponent",
        "  o            Opponent career stats",
        "",
        "Leagues:",
        "  Enter        Join (public) or accept (invite)",
        "  x            Decline an invite",
        "  n            Create a league",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }

    let mut start = selected.saturating_sub(visible / 2);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
