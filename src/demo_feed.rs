use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use chrono::{Duration as ChronoDuration, Utc};
use rand::Rng;

use crate::duels::{Duel, DuelStatus};
use crate::session::{PlayerProfile, PlayerStats, SessionSummary};
use crate::state::{
    Conversation, Delta, Fundraiser, League, LeaguesOverview, NotificationItem, PlayerSummary,
    ProviderCommand,
};

const DEMO_VIEWER_ID: u64 = 1;

const COACH_TIPS: [&str; 4] = [
    "Your make rate dips after the 15 minute mark. Try shorter, more frequent sessions.",
    "Keep the putter face square through impact; your misses cluster left.",
    "Solid streak work this week. Add pressure putts from 6 feet to lock it in.",
    "Tempo first, speed second. Count one-two on every stroke today.",
];

/// Offline provider: answers the same commands as the network provider from a
/// small seeded world, so the whole UI can run without a backend.
pub fn spawn_demo_provider(tx: Sender<Delta>, cmd_rx: Receiver<ProviderCommand>) {
    thread::spawn(move || {
        let mut rng = rand::thread_rng();
        let mut world = DemoWorld::seed();
        let sim_interval = Duration::from_secs(18);
        let mut last_sim = Instant::now();

        let _ = tx.send(Delta::Log(
            "[INFO] Demo feed active (no backend configured)".to_string(),
        ));

        loop {
            loop {
                match cmd_rx.try_recv() {
                    Ok(cmd) => world.handle(&tx, &mut rng, cmd),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => return,
                }
            }

            if last_sim.elapsed() >= sim_interval {
                if world.signed_in && world.simulate_opponents(&tx, &mut rng) {
                    let _ = tx.send(Delta::SetDuels(world.duels.clone()));
                }
                last_sim = Instant::now();
            }

            thread::sleep(Duration::from_millis(200));
        }
    });
}

struct DemoWorld {
    signed_in: bool,
    profile: PlayerProfile,
    roster: Vec<PlayerSummary>,
    duels: Vec<Duel>,
    leagues: LeaguesOverview,
    notifications: Vec<NotificationItem>,
    fundraisers: Vec<Fundraiser>,
    sessions: Vec<SessionSummary>,
    conversations: Vec<Conversation>,
    next_id: u64,
}

impl DemoWorld {
    fn seed() -> Self {
        let now = Utc::now();
        let roster = vec![
            player(2, "Marta Keel"),
            player(3, "Jonas Brandt"),
            player(4, "Priya Nair"),
            player(5, "Sam Okafor"),
        ];

        let duels = vec![
            // Invitation waiting on the viewer, inside the countdown window.
            seeded_duel(101, 2, "Marta Keel", DEMO_VIEWER_ID, "You", DuelStatus::Pending)
                .expires(now + ChronoDuration::hours(36)),
            // Viewer's own challenge, expiry far enough out for a date cell.
            seeded_duel(102, DEMO_VIEWER_ID, "You", 3, "Jonas Brandt", DuelStatus::Pending)
                .terms(10080, 10)
                .expires(now + ChronoDuration::hours(160)),
            seeded_duel(103, DEMO_VIEWER_ID, "You", 4, "Priya Nair", DuelStatus::Accepted),
            seeded_duel(104, 5, "Sam Okafor", DEMO_VIEWER_ID, "You", DuelStatus::Completed)
                .scores(24, 31)
                .winner(DEMO_VIEWER_ID)
                .ended(now - ChronoDuration::days(2)),
            seeded_duel(105, DEMO_VIEWER_ID, "You", 2, "Marta Keel", DuelStatus::Completed)
                .scores(27, 27)
                .ended(now - ChronoDuration::days(5)),
            seeded_duel(106, 3, "Jonas Brandt", DEMO_VIEWER_ID, "You", DuelStatus::Expired)
                .ended(now - ChronoDuration::days(9)),
            // Declined duels are fetched but never shown; keep one around so
            // the hiding behaviour is visible in the data.
            seeded_duel(107, DEMO_VIEWER_ID, "You", 5, "Sam Okafor", DuelStatus::Declined),
        ];

        let leagues = LeaguesOverview {
            my_leagues: vec![league(201, "Tuesday Grinders", "private", 8, "active", None)],
            public_leagues: vec![
                league(202, "Open Putting Ladder", "public", 42, "active", None),
                league(203, "Winter Cup", "public", 17, "enrolling", None),
            ],
            pending_invites: vec![league(
                204,
                "Clubhouse Clash",
                "private",
                6,
                "enrolling",
                Some("Marta Keel"),
            )],
        };

        let notifications = vec![
            notification(301, "Marta Keel challenged you to a duel.", "unread", &now),
            notification(302, "Your Winter Cup round opens tomorrow.", "unread", &now),
            notification(303, "Weekly recap: 412 putts, 71% makes.", "read", &now),
        ];

        let fundraisers = vec![
            Fundraiser {
                fundraiser_id: 401,
                name: "Junior Golf Outreach".to_string(),
                description: Some("Putting mats for local schools".to_string()),
                goal_amount: Some(5000.0),
                raised_amount: Some(3650.0),
                status: Some("active".to_string()),
            },
            Fundraiser {
                fundraiser_id: 402,
                name: "Clubhouse Green Rebuild".to_string(),
                description: None,
                goal_amount: Some(12000.0),
                raised_amount: Some(1200.0),
                status: Some("active".to_string()),
            },
        ];

        let sessions = (0..6)
            .map(|i| {
                let made = 58 - i * 3;
                SessionSummary {
                    session_id: 500 + i as u64,
                    timestamp: Some((now - ChronoDuration::days(i)).to_rfc3339()),
                    total_putts: Some(80),
                    made_putts: Some(made),
                    missed_putts: Some(80 - made),
                    best_streak: Some(12 - i),
                    duration_minutes: Some(10.0),
                }
            })
            .collect::<Vec<_>>();

        let profile = PlayerProfile {
            player_id: DEMO_VIEWER_ID,
            name: "Demo Player".to_string(),
            email: "demo@example.com".to_string(),
            subscription_status: Some("active".to_string()),
            timezone: Some("UTC".to_string()),
            stats: Some(PlayerStats {
                total_makes: Some(2312),
                total_misses: Some(905),
                best_streak: Some(19),
                fastest_21_makes: Some(84.2),
            }),
            sessions: sessions.iter().take(3).cloned().collect(),
        };

        let conversations = vec![Conversation {
            conversation_id: 601,
            title: Some("Lag putting drills".to_string()),
            updated_at: Some((now - ChronoDuration::days(1)).to_rfc3339()),
        }];

        Self {
            signed_in: false,
            profile,
            roster,
            duels,
            leagues,
            notifications,
            fundraisers,
            sessions,
            conversations,
            next_id: 1000,
        }
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn duel_mut(&mut self, duel_id: u64) -> Option<&mut Duel> {
        self.duels.iter_mut().find(|d| d.duel_id == duel_id)
    }

    fn unread(&self) -> u64 {
        self.notifications.iter().filter(|n| n.is_unread()).count() as u64
    }

    /// Resolve a duel once both sides have submitted: higher score wins,
    /// equal scores draw.
    fn maybe_resolve(duel: &mut Duel) {
        if duel.status != DuelStatus::Accepted {
            return;
        }
        let (Some(creator), Some(invited)) = (duel.creator_score, duel.invited_player_score)
        else {
            return;
        };
        duel.status = DuelStatus::Completed;
        duel.winner_id = match creator.cmp(&invited) {
            std::cmp::Ordering::Greater => Some(duel.creator_id),
            std::cmp::Ordering::Less => Some(duel.invited_player_id),
            std::cmp::Ordering::Equal => None,
        };
        duel.end_time = Some(Utc::now().to_rfc3339());
    }

    fn simulate_opponents(&mut self, tx: &Sender<Delta>, rng: &mut impl Rng) -> bool {
        let mut changed = false;

        // Opponents occasionally accept the viewer's open challenges.
        if rng.gen_bool(0.5)
            && let Some(duel) = self.duels.iter_mut().find(|d| {
                d.status == DuelStatus::Pending && d.creator_id == DEMO_VIEWER_ID
            })
        {
            duel.status = DuelStatus::Accepted;
            let _ = tx.send(Delta::Log(format!(
                "[INFO] {} accepted your challenge",
                duel.invited_player_name
            )));
            changed = true;
        }

        // ...and play their side of an accepted duel.
        let session_id = self.next_id();
        if let Some(duel) = self.duels.iter_mut().find(|d| {
            d.status == DuelStatus::Accepted
                && ((d.creator_id != DEMO_VIEWER_ID && d.creator_submitted_session_id.is_none())
                    || (d.invited_player_id != DEMO_VIEWER_ID
                        && d.invited_player_submitted_session_id.is_none()))
        }) && rng.gen_bool(0.4)
        {
            let score = rng.gen_range(18..38);
            let duration = duel.session_duration_limit_minutes.unwrap_or(5) as f64 * 60.0;
            if duel.creator_id != DEMO_VIEWER_ID {
                duel.creator_submitted_session_id = Some(session_id);
                duel.creator_score = Some(score);
                duel.creator_duration = Some(duration);
            } else {
                duel.invited_player_submitted_session_id = Some(session_id);
                duel.invited_player_score = Some(score);
                duel.invited_player_duration = Some(duration);
            }
            Self::maybe_resolve(duel);
            changed = true;
        }

        changed
    }

    fn handle(&mut self, tx: &Sender<Delta>, rng: &mut impl Rng, cmd: ProviderCommand) {
        match cmd {
            ProviderCommand::Login { email, .. } => {
                self.signed_in = true;
                if let Some(prefix) = email.split('@').next()
                    && !prefix.is_empty()
                {
                    self.profile.name = prefix.to_string();
                    self.profile.email = email;
                }
                let _ = tx.send(Delta::SignedIn(self.profile.clone()));
                let _ = tx.send(Delta::SetUnreadCount(self.unread()));
            }
            ProviderCommand::Register { email, name, .. } => {
                self.signed_in = true;
                self.profile.name = name;
                self.profile.email = email;
                let _ = tx.send(Delta::SignedIn(self.profile.clone()));
                let _ = tx.send(Delta::SetUnreadCount(self.unread()));
            }
            ProviderCommand::FetchPlayerData { .. } => {
                let _ = tx.send(Delta::SetPlayerData(self.profile.clone()));
            }
            ProviderCommand::FetchCareerStats { player_id } => {
                let stats = crate::state::CareerStats {
                    player_name: self
                        .roster
                        .iter()
                        .find(|p| p.player_id == player_id)
                        .map(|p| p.name.clone())
                        .or_else(|| Some(self.profile.name.clone())),
                    total_sessions: Some(64),
                    total_makes: Some(1980),
                    total_misses: Some(840),
                    best_streak: Some(16),
                    fastest_21_makes: Some(96.5),
                };
                let _ = tx.send(Delta::SetCareerStats(stats));
            }
            ProviderCommand::FetchDuels { .. } => {
                let _ = tx.send(Delta::SetDuels(self.duels.clone()));
            }
            ProviderCommand::CreateDuel {
                request,
                success_message,
            } => {
                let opponent = self
                    .roster
                    .iter()
                    .find(|p| p.player_id == request.invited_player_id)
                    .cloned();
                let Some(opponent) = opponent else {
                    let _ = tx.send(Delta::ActionFailed("No such player.".to_string()));
                    return;
                };
                let duel_id = self.next_id();
                let creator_name = self.profile.name.clone();
                let duel = seeded_duel(
                    duel_id,
                    DEMO_VIEWER_ID,
                    &creator_name,
                    opponent.player_id,
                    &opponent.name,
                    DuelStatus::Pending,
                )
                .terms(
                    request.invitation_expiry_minutes,
                    request.session_duration_limit_minutes,
                )
                .expires(Utc::now() + ChronoDuration::minutes(request.invitation_expiry_minutes));
                self.duels.insert(0, duel);
                let _ = tx.send(Delta::SetDuels(self.duels.clone()));
                let _ = tx.send(Delta::ActionOk(success_message));
            }
            ProviderCommand::AcceptDuel { duel_id, player_id } => {
                let result = match self.duel_mut(duel_id) {
                    Some(duel)
                        if duel.status == DuelStatus::Pending
                            && duel.invited_player_id == player_id =>
                    {
                        duel.status = DuelStatus::Accepted;
                        Ok(())
                    }
                    Some(_) => Err("Duel is no longer pending.".to_string()),
                    None => Err("Duel not found.".to_string()),
                };
                match result {
                    Ok(()) => {
                        let _ = tx.send(Delta::SetDuels(self.duels.clone()));
                        let _ = tx.send(Delta::ActionOk("Duel accepted!".to_string()));
                    }
                    Err(msg) => {
                        let _ = tx.send(Delta::ActionFailed(msg));
                    }
                }
            }
            ProviderCommand::RejectDuel { duel_id, player_id } => {
                let result = match self.duel_mut(duel_id) {
                    Some(duel)
                        if duel.status == DuelStatus::Pending
                            && duel.invited_player_id == player_id =>
                    {
                        duel.status = DuelStatus::Declined;
                        duel.end_time = Some(Utc::now().to_rfc3339());
                        Ok(())
                    }
                    Some(_) => Err("Duel is no longer pending.".to_string()),
                    None => Err("Duel not found.".to_string()),
                };
                match result {
                    Ok(()) => {
                        let _ = tx.send(Delta::SetDuels(self.duels.clone()));
                        let _ = tx.send(Delta::ActionOk("Duel rejected.".to_string()));
                    }
                    Err(msg) => {
                        let _ = tx.send(Delta::ActionFailed(msg));
                    }
                }
            }
            ProviderCommand::StartSession { duel_id, .. } => {
                let message = match duel_id {
                    Some(id) => format!("Session started for duel #{id}. Putt well!"),
                    None => "Session started. Putt well!".to_string(),
                };
                let _ = tx.send(Delta::ActionOk(message));
            }
            ProviderCommand::SubmitDuelSession {
                duel_id,
                session_id,
                player_id,
                score,
                duration,
            } => {
                let result = match self.duel_mut(duel_id) {
                    Some(duel) if duel.status == DuelStatus::Accepted => {
                        if duel.creator_id == player_id {
                            duel.creator_submitted_session_id = Some(session_id);
                            duel.creator_score = Some(score);
                            duel.creator_duration = Some(duration);
                        } else {
                            duel.invited_player_submitted_session_id = Some(session_id);
                            duel.invited_player_score = Some(score);
                            duel.invited_player_duration = Some(duration);
                        }
                        Self::maybe_resolve(duel);
                        Ok(())
                    }
                    Some(_) => Err("Duel is not accepting sessions.".to_string()),
                    None => Err("Duel not found.".to_string()),
                };
                match result {
                    Ok(()) => {
                        let _ = tx.send(Delta::SetDuels(self.duels.clone()));
                        let _ = tx.send(Delta::ActionOk("Session submitted.".to_string()));
                    }
                    Err(msg) => {
                        let _ = tx.send(Delta::ActionFailed(msg));
                    }
                }
            }
            ProviderCommand::SearchPlayers { term, requester_id } => {
                let needle = term.to_lowercase();
                let players = self
                    .roster
                    .iter()
                    .filter(|p| {
                        p.player_id != requester_id && p.name.to_lowercase().contains(&needle)
                    })
                    .cloned()
                    .collect();
                let _ = tx.send(Delta::SetSearchResults { term, players });
            }
            ProviderCommand::FetchLeagues { .. } => {
                let _ = tx.send(Delta::SetLeagues(self.leagues.clone()));
            }
            ProviderCommand::CreateLeague {
                name,
                description,
                privacy_type,
                ..
            } => {
                let league_id = self.next_id();
                self.leagues.my_leagues.push(League {
                    league_id,
                    name: name.clone(),
                    description: Some(description),
                    privacy_type: Some(privacy_type),
                    member_count: Some(1),
                    status: Some("enrolling".to_string()),
                    inviter_name: None,
                });
                let _ = tx.send(Delta::SetLeagues(self.leagues.clone()));
                let _ = tx.send(Delta::ActionOk(format!("League '{name}' created.")));
            }
            ProviderCommand::JoinLeague { league_id, .. } => {
                if let Some(pos) = self
                    .leagues
                    .public_leagues
                    .iter()
                    .position(|l| l.league_id == league_id)
                {
                    let league = self.leagues.public_leagues.remove(pos);
                    self.leagues.my_leagues.push(league);
                    let _ = tx.send(Delta::SetLeagues(self.leagues.clone()));
                    let _ = tx.send(Delta::ActionOk("Joined league.".to_string()));
                } else {
                    let _ = tx.send(Delta::ActionFailed("League not found.".to_string()));
                }
            }
            ProviderCommand::RespondLeagueInvite {
                league_id, accept, ..
            } => {
                if let Some(pos) = self
                    .leagues
                    .pending_invites
                    .iter()
                    .position(|l| l.league_id == league_id)
                {
                    let league = self.leagues.pending_invites.remove(pos);
                    let message = if accept {
                        self.leagues.my_leagues.push(league);
                        "League invite accepted."
                    } else {
                        "League invite declined."
                    };
                    let _ = tx.send(Delta::SetLeagues(self.leagues.clone()));
                    let _ = tx.send(Delta::ActionOk(message.to_string()));
                } else {
                    let _ = tx.send(Delta::ActionFailed("Invite not found.".to_string()));
                }
            }
            ProviderCommand::FetchSessions { page, .. } => {
                let _ = tx.send(Delta::SetSessions {
                    page,
                    total_pages: 1,
                    sessions: self.sessions.clone(),
                });
            }
            ProviderCommand::FetchNotifications { .. } => {
                let _ = tx.send(Delta::SetNotifications(self.notifications.clone()));
                let _ = tx.send(Delta::SetUnreadCount(self.unread()));
            }
            ProviderCommand::MarkNotificationRead {
                notification_id, ..
            } => {
                if let Some(item) = self
                    .notifications
                    .iter_mut()
                    .find(|n| n.notification_id == notification_id)
                {
                    item.status = Some("read".to_string());
                }
                let _ = tx.send(Delta::SetNotifications(self.notifications.clone()));
                let _ = tx.send(Delta::SetUnreadCount(self.unread()));
            }
            ProviderCommand::MarkAllNotificationsRead { .. } => {
                for item in &mut self.notifications {
                    item.status = Some("read".to_string());
                }
                let _ = tx.send(Delta::SetNotifications(self.notifications.clone()));
                let _ = tx.send(Delta::SetUnreadCount(0));
            }
            ProviderCommand::FetchFundraisers => {
                let _ = tx.send(Delta::SetFundraisers(self.fundraisers.clone()));
            }
            ProviderCommand::CoachChat {
                conversation_id, ..
            } => {
                let reply = COACH_TIPS[rng.gen_range(0..COACH_TIPS.len())].to_string();
                let conversation_id = conversation_id.or_else(|| {
                    let id = self.next_id();
                    self.conversations.insert(
                        0,
                        Conversation {
                            conversation_id: id,
                            title: Some("New conversation".to_string()),
                            updated_at: Some(Utc::now().to_rfc3339()),
                        },
                    );
                    Some(id)
                });
                let _ = tx.send(Delta::CoachReplyReceived {
                    conversation_id,
                    reply,
                });
            }
            ProviderCommand::FetchConversations { .. } => {
                let _ = tx.send(Delta::SetConversations(self.conversations.clone()));
            }
        }
    }
}

fn player(player_id: u64, name: &str) -> PlayerSummary {
    PlayerSummary {
        player_id,
        name: name.to_string(),
        email: None,
    }
}

fn league(
    league_id: u64,
    name: &str,
    privacy: &str,
    members: i64,
    status: &str,
    inviter: Option<&str>,
) -> League {
    League {
        league_id,
        name: name.to_string(),
        description: None,
        privacy_type: Some(privacy.to_string()),
        member_count: Some(members),
        status: Some(status.to_string()),
        inviter_name: inviter.map(str::to_string),
    }
}

fn notification(
    id: u64,
    message: &str,
    status: &str,
    now: &chrono::DateTime<Utc>,
) -> NotificationItem {
    NotificationItem {
        notification_id: id,
        message: message.to_string(),
        status: Some(status.to_string()),
        created_at: Some(now.to_rfc3339()),
    }
}

fn seeded_duel(
    duel_id: u64,
    creator_id: u64,
    creator_name: &str,
    invited_id: u64,
    invited_name: &str,
    status: DuelStatus,
) -> Duel {
    Duel {
        duel_id,
        creator_id,
        invited_player_id: invited_id,
        creator_name: creator_name.to_string(),
        invited_player_name: invited_name.to_string(),
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

// Small builder-ish helpers keep the seed data readable.
trait DuelSeedExt {
    fn expires(self, when: chrono::DateTime<Utc>) -> Duel;
    fn terms(self, expiry_minutes: i64, duration_minutes: i64) -> Duel;
    fn scores(self, creator: i64, invited: i64) -> Duel;
    fn winner(self, player_id: u64) -> Duel;
    fn ended(self, when: chrono::DateTime<Utc>) -> Duel;
}

impl DuelSeedExt for Duel {
    fn expires(mut self, when: chrono::DateTime<Utc>) -> Duel {
        self.invitation_expires_at = Some(when.to_rfc3339());
        self
    }

    fn terms(mut self, expiry_minutes: i64, duration_minutes: i64) -> Duel {
        self.invitation_expiry_minutes = Some(expiry_minutes);
        self.session_duration_limit_minutes = Some(duration_minutes);
        self
    }

    fn scores(mut self, creator: i64, invited: i64) -> Duel {
        self.creator_score = Some(creator);
        self.invited_player_score = Some(invited);
        self.creator_duration = Some(280.0);
        self.invited_player_duration = Some(295.0);
        self.creator_submitted_session_id = Some(700);
        self.invited_player_submitted_session_id = Some(701);
        self
    }

    fn winner(mut self, player_id: u64) -> Duel {
        self.winner_id = Some(player_id);
        self
    }

    fn ended(mut self, when: chrono::DateTime<Utc>) -> Duel {
        self.end_time = Some(when.to_rfc3339());
        self
    }
}
