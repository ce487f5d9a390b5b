use std::env;
use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use crate::api;
use crate::state::{Delta, ProviderCommand};

const NOTIFICATIONS_PAGE_LIMIT: u32 = 50;
const SESSIONS_PAGE_LIMIT: u32 = 25;

/// Background worker owning all network traffic. Commands come in from the
/// UI, results go back as deltas; the UI thread never blocks on a request.
pub fn spawn_provider(tx: Sender<Delta>, cmd_rx: Receiver<ProviderCommand>) {
    thread::spawn(move || {
        let notify_interval = Duration::from_secs(
            env::var("NOTIFY_POLL_SECS")
                .ok()
                .and_then(|val| val.parse::<u64>().ok())
                .unwrap_or(45)
                .max(10),
        );
        let mut last_notify_poll = Instant::now();
        let mut signed_in_player: Option<u64> = None;

        loop {
            loop {
                match cmd_rx.try_recv() {
                    Ok(cmd) => handle_command(&tx, &mut signed_in_player, cmd),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => return,
                }
            }

            if let Some(player_id) = signed_in_player
                && last_notify_poll.elapsed() >= notify_interval
            {
                match api::unread_notifications_count(player_id) {
                    Ok(count) => send(&tx, Delta::SetUnreadCount(count)),
                    Err(err) => send(&tx, Delta::Log(format!("[WARN] Unread poll failed: {err}"))),
                }
                last_notify_poll = Instant::now();
            }

            thread::sleep(Duration::from_millis(200));
        }
    });
}

fn send(tx: &Sender<Delta>, delta: Delta) {
    let _ = tx.send(delta);
}

/// A successful duel mutation re-fetches the list before the ok signal goes
/// out, so the UI never unlocks against a classification older than the
/// action it just performed.
fn refresh_duels(tx: &Sender<Delta>, player_id: u64) {
    match api::list_duels(player_id) {
        Ok(duels) => send(tx, Delta::SetDuels(duels)),
        Err(err) => send(tx, Delta::Log(format!("[WARN] Duel refresh failed: {err}"))),
    }
}

fn refresh_leagues(tx: &Sender<Delta>, player_id: u64) {
    match api::list_leagues(player_id) {
        Ok(overview) => send(tx, Delta::SetLeagues(overview)),
        Err(err) => send(tx, Delta::Log(format!("[WARN] League refresh failed: {err}"))),
    }
}

fn refresh_notifications(tx: &Sender<Delta>, player_id: u64) {
    match api::list_notifications(player_id, NOTIFICATIONS_PAGE_LIMIT, 0) {
        Ok(items) => send(tx, Delta::SetNotifications(items)),
        Err(err) => send(
            tx,
            Delta::Log(format!("[WARN] Notification refresh failed: {err}")),
        ),
    }
    match api::unread_notifications_count(player_id) {
        Ok(count) => send(tx, Delta::SetUnreadCount(count)),
        Err(err) => send(tx, Delta::Log(format!("[WARN] Unread poll failed: {err}"))),
    }
}

fn handle_command(tx: &Sender<Delta>, signed_in_player: &mut Option<u64>, cmd: ProviderCommand) {
    match cmd {
        ProviderCommand::Login { email, password } => match api::login(&email, &password) {
            Ok(profile) => {
                *signed_in_player = Some(profile.player_id);
                send(tx, Delta::SignedIn(profile));
            }
            Err(err) => send(tx, Delta::AuthFailed(err.to_string())),
        },
        ProviderCommand::Register {
            email,
            password,
            name,
        } => match api::register(&email, &password, &name) {
            Ok(profile) => {
                *signed_in_player = Some(profile.player_id);
                send(tx, Delta::SignedIn(profile));
            }
            Err(err) => send(tx, Delta::AuthFailed(err.to_string())),
        },
        ProviderCommand::FetchPlayerData { player_id } => {
            match api::fetch_player_data(player_id) {
                Ok(profile) => send(tx, Delta::SetPlayerData(profile)),
                Err(err) => send(tx, Delta::Log(format!("[WARN] Player fetch failed: {err}"))),
            }
        }
        ProviderCommand::FetchCareerStats { player_id } => {
            match api::fetch_career_stats(player_id) {
                Ok(stats) => send(tx, Delta::SetCareerStats(stats)),
                Err(err) => send(tx, Delta::ActionFailed(err.to_string())),
            }
        }
        ProviderCommand::FetchDuels { player_id } => refresh_duels(tx, player_id),
        ProviderCommand::CreateDuel {
            request,
            success_message,
        } => match api::create_duel(&request) {
            Ok(_) => {
                refresh_duels(tx, request.creator_id);
                send(tx, Delta::ActionOk(success_message));
            }
            Err(err) => send(tx, Delta::ActionFailed(err.to_string())),
        },
        ProviderCommand::AcceptDuel { duel_id, player_id } => {
            match api::accept_duel(duel_id, player_id) {
                Ok(_) => {
                    refresh_duels(tx, player_id);
                    send(tx, Delta::ActionOk("Duel accepted!".to_string()));
                }
                Err(err) => send(tx, Delta::ActionFailed(err.to_string())),
            }
        }
        ProviderCommand::RejectDuel { duel_id, player_id } => {
            match api::reject_duel(duel_id, player_id) {
                Ok(_) => {
                    refresh_duels(tx, player_id);
                    send(tx, Delta::ActionOk("Duel rejected.".to_string()));
                }
                Err(err) => send(tx, Delta::ActionFailed(err.to_string())),
            }
        }
        ProviderCommand::StartSession { player_id, duel_id } => {
            match api::start_session(player_id, duel_id, None) {
                Ok(ack) => {
                    let message = if ack.message.is_empty() {
                        "Session started.".to_string()
                    } else {
                        ack.message
                    };
                    send(tx, Delta::ActionOk(message));
                }
                Err(err) => send(tx, Delta::ActionFailed(err.to_string())),
            }
        }
        ProviderCommand::SubmitDuelSession {
            duel_id,
            session_id,
            player_id,
            score,
            duration,
        } => match api::submit_duel_session(duel_id, session_id, player_id, score, duration) {
            Ok(()) => {
                refresh_duels(tx, player_id);
                send(tx, Delta::ActionOk("Session submitted.".to_string()));
            }
            Err(err) => send(tx, Delta::ActionFailed(err.to_string())),
        },
        ProviderCommand::SearchPlayers { term, requester_id } => {
            match api::search_players(&term) {
                Ok(players) => {
                    let players = players
                        .into_iter()
                        .filter(|p| p.player_id != requester_id)
                        .collect();
                    send(tx, Delta::SetSearchResults { term, players });
                }
                Err(err) => send(tx, Delta::Log(format!("[WARN] Player search failed: {err}"))),
            }
        }
        ProviderCommand::FetchLeagues { player_id } => refresh_leagues(tx, player_id),
        ProviderCommand::CreateLeague {
            creator_id,
            name,
            description,
            privacy_type,
        } => match api::create_league(creator_id, &name, &description, &privacy_type) {
            Ok(()) => {
                refresh_leagues(tx, creator_id);
                send(tx, Delta::ActionOk(format!("League '{name}' created.")));
            }
            Err(err) => send(tx, Delta::ActionFailed(err.to_string())),
        },
        ProviderCommand::JoinLeague {
            league_id,
            player_id,
        } => match api::join_league(league_id, player_id) {
            Ok(()) => {
                refresh_leagues(tx, player_id);
                send(tx, Delta::ActionOk("Joined league.".to_string()));
            }
            Err(err) => send(tx, Delta::ActionFailed(err.to_string())),
        },
        ProviderCommand::RespondLeagueInvite {
            league_id,
            player_id,
            accept,
        } => match api::respond_league_invite(league_id, player_id, accept) {
            Ok(()) => {
                refresh_leagues(tx, player_id);
                let message = if accept {
                    "League invite accepted."
                } else {
                    "League invite declined."
                };
                send(tx, Delta::ActionOk(message.to_string()));
            }
            Err(err) => send(tx, Delta::ActionFailed(err.to_string())),
        },
        ProviderCommand::FetchSessions { player_id, page } => {
            match api::fetch_player_sessions(player_id, page, SESSIONS_PAGE_LIMIT) {
                Ok(result) => send(
                    tx,
                    Delta::SetSessions {
                        page,
                        total_pages: result.total_pages,
                        sessions: result.sessions,
                    },
                ),
                Err(err) => send(tx, Delta::Log(format!("[WARN] Session fetch failed: {err}"))),
            }
        }
        ProviderCommand::FetchNotifications { player_id } => refresh_notifications(tx, player_id),
        ProviderCommand::MarkNotificationRead {
            notification_id,
            player_id,
        } => match api::mark_notification_read(notification_id, player_id) {
            Ok(()) => refresh_notifications(tx, player_id),
            Err(err) => send(tx, Delta::ActionFailed(err.to_string())),
        },
        ProviderCommand::MarkAllNotificationsRead { player_id } => {
            match api::mark_all_notifications_read(player_id) {
                Ok(()) => refresh_notifications(tx, player_id),
                Err(err) => send(tx, Delta::ActionFailed(err.to_string())),
            }
        }
        ProviderCommand::FetchFundraisers => match api::list_fundraisers() {
            Ok(items) => send(tx, Delta::SetFundraisers(items)),
            Err(err) => send(
                tx,
                Delta::Log(format!("[WARN] Fundraiser fetch failed: {err}")),
            ),
        },
        ProviderCommand::CoachChat {
            player_id,
            conversation_id,
            message,
        } => match api::coach_chat(player_id, conversation_id, &message) {
            Ok(reply) => send(
                tx,
                Delta::CoachReplyReceived {
                    conversation_id: reply.conversation_id,
                    reply: reply.reply,
                },
            ),
            Err(err) => send(tx, Delta::ActionFailed(err.to_string())),
        },
        ProviderCommand::FetchConversations { player_id } => {
            match api::list_conversations(player_id) {
                Ok(items) => send(tx, Delta::SetConversations(items)),
                Err(err) => send(
                    tx,
                    Delta::Log(format!("[WARN] Conversation fetch failed: {err}")),
                ),
            }
        }
    }
}
