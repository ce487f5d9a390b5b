use serde::{Deserialize, Serialize};

pub const RESTRICTED_CREATE_DUEL_MESSAGE: &str =
    "Only full subscribed users can create a duel, free users can accept challenges.";
pub const RESTRICTED_CREATE_LEAGUE_MESSAGE: &str =
    "Only full subscribed users can create a league.";

/// All-time practice stats embedded in the player payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    #[serde(default)]
    pub total_makes: Option<i64>,
    #[serde(default)]
    pub total_misses: Option<i64>,
    #[serde(default)]
    pub best_streak: Option<i64>,
    #[serde(default)]
    pub fastest_21_makes: Option<f64>,
}

impl PlayerStats {
    pub fn accuracy_percent(&self) -> Option<f64> {
        let makes = self.total_makes? as f64;
        let misses = self.total_misses? as f64;
        let total = makes + misses;
        if total > 0.0 { Some(makes / total * 100.0) } else { None }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: u64,
    #[serde(default, alias = "start_time")]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub total_putts: Option<i64>,
    #[serde(default)]
    pub made_putts: Option<i64>,
    #[serde(default)]
    pub missed_putts: Option<i64>,
    #[serde(default)]
    pub best_streak: Option<i64>,
    #[serde(default)]
    pub duration_minutes: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionsPage {
    #[serde(default)]
    pub sessions: Vec<SessionSummary>,
    #[serde(default)]
    pub total_pages: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub player_id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subscription_status: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub stats: Option<PlayerStats>,
    #[serde(default)]
    pub sessions: Vec<SessionSummary>,
}

impl PlayerProfile {
    /// Entitlement flag. Advisory only; the backend re-checks every gated
    /// action, so this controls UI affordances and nothing more.
    pub fn has_full_access(&self) -> bool {
        self.subscription_status.as_deref() == Some("active")
    }
}

/// The authenticated player, populated on login/registration and cleared on
/// logout. Lives in `AppState` and is passed down to whatever needs the
/// viewer's identity; nothing reads it as a global.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    player: Option<PlayerProfile>,
}

impl SessionContext {
    pub fn sign_in(&mut self, profile: PlayerProfile) {
        self.player = Some(profile);
    }

    pub fn sign_out(&mut self) {
        self.player = None;
    }

    pub fn player(&self) -> Option<&PlayerProfile> {
        self.player.as_ref()
    }

    pub fn player_mut(&mut self) -> Option<&mut PlayerProfile> {
        self.player.as_mut()
    }

    pub fn player_id(&self) -> Option<u64> {
        self.player.as_ref().map(|p| p.player_id)
    }

    pub fn is_signed_in(&self) -> bool {
        self.player.is_some()
    }

    pub fn has_full_access(&self) -> bool {
        self.player
            .as_ref()
            .is_some_and(PlayerProfile::has_full_access)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(status: Option<&str>) -> PlayerProfile {
        PlayerProfile {
            player_id: 7,
            name: "Test".to_string(),
            email: "test@example.com".to_string(),
            subscription_status: status.map(str::to_string),
            timezone: None,
            stats: None,
            sessions: Vec::new(),
        }
    }

    #[test]
    fn entitlement_requires_active_subscription() {
        let mut ctx = SessionContext::default();
        assert!(!ctx.has_full_access());
        ctx.sign_in(profile(Some("active")));
        assert!(ctx.has_full_access());
        ctx.sign_in(profile(Some("free")));
        assert!(!ctx.has_full_access());
        ctx.sign_in(profile(None));
        assert!(!ctx.has_full_access());
    }

    #[test]
    fn lifecycle_populates_and_clears() {
        let mut ctx = SessionContext::default();
        assert!(!ctx.is_signed_in());
        ctx.sign_in(profile(Some("active")));
        assert_eq!(ctx.player_id(), Some(7));
        ctx.sign_out();
        assert!(ctx.player().is_none());
    }

    #[test]
    fn accuracy_needs_recorded_putts() {
        let stats = PlayerStats {
            total_makes: Some(60),
            total_misses: Some(40),
            ..PlayerStats::default()
        };
        assert_eq!(stats.accuracy_percent(), Some(60.0));
        assert_eq!(PlayerStats::default().accuracy_percent(), None);
    }
}
