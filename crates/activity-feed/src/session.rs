//! Application state shared by everything that talks to the backend: where
//! the API lives, the session cookie and the selected team.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TeamId(pub i64);

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Snapshot of the request context. Cheap to clone into a loader thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub api_base: String,
    pub cookie: Option<String>,
    pub team: Option<TeamId>,
}

impl Session {
    /// `{api_base}/{path}` without doubled slashes.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Owner of the [`Session`].
///
/// Every change that alters which logs the backend would return bumps the
/// generation; holders of data derived from an older generation must drop it.
#[derive(Debug)]
pub struct SessionStore {
    session: Session,
    teams: Vec<TeamId>,
    generation: u64,
}

impl SessionStore {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            session: Session {
                api_base: api_base.into(),
                cookie: None,
                team: None,
            },
            teams: Vec::new(),
            generation: 0,
        }
    }

    /// Registers the teams the user can switch between and selects the first.
    pub fn with_teams(mut self, teams: Vec<TeamId>) -> Self {
        self.session.team = teams.first().copied();
        self.teams = teams;
        self
    }

    pub fn with_cookie(mut self, cookie: Option<String>) -> Self {
        self.session.cookie = cookie;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn team(&self) -> Option<TeamId> {
        self.session.team
    }

    pub fn teams(&self) -> &[TeamId] {
        &self.teams
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn set_cookie(&mut self, cookie: Option<String>) {
        if self.session.cookie != cookie {
            self.session.cookie = cookie;
            self.generation += 1;
        }
    }

    /// Selects `team`. Returns false, leaving the generation alone, when it
    /// was already selected.
    pub fn switch_team(&mut self, team: TeamId) -> bool {
        if self.session.team == Some(team) {
            return false;
        }
        if !self.teams.contains(&team) {
            self.teams.push(team);
        }
        self.session.team = Some(team);
        self.generation += 1;
        tracing::debug!(team = %team, generation = self.generation, "switched team");
        true
    }

    /// Switches to the team after the current one, wrapping around.
    pub fn next_team(&mut self) -> Option<TeamId> {
        if self.teams.len() < 2 {
            return None;
        }
        let current = self
            .session
            .team
            .and_then(|team| self.teams.iter().position(|t| *t == team));
        let next = match current {
            Some(index) => self.teams[(index + 1) % self.teams.len()],
            None => self.teams[0],
        };
        self.switch_team(next).then_some(next)
    }
}
