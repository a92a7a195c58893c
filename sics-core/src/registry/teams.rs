use indexmap::IndexMap;
use parking_lot::RwLock;

use crate::types::{TeamConfig, TeamUpdate};
use crate::version::{self, SemanticVersion};

/// Per-team version-support policy, keyed by `team_id`.
pub struct TeamRegistry {
    teams: RwLock<IndexMap<String, TeamConfig>>,
}

impl Default for TeamRegistry {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl TeamRegistry {
    pub fn new(teams: Vec<TeamConfig>) -> Self {
        let teams = teams
            .into_iter()
            .map(|t| (t.team_id.clone(), t))
            .collect();
        Self {
            teams: RwLock::new(teams),
        }
    }

    pub fn get(&self, team_id: &str) -> Option<TeamConfig> {
        self.teams.read().get(team_id).cloned()
    }

    pub fn contains(&self, team_id: &str) -> bool {
        self.teams.read().contains_key(team_id)
    }

    pub fn is_version_supported(&self, team_id: &str, version: &str) -> bool {
        let teams = self.teams.read();
        let Some(team) = teams.get(team_id) else {
            return false;
        };
        team.supported_versions
            .iter()
            .any(|range| version::satisfies(version, range))
    }

    pub fn default_version(&self, team_id: &str) -> Option<String> {
        self.teams
            .read()
            .get(team_id)
            .map(|t| t.default_version.clone())
            .filter(|v| !v.is_empty())
    }

    /// Highest `supportedVersions` entry that is itself an exact version.
    /// Range expressions are skipped.
    pub fn latest_supported_version(&self, team_id: &str) -> Option<String> {
        let teams = self.teams.read();
        let team = teams.get(team_id)?;
        team.supported_versions
            .iter()
            .filter_map(|v| version::parse(v).ok().map(|parsed| (parsed, v)))
            .max_by(|(a, _), (b, _)| SemanticVersion::cmp(a, b))
            .map(|(_, raw)| raw.clone())
    }

    pub fn feature_enabled(&self, team_id: &str, flag: &str) -> bool {
        self.teams
            .read()
            .get(team_id)
            .and_then(|t| t.feature_flags.as_ref())
            .and_then(|flags| flags.get(flag).copied())
            .unwrap_or(false)
    }

    pub fn add(&self, team: TeamConfig) {
        tracing::debug!(team_id = %team.team_id, "registering team");
        self.teams.write().insert(team.team_id.clone(), team);
    }

    pub fn update(&self, team_id: &str, update: TeamUpdate) -> bool {
        let mut teams = self.teams.write();
        let Some(team) = teams.get_mut(team_id) else {
            return false;
        };
        update.apply_to(team);
        tracing::debug!(team_id, "updated team");
        true
    }

    pub fn remove(&self, team_id: &str) -> bool {
        let removed = self.teams.write().shift_remove(team_id).is_some();
        if removed {
            tracing::debug!(team_id, "removed team");
        }
        removed
    }

    /// Snapshot in registration order; later mutations do not affect it.
    pub fn all(&self) -> Vec<TeamConfig> {
        self.teams.read().values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.teams.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.read().is_empty()
    }
}
