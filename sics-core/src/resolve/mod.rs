//! Team + version aware action resolution.

use std::cmp::Ordering;

use crate::error::ResolveError;
use crate::registry::{ActionCatalog, TeamRegistry};
use crate::types::Action;
use crate::version::{self, SemanticVersion};

/// Read-only view over the registries used to answer "which actions can this
/// team call at this version".
#[derive(Clone, Copy)]
pub struct ActionResolver<'a> {
    teams: &'a TeamRegistry,
    catalog: &'a ActionCatalog,
}

impl<'a> ActionResolver<'a> {
    pub fn new(teams: &'a TeamRegistry, catalog: &'a ActionCatalog) -> Self {
        Self { teams, catalog }
    }

    /// The explicit version when given, otherwise the team default.
    pub fn resolve_version(
        &self,
        team_id: &str,
        version: Option<&str>,
    ) -> Result<String, ResolveError> {
        match version.filter(|v| !v.is_empty()) {
            Some(v) => Ok(v.to_string()),
            None => self
                .teams
                .default_version(team_id)
                .ok_or_else(|| ResolveError::NoVersionAvailable {
                    team_id: team_id.to_string(),
                }),
        }
    }

    /// Global actions followed by the team's custom actions, minus anything
    /// deprecated, owned by another team, or outside its version window.
    pub fn resolve_visible(&self, team_id: &str, version: &str) -> Result<Vec<Action>, ResolveError> {
        if !self.teams.is_version_supported(team_id, version) {
            return Err(ResolveError::UnsupportedVersion {
                team_id: team_id.to_string(),
                version: version.to_string(),
            });
        }
        // A supported version always parses; the fallback keeps this total.
        let parsed = version::parse(version).map_err(|_| ResolveError::UnsupportedVersion {
            team_id: team_id.to_string(),
            version: version.to_string(),
        })?;

        let mut source = self.catalog.all();
        if let Some(custom) = self.teams.get(team_id).and_then(|t| t.custom_actions) {
            source.extend(custom);
        }

        Ok(source
            .into_iter()
            .filter(|action| is_visible(action, team_id, &parsed))
            .collect())
    }

    pub fn resolve_one(
        &self,
        action_id: &str,
        team_id: &str,
        version: &str,
    ) -> Result<Option<Action>, ResolveError> {
        Ok(self
            .resolve_visible(team_id, version)?
            .into_iter()
            .find(|a| a.id == action_id))
    }
}

fn is_visible(action: &Action, team_id: &str, version: &SemanticVersion) -> bool {
    if action.deprecated {
        return false;
    }
    if action.team.as_deref().is_some_and(|t| t != team_id) {
        return false;
    }
    within_bound(action, action.min_version.as_deref(), version, Ordering::Less)
        && within_bound(action, action.max_version.as_deref(), version, Ordering::Greater)
}

// `excluded` is the ordering of `version` relative to the bound that hides the action.
fn within_bound(
    action: &Action,
    bound: Option<&str>,
    version: &SemanticVersion,
    excluded: Ordering,
) -> bool {
    let Some(bound) = bound else {
        return true;
    };
    match version::parse(bound) {
        Ok(bound) => version::compare(version, &bound) != excluded,
        Err(e) => {
            tracing::warn!(action_id = %action.id, bound, error = %e, "hiding action with malformed version bound");
            false
        }
    }
}
