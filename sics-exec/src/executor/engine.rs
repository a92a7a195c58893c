use std::sync::Arc;

use serde_json::json;
use sics_core::{
    validate_parameters, Action, ActionCatalog, ActionResolver, AdapterConfig, ConfigError,
    ErrorCode, ExecutionContext, ExecutionResult, SicsError, TeamRegistry,
};
use tokio::time::Instant;

use crate::executor::dispatch::Dispatcher;
use crate::executor::events::{Event, EventSink, TracingEventSink};
use crate::executor::health::{self, HealthStatus};
use crate::executor::http::{HttpClient, ReqwestHttpClient};
use crate::executor::request::{endpoint_url, DispatchPayload};
use crate::retry::RetryConfig;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to build http client: {0}")]
    HttpClient(String),
}

/// Resolves, validates and dispatches action executions for every configured
/// team. Cheap to share behind an `Arc`; concurrent `execute` calls only
/// share the registries.
pub struct ExecutionEngine {
    config: AdapterConfig,
    teams: TeamRegistry,
    catalog: ActionCatalog,
    http: Arc<dyn HttpClient>,
    retry: RetryConfig,
    event_sink: Arc<dyn EventSink>,
}

impl ExecutionEngine {
    /// Validates `config` and builds a reqwest-backed engine.
    pub fn new(config: AdapterConfig) -> Result<Self, EngineError> {
        let http = ReqwestHttpClient::new().map_err(|e| EngineError::HttpClient(e.to_string()))?;
        Self::with_http_client(config, Arc::new(http))
    }

    pub fn with_http_client(
        config: AdapterConfig,
        http: Arc<dyn HttpClient>,
    ) -> Result<Self, EngineError> {
        config.validate().map_err(ConfigError::from)?;

        let teams = TeamRegistry::new(config.teams.clone());
        let catalog = ActionCatalog::new(config.global_actions.clone());
        let retry = RetryConfig::with_max_retries(config.retry_attempts as usize);
        tracing::info!(
            base_url = %config.base_url,
            teams = teams.len(),
            actions = catalog.count(),
            "execution engine ready"
        );

        Ok(Self {
            config,
            teams,
            catalog,
            http,
            retry,
            event_sink: Arc::new(TracingEventSink),
        })
    }

    pub fn with_event_sink(mut self, event_sink: Arc<dyn EventSink>) -> Self {
        self.event_sink = event_sink;
        self
    }

    /// Overrides the backoff derived from `retryAttempts`.
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    pub fn team_registry(&self) -> &TeamRegistry {
        &self.teams
    }

    pub fn catalog(&self) -> &ActionCatalog {
        &self.catalog
    }

    pub fn resolver(&self) -> ActionResolver<'_> {
        ActionResolver::new(&self.teams, &self.catalog)
    }

    /// Actions visible to `team_id` at `version`, or at the team default
    /// when no version is given.
    pub fn get_available_actions(
        &self,
        team_id: &str,
        version: Option<&str>,
    ) -> Result<Vec<Action>, SicsError> {
        let resolver = self.resolver();
        let version = resolver.resolve_version(team_id, version)?;
        Ok(resolver.resolve_visible(team_id, &version)?)
    }

    pub fn get_action_by_id(
        &self,
        action_id: &str,
        team_id: &str,
        version: Option<&str>,
    ) -> Result<Option<Action>, SicsError> {
        Ok(self
            .get_available_actions(team_id, version)?
            .into_iter()
            .find(|a| a.id == action_id))
    }

    /// Runs one action. Never fails: every outcome, including rejected
    /// input and transport failures, comes back as an `ExecutionResult`.
    #[tracing::instrument(
        name = "execute",
        skip_all,
        fields(request_id = %ctx.request_id, team_id = %ctx.team_id, action_id = %ctx.action.id)
    )]
    pub async fn execute(&self, ctx: &ExecutionContext) -> ExecutionResult {
        let started = Instant::now();
        self.event_sink
            .emit(Event::ExecutionStarted {
                request_id: ctx.request_id.clone(),
                team_id: ctx.team_id.clone(),
                action_id: ctx.action.id.clone(),
                version: ctx.version.clone(),
            })
            .await;

        let outcome = match self.prepare(ctx) {
            Ok((action, url)) => {
                let body = serde_json::to_vec(&DispatchPayload::new(&action, ctx))
                    .map_err(|e| {
                        SicsError::new(ErrorCode::ExecutionError, "Action execution failed")
                            .with_details(json!(e.to_string()))
                    });
                match body {
                    Ok(body) => self.dispatcher().dispatch(&ctx.request_id, &url, &body).await,
                    Err(e) => Err(e),
                }
            }
            Err(rejected) => {
                self.event_sink
                    .emit(Event::ExecutionRejected {
                        request_id: ctx.request_id.clone(),
                        code: rejected.code,
                        message: rejected.message.clone(),
                    })
                    .await;
                Err(rejected)
            }
        };

        let execution_time = elapsed_ms(started);
        self.event_sink
            .emit(Event::ExecutionFinished {
                request_id: ctx.request_id.clone(),
                success: outcome.is_ok(),
                execution_time_ms: execution_time,
            })
            .await;

        match outcome {
            Ok(data) => ExecutionResult::succeeded(data, execution_time, ctx.request_id.clone()),
            Err(error) => ExecutionResult::failed(error, execution_time, ctx.request_id.clone()),
        }
    }

    /// GETs `<baseUrl>/health` once.
    pub async fn health_check(&self) -> Result<HealthStatus, SicsError> {
        let status = health::probe(&self.config, self.http.as_ref()).await;
        if let Err(e) = &status {
            tracing::warn!(error = %e, "health check failed");
        }
        status
    }

    // Version check, action lookup and parameter validation; nothing here
    // touches the transport.
    fn prepare(&self, ctx: &ExecutionContext) -> Result<(Action, url::Url), SicsError> {
        let resolver = self.resolver();
        let action = resolver
            .resolve_one(&ctx.action.id, &ctx.team_id, &ctx.version)?
            .ok_or_else(|| {
                SicsError::new(
                    ErrorCode::ActionNotFound,
                    format!(
                        "Action {} not found for team {} version {}",
                        ctx.action.id, ctx.team_id, ctx.version
                    ),
                )
            })?;

        let violations = validate_parameters(&action, &ctx.parameters);
        if !violations.is_empty() {
            return Err(
                SicsError::new(ErrorCode::ParameterValidationFailed, "Parameter validation failed")
                    .with_details(json!(violations)),
            );
        }

        let url = endpoint_url(&self.config.base_url, &action.flow_adapter_endpoint).map_err(|e| {
            SicsError::new(ErrorCode::ExecutionError, "Action execution failed").with_details(json!(e))
        })?;
        Ok((action, url))
    }

    fn dispatcher(&self) -> Dispatcher<'_> {
        Dispatcher {
            config: &self.config,
            http: self.http.as_ref(),
            retry: &self.retry,
            event_sink: self.event_sink.as_ref(),
        }
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
