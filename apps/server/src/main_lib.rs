use std::sync::Arc;

use budgetly_core::{
    budget_rules::{BudgetRuleService, BudgetRuleServiceTrait},
    identity::{IdentityResolverTrait, UserId},
    records::{RecordService, RecordServiceTrait},
    settings::{SettingsService, SettingsServiceTrait},
    state::{StateCache, StateService, StateServiceTrait},
};
use budgetly_storage_sqlite::{
    budget_rules::BudgetRuleRepository,
    db::{self, DbPool},
    records::record_repositories,
    settings::SettingsRepository,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::{
    auth::{JwtIdentityResolver, LocalIdentityResolver},
    config::{Config, LogFormat},
};

pub struct AppState {
    pub record_service: Arc<dyn RecordServiceTrait>,
    pub budget_rule_service: Arc<dyn BudgetRuleServiceTrait>,
    pub settings_service: Arc<dyn SettingsServiceTrait>,
    pub state_service: Arc<dyn StateServiceTrait>,
    pub identity: Arc<dyn IdentityResolverTrait>,
    pub pool: Arc<DbPool>,
    pub db_path: String,
}

pub fn init_tracing(log_format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match log_format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(false))
            .init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init(),
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer((*pool).clone());

    let state_cache = Arc::new(StateCache::new());
    let settings_repository = Arc::new(SettingsRepository::new(pool.clone(), writer.clone()));
    let budget_rule_repository = Arc::new(BudgetRuleRepository::new(pool.clone(), writer.clone()));
    let records = record_repositories(pool.clone(), writer);

    let record_service = Arc::new(RecordService::new(records.clone(), state_cache.clone()));
    let settings_service = Arc::new(SettingsService::new(
        settings_repository.clone(),
        state_cache.clone(),
    ));
    let state_service: Arc<dyn StateServiceTrait> = Arc::new(StateService::new(
        settings_repository,
        budget_rule_repository.clone(),
        records,
        state_cache.clone(),
    ));
    let budget_rule_service = Arc::new(BudgetRuleService::new(
        budget_rule_repository,
        state_service.clone(),
        state_cache,
    ));

    let identity: Arc<dyn IdentityResolverTrait> = match &config.jwt_secret {
        Some(secret) => Arc::new(JwtIdentityResolver::new(
            secret,
            config.jwt_issuer.as_deref(),
        )),
        None => {
            tracing::warn!(
                "No JWT secret configured; serving every request as local user '{}'",
                config.local_user
            );
            Arc::new(LocalIdentityResolver::new(UserId::new(
                config.local_user.clone(),
            )))
        }
    };

    Ok(Arc::new(AppState {
        record_service,
        budget_rule_service,
        settings_service,
        state_service,
        identity,
        pool,
        db_path,
    }))
}
