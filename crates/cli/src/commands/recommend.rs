use std::fs;
use std::path::PathBuf;

use makeitsell_core::config::{AppConfig, ConfigOverrides, LoadOptions};
use makeitsell_core::{
    Catalog, InMemoryBehaviorProvider, InMemoryCatalogProvider, RecommendationEngine,
    RecommendationRequest, Recommender, Strategy, UserBehavior, UserId,
};

use crate::commands::{render_ranking, CommandResult};

pub struct RecommendArgs {
    pub user: uuid::Uuid,
    pub strategy: String,
    pub limit: Option<usize>,
    pub catalog: Option<PathBuf>,
    pub behavior: Option<PathBuf>,
}

pub fn run(args: RecommendArgs) -> CommandResult {
    let config = match AppConfig::load(LoadOptions {
        overrides: ConfigOverrides {
            catalog_path: args.catalog.clone(),
            behavior_path: args.behavior.clone(),
            ..ConfigOverrides::default()
        },
        ..LoadOptions::default()
    }) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "recommend",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };

    let strategy: Strategy = match args.strategy.parse() {
        Ok(strategy) => strategy,
        Err(error) => {
            return CommandResult::failure("recommend", "invalid_input", error.to_string(), 5);
        }
    };

    let catalog = match load_catalog(&config) {
        Ok(catalog) => catalog,
        Err((message, exit_code)) => {
            return CommandResult::failure("recommend", "data_load", message, exit_code);
        }
    };
    let behavior = match load_behavior(&config) {
        Ok(behavior) => behavior,
        Err((message, exit_code)) => {
            return CommandResult::failure("recommend", "data_load", message, exit_code);
        }
    };

    let engine = match build_engine(&config) {
        Ok(engine) => engine,
        Err(message) => {
            return CommandResult::failure("recommend", "config_validation", message, 2);
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return CommandResult::failure(
                "recommend",
                "runtime_init",
                format!("failed to initialize async runtime: {error}"),
                3,
            );
        }
    };

    let user = UserId(args.user);
    let candidate_count = catalog.len();
    let limit = args.limit.unwrap_or(config.recommender.default_limit);
    let recommender = Recommender::new(
        InMemoryCatalogProvider::new(catalog),
        InMemoryBehaviorProvider::default().with_snapshot(user, behavior),
        engine,
    );

    let request =
        RecommendationRequest::for_user(user).with_strategy(strategy).with_limit(limit);
    let ranked = match runtime.block_on(recommender.recommend(request)) {
        Ok(ranked) => ranked,
        Err(error) => {
            return CommandResult::failure("recommend", error.error_class(), error.to_string(), 5);
        }
    };

    if ranked.is_empty() {
        // Neutral empty state: exhausted candidates are not a failure.
        return CommandResult::success(
            "recommend",
            format!(
                "no recommendations yet for strategy `{strategy}` ({candidate_count} candidates considered)"
            ),
        );
    }

    let mut message = format!(
        "top {} of {} candidates with strategy `{}`:\n",
        ranked.len(),
        candidate_count,
        strategy
    );
    message.push_str(&render_ranking(&ranked).join("\n"));
    CommandResult::success("recommend", message)
}

fn load_catalog(config: &AppConfig) -> Result<Catalog, (String, u8)> {
    let path = &config.data.catalog_path;
    let bytes = fs::read(path)
        .map_err(|error| (format!("could not read catalog `{}`: {error}", path.display()), 4))?;
    Catalog::from_json_slice(&bytes)
        .map_err(|error| (format!("could not parse catalog `{}`: {error}", path.display()), 4))
}

fn load_behavior(config: &AppConfig) -> Result<UserBehavior, (String, u8)> {
    let path = &config.data.behavior_path;
    let bytes = fs::read(path)
        .map_err(|error| (format!("could not read behavior `{}`: {error}", path.display()), 4))?;
    serde_json::from_slice(&bytes)
        .map_err(|error| (format!("could not parse behavior `{}`: {error}", path.display()), 4))
}

fn build_engine(config: &AppConfig) -> Result<RecommendationEngine, String> {
    RecommendationEngine::new()
        .with_fusion_weights(config.recommender.fusion)
        .and_then(|engine| engine.with_default_limit(config.recommender.default_limit))
        .map_err(|error| format!("engine configuration rejected: {error}"))
}
