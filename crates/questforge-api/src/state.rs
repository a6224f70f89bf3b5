//! Application state wiring the game service to its concrete backends.
//!
//! The service is generic over provider and store traits; AppState pins it
//! to the OpenRouter client and the JSON file store.

use std::path::PathBuf;
use std::sync::Arc;

use secrecy::SecretString;

use questforge_core::service::game::GameDesignService;
use questforge_infra::config::resolve_store_path;
use questforge_infra::llm::openrouter::OpenRouterProvider;
use questforge_infra::secret::api_key_from_env;
use questforge_infra::store::JsonFileGameStore;
use questforge_types::config::ServiceConfig;

pub type ConcreteGameService = GameDesignService<OpenRouterProvider, JsonFileGameStore>;

/// Shared state handed to every REST handler.
#[derive(Clone)]
pub struct AppState {
    pub game_service: Arc<ConcreteGameService>,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Initialize from config, reading the API key from the environment.
    pub async fn init(data_dir: PathBuf, config: &ServiceConfig) -> anyhow::Result<Self> {
        let env_var = &config.llm.api_key_env;
        let Some(api_key) = api_key_from_env(env_var) else {
            anyhow::bail!("{env_var} is not set; export your OpenRouter API key before serving");
        };

        tokio::fs::create_dir_all(&data_dir).await?;
        Self::build(api_key, data_dir, config)
    }

    /// Wire the service with an explicit key.
    pub fn build(
        api_key: SecretString,
        data_dir: PathBuf,
        config: &ServiceConfig,
    ) -> anyhow::Result<Self> {
        let provider = OpenRouterProvider::new(api_key, &config.llm)?;
        let store_path = resolve_store_path(&data_dir, &config.store);
        tracing::debug!(store = %store_path.display(), model = %config.llm.model, "Wiring game service");

        let store = JsonFileGameStore::new(store_path);
        let game_service = GameDesignService::new(provider, store, config.llm.temperature);

        Ok(Self {
            game_service: Arc::new(game_service),
            data_dir,
        })
    }
}
