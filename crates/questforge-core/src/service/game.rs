//! Game design service.
//!
//! Builds prompts from request bodies, calls the model, extracts structured
//! data from its reply and persists titled records to the game store.

use serde_json::Value;

use questforge_types::error::{ServiceError, StoreError};
use questforge_types::game::{
    AddCharacterInput, AddSceneInput, CharacterAdded, CharacterSummary, CodeAssistantRequest,
    GameRecord, GameSnapshot, GenerateGameInput, PhaserGameRequest, SceneAdded, SceneRequest,
    SceneSummary,
};
use questforge_types::llm::{CompletionRequest, LlmError, Message};

use crate::extract::{self, AssistantOutcome, Extraction};
use crate::llm::provider::LlmProvider;
use crate::prompt;
use crate::store::GameStore;

/// Orchestrates prompt → model → extraction → persistence.
///
/// Generic over `P: LlmProvider` and `S: GameStore` so tests can use mocks
/// and the application crate can pin concrete infra types.
pub struct GameDesignService<P: LlmProvider, S: GameStore> {
    provider: P,
    store: S,
    temperature: f64,
}

impl<P: LlmProvider, S: GameStore> GameDesignService<P, S> {
    pub fn new(provider: P, store: S, temperature: f64) -> Self {
        Self {
            provider,
            store,
            temperature,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Generate a full game and persist it when the model returns a titled object.
    #[tracing::instrument(
        name = "generate_game",
        skip(self, input),
        fields(genres = input.genre_tags.len())
    )]
    pub async fn generate_game(&self, input: &GenerateGameInput) -> Result<Extraction, ServiceError> {
        let prompt = prompt::build_game_prompt(input);
        self.generate_and_persist(prompt).await
    }

    /// Generate the next scene. Persisted only if the model includes a `title`.
    #[tracing::instrument(
        name = "generate_scene",
        skip(self, request),
        fields(game_title = %request.game_title)
    )]
    pub async fn generate_scene(&self, request: &SceneRequest) -> Result<Extraction, ServiceError> {
        let prompt = prompt::build_scene_prompt(request);
        self.generate_and_persist(prompt).await
    }

    /// Convert a game into Phaser source files. Never persisted.
    #[tracing::instrument(name = "generate_phaser_game", skip(self, request))]
    pub async fn generate_phaser_game(
        &self,
        request: &PhaserGameRequest,
    ) -> Result<Extraction, LlmError> {
        let game_data = Value::Object(request.game_data.clone());
        let prompt = prompt::build_phaser_prompt(&game_data);
        let raw = self.complete(vec![Message::user(prompt)]).await?;
        Ok(extract::extract_structured(&raw))
    }

    /// Ask the code assistant to update files.
    ///
    /// Unparseable replies come back as [`AssistantOutcome::Degraded`]; only a
    /// failed model call is an error.
    #[tracing::instrument(
        name = "code_assistant",
        skip(self, request),
        fields(file_count = request.files.len())
    )]
    pub async fn code_assistant(
        &self,
        request: &CodeAssistantRequest,
    ) -> Result<AssistantOutcome, LlmError> {
        let messages = vec![
            Message::system(prompt::CODE_ASSISTANT_SYSTEM_PROMPT),
            Message::user(prompt::build_code_assistant_prompt(
                &request.prompt,
                &request.files,
            )),
        ];
        let raw = self.complete(messages).await?;
        Ok(extract::parse_assistant_reply(&raw))
    }

    pub async fn get_game(&self, title: &str) -> Result<Option<GameRecord>, StoreError> {
        self.store.get(title).await
    }

    pub async fn list_games(&self) -> Result<GameSnapshot, StoreError> {
        self.store.all().await
    }

    async fn generate_and_persist(&self, prompt: String) -> Result<Extraction, ServiceError> {
        let raw = self.complete(vec![Message::user(prompt)]).await?;
        let extraction = extract::extract_structured(&raw);

        match extraction.titled_record() {
            Some(record) => {
                let title = record.title().unwrap_or_default().to_string();
                self.store.merge_and_save(record).await?;
                tracing::info!(title = %title, "Saved generated game");
            }
            None => {
                tracing::debug!(
                    structured = extraction.is_structured(),
                    "Model output has no title; skipping persistence"
                );
            }
        }

        Ok(extraction)
    }

    async fn complete(&self, messages: Vec<Message>) -> Result<String, LlmError> {
        let request = CompletionRequest {
            model: String::new(), // Provider uses its configured model
            messages,
            temperature: Some(self.temperature),
        };

        match self.provider.complete(&request).await {
            Ok(response) => {
                tracing::debug!(
                    provider = self.provider.name(),
                    model = self.provider.model(),
                    response_id = %response.id,
                    "Model call succeeded"
                );
                Ok(response.content)
            }
            Err(e) => {
                tracing::warn!(
                    provider = self.provider.name(),
                    model = self.provider.model(),
                    error = %e,
                    "Model call failed"
                );
                Err(e)
            }
        }
    }
}

/// Acknowledge a manually supplied scene. No model call, nothing persisted.
pub fn add_scene(input: AddSceneInput) -> SceneAdded {
    SceneAdded {
        status: "Scene added".to_string(),
        game_title: input.game_title,
        scene: SceneSummary {
            description: input.scene_description,
            characters: input.characters,
            choices: input.choices,
        },
    }
}

/// Acknowledge a manually supplied character. No model call, nothing persisted.
pub fn add_character(input: AddCharacterInput) -> CharacterAdded {
    CharacterAdded {
        status: "Character added".to_string(),
        game_title: input.game_title,
        character: CharacterSummary {
            name: input.name,
            description: input.description,
            abilities: input.abilities,
        },
    }
}
