//! Game design domain types.
//!
//! Request bodies accepted by the HTTP layer, the structured records produced
//! from model output, and the code-assistant reply shape.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Full contents of the game store: title -> record.
pub type GameSnapshot = BTreeMap<String, GameRecord>;

/// A structured game record produced from model output.
///
/// A JSON object with arbitrary keys. The `title` field, when present and a
/// string, is the record's identity in the game store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameRecord(Map<String, Value>);

impl GameRecord {
    /// Wrap a JSON value as a record. Returns `None` unless the value is an object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// The record's identity key, if it carries a string `title`.
    pub fn title(&self) -> Option<&str> {
        self.0.get("title").and_then(Value::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

/// A single file exchanged with the code assistant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameFile {
    pub path: String,
    pub content: String,
}

/// Reply returned by the code assistant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantReply {
    pub message: String,
    #[serde(rename = "updatedFiles")]
    pub updated_files: Vec<GameFile>,
}

/// POST /generate-game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateGameInput {
    pub description: String,
    pub genre_tags: Vec<String>,
}

/// POST /generate-scene
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneRequest {
    pub game_title: String,
    /// Narrative so far. Empty for the first scene.
    pub previous_story: String,
}

/// POST /add-scene
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddSceneInput {
    pub game_title: String,
    pub scene_description: String,
    pub characters: Vec<String>,
    pub choices: Vec<String>,
}

/// POST /add-character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddCharacterInput {
    pub game_title: String,
    pub name: String,
    pub description: String,
    pub abilities: Vec<String>,
}

/// POST /generate-phaser-game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaserGameRequest {
    pub game_data: Map<String, Value>,
}

/// POST /code-assistant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeAssistantRequest {
    pub prompt: String,
    pub files: Vec<GameFile>,
}

/// Acknowledgement for a manually added scene.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneAdded {
    pub status: String,
    pub game_title: String,
    pub scene: SceneSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneSummary {
    pub description: String,
    pub characters: Vec<String>,
    pub choices: Vec<String>,
}

/// Acknowledgement for a manually added character.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterAdded {
    pub status: String,
    pub game_title: String,
    pub character: CharacterSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterSummary {
    pub name: String,
    pub description: String,
    pub abilities: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_title() {
        let record = GameRecord::from_value(json!({"title": "Cave", "scenes": []})).unwrap();
        assert_eq!(record.title(), Some("Cave"));
    }

    #[test]
    fn test_record_non_string_title_is_not_an_identity() {
        let record = GameRecord::from_value(json!({"title": 42})).unwrap();
        assert_eq!(record.title(), None);
    }

    #[test]
    fn test_record_rejects_non_object() {
        assert!(GameRecord::from_value(json!(["title"])).is_none());
        assert!(GameRecord::from_value(json!("Cave")).is_none());
    }

    #[test]
    fn test_assistant_reply_wire_name() {
        let reply = AssistantReply {
            message: "done".into(),
            updated_files: vec![GameFile {
                path: "/src/main.js".into(),
                content: "let x = 1;".into(),
            }],
        };
        let value = serde_json::to_value(&reply).unwrap();
        assert_eq!(value["updatedFiles"][0]["path"], "/src/main.js");
        assert!(value.get("updated_files").is_none());
    }
}
