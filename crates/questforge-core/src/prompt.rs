//! Prompt builders for the game design operations.
//!
//! Each builder renders one request body into the natural-language prompt
//! sent to the model. The JSON shapes described here are what
//! [`crate::extract`] expects back.

use serde_json::Value;

use questforge_types::game::{GameFile, GenerateGameInput, SceneRequest};

/// System prompt for the code assistant conversation.
pub const CODE_ASSISTANT_SYSTEM_PROMPT: &str =
    "You are a smart code assistant that updates files based on user intent.";

/// Prompt for `/generate-game`: a complete adventure game as one JSON object.
pub fn build_game_prompt(input: &GenerateGameInput) -> String {
    format!(
        r#"You are an expert game designer.
Generate a fully structured and rich adventure game based on:

Description: {description}
Genres: {genres}

Return ONLY valid JSON. No markdown, no explanation.

### JSON FORMAT ###
{{
  title: string,
  description: string,
  characters: [
    {{ id, name, role, traits[], avatar, voiceStyle }}
  ],
  environments: array of objects with id, name, description, style, accessibility_tags[]
  scenes: [
    {{
      id: string,
      title: string,
      environment: {{ id, name, description, style, accessibility_tags[] }},
      dialogue: string[],
      choices: [
        {{ id, label, nextSceneId, character (optional) }}
      ]
    }}
  ]
}}"#,
        description = input.description,
        genres = input.genre_tags.join(", "),
    )
}

/// Prompt for `/generate-scene`: the next scene of an existing story.
pub fn build_scene_prompt(request: &SceneRequest) -> String {
    format!(
        "Generate the next scene for a game titled '{title}'.\n\
         Previous story so far:\n{story}\n\n\
         Return scene in JSON with: scene_description, characters (names), and choices (list of decisions).",
        title = request.game_title,
        story = request.previous_story,
    )
}

/// Prompt for `/generate-phaser-game`: convert a game JSON into Phaser 3 source files.
pub fn build_phaser_prompt(game_data: &Value) -> String {
    format!(
        r#"
You are an expert game developer.
Convert the following adventure game JSON into a Phaser 3 game implementation.

GAME DATA:
{game_data:#}

REQUIREMENTS:
1. Output must be valid JSON containing all files required to run the Phaser game.
2. JSON format:
{{
  "index.html": "<full HTML file code here>",
  "main.js": "<Phaser game bootstrap code>"
}}
3. The Phaser game must:
   - Load characters, environments, and scenes from the provided game JSON.
   - Use dialogue text and choices from scenes to drive gameplay.
   - Run using built-in Phaser example assets (sky.png, platform.png, star.png and
     other assets from https://labs.phaser.io) loaded directly from the Phaser CDN
     or example repository, so the game is playable immediately.
4. The game must support keyboard, mouse, and touch input for accessibility.
5. For all graphics and platforms, prefer sprites, tilesets, and platforms already
   available in the Phaser library.
6. Do NOT return markdown or explanations -- only the JSON described.
"#
    )
}

/// User prompt for `/code-assistant`, embedding the current files and the
/// two-section reply contract parsed by [`crate::extract::parse_assistant_reply`].
pub fn build_code_assistant_prompt(prompt: &str, files: &[GameFile]) -> String {
    let file_text = serde_json::json!(files);

    format!(
        r#"You are a helpful AI coding assistant.
The user asked:
"{prompt}"

Here is the current file structure and contents:
{file_text:#}

Please return:
{message_marker}
Your assistant reply message.
{files_marker}
List of updated files only, in this format:
[
  {{ "path": "/src/main.js", "content": "new updated content here..." }},
  ...
]

ONLY return the above format. No markdown, no extra explanation.
"#,
        message_marker = crate::extract::MESSAGE_MARKER,
        files_marker = crate::extract::UPDATED_FILES_MARKER,
    )
}
