//! `qforge games` -- inspect the stored game library without starting the server.

use anyhow::Result;
use clap::Subcommand;
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;
use serde_json::Value;

use questforge_core::store::GameStore;
use questforge_types::game::GameRecord;

#[derive(Subcommand)]
pub enum GamesCommand {
    /// List stored games.
    #[command(alias = "ls")]
    List,

    /// Print a stored game as JSON.
    Show {
        /// Game title (the store key).
        title: String,
    },
}

pub async fn handle_games_command<S: GameStore>(
    cmd: GamesCommand,
    store: &S,
    json: bool,
) -> Result<()> {
    match cmd {
        GamesCommand::List => list_games(store, json).await,
        GamesCommand::Show { title } => show_game(store, &title).await,
    }
}

async fn list_games<S: GameStore>(store: &S, json: bool) -> Result<()> {
    let games = store.all().await?;

    if json {
        let titles: Vec<&String> = games.keys().collect();
        println!("{}", serde_json::to_string_pretty(&titles)?);
        return Ok(());
    }

    if games.is_empty() {
        println!();
        println!(
            "  {} No games stored yet. Generate one with: {}",
            style("i").blue().bold(),
            style("POST /generate-game").yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Title").fg(Color::White),
        Cell::new("Scenes").fg(Color::White),
        Cell::new("Characters").fg(Color::White),
        Cell::new("Description").fg(Color::White),
    ]);

    for (title, record) in &games {
        table.add_row(vec![
            Cell::new(title).fg(Color::Cyan),
            Cell::new(array_len(record, "scenes")),
            Cell::new(array_len(record, "characters")),
            Cell::new(short_description(record)).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    Ok(())
}

async fn show_game<S: GameStore>(store: &S, title: &str) -> Result<()> {
    match store.get(title).await? {
        Some(record) => {
            println!("{}", serde_json::to_string_pretty(&record)?);
            Ok(())
        }
        None => anyhow::bail!("game '{title}' not found"),
    }
}

fn array_len(record: &GameRecord, key: &str) -> String {
    record
        .get(key)
        .and_then(Value::as_array)
        .map(|items| items.len().to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn short_description(record: &GameRecord) -> String {
    let desc = record
        .get("description")
        .and_then(Value::as_str)
        .unwrap_or_default();
    if desc.chars().count() > 50 {
        let head: String = desc.chars().take(47).collect();
        format!("{head}...")
    } else {
        desc.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> GameRecord {
        GameRecord::from_value(value).unwrap()
    }

    #[test]
    fn test_array_len() {
        let r = record(json!({"scenes": [1, 2, 3], "characters": "none"}));
        assert_eq!(array_len(&r, "scenes"), "3");
        assert_eq!(array_len(&r, "characters"), "-");
        assert_eq!(array_len(&r, "missing"), "-");
    }

    #[test]
    fn test_short_description_truncates_on_char_boundary() {
        let long = "é".repeat(60);
        let r = record(json!({"description": long}));
        let short = short_description(&r);
        assert!(short.ends_with("..."));
        assert_eq!(short.chars().count(), 50);

        let r = record(json!({"description": "Short"}));
        assert_eq!(short_description(&r), "Short");
    }
}
