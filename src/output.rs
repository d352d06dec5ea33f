use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use json::JsonValue;
use log::warn;

use crate::game::FormattedGame;

pub const OUTPUT_DIR_NAME: &str = "output";

/// `<cwd>/output`
pub fn default_dir() -> PathBuf {
    std::env::current_dir()
        .map(|cwd| cwd.join(OUTPUT_DIR_NAME))
        .unwrap_or_else(|_| PathBuf::from(OUTPUT_DIR_NAME))
}

pub fn file_name(now: &DateTime<Local>) -> String {
    format!("steam_games_{}.json", now.format("%Y%m%d_%H%M%S"))
}

pub fn to_document(games: &[FormattedGame]) -> String {
    let records: Vec<JsonValue> = games.iter().map(FormattedGame::to_json).collect();
    json::stringify_pretty(JsonValue::Array(records), 4)
}

/// Writes the list into `dir`, creating the directory first.
///
/// Returns `Ok(None)` without touching any file when `games` is empty.
pub fn save_games_list(
    dir: &Path,
    games: &[FormattedGame],
    now: &DateTime<Local>,
) -> std::io::Result<Option<PathBuf>> {
    std::fs::create_dir_all(dir)?;

    if games.is_empty() {
        warn!("游戏列表为空，未写入文件");
        return Ok(None);
    }

    let path = dir.join(file_name(now));
    let mut file = File::create(&path)?;
    file.write_all(to_document(games).as_bytes())?;

    Ok(Some(path))
}
