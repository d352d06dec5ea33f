// Exports a Steam user's library with playtime to a JSON file.
//
// Config -> resolve steam_id -> GetOwnedGames -> validate -> format -> write.
// Only configuration and identity problems stop the run; a failed fetch
// still reaches the writer, which then refuses to write an empty list.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::{DateTime, Local};
use log::{debug, error, info, LevelFilter};
use reqwest::blocking::Client;
use simplelog::{ColorChoice, TermLogger, TerminalMode};

use api::FetchError;
use config::Config;
use game::Game;

mod api;
mod cli;
mod config;
mod game;
mod output;
mod user;

fn main() -> ExitCode {
    let matches = cli::build_command().get_matches();

    let level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let _ = TermLogger::init(
        level,
        simplelog::Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );

    let config_path = matches
        .get_one::<String>("config")
        .map(PathBuf::from)
        .unwrap_or_else(config::default_path);

    let config = match load_config(
        config_path,
        matches.get_one::<String>("api_key"),
        matches.get_one::<String>("steam_id"),
    ) {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let api_base = matches
        .get_one::<String>("api_base")
        .map(String::as_str)
        .unwrap_or(api::STEAM_API_BASE);

    let client = Client::new();

    let steam_id = match user::resolve_steam_id(&client, api_base, &config.api_key, &config.steam_id) {
        Ok(id) => id,
        Err(e) => {
            error!("无法解析 '{}': {e}", config.steam_id);
            return ExitCode::FAILURE;
        }
    };

    info!("'{}' 对应的 Steam ID 为 {steam_id}", config.steam_id);

    let fetched = api::get_owned_games(&client, api_base, &config.api_key, steam_id);

    let output_dir = matches
        .get_one::<String>("output_dir")
        .map(PathBuf::from)
        .unwrap_or_else(output::default_dir);

    match export(fetched, &output_dir, &Local::now()) {
        Ok(Some(path)) => info!("数据已保存至: {}", path.display()),
        Ok(None) => {}
        Err(e) if e.kind() == ErrorKind::PermissionDenied => {
            error!("没有文件写入权限: {}", output_dir.display());
        }
        Err(e) => error!("保存游戏列表失败: {e}"),
    }

    ExitCode::SUCCESS
}

/// Formats whatever the fetch produced and hands it to the writer.
///
/// A failed fetch is logged and continues as an empty list.
fn export(
    fetched: Result<Vec<Game>, FetchError>,
    output_dir: &Path,
    now: &DateTime<Local>,
) -> std::io::Result<Option<PathBuf>> {
    let games = fetched.unwrap_or_else(|e| {
        error!("{e}");
        Vec::new()
    });

    if !games.is_empty() {
        info!(
            "共 {} 个游戏，总时长 {}",
            games.len(),
            game::format_playtime(game::total_playtime(&games))
        );
    }

    output::save_games_list(output_dir, &game::format_games(&games), now)
}

fn load_config(
    path: PathBuf,
    api_key_file: Option<&String>,
    steam_id: Option<&String>,
) -> Result<Config, Box<dyn std::error::Error>> {
    debug!("Loading config from {}", path.display());

    let mut config = config::load(&path)?;

    if let Some(key_path) = api_key_file {
        config.api_key = std::fs::read_to_string(key_path)
            .map_err(|e| format!("无法读取 API 密钥文件 {key_path}: {e}"))?
            .trim()
            .to_string();
    }

    if let Some(steam_id) = steam_id {
        config.steam_id = steam_id.trim().to_string();
    }

    Ok(config)
}
