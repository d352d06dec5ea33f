use json::JsonValue;
use log::debug;
use reqwest::blocking::Client;

use crate::game::Game;
use crate::user::SteamId;

pub const STEAM_API_BASE: &str = "https://api.steampowered.com";

const OWNED_GAMES_PATH: &str = "/IPlayerService/GetOwnedGames/v1/";

/// Fields every game record must carry. Only the first record is checked.
const REQUIRED_FIELDS: [&str; 3] = ["appid", "name", "playtime_forever"];

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("HTTP 错误: {0}")]
    HttpStatus(u16),

    #[error("响应缺少 'response' 字段")]
    MissingResponse,

    #[error("游戏列表为空（用户可能未公开游戏库）")]
    EmptyLibrary,

    #[error("游戏数据缺少 '{0}' 字段")]
    MissingField(&'static str),
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("请求错误: {0}")]
    Network(#[from] reqwest::Error),

    #[error("响应不是有效的 JSON: {0}")]
    Json(#[from] json::Error),

    #[error("数据异常: {0}")]
    Validation(#[from] ValidationError),
}

/// Checks status, envelope and the first game record, in that order.
pub fn validate_response(status: u16, data: &JsonValue) -> Result<(), ValidationError> {
    if status != 200 {
        return Err(ValidationError::HttpStatus(status));
    }

    if !data.has_key("response") {
        return Err(ValidationError::MissingResponse);
    }

    let games = &data["response"]["games"];
    if !games.is_array() || games.is_empty() {
        return Err(ValidationError::EmptyLibrary);
    }

    let sample = &games[0];
    for field in REQUIRED_FIELDS {
        if !sample.has_key(field) {
            return Err(ValidationError::MissingField(field));
        }
    }

    Ok(())
}

/// Parses and validates a `GetOwnedGames` body.
///
/// Non-200 bodies are not parsed at all, Steam answers those with HTML.
pub fn parse_owned_games(status: u16, body: &str) -> Result<Vec<Game>, FetchError> {
    if status != 200 {
        return Err(ValidationError::HttpStatus(status).into());
    }

    let data = json::parse(body)?;
    validate_response(status, &data)?;

    Ok(data["response"]["games"].members().map(Game::from_json).collect())
}

/// `api_base` is normally [`STEAM_API_BASE`].
pub fn get_owned_games(
    client: &Client,
    api_base: &str,
    api_key: &str,
    steam_id: SteamId,
) -> Result<Vec<Game>, FetchError> {
    let url = format!("{}{OWNED_GAMES_PATH}", api_base.trim_end_matches('/'));
    debug!("Requesting owned games for {steam_id} from {url}");

    let steam_id = steam_id.to_string();
    let response = client
        .get(&url)
        .query(&[
            ("key", api_key.trim()),
            ("steamid", steam_id.as_str()),
            ("include_appinfo", "1"),
            ("include_played_free_games", "1"),
        ])
        .send()?;

    let status = response.status().as_u16();
    let body = response.text()?;

    parse_owned_games(status, &body)
}
