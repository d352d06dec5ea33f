use std::fmt;
use std::str::FromStr;

use log::debug;
use reqwest::blocking::Client;

const RESOLVE_VANITY_PATH: &str = "/ISteamUser/ResolveVanityURL/v0001/";

/// Lowest 64-bit ID of an individual account in the public universe.
const STEAM_ID_BASE: u64 = 76561197960265728;

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("steam_id 为空")]
    EmptyIdentifier,

    #[error("自定义 URL 请求失败: {0}")]
    Request(#[from] reqwest::Error),

    #[error("自定义 URL 请求返回 HTTP {0}")]
    Status(u16),

    #[error("自定义 URL 响应不是有效的 JSON: {0}")]
    Json(#[from] json::Error),

    #[error("没有与 '{0}' 匹配的 Steam 账户")]
    NoMatch(String),

    #[error("'{0}' 不是有效的 64 位 Steam ID")]
    InvalidSteamId(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SteamId(u64);

impl FromStr for SteamId {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().parse::<u64>() {
            Ok(id) if id >= STEAM_ID_BASE => Ok(Self(id)),
            _ => Err(ResolveError::InvalidSteamId(s.to_string())),
        }
    }
}

impl fmt::Display for SteamId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What the user wrote in `steam_id`, after stripping any profile URL.
#[derive(Debug, PartialEq, Eq)]
enum Identifier<'a> {
    Numeric(&'a str),
    Vanity(&'a str),
}

fn classify(input: &str) -> Option<Identifier<'_>> {
    let input = input.trim();

    if let Some((_, id)) = input.split_once("/profiles/") {
        return Some(Identifier::Numeric(first_segment(id)));
    }

    let input = match input.split_once("/id/") {
        Some((_, vanity)) => first_segment(vanity),
        None => input,
    };

    if input.is_empty() {
        None
    } else if input.len() == 17 && input.bytes().all(|b| b.is_ascii_digit()) {
        Some(Identifier::Numeric(input))
    } else {
        Some(Identifier::Vanity(input))
    }
}

/// Cuts a URL tail such as `/games/?tab=all` off the profile segment.
fn first_segment(path: &str) -> &str {
    match path.find(['/', '?', '#']) {
        Some(end) => &path[..end],
        None => path,
    }
}

/// Turns a vanity name, profile URL or numeric ID into a 64-bit Steam ID.
///
/// Only vanity names need a round trip to the Web API.
pub fn resolve_steam_id(
    client: &Client,
    api_base: &str,
    api_key: &str,
    input: &str,
) -> Result<SteamId, ResolveError> {
    let vanity = match classify(input).ok_or(ResolveError::EmptyIdentifier)? {
        Identifier::Numeric(id) => return id.parse(),
        Identifier::Vanity(vanity) => vanity,
    };

    debug!("Resolving vanity URL '{vanity}'");

    let url = format!("{}{RESOLVE_VANITY_PATH}", api_base.trim_end_matches('/'));
    let response = client
        .get(&url)
        .query(&[("key", api_key.trim()), ("vanityurl", vanity)])
        .send()?;

    let status = response.status().as_u16();
    if status != 200 {
        return Err(ResolveError::Status(status));
    }

    parse_resolve_response(vanity, &response.text()?)
}

/// `success` is 1 on a match and 42 otherwise, with a `message` next to it.
fn parse_resolve_response(vanity: &str, body: &str) -> Result<SteamId, ResolveError> {
    let parsed = json::parse(body)?;
    let response = &parsed["response"];

    if response["success"].as_u8() != Some(1) {
        let reason = response["message"].as_str().unwrap_or("No match");
        debug!("ResolveVanityURL rejected '{vanity}': {reason}");
        return Err(ResolveError::NoMatch(vanity.to_string()));
    }

    let Some(steam_id) = response["steamid"].as_str() else {
        return Err(ResolveError::InvalidSteamId(response["steamid"].dump()));
    };

    steam_id.parse()
}
