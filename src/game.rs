use json::JsonValue;
use log::debug;

pub const UNKNOWN_GAME: &str = "未知游戏";

pub const NAME_KEY: &str = "游戏名称";
pub const PLAYTIME_KEY: &str = "游戏时长";

/// One entry of `response.games` as returned by `GetOwnedGames`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub app_id: Option<u32>,
    pub name: Option<String>,
    /// Minutes.
    pub playtime_forever: Option<u64>,
}

impl Game {
    pub const fn new(app_id: Option<u32>, name: Option<String>, playtime_forever: Option<u64>) -> Self {
        Self {
            app_id,
            name,
            playtime_forever,
        }
    }

    pub fn from_json(value: &JsonValue) -> Self {
        Self::new(
            value["appid"].as_u32(),
            value["name"].as_str().map(str::to_string),
            value["playtime_forever"].as_u64(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedGame {
    pub display_name: String,
    pub display_playtime: String,
}

impl FormattedGame {
    pub fn to_json(&self) -> JsonValue {
        let mut record = JsonValue::new_object();
        record[NAME_KEY] = self.display_name.as_str().into();
        record[PLAYTIME_KEY] = self.display_playtime.as_str().into();
        record
    }
}

impl From<&Game> for FormattedGame {
    fn from(game: &Game) -> Self {
        if game.name.is_none() {
            debug!("Game {:?} has no name", game.app_id);
        }

        Self {
            display_name: game.name.clone().unwrap_or_else(|| UNKNOWN_GAME.to_string()),
            display_playtime: format_playtime(game.playtime_forever.unwrap_or(0)),
        }
    }
}

/// `125` -> `2小时5分钟`
pub fn format_playtime(minutes: u64) -> String {
    format!("{}小时{}分钟", minutes / 60, minutes % 60)
}

pub fn format_games(games: &[Game]) -> Vec<FormattedGame> {
    games.iter().map(FormattedGame::from).collect()
}

pub fn total_playtime(games: &[Game]) -> u64 {
    games.iter().filter_map(|g| g.playtime_forever).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(name: &str, minutes: u64) -> Game {
        Game::new(Some(1), Some(name.to_string()), Some(minutes))
    }

    #[test]
    fn playtime_splits_hours_and_minutes() {
        assert_eq!(format_playtime(125), "2小时5分钟");
        assert_eq!(format_playtime(0), "0小时0分钟");
        assert_eq!(format_playtime(60), "1小时0分钟");
        assert_eq!(format_playtime(59), "0小时59分钟");
    }

    #[test]
    fn missing_fields_use_defaults() {
        let formatted = FormattedGame::from(&Game::new(Some(10), None, None));

        assert_eq!(formatted.display_name, UNKNOWN_GAME);
        assert_eq!(formatted.display_playtime, "0小时0分钟");
    }

    #[test]
    fn keeps_order_and_length() {
        let games = vec![game("Portal 2", 125), game("Dota 2", 0), game("Half-Life", 61)];
        let formatted = format_games(&games);

        let names: Vec<&str> = formatted.iter().map(|g| g.display_name.as_str()).collect();
        assert_eq!(names, ["Portal 2", "Dota 2", "Half-Life"]);
        assert_eq!(formatted[2].display_playtime, "1小时1分钟");
    }

    #[test]
    fn formatting_is_repeatable() {
        let games = vec![game("Portal 2", 125), Game::new(None, None, Some(7))];

        assert_eq!(format_games(&games), format_games(&games));
    }

    #[test]
    fn reads_raw_record() {
        let raw = json::parse(r#"{"appid":620,"name":"Portal 2","playtime_forever":125,"img_icon_url":"x"}"#).unwrap();

        assert_eq!(Game::from_json(&raw), Game::new(Some(620), Some("Portal 2".into()), Some(125)));
        assert_eq!(Game::from_json(&json::parse("{}").unwrap()), Game::new(None, None, None));
    }

    #[test]
    fn record_json_has_localized_keys() {
        let record = FormattedGame::from(&game("传送门", 125)).to_json();

        assert_eq!(record[NAME_KEY], "传送门");
        assert_eq!(record[PLAYTIME_KEY], "2小时5分钟");
        assert_eq!(record.entries().map(|(k, _)| k).collect::<Vec<_>>(), [NAME_KEY, PLAYTIME_KEY]);
    }

    #[test]
    fn sums_total_playtime() {
        let games = vec![game("a", 100), Game::new(None, None, None), game("b", 25)];

        assert_eq!(total_playtime(&games), 125);
    }
}
