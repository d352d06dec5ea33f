use std::path::{Path, PathBuf};

use yaml_rust2::{ScanError, Yaml, YamlLoader};

pub const CONFIG_FILE_NAME: &str = "config.yaml";

const API_KEY: &str = "steam_api_key";
const STEAM_ID: &str = "steam_id";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("未找到或无法读取 {}，请确保它和可执行文件在同一目录: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{} 不是有效的 YAML: {}", .0.display(), .1)]
    Parse(PathBuf, ScanError),

    #[error("{} 中没有 YAML 文档", .0.display())]
    Empty(PathBuf),

    #[error("配置文件中缺少必要的键 '{0}'")]
    MissingKey(&'static str),

    #[error("配置键 '{0}' 必须是字符串")]
    InvalidKey(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_key: String,
    /// Vanity name, profile URL or numeric ID, as written by the user.
    pub steam_id: String,
}

/// `config.yaml` beside the running executable, or in the working
/// directory when the executable location is unknown.
pub fn default_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(CONFIG_FILE_NAME)))
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
}

pub fn load(path: &Path) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let docs = YamlLoader::load_from_str(&contents)
        .map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;

    let doc = docs
        .into_iter()
        .next()
        .ok_or_else(|| ConfigError::Empty(path.to_path_buf()))?;

    from_yaml(&doc)
}

fn from_yaml(doc: &Yaml) -> Result<Config, ConfigError> {
    Ok(Config {
        api_key: required_string(doc, API_KEY)?,
        steam_id: required_string(doc, STEAM_ID)?,
    })
}

fn required_string(doc: &Yaml, key: &'static str) -> Result<String, ConfigError> {
    match &doc[key] {
        Yaml::String(value) => Ok(value.trim().to_string()),
        // numeric IDs are usually written unquoted
        Yaml::Integer(value) => Ok(value.to_string()),
        Yaml::BadValue | Yaml::Null => Err(ConfigError::MissingKey(key)),
        _ => Err(ConfigError::InvalidKey(key)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> Result<Config, ConfigError> {
        let docs = YamlLoader::load_from_str(src).unwrap();
        from_yaml(&docs[0])
    }

    #[test]
    fn reads_both_keys() {
        let config = parse("steam_api_key: \" ABCDEF \"\nsteam_id: gabelogannewell\n").unwrap();

        assert_eq!(config.api_key, "ABCDEF");
        assert_eq!(config.steam_id, "gabelogannewell");
    }

    #[test]
    fn accepts_unquoted_numeric_id() {
        let config = parse("steam_api_key: KEY\nsteam_id: 76561197960287930\n").unwrap();

        assert_eq!(config.steam_id, "76561197960287930");
    }

    #[test]
    fn missing_key_is_named() {
        let err = parse("steam_api_key: KEY\n").unwrap_err();

        assert!(matches!(err, ConfigError::MissingKey("steam_id")));
        assert!(err.to_string().contains("缺少必要的键 'steam_id'"));
    }

    #[test]
    fn non_scalar_key_is_rejected() {
        let err = parse("steam_api_key: [a, b]\nsteam_id: x\n").unwrap_err();

        assert!(matches!(err, ConfigError::InvalidKey("steam_api_key")));
    }

    #[test]
    fn missing_file_is_read_error() {
        let path = std::env::temp_dir().join("steam-games-does-not-exist.yaml");

        assert!(matches!(load(&path), Err(ConfigError::Read { .. })));
    }
}
