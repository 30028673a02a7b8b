//! 配置模块
use crate::error::{DedalusError, Result};
use std::collections::HashMap;
use std::env;
use std::fmt;
use std::io::Read;
use std::path::Path;
use std::time::Duration;

/// 必需的 API 密钥环境变量
pub const API_KEY_VAR: &str = "DEDALUS_API_KEY";
/// 可选的服务地址环境变量
pub const BASE_URL_VAR: &str = "DEDALUS_BASE_URL";
/// 可选的请求超时（秒）环境变量
pub const TIMEOUT_VAR: &str = "DEDALUS_TIMEOUT_SECS";
/// Dedalus 服务默认地址
pub const DEFAULT_API_BASE: &str = "https://api.dedaluslabs.ai";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

// ===============================================================================================
// 配置模块
// ===============================================================================================

/// Dedalus 客户端配置
///
/// 启动时读取一次，之后不再修改。支持 Builder 模式和环境变量配置
#[derive(Clone)]
pub struct Config {
    /// API 密钥
    pub(crate) api_key: String,
    /// API 基础 URL
    pub(crate) api_base: String,
    /// 请求超时时间
    pub(crate) timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base: DEFAULT_API_BASE.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

// 密钥不进入日志
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("api_base", &self.api_base)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// 生成 Config Builder 方法的宏
///
/// 自动生成 `with_field_name` 形式的 builder 方法
macro_rules! config_builder {
    ($field:ident, $type:ty) => {
        paste::paste! {
            #[doc = "设置 `"]
            #[doc = stringify!($field)]
            #[doc = "`"]
            pub fn [<with_ $field>](mut self, $field: $type) -> Self {
                self.$field = $field;
                self
            }
        }
    };
}

impl Config {
    pub fn api_key(&self) -> &str { &self.api_key }
    pub fn api_base(&self) -> &str { &self.api_base }
    pub fn timeout(&self) -> Duration { self.timeout }

    /// 从环境变量和 `.env` 文件加载配置
    ///
    /// `.env` 文件在当前目录或其上级目录中查找，不存在时忽略。
    /// 环境变量会覆盖 `.env` 文件中的设置
    pub fn from_env() -> Result<Self> {
        let file_vars = read_env_file(dotenvy::dotenv_iter(), false)?;
        Self::from_layers(|key| env::var(key).ok(), &file_vars)
    }

    /// 从指定的 `.env` 文件和环境变量加载配置，文件必须存在
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self> {
        let file_vars = read_env_file(dotenvy::from_path_iter(path), true)?;
        Self::from_layers(|key| env::var(key).ok(), &file_vars)
    }

    /// 环境变量优先，找不到时再查 `.env` 文件中的值
    fn from_layers<E>(env_lookup: E, file_vars: &HashMap<String, String>) -> Result<Self>
    where
        E: Fn(&str) -> Option<String>,
    {
        Self::from_lookup(|key| env_lookup(key).or_else(|| file_vars.get(key).cloned()))
    }

    /// 通过任意查找函数构建配置
    ///
    /// 密钥缺失或为空时返回 [`DedalusError::Config`]
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                DedalusError::Config(format!("{} is not set in the environment or .env file", API_KEY_VAR))
            })?;

        let api_base = lookup(BASE_URL_VAR)
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        let timeout = match lookup(TIMEOUT_VAR) {
            Some(raw) => parse_timeout(&raw)?,
            None => DEFAULT_TIMEOUT,
        };

        Ok(Config {
            api_key,
            api_base,
            timeout,
        })
    }

    // 使用宏生成 builder 方法
    config_builder!(api_key, String);
    config_builder!(api_base, String);
    config_builder!(timeout, Duration);
}

fn parse_timeout(raw: &str) -> Result<Duration> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(DedalusError::Config(format!(
            "{} must be a positive number of seconds, got {:?}",
            TIMEOUT_VAR, raw
        ))),
    }
}

/// 读取 `.env` 文件中的键值对，不修改进程环境
///
/// 同一个键出现多次时保留第一次出现的值
fn read_env_file<R: Read>(
    iter: dotenvy::Result<dotenvy::Iter<R>>,
    required: bool,
) -> Result<HashMap<String, String>> {
    let iter = match iter {
        Ok(iter) => iter,
        Err(e) if e.not_found() && !required => return Ok(HashMap::new()),
        Err(e) => return Err(e.into()),
    };

    let mut vars = HashMap::new();
    for item in iter {
        let (key, value) = item?;
        vars.entry(key).or_insert(value);
    }
    Ok(vars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    fn load_file(path: &Path) -> Result<Config> {
        let file_vars = read_env_file(dotenvy::from_path_iter(path), true)?;
        Config::from_lookup(|key| file_vars.get(key).cloned())
    }

    /// Tests that the default configuration is created correctly.
    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.api_key, "");
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.timeout, Duration::from_secs(60));
    }

    /// Tests the builder methods for setting configuration fields.
    #[test]
    fn test_config_builder_methods() {
        let config = Config::default()
            .with_api_key("test_key".to_string())
            .with_api_base("http://localhost:8080".to_string())
            .with_timeout(Duration::from_secs(5));

        assert_eq!(config.api_key(), "test_key");
        assert_eq!(config.api_base(), "http://localhost:8080");
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = Config::default().with_api_key("super-secret".to_string());
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    /// Tests that an error is returned if the API key is not found.
    #[test]
    fn test_missing_api_key() {
        let result = Config::from_lookup(|_| None);
        match result {
            Err(DedalusError::Config(msg)) => assert!(msg.contains(API_KEY_VAR)),
            other => panic!("expected config error, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_api_key_counts_as_missing() {
        let result = Config::from_lookup(lookup_from(&[(API_KEY_VAR, "   ")]));
        assert!(matches!(result, Err(DedalusError::Config(_))));
    }

    #[test]
    fn test_overrides_from_lookup() {
        let config = Config::from_lookup(lookup_from(&[
            (API_KEY_VAR, "key"),
            (BASE_URL_VAR, "http://127.0.0.1:9000/"),
            (TIMEOUT_VAR, "15"),
        ]))
        .unwrap();
        assert_eq!(config.api_base, "http://127.0.0.1:9000");
        assert_eq!(config.timeout, Duration::from_secs(15));
    }

    #[test]
    fn test_invalid_timeout_is_config_error() {
        for raw in ["abc", "0", "-3"] {
            let result = Config::from_lookup(lookup_from(&[(API_KEY_VAR, "key"), (TIMEOUT_VAR, raw)]));
            assert!(matches!(result, Err(DedalusError::Config(_))), "accepted {:?}", raw);
        }
    }

    /// Tests that environment variables have priority over the .env file.
    #[test]
    fn test_env_overrides_env_file() {
        let mut file_vars = HashMap::new();
        file_vars.insert(API_KEY_VAR.to_string(), "from_file".to_string());
        file_vars.insert(BASE_URL_VAR.to_string(), "http://file".to_string());

        let env = lookup_from(&[(API_KEY_VAR, "from_env")]);
        let config = Config::from_layers(env, &file_vars).unwrap();

        assert_eq!(config.api_key, "from_env");
        // 只在文件中出现的键仍然生效
        assert_eq!(config.api_base, "http://file");
    }

    #[test]
    fn test_env_file_fills_missing_env() {
        let mut file_vars = HashMap::new();
        file_vars.insert(API_KEY_VAR.to_string(), "abc123".to_string());

        let config = Config::from_layers(|_| None, &file_vars).unwrap();
        assert_eq!(config.api_key, "abc123");
        assert_eq!(config.api_base, DEFAULT_API_BASE);
    }

    /// Tests loading the key from a .env file.
    #[test]
    fn test_env_file_supplies_api_key() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join(".env");
        let mut file = File::create(&file_path).unwrap();
        writeln!(file, "# local secrets").unwrap();
        writeln!(file, "DEDALUS_API_KEY=abc123").unwrap();

        let config = load_file(&file_path).unwrap();
        assert_eq!(config.api_key, "abc123");

        // 重复加载得到同一个值
        let again = load_file(&file_path).unwrap();
        assert_eq!(again.api_key, "abc123");
    }

    #[test]
    fn test_env_file_first_occurrence_wins() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join(".env");
        let mut file = File::create(&file_path).unwrap();
        writeln!(file, "DEDALUS_API_KEY=first").unwrap();
        writeln!(file, "DEDALUS_API_KEY=second").unwrap();

        let vars = read_env_file(dotenvy::from_path_iter(&file_path), true).unwrap();
        assert_eq!(vars.len(), 1);
        assert_eq!(vars.get(API_KEY_VAR).map(String::as_str), Some("first"));
    }

    #[test]
    fn test_env_file_without_key_fails() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join(".env");
        let mut file = File::create(&file_path).unwrap();
        writeln!(file, "OTHER_KEY=value").unwrap();

        assert!(matches!(load_file(&file_path), Err(DedalusError::Config(_))));
    }

    #[test]
    fn test_missing_env_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("absent.env");

        let optional = read_env_file(dotenvy::from_path_iter(&file_path), false).unwrap();
        assert!(optional.is_empty());

        let required = read_env_file(dotenvy::from_path_iter(&file_path), true);
        assert!(matches!(required, Err(DedalusError::Config(_))));
    }
}
