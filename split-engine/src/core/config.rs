use std::path::PathBuf;
use std::time::Duration;

/// Default namespaced key of the party collection
pub const DEFAULT_STORAGE_KEY: &str = "restaurant_parties";

/// 引擎配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | SPLIT_DATA_DIR | ./data | redb 数据目录 |
/// | SPLIT_CATALOG_PATH | ./restaurants.json | 餐厅目录文件 |
/// | SPLIT_STORAGE_KEY | restaurant_parties | 聚会快照集合的存储键 |
/// | SPLIT_MESSAGE_CLEAR_MS | 3000 | 提示消息自动清除延迟(毫秒) |
/// | SPLIT_LOG_LEVEL | info | 日志级别 |
/// | SPLIT_LOG_DIR | (未设置) | 日志文件目录 |
///
/// A `.env` file in the working directory is honoured.
#[derive(Debug, Clone)]
pub struct Config {
    /// 数据目录，存放 redb 数据库文件
    pub data_dir: PathBuf,
    /// 餐厅目录 JSON 文件
    pub catalog_path: PathBuf,
    /// 聚会快照集合的存储键
    pub storage_key: String,
    /// 提示消息自动清除延迟 (毫秒)
    pub message_clear_ms: u64,
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        Self {
            data_dir: std::env::var("SPLIT_DATA_DIR")
                .unwrap_or_else(|_| "./data".into())
                .into(),
            catalog_path: std::env::var("SPLIT_CATALOG_PATH")
                .unwrap_or_else(|_| "./restaurants.json".into())
                .into(),
            storage_key: std::env::var("SPLIT_STORAGE_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_STORAGE_KEY.into()),
            message_clear_ms: std::env::var("SPLIT_MESSAGE_CLEAR_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            log_level: std::env::var("SPLIT_LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("SPLIT_LOG_DIR").ok(),
        }
    }

    /// 使用自定义数据目录覆盖配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(data_dir: impl Into<PathBuf>) -> Self {
        let mut config = Self::from_env();
        config.data_dir = data_dir.into();
        config
    }

    /// redb database file inside the data directory
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join("parties.redb")
    }

    pub fn message_clear_after(&self) -> Duration {
        Duration::from_millis(self.message_clear_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_keep_defaults() {
        let config = Config::with_overrides("/tmp/split-test");
        assert_eq!(config.database_path(), PathBuf::from("/tmp/split-test/parties.redb"));
        assert!(!config.storage_key.is_empty());
    }
}
