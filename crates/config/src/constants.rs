pub const TOP_LEVEL_DOMAIN: &str = "org";
pub const AUTHOR: &str = "docs-mcp";
pub const APP_NAME: &str = "doc-extractor";

/// 配置文件名，同时用于当前目录与平台配置目录
pub const CONFIG_FILE_NAME: &str = "config.json";
/// 显式指定配置文件路径的环境变量
pub const CONFIG_ENV_KEY: &str = "DOC_EXTRACTOR_CONFIG";
pub const DEFAULT_PROJECT: &str = "fesod";
