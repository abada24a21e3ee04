pub mod constants;

pub use etcetera::AppStrategy;
use etcetera::{AppStrategyArgs, choose_app_strategy};

use std::env;
use std::path::{Path, PathBuf};


pub fn create_strategy() -> std::result::Result<impl AppStrategy, etcetera::HomeDirError> {
    choose_app_strategy(AppStrategyArgs {
        top_level_domain: constants::TOP_LEVEL_DOMAIN.to_string(),
        author: constants::AUTHOR.to_string(),
        app_name: constants::APP_NAME.to_string(),
    })
}

pub fn resolve_dir<S, F>(env_key: &str, strategy: &S, strategy_fn: F) -> PathBuf
where
    S: AppStrategy,
    F: FnOnce(&S) -> Option<PathBuf>,
{
    env::var_os(env_key)
        .map(PathBuf::from)
        .or_else(|| strategy_fn(strategy))
        .unwrap_or_else(|| env::temp_dir().join(constants::APP_NAME))
}

/// 按优先级确定配置文件位置：
/// 命令行参数 > 环境变量 > 工作目录下的 config.json > 平台配置目录
pub fn resolve_config_path(explicit: Option<&Path>, working_dir: &Path) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    if let Some(path) = env::var_os(constants::CONFIG_ENV_KEY) {
        return PathBuf::from(path);
    }

    let local = working_dir.join(constants::CONFIG_FILE_NAME);
    if local.is_file() {
        return local;
    }

    match create_strategy() {
        Ok(strategy) => resolve_dir("CONFIG_DIRECTORY", &strategy, |s| Some(s.config_dir()))
            .join(constants::CONFIG_FILE_NAME),
        Err(_) => local,
    }
}
