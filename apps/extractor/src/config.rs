use crate::error::{Result, WrapErr};
use doc_index::{DocsConfig, ProjectPaths};
use std::path::{Path, PathBuf};

/// 命令执行所需的上下文：配置文件位置和选中的项目
#[derive(Debug, Clone)]
pub struct Config {
    pub config_path: PathBuf,
    pub project: ProjectPaths,
}

impl Config {
    pub fn load(explicit: Option<&Path>, project: &str) -> Result<Config> {
        let working_dir = std::env::current_dir().wrap_err("Read working directory error")?;
        let config_path = config::resolve_config_path(explicit, &working_dir);
        Self::load_from(&config_path, project)
    }

    fn load_from(config_path: &Path, project: &str) -> Result<Config> {
        tracing::debug!("使用配置文件: {:?}", config_path);

        let docs = DocsConfig::load_from_file(config_path)
            .wrap_err_with(|| format!("Load configuration {config_path:?} error"))?;
        let project = docs
            .project(project)
            .wrap_err_with(|| format!("Resolve project from {config_path:?} error"))?;

        Ok(Config {
            config_path: config_path.to_path_buf(),
            project,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_project() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{ "script": { "doc_root": { "fesod": "/src" } }, "js": { "doc_root": { "fesod": "/out" } } }"#,
        )
        .unwrap();

        let cfg = Config::load(Some(path.as_path()), "fesod").unwrap();
        assert_eq!(cfg.config_path, path);
        assert_eq!(cfg.project.target_root, Path::new("/out"));
        assert!(Config::load(Some(path.as_path()), "poi").is_err());
    }

    #[test]
    fn test_missing_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(dir.path().join("absent.json").as_path()), "fesod").unwrap_err();
        assert!(format!("{err:?}").contains("absent.json"));
    }
}
