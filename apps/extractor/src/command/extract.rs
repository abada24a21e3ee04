//! 提取命令：镜像文档树、生成索引

use super::{Command, print_failures};
use crate::config::Config;
use crate::error::{Result, WrapErr, error};

pub struct ExtractCommand {
    config: Config,
    strict: bool,
}

impl ExtractCommand {
    pub fn new(config: Config, strict: bool) -> Self {
        Self { config, strict }
    }
}

#[async_trait::async_trait]
impl Command for ExtractCommand {
    async fn execute(&self) -> Result<()> {
        let project = &self.config.project;
        println!("⚙️  配置文件: {:?}", self.config.config_path);
        println!("📂 源目录: {:?}", project.source_root);
        println!("📦 目标目录: {:?}", project.target_root);

        let report = doc_index::extract_project(project).wrap_err("Extract documentation error")?;

        println!(
            "✨ 镜像英文 {} 个、中文 {} 个文件，生成 {} 条索引",
            report.en.written,
            report.zh.written,
            report.index.records.len()
        );
        print_failures("英文镜像", &report.en.failures);
        print_failures("中文镜像", &report.zh.failures);
        print_failures("索引", &report.index.failures);

        let failures = report.failure_count();
        if self.strict && failures > 0 {
            return Err(error!("{failures} files failed during extraction"));
        }
        Ok(())
    }
}

pub struct MirrorCommand {
    config: Config,
}

impl MirrorCommand {
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

#[async_trait::async_trait]
impl Command for MirrorCommand {
    async fn execute(&self) -> Result<()> {
        let (en, zh) =
            doc_index::mirror_project(&self.config.project).wrap_err("Mirror documentation error")?;

        println!("✨ 镜像英文 {} 个、中文 {} 个文件", en.written, zh.written);
        print_failures("英文镜像", &en.failures);
        print_failures("中文镜像", &zh.failures);
        Ok(())
    }
}

pub struct IndexCommand {
    config: Config,
    strict: bool,
}

impl IndexCommand {
    pub fn new(config: Config, strict: bool) -> Self {
        Self { config, strict }
    }
}

#[async_trait::async_trait]
impl Command for IndexCommand {
    async fn execute(&self) -> Result<()> {
        let project = &self.config.project;
        let report = doc_index::index_project(project).wrap_err("Build API index error")?;

        println!(
            "✨ 生成 {} 条索引: {:?}",
            report.records.len(),
            project.index_path()
        );
        print_failures("索引", &report.failures);

        if self.strict && !report.is_clean() {
            return Err(error!("{} files failed during indexing", report.failures.len()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn config_for(root: &Path) -> Config {
        let config_path = root.join("config.json");
        let json = serde_json::json!({
            "script": { "doc_root": { "fesod": root.join("website") } },
            "js": { "doc_root": { "fesod": root.join("out") } },
        });
        fs::write(&config_path, json.to_string()).unwrap();
        Config::load(Some(config_path.as_path()), "fesod").unwrap()
    }

    #[tokio::test]
    async fn test_strict_extract_fails_on_missing_counterpart() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config_for(dir.path());
        write(&cfg.project.en_source().join("write/simple.md"), "---\ntitle: Simple Write\n---\n");
        // 中文目录存在，但缺少 simple.md
        write(&cfg.project.zh_source().join("write/other.md"), "---\ntitle: 其它\n---\n");

        ExtractCommand::new(cfg.clone(), false).execute().await.unwrap();
        let index = fs::read_to_string(cfg.project.index_path()).unwrap();
        assert_eq!(index, "[]");

        let err = ExtractCommand::new(cfg.clone(), true).execute().await.unwrap_err();
        assert!(err.to_string().contains("1 files failed"));

        let err = IndexCommand::new(cfg, true).execute().await.unwrap_err();
        assert!(err.to_string().contains("1 files failed"));
    }

    #[tokio::test]
    async fn test_extract_writes_index() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config_for(dir.path());
        write(&cfg.project.en_source().join("read/simple.md"), "---\ntitle: Simple Read\n---\n");
        write(&cfg.project.zh_source().join("read/simple.md"), "---\ntitle: 简单读取\n---\n");

        ExtractCommand::new(cfg.clone(), true).execute().await.unwrap();

        let index = fs::read_to_string(cfg.project.index_path()).unwrap();
        assert!(index.contains("\"name\": \"Simple Read | 简单读取, (读取 read)\""));
        assert!(index.contains("\"dirName\": \"/read/simple.md\""));
    }
}
