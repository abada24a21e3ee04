//! 查询命令：列出功能、读取功能文档

use super::Command;
use crate::config::Config;
use crate::error::{Result, WrapErr};
use doc_index::{ApiCatalog, Lang};

pub struct ListCommand {
    config: Config,
}

impl ListCommand {
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

#[async_trait::async_trait]
impl Command for ListCommand {
    async fn execute(&self) -> Result<()> {
        let catalog = ApiCatalog::for_project(&self.config.project)
            .wrap_err("Load API index error")?;
        println!("{}", serde_json::to_string_pretty(catalog.entries())?);
        Ok(())
    }
}

pub struct DocCommand {
    config: Config,
    name: String,
    lang: Lang,
}

impl DocCommand {
    pub fn new(config: Config, name: String, lang: Lang) -> Self {
        Self { config, name, lang }
    }
}

#[async_trait::async_trait]
impl Command for DocCommand {
    async fn execute(&self) -> Result<()> {
        let catalog = ApiCatalog::for_project(&self.config.project)
            .wrap_err("Load API index error")?;

        match catalog.documentation(&self.name, self.lang)? {
            Some(doc) => println!("{doc}"),
            None => println!("\"{}\" {} 文档不存在", self.name, self.lang),
        }
        Ok(())
    }
}
