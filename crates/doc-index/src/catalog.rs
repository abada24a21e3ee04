// doc-index/src/catalog.rs
//! 功能目录 - 读取 api-index.json，按名称查找文档

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::config::{ProjectPaths, TARGET_EN_DIR, TARGET_ZH_DIR};
use crate::error::{DocError, Result};
use crate::models::IndexRecord;

/// 文档语言
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Lang {
    #[default]
    En,
    Zh,
}

impl Lang {
    fn docs_dir(self) -> &'static str {
        match self {
            Lang::En => TARGET_EN_DIR,
            Lang::Zh => TARGET_ZH_DIR,
        }
    }
}

impl FromStr for Lang {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" => Ok(Lang::En),
            "zh" => Ok(Lang::Zh),
            other => Err(format!("unsupported language `{other}` (expected en or zh)")),
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lang::En => write!(f, "en"),
            Lang::Zh => write!(f, "zh"),
        }
    }
}

pub struct ApiCatalog {
    root: PathBuf,
    entries: Vec<IndexRecord>,
}

impl ApiCatalog {
    pub fn new(root: impl Into<PathBuf>, entries: Vec<IndexRecord>) -> Self {
        Self {
            root: root.into(),
            entries,
        }
    }

    /// 从提取结果根目录加载索引
    pub fn load(root: &Path, index_file: &str) -> Result<Self> {
        let path = root.join(index_file);
        let content = fs::read_to_string(&path).map_err(|e| DocError::io(&path, e))?;
        let entries: Vec<IndexRecord> = serde_json::from_str(&content)?;
        tracing::debug!("已加载 {} 条功能记录: {:?}", entries.len(), path);
        Ok(Self::new(root, entries))
    }

    pub fn for_project(project: &ProjectPaths) -> Result<Self> {
        Self::load(&project.target_root, &project.extract.index_file)
    }

    pub fn entries(&self) -> &[IndexRecord] {
        &self.entries
    }

    /// 按名称查找：完全匹配优先，其次名称包含，最后匹配关键词（均不区分大小写）
    pub fn find(&self, name: &str) -> Option<&IndexRecord> {
        let query = name.trim().to_lowercase();
        if query.is_empty() {
            return None;
        }

        self.entries
            .iter()
            .find(|entry| entry.name.to_lowercase() == query)
            .or_else(|| {
                self.entries
                    .iter()
                    .find(|entry| entry.name.to_lowercase().contains(&query))
            })
            .or_else(|| {
                self.entries
                    .iter()
                    .find(|entry| entry.keywords.iter().any(|k| k.to_lowercase() == query))
            })
    }

    /// 文档在提取目录中的位置
    pub fn doc_path(&self, entry: &IndexRecord, lang: Lang) -> PathBuf {
        let relative = entry.dir_name.trim_start_matches('/');
        self.root.join(lang.docs_dir()).join(relative)
    }

    /// 读取功能文档；找不到记录或文件时返回 `None`
    pub fn documentation(&self, name: &str, lang: Lang) -> Result<Option<String>> {
        let Some(entry) = self.find(name) else {
            return Ok(None);
        };

        let path = self.doc_path(entry, lang);
        if !path.is_file() {
            tracing::debug!("{} {} 文档不存在: {:?}", name, lang, path);
            return Ok(None);
        }

        fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| DocError::io(&path, e))
    }
}
