// doc-index/src/config.rs
//! 配置模块
//!
//! 配置文件为 JSON，结构与文档服务共用：
//!
//! ```json
//! {
//!     "script": { "doc_root": { "fesod": "../.temp/fesod/website" } },
//!     "js": { "doc_root": { "fesod": "./fesod-docs" } }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{DocError, Result};

/// 提取结果中英文、中文文档所在的子目录
pub const TARGET_EN_DIR: &str = "docs/en";
pub const TARGET_ZH_DIR: &str = "docs/zh";

/// 文档配置
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DocsConfig {
    /// 源文档仓库根目录（按项目名）
    pub script: RootSection,
    /// 提取结果根目录（按项目名）
    pub js: RootSection,
    #[serde(default)]
    pub extract: ExtractConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RootSection {
    #[serde(default)]
    pub doc_root: BTreeMap<String, PathBuf>,
}

/// 提取配置
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// 英文文档目录，相对源根目录
    pub en_source: PathBuf,
    /// 中文文档目录，相对源根目录
    pub zh_source: PathBuf,
    /// 跳过的系统文件
    pub ignored_files: Vec<String>,
    /// 作为文档条目的文件扩展名
    pub extensions: Vec<String>,
    /// 模块目录名 -> 显示名称
    pub module_labels: BTreeMap<String, String>,
    pub index_file: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            en_source: PathBuf::from("docs"),
            zh_source: PathBuf::from("i18n/zh-cn/docusaurus-plugin-content-docs/current"),
            ignored_files: vec![".DS_Store".to_string()],
            extensions: vec!["md".to_string(), "mdx".to_string()],
            module_labels: BTreeMap::from([
                ("fill".to_string(), "(填充 fill)".to_string()),
                ("write".to_string(), "(写入 write)".to_string()),
                ("read".to_string(), "(读取 read)".to_string()),
            ]),
            index_file: "api-index.json".to_string(),
        }
    }
}

impl ExtractConfig {
    pub fn is_ignored(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| self.ignored_files.iter().any(|ignored| ignored == name))
    }

    /// 是否是需要按 Markdown 处理的文件
    pub fn is_document(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.extensions
                    .iter()
                    .any(|allowed| allowed.eq_ignore_ascii_case(ext))
            })
    }
}

/// 单个项目解析后的路径
#[derive(Debug, Clone)]
pub struct ProjectPaths {
    pub name: String,
    pub source_root: PathBuf,
    pub target_root: PathBuf,
    pub extract: ExtractConfig,
}

impl ProjectPaths {
    pub fn en_source(&self) -> PathBuf {
        self.source_root.join(&self.extract.en_source)
    }

    pub fn zh_source(&self) -> PathBuf {
        self.source_root.join(&self.extract.zh_source)
    }

    pub fn target_en(&self) -> PathBuf {
        self.target_root.join(TARGET_EN_DIR)
    }

    pub fn target_zh(&self) -> PathBuf {
        self.target_root.join(TARGET_ZH_DIR)
    }

    pub fn index_path(&self) -> PathBuf {
        self.target_root.join(&self.extract.index_file)
    }
}

impl DocsConfig {
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// 从 JSON 文件加载配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| DocError::io(path, e))?;
        serde_json::from_str(&content).map_err(|e| DocError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// 取出某个项目的源目录和目标目录
    pub fn project(&self, name: &str) -> Result<ProjectPaths> {
        let source_root = self.script.doc_root.get(name).ok_or_else(|| DocError::UnknownProject {
            name: name.to_string(),
            section: "script",
        })?;
        let target_root = self.js.doc_root.get(name).ok_or_else(|| DocError::UnknownProject {
            name: name.to_string(),
            section: "js",
        })?;

        Ok(ProjectPaths {
            name: name.to_string(),
            source_root: source_root.clone(),
            target_root: target_root.clone(),
            extract: self.extract.clone(),
        })
    }
}
