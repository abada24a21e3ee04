// doc-index/src/index.rs
//! 索引模块 - 生成中英文对照的 api-index.json
//!
//! 只遍历英文镜像目录，按相对路径找到对应的中文文档，合并两者的元信息。

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use walkdir::WalkDir;

use crate::config::{ExtractConfig, ProjectPaths};
use crate::error::{DocError, FileFailure, Result};
use crate::markdown::{get_description_and_when_to_use, get_meta, read_markdown};
use crate::mirror::sorted_entries;
use crate::models::{
    DocDescription, DocMeta, IndexRecord, ModuleLabels, compose_name, join_bilingual,
};

/// 英文镜像根目录的目录名；模块名等于它时，文件位于根目录下
pub const EN_ROOT_NAME: &str = "en";

/// 一次构建的结果：成功的记录和逐文件的失败
#[derive(Debug, Default)]
pub struct BuildReport {
    pub records: Vec<IndexRecord>,
    pub failures: Vec<FileFailure>,
}

impl BuildReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// 单个文档解析后的内容
#[derive(Debug, Clone)]
pub struct ParsedDoc {
    pub path: PathBuf,
    pub meta: DocMeta,
    pub description: DocDescription,
}

impl ParsedDoc {
    pub fn load(path: &Path) -> Result<Self> {
        let content = read_markdown(path)?;
        let meta = get_meta(path, &content)?;
        let description = get_description_and_when_to_use(path, &content)?;
        Ok(Self {
            path: path.to_path_buf(),
            meta,
            description,
        })
    }

    pub fn title(&self) -> Result<String> {
        self.meta.title().ok_or_else(|| DocError::MissingMeta {
            path: self.path.clone(),
            key: "title".to_string(),
        })
    }
}

pub struct IndexBuilder<'a> {
    en_root: PathBuf,
    zh_root: PathBuf,
    settings: &'a ExtractConfig,
    labels: ModuleLabels,
}

impl<'a> IndexBuilder<'a> {
    pub fn new(en_root: impl Into<PathBuf>, zh_root: impl Into<PathBuf>, settings: &'a ExtractConfig) -> Self {
        Self {
            en_root: en_root.into(),
            zh_root: zh_root.into(),
            settings,
            labels: ModuleLabels::new(settings.module_labels.clone()),
        }
    }

    /// 基于项目的镜像目录创建
    pub fn for_project(project: &'a ProjectPaths) -> Self {
        Self::new(project.target_en(), project.target_zh(), &project.extract)
    }

    /// 遍历英文目录下的所有模块，逐个文件生成记录
    pub fn build(&self) -> Result<BuildReport> {
        let mut report = BuildReport::default();

        for module_dir in sorted_entries(&self.en_root)? {
            if !module_dir.is_dir() {
                continue;
            }
            self.build_module(&module_dir, &mut report);
        }

        tracing::info!(
            "索引完成: {} 条记录, {} 个文件失败",
            report.records.len(),
            report.failures.len()
        );
        Ok(report)
    }

    fn build_module(&self, module_dir: &Path, report: &mut BuildReport) {
        let walker = WalkDir::new(module_dir)
            .min_depth(1)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter();

        for result in walker {
            let entry = match result {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("遍历错误: {}", e);
                    let path = e.path().unwrap_or(module_dir).to_path_buf();
                    let error = DocError::io(&path, e.into());
                    report.failures.push(FileFailure::new(path, error));
                    continue;
                }
            };
            let path = entry.path();
            if !entry.file_type().is_file() || self.settings.is_ignored(path) {
                continue;
            }
            if !self.settings.is_document(path) {
                tracing::debug!("跳过非文档文件: {:?}", path);
                continue;
            }

            match self.process_file(path) {
                Ok(record) => {
                    tracing::debug!("已索引: {}", record.name);
                    report.records.push(record);
                }
                Err(error) => {
                    tracing::warn!("处理文件失败 {:?}: {}", path, error);
                    report.failures.push(FileFailure::new(path, error));
                }
            }
        }
    }

    /// 英文文档对应的中文文档路径
    pub fn counterpart_path(&self, en_path: &Path) -> PathBuf {
        let module = module_name(en_path);
        if module == EN_ROOT_NAME {
            if let Some(file_name) = en_path.file_name() {
                return self.zh_root.join(file_name);
            }
        }
        match en_path.strip_prefix(&self.en_root) {
            Ok(relative) => self.zh_root.join(relative),
            Err(_) => self.zh_root.join(en_path.file_name().unwrap_or_default()),
        }
    }

    /// 中文文档相对中文根目录的路径，形如 `/fill/basic.md`
    pub fn dir_name(&self, zh_path: &Path) -> String {
        let relative = zh_path.strip_prefix(&self.zh_root).unwrap_or(zh_path);
        let segments: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        format!("/{}", segments.join("/"))
    }

    /// 处理单个英文文档
    pub fn process_file(&self, en_path: &Path) -> Result<IndexRecord> {
        let zh_path = self.counterpart_path(en_path);
        if !zh_path.is_file() {
            return Err(DocError::MissingCounterpart {
                en_path: en_path.to_path_buf(),
                zh_path,
            });
        }

        let en = ParsedDoc::load(en_path)?;
        let zh = ParsedDoc::load(&zh_path)?;
        let module = module_name(en_path);

        self.compose_record(&en, &zh, &module, self.dir_name(&zh_path))
    }

    /// 合并中英文内容为一条记录
    pub fn compose_record(
        &self,
        en: &ParsedDoc,
        zh: &ParsedDoc,
        module: &str,
        dir_name: String,
    ) -> Result<IndexRecord> {
        let en_title = en.title()?;
        let zh_title = zh.title()?;
        let module_label = self.labels.label(module);

        let mut keywords = en.meta.keywords();
        keywords.extend(zh.meta.keywords());

        Ok(IndexRecord {
            name: compose_name(&en_title, &zh_title, module_label),
            dir_name,
            description: join_bilingual(&en.description.description, &zh.description.description),
            when_to_use: join_bilingual(&en.description.when_to_use, &zh.description.when_to_use),
            keywords: keywords.into_iter().collect(),
            module: module_label.to_string(),
        })
    }
}

/// 文件所在目录名即模块名
fn module_name(path: &Path) -> String {
    path.parent()
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// 以 4 空格缩进写出 JSON，非 ASCII 字符原样保留
pub fn to_index_json(records: &[IndexRecord]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    records.serialize(&mut serializer)?;
    Ok(buf)
}

pub fn write_index(records: &[IndexRecord], path: &Path) -> Result<()> {
    let json = to_index_json(records)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| DocError::io(parent, e))?;
    }
    fs::write(path, json).map_err(|e| DocError::io(path, e))?;
    tracing::info!("已写入索引文件: {:?}", path);
    Ok(())
}
