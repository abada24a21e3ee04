// doc-index/src/lib.rs
//! 中英文文档提取与索引
//!
//! - 将源仓库的英文、中文文档树压缩镜像到目标目录
//! - 读取 front matter，生成中英文对照的 api-index.json
//! - 按名称查询已生成的功能目录

pub mod catalog;
pub mod config;
pub mod error;
pub mod index;
pub mod markdown;
pub mod mirror;
pub mod models;

pub use catalog::{ApiCatalog, Lang};
pub use config::{DocsConfig, ExtractConfig, ProjectPaths};
pub use error::{DocError, FileFailure, Result};
pub use index::{BuildReport, IndexBuilder, ParsedDoc, to_index_json, write_index};
pub use markdown::{get_description_and_when_to_use, get_meta, read_markdown};
pub use mirror::{DocMirror, MirrorReport};
pub use models::{DocDescription, DocMeta, IndexRecord, ModuleLabels};

/// 一次完整提取的结果
#[derive(Debug)]
pub struct ExtractReport {
    pub en: MirrorReport,
    pub zh: MirrorReport,
    pub index: BuildReport,
}

impl ExtractReport {
    pub fn failure_count(&self) -> usize {
        self.en.failures.len() + self.zh.failures.len() + self.index.failures.len()
    }
}

/// 镜像英文、中文文档
pub fn mirror_project(project: &ProjectPaths) -> Result<(MirrorReport, MirrorReport)> {
    let mirror = DocMirror::new(&project.extract);
    let en = mirror.mirror(&project.en_source(), &project.target_en())?;
    let zh = mirror.mirror(&project.zh_source(), &project.target_zh())?;
    Ok((en, zh))
}

/// 从镜像目录生成索引并写入 api-index.json
pub fn index_project(project: &ProjectPaths) -> Result<BuildReport> {
    let report = IndexBuilder::for_project(project).build()?;
    write_index(&report.records, &project.index_path())?;
    Ok(report)
}

/// 镜像英文、镜像中文、生成索引
pub fn extract_project(project: &ProjectPaths) -> Result<ExtractReport> {
    tracing::info!("开始提取项目 {}", project.name);
    let (en, zh) = mirror_project(project)?;
    let index = index_project(project)?;
    Ok(ExtractReport { en, zh, index })
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

    #[test]
    fn test_extract_project_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("website");
        let target = dir.path().join("fesod-docs");
        let config = DocsConfig::from_json_str(&format!(
            r#"{{ "script": {{ "doc_root": {{ "fesod": {:?} }} }}, "js": {{ "doc_root": {{ "fesod": {:?} }} }} }}"#,
            source, target
        ))
        .unwrap();
        let project = config.project("fesod").unwrap();

        write(
            &project.en_source().join("fill/basic.md"),
            "---\ntitle: Basic Fill\nkeywords: [fill]\n---\n\nFill a template.\n",
        );
        write(
            &project.zh_source().join("fill/basic.md"),
            "---\ntitle: 基础填充\nkeywords: [填充]\n---\n\n填充模板。\n",
        );
        write(
            &project.en_source().join("read/advanced/csv.md"),
            "---\ntitle: CSV\n---\n",
        );
        write(&project.en_source().join("read/.DS_Store"), "junk");

        let report = extract_project(&project).unwrap();
        // 中文缺少 csv.md
        assert_eq!(report.index.records.len(), 1);
        assert_eq!(report.index.failures.len(), 1);
        assert_eq!(report.failure_count(), 1);

        let catalog = ApiCatalog::for_project(&project).unwrap();
        let entry = catalog.find("basic fill").unwrap();
        assert_eq!(entry.name, "Basic Fill | 基础填充, (填充 fill)");
        assert_eq!(
            catalog.documentation("basic fill", Lang::Zh).unwrap().as_deref(),
            Some("---\ntitle: 基础填充\nkeywords: [填充]\n---\n\n填充模板。\n")
        );
    }
}
