// doc-index/src/mirror.rs
//! 文档镜像 - 将源文档树压缩复制到目标目录
//!
//! 每个一级子目录是一个模块；模块下更深层的文件统一放到
//! `<模块>/<父目录>/<文件名>`，即最多保留一层子目录。

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::ExtractConfig;
use crate::error::{DocError, FileFailure, Result};
use crate::markdown::read_markdown;

/// 镜像结果
#[derive(Debug, Default)]
pub struct MirrorReport {
    pub written: usize,
    pub failures: Vec<FileFailure>,
}

impl MirrorReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

pub struct DocMirror<'a> {
    settings: &'a ExtractConfig,
}

impl<'a> DocMirror<'a> {
    pub fn new(settings: &'a ExtractConfig) -> Self {
        Self { settings }
    }

    /// 镜像整个目录树；只有源根目录不可读时返回错误
    pub fn mirror(&self, source_root: &Path, target_root: &Path) -> Result<MirrorReport> {
        fs::create_dir_all(target_root).map_err(|e| DocError::io(target_root, e))?;

        let mut report = MirrorReport::default();

        for entry in sorted_entries(source_root)? {
            if entry.is_dir() {
                self.mirror_module(&entry, target_root, &mut report);
            } else if self.settings.is_ignored(&entry) {
                tracing::debug!("跳过系统文件: {:?}", entry);
            } else if let Some(file_name) = entry.file_name() {
                let target = target_root.join(file_name);
                self.write_one(&entry, &target, &mut report);
            }
        }

        tracing::info!(
            "镜像完成 {:?} -> {:?}: 写入 {} 个文件, 失败 {} 个",
            source_root,
            target_root,
            report.written,
            report.failures.len()
        );
        Ok(report)
    }

    fn mirror_module(&self, source_dir: &Path, target_root: &Path, report: &mut MirrorReport) {
        let Some(module) = source_dir.file_name() else {
            return;
        };
        tracing::info!("处理文件夹: {}", module.to_string_lossy());

        let target_dir = target_root.join(module);
        if let Err(e) = fs::create_dir_all(&target_dir) {
            report
                .failures
                .push(FileFailure::new(source_dir, DocError::io(&target_dir, e)));
            return;
        }

        let walker = WalkDir::new(source_dir)
            .min_depth(1)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter();

        for result in walker {
            let entry = match result {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("遍历错误: {}", e);
                    let path = e.path().unwrap_or(source_dir).to_path_buf();
                    let error = DocError::io(&path, e.into());
                    report.failures.push(FileFailure::new(path, error));
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            if self.settings.is_ignored(entry.path()) {
                tracing::debug!("跳过系统文件: {:?}", entry.path());
                continue;
            }

            let target = flattened_target(entry.path(), &target_dir);
            if let Some(parent) = target.parent() {
                if let Err(e) = fs::create_dir_all(parent) {
                    report
                        .failures
                        .push(FileFailure::new(entry.path(), DocError::io(parent, e)));
                    continue;
                }
            }
            self.write_one(entry.path(), &target, report);
        }
    }

    fn write_one(&self, source: &Path, target: &Path, report: &mut MirrorReport) {
        tracing::debug!("目标文件路径: {:?}", target);
        match self.copy_file(source, target) {
            Ok(()) => report.written += 1,
            Err(error) => {
                tracing::warn!("处理文件失败 {:?}: {}", source, error);
                report.failures.push(FileFailure::new(source, error));
            }
        }
    }

    /// Markdown 统一转为 UTF-8 写出，其它文件原样复制
    fn copy_file(&self, source: &Path, target: &Path) -> Result<()> {
        if self.settings.is_document(source) {
            let content = read_markdown(source)?;
            fs::write(target, content).map_err(|e| DocError::io(target, e))
        } else {
            fs::copy(source, target)
                .map(|_| ())
                .map_err(|e| DocError::io(target, e))
        }
    }
}

/// 源根目录下的条目，按文件名排序
pub(crate) fn sorted_entries(root: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(root)
        .map_err(|e| DocError::io(root, e))?
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|e| DocError::io(root, e))?;
    entries.sort();
    Ok(entries)
}

/// 计算压缩后的目标路径：父目录与模块同名时直接放在模块下
fn flattened_target(file: &Path, target_dir: &Path) -> PathBuf {
    let file_name = file.file_name().unwrap_or_default();
    let parent_name = file.parent().and_then(Path::file_name);

    match parent_name {
        Some(parent) if Some(parent) != target_dir.file_name() => {
            target_dir.join(parent).join(file_name)
        }
        _ => target_dir.join(file_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[rstest]
    #[case("src/fill/basic.md", "out/fill/basic.md")]
    #[case("src/fill/list/horizontal.md", "out/fill/list/horizontal.md")]
    #[case("src/fill/a/b/deep.md", "out/fill/b/deep.md")]
    #[case("src/fill/fill/same.md", "out/fill/same.md")]
    fn test_flattened_target(#[case] file: &str, #[case] expected: &str) {
        let target_dir = Path::new("out/fill");
        assert_eq!(flattened_target(Path::new(file), target_dir), Path::new(expected));
    }

    #[test]
    fn test_mirror_tree() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("docs");
        let target = dir.path().join("out/docs/en");

        write(&source.join("introduce.md"), "# Intro\n");
        write(&source.join("fill/basic.md"), "---\ntitle: Basic Fill\n---\n");
        write(&source.join("fill/.DS_Store"), "junk");
        write(&source.join("read/advanced/csv/csv.md"), "---\ntitle: CSV\n---\n");
        fs::create_dir_all(source.join("write/img")).unwrap();
        fs::write(source.join("write/img/flow.png"), [0x89u8, 0x50, 0xff, 0x00]).unwrap();

        let settings = ExtractConfig::default();
        let report = DocMirror::new(&settings).mirror(&source, &target).unwrap();

        assert!(report.is_clean());
        assert_eq!(report.written, 4);
        assert!(target.join("introduce.md").is_file());
        assert!(target.join("fill/basic.md").is_file());
        assert!(!target.join("fill/.DS_Store").exists());
        assert!(target.join("read/csv/csv.md").is_file());
        assert_eq!(
            fs::read(target.join("write/img/flow.png")).unwrap(),
            vec![0x89, 0x50, 0xff, 0x00]
        );
    }

    #[test]
    fn test_mirror_is_repeatable() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("docs");
        let target = dir.path().join("out");
        write(&source.join("fill/basic.md"), "v1");

        let settings = ExtractConfig::default();
        DocMirror::new(&settings).mirror(&source, &target).unwrap();
        write(&source.join("fill/basic.md"), "v2");
        let report = DocMirror::new(&settings).mirror(&source, &target).unwrap();

        assert_eq!(report.written, 1);
        assert_eq!(fs::read_to_string(target.join("fill/basic.md")).unwrap(), "v2");
    }

    #[test]
    fn test_mirror_continues_after_write_failure() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("docs");
        let target = dir.path().join("out");
        write(&source.join("fill/a.md"), "---\ntitle: A\n---\n");
        write(&source.join("fill/b.md"), "---\ntitle: B\n---\n");
        // 目标位置被目录占用，a.md 无法写入
        fs::create_dir_all(target.join("fill/a.md")).unwrap();

        let settings = ExtractConfig::default();
        let report = DocMirror::new(&settings).mirror(&source, &target).unwrap();

        assert_eq!(report.written, 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].path, source.join("fill/a.md"));
        assert!(matches!(report.failures[0].error, DocError::Io { .. }));
        assert!(target.join("fill/b.md").is_file());
    }

    #[cfg(unix)]
    #[test]
    fn test_mirror_follows_symlinked_docs() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("docs");
        let target = dir.path().join("out");
        write(&source.join("shared.md"), "---\ntitle: Shared\n---\n");
        fs::create_dir_all(source.join("fill")).unwrap();
        std::os::unix::fs::symlink("../shared.md", source.join("fill/linked.md")).unwrap();

        let settings = ExtractConfig::default();
        let report = DocMirror::new(&settings).mirror(&source, &target).unwrap();

        assert!(report.is_clean());
        assert_eq!(report.written, 2);
        assert_eq!(
            fs::read_to_string(target.join("fill/linked.md")).unwrap(),
            "---\ntitle: Shared\n---\n"
        );
    }

    #[test]
    fn test_missing_source_root() {
        let dir = tempfile::tempdir().unwrap();
        let settings = ExtractConfig::default();
        let result = DocMirror::new(&settings).mirror(&dir.path().join("nope"), &dir.path().join("out"));
        assert!(matches!(result, Err(DocError::Io { .. })));
    }
}
