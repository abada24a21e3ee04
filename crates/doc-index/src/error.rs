// doc-index/src/error.rs
//! 错误类型

use std::io;
use std::path::{Path, PathBuf};

pub type Result<T, E = DocError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum DocError {
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// 英文文档没有对应的中文文档
    #[error("missing Chinese counterpart {zh_path:?} for {en_path:?}")]
    MissingCounterpart { en_path: PathBuf, zh_path: PathBuf },

    #[error("required meta key `{key}` missing in {path:?}")]
    MissingMeta { path: PathBuf, key: String },

    #[error("malformed metadata in {path:?}: {reason}")]
    MalformedMeta { path: PathBuf, reason: String },

    #[error("unknown project `{name}` (not present in {section}.doc_root)")]
    UnknownProject { name: String, section: &'static str },

    #[error("invalid configuration {path:?}: {reason}")]
    Config { path: PathBuf, reason: String },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl DocError {
    pub(crate) fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub(crate) fn malformed(path: impl AsRef<Path>, reason: impl Into<String>) -> Self {
        Self::MalformedMeta {
            path: path.as_ref().to_path_buf(),
            reason: reason.into(),
        }
    }

    /// 错误类别，用于汇总报告
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Io { .. } => "io",
            Self::MissingCounterpart { .. } => "missing-file",
            Self::MissingMeta { .. } | Self::MalformedMeta { .. } => "malformed-metadata",
            Self::UnknownProject { .. } | Self::Config { .. } => "config",
            Self::Json(_) => "json",
        }
    }
}

/// 单个文件处理失败，不中断整体流程
#[derive(Debug)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: DocError,
}

impl FileFailure {
    pub fn new(path: impl Into<PathBuf>, error: DocError) -> Self {
        Self {
            path: path.into(),
            error,
        }
    }
}
