// doc-index/src/models.rs
//! 数据模型定义

use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::collections::{BTreeMap, BTreeSet};

/// 中英文字段之间的分隔符
pub const BILINGUAL_SEPARATOR: &str = " | ";

/// 文档 front matter 中的元信息
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocMeta {
    entries: BTreeMap<String, Value>,
}

impl DocMeta {
    pub fn new(entries: BTreeMap<String, Value>) -> Self {
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 读取标量字段，数字和布尔值转为字符串
    pub fn get_str(&self, key: &str) -> Option<String> {
        self.entries.get(key).and_then(scalar_to_string)
    }

    pub fn title(&self) -> Option<String> {
        self.get_str("title")
    }

    /// `keywords` 字段：列表按元素、字符串按逗号拆分
    ///
    /// 字符串按逗号切分为词，而不是拆成单个字符；结果按字典序去重。
    pub fn keywords(&self) -> BTreeSet<String> {
        match self.entries.get("keywords") {
            Some(Value::Sequence(items)) => items
                .iter()
                .filter_map(scalar_to_string)
                .map(|item| item.trim().to_string())
                .filter(|item| !item.is_empty())
                .collect(),
            Some(value) => scalar_to_string(value)
                .map(|text| {
                    text.split([',', '，'])
                        .map(str::trim)
                        .filter(|item| !item.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
            None => BTreeSet::new(),
        }
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// 描述和使用场景，均可能为空
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocDescription {
    pub description: String,
    pub when_to_use: String,
}

/// api-index.json 中的一条记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexRecord {
    /// 功能名称，中英文标题加模块名
    pub name: String,
    /// 相对中文文档根目录的路径，以 `/` 开头
    pub dir_name: String,
    pub description: String,
    pub when_to_use: String,
    pub keywords: Vec<String>,
    /// 所属模块（显示名称）
    pub module: String,
}

/// 模块目录名到双语显示名的映射，未登记的模块原样返回
#[derive(Debug, Clone, Default)]
pub struct ModuleLabels {
    labels: BTreeMap<String, String>,
}

impl ModuleLabels {
    pub fn new(labels: BTreeMap<String, String>) -> Self {
        Self { labels }
    }

    pub fn label<'a>(&'a self, module: &'a str) -> &'a str {
        self.labels.get(module).map(String::as_str).unwrap_or(module)
    }
}

/// 标题相同只保留一个，否则 `英文 | 中文`，再追加 `, 模块`
pub fn compose_name(en_title: &str, zh_title: &str, module_label: &str) -> String {
    if en_title == zh_title {
        format!("{en_title}, {module_label}")
    } else {
        format!("{en_title}{BILINGUAL_SEPARATOR}{zh_title}, {module_label}")
    }
}

pub fn join_bilingual(en: &str, zh: &str) -> String {
    format!("{en}{BILINGUAL_SEPARATOR}{zh}")
}
