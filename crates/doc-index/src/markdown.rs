// doc-index/src/markdown.rs
//! Markdown 读取与元信息提取

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chardetng::EncodingDetector;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_yaml::Value;

use crate::error::{DocError, Result};
use crate::models::{DocDescription, DocMeta};

const FRONT_MATTER_DELIMITER: &str = "---";

static HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(#{1,6})\s+(.+?)\s*#*\s*$").expect("valid heading regex"));

/// 描述章节的标题（小写比较）
const DESCRIPTION_HEADINGS: &[&str] = &[
    "description",
    "overview",
    "introduction",
    "描述",
    "概述",
    "简介",
    "介绍",
];

/// 使用场景章节的标题（小写比较）
const WHEN_TO_USE_HEADINGS: &[&str] = &[
    "when to use",
    "use case",
    "use cases",
    "usage scenario",
    "usage scenarios",
    "使用场景",
    "适用场景",
    "何时使用",
];

/// 读取 Markdown 文件（自动检测编码）
pub fn read_markdown(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| DocError::io(path, e))?;
    let text = decode_text(path, &bytes);
    if let Some(stripped) = text.strip_prefix('\u{feff}') {
        return Ok(stripped.to_string());
    }
    Ok(text)
}

fn decode_text(path: &Path, bytes: &[u8]) -> String {
    // 先尝试UTF-8
    if let Ok(text) = std::str::from_utf8(bytes) {
        return text.to_string();
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let detected_encoding = detector.guess(None, true);

    tracing::debug!("检测到文件编码 {}: {:?}", detected_encoding.name(), path);

    let (decoded, encoding_used, had_errors) = detected_encoding.decode(bytes);
    if had_errors {
        tracing::warn!("文件 {:?} 使用 {} 解码时有部分错误", path, encoding_used.name());
    }

    decoded.into_owned()
}

/// 拆分 front matter 与正文
///
/// 没有 front matter 时返回 `(None, content)`；有起始 `---` 但没有结束行时报错。
pub fn split_front_matter<'a>(
    path: &Path,
    content: &'a str,
) -> Result<(Option<&'a str>, &'a str)> {
    let trimmed = content.trim_start_matches(['\u{feff}', '\n', '\r']);
    let Some(first_line_end) = trimmed.find('\n') else {
        if trimmed.trim_end() == FRONT_MATTER_DELIMITER {
            return Err(DocError::malformed(path, "unterminated front matter"));
        }
        return Ok((None, content));
    };
    if trimmed[..first_line_end].trim_end() != FRONT_MATTER_DELIMITER {
        return Ok((None, content));
    }

    let rest = &trimmed[first_line_end + 1..];
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == FRONT_MATTER_DELIMITER {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Ok((Some(yaml), body));
        }
        offset += line.len();
    }

    Err(DocError::malformed(path, "unterminated front matter"))
}

/// 解析 front matter 为键值表
pub fn get_meta(path: &Path, content: &str) -> Result<DocMeta> {
    let (yaml, _) = split_front_matter(path, content)?;
    let Some(yaml) = yaml else {
        return Ok(DocMeta::default());
    };
    if yaml.trim().is_empty() {
        return Ok(DocMeta::default());
    }

    let value: Value = serde_yaml::from_str(yaml)
        .map_err(|e| DocError::malformed(path, format!("invalid YAML front matter: {e}")))?;

    match value {
        Value::Mapping(mapping) => {
            let mut entries = BTreeMap::new();
            for (key, value) in mapping {
                match key {
                    Value::String(key) => {
                        entries.insert(key, value);
                    }
                    other => tracing::debug!("忽略非字符串 meta 键 {:?}: {:?}", other, path),
                }
            }
            Ok(DocMeta::new(entries))
        }
        Value::Null => Ok(DocMeta::default()),
        _ => Err(DocError::malformed(path, "front matter is not a key/value mapping")),
    }
}

/// 提取描述和使用场景
pub fn get_description_and_when_to_use(path: &Path, content: &str) -> Result<DocDescription> {
    let meta = get_meta(path, content)?;
    let (_, body) = split_front_matter(path, content)?;
    let lines: Vec<&str> = body.lines().collect();

    let description = meta
        .get_str("description")
        .map(|text| collapse_whitespace(&text))
        .filter(|text| !text.is_empty())
        .or_else(|| section_text(&lines, DESCRIPTION_HEADINGS))
        .or_else(|| first_paragraph(&lines))
        .unwrap_or_default();

    let when_to_use = section_text(&lines, WHEN_TO_USE_HEADINGS).unwrap_or_default();

    Ok(DocDescription {
        description,
        when_to_use,
    })
}

fn heading(line: &str) -> Option<(usize, &str)> {
    let captures = HEADING.captures(line.trim_end())?;
    let level = captures.get(1)?.as_str().len();
    let title = captures.get(2)?.as_str();
    Some((level, title))
}

fn is_fence(line: &str) -> bool {
    let line = line.trim_start();
    line.starts_with("```") || line.starts_with("~~~")
}

fn matches_heading(title: &str, names: &[&str]) -> bool {
    let normalized = title
        .trim()
        .trim_end_matches([':', '：'])
        .trim()
        .to_lowercase();
    names.iter().any(|name| normalized == *name)
}

/// 取指定标题下的文本，到同级或更高级标题为止，跳过代码块
fn section_text(lines: &[&str], names: &[&str]) -> Option<String> {
    let mut in_fence = false;
    let mut section_level = None;
    let mut collected: Vec<&str> = Vec::new();

    for line in lines {
        if is_fence(line) {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }

        if let Some((level, title)) = heading(line) {
            match section_level {
                Some(current) if level <= current => break,
                Some(_) => continue,
                None if matches_heading(title, names) => {
                    section_level = Some(level);
                    continue;
                }
                None => continue,
            }
        }

        if section_level.is_some() {
            collected.push(line);
        }
    }

    section_level?;
    let text = collapse_whitespace(&collected.join(" "));
    (!text.is_empty()).then_some(text)
}

/// 正文第一段文字
fn first_paragraph(lines: &[&str]) -> Option<String> {
    let mut in_fence = false;
    let mut paragraph: Vec<&str> = Vec::new();

    for line in lines {
        if is_fence(line) {
            in_fence = !in_fence;
            if !paragraph.is_empty() {
                break;
            }
            continue;
        }
        if in_fence {
            continue;
        }

        let trimmed = line.trim();
        let is_prose = !trimmed.is_empty()
            && heading(trimmed).is_none()
            && !trimmed.starts_with("import ")
            && !trimmed.starts_with('<')
            && !trimmed.starts_with(":::");

        if is_prose {
            paragraph.push(trimmed);
        } else if !paragraph.is_empty() {
            break;
        }
    }

    let text = collapse_whitespace(&paragraph.join(" "));
    (!text.is_empty()).then_some(text)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
