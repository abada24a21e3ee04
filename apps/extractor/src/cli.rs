use clap::{ArgAction, Parser, Subcommand};
use doc_index::Lang;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Increase verbosity. Can be used multiple times (e.g., -v, -vv).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// 配置文件路径（默认依次查找环境变量、./config.json、平台配置目录）
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// 配置中的项目名
    #[arg(short, long, global = true, default_value = config::constants::DEFAULT_PROJECT)]
    pub project: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Mirror both documentation trees and build the API index
    Extract {
        /// 有文件处理失败时以非零状态退出
        #[arg(long)]
        strict: bool,
    },
    /// Mirror the English and Chinese documentation trees only
    Mirror,
    /// Build the API index from already mirrored trees
    Index {
        #[arg(long)]
        strict: bool,
    },
    /// List every entry of the API index
    List,
    /// Print the documentation of an API entry
    Doc {
        /// 功能名称或关键词，例如：简单写入, fill
        name: String,
        /// 文档语言 (en, zh)
        #[arg(short, long, default_value_t = Lang::En)]
        lang: Lang,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["doc-extractor", "extract"]).unwrap();
        assert_eq!(cli.project, "fesod");
        assert_eq!(cli.verbose, 0);
        assert!(cli.config.is_none());
        assert!(matches!(cli.command, Some(Commands::Extract { strict: false })));
    }

    #[rstest]
    #[case(&["doc-extractor", "doc", "fill"], Lang::En)]
    #[case(&["doc-extractor", "doc", "fill", "--lang", "zh"], Lang::Zh)]
    #[case(&["doc-extractor", "-vv", "doc", "-l", "ZH", "fill"], Lang::Zh)]
    fn test_doc_lang(#[case] args: &[&str], #[case] expected: Lang) {
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Some(Commands::Doc { name, lang }) => {
                assert_eq!(name, "fill");
                assert_eq!(lang, expected);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_lang() {
        assert!(Cli::try_parse_from(["doc-extractor", "doc", "fill", "--lang", "fr"]).is_err());
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = Cli::try_parse_from([
            "doc-extractor", "index", "--strict", "--project", "poi", "--config", "/tmp/c.json",
        ])
        .unwrap();
        assert_eq!(cli.project, "poi");
        assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("/tmp/c.json")));
        assert!(matches!(cli.command, Some(Commands::Index { strict: true })));
    }
}
