pub mod catalog;
pub mod extract;

use crate::error::Result;
use doc_index::FileFailure;

pub use catalog::{DocCommand, ListCommand};
pub use extract::{ExtractCommand, IndexCommand, MirrorCommand};

#[async_trait::async_trait]
pub trait Command {
    async fn execute(&self) -> Result<()>;
}

/// 打印某个阶段的失败文件列表
fn print_failures(stage: &str, failures: &[FileFailure]) {
    if failures.is_empty() {
        return;
    }
    println!("  ❌ {stage}: {} 个文件失败", failures.len());
    for failure in failures {
        println!("     [{}] {:?}: {}", failure.error.kind(), failure.path, failure.error);
    }
}
