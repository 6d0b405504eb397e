//! # 命令执行模块
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `sequence/`, `rename/`, `utils/`
//! - 子模块: renumber

pub mod renumber;

use crate::cli::Cli;
use crate::error::Result;

/// 执行命令
pub fn run(cli: Cli) -> Result<()> {
    renumber::execute(cli.args)
}
