//! # 重编号参数定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/renumber.rs`

use clap::Args;
use std::path::PathBuf;

/// 重编号参数
#[derive(Args, Debug)]
pub struct RenumberArgs {
    /// Directories to renumber (defaults to the current directory)
    pub paths: Vec<PathBuf>,

    /// Starting image number
    #[arg(short, long, default_value_t = 1)]
    pub start: u64,

    /// Minimum digits of the image number; unused digits are filled with zeros
    #[arg(short, long, default_value_t = 2)]
    pub length: usize,

    /// Show the planned renames without touching any file
    #[arg(short = 'n', long, default_value_t = false)]
    pub dry_run: bool,

    /// Print every rename
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}
