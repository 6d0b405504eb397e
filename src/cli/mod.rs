//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数。
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: renumber

pub mod renumber;

use clap::Parser;

/// renumseq - 图像序列重编号工具
#[derive(Parser)]
#[command(name = "renumseq")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(
    about = "Renumber image sequences in each directory, preserving their order",
    long_about = "Renames the files of every <name>.<number>.<ext> sequence found in each \
                  directory so that each sequence keeps its order but is numbered \
                  sequentially from --start, zero-padded to --length digits. If no \
                  directory is given, the current directory is used."
)]
pub struct Cli {
    #[command(flatten)]
    pub args: renumber::RenumberArgs,
}
