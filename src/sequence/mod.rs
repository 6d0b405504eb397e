//! # 序列分组模块
//!
//! 扫描目录的直接子项，把符合 `<base>.<frame>.<ext>` 约定的文件按序列分桶。
//!
//! ## 依赖关系
//! - 被 `commands/renumber.rs` 调用
//! - 使用 `models/sequence.rs`
//! - 子模块: grouper

pub mod grouper;

pub use grouper::SequenceGrouper;
