//! # 重命名模块
//!
//! 两阶段重命名：先全部改为临时名，再按数值顺序改为最终编号；
//! 任一步失败则回滚该目录已完成的所有重命名。
//!
//! ## 依赖关系
//! - 被 `commands/renumber.rs` 调用
//! - 使用 `models/`
//! - 子模块: fs, staging, transaction, renamer

pub mod fs;
pub mod renamer;
pub mod staging;
pub mod transaction;

pub use fs::StdFileSystem;
pub use renamer::{plan, RenamePlan, Renamer, RenumberConfig};
pub use staging::StagingTag;
