//! # 数据模型模块
//!
//! 定义序列键、帧号和按序列分组的桶。
//!
//! ## 依赖关系
//! - 被 `sequence/`、`rename/` 和 `commands/` 使用
//! - 子模块: sequence

pub mod sequence;

pub use sequence::{FrameToken, SequenceKey, SequenceMap, SEPARATOR};
