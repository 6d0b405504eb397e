//! # 临时名标签
//!
//! 每次运行生成一次，附加在帧号之后：`shot.0007_tmp_26-10-14_09-30-00_4242.png`。
//! 标签不含分隔符且不是纯数字，因此临时名既不会匹配输入约定，
//! 也不会与任何最终编号冲突。
//!
//! 时间戳加进程号只能避免不同次运行之间的冲突，不保证并发运行
//! 同一目录时唯一。
//!
//! ## 依赖关系
//! - 被 `rename/renamer.rs` 使用
//! - 使用 `chrono` 生成时间戳

use crate::error::{RenumberError, Result};
use crate::models::{FrameToken, SEPARATOR};

use chrono::Local;

/// 临时名标签
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagingTag(String);

impl StagingTag {
    /// 以当前时间和进程号生成标签
    pub fn now() -> Result<Self> {
        Self::new(&format!(
            "_tmp_{}_{}",
            Local::now().format("%y-%m-%d_%H-%M-%S"),
            std::process::id()
        ))
    }

    /// 使用给定标签
    pub fn new(tag: &str) -> Result<Self> {
        if tag.is_empty() || tag.contains(SEPARATOR) {
            return Err(RenumberError::InvalidArgument(format!(
                "staging tag '{}' must be non-empty and contain no '{}'",
                tag, SEPARATOR
            )));
        }
        if tag.bytes().all(|b| b.is_ascii_digit()) {
            return Err(RenumberError::InvalidArgument(format!(
                "staging tag '{}' must not be numeric",
                tag
            )));
        }
        Ok(StagingTag(tag.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 帧号加上标签后的中间段
    pub fn staged_frame(&self, token: &FrameToken) -> String {
        format!("{}{}", token, self.as_str())
    }
}
