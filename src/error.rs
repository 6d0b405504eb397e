//! # 统一错误处理模块
//!
//! 定义 renumseq 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 错误分类
//! - 路径错误（不存在 / 非目录 / 空目录）：警告后跳过该目录
//! - 重命名错误：回滚该目录已完成的重命名
//! - 回滚错误：目录处于不一致状态，必须单独报告
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// 重命名所处的阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// 原始名 -> 临时名
    Staging,
    /// 临时名 -> 最终编号
    Renumbering,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Staging => write!(f, "staging"),
            Phase::Renumbering => write!(f, "renumbering"),
        }
    }
}

/// 回滚时单个文件的失败记录
#[derive(Debug)]
pub struct RollbackFailure {
    /// 文件当前所在路径
    pub current: PathBuf,
    /// 应恢复到的原始路径
    pub original: PathBuf,
    pub source: std::io::Error,
}

/// 回滚失败列表
pub type RollbackFailures = Vec<RollbackFailure>;

/// renumseq 统一错误类型
#[derive(Error, Debug)]
pub enum RenumberError {
    // ─────────────────────────────────────────────────────────────
    // 路径错误
    // ─────────────────────────────────────────────────────────────
    #[error("Path \"{path}\" does not exist")]
    PathNotFound { path: String },

    #[error("Path \"{path}\" is not a directory")]
    NotADirectory { path: String },

    #[error("Path \"{path}\" is empty")]
    EmptyDirectory { path: String },

    #[error("Path \"{path}\" contains no sequence files")]
    NoSequences { path: String },

    #[error("Failed to read directory: {path}")]
    DirectoryReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // ─────────────────────────────────────────────────────────────
    // 重命名错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to rename '{}' -> '{}' while {phase}: {source}", from.display(), to.display())]
    RenameFailed {
        phase: Phase,
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error found renaming files on {path}: {cause}")]
    RolledBack {
        path: String,
        restored: usize,
        cause: Box<RenumberError>,
    },

    #[error(
        "Rollback incomplete on {path}: {} file(s) could not be restored (after: {cause})",
        failures.len()
    )]
    RollbackFailed {
        path: String,
        failures: RollbackFailures,
        cause: Box<RenumberError>,
    },

    #[error("{failed} of {total} director(ies) could not be renumbered")]
    DirectoriesFailed { failed: usize, total: usize },

    #[error("Frame numbers overflow: start {start} with {count} file(s)")]
    FrameOverflow { start: u64, count: usize },

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl RenumberError {
    /// 是否属于可跳过的路径错误（仅打印警告）
    pub fn is_path_error(&self) -> bool {
        matches!(
            self,
            RenumberError::PathNotFound { .. }
                | RenumberError::NotADirectory { .. }
                | RenumberError::EmptyDirectory { .. }
                | RenumberError::NoSequences { .. }
                | RenumberError::DirectoryReadError { .. }
        )
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, RenumberError>;
