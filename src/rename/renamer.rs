//! # 重编号器
//!
//! ## 功能
//! - 每个序列桶内按帧号数值排序（`9` 在 `10` 之前，相等数值保持列举顺序）
//! - 从 `start` 开始连续编号，最少补零到 `length` 位，超出时不截断
//! - 第一阶段全部改为临时名，第二阶段全部改为最终名
//! - 任意一步失败即回滚整个目录
//!
//! ## 依赖关系
//! - 被 `commands/renumber.rs` 调用
//! - 使用 `rename/transaction.rs`, `rename/staging.rs`, `models/`

use super::fs::FileSystem;
use super::staging::StagingTag;
use super::transaction::RenameTransaction;
use crate::error::{Phase, RenumberError, Result};
use crate::models::{FrameToken, SequenceKey, SequenceMap};

use std::path::{Path, PathBuf};

/// 编号配置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenumberConfig {
    /// 起始帧号
    pub start: u64,
    /// 最小位数
    pub length: usize,
}

impl Default for RenumberConfig {
    fn default() -> Self {
        RenumberConfig {
            start: 1,
            length: 2,
        }
    }
}

impl RenumberConfig {
    pub fn new(start: u64, length: usize) -> Result<Self> {
        if length == 0 {
            return Err(RenumberError::InvalidArgument(
                "length must be at least 1".to_string(),
            ));
        }
        Ok(RenumberConfig { start, length })
    }

    /// 补零到至少 `length` 位
    pub fn format_frame(&self, number: u64) -> String {
        format!("{:0width$}", number, width = self.length)
    }
}

/// 单个文件的重命名计划
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedRename {
    pub key: SequenceKey,
    pub original: PathBuf,
    pub staged: PathBuf,
    pub target: PathBuf,
}

/// 单个目录的重命名计划
#[derive(Debug, Clone)]
pub struct RenamePlan {
    pub dir: PathBuf,
    /// 按序列分组，组内按新帧号升序
    pub renames: Vec<PlannedRename>,
}

impl RenamePlan {
    pub fn len(&self) -> usize {
        self.renames.len()
    }
}

/// 根据分组结果生成重命名计划，不触碰磁盘
pub fn plan(
    dir: &Path,
    map: &SequenceMap,
    config: &RenumberConfig,
    tag: &StagingTag,
) -> Result<RenamePlan> {
    let mut renames = Vec::with_capacity(map.file_count());

    for (key, tokens) in map.iter() {
        // 先确认最后一帧不会溢出
        let count = tokens.len();
        config
            .start
            .checked_add(count.saturating_sub(1) as u64)
            .ok_or(RenumberError::FrameOverflow {
                start: config.start,
                count,
            })?;

        let mut sorted: Vec<&FrameToken> = tokens.iter().collect();
        sorted.sort_by(|a, b| a.cmp_numeric(b));

        for (offset, token) in sorted.into_iter().enumerate() {
            let number = config.start + offset as u64;
            renames.push(PlannedRename {
                key: key.clone(),
                original: dir.join(key.file_name(token.as_str())),
                staged: dir.join(key.file_name(&tag.staged_frame(token))),
                target: dir.join(key.file_name(&config.format_frame(number))),
            });
        }
    }

    Ok(RenamePlan {
        dir: dir.to_path_buf(),
        renames,
    })
}

/// 执行重命名计划
pub struct Renamer<'a, F: FileSystem + ?Sized> {
    fs: &'a F,
}

impl<'a, F: FileSystem + ?Sized> Renamer<'a, F> {
    pub fn new(fs: &'a F) -> Self {
        Self { fs }
    }

    /// 执行两阶段重命名，返回重命名的文件数
    ///
    /// 失败时已完成的重命名全部回滚：回滚完整返回 `RolledBack`，
    /// 有文件无法恢复返回 `RollbackFailed`。
    pub fn execute(&self, plan: &RenamePlan) -> Result<usize> {
        let mut tx = RenameTransaction::new(self.fs);

        match Self::run_phases(&mut tx, plan) {
            Ok(()) => Ok(tx.commit()),
            Err(cause) => {
                let path = plan.dir.display().to_string();
                let (restored, failures) = tx.rollback();
                if failures.is_empty() {
                    Err(RenumberError::RolledBack {
                        path,
                        restored,
                        cause: Box::new(cause),
                    })
                } else {
                    Err(RenumberError::RollbackFailed {
                        path,
                        failures,
                        cause: Box::new(cause),
                    })
                }
            }
        }
    }

    fn run_phases(tx: &mut RenameTransaction<'_, F>, plan: &RenamePlan) -> Result<()> {
        for r in &plan.renames {
            tx.rename(&r.original, &r.staged, Phase::Staging)?;
        }
        for r in &plan.renames {
            tx.rename(&r.staged, &r.target, Phase::Renumbering)?;
        }
        Ok(())
    }
}
