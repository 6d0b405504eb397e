//! # 重命名事务
//!
//! 记录每一次已成功的重命名（原始路径 -> 当前路径），失败时整体回滚。
//!
//! 不变式：对每条记录，当前路径存在于磁盘上，原始路径不存在
//! （当前路径等于原始路径的情况除外）。同一文件的后续重命名就地
//! 更新已有记录，因此回滚时每个文件只需一次反向重命名。
//!
//! ## 依赖关系
//! - 被 `rename/renamer.rs` 使用
//! - 使用 `rename/fs.rs`

use super::fs::FileSystem;
use crate::error::{Phase, RenumberError, Result, RollbackFailure, RollbackFailures};

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

/// 单个目录的重命名事务
pub struct RenameTransaction<'a, F: FileSystem + ?Sized> {
    fs: &'a F,
    /// (原始路径, 当前路径)，按首次重命名顺序
    entries: Vec<(PathBuf, PathBuf)>,
    /// 当前路径 -> entries 下标
    by_current: HashMap<PathBuf, usize>,
}

impl<'a, F: FileSystem + ?Sized> RenameTransaction<'a, F> {
    pub fn new(fs: &'a F) -> Self {
        Self {
            fs,
            entries: Vec::new(),
            by_current: HashMap::new(),
        }
    }

    /// 记录中的 (原始路径, 当前路径)
    #[cfg(test)]
    pub fn entries(&self) -> &[(PathBuf, PathBuf)] {
        &self.entries
    }

    /// 执行一次重命名并立即记录
    ///
    /// 目标已存在时拒绝执行，不覆盖任何文件。
    pub fn rename(&mut self, from: &Path, to: &Path, phase: Phase) -> Result<()> {
        let failed = |source: io::Error| RenumberError::RenameFailed {
            phase,
            from: from.to_path_buf(),
            to: to.to_path_buf(),
            source,
        };

        if self.fs.exists(to) {
            return Err(failed(io::Error::new(
                io::ErrorKind::AlreadyExists,
                "target already exists",
            )));
        }
        self.fs.rename(from, to).map_err(failed)?;

        match self.by_current.remove(from) {
            Some(idx) => {
                self.entries[idx].1 = to.to_path_buf();
                self.by_current.insert(to.to_path_buf(), idx);
            }
            None => {
                self.entries.push((from.to_path_buf(), to.to_path_buf()));
                self.by_current
                    .insert(to.to_path_buf(), self.entries.len() - 1);
            }
        }
        Ok(())
    }

    /// 提交事务，返回重命名的文件数
    pub fn commit(self) -> usize {
        self.entries.len()
    }

    /// 按记录的逆序把每个文件改回原始名
    ///
    /// 尽力而为：单个文件恢复失败不会中断其余文件，失败项原样返回。
    pub fn rollback(self) -> (usize, RollbackFailures) {
        let mut restored = 0;
        let mut failures = Vec::new();

        for (original, current) in self.entries.into_iter().rev() {
            if original == current {
                continue;
            }
            let result = if self.fs.exists(&original) {
                Err(io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    "original name is occupied",
                ))
            } else {
                self.fs.rename(&current, &original)
            };
            match result {
                Ok(()) => restored += 1,
                Err(source) => failures.push(RollbackFailure {
                    current,
                    original,
                    source,
                }),
            }
        }

        (restored, failures)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rename::fs::StdFileSystem;
    use std::fs;

    #[test]
    fn test_chained_renames_keep_original_key() {
        let tmp = tempfile::tempdir().unwrap();
        let a = tmp.path().join("a.9.png");
        let staged = tmp.path().join("a.9_tmp.png");
        let fin = tmp.path().join("a.01.png");
        fs::write(&a, b"nine").unwrap();

        let mut tx = RenameTransaction::new(&StdFileSystem);
        tx.rename(&a, &staged, Phase::Staging).unwrap();
        tx.rename(&staged, &fin, Phase::Renumbering).unwrap();

        assert_eq!(tx.entries().len(), 1);
        assert_eq!(tx.entries()[0], (a.clone(), fin.clone()));

        let (restored, failures) = tx.rollback();
        assert_eq!(restored, 1);
        assert!(failures.is_empty());
        assert_eq!(fs::read(&a).unwrap(), b"nine");
        assert!(!fin.exists());
        assert!(!staged.exists());
    }

    #[test]
    fn test_refuses_to_overwrite() {
        let tmp = tempfile::tempdir().unwrap();
        let a = tmp.path().join("a.1.png");
        let b = tmp.path().join("a.01.png");
        fs::write(&a, b"a").unwrap();
        fs::write(&b, b"b").unwrap();

        let mut tx = RenameTransaction::new(&StdFileSystem);
        let err = tx.rename(&a, &b, Phase::Renumbering).unwrap_err();
        assert!(matches!(err, RenumberError::RenameFailed { .. }));
        assert!(tx.entries().is_empty());
        assert_eq!(fs::read(&b).unwrap(), b"b");
        assert_eq!(fs::read(&a).unwrap(), b"a");
    }

    #[test]
    fn test_rollback_reports_occupied_original() {
        let tmp = tempfile::tempdir().unwrap();
        let a = tmp.path().join("a.1.png");
        let staged = tmp.path().join("a.1_tmp.png");
        fs::write(&a, b"a").unwrap();

        let mut tx = RenameTransaction::new(&StdFileSystem);
        tx.rename(&a, &staged, Phase::Staging).unwrap();
        // 外部进程占用了原始名
        fs::write(&a, b"intruder").unwrap();

        let (restored, failures) = tx.rollback();
        assert_eq!(restored, 0);
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].current, staged);
        assert_eq!(fs::read(&a).unwrap(), b"intruder");
    }
}
