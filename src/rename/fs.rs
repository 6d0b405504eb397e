//! # 文件系统抽象
//!
//! 重命名只经过 `FileSystem` trait，测试可以注入会失败的实现。
//!
//! ## 依赖关系
//! - 被 `rename/transaction.rs` 使用

use std::fs;
use std::io;
use std::path::Path;

/// 重命名所需的最小文件系统操作
pub trait FileSystem {
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    fn exists(&self, path: &Path) -> bool;
}

/// 真实文件系统
#[derive(Debug, Default, Clone, Copy)]
pub struct StdFileSystem;

impl FileSystem for StdFileSystem {
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::rename(from, to)
    }

    fn exists(&self, path: &Path) -> bool {
        // 断开的符号链接也算占用
        path.symlink_metadata().is_ok()
    }
}
