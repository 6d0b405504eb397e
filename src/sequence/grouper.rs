//! # 序列分组器
//!
//! ## 功能
//! - 校验路径存在且为目录
//! - 只看目录的直接子项（不递归），跳过子目录
//! - 不符合命名约定的文件静默跳过
//!
//! ## 依赖关系
//! - 被 `commands/renumber.rs` 调用
//! - 使用 `walkdir` 列举目录

use crate::error::{RenumberError, Result};
use crate::models::sequence::parse_file_name;
use crate::models::SequenceMap;

use std::io;
use std::path::PathBuf;
use walkdir::WalkDir;

/// 序列分组器
pub struct SequenceGrouper {
    /// 目标目录
    dir: PathBuf,
}

impl SequenceGrouper {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// 扫描目录并分桶
    ///
    /// 路径不存在、不是目录、为空或没有任何序列文件时返回路径错误，
    /// 调用方应警告并跳过该目录。
    pub fn group(&self) -> Result<SequenceMap> {
        let path = self.dir.display().to_string();

        if !self.dir.exists() {
            return Err(RenumberError::PathNotFound { path });
        }
        if !self.dir.is_dir() {
            return Err(RenumberError::NotADirectory { path });
        }

        let walker = WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true);

        let mut map = SequenceMap::new();
        let mut listed = 0usize;

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                // 根目录本身无法读取
                Err(e) if e.depth() == 0 => {
                    let source = e
                        .into_io_error()
                        .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, "walk error"));
                    return Err(RenumberError::DirectoryReadError { path, source });
                }
                // 断开的符号链接等
                Err(_) => {
                    listed += 1;
                    continue;
                }
            };
            listed += 1;

            if !entry.file_type().is_file() {
                continue;
            }

            let Some(name) = entry.file_name().to_str() else {
                continue;
            };

            if let Some((key, token)) = parse_file_name(name) {
                map.insert(key, token);
            }
        }

        if listed == 0 {
            return Err(RenumberError::EmptyDirectory { path });
        }
        if map.is_empty() {
            return Err(RenumberError::NoSequences { path });
        }

        Ok(map)
    }
}
