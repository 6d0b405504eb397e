//! # 重编号命令实现
//!
//! 依次处理每个目录：分组 -> 生成计划 -> 两阶段重命名。
//! 每个目录独立成败，一个目录失败不影响后续目录。
//!
//! ## 依赖关系
//! - 使用 `cli/renumber.rs` 定义的参数
//! - 使用 `sequence/`, `rename/`
//! - 使用 `utils/output.rs`

use crate::cli::renumber::RenumberArgs;
use crate::error::{RenumberError, Result};
use crate::rename::{self, RenamePlan, Renamer, RenumberConfig, StagingTag, StdFileSystem};
use crate::sequence::SequenceGrouper;
use crate::utils::output;

use std::env;
use std::fmt;
use std::path::Path;
use tabled::{Table, Tabled};

/// 单个目录的最终状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Renumbered,
    Planned,
    Skipped,
    Failed,
    RolledBack,
    Inconsistent,
}

impl Status {
    /// 是否计入失败
    pub fn is_failure(self) -> bool {
        matches!(
            self,
            Status::Failed | Status::RolledBack | Status::Inconsistent
        )
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Renumbered => write!(f, "renumbered"),
            Status::Planned => write!(f, "planned"),
            Status::Skipped => write!(f, "skipped"),
            Status::Failed => write!(f, "failed"),
            Status::RolledBack => write!(f, "rolled back"),
            Status::Inconsistent => write!(f, "INCONSISTENT"),
        }
    }
}

/// 汇总表格行
#[derive(Debug, Clone, Tabled)]
struct SummaryRow {
    #[tabled(rename = "Directory")]
    directory: String,
    #[tabled(rename = "Sequences")]
    sequences: usize,
    #[tabled(rename = "Files")]
    files: usize,
    #[tabled(rename = "Status")]
    status: Status,
}

/// 执行重编号命令
pub fn execute(args: RenumberArgs) -> Result<()> {
    let config = RenumberConfig::new(args.start, args.length)?;
    let tag = StagingTag::now()?;

    let dirs = if args.paths.is_empty() {
        vec![env::current_dir().map_err(|e| RenumberError::DirectoryReadError {
            path: ".".to_string(),
            source: e,
        })?]
    } else {
        args.paths.clone()
    };

    output::print_header(if args.dry_run {
        "Renumbering Sequences (dry run)"
    } else {
        "Renumbering Sequences"
    });
    output::print_info(&format!(
        "start = {}, length = {}, {} director(ies)",
        config.start,
        config.length,
        dirs.len()
    ));

    let rows: Vec<SummaryRow> = dirs
        .iter()
        .map(|dir| process_directory(dir, &config, &tag, &args))
        .collect();

    println!();
    println!("{}", Table::new(&rows));

    let failed = rows.iter().filter(|r| r.status.is_failure()).count();
    if failed > 0 {
        return Err(RenumberError::DirectoriesFailed {
            failed,
            total: rows.len(),
        });
    }

    output::print_done(&format!("Processed {} director(ies)", rows.len()));
    Ok(())
}

/// 处理单个目录，所有错误都在此处消化
fn process_directory(
    dir: &Path,
    config: &RenumberConfig,
    tag: &StagingTag,
    args: &RenumberArgs,
) -> SummaryRow {
    let mut row = SummaryRow {
        directory: dir.display().to_string(),
        sequences: 0,
        files: 0,
        status: Status::Skipped,
    };

    let map = match SequenceGrouper::new(dir).group() {
        Ok(map) => map,
        Err(e) if e.is_path_error() => {
            output::print_warning(&format!("{}. Skipping path...", e));
            return row;
        }
        Err(e) => {
            output::print_error(&format!("{}: {}", dir.display(), e));
            row.status = Status::Failed;
            return row;
        }
    };
    row.sequences = map.len();
    row.files = map.file_count();

    let plan = match rename::plan(dir, &map, config, tag) {
        Ok(plan) => plan,
        Err(e) => {
            output::print_error(&format!("{}: {}", dir.display(), e));
            row.status = Status::Failed;
            return row;
        }
    };

    if args.dry_run {
        print_plan(&plan);
        output::print_info(&format!(
            "Planned {} rename(s) on {}",
            plan.len(),
            dir.display()
        ));
        row.status = Status::Planned;
        return row;
    }

    row.status = match Renamer::new(&StdFileSystem).execute(&plan) {
        Ok(renamed) => {
            if args.verbose {
                print_plan(&plan);
            }
            output::print_success(&format!(
                "Renumbered {} file(s) in {} sequence(s) on {}",
                renamed,
                row.sequences,
                dir.display()
            ));
            Status::Renumbered
        }
        Err(RenumberError::RolledBack {
            path,
            restored,
            cause,
        }) => {
            output::print_error(&format!("Error found renaming files on {}", path));
            output::print_error(&cause.to_string());
            output::print_error("Skipping directory...");
            output::print_success(&format!(
                "Restored {} file(s) to their original names",
                restored
            ));
            Status::RolledBack
        }
        Err(RenumberError::RollbackFailed {
            path,
            failures,
            cause,
        }) => {
            output::print_error(&format!("Error found renaming files on {}", path));
            output::print_error(&cause.to_string());
            for f in &failures {
                output::print_error(&format!(
                    "Could not restore '{}' -> '{}': {}",
                    f.current.display(),
                    f.original.display(),
                    f.source
                ));
            }
            output::print_error(&format!(
                "Rollback incomplete: {} is left in an inconsistent state ({} file(s) not restored)",
                path,
                failures.len()
            ));
            Status::Inconsistent
        }
        Err(e) => {
            output::print_error(&format!("{}: {}", dir.display(), e));
            Status::Failed
        }
    };

    row
}

/// 按序列打印计划中的 `原名 -> 新名`
fn print_plan(plan: &RenamePlan) {
    let mut current = None;
    for r in &plan.renames {
        if current != Some(&r.key) {
            output::print_info(&format!("Sequence {}", r.key));
            current = Some(&r.key);
        }
        output::print_rename(&file_name(&r.original), &file_name(&r.target));
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn args(paths: Vec<PathBuf>, dry_run: bool) -> RenumberArgs {
        RenumberArgs {
            paths,
            start: 1,
            length: 2,
            dry_run,
            verbose: false,
        }
    }

    #[test]
    fn test_status_failure_classes() {
        assert!(!Status::Skipped.is_failure());
        assert!(!Status::Planned.is_failure());
        assert!(Status::RolledBack.is_failure());
        assert!(Status::Inconsistent.is_failure());
        assert_eq!(Status::Inconsistent.to_string(), "INCONSISTENT");
    }

    #[test]
    fn test_missing_path_is_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("nope");
        assert!(execute(args(vec![missing], false)).is_ok());
    }

    #[test]
    fn test_dry_run_leaves_files() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("a.7.png"), b"").unwrap();

        execute(args(vec![tmp.path().to_path_buf()], true)).unwrap();
        assert!(tmp.path().join("a.7.png").exists());
        assert!(!tmp.path().join("a.01.png").exists());
    }

    #[test]
    fn test_failure_in_one_directory_does_not_stop_the_next() {
        let bad = tempfile::tempdir().unwrap();
        fs::write(bad.path().join("a.5.png"), b"").unwrap();
        // 占用最终名的子目录会被分组器跳过，但会阻止第二阶段
        fs::create_dir(bad.path().join("a.01.png")).unwrap();

        let good = tempfile::tempdir().unwrap();
        fs::write(good.path().join("b.3.exr"), b"").unwrap();

        let err = execute(args(
            vec![bad.path().to_path_buf(), good.path().to_path_buf()],
            false,
        ))
        .unwrap_err();
        assert!(matches!(
            err,
            RenumberError::DirectoriesFailed {
                failed: 1,
                total: 2
            }
        ));

        assert!(bad.path().join("a.5.png").is_file());
        assert!(bad.path().join("a.01.png").is_dir());
        assert!(good.path().join("b.01.exr").is_file());
    }
}
