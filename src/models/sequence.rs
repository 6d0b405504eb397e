//! # 序列数据模型
//!
//! 序列文件命名约定为 `<base>.<frame>.<ext>`：按分隔符切分后恰好三段，
//! 且中间段只含十进制数字。
//!
//! ## 依赖关系
//! - 被 `sequence/grouper.rs` 和 `rename/renamer.rs` 使用
//! - 无外部模块依赖

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// 文件名分隔符
pub const SEPARATOR: char = '.';

/// 同一目录内标识一个序列：(基础名, 扩展名)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SequenceKey {
    pub base: String,
    pub ext: String,
}

impl SequenceKey {
    pub fn new(base: impl Into<String>, ext: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            ext: ext.into(),
        }
    }

    /// 拼出 `<base>.<frame>.<ext>`
    pub fn file_name(&self, frame: &str) -> String {
        format!(
            "{}{sep}{}{sep}{}",
            self.base,
            frame,
            self.ext,
            sep = SEPARATOR
        )
    }
}

impl fmt::Display for SequenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{sep}#{sep}{}", self.base, self.ext, sep = SEPARATOR)
    }
}

/// 帧号：保留原始字符串（含前导零），按数值排序
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameToken(String);

impl FrameToken {
    /// 仅接受非空的纯 ASCII 数字串
    pub fn parse(s: &str) -> Option<Self> {
        if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
            Some(FrameToken(s.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 去掉前导零后的有效数字（全零时为 "0"）
    fn significant(&self) -> &str {
        let trimmed = self.0.trim_start_matches('0');
        if trimmed.is_empty() {
            "0"
        } else {
            trimmed
        }
    }

    /// 按数值比较，不做整数转换，任意长度都不会溢出
    pub fn cmp_numeric(&self, other: &Self) -> Ordering {
        let (a, b) = (self.significant(), other.significant());
        a.len().cmp(&b.len()).then_with(|| a.cmp(b))
    }
}

impl fmt::Display for FrameToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 把文件名拆成序列键和帧号，不符合约定时返回 `None`
pub fn parse_file_name(name: &str) -> Option<(SequenceKey, FrameToken)> {
    let mut parts = name.split(SEPARATOR);
    let base = parts.next()?;
    let frame = parts.next()?;
    let ext = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    let token = FrameToken::parse(frame)?;
    Some((SequenceKey::new(base, ext), token))
}

/// 一个目录内的全部序列桶
///
/// 桶内帧号保持目录列举顺序，排序由重命名阶段负责。
#[derive(Debug, Default, Clone)]
pub struct SequenceMap {
    buckets: BTreeMap<SequenceKey, Vec<FrameToken>>,
}

impl SequenceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: SequenceKey, token: FrameToken) {
        self.buckets.entry(key).or_default().push(token);
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// 序列数
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// 所有序列中的文件总数
    pub fn file_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn get(&self, key: &SequenceKey) -> Option<&[FrameToken]> {
        self.buckets.get(key).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SequenceKey, &[FrameToken])> {
        self.buckets.iter().map(|(k, v)| (k, v.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(s: &str) -> FrameToken {
        FrameToken::parse(s).unwrap()
    }

    #[test]
    fn test_parse_file_name() {
        let (key, frame) = parse_file_name("shot.0007.png").unwrap();
        assert_eq!(key, SequenceKey::new("shot", "png"));
        assert_eq!(frame.as_str(), "0007");

        assert!(parse_file_name("readme.txt").is_none());
        assert!(parse_file_name("a.x.png").is_none());
        assert!(parse_file_name("a..png").is_none());
        assert!(parse_file_name("a.-1.png").is_none());
        assert!(parse_file_name("my.shot.01.png").is_none());
        assert!(parse_file_name("noext").is_none());
    }

    #[test]
    fn test_numeric_order() {
        assert_eq!(token("9").cmp_numeric(&token("10")), Ordering::Less);
        assert_eq!(token("010").cmp_numeric(&token("9")), Ordering::Greater);
        assert_eq!(token("0007").cmp_numeric(&token("7")), Ordering::Equal);
        assert_eq!(token("000").cmp_numeric(&token("0")), Ordering::Equal);

        let huge = "1".repeat(40);
        assert_eq!(token(&huge).cmp_numeric(&token("99")), Ordering::Greater);
    }

    #[test]
    fn test_sequence_map_buckets() {
        let mut map = SequenceMap::new();
        map.insert(SequenceKey::new("a", "png"), token("9"));
        map.insert(SequenceKey::new("b", "exr"), token("1"));
        map.insert(SequenceKey::new("a", "png"), token("2"));

        assert_eq!(map.len(), 2);
        assert_eq!(map.file_count(), 3);
        let frames: Vec<_> = map
            .get(&SequenceKey::new("a", "png"))
            .unwrap()
            .iter()
            .map(FrameToken::as_str)
            .collect();
        assert_eq!(frames, vec!["9", "2"]);
    }

    #[test]
    fn test_key_file_name() {
        let key = SequenceKey::new("shot", "png");
        assert_eq!(key.file_name("01"), "shot.01.png");
        assert_eq!(key.to_string(), "shot.#.png");
    }
}
