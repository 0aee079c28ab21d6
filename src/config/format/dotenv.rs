//! .env 格式解析器 (简单原则：透明的文本解析)
//!
//! 与常见 dotenv 库不同，这里不丢弃任何内容：注释、空行、格式不对的行
//! 都作为不透明行原样保留，写回时除被修改的那一行外逐字节一致。

use std::fmt;

/// 文档中的一行
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvLine {
    /// `KEY=VALUE`，在第一个 `=` 处切分
    KeyValue { key: String, value: String },
    /// 其他任何内容，原样保留
    Opaque { raw: String },
}

impl EnvLine {
    /// 解析单行
    pub fn parse(raw: &str) -> Self {
        match raw.split_once('=') {
            Some((key, value)) => EnvLine::KeyValue {
                key: key.to_string(),
                value: value.to_string(),
            },
            None => EnvLine::Opaque {
                raw: raw.to_string(),
            },
        }
    }

    /// 键名（仅 KeyValue 行）
    pub fn key(&self) -> Option<&str> {
        match self {
            EnvLine::KeyValue { key, .. } => Some(key),
            EnvLine::Opaque { .. } => None,
        }
    }
}

impl fmt::Display for EnvLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvLine::KeyValue { key, value } => write!(f, "{key}={value}"),
            EnvLine::Opaque { raw } => f.write_str(raw),
        }
    }
}

/// 一次读-改-写周期内的 .env 文档
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvDocument {
    lines: Vec<EnvLine>,
    /// 原文是否以换行结尾
    trailing_newline: bool,
}

impl EnvDocument {
    pub fn lines(&self) -> &[EnvLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// 查找变量值，重复键时第一个生效
    pub fn get(&self, key: &str) -> Option<&str> {
        self.lines.iter().find_map(|line| match line {
            EnvLine::KeyValue { key: k, value } if k == key => Some(value.as_str()),
            _ => None,
        })
    }

    /// 更新或插入变量，返回新文档以及该键此前是否存在
    ///
    /// - 已存在：只替换第一个匹配行的值，位置不变
    /// - 不存在：新行插入到文档最前面
    #[must_use]
    pub fn upsert(&self, key: &str, value: &str) -> (EnvDocument, bool) {
        let mut next = self.clone();
        let line = EnvLine::KeyValue {
            key: key.to_string(),
            value: value.to_string(),
        };

        match next.lines.iter().position(|l| l.key() == Some(key)) {
            Some(index) => {
                next.lines[index] = line;
                (next, true)
            }
            None => {
                next.lines.insert(0, line);
                (next, false)
            }
        }
    }

    /// 所有 KeyValue 行，按文件顺序
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.lines.iter().filter_map(|line| match line {
            EnvLine::KeyValue { key, value } => Some((key.as_str(), value.as_str())),
            EnvLine::Opaque { .. } => None,
        })
    }
}

/// .env 格式解析器
pub struct DotenvParser;

impl DotenvParser {
    /// 解析 .env 文件内容
    ///
    /// 规则：
    /// - 按 `\n` 切分，不做 trim，`\r` 等字符保留在行内
    /// - 含 `=` 的行为 KEY=VALUE，值可以为空或再含 `=`
    /// - 末尾换行产生的空段不算一行
    /// - 永不失败
    pub fn parse(content: &str) -> EnvDocument {
        if content.is_empty() {
            return EnvDocument::default();
        }

        let (body, trailing_newline) = match content.strip_suffix('\n') {
            Some(body) => (body, true),
            None => (content, false),
        };

        EnvDocument {
            lines: body.split('\n').map(EnvLine::parse).collect(),
            trailing_newline,
        }
    }

    /// 序列化为 .env 文本
    #[must_use]
    pub fn serialize(doc: &EnvDocument) -> String {
        let mut out = doc
            .lines
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n");

        if doc.trailing_newline {
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upsert_str(content: &str, key: &str, value: &str) -> (String, bool) {
        let (doc, found) = DotenvParser::parse(content).upsert(key, value);
        (DotenvParser::serialize(&doc), found)
    }

    #[test]
    fn test_replace_existing_key() {
        let (out, found) = upsert_str("A=1\nB=2", "B", "9");
        assert_eq!(out, "A=1\nB=9");
        assert!(found);
    }

    #[test]
    fn test_insert_prepends() {
        let (out, found) = upsert_str("A=1\nB=2", "C", "9");
        assert_eq!(out, "C=9\nA=1\nB=2");
        assert!(!found);
    }

    #[test]
    fn test_upsert_into_empty_content() {
        let (out, found) = upsert_str("", "X", "y");
        assert_eq!(out, "X=y");
        assert!(!found);
    }

    #[test]
    fn test_get() {
        let doc = DotenvParser::parse("A=1");
        assert_eq!(doc.get("A"), Some("1"));
        assert_eq!(doc.get("B"), None);
    }

    #[test]
    fn test_get_first_duplicate_wins() {
        let doc = DotenvParser::parse("A=1\nA=2");
        assert_eq!(doc.get("A"), Some("1"));
    }

    #[test]
    fn test_upsert_duplicate_only_touches_first() {
        let (out, found) = upsert_str("A=1\nA=2", "A", "3");
        assert_eq!(out, "A=3\nA=2");
        assert!(found);
    }

    #[test]
    fn test_value_split_on_first_equals() {
        let doc = DotenvParser::parse("URL=https://x.test/?a=b&c=d\nEMPTY=");
        assert_eq!(doc.get("URL"), Some("https://x.test/?a=b&c=d"));
        assert_eq!(doc.get("EMPTY"), Some(""));
    }

    #[test]
    fn test_opaque_lines_are_not_keys() {
        let doc = DotenvParser::parse("# comment\nNGROK_SERVERHOST\n\nA=1");
        assert_eq!(doc.get("NGROK_SERVERHOST"), None);
        assert_eq!(doc.len(), 4);

        let (next, found) = doc.upsert("NGROK_SERVERHOST", "u");
        assert!(!found);
        assert_eq!(
            DotenvParser::serialize(&next),
            "NGROK_SERVERHOST=u\n# comment\nNGROK_SERVERHOST\n\nA=1"
        );
    }

    #[test]
    fn test_round_trip() {
        for content in [
            "A=1",
            "A=1\nB=2",
            "# c\n\nA = spaced \nbad line\nK==v=",
            "A=1\r\nB=2\r",
            "A=1\n",
            "\n",
        ] {
            let doc = DotenvParser::parse(content);
            assert_eq!(DotenvParser::serialize(&doc), content);
        }
    }

    #[test]
    fn test_trailing_newline_is_not_a_line() {
        let doc = DotenvParser::parse("A=1\n");
        assert_eq!(doc.len(), 1);

        let (next, _) = doc.upsert("B", "2");
        assert_eq!(next.len(), 2);
        assert_eq!(DotenvParser::serialize(&next), "B=2\nA=1\n");
    }

    #[test]
    fn test_upsert_is_idempotent() {
        let doc = DotenvParser::parse("# header\nA=1\nB=2");
        let (once, _) = doc.upsert("C", "9");
        let (twice, found) = once.upsert("C", "9");
        assert!(found);
        assert_eq!(DotenvParser::serialize(&once), DotenvParser::serialize(&twice));
    }

    #[test]
    fn test_replace_preserves_position_and_length() {
        let doc = DotenvParser::parse("# x\nA=1\nB=2\n\nC=3");
        let (next, found) = doc.upsert("B", "new");
        assert!(found);
        assert_eq!(next.len(), doc.len());
        for (i, (before, after)) in doc.lines().iter().zip(next.lines()).enumerate() {
            if i == 2 {
                assert_eq!(after.to_string(), "B=new");
            } else {
                assert_eq!(before, after);
            }
        }
    }

    #[test]
    fn test_upsert_does_not_mutate_input() {
        let doc = DotenvParser::parse("A=1");
        let _ = doc.upsert("A", "2");
        let _ = doc.upsert("B", "3");
        assert_eq!(DotenvParser::serialize(&doc), "A=1");
    }

    #[test]
    fn test_entries_in_file_order() {
        let doc = DotenvParser::parse("B=2\n# c\nA=1");
        let entries: Vec<_> = doc.entries().collect();
        assert_eq!(entries, vec![("B", "2"), ("A", "1")]);
    }
}
