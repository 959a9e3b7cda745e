//! 生成文本的清理
//!
//! 模型经常返回 markdown，这里去掉标题井号、加粗/斜体星号、行内代码反引号和简单的列表符号

use std::sync::LazyLock;

use regex::Regex;

static HEADING_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*#+\s*").unwrap());
static BULLET_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*[-*+•]\s+").unwrap());

/// 清理整段文本（逐行处理）
///
/// 结果是不动点：对已清理的文本再次清理不会改变它
pub fn clean_markdown(text: &str) -> String {
    text.lines().map(clean_line).collect::<Vec<_>>().join("\n")
}

/// 清理单行，重复处理直到不再变化
pub fn clean_line(line: &str) -> String {
    let mut current = line.to_string();
    loop {
        let next = remove_inline_markers(&strip_prefixes(&current));
        if next == current {
            return current;
        }
        current = next;
    }
}

fn remove_inline_markers(line: &str) -> String {
    line.chars().filter(|c| !matches!(c, '*' | '`')).collect()
}

/// 去掉行首的标题井号和列表符号（可能层层嵌套，如 `- ## 标题`）
fn strip_prefixes(line: &str) -> String {
    let mut current = line.to_string();
    loop {
        let next = if HEADING_PREFIX.is_match(&current) {
            HEADING_PREFIX.replace(&current, "").into_owned()
        } else {
            BULLET_PREFIX.replace(&current, "").into_owned()
        };
        if next == current {
            return current;
        }
        current = next;
    }
}

/// 去掉正文开头重复的标题
///
/// 只有第一行非空内容与标题（忽略大小写）完全相同时才删除，连同其后的空行；
/// 仅包含标题的行保持不变
pub fn remove_duplicate_title(title: &str, content: &str) -> String {
    let wanted = clean_line(title).trim().to_lowercase();
    let lines: Vec<&str> = content.lines().collect();

    let Some(first) = lines.iter().position(|l| !l.trim().is_empty()) else {
        return content.trim().to_string();
    };

    if wanted.is_empty() || lines[first].trim().to_lowercase() != wanted {
        return content.trim().to_string();
    }

    lines[first + 1..]
        .iter()
        .skip_while(|l| l.trim().is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
