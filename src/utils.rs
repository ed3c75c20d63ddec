//! 文本处理工具

/// 统计文本的词数（按空白分割）
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// 将文本截断到最多 `max_words` 个词
///
/// # 参数
///
/// * `text` - 原始文本
/// * `max_words` - 词数上限
///
/// # 返回值
///
/// 如果文本不超过上限，原样返回；否则返回前 `max_words` 个词
/// 拼接的结果（保留单个空格作为分隔符）
pub fn truncate_words(text: &str, max_words: usize) -> String {
    if word_count(text) <= max_words {
        return text.to_string();
    }

    text.split_whitespace()
        .take(max_words)
        .collect::<Vec<_>>()
        .join(" ")
}
