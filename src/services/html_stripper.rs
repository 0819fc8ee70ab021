//! HTML 剥离服务 - 业务能力层
//!
//! 只负责"把一段 HTML 变成纯文本 + 链接 + 图片"，不关心文件和流程

use crate::error::AppResult;
use regex::Regex;

/// 剥离结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrippedHtml {
    /// 折叠空白并去除首尾空白后的纯文本
    pub text: String,
    /// 去掉标签但保留原始换行的文本，用于段落统计
    pub text_with_breaks: String,
    pub links: Vec<String>,
    pub images: Vec<String>,
}

/// HTML 剥离器
///
/// 正则在构造时编译一次，可在多个任务间通过 `Arc` 共享。
pub struct HtmlStripper {
    script_re: Regex,
    style_re: Regex,
    href_re: Regex,
    src_re: Regex,
    tag_re: Regex,
    whitespace_re: Regex,
}

impl HtmlStripper {
    pub fn new() -> AppResult<Self> {
        Ok(Self {
            script_re: Regex::new(r"(?is)<script[^>]*>.*?</script>")?,
            style_re: Regex::new(r"(?is)<style[^>]*>.*?</style>")?,
            href_re: Regex::new(r#"(?i)href=['"]?([^'" >]+)"#)?,
            src_re: Regex::new(r#"(?i)src=['"]?([^'" >]+)"#)?,
            tag_re: Regex::new(r"<[^>]+>")?,
            whitespace_re: Regex::new(r"\s+")?,
        })
    }

    /// 剥离 HTML
    ///
    /// 1. 先删除 `<script>` / `<style>` 块，其内容不会进入文本或链接列表
    /// 2. 按出现顺序提取 `href=` 与 `src=` 的值，不去重
    /// 3. 标签替换为空格，折叠连续空白，去除首尾空白
    pub fn strip(&self, html: &str) -> StrippedHtml {
        let without_script = self.script_re.replace_all(html, "");
        let cleaned = self.style_re.replace_all(&without_script, "");

        let links = capture_all(&self.href_re, &cleaned);
        let images = capture_all(&self.src_re, &cleaned);

        let text_with_breaks = self.tag_re.replace_all(&cleaned, " ").into_owned();
        let text = self
            .whitespace_re
            .replace_all(&text_with_breaks, " ")
            .trim()
            .to_string();

        StrippedHtml {
            text,
            text_with_breaks,
            links,
            images,
        }
    }
}

fn capture_all(re: &Regex, haystack: &str) -> Vec<String> {
    re.captures_iter(haystack)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}
