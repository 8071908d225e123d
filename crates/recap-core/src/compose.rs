//! Composition of the outgoing text message from report fields.

/// Label of the overall-assessment line in the report.
pub const ASSESSMENT_LABEL: &str = "整体评价";
/// Label of the suggestions line in the report.
pub const SUGGESTION_LABEL: &str = "我的建议";
/// Separator between the ranking body and the footer.
const SEPARATOR: &str = "\n\n--------------\n";
/// Footer used when no `footer_text` is configured.
pub const DEFAULT_FOOTER: &str =
    "由免费、快捷、智能的 https://zhinang.ai 『智囊 AI』技术支持，你可以直接 @我 提问问题，我会自动回复你的消息";

/// Find the first line that starts with `label` followed by a colon or
/// space separator. Returns the whole line, label included, newline excluded.
pub fn labeled_line<'a>(text: &'a str, label: &str) -> Option<&'a str> {
    text.lines().find(|line| {
        line.strip_prefix(label)
            .is_some_and(|rest| rest.starts_with([':', '：', ' ']))
    })
}

/// Compose the outgoing text from the report, ranking, and footer.
///
/// Degrades gracefully: an unreadable report or missing assessment label
/// drops the header lines but never fails the composition.
pub fn compose(report: Option<&str>, ranking: &str, footer: Option<&str>) -> String {
    let footer = footer.unwrap_or(DEFAULT_FOOTER);
    let mut body = String::new();
    if let Some(report) = report {
        if let Some(assessment) = labeled_line(report, ASSESSMENT_LABEL) {
            body.push_str(assessment);
            body.push('\n');
            if let Some(suggestion) = labeled_line(report, SUGGESTION_LABEL) {
                body.push_str(suggestion);
                body.push('\n');
            }
            body.push('\n');
        }
    }
    body.push_str(ranking);
    body.push_str(SEPARATOR);
    body.push_str(footer);
    body
}

#[cfg(test)]
mod tests {
    use super::{ASSESSMENT_LABEL, DEFAULT_FOOTER, SUGGESTION_LABEL, compose, labeled_line};
    use pretty_assertions::assert_eq;

    #[test]
    fn labeled_line_matches_colon_and_space_separators() {
        let report = "前言\n整体评价: 气氛不错\n我的建议 多讨论技术\n";
        assert_eq!(
            labeled_line(report, ASSESSMENT_LABEL),
            Some("整体评价: 气氛不错")
        );
        assert_eq!(
            labeled_line(report, SUGGESTION_LABEL),
            Some("我的建议 多讨论技术")
        );
    }

    #[test]
    fn labeled_line_requires_a_separator() {
        assert_eq!(labeled_line("整体评价很好\n", ASSESSMENT_LABEL), None);
        assert_eq!(labeled_line("无关内容\n", ASSESSMENT_LABEL), None);
    }

    #[test]
    fn labeled_line_accepts_empty_content() {
        assert_eq!(labeled_line("整体评价:\n", ASSESSMENT_LABEL), Some("整体评价:"));
    }

    #[test]
    fn compose_includes_header_ranking_and_footer_in_order() {
        let report = "整体评价: great\n我的建议: none\n";
        let text = compose(Some(report), "Alice: 10\n", Some("<footer>"));
        assert_eq!(
            text,
            "整体评价: great\n我的建议: none\n\nAlice: 10\n\n\n--------------\n<footer>"
        );
    }

    #[test]
    fn compose_omits_missing_suggestion_line() {
        let report = "整体评价: great\n";
        let text = compose(Some(report), "Alice: 10\n", Some("<footer>"));
        assert_eq!(text, "整体评价: great\n\nAlice: 10\n\n\n--------------\n<footer>");
    }

    #[test]
    fn compose_degrades_without_labeled_lines() {
        let text = compose(Some("malformed report\n"), "Alice: 10\n", Some("<footer>"));
        assert_eq!(text, "Alice: 10\n\n\n--------------\n<footer>");
    }

    #[test]
    fn compose_degrades_without_report() {
        let text = compose(None, "Alice: 10\n", None);
        assert_eq!(
            text,
            format!("Alice: 10\n\n\n--------------\n{DEFAULT_FOOTER}")
        );
    }
}
