use crate::agent_based::StringTable;
use serde::{Deserialize, Serialize};

const TAGS: [&str; 3] = ["STATUS:", "CODE:", "RESPONSE:"];

/// Longest response excerpt the agents write.
pub const RESPONSE_EXCERPT_LEN: usize = 200;

/// A `STATUS:<token> CODE:<token> RESPONSE:<text>` line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginStatus {
    pub raw: String,
    pub status: Option<String>,
    pub code: Option<String>,
    pub response: Option<String>,
}

impl LoginStatus {
    pub fn is_ok(&self) -> bool {
        self.status.as_deref() == Some("OK")
    }

    pub fn code_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.code.as_deref().unwrap_or(default)
    }
}

fn first_line(table: &StringTable) -> Option<String> {
    let raw = table.first()?.join(" ").trim().to_string();
    if raw.is_empty() {
        None
    } else {
        Some(raw)
    }
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Value after `tag`, up to whichever other tag comes next.
fn extract_tag(raw: &str, tag: &str) -> Option<String> {
    let start = raw.find(tag)? + tag.len();
    let end = TAGS
        .iter()
        .filter(|other| **other != tag)
        .filter_map(|other| raw[start..].find(other).map(|p| start + p))
        .min()
        .unwrap_or(raw.len());
    non_empty(&raw[start..end])
}

/// Login section of the XIQ agent. Tags may appear in any order; the
/// response runs to the end of the line.
pub fn parse_xiq_login(table: &StringTable) -> Option<LoginStatus> {
    let raw = first_line(table)?;
    let status = extract_tag(&raw, "STATUS:");
    let code = extract_tag(&raw, "CODE:");
    let response = raw
        .find("RESPONSE:")
        .and_then(|pos| non_empty(&raw[pos + "RESPONSE:".len()..]));

    Some(LoginStatus {
        raw,
        status,
        code,
        response,
    })
}

/// Section of the generic HTTP login agent. Fields are positional:
/// `STATUS:` first, then `CODE:`, then `RESPONSE:`. A missing code reads
/// as `?`; a line without `STATUS:` is unusable.
pub fn parse_logincheck(table: &StringTable) -> Option<LoginStatus> {
    let raw = first_line(table)?;

    let (head, response) = match raw.split_once(" RESPONSE:") {
        Some((head, rest)) => (head, non_empty(rest)),
        None => (raw.as_str(), None),
    };
    let (status_part, code) = match head.split_once(" CODE:") {
        Some((status_part, code)) => (status_part, non_empty(code)),
        None => (head, None),
    };
    let status = status_part.split_once("STATUS:").map(|(_, s)| s.trim().to_string())?;

    Some(LoginStatus {
        raw: raw.clone(),
        status: Some(status),
        code: Some(code.unwrap_or_else(|| "?".to_string())),
        response,
    })
}

/// The line the login agents write: `STATUS:OK|ERROR CODE:<code>
/// RESPONSE:<excerpt>`. Code 0 means no HTTP response was received.
pub fn format_login_line(ok: bool, code: u16, response: &str) -> String {
    let excerpt: String = response
        .chars()
        .take(RESPONSE_EXCERPT_LEN)
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    format!(
        "STATUS:{} CODE:{} RESPONSE:{}",
        if ok { "OK" } else { "ERROR" },
        code,
        excerpt.trim()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(line: &str) -> StringTable {
        vec![line.split_whitespace().map(str::to_string).collect()]
    }

    #[test]
    fn test_xiq_login_full_line() {
        let s = parse_xiq_login(&split("STATUS:OK CODE:200 RESPONSE:{\"access_token\": \"x\"}")).unwrap();
        assert_eq!(s.status.as_deref(), Some("OK"));
        assert_eq!(s.code.as_deref(), Some("200"));
        assert_eq!(s.response.as_deref(), Some("{\"access_token\": \"x\"}"));
        assert!(s.is_ok());
    }

    #[test]
    fn test_xiq_login_tags_out_of_order() {
        let s = parse_xiq_login(&split("CODE:401 STATUS:ERROR")).unwrap();
        assert_eq!(s.status.as_deref(), Some("ERROR"));
        assert_eq!(s.code.as_deref(), Some("401"));
        assert!(s.response.is_none());
        assert!(!s.is_ok());
    }

    #[test]
    fn test_xiq_login_empty() {
        assert!(parse_xiq_login(&Vec::new()).is_none());
        assert!(parse_xiq_login(&vec![vec![]]).is_none());
    }

    #[test]
    fn test_logincheck_positional() {
        let s = parse_logincheck(&split("STATUS:ERROR CODE:0 RESPONSE:connection refused")).unwrap();
        assert_eq!(s.status.as_deref(), Some("ERROR"));
        assert_eq!(s.code.as_deref(), Some("0"));
        assert_eq!(s.response.as_deref(), Some("connection refused"));
    }

    #[test]
    fn test_logincheck_missing_code_and_status() {
        let s = parse_logincheck(&split("STATUS:OK")).unwrap();
        assert_eq!(s.code_or(""), "?");
        assert!(parse_logincheck(&split("hello world")).is_none());
    }

    #[test]
    fn test_format_login_line_parses_back() {
        let body = format!("line one\nline two {}", "x".repeat(300));
        let line = format_login_line(false, 401, &body);
        assert!(line.starts_with("STATUS:ERROR CODE:401 RESPONSE:line one line two "));
        assert!(!line.contains('\n'));

        let parsed = parse_logincheck(&split(&line)).unwrap();
        assert_eq!(parsed.code.as_deref(), Some("401"));
        assert_eq!(parsed.response.map(|r| r.chars().count()), Some(RESPONSE_EXCERPT_LEN));
    }
}
