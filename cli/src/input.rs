use std::collections::HashMap;

use anyhow::{anyhow, Result};
use taskline_core::{Priority, SortKey, Status};

#[derive(Debug, PartialEq)]
pub struct ParsedInput {
    pub title: String,
    pub metadata: HashMap<String, String>,
}

/// Split `add` arguments into the task title and key:value metadata, e.g.
/// `add "Ship release notes" due:tomorrow pri:h`.
pub fn parse_args(args: &[String]) -> ParsedInput {
    let mut title_parts = Vec::new();
    let mut metadata = HashMap::new();

    for arg in args {
        if let Some((key, value)) = arg.split_once(':') {
            if !key.is_empty() {
                metadata.insert(key.to_string(), value.to_string());
                continue;
            }
        }
        title_parts.push(arg.as_str());
    }

    ParsedInput {
        title: title_parts.join(" "),
        metadata,
    }
}

pub fn expand_key(key: &str, candidates: &[&str]) -> Result<String> {
    // 1. Exact match
    if candidates.contains(&key) {
        return Ok(key.to_string());
    }

    // 2. Prefix match
    let matches: Vec<&str> = candidates
        .iter()
        .filter(|&&c| c.starts_with(key))
        .cloned()
        .collect();

    match matches.len() {
        1 => Ok(matches[0].to_string()),
        0 => Err(anyhow!("Unknown key: '{}'", key)),
        _ => Err(anyhow!("Ambiguous key: '{}' matches {:?}", key, matches)),
    }
}

pub fn parse_priority(s: &str) -> Option<Priority> {
    match s.to_lowercase().as_str() {
        "h" | "high" => Some(Priority::High),
        "m" | "med" | "medium" => Some(Priority::Medium),
        "l" | "low" => Some(Priority::Low),
        _ => None,
    }
}

pub fn parse_status(s: &str) -> Option<Status> {
    match s.to_lowercase().replace(['-', '_', ' '], "").as_str() {
        "notstarted" | "todo" | "ns" => Some(Status::NotStarted),
        "inprogress" | "started" | "ip" => Some(Status::InProgress),
        "completed" | "done" => Some(Status::Completed),
        _ => None,
    }
}

pub fn parse_sort_key(s: &str) -> Option<SortKey> {
    match s.to_lowercase().replace(['-', '_'], "").as_str() {
        "due" | "duedate" => Some(SortKey::DueDate),
        "pri" | "priority" => Some(SortKey::Priority),
        "title" => Some(SortKey::Title),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let args = vec![
            "Ship".to_string(),
            "release".to_string(),
            "due:tomorrow".to_string(),
            "pri:h".to_string(),
        ];
        let parsed = parse_args(&args);
        assert_eq!(parsed.title, "Ship release");
        assert_eq!(parsed.metadata.get("due"), Some(&"tomorrow".to_string()));
        assert_eq!(parsed.metadata.get("pri"), Some(&"h".to_string()));
    }

    #[test]
    fn test_expand_key() {
        let candidates = vec!["due", "priority", "description", "status"];

        assert_eq!(expand_key("due", &candidates).unwrap(), "due");
        assert_eq!(expand_key("pri", &candidates).unwrap(), "priority");
        assert_eq!(expand_key("st", &candidates).unwrap(), "status");
        assert_eq!(expand_key("de", &candidates).unwrap(), "description");

        // "d" is ambiguous between due and description
        assert!(expand_key("d", &candidates).is_err());
        assert!(expand_key("x", &candidates).is_err());
    }

    #[test]
    fn test_parse_enum_tokens() {
        assert_eq!(parse_priority("H"), Some(Priority::High));
        assert_eq!(parse_priority("medium"), Some(Priority::Medium));
        assert_eq!(parse_priority("urgent"), None);

        assert_eq!(parse_status("in-progress"), Some(Status::InProgress));
        assert_eq!(parse_status("done"), Some(Status::Completed));
        assert_eq!(parse_status("todo"), Some(Status::NotStarted));
        assert_eq!(parse_status("???"), None);

        assert_eq!(parse_sort_key("due-date"), Some(SortKey::DueDate));
        assert_eq!(parse_sort_key("title"), Some(SortKey::Title));
    }
}
