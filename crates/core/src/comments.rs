//! Comment annotations
//!
//! Availability records carry a free-text comments field. Automated notes are
//! written as `{title} - {message}{terminator}` sections so a later run can
//! find and replace its own note without touching anything else.
//!
//! This is library API for hosts that write records back to their store.
//! The command line tool prints results and never edits comments itself.

/// Replace the `title` section of `comments` with a fresh note.
///
/// Any existing section (from `title` through the next `terminator`, or to the
/// end of the text if it is unterminated) is removed. When `message` is given
/// a new section is appended; otherwise the old one is simply dropped.
pub fn update_comments(
    comments: &str,
    title: &str,
    terminator: &str,
    message: Option<&str>,
) -> String {
    let mut updated = comments.to_string();

    if !title.is_empty() {
        if let Some(start) = updated.find(title) {
            let end = Some(terminator)
                .filter(|t| !t.is_empty())
                .and_then(|t| updated[start..].find(t))
                .map(|offset| start + offset + terminator.len())
                .unwrap_or(updated.len());
            updated.replace_range(start..end, "");
        }
    }

    if let Some(message) = message.filter(|m| !m.is_empty()) {
        updated.push_str(&format!("{} - {}{}", title, message, terminator));
    }

    updated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appends_to_empty_comments() {
        let updated = update_comments("", "Availability", ";", Some("A1-2 booked"));
        assert_eq!(updated, "Availability - A1-2 booked;");
    }

    #[test]
    fn test_replaces_existing_section() {
        let comments = "Call crew early. Availability - B taken; Bring badges.";
        let updated = update_comments(comments, "Availability", ";", Some("B free"));
        assert_eq!(updated, "Call crew early.  Bring badges.Availability - B free;");
    }

    #[test]
    fn test_removes_section_without_message() {
        let updated = update_comments("Note. Availability - old;", "Availability", ";", None);
        assert_eq!(updated, "Note. ");
    }

    #[test]
    fn test_unterminated_section_runs_to_end() {
        let updated = update_comments("Keep. Availability - stale", "Availability", ";", Some("new"));
        assert_eq!(updated, "Keep. Availability - new;");
    }

    #[test]
    fn test_other_text_untouched() {
        let updated = update_comments("Nothing to see", "Availability", ";", None);
        assert_eq!(updated, "Nothing to see");
    }
}
