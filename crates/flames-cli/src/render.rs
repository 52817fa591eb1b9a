//! Terminal rendering of results, history and form errors.

use colored::{Color, Colorize};
use flames_core::result::{FlamesResult, RelationshipCategory};
use flames_core::share::ShareOutcome;
use flames_core::validation::{NameField, ValidationErrors};

pub fn category_color(category: RelationshipCategory) -> Color {
    match category {
        RelationshipCategory::Friends => Color::BrightBlue,
        RelationshipCategory::Lovers => Color::BrightRed,
        RelationshipCategory::Affectionate => Color::Magenta,
        RelationshipCategory::Marriage => Color::BrightMagenta,
        RelationshipCategory::Enemies => Color::BrightBlack,
        RelationshipCategory::Siblings => Color::Green,
    }
}

/// Multi-line result card.
pub fn result_card(result: &FlamesResult) -> String {
    let category = result.result;
    let mut lines = vec![
        String::new(),
        format!("  {}", category.emoji()),
        format!(
            "  {} & {}",
            result.name_one.bold(),
            result.name_two.bold()
        ),
        format!(
            "  {}",
            category
                .to_string()
                .to_uppercase()
                .color(category_color(category))
                .bold()
        ),
        format!("  {}", category.message(&result.name_one, &result.name_two)),
    ];
    if let Some(id) = result.id.as_deref().filter(|id| !id.is_empty()) {
        lines.push(format!("  {}", format!("id: {}", id).bright_black()));
    }
    lines.push(String::new());
    lines.join("\n")
}

pub fn celebration_banner() -> String {
    "  🎉 ✨ 💖 It's a match! 💖 ✨ 🎉".bright_yellow().bold().to_string()
}

/// One line per entry, most recent first.
pub fn history_list(history: &[FlamesResult]) -> String {
    if history.is_empty() {
        return "No past results yet.".bright_black().to_string();
    }

    history
        .iter()
        .map(|entry| {
            format!(
                "  {} {} & {} {} {}  {}",
                entry.result.emoji(),
                entry.name_one,
                entry.name_two,
                "→".bright_black(),
                entry
                    .result
                    .to_string()
                    .color(category_color(entry.result)),
                format!(
                    "{} [{}]",
                    entry.timestamp_label(),
                    entry.id.as_deref().unwrap_or("-")
                )
                .bright_black()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One line per invalid field.
pub fn field_errors(errors: &ValidationErrors) -> String {
    [
        ("First name", errors.get(NameField::First)),
        ("Second name", errors.get(NameField::Second)),
    ]
    .into_iter()
    .filter_map(|(label, error)| error.map(|e| format!("  {}: {}", label, e).red().to_string()))
    .collect::<Vec<_>>()
    .join("\n")
}

pub fn share_outcome(outcome: &ShareOutcome) -> String {
    match outcome {
        ShareOutcome::Shared(payload) => format!("Shared: {}", payload.url).green().to_string(),
        // The platform already printed its notice; show the link as well.
        ShareOutcome::Copied(payload) => format!("Link: {}", payload.url).bright_black().to_string(),
        ShareOutcome::Skipped => "Nothing to share yet.".bright_black().to_string(),
        ShareOutcome::Failed(reason) => format!("Could not share: {}", reason).red().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flames_core::share::SharePayload;
    use flames_core::validation::FieldError;

    fn plain() {
        colored::control::set_override(false);
    }

    fn result(id: Option<&str>, timestamp: Option<&str>) -> FlamesResult {
        FlamesResult {
            id: id.map(str::to_string),
            name_one: "Alice".to_string(),
            name_two: "Bob".to_string(),
            result: RelationshipCategory::Marriage,
            timestamp: timestamp.map(str::to_string),
        }
    }

    #[test]
    fn test_result_card() {
        plain();
        let card = result_card(&result(Some("r1"), None));
        assert!(card.contains("Alice & Bob"));
        assert!(card.contains("MARRIAGE"));
        assert!(card.contains("Alice and Bob are destined for marriage! 💒"));
        assert!(card.contains("id: r1"));
    }

    #[test]
    fn test_result_card_without_id() {
        plain();
        assert!(!result_card(&result(None, None)).contains("id:"));
    }

    #[test]
    fn test_history_list() {
        plain();
        let list = history_list(&[
            result(Some("r2"), None),
            result(Some("r1"), Some("not a date")),
        ]);
        let lines: Vec<_> = list.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Just now [r2]"));
        assert!(lines[1].contains("not a date [r1]"));
        assert!(lines[1].contains("💍 Alice & Bob"));
    }

    #[test]
    fn test_empty_history() {
        plain();
        assert_eq!(history_list(&[]), "No past results yet.");
    }

    #[test]
    fn test_field_errors() {
        plain();
        let errors = ValidationErrors {
            name_one: Some(FieldError::TooShort),
            name_two: Some(FieldError::NotDistinct),
        };
        assert_eq!(
            field_errors(&errors),
            "  First name: Name must be at least 2 characters\n  Second name: Names must be different"
        );
    }

    #[test]
    fn test_share_outcome() {
        plain();
        let payload = SharePayload {
            title: "FLAMES Calculator Result".to_string(),
            text: "text".to_string(),
            url: "https://flames.example/?result=r1".to_string(),
        };
        assert_eq!(
            share_outcome(&ShareOutcome::Copied(payload)),
            "Link: https://flames.example/?result=r1"
        );
        assert_eq!(share_outcome(&ShareOutcome::Skipped), "Nothing to share yet.");
    }
}
