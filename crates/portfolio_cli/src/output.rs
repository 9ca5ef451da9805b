//! Plain-text card formatting for terminal output.

use portfolio_core::CardView;

/// Formats one card as an indented block.
pub fn format_card(card: &CardView) -> String {
    let mut lines = vec![
        format!("[{}] {} ({})", card.id, card.title, card.category),
        format!("    {} | {} | {}", card.badge, card.date, card.icon),
        format!("    {}", card.description),
    ];
    if !card.tech_tags.is_empty() {
        lines.push(format!("    tech: {}", card.tech_tags.join(", ")));
    }
    lines.extend(card.features.iter().map(|feature| format!("    - {feature}")));
    lines.push(format!("    {}", card.links.join(" · ")));
    lines.join("\n")
}
