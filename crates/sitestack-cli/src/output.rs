//! Formatted output helpers for CLI commands.

use std::fmt::Display;

/// A horizontal double rule of `width` characters.
#[must_use]
pub fn rule(width: usize) -> String {
    "\u{2550}".repeat(width)
}

/// Joins displayable items with `, `.
#[must_use]
pub fn join<T: Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Summary line for a plan.
#[must_use]
pub fn resource_count(count: usize) -> String {
    match count {
        1 => "1 resource will be created.".to_string(),
        n => format!("{n} resources will be created."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_has_requested_width() {
        assert_eq!(rule(3).chars().count(), 3);
    }

    #[test]
    fn join_separates_with_commas() {
        assert_eq!(join(&["a", "b"]), "a, b");
        assert_eq!(join::<&str>(&[]), "");
    }

    #[test]
    fn resource_count_pluralizes() {
        assert_eq!(resource_count(1), "1 resource will be created.");
        assert_eq!(resource_count(5), "5 resources will be created.");
    }
}
