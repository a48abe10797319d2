//! Naming rules and constants shared by the XML writer and pretty printer.

use crate::value::Key;

/// Tag used for positional children when no fallback name is available.
pub const DEFAULT_ITEM_TAG: &str = "item";

/// Indentation width of pretty-printed output.
pub const INDENT_SIZE: usize = 2;

fn is_name_start_char(c: char) -> bool {
    matches!(c,
        ':' | '_' | 'A'..='Z' | 'a'..='z'
        | '\u{C0}'..='\u{D6}'
        | '\u{D8}'..='\u{F6}'
        | '\u{F8}'..='\u{2FF}'
        | '\u{370}'..='\u{37D}'
        | '\u{37F}'..='\u{1FFF}'
        | '\u{200C}'..='\u{200D}'
        | '\u{2070}'..='\u{218F}'
        | '\u{2C00}'..='\u{2FEF}'
        | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}'
        | '\u{FDF0}'..='\u{FFFD}'
        | '\u{10000}'..='\u{EFFFF}')
}

fn is_name_char(c: char) -> bool {
    is_name_start_char(c)
        || matches!(c,
            '-' | '.' | '0'..='9' | '\u{B7}'
            | '\u{300}'..='\u{36F}'
            | '\u{203F}'..='\u{2040}')
}

/// Checks a string against the XML `Name` production.
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => is_name_start_char(first) && chars.all(is_name_char),
        None => false,
    }
}

/// Element name for a child entry.
///
/// Named keys are used verbatim. Positional keys take the enclosing element's
/// name, or [`DEFAULT_ITEM_TAG`] when that is empty.
pub fn element_name<'a>(key: &'a Key, fallback: &'a str) -> &'a str {
    match key {
        Key::Name(name) => name,
        Key::Index(_) if fallback.is_empty() => DEFAULT_ITEM_TAG,
        Key::Index(_) => fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_name() {
        assert!(is_valid_name("root"));
        assert!(is_valid_name("_private"));
        assert!(is_valid_name("ns:tag"));
        assert!(is_valid_name("a-b.c9"));
        assert!(is_valid_name("данные"));
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("9lives"));
        assert!(!is_valid_name("-dash"));
        assert!(!is_valid_name("two words"));
        assert!(!is_valid_name("a<b"));
    }

    #[test]
    fn test_element_name() {
        let named = Key::from("title");
        let index = Key::Index(3);
        assert_eq!(element_name(&named, "parent"), "title");
        assert_eq!(element_name(&index, "tags"), "tags");
        assert_eq!(element_name(&index, ""), "item");
    }
}
