//! Phone number input.

use serde::{Deserialize, Serialize};

use crate::models::PhoneNumber;

/// How the phone field displays the stored digits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhoneStyle {
    /// `(XXX) XXX-XXXX`, applied progressively while typing
    #[default]
    Masked,
    /// The bare digit string
    Raw,
}

/// Strips non-digits on every keystroke and caps at ten digits.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhoneInput {
    style: PhoneStyle,
}

impl PhoneInput {
    pub fn new(style: PhoneStyle) -> Self {
        Self { style }
    }

    /// Value to store for whatever is in the text box.
    pub fn input(&self, raw: &str) -> PhoneNumber {
        PhoneNumber::normalize(raw)
    }

    /// Text to show in the box.
    pub fn display(&self, phone: &PhoneNumber) -> String {
        match self.style {
            PhoneStyle::Masked => format_mask(phone.digits()),
            PhoneStyle::Raw => phone.digits().to_string(),
        }
    }
}

/// Apply the North American mask to a digit string.
pub fn format_mask(digits: &str) -> String {
    let digits: String = digits.chars().filter(char::is_ascii_digit).collect();
    match digits.len() {
        0..=2 => digits,
        3..=5 => format!("({}) {}", &digits[..3], &digits[3..]),
        _ => format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_strips_and_truncates() {
        let phone = PhoneInput::new(PhoneStyle::Masked).input("abc4165551234xyz");
        assert_eq!(phone.digits(), "4165551234");
    }

    #[test]
    fn test_masked_display() {
        let input = PhoneInput::new(PhoneStyle::Masked);
        assert_eq!(input.display(&input.input("41")), "41");
        assert_eq!(input.display(&input.input("4165")), "(416) 5");
        assert_eq!(input.display(&input.input("416555")), "(416) 555-");
        assert_eq!(input.display(&input.input("4165551234")), "(416) 555-1234");
    }

    #[test]
    fn test_raw_display() {
        let input = PhoneInput::new(PhoneStyle::Raw);
        assert_eq!(input.display(&input.input("(416) 555-1234")), "4165551234");
    }

    #[test]
    fn test_reformatting_masked_text_is_stable() {
        let input = PhoneInput::new(PhoneStyle::Masked);
        let shown = input.display(&input.input("4165551234"));
        assert_eq!(input.input(&shown).digits(), "4165551234");
    }
}
