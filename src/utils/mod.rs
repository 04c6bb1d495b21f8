//! Shared helpers.

pub mod encoding;

pub use encoding::read_text_file;

/// Format an integer with thousands separators (`12345` -> `"12,345"`).
pub fn format_with_commas(value: usize) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
