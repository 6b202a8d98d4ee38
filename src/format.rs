/// Placement of text inside a fixed-width field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Justify {
    Left,
    Center,
    Right,
}

/// Pad `text` to exactly `width` characters with `pad`. Text already at or
/// beyond `width` is returned unchanged.
pub fn justify(text: &str, width: usize, mode: Justify, pad: char) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    let missing = width - len;
    let (left, right) = match mode {
        Justify::Left   => (0, missing),
        Justify::Right  => (missing, 0),
        Justify::Center => (missing / 2, missing - missing / 2),
    };
    let mut out = String::with_capacity(width);
    for _ in 0..left { out.push(pad); }
    out.push_str(text);
    for _ in 0..right { out.push(pad); }
    out
}

/// Repeat `pattern` cyclically to exactly `width` characters: a separator
/// rule like `repeat_to("-·", 5)` → `"-·-·-"`.
pub fn repeat_to(pattern: &str, width: usize) -> String {
    if pattern.is_empty() {
        return " ".repeat(width);
    }
    pattern.chars().cycle().take(width).collect()
}

/// Format a value with a fixed number of decimals, then justify it into a
/// `width`-character field: `fmt_value(3.5, 1, 8, Justify::Right)` →
/// `"     3.5"`.
pub fn fmt_value(value: f64, decimals: usize, width: usize, mode: Justify) -> String {
    justify(&format!("{:.*}", decimals, value), width, mode, ' ')
}

/// Compact duration: the two largest non-zero units, seconds through
/// years: "3d 4h", "2m 5s", "1y 2mo".
pub fn fmt_duration(secs: u64) -> String {
    const UNITS: [(u64, &str); 6] = [
        (31_557_600, "y"),   // 365.25 days
        (2_629_800,  "mo"),  // 1/12 year
        (86_400,     "d"),
        (3_600,      "h"),
        (60,         "m"),
        (1,          "s"),
    ];

    if secs == 0 {
        return "0s".to_string();
    }

    let mut parts: Vec<String> = Vec::with_capacity(2);
    let mut rest = secs;
    for &(span, suffix) in &UNITS {
        let n = rest / span;
        if n > 0 {
            parts.push(format!("{}{}", n, suffix));
            rest %= span;
            if parts.len() == 2 {
                break;
            }
        }
    }
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn justify_pads_each_mode() {
        assert_eq!(justify("ab", 6, Justify::Left,   ' '), "ab    ");
        assert_eq!(justify("ab", 6, Justify::Right,  ' '), "    ab");
        assert_eq!(justify("ab", 6, Justify::Center, '.'), "..ab..");
        // Odd leftover goes to the right in center mode.
        assert_eq!(justify("ab", 5, Justify::Center, ' '), " ab  ");
    }

    #[test]
    fn justify_leaves_wide_text_alone() {
        assert_eq!(justify("too wide", 4, Justify::Left, ' '), "too wide");
        assert_eq!(justify("same", 4, Justify::Right, ' '), "same");
    }

    #[test]
    fn repeat_to_cycles_pattern() {
        assert_eq!(repeat_to("-", 4), "----");
        assert_eq!(repeat_to("-·", 5), "-·-·-");
        assert_eq!(repeat_to("abc", 2), "ab");
        assert_eq!(repeat_to("", 3), "   ");
    }

    #[test]
    fn fmt_value_fixes_decimals_and_width() {
        assert_eq!(fmt_value(3.456, 1, 8, Justify::Right), "     3.5");
        assert_eq!(fmt_value(0.0, 2, 6, Justify::Left), "0.00  ");
        assert_eq!(fmt_value(1234.6, 0, 4, Justify::Right), "1235");
    }

    #[test]
    fn fmt_duration_uses_two_largest_units() {
        assert_eq!(fmt_duration(0), "0s");
        assert_eq!(fmt_duration(59), "59s");
        assert_eq!(fmt_duration(125), "2m 5s");
        assert_eq!(fmt_duration(86_400 * 3 + 3_600 * 4 + 30), "3d 4h");
        assert_eq!(fmt_duration(31_557_600 + 2_629_800 * 2), "1y 2mo");
    }
}
