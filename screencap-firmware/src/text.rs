//! Text helpers shared with the build script

/// Shorten `line` to at most `max` characters, ending in `...` when cut
pub fn ellipsize(line: &str, max: usize) -> String {
    if line.chars().count() <= max {
        return line.to_string();
    }
    let keep = max.saturating_sub(3);
    let end = line
        .char_indices()
        .nth(keep)
        .map(|(i, _)| i)
        .unwrap_or(line.len());
    format!("{}...", &line[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_lines_unchanged() {
        assert_eq!(ellipsize("expected `=`", 64), "expected `=`");
        assert_eq!(ellipsize(&"x".repeat(64), 64), "x".repeat(64));
    }

    #[test]
    fn test_long_ascii_line() {
        let cut = ellipsize(&"a".repeat(100), 64);
        assert_eq!(cut, format!("{}...", "a".repeat(61)));
        assert_eq!(cut.chars().count(), 64);
    }

    #[test]
    fn test_multibyte_character_at_cut() {
        // 'é' is two bytes and straddles byte 61
        let line = format!("{}é{}", "a".repeat(60), "b".repeat(20));
        let cut = ellipsize(&line, 64);
        assert_eq!(cut, format!("{}é...", "a".repeat(60)));
        assert_eq!(cut.chars().count(), 64);
    }
}
