//! Text fitting for balloon labels: greedy word wrap, piecewise radius
//! growth, and a font size that keeps any label legible inside its balloon.

pub const MAX_LINE_LENGTH: usize = 10;
pub const BASE_RADIUS: f32 = 75.0;

const MIN_FONT_SIZE: f32 = 12.0;
const MAX_FONT_SIZE: f32 = 24.0;

fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Splits on single spaces and greedily packs words per line. A single
/// unbroken token longer than `max_line_length` is kept whole; it overflows
/// as one long line instead of being split mid-word.
pub fn wrap(text: &str, max_line_length: usize) -> Vec<String> {
    if char_len(text) <= max_line_length {
        return vec![text.to_owned()];
    }

    let mut words = text.split(' ');
    let Some(first) = words.next() else {
        return vec![text.to_owned()];
    };

    let mut lines = Vec::new();
    let mut current = first.to_owned();

    for word in words {
        if char_len(&current) + 1 + char_len(word) <= max_line_length {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::replace(&mut current, word.to_owned()));
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

fn longest_line(lines: &[String]) -> usize {
    lines.iter().map(|line| char_len(line)).max().unwrap_or(0)
}

/// Radius that roughly tracks the rendered text bounding box: two growth
/// slopes for single-line labels, line-count growth for wrapped ones.
pub fn balloon_radius(text: &str) -> f32 {
    let text_length = char_len(text);
    let lines = wrap(text, MAX_LINE_LENGTH);

    let additional = if lines.len() == 1 {
        if text_length > 12 {
            25.0 + (text_length as f32 - 12.0) * 2.5
        } else if text_length >= 6 {
            15.0 + (text_length as f32 - 6.0) * 2.0
        } else {
            0.0
        }
    } else {
        let longest = longest_line(&lines) as f32;
        15.0 + (lines.len() as f32 - 1.0) * 10.0 + longest * 2.0
    };

    BASE_RADIUS + additional
}

/// Font size for a wrapped label inside a balloon of the given radius,
/// clamped to [12, 24] so short tickers and long company names both render
/// without per-label tuning.
pub fn font_size(lines: &[String], radius: f32) -> f32 {
    let longest = longest_line(lines).max(1) as f32;
    let max_width = radius * 1.7;

    let size = if lines.len() <= 1 {
        (radius * 0.35).min(max_width / (longest * 0.35))
    } else {
        (radius * 0.3 / (lines.len() as f32).sqrt()).min(max_width / (longest * 0.4))
    };

    size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_not_wrapped() {
        assert_eq!(wrap("Stake", MAX_LINE_LENGTH), vec!["Stake"]);
        assert_eq!(wrap("GoParity", MAX_LINE_LENGTH), vec!["GoParity"]);
    }

    #[test]
    fn long_text_wraps_on_spaces() {
        assert_eq!(
            wrap("La Première Brique", MAX_LINE_LENGTH),
            vec!["La", "Première", "Brique"]
        );
        assert_eq!(
            wrap("Splint Invest", MAX_LINE_LENGTH),
            vec!["Splint", "Invest"]
        );
    }

    #[test]
    fn unbroken_long_tokens_are_not_force_split() {
        let lines = wrap("Extraordinarily", MAX_LINE_LENGTH);
        assert_eq!(lines, vec!["Extraordinarily"]);

        let lines = wrap("Extraordinarily Good", MAX_LINE_LENGTH);
        assert_eq!(lines, vec!["Extraordinarily", "Good"]);
    }

    #[test]
    fn wrap_round_trips_single_spaced_input() {
        for text in [
            "Stake",
            "Splint Invest",
            "La Première Brique",
            "A Very Long Platform Name Indeed",
        ] {
            assert_eq!(wrap(text, MAX_LINE_LENGTH).join(" "), text);
        }
    }

    #[test]
    fn radius_is_monotone_in_single_line_length() {
        let inputs = ["AB", "ABCDEF", "ABCDEFGH", "ABCDEFGHIJ", "ABCDEFGHIJKLMN"];
        let radii: Vec<f32> = inputs.iter().map(|text| balloon_radius(text)).collect();

        for pair in radii.windows(2) {
            assert!(pair[0] <= pair[1], "radius shrank: {:?}", radii);
        }
    }

    #[test]
    fn multi_line_labels_grow_with_line_count() {
        let two_lines = balloon_radius("Splint Invest");
        let three_lines = balloon_radius("La Grande Première Brique");
        assert!(two_lines > BASE_RADIUS);
        assert!(three_lines > two_lines);
    }

    #[test]
    fn font_size_stays_clamped() {
        let tiny = font_size(&["A".to_owned()], 30.0);
        assert!((MIN_FONT_SIZE..=MAX_FONT_SIZE).contains(&tiny));

        let huge = font_size(&["AB".to_owned()], 400.0);
        assert_eq!(huge, MAX_FONT_SIZE);

        let crowded = font_size(&["ABCDEFGHIJKLMNOPQRSTUV".to_owned()], 40.0);
        assert_eq!(crowded, MIN_FONT_SIZE);
    }

    #[test]
    fn multi_line_text_uses_a_smaller_font() {
        let radius = 110.0;
        let one = font_size(&["Rendity".to_owned()], radius);
        let two = font_size(&["Rendity".to_owned(), "Invest".to_owned()], radius);
        assert!(two < one);
    }
}
