pub fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_cases_uppercase_input() {
        assert_eq!(title_case("STAKE"), "Stake");
        assert_eq!(title_case("SPLINT INVEST"), "Splint Invest");
    }

    #[test]
    fn title_cases_accented_words() {
        assert_eq!(title_case("LA PREMIÈRE BRIQUE"), "La Première Brique");
    }

    #[test]
    fn normalizes_mixed_case_words() {
        assert_eq!(title_case("goParity"), "Goparity");
        assert_eq!(title_case(""), "");
    }
}
