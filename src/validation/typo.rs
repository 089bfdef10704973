/// Mail providers checked for one-keystroke typos.
pub const COMMON_DOMAINS: &[&str] = &[
    "gmail.com",
    "yahoo.com",
    "hotmail.com",
    "outlook.com",
    "icloud.com",
    "aol.com",
    "live.com",
    "msn.com",
    "protonmail.com",
    "mail.com",
];

/// Edit distance with unit-cost insert, delete and substitute.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            current[j + 1] = (previous[j + 1] + 1)
                .min(current[j] + 1)
                .min(previous[j] + cost);
        }
        std::mem::swap(&mut previous, &mut current);
    }
    previous[b.len()]
}

/// First common domain exactly one edit away from `domain`.
pub fn suggest_domain(domain: &str) -> Option<&'static str> {
    let domain = domain.to_lowercase();
    COMMON_DOMAINS
        .iter()
        .copied()
        .find(|candidate| levenshtein(&domain, candidate) == 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_basics() {
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", ""), 3);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("gmail.com", "gmail.com"), 0);
        assert_eq!(levenshtein("gmial.com", "gmail.com"), 2);
    }

    #[test]
    fn suggests_single_edit_typos() {
        assert_eq!(suggest_domain("gmai.com"), Some("gmail.com"));
        assert_eq!(suggest_domain("hotmial.com"), None);
        assert_eq!(suggest_domain("yahooo.com"), Some("yahoo.com"));
        assert_eq!(suggest_domain("Gmal.com"), Some("gmail.com"));
    }

    #[test]
    fn exact_match_is_not_a_typo() {
        assert_eq!(suggest_domain("gmail.com"), None);
        assert_eq!(suggest_domain("example.org"), None);
    }
}
