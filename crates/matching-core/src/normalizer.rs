//! Deterministic name normalization: canonical forms, tokenization,
//! culture-aware variant expansion, and the corporate-entity heuristic.
//! All operations are total over arbitrary Unicode input — transliteration
//! is lossy but never panics or rejects input.

/// Culture/corporate prefixes dropped from the front of a name unless the
/// caller asks to keep them.
const PREFIXES: &[&str] = &[
    "al", "el", "ul", "bin", "ibn", "bint", "abu", "umm", "the", "a", "an",
];

/// Groups of Arabic-origin name variants treated as equivalent. The first
/// entry of each group is its canonical representative.
const VARIANT_GROUPS: &[&[&str]] = &[
    &[
        "mohammed",
        "mohammad",
        "muhammad",
        "muhammed",
        "mohamed",
        "mohamad",
    ],
    &["ahmed", "ahmad", "ahmet"],
    &["abdul", "abd", "abdel", "abdal"],
    &["ali", "aly"],
    &["hassan", "hasan"],
    &["hussein", "hussain", "husain", "hossein"],
    &["khalid", "khaled"],
    &["omar", "umar"],
    &["osman", "uthman", "othman"],
    &["saleh", "salih", "salah"],
    &["yousef", "yusuf", "youssef", "joseph"],
    &["ibrahim", "ebrahim", "abraham"],
];

const CORPORATE_INDICATORS: &[&str] = &[
    "company",
    "corporation",
    "corp",
    "inc",
    "incorporated",
    "limited",
    "ltd",
    "llc",
    "llp",
    "plc",
    "psc",
    "pjsc",
    "group",
    "holding",
    "holdings",
    "enterprise",
    "enterprises",
    "trading",
    "establishment",
    "est",
    "bank",
    "insurance",
    "investment",
    "capital",
    "fzc",
    "fze",
    "fzco",
    "wll",
    "saog",
    "saoc",
];

fn is_kept_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c.is_whitespace() || c == '-'
}

fn ascii_fold(name: &str) -> String {
    any_ascii::any_ascii(name).to_lowercase()
}

fn filter_and_collapse(ascii_lower: &str) -> String {
    let filtered: String = ascii_lower.chars().filter(|c| is_kept_char(*c)).collect();
    let hyphens_to_spaces = filtered.replace('-', " ");
    hyphens_to_spaces
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Deterministic canonical form of `name`: transliterate to ASCII,
/// lowercase, strip anything that isn't a letter/digit/space/hyphen,
/// fold hyphens to spaces, collapse whitespace, and optionally drop a
/// leading culture/corporate prefix token. Idempotent:
/// `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(name: &str, keep_prefixes: bool) -> String {
    let collapsed = filter_and_collapse(&ascii_fold(name));
    if keep_prefixes {
        return collapsed;
    }
    let mut tokens: Vec<&str> = collapsed.split(' ').filter(|t| !t.is_empty()).collect();
    if let Some(first) = tokens.first() {
        if PREFIXES.contains(first) {
            tokens.remove(0);
        }
    }
    tokens.join(" ")
}

fn canonical_variant(token: &str) -> &str {
    for group in VARIANT_GROUPS {
        if group.contains(&token) {
            return group[0];
        }
    }
    token
}

fn variant_group(token: &str) -> Option<&'static [&'static str]> {
    VARIANT_GROUPS.iter().find(|g| g.contains(&token)).copied()
}

/// Aggressive normalization used only for cheap pre-filtering: normalize
/// without prefixes, standardize Arabic-origin variants to their
/// canonical form, then concatenate tokens with no separator.
pub fn fingerprint(name: &str) -> String {
    normalize(name, false)
        .split_whitespace()
        .map(canonical_variant)
        .collect::<Vec<_>>()
        .concat()
}

/// Tokens of `normalize(name, keep_prefixes=true)`, dropping
/// single-character tokens unless they were an upper-case letter in the
/// original (treated as an initial).
pub fn tokenize(name: &str) -> Vec<String> {
    let normalized = normalize(name, true);
    let normalized_tokens: Vec<&str> = normalized.split_whitespace().collect();

    let raw_filtered = filter_and_collapse(&any_ascii::any_ascii(name));
    let raw_tokens: Vec<&str> = raw_filtered.split_whitespace().collect();

    normalized_tokens
        .into_iter()
        .zip(raw_tokens)
        .filter(|(norm, raw)| norm.chars().count() > 1 || is_upper_initial(raw))
        .map(|(norm, _)| norm.to_string())
        .collect()
}

fn is_upper_initial(raw_token: &str) -> bool {
    let mut chars = raw_token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => c.is_ascii_uppercase(),
        _ => false,
    }
}

/// Generate up to `max_variants` deterministic spelling/ordering variants
/// of `name` for broader recall. Always includes both prefix-kept and
/// prefix-dropped normalized forms. Bounded: additional variants beyond
/// the cap are discarded, first-seen wins.
pub fn generate_variations(name: &str, max_variants: usize) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let mut seen = std::collections::HashSet::new();
    let mut push = |s: String, out: &mut Vec<String>, seen: &mut std::collections::HashSet<String>| {
        if out.len() >= max_variants {
            return;
        }
        if seen.insert(s.clone()) {
            out.push(s);
        }
    };

    let with_prefixes = normalize(name, true);
    push(with_prefixes.clone(), &mut out, &mut seen);
    push(normalize(name, false), &mut out, &mut seen);

    let words: Vec<&str> = with_prefixes.split_whitespace().collect();
    if words.len() >= 2 {
        let reversed = format!(
            "{} {}",
            words[words.len() - 1],
            words[..words.len() - 1].join(" ")
        );
        push(reversed, &mut out, &mut seen);
        let short = format!("{} {}", words[0], words[words.len() - 1]);
        push(short, &mut out, &mut seen);
    }

    for (i, word) in words.iter().enumerate() {
        if let Some(group) = variant_group(word) {
            for variant in group.iter() {
                let mut new_words = words.clone();
                new_words[i] = variant;
                push(new_words.join(" "), &mut out, &mut seen);
            }
        }
    }

    out
}

/// True if the normalized form contains any corporate-entity indicator,
/// as a whole token or as a substring (matching the original reference
/// implementation's behavior, which checks both).
pub fn is_corporate(name: &str) -> bool {
    let normalized = normalize(name, true);
    let words: Vec<&str> = normalized.split_whitespace().collect();
    CORPORATE_INDICATORS
        .iter()
        .any(|indicator| words.contains(indicator) || normalized.contains(indicator))
}
