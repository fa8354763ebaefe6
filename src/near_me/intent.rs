/// Decides whether a query needs the user's location
pub trait NearMeIntent: Send + Sync {
    fn is_near_me(&self, query: &str) -> bool;
}

const DEFAULT_PHRASES: &[&str] = &[
    "near me",
    "nearby",
    "near by",
    "closest",
    "nearest",
    "around me",
    "close to me",
];

/// Matches whole-word phrases such as "near me" or "closest"
///
/// Case, punctuation, and repeated whitespace are ignored.
#[derive(Debug, Clone)]
pub struct PhraseNearMeIntent {
    phrases: Vec<String>,
}

impl Default for PhraseNearMeIntent {
    fn default() -> Self {
        Self::new(DEFAULT_PHRASES.iter().copied())
    }
}

impl PhraseNearMeIntent {
    pub fn new<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            phrases: phrases
                .into_iter()
                .map(|p| normalize(p.as_ref()))
                .filter(|p| !p.trim().is_empty())
                .collect(),
        }
    }
}

/// Lowercase, punctuation to spaces, padded so phrases match on word boundaries
fn normalize(text: &str) -> String {
    let words: Vec<String> = text
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect();
    format!(" {} ", words.join(" "))
}

impl NearMeIntent for PhraseNearMeIntent {
    fn is_near_me(&self, query: &str) -> bool {
        let query = normalize(query);
        self.phrases.iter().any(|phrase| query.contains(phrase.as_str()))
    }
}
