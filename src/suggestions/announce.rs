use super::aggregator::AccessibleCounts;

/// Picks the singular or plural phrase for a count
pub trait PhraseFormatter {
    fn format(&self, singular: &str, plural: &str, count: usize) -> String;
}

/// English pluralization: singular only for exactly one
#[derive(Debug, Default, Clone, Copy)]
pub struct EnglishPhrases;

impl PhraseFormatter for EnglishPhrases {
    fn format(&self, singular: &str, plural: &str, count: usize) -> String {
        if count == 1 {
            singular.to_string()
        } else {
            plural.to_string()
        }
    }
}

/// Screen-reader text for the panel
///
/// The recent-search phrase is left out when there are none; the
/// autocomplete phrase is always present.
pub fn announcement(counts: &AccessibleCounts, formatter: &dyn PhraseFormatter) -> String {
    let recent = if counts.recent > 0 {
        formatter.format(
            &format!("{} recent search found.", counts.recent),
            &format!("{} recent searches found.", counts.recent),
            counts.recent,
        )
    } else {
        String::new()
    };

    let autocomplete = formatter.format(
        &format!("{} autocomplete suggestion found.", counts.autocomplete),
        &format!("{} autocomplete suggestions found.", counts.autocomplete),
        counts.autocomplete,
    );

    format!("{} {}", recent, autocomplete).trim().to_string()
}
