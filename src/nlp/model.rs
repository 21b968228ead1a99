// English language model: tokenization, sentence segmentation, stop words and
// the pattern/gazetteer entity pipeline. Built once at startup and shared read-only.
use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::path::Path;

static TOKEN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\w+(?:['’]\w+)*|[^\w\s]").unwrap());

static PERSON_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Z][a-z]+(?:\s+[A-Z]\.)?(?:\s+[A-Z][a-z]+)+\b").unwrap()
});

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}\b").unwrap()
});

static DATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:\d{1,2}[/-]\d{1,2}[/-]\d{2,4}|\d{4}[/-]\d{1,2}[/-]\d{1,2}|(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*\.?\s+\d{1,2}(?:st|nd|rd|th)?,?\s+\d{4})\b").unwrap()
});

static MONEY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\s*\d+(?:,\d{3})*(?:\.\d{2})?(?:\s+(?:million|billion|trillion))?|\b\d+(?:,\d{3})*(?:\.\d{2})?\s*(?:USD|EUR|GBP|dollars?|euros?|pounds?)\b").unwrap()
});

const PUNCTUATION: &str = r##"!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~"##;

const SENTENCE_TERMINATORS: [char; 3] = ['.', '!', '?'];

// Closing marks that stay attached to the sentence they end.
const SENTENCE_CLOSERS: [char; 5] = ['"', '\'', ')', '”', '’'];

const DEFAULT_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all",
    "almost", "alone", "along", "already", "also", "although", "always", "am", "among",
    "amongst", "an", "and", "another", "any", "anyhow", "anyone", "anything", "anyway",
    "anywhere", "are", "around", "as", "at", "back", "be", "became", "because", "become",
    "becomes", "been", "before", "beforehand", "behind", "being", "below", "beside",
    "besides", "between", "beyond", "both", "but", "by", "ca", "call", "can", "cannot",
    "could", "did", "do", "does", "doing", "done", "down", "due", "during", "each",
    "either", "else", "elsewhere", "enough", "even", "ever", "every", "everyone",
    "everything", "everywhere", "except", "few", "first", "for", "former", "formerly",
    "from", "front", "full", "further", "get", "give", "go", "had", "has", "have", "he",
    "hence", "her", "here", "hereafter", "hereby", "herein", "hers", "herself", "him",
    "himself", "his", "how", "however", "i", "if", "in", "indeed", "into", "is", "it",
    "its", "itself", "just", "keep", "last", "latter", "least", "less", "made", "make",
    "many", "may", "me", "meanwhile", "might", "mine", "more", "moreover", "most",
    "mostly", "move", "much", "must", "my", "myself", "n't", "name", "namely", "neither",
    "never", "nevertheless", "next", "no", "nobody", "none", "noone", "nor", "not",
    "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto",
    "or", "other", "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own",
    "part", "per", "perhaps", "please", "put", "quite", "rather", "re", "really", "regarding",
    "same", "say", "see", "seem", "seemed", "seeming", "seems", "several", "she", "should",
    "show", "side", "since", "so", "some", "somehow", "someone", "something", "sometime",
    "sometimes", "somewhere", "still", "such", "take", "than", "that", "the", "their",
    "them", "themselves", "then", "thence", "there", "thereafter", "thereby", "therefore",
    "therein", "thereupon", "these", "they", "this", "those", "though", "through",
    "throughout", "thru", "thus", "to", "together", "too", "top", "toward", "towards",
    "under", "unless", "until", "up", "upon", "us", "used", "using", "various", "very",
    "via", "was", "we", "well", "were", "what", "whatever", "when", "whence", "whenever",
    "where", "whereafter", "whereas", "whereby", "wherein", "whereupon", "wherever",
    "whether", "which", "while", "whither", "who", "whoever", "whole", "whom", "whose",
    "why", "will", "with", "within", "without", "would", "yet", "you", "your", "yours",
    "yourself", "yourselves", "'s", "'m", "'re", "'ve", "'d", "'ll",
];

const DEFAULT_LOCATIONS: &[&str] = &[
    "United States", "USA", "UK", "United Kingdom", "America", "Canada", "Mexico", "Brazil",
    "France", "Germany", "Italy", "Spain", "China", "Japan", "India", "Russia", "Australia",
    "Egypt", "Kenya", "Nigeria", "Iran", "Israel", "Ukraine", "Europe", "Africa", "Asia",
    "New York", "California", "Texas", "Florida", "Hawaii", "Alaska", "Illinois", "Ohio",
    "Washington", "London", "Paris", "Berlin", "Rome", "Madrid", "Tokyo", "Beijing",
    "Moscow", "Sydney", "Toronto", "Chicago", "Los Angeles", "San Francisco", "Boston",
    "Seattle", "Miami", "Austin", "Denver", "Portland", "Atlanta", "Honolulu",
];

// Words ending in `.` that do not close a sentence. Stored without the dot.
const DEFAULT_ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "mt", "rev", "capt", "lt", "sgt",
    "gov", "sen", "pres", "vs", "e.g", "i.e", "approx", "fig",
    "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec",
];

// Capitalized words that start sentences but never begin a name.
const NAME_OPENERS: &[&str] = &[
    "yesterday", "today", "tomorrow", "tonight", "dear", "hello", "hi", "thanks",
    "congratulations", "monday", "tuesday", "wednesday", "thursday", "friday", "saturday",
    "sunday",
];

const DEFAULT_ORG_SUFFIXES: &[&str] = &[
    "Inc", "LLC", "Corp", "Corporation", "Ltd", "Limited", "Company", "Co", "Group",
    "Institute", "University", "College", "Foundation", "Association", "Agency", "Bank",
];

/// Entity categories produced by the entity pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityLabel {
    Person,
    Org,
    Gpe,
    Date,
    Money,
    Email,
}

impl EntityLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityLabel::Person => "PERSON",
            EntityLabel::Org => "ORG",
            EntityLabel::Gpe => "GPE",
            EntityLabel::Date => "DATE",
            EntityLabel::Money => "MONEY",
            EntityLabel::Email => "EMAIL",
        }
    }
}

impl fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    pub label: EntityLabel,
    #[serde(skip)]
    pub start: usize,
}

/// A word or punctuation token borrowed from the analyzed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub start: usize,
}

impl Token<'_> {
    pub fn lower(&self) -> String {
        self.text.to_lowercase()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sentence<'a> {
    pub text: &'a str,
    pub start: usize,
}

// On-disk model overrides. Absent keys keep the built-in English data.
#[derive(Debug, Default, Deserialize)]
struct ModelFile {
    stop_words: Option<Vec<String>>,
    locations: Option<Vec<String>>,
    org_suffixes: Option<Vec<String>>,
    abbreviations: Option<Vec<String>>,
}

#[derive(Debug)]
pub struct LanguageModel {
    stop_words: HashSet<String>,
    abbreviations: HashSet<String>,
    // None when the model carries no entries for that gazetteer.
    location_pattern: Option<Regex>,
    org_pattern: Option<Regex>,
}

impl LanguageModel {
    /// Built-in English model.
    pub fn english() -> Result<Self> {
        Self::build(
            DEFAULT_STOP_WORDS.iter().map(|s| s.to_string()).collect(),
            DEFAULT_LOCATIONS.iter().map(|s| s.to_string()).collect(),
            DEFAULT_ORG_SUFFIXES.iter().map(|s| s.to_string()).collect(),
            DEFAULT_ABBREVIATIONS.iter().map(|s| s.to_string()).collect(),
        )
    }

    /// Load a model from a JSON file, falling back to the English defaults
    /// for any list the file leaves out.
    pub fn from_file(path: &Path) -> Result<Self> {
        let f = File::open(path)
            .with_context(|| format!("failed to open model file {}", path.display()))?;
        let file: ModelFile = serde_json::from_reader(f)
            .with_context(|| format!("invalid model file {}", path.display()))?;

        let defaults = |list: &[&str]| list.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        Self::build(
            file.stop_words.unwrap_or_else(|| defaults(DEFAULT_STOP_WORDS)),
            file.locations.unwrap_or_else(|| defaults(DEFAULT_LOCATIONS)),
            file.org_suffixes.unwrap_or_else(|| defaults(DEFAULT_ORG_SUFFIXES)),
            file.abbreviations.unwrap_or_else(|| defaults(DEFAULT_ABBREVIATIONS)),
        )
    }

    fn build(
        stop_words: Vec<String>,
        mut locations: Vec<String>,
        org_suffixes: Vec<String>,
        abbreviations: Vec<String>,
    ) -> Result<Self> {
        // Longest names first so a multi-word name wins over any shorter entry inside it.
        locations.sort_by(|a, b| b.len().cmp(&a.len()));
        let location_pattern = alternation(&locations)
            .map(|names| Regex::new(&format!(r"\b(?:{})\b", names)))
            .transpose()
            .context("failed to compile location gazetteer")?;

        let org_pattern = alternation(&org_suffixes)
            .map(|suffixes| {
                Regex::new(&format!(r"\b[A-Z][\w&]*(?:\s+[A-Z][\w&]*)*\s+(?:{})\b\.?", suffixes))
            })
            .transpose()
            .context("failed to compile organization pattern")?;

        Ok(Self {
            stop_words: stop_words.into_iter().map(|w| w.to_lowercase()).collect(),
            abbreviations: abbreviations
                .iter()
                .map(|a| a.trim().trim_end_matches('.').to_lowercase())
                .filter(|a| !a.is_empty())
                .collect(),
            location_pattern,
            org_pattern,
        })
    }

    pub fn tokens<'a>(&self, text: &'a str) -> Vec<Token<'a>> {
        TOKEN_PATTERN
            .find_iter(text)
            .map(|m| Token { text: m.as_str(), start: m.start() })
            .collect()
    }

    /// Split on runs of `.`, `!` or `?` followed by whitespace or end of text.
    /// A lone `.` after a known abbreviation or a single capital letter other
    /// than "I" ("Dr.", "U.S.", "J.") does not end a sentence. Trailing text without a
    /// terminator forms the last sentence.
    pub fn sentences<'a>(&self, text: &'a str) -> Vec<Sentence<'a>> {
        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let mut sentences = Vec::new();
        let mut start = 0;
        let mut i = 0;

        while i < chars.len() {
            if !SENTENCE_TERMINATORS.contains(&chars[i].1) {
                i += 1;
                continue;
            }
            let mut j = i + 1;
            while j < chars.len()
                && (SENTENCE_TERMINATORS.contains(&chars[j].1) || SENTENCE_CLOSERS.contains(&chars[j].1))
            {
                j += 1;
            }
            if j < chars.len() && j == i + 1 && chars[i].1 == '.' && self.is_abbreviation(text, &chars, i) {
                i = j;
                continue;
            }
            if j == chars.len() || chars[j].1.is_whitespace() {
                let end = chars.get(j).map(|(pos, _)| *pos).unwrap_or(text.len());
                push_sentence(text, start, end, &mut sentences);
                start = end;
            }
            i = j;
        }
        push_sentence(text, start, text.len(), &mut sentences);
        sentences
    }

    // The word directly before the `.` at `chars[dot]`, which may contain
    // inner dots ("U.S", "e.g").
    fn is_abbreviation(&self, text: &str, chars: &[(usize, char)], dot: usize) -> bool {
        let mut k = dot;
        while k > 0 && (chars[k - 1].1.is_alphanumeric() || chars[k - 1].1 == '.') {
            k -= 1;
        }
        let word = text[chars[k].0..chars[dot].0].trim_start_matches('.');
        if word.is_empty() {
            return false;
        }
        let last = word.rsplit('.').next().unwrap_or(word);
        let mut last_chars = last.chars();
        let single_capital = matches!(
            (last_chars.next(), last_chars.next()),
            (Some(c), None) if c.is_uppercase() && c != 'I'
        );
        single_capital || self.abbreviations.contains(&word.to_lowercase())
    }

    /// Expects a lower-cased word.
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    pub fn is_punctuation(&self, token: &str) -> bool {
        let mut chars = token.chars();
        matches!((chars.next(), chars.next()), (Some(c), None) if PUNCTUATION.contains(c))
    }

    /// Run the entity pipeline. Matches are claimed in priority order
    /// (email, date, money, location, organization, person); a match that
    /// overlaps an already claimed span is dropped. Output is in document order.
    pub fn entities(&self, text: &str) -> Vec<Entity> {
        let passes: [(Option<&Regex>, EntityLabel); 6] = [
            (Some(&*EMAIL_PATTERN), EntityLabel::Email),
            (Some(&*DATE_PATTERN), EntityLabel::Date),
            (Some(&*MONEY_PATTERN), EntityLabel::Money),
            (self.location_pattern.as_ref(), EntityLabel::Gpe),
            (self.org_pattern.as_ref(), EntityLabel::Org),
            (Some(&*PERSON_PATTERN), EntityLabel::Person),
        ];

        let mut claimed: Vec<(usize, usize, EntityLabel)> = Vec::new();
        for (pattern, label) in passes {
            let Some(pattern) = pattern else {
                continue;
            };
            for m in pattern.find_iter(text) {
                let (start, end) = if label == EntityLabel::Person {
                    match self.person_span(text, m.start(), m.end()) {
                        Some(span) => span,
                        None => continue,
                    }
                } else {
                    (m.start(), m.end())
                };
                let overlaps = claimed.iter().any(|(s, e, _)| start < *e && *s < end);
                if !overlaps {
                    claimed.push((start, end, label));
                }
            }
        }

        claimed.sort_by_key(|(start, _, _)| *start);
        claimed
            .into_iter()
            .map(|(start, end, label)| Entity {
                text: text[start..end].to_string(),
                label,
                start,
            })
            .collect()
    }

    // Drops leading stop words and sentence openers from a name match
    // ("Yesterday Barack Obama"). None when fewer than two words remain.
    fn person_span(&self, text: &str, mut start: usize, end: usize) -> Option<(usize, usize)> {
        loop {
            let span = &text[start..end];
            let first_len = span.find(char::is_whitespace)?;
            let first = span[..first_len].to_lowercase();
            if !self.is_stop_word(&first) && !NAME_OPENERS.contains(&first.as_str()) {
                return Some((start, end));
            }
            let rest = &span[first_len..];
            start += first_len + (rest.len() - rest.trim_start().len());
        }
    }
}

// None when no usable entries remain.
fn alternation(words: &[String]) -> Option<String> {
    let escaped: Vec<String> = words
        .iter()
        .filter(|w| !w.trim().is_empty())
        .map(|w| regex::escape(w.trim()))
        .collect();
    if escaped.is_empty() {
        None
    } else {
        Some(escaped.join("|"))
    }
}

fn push_sentence<'a>(text: &'a str, start: usize, end: usize, out: &mut Vec<Sentence<'a>>) {
    let raw = &text[start..end];
    let trimmed = raw.trim_start();
    let offset = start + (raw.len() - trimmed.len());
    let trimmed = trimmed.trim_end();
    if !trimmed.is_empty() {
        out.push(Sentence { text: trimmed, start: offset });
    }
}
