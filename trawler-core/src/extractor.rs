//! Pattern-driven extraction of structured attributes from release titles.
//!
//! Patterns are tried in the order given and the first one that matches wins,
//! so specific patterns must come before general ones that would otherwise
//! swallow their titles.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::Span;

use crate::errors::ScrapeError;
use crate::types::{Category, ExtractedAttributes, RawResult};

/// Quality assumed for releases whose title names none.
pub const DEFAULT_QUALITY: &str = "480p";

/// Language assumed when the caller gives no hint.
pub const DEFAULT_LANGUAGE: &str = "en";

static QUALITY_TAG: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)\b(2160p|1080p|720p|480p|4k|uhd)\b").ok());

const MOVIE_PATTERNS: &[&str] = &[
    // Title (2010) [1080p]
    r"(?i)^(?P<title>.+?)[\s._]*[\[(](?P<year>(?:19|20)\d{2})[\])]",
    // Title.2010.1080p.BluRay
    r"(?i)^(?P<title>.+?)[\s._]+(?P<year>(?:19|20)\d{2})(?:[\s._\-\[]|$)",
];

const SHOW_PATTERNS: &[&str] = &[
    // Title S01E02
    r"(?i)^(?P<title>.+?)[\s._-]+s(?P<season>\d{1,2})[\s._-]?e(?P<episode>\d{1,3})",
    // Title 1x02
    r"(?i)^(?P<title>.+?)[\s._-]+(?P<season>\d{1,2})x(?P<episode>\d{2,3})",
    // [Group] Title - 05 [720p]
    r"^\[[^\]]+\][\s_]*(?P<title>.+?)[\s_]+-[\s_]+(?P<episode>\d{1,4})(?:v\d)?(?:[\s_.\[]|$)",
];

/// A compiled title pattern.
///
/// Must contain a `title` capture group; `year`, `season`, `episode`,
/// `quality` and `language` groups are picked up when present.
#[derive(Debug, Clone)]
pub struct TitlePattern {
    regex: Regex,
}

impl TitlePattern {
    /// Compiles a pattern source.
    ///
    /// # Errors
    /// - `ScrapeError::InvalidPattern` - Source does not compile or has no `title` group
    pub fn new(source: &str) -> Result<Self, ScrapeError> {
        let regex = Regex::new(source).map_err(|e| ScrapeError::InvalidPattern {
            pattern: source.to_string(),
            reason: e.to_string(),
        })?;

        if !regex.capture_names().any(|name| name == Some("title")) {
            return Err(ScrapeError::InvalidPattern {
                pattern: source.to_string(),
                reason: "missing a named 'title' group".to_string(),
            });
        }

        Ok(Self { regex })
    }

    /// Returns the pattern source.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub fn is_match(&self, title: &str) -> bool {
        self.regex.is_match(title)
    }

    fn captures<'t>(&self, title: &'t str) -> Option<Captures<'t>> {
        self.regex.captures(title)
    }
}

/// Ordered list of title patterns with first-match semantics.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<TitlePattern>,
}

impl PatternSet {
    /// Compiles pattern sources, keeping their order.
    ///
    /// # Errors
    /// - `ScrapeError::InvalidPattern` - Any source fails to compile
    pub fn new<'a, I>(sources: I) -> Result<Self, ScrapeError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let patterns = sources
            .into_iter()
            .map(TitlePattern::new)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// Built-in patterns for scene-style movie releases.
    ///
    /// # Errors
    /// - `ScrapeError::InvalidPattern` - Never for the shipped patterns
    pub fn movie_defaults() -> Result<Self, ScrapeError> {
        Self::new(MOVIE_PATTERNS.iter().copied())
    }

    /// Built-in patterns for episodic releases, including fansub naming.
    ///
    /// # Errors
    /// - `ScrapeError::InvalidPattern` - Never for the shipped patterns
    pub fn show_defaults() -> Result<Self, ScrapeError> {
        Self::new(SHOW_PATTERNS.iter().copied())
    }

    /// Built-in patterns for a category.
    ///
    /// # Errors
    /// - `ScrapeError::InvalidPattern` - Never for the shipped patterns
    pub fn defaults_for(category: Category) -> Result<Self, ScrapeError> {
        match category {
            Category::Movie => Self::movie_defaults(),
            Category::Show => Self::show_defaults(),
        }
    }

    /// Appends a pattern with the lowest priority so far.
    pub fn push(&mut self, pattern: TitlePattern) {
        self.patterns.push(pattern);
    }

    /// First pattern, in list order, that matches the title.
    pub fn first_match(&self, title: &str) -> Option<&TitlePattern> {
        self.patterns.iter().find(|pattern| pattern.is_match(title))
    }
}

/// Derives [`ExtractedAttributes`] from raw results.
#[derive(Debug, Clone)]
pub struct Extractor {
    patterns: PatternSet,
    span: Span,
}

impl Extractor {
    /// Creates an extractor logging into the given span.
    pub fn new(patterns: PatternSet, span: Span) -> Self {
        Self { patterns, span }
    }

    /// Extracts attributes from a raw result's title.
    ///
    /// Returns `None` when no pattern matches or the match yields an empty
    /// title. That is an expected outcome: a warning is logged and the caller
    /// drops the item.
    pub fn extract(&self, raw: &RawResult, language: &str) -> Option<ExtractedAttributes> {
        let _entered = self.span.enter();

        let attributes = self
            .patterns
            .first_match(&raw.title)
            .and_then(|pattern| pattern.captures(&raw.title))
            .and_then(|captures| Self::from_captures(&raw.title, &captures, language));

        if attributes.is_none() {
            tracing::warn!("Could not find data from torrent: '{}'", raw.title);
        }

        attributes
    }

    fn from_captures(
        full_title: &str,
        captures: &Captures<'_>,
        language: &str,
    ) -> Option<ExtractedAttributes> {
        let title = clean_title(captures.name("title")?.as_str());
        let slug = slugify(&title);
        if slug.is_empty() {
            return None;
        }

        let number = |group: &str| -> Option<u32> {
            captures.name(group).and_then(|m| m.as_str().parse().ok())
        };

        let quality = captures
            .name("quality")
            .map(|m| normalize_quality(m.as_str()))
            .or_else(|| detect_quality(full_title))
            .unwrap_or_else(|| DEFAULT_QUALITY.to_string());

        let language = captures
            .name("language")
            .map(|m| m.as_str().to_lowercase())
            .unwrap_or_else(|| language.to_string());

        Some(ExtractedAttributes {
            title,
            slug,
            year: captures.name("year").and_then(|m| m.as_str().parse().ok()),
            season: number("season"),
            episode: number("episode"),
            language,
            quality,
        })
    }
}

/// Normalises a captured title into display form.
///
/// Scene names use dots or underscores as separators; those are only
/// replaced when the title has no spaces, so "D.Gray-man" survives.
fn clean_title(raw: &str) -> String {
    let spaced = if raw.contains(' ') {
        raw.to_string()
    } else {
        raw.replace(['.', '_'], " ")
    };

    spaced
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim_end_matches(['-', '(', '['])
        .trim()
        .to_string()
}

/// Lowercases a title and joins its words with dashes.
pub fn slugify(title: &str) -> String {
    title
        .split_whitespace()
        .map(|word| {
            word.chars()
                .filter(|c| !matches!(c, ':' | ',' | '!' | '?' | '"'))
                .flat_map(char::to_lowercase)
                .collect::<String>()
        })
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

fn detect_quality(title: &str) -> Option<String> {
    let regex = QUALITY_TAG.as_ref()?;
    regex
        .find(title)
        .map(|m| normalize_quality(m.as_str()))
}

fn normalize_quality(tag: &str) -> String {
    let lower = tag.to_lowercase();
    match lower.as_str() {
        "4k" | "uhd" => "2160p".to_string(),
        _ => lower,
    }
}
