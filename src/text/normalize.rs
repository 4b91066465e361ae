//! Text normalization into layout-eligible tokens
//!
//! Every character outside the configured alphabet is replaced by a space,
//! the result is split on whitespace and tokens below the minimum length are
//! dropped. Length is counted in characters, not bytes.

use crate::io::configuration::{ANALYZER_MIN_TOKEN_CHARS, FALLBACK_MIN_TOKEN_CHARS};
use crate::io::error::{CloudError, Result, invalid_parameter};
use regex::Regex;

/// Alphabet kept by the normalizer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Script {
    /// Precomposed Hangul syllables only; Latin letters and digits are dropped
    #[default]
    Hangul,
    /// Hangul syllables plus ASCII letters
    HangulLatin,
}

impl Script {
    /// Parse a configuration value
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "hangul" => Some(Self::Hangul),
            "hangul-latin" | "hangul_latin" => Some(Self::HangulLatin),
            _ => None,
        }
    }

    const fn rejected_pattern(self) -> &'static str {
        match self {
            Self::Hangul => r"[^가-힣\s]",
            Self::HangulLatin => r"[^가-힣A-Za-z\s]",
        }
    }
}

/// Tokenization rules shared by both token sources
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenPolicy {
    /// Alphabet kept by the normalizer
    pub script: Script,
    /// Minimum length for tokens split from raw text
    pub fallback_min_chars: usize,
    /// Minimum length for tokens returned by the analysis service
    pub analyzer_min_chars: usize,
}

impl Default for TokenPolicy {
    fn default() -> Self {
        Self {
            script: Script::default(),
            fallback_min_chars: FALLBACK_MIN_TOKEN_CHARS,
            analyzer_min_chars: ANALYZER_MIN_TOKEN_CHARS,
        }
    }
}

/// Applies a [`TokenPolicy`] to raw text or pre-split tokens
#[derive(Debug, Clone)]
pub struct Normalizer {
    policy: TokenPolicy,
    rejected: Regex,
}

impl Normalizer {
    /// Compile the character filter for a policy
    ///
    /// # Errors
    ///
    /// Returns an error if the policy's character class fails to compile
    pub fn new(policy: TokenPolicy) -> Result<Self> {
        let pattern = policy.script.rejected_pattern();
        let rejected = Regex::new(pattern)
            .map_err(|e| invalid_parameter("script", &pattern, &e))?;
        Ok(Self { policy, rejected })
    }

    /// Policy this normalizer applies
    pub const fn policy(&self) -> &TokenPolicy {
        &self.policy
    }

    /// Replace every rejected character with a space
    pub fn clean(&self, text: &str) -> String {
        self.rejected.replace_all(text, " ").into_owned()
    }

    /// Split raw text into tokens using the fallback minimum length
    ///
    /// # Errors
    ///
    /// Returns [`CloudError::EmptyInput`] if no token survives
    pub fn normalize(&self, text: &str) -> Result<Vec<String>> {
        let tokens = Self::split_eligible(&self.clean(text), self.policy.fallback_min_chars);
        if tokens.is_empty() {
            return Err(CloudError::EmptyInput {
                input_chars: text.chars().count(),
            });
        }
        Ok(tokens)
    }

    /// Clean tokens produced elsewhere using the analyzer minimum length
    ///
    /// A token containing rejected characters may split into several.
    pub fn filter_tokens<I, S>(&self, tokens: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        tokens
            .into_iter()
            .flat_map(|token| {
                Self::split_eligible(&self.clean(token.as_ref()), self.policy.analyzer_min_chars)
            })
            .collect()
    }

    fn split_eligible(cleaned: &str, min_chars: usize) -> Vec<String> {
        cleaned
            .split_whitespace()
            .filter(|token| token.chars().count() >= min_chars.max(1))
            .map(str::to_owned)
            .collect()
    }
}
