//! Rule-string grammar.
//!
//! ```text
//! spec    := segment ( "|" segment )*
//! segment := name ( ":" args )?
//! args    := arg ( "," arg )*
//! ```
//!
//! Names and arguments are trimmed. Empty segments are skipped, so `"a||b"`
//! and `"|a|"` parse like `"a|b"` and `"a"`. Only the first `:` of a segment
//! separates the name from its arguments; later colons belong to the
//! arguments. Every rule splits its arguments on commas, `pattern`
//! included; build a [`RuleSpec`] directly to pass a parameter that must
//! keep its commas.
//!
//! Unknown names are accepted here and rejected later by the registry.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::foundation::{ConfigError, Result};

// ============================================================================
// RULE SPEC
// ============================================================================

/// Ordered mapping from rule name to its positional parameters.
///
/// Iteration follows insertion order; re-inserting a name replaces its
/// parameters but keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSpec {
    rules: IndexMap<String, Vec<String>>,
}

impl RuleSpec {
    /// Creates an empty spec.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a rule string such as `"required|min:3|in:a,b"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ruleset_validator::RuleSpec;
    ///
    /// let spec = RuleSpec::parse("required | between:10, 20").unwrap();
    /// assert_eq!(spec.get("required"), Some(&[][..]));
    /// assert_eq!(spec.get("between"), Some(&["10".to_owned(), "20".to_owned()][..]));
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        let mut spec = Self::new();

        for segment in input.split('|') {
            if segment.trim().is_empty() {
                continue;
            }
            let (name, params) = parse_segment(input, segment)?;
            spec.insert(name, params);
        }

        Ok(spec)
    }

    /// Parses a single `name:args` segment and appends it.
    ///
    /// Unlike [`parse`](Self::parse), `|` is not a separator here, so
    /// `"pattern:/^(a|b)$/"` keeps its alternation.
    pub fn push_segment(&mut self, segment: &str) -> Result<()> {
        if segment.trim().is_empty() {
            return Err(ConfigError::malformed(segment, "empty rule"));
        }
        let (name, params) = parse_segment(segment, segment)?;
        self.insert(name, params);
        Ok(())
    }

    /// Appends a rule, or replaces the parameters of an existing one.
    pub fn insert(&mut self, name: impl Into<String>, params: Vec<String>) {
        self.rules.insert(name.into(), params);
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use = "builder methods must be chained or built"]
    pub fn with<I, S>(mut self, name: impl Into<String>, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(name, params.into_iter().map(Into::into).collect());
        self
    }

    /// Parameters of the named rule, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.rules.get(name).map(Vec::as_slice)
    }

    /// Returns `true` if this contains the named rule.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Iterates `(name, params)` in specification order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.rules
            .iter()
            .map(|(name, params)| (name.as_str(), params.as_slice()))
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if there are no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn parse_segment<'a>(input: &str, segment: &'a str) -> Result<(&'a str, Vec<String>)> {
    let (name, args) = match segment.split_once(':') {
        Some((name, args)) => (name.trim(), Some(args)),
        None => (segment.trim(), None),
    };

    if name.is_empty() {
        return Err(ConfigError::malformed(
            input,
            format!("segment `{}` has an empty rule name", segment.trim()),
        ));
    }

    Ok((name, parse_args(args)))
}

fn parse_args(args: Option<&str>) -> Vec<String> {
    let Some(args) = args else {
        return Vec::new();
    };

    let args = args.trim();
    if args.is_empty() {
        return Vec::new();
    }

    args.split(',').map(|arg| arg.trim().to_owned()).collect()
}

impl FromStr for RuleSpec {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Serializes back to the rule-string grammar.
///
/// The output parses to a structurally equal spec as long as no parameter
/// contains `|` (or `,` outside `pattern`).
impl fmt::Display for RuleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, params)) in self.rules.iter().enumerate() {
            if i > 0 {
                f.write_str("|")?;
            }
            f.write_str(name)?;
            if !params.is_empty() {
                write!(f, ":{}", params.join(","))?;
            }
        }
        Ok(())
    }
}

impl<K, V, S> FromIterator<(K, V)> for RuleSpec
where
    K: Into<String>,
    V: IntoIterator<Item = S>,
    S: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            rules: iter
                .into_iter()
                .map(|(name, params)| (name.into(), params.into_iter().map(Into::into).collect()))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RuleSpec {
    type Item = (&'a String, &'a Vec<String>);
    type IntoIter = indexmap::map::Iter<'a, String, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

// ============================================================================
// TESTS
// ============================================================================
