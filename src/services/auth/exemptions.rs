//! Route exemption rules: which (method, path) pairs skip the bearer check.
//!
//! Rules are built once from the API prefix and never change afterwards.
//! Matching is a pure function of the rule list and the request line.

use axum::http::Method;
use regex::Regex;

#[derive(Debug, Clone)]
pub enum ExemptionRule {
    /// Path must equal this string verbatim. Any method.
    ExactPath(String),
    /// Whole path must match the pattern and the method must be listed.
    PatternPath { pattern: Regex, methods: Vec<Method> },
}

impl ExemptionRule {
    pub fn exact(path: impl Into<String>) -> Self {
        Self::ExactPath(path.into())
    }

    /// `pattern` is anchored on both ends before compiling.
    pub fn pattern(pattern: &str, methods: &[Method]) -> Result<Self, regex::Error> {
        let anchored = format!(
            "^(?:{})$",
            pattern.trim_start_matches('^').trim_end_matches('$')
        );
        Ok(Self::PatternPath {
            pattern: Regex::new(&anchored)?,
            methods: methods.to_vec(),
        })
    }

    /// Public read access to a collection and everything below it.
    pub fn read_only_tree(base: &str) -> Result<Self, regex::Error> {
        Self::pattern(
            &format!("{}(?:/.*)?", regex::escape(base)),
            &[Method::GET, Method::OPTIONS],
        )
    }

    pub fn matches(&self, method: &Method, path: &str) -> bool {
        match self {
            Self::ExactPath(exact) => exact == path,
            Self::PatternPath { pattern, methods } => {
                methods.contains(method) && pattern.is_match(path)
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Exemptions {
    rules: Vec<ExemptionRule>,
}

impl Exemptions {
    pub fn new(rules: Vec<ExemptionRule>) -> Self {
        Self { rules }
    }

    /// Catalog reads plus login/registration, all under `api_prefix`.
    pub fn for_api(api_prefix: &str) -> Result<Self, regex::Error> {
        Ok(Self::new(vec![
            ExemptionRule::read_only_tree(&format!("{api_prefix}/products"))?,
            ExemptionRule::read_only_tree(&format!("{api_prefix}/categories"))?,
            ExemptionRule::exact(format!("{api_prefix}/users/login")),
            ExemptionRule::exact(format!("{api_prefix}/users/register")),
        ]))
    }

    /// First matching rule wins; no rule means the request must authenticate.
    pub fn is_exempt(&self, method: &Method, path: &str) -> bool {
        self.rules.iter().any(|rule| rule.matches(method, path))
    }
}
