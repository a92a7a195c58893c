use std::fmt;

use semver::VersionReq;

use crate::error::VersionError;
use crate::version::SemanticVersion;

const OPERATORS: [&str; 7] = [">=", "<=", ">", "<", "=", "~", "^"];

/// An npm-style range: whitespace-separated comparators form a conjunction and
/// `||` separates alternatives.
///
/// A bare full version means an exact match (`1.2.3` is `=1.2.3`), partial and
/// wildcard versions (`1`, `1.2`, `1.x`, `*`) cover the omitted components, and
/// `a - b` is an inclusive hyphen range.
#[derive(Debug, Clone)]
pub struct VersionRange {
    raw: String,
    alternatives: Vec<VersionReq>,
}

impl VersionRange {
    pub fn parse(input: &str) -> Result<Self, VersionError> {
        let invalid = |reason: String| VersionError::InvalidRange {
            range: input.to_string(),
            reason,
        };
        let mut alternatives = Vec::new();
        for alt in input.split("||") {
            let mut terms = comparator_terms(alt).map_err(invalid)?;
            // semver rejects a bare `*` next to other comparators; in a conjunction it is a no-op.
            terms.retain(|t| t != "*");
            let req = if terms.is_empty() {
                VersionReq::STAR
            } else {
                VersionReq::parse(&terms.join(", ")).map_err(|e| invalid(e.to_string()))?
            };
            alternatives.push(req);
        }
        Ok(Self {
            raw: input.to_string(),
            alternatives,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn matches(&self, version: &SemanticVersion) -> bool {
        match version.to_semver() {
            Ok(v) => self.matches_semver(&v),
            Err(_) => false,
        }
    }

    pub(crate) fn matches_semver(&self, version: &semver::Version) -> bool {
        self.alternatives.iter().any(|req| req.matches(version))
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn comparator_terms(expr: &str) -> Result<Vec<String>, String> {
    let tokens: Vec<&str> = expr.split_whitespace().collect();
    if tokens.len() == 3 && tokens[1] == "-" {
        return hyphen_range(tokens[0], tokens[2]);
    }

    let mut terms = Vec::new();
    let mut iter = tokens.into_iter();
    while let Some(tok) = iter.next() {
        // ">= 1.2.3" arrives as two tokens.
        let tok = if OPERATORS.contains(&tok) {
            match iter.next() {
                Some(next) => format!("{tok}{next}"),
                None => return Err(format!("operator '{tok}' without a version")),
            }
        } else {
            tok.to_string()
        };
        terms.push(comparator(&tok)?);
    }
    Ok(terms)
}

fn comparator(term: &str) -> Result<String, String> {
    if let Some(op) = OPERATORS.iter().find(|op| term.starts_with(**op)) {
        let parts = components(&term[op.len()..])?;
        if parts.is_empty() {
            // ">=*" and friends match everything.
            return Ok("*".to_string());
        }
        return Ok(format!("{op}{}", parts.join(".")));
    }

    let parts = components(term)?;
    Ok(match parts.len() {
        0 => "*".to_string(),
        1 | 2 => format!("{}.*", parts.join(".")),
        _ => format!("={}", parts.join(".")),
    })
}

/// Splits a version into its concrete components, dropping trailing wildcards.
/// Prerelease/build suffixes stay attached to the patch component.
fn components(version: &str) -> Result<Vec<String>, String> {
    let version = version.trim_start_matches('v');
    if version.is_empty() {
        return Err("empty version".to_string());
    }
    let (core, suffix) = match version.find(['-', '+']) {
        Some(idx) => version.split_at(idx),
        None => (version, ""),
    };

    let mut parts: Vec<String> = Vec::new();
    let mut saw_wildcard = false;
    for piece in core.split('.') {
        if matches!(piece, "*" | "x" | "X") {
            saw_wildcard = true;
            continue;
        }
        if saw_wildcard {
            return Err(format!("'{version}' has a concrete component after a wildcard"));
        }
        parts.push(piece.to_string());
    }
    if parts.len() > 3 {
        return Err(format!("'{version}' has too many components"));
    }
    if !suffix.is_empty() {
        if parts.len() != 3 {
            return Err(format!("'{version}' has a prerelease on a partial version"));
        }
        if let Some(last) = parts.last_mut() {
            last.push_str(suffix);
        }
    }
    Ok(parts)
}

fn hyphen_range(lower: &str, upper: &str) -> Result<Vec<String>, String> {
    let mut low = components(lower)?;
    while low.len() < 3 {
        low.push("0".to_string());
    }
    let high = components(upper)?;
    let upper_term = match high.len() {
        0 => return Ok(vec![format!(">={}", low.join("."))]),
        3 => format!("<={}", high.join(".")),
        // "1.2.3 - 2.3" means "< 2.4.0"; "1.2.3 - 2" means "< 3.0.0".
        n => {
            let mut nums = Vec::with_capacity(n);
            for p in &high {
                nums.push(p.parse::<u64>().map_err(|_| format!("invalid component '{p}'"))?);
            }
            if let Some(last) = nums.last_mut() {
                *last += 1;
            }
            while nums.len() < 3 {
                nums.push(0);
            }
            format!("<{}.{}.{}", nums[0], nums[1], nums[2])
        }
    };
    Ok(vec![format!(">={}", low.join(".")), upper_term])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translates_npm_syntax() {
        assert_eq!(comparator_terms(">=1.0.0 <2.0.0").unwrap(), vec![">=1.0.0", "<2.0.0"]);
        assert_eq!(comparator_terms(">= 1.0.0").unwrap(), vec![">=1.0.0"]);
        assert_eq!(comparator_terms("1.2.3").unwrap(), vec!["=1.2.3"]);
        assert_eq!(comparator_terms("1.2").unwrap(), vec!["1.2.*"]);
        assert_eq!(comparator_terms("1.x").unwrap(), vec!["1.*"]);
        assert_eq!(comparator_terms("*").unwrap(), vec!["*"]);
        assert!(comparator_terms("").unwrap().is_empty());
        assert_eq!(
            comparator_terms("1.0.0 - 2.3").unwrap(),
            vec![">=1.0.0", "<2.4.0"]
        );
    }

    #[test]
    fn rejects_dangling_operator() {
        assert!(comparator_terms(">=").is_err());
        assert!(comparator_terms("1.x.3").is_err());
    }
}
