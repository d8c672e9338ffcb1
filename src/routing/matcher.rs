//! Path pattern matching.
//!
//! # Responsibilities
//! - Compile route patterns such as `/users/{id}/` or `/static/{*path}`
//! - Match a request path segment by segment
//! - Collect captured parameters in pattern order
//!
//! # Design Decisions
//! - Path matching is case-sensitive
//! - No regex to guarantee O(n) matching
//! - A catch-all capture is only allowed as the last segment

use std::fmt;

/// One compiled segment of a route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
    CatchAll(String),
}

/// Error raised when a pattern cannot be compiled.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    #[error("pattern {0:?} must start with '/'")]
    MissingLeadingSlash(String),
    #[error("pattern {0:?} has an empty capture name")]
    EmptyCapture(String),
    #[error("pattern {0:?} has a catch-all capture before the last segment")]
    CatchAllNotLast(String),
}

/// A compiled route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    raw: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// Compile a pattern.
    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        let rest = pattern
            .strip_prefix('/')
            .ok_or_else(|| PatternError::MissingLeadingSlash(pattern.to_string()))?;

        let parts: Vec<&str> = if rest.is_empty() {
            Vec::new()
        } else {
            rest.split('/').collect()
        };

        let mut segments = Vec::with_capacity(parts.len());
        for (i, part) in parts.iter().enumerate() {
            let segment = match part.strip_prefix('{').and_then(|p| p.strip_suffix('}')) {
                Some(capture) => {
                    if let Some(name) = capture.strip_prefix('*') {
                        if i + 1 != parts.len() {
                            return Err(PatternError::CatchAllNotLast(pattern.to_string()));
                        }
                        if name.is_empty() {
                            return Err(PatternError::EmptyCapture(pattern.to_string()));
                        }
                        Segment::CatchAll(name.to_string())
                    } else {
                        if capture.is_empty() {
                            return Err(PatternError::EmptyCapture(pattern.to_string()));
                        }
                        Segment::Param(capture.to_string())
                    }
                }
                None => Segment::Literal(part.to_string()),
            };
            segments.push(segment);
        }

        Ok(Self {
            raw: pattern.to_string(),
            segments,
        })
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Match `path`, returning the captured parameters on success.
    pub fn matches(&self, path: &str) -> Option<Vec<(String, String)>> {
        let rest = path.strip_prefix('/')?;
        let parts: Vec<&str> = if rest.is_empty() {
            Vec::new()
        } else {
            rest.split('/').collect()
        };

        let mut params = Vec::new();
        let mut i = 0;
        for segment in &self.segments {
            match segment {
                Segment::Literal(expected) => {
                    if parts.get(i) != Some(&expected.as_str()) {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    let value = parts.get(i).filter(|p| !p.is_empty())?;
                    params.push((name.clone(), (*value).to_string()));
                }
                Segment::CatchAll(name) => {
                    let value = parts.get(i..).map(|tail| tail.join("/")).unwrap_or_default();
                    params.push((name.clone(), value));
                    return Some(params);
                }
            }
            i += 1;
        }

        (i == parts.len()).then_some(params)
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
