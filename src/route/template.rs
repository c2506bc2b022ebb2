//! Path template resolution.
//!
//! A raw endpoint path is either absolute (`/...`) or relative. Relative paths
//! are placed into the class's base template at `{user_path}`. The result is
//! normalised into a *template path*, which still carries the `{module}`,
//! `{controller}` and `{version}` placeholders, and then rendered into the
//! *final path* the router serves. Any other `{name}` stays as a path
//! parameter.

use serde::{Deserialize, Serialize};

use super::endpoint::Segments;
use super::error::{RoutingError, RoutingResult};
use crate::naming::{slugify_with, DEFAULT_SEPARATOR};

pub const MODULE: &str = "{module}";
pub const CONTROLLER: &str = "{controller}";
pub const VERSION: &str = "{version}";
pub const USER_PATH: &str = "{user_path}";

pub const DEFAULT_BASE_TEMPLATE: &str = "/{module}/{controller}/v{version}/{user_path}";
pub const DEFAULT_VERSION: &str = "1.0";

const MODULE_SEGMENT: &str = "/{module}";

/// What to do when a template uses `{module}` but the class has no module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModulePolicy {
    /// Drop the `/{module}` segment.
    #[default]
    Elide,
    /// Fail the class build.
    Reject,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    pub expanded_template: String,
    pub template_path: String,
    pub final_path: String,
    pub segments: Segments,
}

/// A piece of a scanned template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Piece<'a> {
    Literal(&'a str),
    /// Inner text of a `{...}` span, without braces.
    Param(&'a str),
}

/// Splits a template into literal and `{...}` spans.
pub(crate) fn scan(template: &str) -> Result<Vec<Piece<'_>>, String> {
    let mut pieces = Vec::new();
    let mut rest = template;
    while !rest.is_empty() {
        match (rest.find('{'), rest.find('}')) {
            (None, None) => {
                pieces.push(Piece::Literal(rest));
                break;
            }
            (None, Some(at)) => {
                return Err(format!(
                    "unmatched '}}' at byte {}",
                    template.len() - rest.len() + at
                ))
            }
            (Some(open), close) => {
                if let Some(close) = close {
                    if close < open {
                        return Err(format!(
                            "unmatched '}}' at byte {}",
                            template.len() - rest.len() + close
                        ));
                    }
                }
                if open > 0 {
                    pieces.push(Piece::Literal(&rest[..open]));
                }
                let tail = &rest[open + 1..];
                let end = tail
                    .find(|c: char| c == '{' || c == '}')
                    .filter(|&i| tail.as_bytes()[i] == b'}')
                    .ok_or_else(|| {
                        format!("unclosed '{{' at byte {}", template.len() - rest.len() + open)
                    })?;
                let name = &tail[..end];
                if name.is_empty() {
                    return Err("empty placeholder '{}'".to_string());
                }
                pieces.push(Piece::Param(name));
                rest = &tail[end + 1..];
            }
        }
    }
    Ok(pieces)
}

/// Removes the module segment from a template whose module is empty.
pub(crate) fn elide_module(template: &str) -> String {
    template.replace(MODULE_SEGMENT, "").replace(MODULE, "")
}

/// Renders a template path into a final path.
///
/// Only the spans produced by `{module}`, `{controller}` and `{version}` are
/// replaced; literal text and other parameters are copied through untouched.
pub(crate) fn render(pieces: &[Piece<'_>], segments: &Segments, separator: char) -> String {
    let mut out = String::new();
    for piece in pieces {
        match piece {
            Piece::Literal(text) => out.push_str(text),
            Piece::Param("module") => out.push_str(&slugify_with(&segments.module, separator)),
            Piece::Param("controller") => {
                out.push_str(&slugify_with(&segments.controller, separator))
            }
            Piece::Param("version") => out.push_str(&segments.version.to_lowercase()),
            Piece::Param(name) => {
                out.push('{');
                out.push_str(name);
                out.push('}');
            }
        }
    }
    out
}

/// Resolves raw endpoint paths against a base template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResolver {
    base_template: String,
    policy: ModulePolicy,
    separator: char,
}

impl Default for PathResolver {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_TEMPLATE)
    }
}

impl PathResolver {
    pub fn new(base_template: impl Into<String>) -> Self {
        Self {
            base_template: base_template.into(),
            policy: ModulePolicy::default(),
            separator: DEFAULT_SEPARATOR,
        }
    }

    pub fn with_policy(mut self, policy: ModulePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    pub fn base_template(&self) -> &str {
        &self.base_template
    }

    pub fn policy(&self) -> ModulePolicy {
        self.policy
    }

    pub fn separator(&self) -> char {
        self.separator
    }

    pub fn resolve(&self, raw: &str, segments: &Segments) -> RoutingResult<ResolvedPath> {
        let expanded = self.expand(raw, &segments.controller)?;
        self.finish(expanded, segments)
    }

    /// Places a relative path into the base template.
    fn expand(&self, raw: &str, controller: &str) -> RoutingResult<String> {
        if raw.starts_with('/') {
            return Ok(raw.to_string());
        }
        if !self.base_template.contains(USER_PATH) {
            return Err(RoutingError::MissingUserPath {
                controller: controller.to_string(),
                template: self.base_template.clone(),
                path: raw.to_string(),
            });
        }
        Ok(self.base_template.replace(USER_PATH, raw))
    }

    /// Normalises an expanded template and renders it with `segments`.
    ///
    /// Also used to re-derive inherited endpoints, so a module that was elided
    /// for the parent comes back when a child sets one.
    pub(crate) fn finish(&self, expanded: String, segments: &Segments) -> RoutingResult<ResolvedPath> {
        let mut template = expanded.clone();
        if template.contains(MODULE) && segments.module.is_empty() {
            match self.policy {
                ModulePolicy::Elide => template = elide_module(&template),
                ModulePolicy::Reject => {
                    return Err(RoutingError::MissingModule {
                        controller: segments.controller.clone(),
                        template,
                    })
                }
            }
        }
        if template.len() > 1 && template.ends_with('/') {
            template.pop();
        }
        if !template.starts_with('/') {
            template.insert(0, '/');
        }

        let pieces = scan(&template).map_err(|reason| RoutingError::InvalidPath {
            controller: segments.controller.clone(),
            path: template.clone(),
            reason,
        })?;
        let final_path = render(&pieces, segments, self.separator);

        Ok(ResolvedPath {
            expanded_template: expanded,
            template_path: template,
            final_path,
            segments: segments.clone(),
        })
    }
}

/// Resolves `raw` for one controller with the default module policy and separator.
pub fn resolve(
    raw: &str,
    controller: &str,
    module: &str,
    version: &str,
    base_template: &str,
) -> RoutingResult<ResolvedPath> {
    PathResolver::new(base_template).resolve(raw, &Segments::new(module, controller, version))
}
