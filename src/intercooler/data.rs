//! Structured view over the intercooler parameters of one request.

use std::fmt;

use url::{ParseError, Url};

use crate::error::IntercoolerError;
use crate::intercooler::keys::IcParam;
use crate::params::ParameterBag;
use crate::routing::{Resolver, RouteMatch};

/// Origin used to resolve relative `ic-current-url` values.
const PLACEHOLDER_ORIGIN: &str = "http://localhost/";

/// A name/id pair describing a DOM element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameId {
    pub name: Option<String>,
    pub id: Option<String>,
}

/// The page URL a request was issued from, and the route it resolves to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlMatch {
    pub url: Option<Url>,
    pub route: Option<RouteMatch>,
}

impl UrlMatch {
    /// Parse and resolve a raw `ic-current-url` value.
    ///
    /// Missing, blank or unparsable values give an empty match; a URL whose
    /// path resolves to nothing keeps the URL with `route: None`.
    pub fn resolve(raw: Option<&str>, resolver: &dyn Resolver) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return Self::default();
        };

        let (url, absolute) = match Url::parse(raw) {
            Ok(url) => (Some(url), true),
            Err(ParseError::RelativeUrlWithoutBase) => (
                Url::parse(PLACEHOLDER_ORIGIN).and_then(|base| base.join(raw)).ok(),
                false,
            ),
            Err(_) => (None, false),
        };

        // `Url` normalizes an empty path to "/", so ask the raw text instead.
        let route = url
            .as_ref()
            .filter(|_| has_path(raw, absolute))
            .and_then(|url| resolver.resolve(url.path()));

        Self { url, route }
    }
}

/// Whether `raw` spells out a path, ignoring query and fragment.
fn has_path(raw: &str, absolute: bool) -> bool {
    let rest = if absolute {
        raw.split_once(':').map_or(raw, |(_, rest)| rest)
    } else {
        raw
    };
    let rest = rest.split(['?', '#']).next().unwrap_or_default();
    match rest.strip_prefix("//") {
        Some(authority_and_path) => authority_and_path.contains('/'),
        None => !rest.is_empty(),
    }
}

/// The intercooler fields extracted from a request.
///
/// Built once when the request is admitted and shared read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntercoolerData {
    params: ParameterBag,
    method_override: Option<String>,
    changed_method: bool,
    url: UrlMatch,
}

impl IntercoolerData {
    pub(crate) fn new(
        params: ParameterBag,
        method_override: Option<String>,
        changed_method: bool,
        url: UrlMatch,
    ) -> Self {
        Self {
            params,
            method_override,
            changed_method,
            url,
        }
    }

    /// Raw value of a recognized parameter.
    pub fn get(&self, param: IcParam) -> Option<&str> {
        self.params.get(param.as_str())
    }

    /// The extracted parameters as a bag.
    pub fn params(&self) -> &ParameterBag {
        &self.params
    }

    pub fn url(&self) -> &UrlMatch {
        &self.url
    }

    pub fn current_url(&self) -> &UrlMatch {
        self.url()
    }

    pub fn element(&self) -> NameId {
        self.name_id(IcParam::ElementName, IcParam::ElementId)
    }

    pub fn trigger(&self) -> NameId {
        self.name_id(IcParam::TriggerName, IcParam::TriggerId)
    }

    /// Request sequence number. intercooler.js calls it a UUID but it is a
    /// counter incremented per request; absent means 0. Values outside the
    /// `i128` range are rejected as invalid.
    pub fn id(&self) -> Result<i128, IntercoolerError> {
        match self.get(IcParam::Id) {
            None => Ok(0),
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|source| IntercoolerError::InvalidId {
                    value: raw.to_string(),
                    source,
                }),
        }
    }

    /// True when `ic-request` carries any non-empty value.
    pub fn request(&self) -> bool {
        self.get(IcParam::Request).is_some_and(|v| !v.is_empty())
    }

    pub fn target_id(&self) -> Option<&str> {
        self.get(IcParam::TargetId)
    }

    pub fn prompt_value(&self) -> Option<&str> {
        self.get(IcParam::PromptValue)
    }

    /// Legacy `_method` override as sent, if any.
    pub fn method_override(&self) -> Option<&str> {
        self.method_override.as_deref()
    }

    /// Whether an earlier layer already rewrote the request method.
    pub fn changed_method(&self) -> bool {
        self.changed_method
    }

    fn name_id(&self, name: IcParam, id: IcParam) -> NameId {
        NameId {
            name: self.get(name).map(str::to_owned),
            id: self.get(id).map(str::to_owned),
        }
    }
}

impl fmt::Display for IntercoolerData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<IntercoolerData: id=")?;
        match self.id() {
            Ok(id) => write!(f, "{id}")?,
            Err(_) => write!(f, "{:?}", self.get(IcParam::Id).unwrap_or_default())?,
        }
        write!(
            f,
            ", request={}, target_id={:?}, element={:?}, trigger={:?}, prompt_value={:?}, url={:?}>",
            self.request(),
            self.target_id(),
            self.element(),
            self.trigger(),
            self.prompt_value(),
            self.url.url.as_ref().map(Url::as_str),
        )
    }
}
