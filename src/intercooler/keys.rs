//! Names of the intercooler.js request parameters and headers.

use std::fmt;

use axum::http::HeaderName;

/// Parameters the intercooler.js client adds to every request it issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IcParam {
    CurrentUrl,
    ElementId,
    ElementName,
    Id,
    PromptValue,
    TargetId,
    TriggerId,
    TriggerName,
    Request,
}

impl IcParam {
    /// Every recognized parameter, in extraction order.
    pub const ALL: [IcParam; 9] = [
        IcParam::CurrentUrl,
        IcParam::ElementId,
        IcParam::ElementName,
        IcParam::Id,
        IcParam::PromptValue,
        IcParam::TargetId,
        IcParam::TriggerId,
        IcParam::TriggerName,
        IcParam::Request,
    ];

    /// Wire name of the parameter.
    pub const fn as_str(&self) -> &'static str {
        match self {
            IcParam::CurrentUrl => "ic-current-url",
            IcParam::ElementId => "ic-element-id",
            IcParam::ElementName => "ic-element-name",
            IcParam::Id => "ic-id",
            IcParam::PromptValue => "ic-prompt-value",
            IcParam::TargetId => "ic-target-id",
            IcParam::TriggerId => "ic-trigger-id",
            IcParam::TriggerName => "ic-trigger-name",
            IcParam::Request => "ic-request",
        }
    }

    /// Look a parameter up by wire name (case-sensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == name)
    }
}

impl fmt::Display for IcParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Legacy HTTP method override parameter. Read, never removed.
pub const METHOD_OVERRIDE_PARAM: &str = "_method";

/// Parameter carrying the CSS selector for fragment selection.
pub const SELECT_FROM_RESPONSE_PARAM: &str = "ic-select-from-response";

/// Request header set by intercooler.js.
pub const X_IC_REQUEST: HeaderName = HeaderName::from_static("x-ic-request");

/// Request header set by jQuery for asynchronous requests.
pub const X_REQUESTED_WITH: HeaderName = HeaderName::from_static("x-requested-with");

/// Response header carrying a translated redirect target.
pub const X_IC_REDIRECT: HeaderName = HeaderName::from_static("x-ic-redirect");

/// Response header asking the client to push a URL into history.
pub const X_IC_PUSH_URL: HeaderName = HeaderName::from_static("x-ic-pushurl");

/// Response header naming the fragment of the body the client should keep.
pub const X_IC_SELECT_FROM_RESPONSE: HeaderName =
    HeaderName::from_static("x-ic-select-from-response");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for param in IcParam::ALL {
            assert_eq!(IcParam::from_name(param.as_str()), Some(param));
        }
        assert_eq!(IcParam::from_name("IC-ID"), None);
        assert_eq!(IcParam::from_name(METHOD_OVERRIDE_PARAM), None);
    }
}
