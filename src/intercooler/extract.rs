//! Moves intercooler parameters out of a request's parameter bag.

use crate::intercooler::data::{IntercoolerData, UrlMatch};
use crate::intercooler::keys::{IcParam, METHOD_OVERRIDE_PARAM};
use crate::params::{ParameterBag, ParameterBagBuilder};
use crate::routing::Resolver;

/// Result of splitting a parameter bag.
#[derive(Debug, Clone)]
pub struct Extraction {
    /// Parameters left for application code, `ic-*` keys removed.
    pub remaining: ParameterBag,
    /// The extracted intercooler fields.
    pub data: IntercoolerData,
    /// Number of `ic-*` keys that were removed.
    pub removed: usize,
}

/// Split `bag` into application parameters and intercooler data.
///
/// Each recognized `ic-*` key is popped and only its last value kept. The
/// `_method` override is copied but left in place so method-override
/// handling downstream still sees it.
pub fn extract(bag: ParameterBag, resolver: &dyn Resolver, changed_method: bool) -> Extraction {
    let mut remaining = bag.thaw();
    let mut extracted = ParameterBagBuilder::new();
    let mut removed = 0;

    for param in IcParam::ALL {
        if let Some(mut values) = remaining.pop(param.as_str()) {
            extracted.insert(param.as_str(), values.pop().unwrap_or_default());
            removed += 1;
        }
    }

    let method_override = remaining.get(METHOD_OVERRIDE_PARAM).map(str::to_owned);
    let params = extracted.freeze();
    let url = UrlMatch::resolve(params.get(IcParam::CurrentUrl.as_str()), resolver);

    Extraction {
        remaining: remaining.freeze(),
        data: IntercoolerData::new(params, method_override, changed_method, url),
        removed,
    }
}
