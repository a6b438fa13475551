//! Rewriting of relative service addresses against the request URL.
//!
//! # Design Decisions
//! - Only `location` attributes of `address` elements (`soap:address`,
//!   `soap12:address`, any prefix) are rewritten; `wsdl:import` and
//!   `schemaLocation` references are left alone
//! - Absolute locations are kept as they are
//! - Text scan rather than XML parsing; the rest of the document passes through untouched

use url::Url;

const ATTRIBUTE: &str = "location=";
const ADDRESS_ELEMENT: &str = "address";

/// Resolve every relative service address in `source` against `base`.
pub fn transform_locations(source: &str, base: &Url) -> String {
    let mut output = String::with_capacity(source.len());
    let mut copied = 0;
    let mut search = 0;

    while let Some(pos) = find_attribute(source, search) {
        let value_start = pos + ATTRIBUTE.len();
        search = value_start;
        if !in_address_element(&source[..pos]) {
            continue;
        }
        let quote = match source[value_start..].chars().next() {
            Some(q @ ('"' | '\'')) => q,
            _ => continue,
        };
        let Some(len) = source[value_start + 1..].find(quote) else {
            break;
        };

        let value = &source[value_start + 1..value_start + 1 + len];
        output.push_str(&source[copied..value_start + 1]);
        output.push_str(&resolve(value, base));
        output.push(quote);
        copied = value_start + 2 + len;
        search = copied;
    }

    output.push_str(&source[copied..]);
    output
}

/// Position of the next `location=` at or after `from` that starts a new attribute.
fn find_attribute(text: &str, from: usize) -> Option<usize> {
    let mut offset = from;
    while let Some(found) = text[offset..].find(ATTRIBUTE) {
        let pos = offset + found;
        let preceded_by_space = text[..pos]
            .chars()
            .next_back()
            .is_some_and(char::is_whitespace);
        if preceded_by_space {
            return Some(pos);
        }
        offset = pos + ATTRIBUTE.len();
    }
    None
}

/// Whether the still-open tag at the end of `before` is an `address` element.
fn in_address_element(before: &str) -> bool {
    let Some(open) = before.rfind('<') else {
        return false;
    };
    let tag = &before[open + 1..];
    if tag.contains('>') {
        return false;
    }
    let name = tag
        .split(|c: char| c.is_whitespace() || c == '/')
        .next()
        .unwrap_or_default();
    let local_name = name.rsplit_once(':').map_or(name, |(_, local)| local);
    local_name == ADDRESS_ELEMENT
}

fn resolve(location: &str, base: &Url) -> String {
    if Url::parse(location).is_ok() {
        return location.to_string();
    }
    match base.join(location) {
        Ok(resolved) => resolved.to_string(),
        Err(e) => {
            tracing::debug!(location = %location, error = %e, "Leaving unresolvable location unchanged");
            location.to_string()
        }
    }
}
