//! Bigraph vertex naming conventions.
//!
//! Bigraph encoders communicate the interface of a graph through vertex
//! names: roots are called `ROOT<k>`, closed links `C_LINK_<k>`, and link
//! ports carry their port number either as a prefix (`L3_x`, `C3_x`) or
//! between delimiters (`:OPX:x:3:`, `:CLX:3:`). All decoders here are total:
//! a name that does not follow the convention yields `None`.

use lazy_static::lazy_static;
use regex::Regex;

use crate::LinkScheme;

const ROOT_PREFIX: &str = "ROOT";
const CLOSED_LINK_PREFIX: &str = "C_LINK";
/// Closed link names carry one separator character after the prefix.
const CLOSED_LINK_INDEX_OFFSET: usize = 7;

lazy_static! {
    static ref PREFIXED_OPEN: Regex =
        Regex::new(r"^L(\d+)_.*$").expect("valid prefixed open port regex");
    static ref PREFIXED_ANY: Regex =
        Regex::new(r"^(?:L|C)(\d+)_.*$").expect("valid prefixed port regex");
    static ref DELIMITED_OPEN: Regex =
        Regex::new(r"^:OPX:[^:]*:(\d+):.*$").expect("valid delimited open port regex");
    static ref DELIMITED_CLOSED: Regex =
        Regex::new(r"^:CLX:(\d+):.*$").expect("valid delimited closed port regex");
}

fn capture_number(re: &Regex, name: &str) -> Option<usize> {
    re.captures(name)?.get(1)?.as_str().parse().ok()
}

fn leading_number(s: &str) -> Option<usize> {
    let end = s
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(s.len(), |(i, _)| i);
    s[..end].parse().ok()
}

/// The root index `k` of a vertex named `ROOT<k>`.
pub fn root_index(name: &str) -> Option<usize> {
    leading_number(name.strip_prefix(ROOT_PREFIX)?)
}

/// Whether the name marks a closed link vertex.
pub fn is_closed_link(name: &str) -> bool {
    name.starts_with(CLOSED_LINK_PREFIX)
}

/// The link index of a closed link vertex named `C_LINK_<k>`.
pub fn closed_link_index(name: &str) -> Option<usize> {
    if !is_closed_link(name) {
        return None;
    }
    leading_number(name.get(CLOSED_LINK_INDEX_OFFSET..)?)
}

/// The port number of an open port name.
pub fn open_port(name: &str, scheme: LinkScheme) -> Option<usize> {
    match scheme {
        LinkScheme::Prefixed => capture_number(&PREFIXED_OPEN, name),
        LinkScheme::Delimited => capture_number(&DELIMITED_OPEN, name),
        LinkScheme::Either => open_port(name, LinkScheme::Prefixed)
            .or_else(|| open_port(name, LinkScheme::Delimited)),
    }
}

/// The port number of an open or closed port name.
pub fn any_port(name: &str, scheme: LinkScheme) -> Option<usize> {
    match scheme {
        LinkScheme::Prefixed => capture_number(&PREFIXED_ANY, name),
        LinkScheme::Delimited => capture_number(&DELIMITED_OPEN, name)
            .or_else(|| capture_number(&DELIMITED_CLOSED, name)),
        LinkScheme::Either => any_port(name, LinkScheme::Prefixed)
            .or_else(|| any_port(name, LinkScheme::Delimited)),
    }
}
