// Vue extractor regex patterns

use regex::Regex;
use std::sync::LazyLock;

/// Opening tag of a top-level section; group 1 is the tag, group 2 its attributes.
pub(super) static SECTION_START_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<(template|script|style)(\s[^>]*)?>").unwrap());

pub(super) static LANG_ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"lang=["']?([^"'\s>]+)"#).unwrap());

/// Keys of a component options object whose members are methods.
pub(super) const COMPONENT_METHOD_SECTIONS: &[&str] = &["methods", "computed", "watch"];
