//! `Link` header pagination

use std::collections::HashMap;

/// Parses an RFC 8288 `Link` header into `rel -> url`
///
/// Entries without a `rel` parameter are skipped. A later entry with the
/// same `rel` replaces an earlier one.
pub fn parse_link_header(header: &str) -> HashMap<String, String> {
    let mut links = HashMap::new();
    for part in header.split(',') {
        let mut pieces = part.split(';');
        let Some(target) = pieces.next() else {
            continue;
        };
        let url = target.trim().trim_start_matches('<').trim_end_matches('>');
        if url.is_empty() {
            continue;
        }

        for param in pieces {
            let param = param.trim();
            if let Some(rel) = param.strip_prefix("rel=") {
                let rel = rel.trim_matches('"');
                for name in rel.split_whitespace() {
                    links.insert(name.to_string(), url.to_string());
                }
            }
        }
    }
    links
}

/// URL of the next page, if the header advertises one
pub fn next_link(header: Option<&str>) -> Option<String> {
    header.and_then(|h| parse_link_header(h).remove("next"))
}
