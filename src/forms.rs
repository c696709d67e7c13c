//! Decoding of captured `application/x-www-form-urlencoded` POST bodies.

/// Collects every submitted value of the `folders[]` field. Falls back to
/// the bare `folders` field when the bracketed name yields nothing, matching
/// hosts that strip the array suffix before handing the body over.
#[must_use]
pub fn folder_names(body: &str) -> Vec<String> {
    let primary = values_for(body, "folders[]");
    if !primary.is_empty() {
        return primary;
    }
    values_for(body, "folders")
}

/// Extracts the first value of a single named field (e.g. the CSRF token).
#[must_use]
pub fn field(body: &str, name: &str) -> Option<String> {
    values_for(body, name).into_iter().next()
}

fn values_for(body: &str, name: &str) -> Vec<String> {
    body.split('&')
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            if decode(key) == name {
                Some(decode(value))
            } else {
                None
            }
        })
        .collect()
}

/// Percent-decodes a form-encoded component. `+` means space; malformed
/// escapes are passed through untouched rather than rejected, since the
/// folder-name validation downstream is the real gate.
fn decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' => {
                if i + 2 < bytes.len()
                    && let (Some(hi), Some(lo)) =
                        (hex_val(bytes[i + 1]), hex_val(bytes[i + 2]))
                {
                    out.push(hi * 16 + lo);
                    i += 3;
                } else {
                    out.push(b'%');
                    i += 1;
                }
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }

    String::from_utf8_lossy(&out).into_owned()
}

fn hex_val(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_bracketed_folder_values() {
        let body = "csrf_token=abc&folders%5B%5D=.OldModule&folders%5B%5D=.Other";
        assert_eq!(folder_names(body), vec![".OldModule", ".Other"]);
    }

    #[test]
    fn test_literal_bracket_key_also_accepted() {
        let body = "folders[]=.OldModule";
        assert_eq!(folder_names(body), vec![".OldModule"]);
    }

    #[test]
    fn test_falls_back_to_bare_folders_field() {
        let body = "folders=.OldModule&folders=.Other";
        assert_eq!(folder_names(body), vec![".OldModule", ".Other"]);
    }

    #[test]
    fn test_primary_field_suppresses_fallback() {
        let body = "folders%5B%5D=.Primary&folders=.Fallback";
        assert_eq!(folder_names(body), vec![".Primary"]);
    }

    #[test]
    fn test_empty_body_yields_no_names() {
        assert!(folder_names("").is_empty());
        assert!(folder_names("unrelated=value").is_empty());
    }

    #[test]
    fn test_field_extracts_token() {
        let body = "module_cleaner_token=deadbeef&folders%5B%5D=.X";
        assert_eq!(field(body, "module_cleaner_token").as_deref(), Some("deadbeef"));
        assert_eq!(field(body, "missing"), None);
    }

    #[test]
    fn test_percent_and_plus_decoding() {
        assert_eq!(decode(".My%2FModule"), ".My/Module");
        assert_eq!(decode("a+b"), "a b");
        assert_eq!(decode("%41%62"), "Ab");
    }

    #[test]
    fn test_malformed_escape_passes_through() {
        assert_eq!(decode("%"), "%");
        assert_eq!(decode("%Z1"), "%Z1");
        assert_eq!(decode("%4"), "%4");
    }
}
