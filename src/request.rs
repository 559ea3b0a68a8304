// SPDX-FileCopyrightText: 2025 Greenbone AG
//
// SPDX-License-Identifier: GPL-2.0-or-later

use std::collections::HashMap;

/// Decodes an `application/x-www-form-urlencoded` body into a field map.
///
/// Decode failures are turned into ready made error responses so that the
/// entrypoint can return them directly.
pub async fn form_request(
    response: &crate::response::Response,
    req: hyper::Request<hyper::Body>,
) -> Result<HashMap<String, String>, crate::response::Result> {
    let bytes = match hyper::body::to_bytes(req.into_body()).await {
        Ok(bytes) => bytes,
        Err(e) => {
            return Err(response.internal_server_error(&e));
        }
    };
    match std::str::from_utf8(&bytes) {
        Ok(raw) => Ok(parse_form(raw)),
        Err(_) => Err(response.bad_request("The form body must be valid UTF-8.")),
    }
}

fn parse_form(raw: &str) -> HashMap<String, String> {
    raw.split('&')
        .filter(|pair| !pair.is_empty())
        .filter_map(|pair| {
            let mut kv = pair.splitn(2, '=');
            let key = kv.next()?;
            // browsers encode spaces as '+' in form bodies
            let value = kv.next().unwrap_or_default().replace('+', " ");
            let key = urlencoding::decode(key).ok()?;
            let value = urlencoding::decode(&value).ok()?;
            Some((key.into_owned(), value.into_owned()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::parse_form;

    #[test]
    fn decodes_fields() {
        let fields = parse_form("target=127.0.0.1&note=hello+there%21");
        assert_eq!(fields.get("target").map(String::as_str), Some("127.0.0.1"));
        assert_eq!(fields.get("note").map(String::as_str), Some("hello there!"));
    }

    #[test]
    fn tolerates_empty_and_valueless_pairs() {
        let fields = parse_form("&target=scanme.example&flag");
        assert_eq!(
            fields.get("target").map(String::as_str),
            Some("scanme.example")
        );
        assert_eq!(fields.get("flag").map(String::as_str), Some(""));
    }

    #[test]
    fn decodes_percent_escapes_in_keys() {
        let fields = parse_form("ta%72get=h%C3%A9");
        assert_eq!(fields.get("target").map(String::as_str), Some("hé"));
    }
}
