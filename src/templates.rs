// SPDX-FileCopyrightText: 2025 Greenbone AG
//
// SPDX-License-Identifier: GPL-2.0-or-later

//! Renders the HTML pages of the portal.
//!
//! Every value that ends up in a page goes through [`escape`]; the scan
//! report is untrusted input like everything else.

use crate::platform::ScanReport;

const STYLE: &str = "\
body { font-family: sans-serif; margin: 2em auto; max-width: 60em; color: #222; }\
h1 { color: #356; }\
table { border-collapse: collapse; width: 100%; }\
th, td { border: 1px solid #ccc; padding: 0.4em 0.6em; text-align: left; }\
th { background: #eef; }\
.rating-HIGH, .rating-CRITICAL { color: #a00; font-weight: bold; }\
.rating-LOW { color: #580; }\
.error { color: #a00; }\
pre { background: #f6f6f6; padding: 1em; overflow-x: auto; }\
form input[type=text] { width: 24em; padding: 0.3em; }";

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title} - Scan Portal</title>\n<style>{STYLE}</style>\n</head>\n\
         <body>\n<h1>{title}</h1>\n{body}\n\
         <p><a href=\"/\">Back to start</a></p>\n</body>\n</html>\n",
        title = escape(title),
        body = body,
    )
}

pub fn home() -> String {
    let body = "<p>Submit a target to trigger a scan job.</p>\n\
         <form action=\"/scan\" method=\"post\">\n\
         <label for=\"target\">Target</label>\n\
         <input type=\"text\" id=\"target\" name=\"target\" \
         placeholder=\"e.g. 192.168.0.1 or scanme.example\">\n\
         <button type=\"submit\">Start scan</button>\n</form>\n\
         <h2>Jobs</h2>\n<p>No scans submitted yet.</p>"
        .to_string();
    page("Scan Portal", &body)
}

pub fn scan_started(target: &str, execution_id: &str) -> String {
    let body = format!(
        "<p>Scan for <strong>{}</strong> has been triggered.</p>\n\
         <p>Execution id: <code>{}</code></p>\n\
         <p>The job writes its results when it finishes. \
         <a href=\"/results/{}\">View results</a></p>",
        escape(target),
        escape(execution_id),
        escape(execution_id),
    );
    page("Scan started", &body)
}

pub fn error(message: &str) -> String {
    let body = format!("<p class=\"error\">{}</p>", escape(message));
    page("Error", &body)
}

pub fn results(execution_id: &str, report: &ScanReport, enriched: bool) -> String {
    let status = report
        .get("scanStatus")
        .and_then(|s| s.as_str())
        .unwrap_or("UNKNOWN");
    let mut body = format!(
        "<p>Execution id: <code>{}</code></p>\n<p>Status: <strong>{}</strong></p>\n",
        escape(execution_id),
        escape(status),
    );
    if enriched {
        body.push_str("<p>Findings annotated with intelligence risk scores where available.</p>\n");
    }
    body.push_str("<h2>Findings</h2>\n");
    match report.get("scanFindings").and_then(|f| f.as_array()) {
        Some(findings) if !findings.is_empty() => {
            body.push_str(
                "<table>\n<tr><th>CVE</th><th>Title</th><th>Rating</th>\
                 <th>Risk score</th><th>Description</th></tr>\n",
            );
            for finding in findings {
                body.push_str(&finding_row(finding));
            }
            body.push_str("</table>\n");
        }
        _ => body.push_str("<p>No findings reported.</p>\n"),
    }
    body.push_str("<h2>Raw report</h2>\n");
    let raw = serde_json::to_string_pretty(report).unwrap_or_default();
    body.push_str(&format!("<pre>{}</pre>", escape(&raw)));
    page("Scan results", &body)
}

fn finding_row(finding: &serde_json::Value) -> String {
    let vuln = finding.get("vulnerability");
    let field = |name: &str| {
        vuln.and_then(|v| v.get(name))
            .and_then(|f| f.as_str())
            .unwrap_or("-")
            .to_string()
    };
    let rating = field("rating");
    // the placeholder enrichment never sets this, but render it if a report
    // already carries a score
    let score = vuln
        .and_then(|v| v.get("gtiRiskScore"))
        .map(|s| s.to_string())
        .unwrap_or_else(|| "-".to_string());
    format!(
        "<tr><td>{}</td><td>{}</td><td class=\"rating-{}\">{}</td><td>{}</td><td>{}</td></tr>\n",
        escape(&field("cveId")),
        escape(&field("title")),
        escape(&rating),
        escape(&rating),
        escape(&score),
        escape(&field("description")),
    )
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape("<script>\"&'</script>"),
            "&lt;script&gt;&quot;&amp;&#39;&lt;/script&gt;"
        );
    }

    #[test]
    fn home_offers_the_scan_form() {
        let html = home();
        assert!(html.contains("action=\"/scan\""));
        assert!(html.contains("name=\"target\""));
    }

    #[test]
    fn scan_started_links_to_results() {
        let html = scan_started("scanme.example", "abc-123");
        assert!(html.contains("/results/abc-123"));
        assert!(html.contains("scanme.example"));
    }

    #[test]
    fn scan_started_escapes_the_target() {
        let html = scan_started("<img src=x>", "abc-123");
        assert!(!html.contains("<img src=x>"));
        assert!(html.contains("&lt;img src=x&gt;"));
    }

    #[test]
    fn results_renders_findings_table() {
        let report = serde_json::json!({
            "scanStatus": "COMPLETED",
            "scanFindings": [
                { "vulnerability": {
                    "cveId": "CVE-2023-1234",
                    "title": "Mock Vulnerability in Test",
                    "rating": "HIGH",
                    "description": "simulated"
                } }
            ]
        });
        let html = results("abc-123", &report, true);
        assert!(html.contains("CVE-2023-1234"));
        assert!(html.contains("COMPLETED"));
        assert!(html.contains("rating-HIGH"));
    }

    #[test]
    fn results_tolerates_schemaless_reports() {
        let report = serde_json::json!({"somethingElse": 42});
        let html = results("abc-123", &report, false);
        assert!(html.contains("UNKNOWN"));
        assert!(html.contains("No findings reported."));
    }
}
