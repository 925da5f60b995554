//! HTML rendering for the username form and the franchise report.

use std::fmt::Write;

use crate::franchise::FranchiseReport;

const STYLE: &str = "body{font-family:sans-serif;max-width:48rem;margin:2rem auto;padding:0 1rem}\
details{margin:.5rem 0}summary{cursor:pointer}.total{color:#555}";

pub fn render(username: Option<&str>, report: Option<&FranchiseReport>) -> String {
    let mut html = String::with_capacity(4096);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Franchise watch time</title>\n");
    let _ = writeln!(html, "<style>{}</style>\n</head>\n<body>", STYLE);
    html.push_str("<h1>Franchise watch time</h1>\n");
    let _ = writeln!(
        html,
        "<form method=\"post\" action=\"/\">\n<input name=\"username\" placeholder=\"AniList username\" value=\"{}\" required>\n<button type=\"submit\">Analyze</button>\n</form>",
        escape(username.unwrap_or_default())
    );

    if let (Some(username), Some(report)) = (username, report) {
        render_report(&mut html, username, report);
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn render_report(html: &mut String, username: &str, report: &FranchiseReport) {
    let _ = writeln!(
        html,
        "<h2>{}: {} franchises</h2>\n<p class=\"total\">Total watch time: {}</p>",
        escape(username),
        report.count,
        escape(&report.total_time)
    );
    if report.franchises.is_empty() {
        html.push_str("<p>No watched anime found.</p>\n");
        return;
    }

    html.push_str("<ol>\n");
    for franchise in &report.franchises {
        let _ = writeln!(
            html,
            "<li><details><summary>{} <span class=\"total\">({})</span></summary>\n<ul>",
            escape(&franchise.franchise_name),
            escape(&franchise.total_time)
        );
        for entry in &franchise.titles {
            let _ = writeln!(
                html,
                "<li>{} &middot; {}</li>",
                escape(&entry.title),
                escape(&entry.time_spent)
            );
        }
        html.push_str("</ul></details></li>\n");
    }
    html.push_str("</ol>\n");
}

fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
