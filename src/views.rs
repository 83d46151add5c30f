//! Server-rendered HTML pages.
//!
//! The listing page shows one card per repository, the detail page shows every release
//! of one repository with a direct and an accelerated link for each file.

use crate::links::mirror_url;
use crate::releases::{Release, RepositoryResult};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters `encodeURIComponent` leaves untouched, besides ASCII alphanumerics.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const NO_FILES_PLACEHOLDER: &str = "No files available for this release";

pub fn render_listing(results: &[RepositoryResult]) -> String {
    let mut body = String::from("<h1>Mirror downloads</h1>\n");

    if results.is_empty() {
        body.push_str("<p class=\"empty\">No repositories available</p>\n");
    } else {
        body.push_str("<div class=\"repos\">\n");
        for result in results {
            body.push_str(&format!(
                concat!(
                    "<a class=\"repo\" href=\"/repo/{href}\">",
                    "<h2>{name}</h2><p>{repo}</p><span>{count} releases</span></a>\n"
                ),
                href = escape_html(&encode_component(&result.repo)),
                name = escape_html(result.display_name()),
                repo = escape_html(&result.repo),
                count = result.release_count(),
            ));
        }
        body.push_str("</div>\n");
    }

    body.push_str("<footer><p>The itch mirror syncs once a day.</p></footer>\n");
    page("Mirror downloads", &body)
}

/// Renders a successfully fetched repository. `releases` keep upstream order.
pub fn render_detail(repo: &str, releases: &[Release]) -> String {
    let mut body = String::from("<a class=\"back\" href=\"/\">Back</a>\n");
    body.push_str(&format!(
        "<h1>{}</h1>\n<p>{} releases</p>\n",
        escape_html(repo),
        releases.len()
    ));

    for release in releases {
        body.push_str(&format!(
            "<section class=\"release\">\n<h3>Release {}</h3>\n<ul>\n",
            escape_html(&release.tag)
        ));

        if release.assets.is_empty() {
            body.push_str(&format!("<li class=\"empty\">{NO_FILES_PLACEHOLDER}</li>\n"));
        } else {
            for asset in &release.assets {
                push_download_row(&mut body, &asset.name, &asset.url);
            }
        }
        push_download_row(&mut body, "Source code (zip)", &release.source_zip);
        push_download_row(&mut body, "Source code (tar.gz)", &release.source_tar);

        body.push_str("</ul>\n</section>\n");
    }

    page(repo, &body)
}

fn push_download_row(out: &mut String, label: &str, url: &str) {
    out.push_str(&format!(
        concat!(
            "<li><span>{label}</span> ",
            "<a href=\"{direct}\" target=\"_blank\" rel=\"noopener noreferrer\">Direct download</a> ",
            "<a href=\"{mirror}\" target=\"_blank\" rel=\"noopener noreferrer\">Accelerated download</a></li>\n"
        ),
        label = escape_html(label),
        direct = escape_html(url),
        mirror = escape_html(&mirror_url(url)),
    ));
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n</head>\n<body>\n<main>\n{}</main>\n</body>\n</html>\n",
        escape_html(title),
        body
    )
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Percent-encodes a path segment the way `encodeURIComponent` does.
pub fn encode_component(s: &str) -> String {
    utf8_percent_encode(s, COMPONENT).to_string()
}
