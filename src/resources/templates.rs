//! Fixed HTML templates for the index page, directory listings, and error
//! pages.
//!
//! The index and directory-listing pages share a footer; the index header
//! additionally references `static/bootstrap.min.css` and
//! `static/logo_en.svg`.

use crate::config::PAGE_TITLE;
use crate::http::types::StatusCode;

pub const FOOTER: &str = "  </div>\n</body>\n</html>\n";

/// The error page: code and reason phrase each appear twice, once in
/// `<title>`, once in `<h1>`.
pub fn error_page(code: StatusCode) -> String {
    let n = code.code();
    let reason = code.reason();
    format!(
        "<html>\n\
         <head>\n\
         \x20 <title>{n} {reason}</title>\n\
         </head>\n\
         <body>\n\
         \x20 <center><h1>{n} {reason}</h1></center>\n\
         \x20 <hr>\n\
         \x20 <center>cifar-server</center>\n\
         <center><b>{server}</b></center>\n\
         </body>\n\
         </html>\n",
        server = crate::config::SERVER_HEADER_LINE,
    )
}

fn page_head(extra: &str) -> String {
    format!(
        "<html>\n\
         <head>\n\
         \x20 <title>{PAGE_TITLE}</title>\n\
         \x20 <meta charset=\"utf-8\">\n\
         \x20 <meta name=\"viewport\" content=\"width=device-width, initial-scale=1, shrink-to-fit=no\">\n\
         {extra}\
         \x20 <style>.pic {{ width: 48px; height: 48px; }}</style></head>\n\
         <body>\n\
         \x20 <div class=\"container\">\n"
    )
}

fn index_header() -> String {
    page_head(
        "  <link rel=\"stylesheet\" href=\"static/bootstrap.min.css\">\n",
    ) + &format!(
        "    <img src=\"static/logo_en.svg\" width=\"232\" height=\"97\" class=\"float-right\">\n    <h1>{PAGE_TITLE}</h1>\n"
    )
}

fn dir_header() -> String {
    page_head("") + &format!("    <h1>{PAGE_TITLE}</h1>\n")
}

/// Builds the index page for `page` showing records `[img, img+100)`.
pub fn index_page(page: i64, records_per_page: usize, num_pages: i64, table_side: usize) -> String {
    let img_start = page * records_per_page as i64;
    let mut body = index_header();
    body.push_str(&format!("<h3>Page {page}</h3>\n"));
    body.push_str("<div class=\"form-group\">\n<table>\n");

    let mut img = img_start;
    for _ in 0..table_side {
        body.push_str("<tr>\n");
        for _ in 0..table_side {
            body.push_str(&format!(
                "<td><img class=\"pic\" src=\"images/{img}.bmp\" alt=\"#{img}\"></td>"
            ));
            img += 1;
        }
        body.push_str("</tr>\n");
    }
    body.push_str("</table>\n</div>\n");

    let prev = if page > 0 { page - 1 } else { num_pages - 1 };
    let next = if page + 1 < num_pages { page + 1 } else { 0 };
    body.push_str("<div class=\"form-group\">\n");
    body.push_str(&format!(
        "<a href=\"?page={prev}\" class=\"btn btn-secondary\">Previous</a>\n"
    ));
    body.push_str(&format!(
        "<a href=\"?page={next}\" class=\"btn btn-primary\">Next</a>\n"
    ));
    body.push_str("</div>\n");

    body.push_str(FOOTER);
    body
}

/// Builds the directory-listing page header; entries are appended by the
/// caller (recursion lives in `static_files`, which knows the filesystem).
pub fn dir_listing_header(path_requested: &str) -> String {
    let mut body = dir_header();
    body.push_str(&format!("<h3>Dir {path_requested} listing:</h3>\n"));
    body.push_str("<div class=\"form-group\">\n");
    body
}

pub fn dir_listing_footer() -> String {
    format!("</div>\n{FOOTER}")
}
