use anyhow::{Context, Result};
use chrono::Local;
use std::path::{Path, PathBuf};

use crate::data::records::PromiseRecord;
use crate::render::{escape_html, title_case};
use crate::report::templates::{REPORT_CSS, REPORT_SEARCH_SCRIPT};

/// Generate a self-contained HTML report for the subset. Returns `Ok(None)`
/// when the subset is empty (nothing to generate, no file written). The
/// document is assembled fully in memory before the single write, so a
/// failure never leaves a partial file behind.
pub fn generate(
    records: &[PromiseRecord],
    query: &str,
    output_dir: &Path,
) -> Result<Option<PathBuf>> {
    if records.is_empty() {
        return Ok(None);
    }

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    let now = Local::now();
    let filename = format!(
        "city_promises_report_{}.html",
        now.format("%Y%m%d_%H%M%S")
    );
    let path = output_dir.join(filename);

    let mut items = String::new();
    for record in records {
        items.push_str(&format!(
            "<div class='report-item'>\
             <h2>{} - {}</h2>\
             <p><strong>Promise:</strong> {}</p>\
             <p><strong>Due Date:</strong> {}</p>\
             <p><strong>Status:</strong> {}</p>\
             </div><hr>",
            escape_html(&record.city),
            escape_html(&record.category),
            escape_html(&record.promise_description),
            record.due_date.format("%Y-%m-%d"),
            escape_html(&title_case(&record.status)),
        ));
    }

    let document = format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
         <title>City Promises Report</title>\n\
         {css}\n\
         {script}\n\
         </head>\n\
         <body>\n\
         <div class=\"report-container\">\n\
         <div class=\"cover-page\">\n\
         <h1>City Promises Report</h1>\n\
         <p>This report details the status of various city promises based on the query: '{query}'.</p>\n\
         <p>Generated on: {date}</p>\n\
         </div>\n\
         <div class=\"report-content\">\n\
         <div class=\"search-bar\">\n\
         <input type=\"text\" id=\"searchInput\" onkeyup=\"searchReport()\" placeholder=\"Search for promises, cities, or statuses...\">\n\
         </div>\n\
         <div id=\"report-content-items\">\n\
         {items}\n\
         </div>\n\
         </div>\n\
         </div>\n\
         </body>\n\
         </html>\n",
        css = REPORT_CSS,
        script = REPORT_SEARCH_SCRIPT,
        query = escape_html(query),
        date = now.format("%Y-%m-%d %H:%M:%S"),
        items = items,
    );

    std::fs::write(&path, document)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(Some(path))
}
