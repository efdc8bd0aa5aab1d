use crate::data::records::PromiseRecord;
use crate::render::badge::status_badge;
use crate::render::{escape_html, title_case};

/// Column subset and order for the tabular view.
const TABLE_COLUMNS: &[&str] = &["city", "promise_description", "category", "due_date", "status"];

pub fn count_message(count: usize) -> String {
    if count == 0 {
        "No records matched your search criteria.".to_string()
    } else {
        format!("{} records matched your search criteria.", count)
    }
}

/// One card per record: heading, promise text, due date, status badge.
pub fn render_list(records: &[PromiseRecord]) -> String {
    if records.is_empty() {
        return "<p>No results found for your query.</p>".to_string();
    }

    let mut html = String::new();
    for record in records {
        html.push_str(&format!(
            "<div class=\"result-card\">\
             <h5>{} - {}</h5>\
             <p>Promise: {}</p>\
             <p>Due: {}</p>\
             <div>Status: {}</div>\
             </div>",
            escape_html(&record.city),
            escape_html(&record.category),
            escape_html(&record.promise_description),
            record.due_date.format("%Y-%m-%d"),
            status_badge(&record.status).to_html(),
        ));
    }
    html
}

/// Fixed-column table of the subset. Columns the record type does not carry
/// are skipped rather than erroring.
pub fn render_table(records: &[PromiseRecord]) -> String {
    if records.is_empty() {
        return "<p>No results found for your query.</p>".to_string();
    }

    let columns: Vec<&str> = TABLE_COLUMNS
        .iter()
        .copied()
        .filter(|col| column_value(&records[0], col).is_some())
        .collect();

    let mut html = String::from("<table class=\"results-table\"><thead><tr>");
    for col in &columns {
        html.push_str(&format!(
            "<th>{}</th>",
            escape_html(&title_case(&col.replace('_', " ")))
        ));
    }
    html.push_str("</tr></thead><tbody>");

    for record in records {
        html.push_str("<tr>");
        for col in &columns {
            let value = column_value(record, col).unwrap_or_default();
            html.push_str(&format!("<td>{}</td>", escape_html(&value)));
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody></table>");
    html
}

fn column_value(record: &PromiseRecord, column: &str) -> Option<String> {
    match column {
        "city" => Some(record.city.clone()),
        "category" => Some(record.category.clone()),
        "promise_description" => Some(record.promise_description.clone()),
        "due_date" => Some(record.due_date.format("%Y-%m-%d").to_string()),
        "status" => Some(record.status.clone()),
        _ => None,
    }
}
