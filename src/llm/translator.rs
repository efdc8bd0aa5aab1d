use colored::Colorize;

use crate::config::settings::LlmConfig;
use crate::filter::spec::FilterSpec;
use crate::llm::client::generate_text;

/// Translate a natural-language query into a structured filter over the
/// given schema fields. Never fails to its caller: any network, API, or
/// parse problem is logged and yields an empty spec, which downstream
/// treats as "could not understand the constraints" (zero results), never
/// as "no constraints".
pub async fn translate(config: &LlmConfig, query: &str, fields: &[&str]) -> FilterSpec {
    let prompt = build_prompt(query, fields);

    let response = match generate_text(config, &prompt).await {
        Ok(text) => text,
        Err(e) => {
            eprintln!("  {} {}", "✗".red(), format!("Query translation failed: {}", e).red());
            return FilterSpec::default();
        }
    };

    match parse_filter_response(&response) {
        Ok(spec) => spec,
        Err(e) => {
            eprintln!(
                "  {} {}",
                "✗".red(),
                format!("Could not parse filter from model response: {}", e).red()
            );
            eprintln!("  {} {}", "│".dimmed(), response.trim().dimmed());
            FilterSpec::default()
        }
    }
}

/// Build the translation instruction: schema, the user query, and the
/// worked examples that teach the model the expected JSON shapes.
pub fn build_prompt(query: &str, fields: &[&str]) -> String {
    format!(
        "You are a data analysis assistant. Your task is to convert a natural language query\n\
         into a structured JSON object that can be used to filter a table of city promises.\n\n\
         The table has the following columns: [{fields}]\n\n\
         The user's query is: \"{query}\"\n\n\
         Based on the query, create a JSON object with keys corresponding to the\n\
         table columns and values to filter by.\n\n\
         - For the 'status' column, the possible values are 'late', 'due', and 'on-time'.\n\
         - For columns like 'city', 'category', or 'promise_description', the value should be a string to search for.\n\
         - If the query mentions a specific date or a date range for 'due_date', format it as a dictionary\n  \
           with operators like \"$gt\" (greater than), \"$lt\" (less than), or \"$eq\" (equal to).\n\n\
         Example 1:\n\
         Query: \"show me all late promises in City A\"\n\
         JSON: {{\"status\": \"late\", \"city\": \"City A\"}}\n\n\
         Example 2:\n\
         Query: \"what are the promises due after 2023\"\n\
         JSON: {{\"due_date\": {{\"$gt\": \"2023-12-31\"}}}}\n\n\
         Example 3:\n\
         Query: \"search for infrastructure projects\"\n\
         JSON: {{\"category\": \"Infrastructure\"}}\n\n\
         Now, generate the JSON for the user's query. Return only the JSON object.",
        fields = fields.join(", "),
        query = query,
    )
}

/// Parse the model's reply as a filter spec, tolerating markdown fences.
pub fn parse_filter_response(response: &str) -> Result<FilterSpec, serde_json::Error> {
    let cleaned = strip_code_fences(response);
    serde_json::from_str(&cleaned)
}

/// The model often wraps its JSON in ```json ... ``` fences; strip them.
fn strip_code_fences(text: &str) -> String {
    text.trim().replace("```json", "").replace("```", "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::spec::Condition;

    #[test]
    fn test_parse_bare_json() {
        let spec = parse_filter_response(r#"{"status": "late"}"#).unwrap();
        assert_eq!(
            spec.0.get("status"),
            Some(&Condition::Text("late".to_string()))
        );
    }

    #[test]
    fn test_parse_fenced_json() {
        let spec =
            parse_filter_response("```json\n{\"city\": \"Springfield\"}\n```").unwrap();
        assert_eq!(
            spec.0.get("city"),
            Some(&Condition::Text("Springfield".to_string()))
        );
    }

    #[test]
    fn test_parse_fenced_json_with_surrounding_whitespace() {
        let spec = parse_filter_response("  \n```json\n{}\n```\n  ").unwrap();
        assert!(spec.is_empty());
    }

    #[test]
    fn test_parse_prose_fails() {
        assert!(parse_filter_response("Sorry, I can't help with that.").is_err());
    }

    #[test]
    fn test_parse_truncated_json_fails() {
        assert!(parse_filter_response(r#"{"status": "la"#).is_err());
    }

    #[test]
    fn test_prompt_embeds_query_and_fields() {
        let prompt = build_prompt("late promises", &["city", "status"]);
        assert!(prompt.contains("\"late promises\""));
        assert!(prompt.contains("[city, status]"));
        assert!(prompt.contains("$gt"));
    }
}
