use crate::render::escape_html;

/// Bootstrap color class, Font Awesome icon, and display label for a
/// promise status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBadge {
    pub color: &'static str,
    pub icon: &'static str,
    pub label: String,
}

/// Map a status string to its badge. Total: the three known statuses get
/// distinct color/icon pairs; anything else falls back to a neutral badge
/// that shows the raw string.
pub fn status_badge(status: &str) -> StatusBadge {
    match status {
        "late" => StatusBadge {
            color: "danger",
            icon: "fas fa-exclamation-triangle",
            label: "Late".to_string(),
        },
        "due" => StatusBadge {
            color: "warning",
            icon: "fas fa-hourglass-half",
            label: "Due".to_string(),
        },
        "on-time" => StatusBadge {
            color: "success",
            icon: "fas fa-check-circle",
            label: "On-Time".to_string(),
        },
        other => StatusBadge {
            color: "secondary",
            icon: "",
            label: other.to_string(),
        },
    }
}

impl StatusBadge {
    pub fn to_html(&self) -> String {
        let icon = if self.icon.is_empty() {
            String::new()
        } else {
            format!("<i class=\"{} me-1\"></i>", self.icon)
        };
        format!(
            "<span class=\"badge badge-{}\">{}{}</span>",
            self.color,
            icon,
            escape_html(&self.label)
        )
    }
}
