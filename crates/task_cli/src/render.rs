use tabled::settings::Style;
use tabled::{Table, Tabled};
use task_core::Task;
use time::macros::format_description;
use time::{Duration, OffsetDateTime, UtcOffset};

pub const DESCRIPTION_WIDTH: usize = 50;
const PLACEHOLDER: &str = "-";
const EMPTY_MESSAGE: &str = "No tasks found.";

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "STATUS")]
    status: &'static str,
    #[tabled(rename = "DESCRIPTION")]
    description: String,
    #[tabled(rename = "PRIORITY")]
    priority: String,
    #[tabled(rename = "CREATED")]
    created: String,
    #[tabled(rename = "COMPLETED")]
    completed: String,
    #[tabled(rename = "TOOK TIME")]
    took_time: String,
}

impl TaskRow {
    fn new(task: &Task, offset: UtcOffset) -> Self {
        let status = if task.completed { "DONE" } else { "PENDING" };
        let completed = match task.completed_at {
            Some(completed_at) if task.completed => format_timestamp(completed_at, offset),
            _ => PLACEHOLDER.to_string(),
        };
        let took_time = if task.completed {
            format_took_time(task.took_time)
        } else {
            PLACEHOLDER.to_string()
        };

        Self {
            id: task.id.clone(),
            status,
            description: truncate(&task.description, DESCRIPTION_WIDTH),
            priority: task.priority.as_str().to_uppercase(),
            created: format_timestamp(task.created_at, offset),
            completed,
            took_time,
        }
    }
}

pub fn render_tasks<'a, I>(tasks: I, offset: UtcOffset) -> String
where
    I: IntoIterator<Item = &'a Task>,
{
    let rows: Vec<TaskRow> = tasks
        .into_iter()
        .map(|task| TaskRow::new(task, offset))
        .collect();
    if rows.is_empty() {
        return EMPTY_MESSAGE.to_string();
    }

    let mut table = Table::new(rows);
    table.with(Style::blank());
    table.to_string()
}

/// Cuts `text` to `max` characters, ending in `...` when shortened.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}

pub fn format_timestamp(timestamp: OffsetDateTime, offset: UtcOffset) -> String {
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    timestamp
        .to_offset(offset)
        .format(&format)
        .unwrap_or_else(|_| timestamp.to_string())
}

/// Whole seconds, hours and minutes only when non-zero: `45s`, `2m0s`,
/// `1h2m3s`.
pub fn format_took_time(took_time: Duration) -> String {
    let total = took_time.whole_seconds();
    let sign = if total < 0 { "-" } else { "" };
    let total = total.unsigned_abs();
    let (hours, minutes, seconds) = (total / 3600, total % 3600 / 60, total % 60);

    if hours > 0 {
        format!("{sign}{hours}h{minutes}m{seconds}s")
    } else if minutes > 0 {
        format!("{sign}{minutes}m{seconds}s")
    } else {
        format!("{sign}{seconds}s")
    }
}
