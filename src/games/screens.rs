use crate::games::leaderboard::Standing;
use crate::games::session::Session;
use crate::games::timer::WARNING_PERCENT;
use crate::terminal::{paint, Rgb, GOLD, GREEN, RED, YELLOW};

pub fn setup_lines(title: &str, email: &str, message: Option<&str>) -> Vec<String>
{
    let mut lines = Vec::new();
    lines.push(format!("Quiz Games - {title}"));
    lines.push(String::new());
    lines.push("Enter your email to start. It keys your leaderboard row.".to_string());
    lines.push(String::new());
    lines.push(format!("Email: {email}_"));
    lines.push(String::new());
    if let Some(msg) = message {
        lines.push(paint(msg, RED));
    } else {
        lines.push(String::new());
    }
    lines.push("Enter starts. Esc quits.".to_string());
    lines
}

pub fn timer_line(session: &Session, width: usize) -> String
{
    let percent = session.time_percent();
    let bar_width = width.saturating_sub(12).clamp(10, 60);
    let filled = ((bar_width as f32) * percent / 100.0).round() as usize;
    let color = if percent < WARNING_PERCENT { RED } else { timer_color(percent) };
    format!(
        "[{}{}] {:>5.1}s",
        paint(&"#".repeat(filled.min(bar_width)), color),
        " ".repeat(bar_width.saturating_sub(filled)),
        session.time_left()
    )
}

fn timer_color(percent: f32) -> Rgb
{
    if percent > 65.0 { GREEN } else { YELLOW }
}

pub fn stats_line(session: &Session, extra: &str) -> String
{
    if extra.is_empty() {
        format!("Stage: {}  Score: {}", session.stage, session.score)
    } else {
        format!("Stage: {}  Score: {}  {}", session.stage, session.score, extra)
    }
}

pub fn result_lines(
    title: &str,
    session: &Session,
    standing: Option<&Standing>,
    unit: &str,
    last_words: Option<&str>,
) -> Vec<String>
{
    let mut lines = Vec::new();
    lines.push(format!("Quiz Games - {title}"));
    lines.push("Game over".to_string());
    lines.push(String::new());
    if let Some(words) = last_words {
        lines.push(words.to_string());
        lines.push(String::new());
    }
    lines.push(format!("Final stage: {}", session.stage));
    lines.push(format!("Score: {} {unit}", session.score));

    match standing {
        Some(standing) => {
            lines.push(format!("Your rank: #{}", standing.rank));
            lines.push(String::new());
            lines.push("Leaderboard".to_string());
            for row in &standing.rows {
                let text = format!(
                    "{:>3}. {:<32} {:>6} {unit}  (stage {})",
                    row.position, row.entry.email, row.entry.score, row.entry.stage
                );
                if row.is_current {
                    lines.push(paint(&format!("{text}  <"), GOLD));
                } else {
                    lines.push(text);
                }
            }
        }
        None => lines.push("Saving score...".to_string()),
    }

    lines.push(String::new());
    lines.push("Enter plays again. Esc quits.".to_string());
    lines
}
