//! Colorful console output for solver runs.
//!
//! Provides a `tracing` layer that formats the run events of the round
//! driver as human-readable lines.

use std::io::{self, Write};
use std::sync::OnceLock;

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

/// Installs the console layer with an `EnvFilter` read from `RUST_LOG`,
/// defaulting to `rosterforge_solver=info`.
///
/// Safe to call multiple times; only the first call has effect.
pub fn init() {
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("rosterforge_solver=info"));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(SolverConsoleLayer)
            .try_init();
    });
}

/// A tracing layer that formats run events with colors.
pub struct SolverConsoleLayer;

impl<S: Subscriber> Layer<S> for SolverConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if !event.metadata().target().starts_with("rosterforge") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    optimizer: Option<String>,
    reason: Option<String>,
    run: Option<u64>,
    days: Option<u64>,
    resources: Option<u64>,
    round: Option<u64>,
    rounds: Option<u64>,
    duration_ms: Option<u64>,
    speed: Option<u64>,
    improved: bool,
    score: Option<String>,
    seed_score: Option<String>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value).trim_matches('"').to_string();
        match field.name() {
            "score" => self.score = Some(s),
            "seed_score" => self.seed_score = Some(s),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "run" => self.run = Some(value),
            "days" => self.days = Some(value),
            "resources" => self.resources = Some(value),
            "round" => self.round = Some(value),
            "rounds" => self.rounds = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            "speed" => self.speed = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value as u64);
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == "improved" {
            self.improved = value;
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "optimizer" => self.optimizer = Some(value.to_string()),
            "reason" => self.reason = Some(value.to_string()),
            "score" => self.score = Some(value.to_string()),
            "seed_score" => self.seed_score = Some(value.to_string()),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor) -> String {
    match v.event.as_deref().unwrap_or("") {
        "run_start" => format_run_start(v),
        "round_end" if v.improved => format_new_best(v),
        "run_end" => format_run_end(v),
        _ => String::new(),
    }
}

fn format_run_start(v: &EventVisitor) -> String {
    format!(
        "{} {} {} {} run ({}) started: days ({}), resources ({}), seed score ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Solver]".bright_cyan(),
        v.optimizer.as_deref().unwrap_or("optimizer").white().bold(),
        v.run.unwrap_or(0).to_string().yellow(),
        v.days.unwrap_or(0).to_formatted_string(&Locale::en).bright_yellow(),
        v.resources
            .unwrap_or(0)
            .to_formatted_string(&Locale::en)
            .bright_yellow(),
        format_score(v.seed_score.as_deref().unwrap_or("N/A")),
    )
}

fn format_new_best(v: &EventVisitor) -> String {
    format!(
        "    {} Round {:>6} | {}",
        "->".bright_blue(),
        v.round.unwrap_or(0).to_formatted_string(&Locale::en).white(),
        format_score(v.score.as_deref().unwrap_or("N/A"))
    )
}

fn format_run_end(v: &EventVisitor) -> String {
    format!(
        "{} {} {} run ({}) {}: time spent ({}), best score ({}), round speed ({}/sec), round total ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Solver]".bright_cyan(),
        v.run.unwrap_or(0).to_string().yellow(),
        v.reason.as_deref().unwrap_or("ended").white().bold(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
        format_score(v.score.as_deref().unwrap_or("N/A")),
        v.speed
            .unwrap_or(0)
            .to_formatted_string(&Locale::en)
            .bright_magenta()
            .bold(),
        v.rounds.unwrap_or(0).to_formatted_string(&Locale::en).white()
    )
}

fn timestamp() -> String {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| format!("{:5}.{:03}", d.as_secs() % 100_000, d.subsec_millis()))
        .unwrap_or_else(|_| "    0.000".to_string())
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        format!("{}m {}s", ms / 60_000, (ms % 60_000) / 1000)
    }
}

/// Colors a `"<hard>hard/<soft>soft"` score by sign.
fn format_score(score: &str) -> String {
    let Some((hard, soft)) = score.split_once('/') else {
        return score.white().to_string();
    };
    let hard = hard.trim_end_matches("hard");
    let soft = soft.trim_end_matches("soft");
    let hard_num: i64 = hard.parse().unwrap_or(0);
    let soft_num: i64 = soft.parse().unwrap_or(0);

    let hard_str = if hard_num < 0 {
        format!("{}hard", hard).bright_red().to_string()
    } else {
        format!("{}hard", hard).bright_green().to_string()
    };
    let soft_str = if soft_num < 0 {
        format!("{}soft", soft).yellow().to_string()
    } else {
        format!("{}soft", soft).white().to_string()
    };
    format!("{}/{}", hard_str, soft_str)
}
