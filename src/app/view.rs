//! Plain-text rendering for the command line. Every function returns a
//! `String` so output can be asserted on directly.

use std::fmt::Write as _;

use crate::api::{ActivityEvent, ConnectionStats, HealthInfo, Page, StatusCount};
use crate::board::{BoardSnapshot, FormErrors};
use crate::domain::{Job, Role, Submission};
use crate::state::ViewFilter;

pub const NO_JOBS_YET: &str = "No jobs yet";
pub const NO_JOBS_FOUND: &str = "No jobs found";
pub const NO_HISTORY: &str = "No status history available";

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn badge(status: Submission) -> String {
    match status.status() {
        Some(status) => format!("[{} {}]", status.icon(), status),
        None => "[New Job]".to_string(),
    }
}

/// One line per job, as shown in the list.
pub fn job_line(job: &Job, role: Role) -> String {
    let mut line = format!("{} {} @ {}", badge(job.status), job.role, job.company);
    if let Some(location) = job.location.as_deref().filter(|l| !l.is_empty()) {
        let _ = write!(line, " ({location})");
    }
    if role == Role::User {
        line.push_str(if job.has_applied() { "  Applied" } else { "  Apply" });
    }
    let _ = write!(line, "  #{}", job.id);
    line
}

pub fn job_card(job: &Job) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} at {}", job.role, job.company);
    let _ = writeln!(out, "  id:       {}", job.id);
    let _ = writeln!(out, "  status:   {}", badge(job.status));
    if let Some(location) = &job.location {
        let _ = writeln!(out, "  location: {location}");
    }
    if let Some(salary) = &job.salary {
        let _ = writeln!(out, "  salary:   {salary}");
    }
    if let Some(applied) = job.applied_date {
        let _ = writeln!(out, "  applied:  {}", applied.format(DATE_FORMAT));
    }
    let _ = writeln!(out, "  created:  {}", job.created_at.format(DATE_FORMAT));
    if let Some(description) = job.description.as_deref().filter(|d| !d.is_empty()) {
        let _ = writeln!(out, "\n{description}");
    }
    out.push('\n');
    out.push_str(&history(job));
    out
}

pub fn history(job: &Job) -> String {
    if job.history.is_empty() {
        return format!("{NO_HISTORY}\n");
    }
    // insertion order is chronological order
    let mut out = String::from("Status history:\n");
    for entry in &job.history {
        let _ = writeln!(
            out,
            "  {}  {} {}",
            entry.timestamp.format(DATE_FORMAT),
            entry.status.icon(),
            entry.status
        );
    }
    out
}

pub fn board(snapshot: &BoardSnapshot, role: Role) -> String {
    let mut out = String::new();
    if let Some(error) = &snapshot.error_message {
        let _ = writeln!(out, "! {error}");
    }

    if snapshot.loaded == 0 {
        let _ = writeln!(out, "{NO_JOBS_YET}");
        return out;
    }
    if snapshot.jobs.is_empty() {
        let _ = writeln!(out, "{NO_JOBS_FOUND}");
    }
    for job in &snapshot.jobs {
        let _ = writeln!(out, "{}", job_line(job, role));
    }

    let p = snapshot.pagination;
    let _ = writeln!(
        out,
        "\n{} of {} jobs (Page {} of {})",
        snapshot.jobs.len(),
        p.total,
        p.page,
        p.pages.max(1)
    );
    let mut nav = Vec::new();
    if p.has_prev() {
        nav.push(format!("prev: --page {}", p.page - 1));
    }
    if p.has_next() {
        nav.push(format!("next: --page {}", p.page + 1));
    }
    if !nav.is_empty() {
        let _ = writeln!(out, "{}", nav.join("  "));
    }
    out
}

/// Server-side search results. Nothing loaded here means nothing matched.
pub fn search_results(page: &Page<Job>, role: Role) -> String {
    if page.items.is_empty() {
        return format!("{NO_JOBS_FOUND}\n");
    }
    let snapshot = BoardSnapshot {
        jobs: page.items.clone(),
        loaded: page.items.len(),
        pagination: page.pagination,
        is_loading: false,
        error_message: None,
        filter: ViewFilter::default(),
    };
    board(&snapshot, role)
}

pub fn form_errors(errors: &FormErrors) -> String {
    let mut out = String::new();
    for (field, message) in errors.iter() {
        let _ = writeln!(out, "  {}: {message}", field.as_str());
    }
    out
}

pub fn statistics(counts: &[StatusCount]) -> String {
    if counts.is_empty() {
        return format!("{NO_JOBS_YET}\n");
    }
    let total: u64 = counts.iter().map(|c| c.count).sum();
    let mut out = String::new();
    for count in counts {
        let _ = writeln!(out, "{:<16} {:>5}", badge(count.status), count.count);
    }
    let _ = writeln!(out, "{:<16} {total:>5}", "total");
    out
}

pub fn activity(events: &[ActivityEvent]) -> String {
    if events.is_empty() {
        return "No recent activity\n".to_string();
    }
    let mut out = String::new();
    for event in events {
        let _ = writeln!(
            out,
            "{}  {} {} @ {}  #{}",
            event.timestamp.format(DATE_FORMAT),
            badge(Submission::Submitted(event.status)),
            event.role,
            event.company,
            event.job_id
        );
    }
    out
}

/// Request counters are kept per `ApiClient`, so they cover this process
/// only.
pub fn health(info: &HealthInfo, stats: &ConnectionStats) -> String {
    format!(
        "{} ({}, {})\nrequests this process: {} total, {} ok, {} failed, avg {}ms\n",
        info.message,
        info.environment,
        info.timestamp,
        stats.total_requests,
        stats.successful_requests,
        stats.failed_requests,
        stats.average_response_time.as_millis()
    )
}
