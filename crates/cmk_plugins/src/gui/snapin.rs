//! Ticket system sidebar snapin.
//!
//! Reads ticket counts from the ticket system's SQLite database and renders
//! them as a compact table with links into the ticket pages.

use super::html::HtmlWriter;
use crate::error::Result;
use chrono::NaiveTime;
use rusqlite::{Connection, OpenFlags};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

pub const TYPE_NAME: &str = "ticket_system";
pub const REFRESH_INTERVAL_S: u64 = 30;

/// Database location below the site root (`$OMD_ROOT`).
pub const TICKET_DB_RELATIVE: &str = "var/check_mk/ticket_system/tickets.db";

const PAGE: &str = "wato.py?mode=ticket_system";
const PRIORITY_ORDER: [&str; 4] = ["critical", "high", "medium", "low"];

pub fn db_path(omd_root: &Path) -> PathBuf {
    omd_root.join(TICKET_DB_RELATIVE)
}

fn priority_rank(priority: &str) -> usize {
    let lower = priority.to_lowercase();
    PRIORITY_ORDER
        .iter()
        .position(|p| *p == lower)
        .unwrap_or(99)
}

fn priority_color(priority: &str) -> &'static str {
    match priority.to_lowercase().as_str() {
        "critical" => "#dc3545",
        "high" => "#fd7e14",
        "medium" => "#ffc107",
        "low" => "#6c757d",
        _ => "#999",
    }
}

fn capitalize(s: &str) -> String {
    let lower = s.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketStats {
    /// Ticket count per status, as stored.
    pub by_status: BTreeMap<String, i64>,
    pub total: i64,
    /// Tickets created during the last 24 hours.
    pub recent: i64,
    /// Open tickets per priority, critical first.
    pub open_by_priority: Vec<(String, i64)>,
}

impl TicketStats {
    /// Query the database read-only.
    pub fn load(path: &Path) -> Result<Self> {
        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
        conn.busy_timeout(Duration::from_secs(5))?;

        let mut stmt = conn.prepare("SELECT status, COUNT(*) FROM tickets GROUP BY status")?;
        let by_status = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)))?
            .collect::<std::result::Result<BTreeMap<_, _>, _>>()?;

        let total: i64 = conn.query_row("SELECT COUNT(*) FROM tickets", [], |row| row.get(0))?;
        let recent: i64 = conn.query_row(
            "SELECT COUNT(*) FROM tickets WHERE datetime(created_at) >= datetime('now', '-1 day')",
            [],
            |row| row.get(0),
        )?;

        let mut stmt = conn.prepare(
            r#"
            SELECT priority, COUNT(*)
            FROM tickets
            WHERE LOWER(status) = 'open'
            GROUP BY priority
            "#,
        )?;
        let mut open_by_priority = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        open_by_priority.sort_by_key(|(p, _)| priority_rank(p));

        debug!("Loaded ticket stats from {}: {} tickets", path.display(), total);
        Ok(Self {
            by_status,
            total,
            recent,
            open_by_priority,
        })
    }

    pub fn count(&self, status: &str) -> i64 {
        self.by_status.get(status).copied().unwrap_or(0)
    }
}

fn clickable_row(
    w: &mut HtmlWriter,
    href: &str,
    label: &str,
    label_style: &str,
    value: &str,
    value_style: &str,
) {
    let onclick = format!("location.href='{}'", href);
    w.open("tr", &[("style", "cursor: pointer;"), ("onclick", onclick.as_str())]);
    w.element("td", &[("style", label_style)], label);
    w.element("td", &[("style", value_style)], value);
    w.close("tr");
}

fn render_stats(w: &mut HtmlWriter, stats: &TicketStats) {
    w.open("table", &[("style", "width: 100%; font-size: 12px; margin-bottom: 8px;")]);

    let open = stats.count("open");
    clickable_row(
        w,
        &format!("{}&filter=open", PAGE),
        "Open:",
        "color: #666; padding: 4px 0;",
        &open.to_string(),
        "text-align: right; font-weight: bold; color: #28a745; padding: 4px 0;",
    );

    if open > 0 {
        for (priority, count) in &stats.open_by_priority {
            let value_style = format!(
                "text-align: right; font-weight: bold; color: {}; padding: 2px 0; font-size: 11px;",
                priority_color(priority)
            );
            clickable_row(
                w,
                &format!("{}&priority={}", PAGE, priority.to_lowercase()),
                &format!("  • {}:", capitalize(priority)),
                "color: #999; padding: 2px 0; font-size: 11px; padding-left: 10px;",
                &count.to_string(),
                &value_style,
            );
        }
    }

    clickable_row(
        w,
        &format!("{}&filter=closed", PAGE),
        "Closed:",
        "color: #666; padding: 4px 0;",
        &stats.count("closed").to_string(),
        "text-align: right; color: #6c757d; padding: 4px 0;",
    );

    w.open("tr", &[("style", "border-top: 1px solid #ddd;")]);
    w.element("td", &[("style", "padding: 2px 0;")], "");
    w.element("td", &[("style", "padding: 2px 0;")], "");
    w.close("tr");

    clickable_row(
        w,
        PAGE,
        "Total:",
        "font-weight: bold; padding: 4px 0;",
        &stats.total.to_string(),
        "text-align: right; font-weight: bold; padding: 4px 0;",
    );

    if stats.recent > 0 {
        w.open("tr", &[]);
        w.element("td", &[("style", "color: #999; font-size: 10px; padding: 2px 0;")], "Last 24h:");
        w.element(
            "td",
            &[("style", "text-align: right; color: #999; font-size: 10px; padding: 2px 0;")],
            &stats.recent.to_string(),
        );
        w.close("tr");
    }
    w.close("table");

    w.open("div", &[("style", "margin-top: 8px; padding-top: 8px; border-top: 1px solid #eee;")]);
    let create = format!("{}&action=create", PAGE);
    w.element(
        "a",
        &[
            ("href", create.as_str()),
            ("style", "font-size: 11px; color: #0084c8; text-decoration: none;"),
            ("title", "Create new ticket"),
        ],
        "➕ Create Ticket",
    );
    w.close("div");
}

/// Render the snapin for the database at `path`, stamping the footer with
/// `now`.
pub fn render_at(path: &Path, now: NaiveTime) -> String {
    let mut w = HtmlWriter::new();
    w.open("div", &[("style", "padding: 10px;")]);

    w.open("div", &[("style", "margin-bottom: 10px;")]);
    w.element(
        "a",
        &[
            ("href", PAGE),
            ("style", "font-weight: bold; font-size: 14px; color: #0084c8; text-decoration: none; border-bottom: 2px solid #0084c8; display: block; padding-bottom: 5px;"),
            ("title", "Open Ticket Dashboard"),
        ],
        "🎫 Tickets",
    );
    w.close("div");

    if !path.exists() {
        w.element(
            "div",
            &[("style", "background: #fff3cd; padding: 8px; border-radius: 4px; font-size: 11px;")],
            "Database not found",
        );
        w.close("div");
        return w.finish();
    }

    match TicketStats::load(path) {
        Ok(stats) => render_stats(&mut w, &stats),
        Err(e) => {
            warn!("Ticket snapin could not read {}: {}", path.display(), e);
            w.element(
                "div",
                &[("style", "background: #f8d7da; padding: 8px; border-radius: 4px; font-size: 11px;")],
                &format!("Error: {}", e),
            );
        }
    }

    w.element(
        "div",
        &[("style", "margin-top: 8px; padding-top: 6px; border-top: 1px solid #eee; font-size: 9px; color: #999; text-align: right;")],
        &now.format("%H:%M:%S").to_string(),
    );
    w.close("div");
    w.finish()
}

pub fn render(omd_root: &Path) -> String {
    render_at(&db_path(omd_root), chrono::Local::now().time())
}
