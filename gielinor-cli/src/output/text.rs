//! Text output formatting with progress bars and colors.

use gielinor_providers::collectionlog::CollectionLog;
use gielinor_providers::{
    BankTagImport, OperationInfo, OsrsboxItem, OsrsboxMonster, Player, ProviderDescriptor,
    Snapshot, TempleData, TempleEndpoint,
};
use gielinor_store::Settings;
use serde_json::Value;

use crate::commands::providers::ProviderRow;

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const CYAN: &str = "\x1b[36m";

// Progress bar characters
const BAR_FULL: char = '█';
const BAR_EMPTY: char = '░';

/// Datapoints printed before the list is elided.
const MAX_DATAPOINTS: usize = 10;

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
    bar_width: usize,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self {
            use_colors,
            bar_width: 10,
        }
    }

    // ========================================================================
    // Providers
    // ========================================================================

    /// Formats the provider table.
    pub fn format_providers(&self, rows: &[ProviderRow]) -> String {
        let mut lines = vec![format!(
            "{:<22} {:<14} {:<9} {}",
            self.bold("Provider"),
            self.bold("CLI"),
            self.bold("TTL"),
            self.bold("Base URL")
        )];

        for row in rows {
            lines.push(format!(
                "{:<22} {:<14} {:<9} {}",
                row.name,
                self.cyan(row.cli_name),
                format_ttl(row.cache_ttl_ms),
                row.base_url
            ));
            lines.push(format!(
                "  {}",
                self.dim(&format!("{} · timeout {}ms", row.operations.join(", "), row.timeout_ms))
            ));
        }

        lines.join("\n")
    }

    /// Formats one operation of a provider as `provider operation: METHOD route`.
    pub fn format_operation(&self, desc: &ProviderDescriptor, op: &OperationInfo) -> String {
        format!(
            "{} {}: {} {}",
            self.cyan(desc.cli_name()),
            self.bold(op.name),
            op.method,
            op.route
        )
    }

    // ========================================================================
    // Collection Log
    // ========================================================================

    /// Formats a collection log summary, optionally listing obtained items.
    pub fn format_collection_log(&self, log: &CollectionLog, show_items: bool) -> String {
        let mut lines = Vec::new();

        lines.push(format!("{} ({})", self.bold(&log.username), log.account_type));

        let percent = log.completion() * 100.0;
        lines.push(format!(
            "{:<8} {} {}/{} ({:.1}%)",
            "Uniques:",
            self.progress_bar(percent),
            log.unique_obtained,
            log.unique_items,
            percent
        ));

        for (tab, pages) in &log.tabs {
            let total: usize = pages.values().map(|page| page.items.len()).sum();
            let obtained: usize = pages.values().map(|page| page.obtained_count()).sum();
            lines.push(format!(
                "  {:<12} {:>4}/{:<4} {}",
                tab,
                obtained,
                total,
                self.dim(&format!("{} pages", pages.len()))
            ));
        }

        if show_items {
            lines.push(String::new());
            lines.push(self.dim("Obtained items:"));
            for item in log.obtained_items() {
                lines.push(format!(
                    "  {:<32} x{}",
                    item.name,
                    self.format_number(item.quantity as f64)
                ));
            }
        }

        lines.join("\n")
    }

    // ========================================================================
    // osrsbox
    // ========================================================================

    /// Formats item records, one line each.
    pub fn format_items(&self, items: &[OsrsboxItem]) -> String {
        items
            .iter()
            .map(|item| {
                let mut flags = Vec::new();
                if item.is_members() {
                    flags.push("members".to_string());
                }
                if item.is_tradeable_on_ge() {
                    flags.push("GE".to_string());
                }
                if let Some(limit) = item.buy_limit() {
                    flags.push(format!("limit {limit}"));
                }
                format!(
                    "{:>6}  {:<32} {}",
                    item.id,
                    self.bold(&item.name),
                    self.dim(&flags.join(", "))
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Formats monster records, one line each.
    pub fn format_monsters(&self, monsters: &[OsrsboxMonster]) -> String {
        monsters
            .iter()
            .map(|monster| {
                let level = monster
                    .combat_level()
                    .map_or_else(|| "−".to_string(), |l| format!("lvl {l}"));
                format!("{:>6}  {:<32} {}", monster.id, self.bold(&monster.name), self.dim(&level))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    // ========================================================================
    // TempleOSRS
    // ========================================================================

    /// Formats a Temple payload as `key: value` lines or a datapoint list.
    pub fn format_temple(&self, endpoint: TempleEndpoint, data: &TempleData) -> String {
        let mut lines = vec![format!("{} ({} fields)", self.bold(endpoint.name()), data.len())];

        match data {
            TempleData::Object(map) => {
                for (key, value) in map {
                    lines.push(format!("  {:<24} {}", format!("{key}:"), render_value(value)));
                }
            }
            TempleData::Array(points) => {
                for point in points.iter().take(MAX_DATAPOINTS) {
                    lines.push(format!("  {}", render_value(point)));
                }
                if points.len() > MAX_DATAPOINTS {
                    lines.push(self.dim(&format!("  ... {} more", points.len() - MAX_DATAPOINTS)));
                }
            }
        }

        lines.join("\n")
    }

    // ========================================================================
    // Wise Old Man
    // ========================================================================

    /// Formats a Wise Old Man player.
    pub fn format_player(&self, player: &Player) -> String {
        let mut lines = vec![format!(
            "{} ({}, {})",
            self.bold(&player.display_name),
            player.player_type,
            player.build
        )];

        if let Some(level) = player.overall_level() {
            lines.push(format!("Total:   {}", self.green(&level.to_string())));
        }
        lines.push(format!("Exp:     {}", self.format_number(player.exp as f64)));
        lines.push(format!("EHP/EHB: {:.1} / {:.1}", player.ehp, player.ehb));
        if let Some(status) = &player.status {
            lines.push(format!("Status:  {status}"));
        }
        lines.push(format!(
            "Updated: {}",
            self.dim(&player.updated_at.format("%Y-%m-%d %H:%M UTC").to_string())
        ));

        lines.join("\n")
    }

    /// Formats snapshots as one line each: date, total level, total exp.
    pub fn format_snapshots(&self, snapshots: &[Snapshot]) -> String {
        if snapshots.is_empty() {
            return self.dim("No snapshots");
        }

        snapshots
            .iter()
            .map(|snapshot| {
                let overall = snapshot.data.skills.get("overall");
                let level = overall.map_or_else(|| "−".to_string(), |s| s.level.to_string());
                let exp = overall.map_or_else(
                    || "−".to_string(),
                    |s| self.format_number(s.experience as f64),
                );
                format!(
                    "{}  {:>5}  {:>7}",
                    snapshot.created_at.format("%Y-%m-%d %H:%M"),
                    level,
                    exp
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    // ========================================================================
    // Bank Tags
    // ========================================================================

    /// Formats a bank-tag import: tags, layouts, then rejected lines.
    pub fn format_bank_tags(&self, import: &BankTagImport) -> String {
        let mut lines = Vec::new();

        for tag in &import.tags {
            lines.push(format!(
                "{} {} ({} items)",
                self.green("tag"),
                self.bold(&tag.name),
                tag.item_ids.len()
            ));
        }
        for layout in &import.layouts {
            lines.push(format!(
                "{} {} ({} positions)",
                self.green("layout"),
                self.bold(&layout.name),
                layout.positions.len()
            ));
        }
        for error in &import.errors {
            lines.push(format!(
                "{} line {}: {} {}",
                self.red("error"),
                error.line_number,
                error.reason,
                self.dim(&error.line)
            ));
        }

        let summary = format!(
            "{} tags, {} layouts, {} errors",
            import.tags.len(),
            import.layouts.len(),
            import.errors.len()
        );
        lines.push(if import.is_clean() {
            summary
        } else {
            self.yellow(&summary)
        });

        lines.join("\n")
    }

    // ========================================================================
    // Settings
    // ========================================================================

    /// Formats the effective settings.
    pub fn format_settings(&self, settings: &Settings) -> String {
        let mut lines = vec![self.bold("Settings"), "─".repeat(40)];

        lines.push(format!(
            "User agent:  {}",
            settings.user_agent.as_deref().unwrap_or("(default)")
        ));
        let cache = match (settings.cache_enabled, settings.cache_max_entries) {
            (false, _) => self.dim("disabled"),
            (true, Some(max)) => format!("enabled (max {max} entries)"),
            (true, None) => "enabled".to_string(),
        };
        lines.push(format!("Cache:       {cache}"));
        lines.push(format!("Log level:   {}", settings.log_level));

        for (kind, provider) in &settings.providers {
            lines.push(String::new());
            lines.push(self.cyan(kind.cli_name()));
            if let Some(url) = &provider.base_url {
                lines.push(format!("  base_url:     {url}"));
            }
            if let Some(ms) = provider.timeout_ms {
                lines.push(format!("  timeout_ms:   {ms}"));
            }
            if let Some(ms) = provider.cache_ttl_ms {
                lines.push(format!("  cache_ttl_ms: {ms}"));
            }
            if let Some(agent) = &provider.user_agent {
                lines.push(format!("  user_agent:   {agent}"));
            }
        }

        lines.join("\n")
    }

    // ========================================================================
    // Color/style helpers
    // ========================================================================

    /// Formats a progress bar.
    pub fn progress_bar(&self, percent: f64) -> String {
        let filled = ((percent.clamp(0.0, 100.0) / 100.0) * self.bar_width as f64).round() as usize;
        let empty = self.bar_width.saturating_sub(filled);

        let bar = format!(
            "{}{}",
            BAR_FULL.to_string().repeat(filled),
            BAR_EMPTY.to_string().repeat(empty)
        );

        self.color_for_percent(percent, &bar)
    }

    fn color_for_percent(&self, percent: f64, text: &str) -> String {
        if !self.use_colors {
            return text.to_string();
        }

        if percent < 20.0 {
            self.red(text)
        } else if percent < 50.0 {
            self.yellow(text)
        } else {
            self.green(text)
        }
    }

    fn format_number(&self, n: f64) -> String {
        if n >= 1_000_000.0 {
            format!("{:.1}M", n / 1_000_000.0)
        } else if n >= 1_000.0 {
            format!("{:.1}K", n / 1_000.0)
        } else {
            format!("{:.0}", n)
        }
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.use_colors {
            format!("{}{}{}", code, text, RESET)
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    fn green(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    fn yellow(&self, text: &str) -> String {
        self.paint(YELLOW, text)
    }

    fn red(&self, text: &str) -> String {
        self.paint(RED, text)
    }

    fn cyan(&self, text: &str) -> String {
        self.paint(CYAN, text)
    }
}

/// Renders a JSON value without quoting plain strings.
fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "−".to_string(),
        other => other.to_string(),
    }
}

fn format_ttl(ms: u128) -> String {
    match ms {
        0 => "off".to_string(),
        ms if ms % 60_000 == 0 => format!("{}m", ms / 60_000),
        ms if ms % 1_000 == 0 => format!("{}s", ms / 1_000),
        ms => format!("{ms}ms"),
    }
}

// ============================================================================
// Tests
// ============================================================================
