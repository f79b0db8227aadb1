use std::fmt::Display;
use std::time::Duration;

use colored::*;
use unicode_width::UnicodeWidthStr;

use sweepr_common::config::ScanConfig;
use sweepr_common::network::range::Ipv4Range;
use sweepr_core::engine::ScanSummary;

pub const TOTAL_WIDTH: usize = 64;

const KEY_WIDTH: usize = 10;

pub fn header(msg: &str) {
    let formatted: String = format!("⟦ {} ⟧", msg);
    let msg_len: usize = UnicodeWidthStr::width(formatted.as_str());

    let dash_count: usize = TOTAL_WIDTH.saturating_sub(msg_len);
    let left: usize = dash_count / 2;
    let right: usize = dash_count - left;

    println!(
        "{}{}{}",
        "─".repeat(left).bright_black(),
        formatted.to_uppercase().bright_green(),
        "─".repeat(right).bright_black()
    );
}

pub fn aligned_line<V>(key: &str, value: V)
where
    V: Display,
{
    let dots: String = ".".repeat((KEY_WIDTH + 1).saturating_sub(key.len()));
    println!(
        "{} {}{}{} {}",
        ">".bright_black(),
        key.cyan(),
        dots.bright_black(),
        ":".bright_black(),
        value
    );
}

/// The pre-sweep plan: range bounds, target count and the classic
/// back-of-envelope duration bound of every slot cycling on its timeout.
pub fn sweep_plan(cfg: &ScanConfig, hosts: Ipv4Range, total: u64, capacity: usize) {
    header("sweep plan");

    aligned_line(
        "Hosts",
        format!("{} - {} ({})", hosts.start_addr, hosts.end_addr, hosts.len()),
    );
    let ports = if cfg.first_port == cfg.last_port {
        cfg.first_port.to_string()
    } else {
        format!("{}-{}", cfg.first_port, cfg.last_port)
    };
    aligned_line("Ports", ports);
    aligned_line("Targets", total);
    aligned_line("Slots", capacity);
    aligned_line("Timeout", format!("{}s", cfg.timeout.as_secs()));

    let timeout_secs = cfg.timeout.as_secs();
    let estimate = (total / capacity.max(1) as u64) * timeout_secs + timeout_secs;
    aligned_line("Estimated", fmt_duration(Duration::from_secs(estimate)));
}

pub fn summary(summary: &ScanSummary) {
    println!();
    if summary.cancelled {
        header("sweep cancelled");
    } else {
        header("sweep complete");
    }

    aligned_line("Open", summary.open_found.to_string().green().bold());
    aligned_line("Closed", summary.closed);
    aligned_line("Timed out", summary.timed_out);
    aligned_line("Issued", format!("{}/{}", summary.issued, summary.total));
    aligned_line("Duration", fmt_duration(summary.elapsed));

    end_of_program();
}

pub fn end_of_program() {
    println!("{}", "═".repeat(TOTAL_WIDTH).bright_black());
}

fn fmt_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!(
        "{} hours, {} mins, {} secs",
        secs / 3600,
        (secs % 3600) / 60,
        secs % 60
    )
}
