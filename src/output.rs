//! Colored console output for the gateway.
//!
//! Color scheme: blue+bold headers, cyan values, green success,
//! yellow warnings, dimmed secondary text.

use crate::config::ServiceConfig;
use crate::constants::RPC_PATH;
use colored::Colorize;
use std::net::SocketAddr;
use std::time::Duration;

// ── Helpers ────────────────────────────────────────────────────────

/// Format a Duration as a human-readable string.
///
/// - Sub-second values → `"500ms"`
/// - Integer seconds → `"1s"`
/// - Fractional seconds → `"1.5s"`
pub fn format_duration(d: Duration) -> String {
    let ms = d.as_millis();
    if ms < 1000 {
        format!("{ms}ms")
    } else if ms % 1000 == 0 {
        format!("{}s", d.as_secs())
    } else {
        format!("{:.1}s", d.as_secs_f64())
    }
}

// ── Banner & Identity ──────────────────────────────────────────────

/// Print the startup banner with the contract identity.
pub fn print_banner(config: &ServiceConfig) {
    println!();
    println!("{}", "=== ERC-721 Gateway ===".blue().bold());
    println!("  Chain ID:     {}", config.chain_id.to_string().cyan());
    println!("  Contract:     {}", format!("{}", config.contract_address).cyan());
}

/// Print the upstream configuration block.
pub fn print_config(config: &ServiceConfig) {
    println!();
    println!("{}", "Upstream:".blue().bold());
    println!(
        "  {} {}",
        "Endpoint:   ".dimmed(),
        config.upstream_endpoint.as_str().cyan()
    );
    if config.upstream_contract != config.contract_address {
        println!(
            "  {} {}",
            "Contract:   ".dimmed(),
            format!("{}", config.upstream_contract).cyan()
        );
    }
    println!(
        "  {} {}",
        "Timeout:    ".dimmed(),
        format_duration(config.upstream_timeout).cyan()
    );
}

// ── Lifecycle ──────────────────────────────────────────────────────

/// Print the final "running" message with the RPC URL.
pub fn print_running(addr: SocketAddr) {
    println!();
    println!(
        "{}",
        "Gateway running. Press Ctrl+C to stop.".green().bold()
    );
    println!(
        "  HTTP RPC: {}",
        format!("http://{addr}{RPC_PATH}").cyan()
    );
}

/// Print a shutdown message with the reason.
pub fn print_shutdown(reason: &str) {
    println!();
    println!("  {} {}", "SHUTDOWN".yellow().bold(), reason.yellow());
}

// ── Tests ───────────────────────────────────────────────────────────
