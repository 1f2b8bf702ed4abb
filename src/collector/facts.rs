//! Host and environment facts.

use std::env;

use sysinfo::System;

use crate::model::SystemFacts;

/// Builds the facts block from `sysinfo` queries and the process
/// environment. Every field degrades to a placeholder rather than failing.
pub fn system_facts(sys: &System) -> SystemFacts {
    let os = match (System::name(), System::os_version()) {
        (Some(name), Some(version)) => format!("{} {}", name, version),
        (Some(name), None) => name,
        _ => "Unknown".to_string(),
    };

    let (cpu_model, cpu_frequency_mhz) = sys
        .cpus()
        .first()
        .map(|cpu| (cpu.brand().trim().to_string(), cpu.frequency()))
        .unwrap_or_else(|| ("Unknown".to_string(), 0));

    SystemFacts {
        os,
        kernel: System::kernel_version().unwrap_or_else(|| "Unknown".to_string()),
        hostname: System::host_name().unwrap_or_else(|| "Unknown".to_string()),
        uptime_secs: System::uptime(),
        shell: shell_name(),
        terminal: terminal_size(),
        desktop: desktop_environment(),
        cpu_model,
        cpu_cores: sys.cpus().len(),
        cpu_frequency_mhz,
    }
}

fn shell_name() -> String {
    if cfg!(windows) {
        env::var("COMSPEC").unwrap_or_else(|_| "cmd.exe".to_string())
    } else {
        env::var("SHELL").unwrap_or_else(|_| "/bin/sh".to_string())
    }
}

fn terminal_size() -> String {
    match crossterm::terminal::size() {
        Ok((cols, rows)) => format!("{}x{}", cols, rows),
        Err(_) => "unknown".to_string(),
    }
}

fn desktop_environment() -> Option<String> {
    match env::consts::OS {
        "linux" => Some(env::var("XDG_CURRENT_DESKTOP").unwrap_or_else(|_| "Unknown".to_string())),
        "macos" => Some("Aqua".to_string()),
        "windows" => Some("Explorer".to_string()),
        _ => None,
    }
}
