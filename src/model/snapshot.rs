//! Snapshot structures for one tick of collected metrics.
//!
//! A snapshot is captured once per refresh tick, rendered, and discarded.
//! Optional fields model degraded sources: a probe that fails on a given
//! tick simply leaves its field absent instead of failing the whole sample.

use crate::fmt::{format_mhz, format_uptime};

/// One tick's collected metrics, immutable after creation.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    /// Capture time, seconds since the Unix epoch.
    pub timestamp: i64,

    /// Host and environment facts.
    pub system: SystemFacts,

    /// Resource readings (CPU, memory, disks, GPU).
    pub resources: Resources,
}

/// Host and environment facts.
/// Source: `sysinfo` system queries plus process environment.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SystemFacts {
    /// OS name and release, e.g. `"Linux 6.8"`.
    pub os: String,
    /// Kernel version string.
    pub kernel: String,
    pub hostname: String,
    /// Seconds since boot.
    pub uptime_secs: u64,
    /// Login shell, from `$SHELL` (or `%COMSPEC%` on Windows).
    pub shell: String,
    /// Terminal geometry at capture time, e.g. `"120x40"`.
    pub terminal: String,
    /// Desktop environment, absent on headless hosts.
    pub desktop: Option<String>,
    /// CPU model name.
    pub cpu_model: String,
    /// Logical core count.
    pub cpu_cores: usize,
    /// Base frequency of the first core, MHz.
    pub cpu_frequency_mhz: u64,
}

impl SystemFacts {
    /// Ordered label/value pairs for display.
    pub fn lines(&self) -> Vec<(&'static str, String)> {
        let mut lines = vec![
            ("OS", self.os.clone()),
            ("Kernel", self.kernel.clone()),
            ("Hostname", self.hostname.clone()),
            ("Uptime", format_uptime(self.uptime_secs)),
            ("Shell", self.shell.clone()),
            ("Terminal Size", self.terminal.clone()),
        ];
        if let Some(desktop) = &self.desktop {
            lines.push(("Desktop", desktop.clone()));
        }
        lines.push(("CPU", self.cpu_model.clone()));
        lines.push(("Cores", self.cpu_cores.to_string()));
        lines.push(("Frequency", format_mhz(self.cpu_frequency_mhz)));
        lines
    }
}

/// Resource readings for one tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Resources {
    pub cpu: CpuUsage,
    pub memory: MemoryUsage,
    /// Mounted filesystems, in mount order.
    pub disks: Vec<DiskUsage>,
    /// GPU readings; `None` when no GPU probe succeeded this tick.
    pub gpus: Option<Vec<GpuUsage>>,
}

/// CPU utilization.
/// Source: two `sysinfo` CPU refreshes separated by the sampling window.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CpuUsage {
    /// Overall utilization, 0-100.
    pub percent: f64,
    /// Per-core utilization, 0-100 each. Empty when unavailable.
    pub per_core: Vec<f64>,
    /// 1/5/15 minute load averages, absent on platforms without them.
    pub load_avg: Option<LoadAverages>,
}

/// System load averages.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LoadAverages {
    pub one: f64,
    pub five: f64,
    pub fifteen: f64,
}

/// Memory utilization in bytes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryUsage {
    pub total: u64,
    pub used: u64,
    pub available: u64,
    /// Used fraction, 0-100.
    pub percent: f64,
    /// Absent when the host has no swap configured.
    pub swap: Option<SwapUsage>,
}

/// Swap utilization in bytes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SwapUsage {
    pub total: u64,
    pub used: u64,
    pub percent: f64,
}

/// One mounted filesystem.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DiskUsage {
    /// Mount point, e.g. `"/"` or `"/home"`.
    pub mount: String,
    pub total: u64,
    pub used: u64,
    pub free: u64,
    pub percent: f64,
}

/// One GPU reading.
/// Source: `nvidia-smi` query or AMD sysfs, whichever answers first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GpuUsage {
    pub name: String,
    /// Compute utilization, 0-100.
    pub load_percent: f64,
    /// VRAM in bytes.
    pub mem_total: u64,
    pub mem_used: u64,
    pub mem_percent: f64,
    /// Core temperature in Celsius, when reported.
    pub temperature_c: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facts_lines_ordered() {
        let facts = SystemFacts {
            os: "Linux 6.8".to_string(),
            desktop: Some("GNOME".to_string()),
            cpu_cores: 8,
            ..SystemFacts::default()
        };
        let lines = facts.lines();
        assert_eq!(lines[0].0, "OS");
        assert_eq!(lines[0].1, "Linux 6.8");
        // Desktop sits between Terminal Size and CPU when present.
        assert_eq!(lines[6], ("Desktop", "GNOME".to_string()));
        assert_eq!(lines[8], ("Cores", "8".to_string()));
    }

    #[test]
    fn test_facts_lines_without_desktop() {
        let facts = SystemFacts::default();
        let lines = facts.lines();
        assert!(lines.iter().all(|(label, _)| *label != "Desktop"));
        assert_eq!(lines.len(), 9);
    }
}
