//! GPU probing.
//!
//! Tries `nvidia-smi` first, then AMD sysfs on Linux. Every failure path
//! returns `None`; callers treat an absent reading as a degraded field.

use std::process::Command;

use crate::collector::percent_of;
use crate::model::GpuUsage;

/// Returns readings for every GPU that answered, or `None`.
pub fn probe() -> Option<Vec<GpuUsage>> {
    try_nvidia().or_else(try_amd)
}

fn try_nvidia() -> Option<Vec<GpuUsage>> {
    let output = Command::new("nvidia-smi")
        .args([
            "--query-gpu=name,utilization.gpu,memory.used,memory.total,temperature.gpu",
            "--format=csv,noheader,nounits",
        ])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    let gpus: Vec<GpuUsage> = stdout.lines().filter_map(parse_nvidia_line).collect();
    if gpus.is_empty() { None } else { Some(gpus) }
}

/// Parses one `nvidia-smi` CSV line:
/// `NVIDIA GeForce RTX 3080, 45, 2048, 10240, 61`
fn parse_nvidia_line(line: &str) -> Option<GpuUsage> {
    let parts: Vec<&str> = line.split(", ").collect();
    if parts.len() < 4 {
        return None;
    }
    // Memory values are reported in MiB.
    let mem_used = parts[2].trim().parse::<u64>().ok()? * 1024 * 1024;
    let mem_total = parts[3].trim().parse::<u64>().ok()? * 1024 * 1024;
    Some(GpuUsage {
        name: parts[0].trim().to_string(),
        load_percent: parts[1].trim().parse().ok()?,
        mem_total,
        mem_used,
        mem_percent: percent_of(mem_used, mem_total),
        temperature_c: parts.get(4).and_then(|t| t.trim().parse().ok()),
    })
}

#[cfg(target_os = "linux")]
fn try_amd() -> Option<Vec<GpuUsage>> {
    use std::fs;

    for card in 0..4 {
        let device = format!("/sys/class/drm/card{}/device", card);
        let read_u64 = |file: &str| -> Option<u64> {
            fs::read_to_string(format!("{}/{}", device, file))
                .ok()?
                .trim()
                .parse()
                .ok()
        };

        let Some(load) = read_u64("gpu_busy_percent") else {
            continue;
        };
        let mem_used = read_u64("mem_info_vram_used").unwrap_or(0);
        let mem_total = read_u64("mem_info_vram_total").unwrap_or(0);

        // Name and temperature live under a numbered hwmon directory.
        let hwmon = fs::read_dir(format!("{}/hwmon", device))
            .ok()
            .and_then(|mut entries| entries.next()?.ok())
            .map(|entry| entry.path());
        let name = hwmon
            .as_ref()
            .and_then(|dir| fs::read_to_string(dir.join("name")).ok())
            .map_or_else(|| "AMD GPU".to_string(), |s| s.trim().to_string());
        let temperature_c = hwmon
            .as_ref()
            .and_then(|dir| fs::read_to_string(dir.join("temp1_input")).ok())
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .map(|millidegrees| millidegrees / 1000);

        return Some(vec![GpuUsage {
            name,
            load_percent: load as f64,
            mem_total,
            mem_used,
            mem_percent: percent_of(mem_used, mem_total),
            temperature_c,
        }]);
    }
    None
}

#[cfg(not(target_os = "linux"))]
fn try_amd() -> Option<Vec<GpuUsage>> {
    None
}
