//! Metrics collection.
//!
//! The [`Collector`] owns reusable `sysinfo` state and produces one
//! immutable [`Snapshot`] per refresh tick. Sampling never fails: a probe
//! that cannot answer (GPU, load averages, an unmounted disk) leaves its
//! field absent instead of erroring the tick.

mod facts;
mod gpu;

use std::thread;
use std::time::Duration;

use sysinfo::{CpuRefreshKind, Disks, MemoryRefreshKind, RefreshKind, System};
use tracing::warn;

use crate::model::{CpuUsage, DiskUsage, LoadAverages, MemoryUsage, Resources, Snapshot, SwapUsage};

/// Window between the two CPU refreshes that bracket a utilization
/// reading. The only intentional blocking inside a sample.
const CPU_SAMPLE_WINDOW: Duration = Duration::from_millis(100);

/// Samples host metrics into snapshots.
///
/// Keeps one `sysinfo::System` alive across ticks so CPU readings have a
/// stable baseline and per-tick allocation stays low.
pub struct Collector {
    sys: System,
    disks: Disks,
    gpu_available: bool,
}

impl Collector {
    /// Creates a collector and primes the CPU/memory baselines.
    pub fn new() -> Self {
        let mut sys = System::new_with_specifics(
            RefreshKind::new()
                .with_cpu(CpuRefreshKind::everything())
                .with_memory(MemoryRefreshKind::everything()),
        );
        sys.refresh_cpu_usage();
        sys.refresh_memory();
        let disks = Disks::new_with_refreshed_list();

        let gpu_available = gpu::probe().is_some();
        if !gpu_available {
            warn!("no GPU source responded, GPU section will be omitted");
        }

        Self {
            sys,
            disks,
            gpu_available,
        }
    }

    /// Whether the GPU probe answered at startup.
    pub fn gpu_available(&self) -> bool {
        self.gpu_available
    }

    /// Collects one snapshot.
    ///
    /// Blocks for [`CPU_SAMPLE_WINDOW`] to bracket the CPU utilization
    /// reading; everything else is a non-blocking query.
    pub fn sample(&mut self) -> Snapshot {
        self.sys.refresh_cpu_usage();
        thread::sleep(CPU_SAMPLE_WINDOW.max(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL));
        self.sys.refresh_cpu_usage();
        self.sys.refresh_memory();
        self.disks.refresh();

        Snapshot {
            timestamp: chrono::Utc::now().timestamp(),
            system: facts::system_facts(&self.sys),
            resources: Resources {
                cpu: self.cpu_usage(),
                memory: self.memory_usage(),
                disks: self.disk_usage(),
                gpus: if self.gpu_available { gpu::probe() } else { None },
            },
        }
    }

    fn cpu_usage(&self) -> CpuUsage {
        let load = System::load_average();
        // All-zero load averages mean the platform does not report them.
        let load_avg = (load.one != 0.0 || load.five != 0.0 || load.fifteen != 0.0).then_some(
            LoadAverages {
                one: load.one,
                five: load.five,
                fifteen: load.fifteen,
            },
        );
        CpuUsage {
            percent: f64::from(self.sys.global_cpu_usage()),
            per_core: self
                .sys
                .cpus()
                .iter()
                .map(|cpu| f64::from(cpu.cpu_usage()))
                .collect(),
            load_avg,
        }
    }

    fn memory_usage(&self) -> MemoryUsage {
        let total = self.sys.total_memory();
        let used = self.sys.used_memory();
        let swap_total = self.sys.total_swap();
        let swap_used = self.sys.used_swap();
        MemoryUsage {
            total,
            used,
            available: self.sys.available_memory(),
            percent: percent_of(used, total),
            swap: (swap_total > 0).then_some(SwapUsage {
                total: swap_total,
                used: swap_used,
                percent: percent_of(swap_used, swap_total),
            }),
        }
    }

    fn disk_usage(&self) -> Vec<DiskUsage> {
        self.disks
            .list()
            .iter()
            .filter(|disk| disk.total_space() > 0)
            .map(|disk| {
                let total = disk.total_space();
                let free = disk.available_space();
                let used = total.saturating_sub(free);
                DiskUsage {
                    mount: disk.mount_point().to_string_lossy().into_owned(),
                    total,
                    used,
                    free,
                    percent: percent_of(used, total),
                }
            })
            .collect()
    }
}

impl Default for Collector {
    fn default() -> Self {
        Self::new()
    }
}

/// `used / total` as 0-100, zero for an empty total.
pub(crate) fn percent_of(used: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        used as f64 / total as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_of() {
        assert_eq!(percent_of(0, 0), 0.0);
        assert_eq!(percent_of(50, 200), 25.0);
        assert_eq!(percent_of(200, 200), 100.0);
    }

    #[test]
    fn test_sample_produces_consistent_snapshot() {
        let mut collector = Collector::new();
        let snapshot = collector.sample();

        assert!(snapshot.timestamp > 0);
        assert!(!snapshot.system.os.is_empty());
        assert!(snapshot.resources.cpu.percent >= 0.0);
        for disk in &snapshot.resources.disks {
            assert!(disk.total > 0);
            assert_eq!(disk.used + disk.free, disk.total);
            assert!((0.0..=100.0).contains(&disk.percent));
        }
        if let Some(swap) = &snapshot.resources.memory.swap {
            assert!(swap.total > 0);
        }
    }
}
