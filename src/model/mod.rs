//! Data model for collected metrics.

mod snapshot;

pub use snapshot::{
    CpuUsage, DiskUsage, GpuUsage, LoadAverages, MemoryUsage, Resources, Snapshot, SwapUsage,
    SystemFacts,
};
