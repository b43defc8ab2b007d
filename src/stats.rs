use sysinfo::System;

/// The latest CPU and memory readings, both whole percentages in `0..=100`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UsageSnapshot {
    pub cpu_percent: u8,
    pub ram_percent: u8,
}

impl UsageSnapshot {
    pub fn new(cpu_percent: u8, ram_percent: u8) -> Self {
        Self {
            cpu_percent: cpu_percent.min(100),
            ram_percent: ram_percent.min(100),
        }
    }

    /// Text shown when hovering the tray icon.
    pub fn tooltip(&self) -> String {
        format!("CPU: {}%\nRAM: {}%", self.cpu_percent, self.ram_percent)
    }
}

/// Anything that can produce a fresh usage reading.
pub trait UsageSource {
    fn sample(&mut self) -> UsageSnapshot;
}

pub struct Stats {
    sys: System,
}

impl Default for Stats {
    fn default() -> Self {
        Self::new()
    }
}

impl Stats {
    pub fn new() -> Self {
        let mut sys = System::new();
        // Baseline so the first tick has a delta to measure against.
        sys.refresh_cpu();
        sys.refresh_memory();
        Self { sys }
    }

    pub fn cpu_usage(&mut self) -> u8 {
        self.sys.refresh_cpu();
        to_percent(self.sys.global_cpu_info().cpu_usage())
    }

    pub fn ram_usage(&mut self) -> u8 {
        self.sys.refresh_memory();
        to_percent(memory_percent(self.sys.used_memory(), self.sys.total_memory()))
    }
}

impl UsageSource for Stats {
    fn sample(&mut self) -> UsageSnapshot {
        UsageSnapshot::new(self.cpu_usage(), self.ram_usage())
    }
}

fn memory_percent(used: u64, total: u64) -> f32 {
    if total == 0 {
        return 0.0;
    }
    (used as f64 / total as f64 * 100.0) as f32
}

fn to_percent(usage: f32) -> u8 {
    if usage.is_nan() {
        return 0;
    }
    usage.clamp(0.0, 100.0).round() as u8
}
