use std::time::{Duration, Instant};

#[cfg(feature = "cli")]
use std::sync::Mutex;
#[cfg(feature = "cli")]
use sysinfo::{Pid, System};

#[derive(Debug, Clone)]
pub struct PhaseTiming {
    pub phase: String,
    pub elapsed: Duration,
}

/// 記錄每個階段（load / transform / store）的耗時，
/// 啟用監控時額外取樣行程的 CPU 與記憶體
pub struct RunMonitor {
    start_time: Instant,
    last_mark: Instant,
    phases: Vec<PhaseTiming>,
    #[cfg(feature = "cli")]
    sampler: Option<ProcessSampler>,
}

impl RunMonitor {
    pub fn new(system_stats: bool) -> Self {
        let now = Instant::now();
        #[cfg(not(feature = "cli"))]
        let _ = system_stats;
        Self {
            start_time: now,
            last_mark: now,
            phases: Vec::new(),
            #[cfg(feature = "cli")]
            sampler: if system_stats {
                ProcessSampler::new()
            } else {
                None
            },
        }
    }

    /// 結束一個階段並記錄其耗時
    pub fn finish_phase(&mut self, phase: &str) -> Duration {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_mark);
        self.last_mark = now;
        self.phases.push(PhaseTiming {
            phase: phase.to_string(),
            elapsed,
        });

        tracing::info!("⏱️  {} took {:.2}s", phase, elapsed.as_secs_f64());
        #[cfg(feature = "cli")]
        if let Some(sampler) = &self.sampler {
            sampler.log(phase);
        }
        elapsed
    }

    pub fn phases(&self) -> &[PhaseTiming] {
        &self.phases
    }

    pub fn total_elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn log_final_stats(&self) {
        tracing::info!(
            "Time elapsed: {:.2} seconds.",
            self.total_elapsed().as_secs_f64()
        );
        #[cfg(feature = "cli")]
        if let Some(sampler) = &self.sampler {
            sampler.log_peak();
        }
    }

    pub fn is_sampling(&self) -> bool {
        #[cfg(feature = "cli")]
        {
            self.sampler.is_some()
        }
        #[cfg(not(feature = "cli"))]
        {
            false
        }
    }
}

impl Default for RunMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}

#[cfg(feature = "cli")]
struct ProcessSampler {
    system: Mutex<System>,
    pid: Pid,
    peak_memory_mb: Mutex<u64>,
}

#[cfg(feature = "cli")]
impl ProcessSampler {
    fn new() -> Option<Self> {
        let pid = match sysinfo::get_current_pid() {
            Ok(pid) => pid,
            Err(e) => {
                tracing::warn!("System monitoring disabled: {}", e);
                return None;
            }
        };
        let mut system = System::new_all();
        system.refresh_all();
        Some(Self {
            system: Mutex::new(system),
            pid,
            peak_memory_mb: Mutex::new(0),
        })
    }

    fn log(&self, phase: &str) {
        let Ok(mut system) = self.system.lock() else {
            return;
        };
        system.refresh_all();
        let Some(process) = system.process(self.pid) else {
            return;
        };

        let memory_mb = process.memory() / 1024 / 1024;
        if let Ok(mut peak) = self.peak_memory_mb.lock() {
            *peak = (*peak).max(memory_mb);
        }

        tracing::info!(
            "📊 {} - CPU: {:.1}%, Memory: {}MB",
            phase,
            process.cpu_usage(),
            memory_mb
        );
    }

    fn log_peak(&self) {
        if let Ok(peak) = self.peak_memory_mb.lock() {
            tracing::info!("📊 Peak Memory: {}MB", *peak);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phases_are_recorded_in_order() {
        let mut monitor = RunMonitor::new(false);
        monitor.finish_phase("load");
        monitor.finish_phase("transform");
        monitor.finish_phase("store");

        let names: Vec<&str> = monitor.phases().iter().map(|p| p.phase.as_str()).collect();
        assert_eq!(names, vec!["load", "transform", "store"]);
        assert!(!monitor.is_sampling());

        let summed: Duration = monitor.phases().iter().map(|p| p.elapsed).sum();
        assert!(summed <= monitor.total_elapsed());
    }
}
