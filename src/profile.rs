/// Raw device/network measurements collected by the host.
///
/// The engine never probes capabilities itself; the host samples whatever its
/// platform exposes (frame rate, heap pressure, connection class) and hands
/// the summary in. Missing data should be left at the defaults, which describe
/// a mid-range device.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceMetrics {
    /// Recent frames per second.
    pub fps: f64,
    /// Used heap as a fraction of the heap limit, `0.0..=1.0`.
    pub memory_pressure: f64,
    /// Physical memory in gigabytes.
    pub device_memory_gb: f64,
    /// Logical CPU cores.
    pub cpu_cores: u32,
    /// Whether the connection class is a slow one (2g/3g tier).
    pub slow_connection: bool,
    /// Whether the host considers this a mobile form factor.
    pub mobile: bool,
}

impl Default for DeviceMetrics {
    fn default() -> Self {
        Self {
            fps: 60.0,
            memory_pressure: 0.0,
            device_memory_gb: 4.0,
            cpu_cores: 4,
            slow_connection: false,
            mobile: false,
        }
    }
}

/// The capability summary the engine consumes.
///
/// This is injected configuration: derive it from [`DeviceMetrics`] via
/// [`DeviceProfile::from_metrics`], or construct it directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceProfile {
    /// Whether to window the list at all. When off, the visible range is the
    /// full list and configured overscan is used as-is.
    pub virtualize: bool,
    /// Constrained device: overscan floor drops from 5 to 3.
    pub low_end: bool,
    /// Substitute same-height placeholders for real content while a scroll
    /// session is active.
    pub degrade_fidelity: bool,
}

impl Default for DeviceProfile {
    fn default() -> Self {
        Self {
            virtualize: true,
            low_end: false,
            degrade_fidelity: false,
        }
    }
}

impl DeviceProfile {
    /// Derives a profile from raw measurements.
    ///
    /// Heuristics: a device is low-end at <= 2 GB memory or <= 2 cores; render
    /// fidelity degrades when the device is low-end, sustains under 30 fps,
    /// runs above 80% heap, or is mobile on a slow connection; windowing kicks
    /// in for low-end devices and under memory pressure above 60%.
    pub fn from_metrics(m: &DeviceMetrics) -> Self {
        let low_end = m.device_memory_gb <= 2.0 || m.cpu_cores <= 2;
        let slow_device = m.fps < 30.0 || m.memory_pressure > 0.8;
        Self {
            virtualize: low_end || m.memory_pressure > 0.6,
            low_end,
            degrade_fidelity: low_end || slow_device || (m.mobile && m.slow_connection),
        }
    }

    /// The overscan actually applied for this profile.
    ///
    /// A windowing profile raises the configured overscan to a floor of 5 (3
    /// on low-end devices) to mask pop-in; a non-windowing profile renders
    /// everything anyway, so the configured value passes through.
    pub fn effective_overscan(&self, configured: usize) -> usize {
        if self.virtualize {
            configured.max(if self.low_end { 3 } else { 5 })
        } else {
            configured
        }
    }
}
