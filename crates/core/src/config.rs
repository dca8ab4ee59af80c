//! Configuration system for the simulator.
//!
//! This module defines the configuration structures used to parameterize the
//! simulator. It provides:
//! 1. **Defaults:** The baseline memory map, cache geometry, and pipeline switches.
//! 2. **Structures:** Hierarchical config for memory, cache, and pipeline.
//!
//! Configuration is supplied as JSON by the CLI (`--config`) or built with
//! `Config::default()`.

use serde::Deserialize;

/// Default configuration constants.
///
/// These values define the baseline machine when not explicitly overridden
/// in a configuration file.
mod defaults {
    /// Base address of the text (program) region.
    pub const TEXT_BASE: u32 = 0x0040_0000;

    /// Base address of the static data region.
    pub const DATA_BASE: u32 = 0x1000_0000;

    /// Base address of the stack region.
    pub const STACK_BASE: u32 = 0x7FF0_0000;

    /// Base address of the kernel text region.
    pub const KTEXT_BASE: u32 = 0x8000_0000;

    /// Base address of the kernel data region.
    pub const KDATA_BASE: u32 = 0x9000_0000;

    /// Size of each memory region (1 MiB).
    pub const REGION_SIZE: u32 = 0x0010_0000;

    /// Extra cycles charged per cache miss under the bounded-run command.
    pub const MISS_PENALTY: u64 = 100;
}

/// One named, contiguous, byte-addressable memory region.
#[derive(Debug, Clone, Deserialize)]
pub struct RegionConfig {
    /// Region name (informational, shown in dumps and traces).
    pub name: String,
    /// First byte address covered by the region.
    pub base: u32,
    /// Region size in bytes.
    pub size: u32,
}

/// Memory subsystem configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    /// Address where the program loader places the first instruction word.
    pub text_base: u32,
    /// The machine's memory regions. Accesses outside every region are
    /// silently lenient (reads return zero, writes are dropped).
    pub regions: Vec<RegionConfig>,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        let region = |name: &str, base: u32| RegionConfig {
            name: name.to_owned(),
            base,
            size: defaults::REGION_SIZE,
        };
        Self {
            text_base: defaults::TEXT_BASE,
            regions: vec![
                region("text", defaults::TEXT_BASE),
                region("data", defaults::DATA_BASE),
                region("stack", defaults::STACK_BASE),
                region("ktext", defaults::KTEXT_BASE),
                region("kdata", defaults::KDATA_BASE),
            ],
        }
    }
}

/// Data cache configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// When false, MEM-stage accesses bypass the cache and go straight to
    /// memory.
    pub enabled: bool,
    /// Cycle budget added per bounded run while the miss flag is raised.
    /// Only `run_cycles` applies this; run-to-completion never does.
    pub miss_penalty: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            miss_penalty: defaults::MISS_PENALTY,
        }
    }
}

/// Pipeline behavior switches.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Initial state of the operand-forwarding toggle. With forwarding off,
    /// data hazards stall the decode stage instead.
    pub forwarding: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self { forwarding: true }
    }
}

/// Root configuration type.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Memory map.
    pub memory: MemoryConfig,
    /// Data cache switches.
    pub cache: CacheConfig,
    /// Pipeline switches.
    pub pipeline: PipelineConfig,
}
