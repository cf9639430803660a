//! Adaptive transfer buffer for fetched payloads.
//!
//! [`TransferBuffer`] accumulates streamed response bytes with a hard
//! 32 MiB cap, doubling growth, and a best-effort free-memory check
//! before each enlargement. The initial capacity is picked once per
//! process from the host's installed RAM, so small devices start small.
//!
//! # Invariants
//!
//! - `size() < capacity()` always: one byte past the payload is reserved
//!   for a zero terminator, kept in place after every accepted write.
//! - Capacity only grows, only by doubling, and never past
//!   [`MAX_TRANSFER_SIZE`].
//! - A rejected write leaves the buffer untouched.

use std::sync::OnceLock;

use crate::error::{Result, SearchError};

/// Hard cap on a single transfer: 32 MiB.
pub const MAX_TRANSFER_SIZE: usize = 32 * 1024 * 1024;

/// Initial capacity when installed RAM cannot be detected.
const DEFAULT_CAPACITY: usize = 128 * 1024;

/// Initial capacity tiers keyed on total installed RAM.
const TIER_SMALL: usize = 16 * 1024;
const TIER_MEDIUM: usize = 64 * 1024;
const TIER_LARGE: usize = 256 * 1024;

/// A growable byte buffer holding one fetched payload.
pub struct TransferBuffer {
    /// Payload bytes followed by a single zero terminator.
    data: Vec<u8>,
    /// Logical capacity. Grows by doubling, clamped to [`MAX_TRANSFER_SIZE`].
    capacity: usize,
    /// Best-effort probe of free host memory. `None` means unknown,
    /// which permits growth.
    free_memory: fn() -> Option<u64>,
}

impl TransferBuffer {
    /// Create a buffer sized for this host (see [`initial_capacity`]).
    pub fn new() -> Self {
        Self::with_capacity(initial_capacity())
    }

    /// Create a buffer with an explicit starting capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_probe(capacity.max(2), available_memory_bytes)
    }

    fn with_capacity_and_probe(capacity: usize, free_memory: fn() -> Option<u64>) -> Self {
        let mut data = Vec::with_capacity(capacity);
        data.push(0);
        Self {
            data,
            capacity,
            free_memory,
        }
    }

    /// Bytes accumulated so far, excluding the terminator.
    pub fn size(&self) -> usize {
        self.data.len() - 1
    }

    /// Current logical capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The payload, without the terminator.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data[..self.data.len() - 1]
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Append a chunk, growing the buffer if needed.
    ///
    /// Returns the number of bytes accepted (always `chunk.len()` on
    /// success — partial writes never happen).
    ///
    /// # Errors
    ///
    /// - [`SearchError::TooLarge`] if the payload plus terminator would
    ///   exceed [`MAX_TRANSFER_SIZE`].
    /// - [`SearchError::LowMemory`] if the host reports less free memory
    ///   than the grown capacity. The buffer is left unchanged.
    pub fn write(&mut self, chunk: &[u8]) -> Result<usize> {
        let required = self.size() + chunk.len() + 1;
        if required > MAX_TRANSFER_SIZE {
            return Err(SearchError::TooLarge {
                needed: required,
                limit: MAX_TRANSFER_SIZE,
            });
        }

        if required > self.capacity {
            let mut new_capacity = self.capacity.max(1);
            while new_capacity < required {
                new_capacity *= 2;
            }
            // Doubling past the halfway point lands exactly on the cap.
            if new_capacity > MAX_TRANSFER_SIZE / 2 {
                new_capacity = MAX_TRANSFER_SIZE;
            }

            if let Some(free) = (self.free_memory)() {
                if free < new_capacity as u64 {
                    return Err(SearchError::LowMemory {
                        needed: new_capacity,
                        free,
                    });
                }
            }

            self.data.reserve_exact(new_capacity - self.data.len());
            tracing::debug!(
                old_capacity = self.capacity,
                new_capacity,
                "transfer buffer grown"
            );
            self.capacity = new_capacity;
        }

        self.data.pop();
        self.data.extend_from_slice(chunk);
        self.data.push(0);
        Ok(chunk.len())
    }
}

impl Default for TransferBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// The process-wide initial buffer capacity, detected once.
///
/// | Installed RAM | Capacity |
/// |---------------|----------|
/// | < 128 MB      | 16 KiB   |
/// | < 512 MB      | 64 KiB   |
/// | ≥ 512 MB      | 256 KiB  |
/// | unknown       | 128 KiB  |
pub fn initial_capacity() -> usize {
    static CAPACITY: OnceLock<usize> = OnceLock::new();
    *CAPACITY.get_or_init(|| {
        let capacity = initial_capacity_for(total_memory_bytes());
        tracing::debug!(capacity, "detected initial transfer buffer capacity");
        capacity
    })
}

fn initial_capacity_for(total: Option<u64>) -> usize {
    match total {
        Some(bytes) if bytes < 128 * 1024 * 1024 => TIER_SMALL,
        Some(bytes) if bytes < 512 * 1024 * 1024 => TIER_MEDIUM,
        Some(_) => TIER_LARGE,
        None => DEFAULT_CAPACITY,
    }
}

/// Total installed RAM, best effort.
///
/// - macOS: `sysctl hw.memsize`
/// - Linux: `/proc/meminfo` `MemTotal`
/// - Other: `None`
fn total_memory_bytes() -> Option<u64> {
    if cfg!(target_os = "macos") {
        let s = run_sysctl("hw.memsize")?;
        return s.parse::<u64>().ok();
    }
    if cfg!(target_os = "linux") {
        return read_meminfo_field("MemTotal:");
    }
    None
}

/// Free host RAM, best effort. `None` on platforms with no probe.
///
/// - macOS: `sysctl vm.page_free_count` × `sysctl hw.pagesize`
/// - Linux: `/proc/meminfo` `MemAvailable`
fn available_memory_bytes() -> Option<u64> {
    if cfg!(target_os = "macos") {
        let page_size = run_sysctl("hw.pagesize")?.parse::<u64>().ok()?;
        let free_pages = run_sysctl("vm.page_free_count")?.parse::<u64>().ok()?;
        return Some(free_pages.saturating_mul(page_size));
    }
    if cfg!(target_os = "linux") {
        return read_meminfo_field("MemAvailable:");
    }
    None
}

fn run_sysctl(name: &str) -> Option<String> {
    let out = std::process::Command::new("sysctl")
        .arg("-n")
        .arg(name)
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    let s = String::from_utf8(out.stdout).ok()?;
    let trimmed = s.trim().to_owned();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

fn read_meminfo_field(prefix: &str) -> Option<u64> {
    let content = std::fs::read_to_string("/proc/meminfo").ok()?;
    for line in content.lines() {
        if let Some(rest) = line.strip_prefix(prefix) {
            if let Some(kb) = rest.split_whitespace().next() {
                if let Ok(kb) = kb.parse::<u64>() {
                    return Some(kb.saturating_mul(1024));
                }
            }
        }
    }
    None
}
