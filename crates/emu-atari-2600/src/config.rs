//! Console configuration.

/// Configuration for an NTSC Atari 2600.
pub struct AtariConfig {
    /// Cartridge ROM image (2K, 4K or 8K F8).
    pub rom: Vec<u8>,
}
