//! Memory region tests: word round-trips, region boundaries, and the
//! deliberate leniency on unmapped addresses.

use pretty_assertions::assert_eq;

use mupipe_core::config::MemoryConfig;
use mupipe_core::mem::Memory;

fn memory() -> Memory {
    Memory::new(&MemoryConfig::default())
}

#[test]
fn word_round_trip_in_each_region() {
    let mut mem = memory();
    for base in [0x0040_0000u32, 0x1000_0000, 0x7FF0_0000, 0x8000_0000, 0x9000_0000] {
        mem.write32(base + 0x40, 0x1122_3344);
        assert_eq!(mem.read32(base + 0x40), 0x1122_3344, "region at {base:#x}");
    }
}

#[test]
fn unmapped_reads_return_zero() {
    let mem = memory();
    assert_eq!(mem.read32(0x0000_0010), 0);
    assert_eq!(mem.read32(0xDEAD_0000), 0);
}

#[test]
fn unmapped_writes_are_dropped() {
    let mut mem = memory();
    mem.write32(0x0000_0010, 0xFFFF_FFFF);
    assert_eq!(mem.read32(0x0000_0010), 0);
}

#[test]
fn last_word_of_a_region_is_addressable() {
    let mut mem = memory();
    let last = 0x0040_0000 + 0x0010_0000 - 4;
    mem.write32(last, 0xCAFE_F00D);
    assert_eq!(mem.read32(last), 0xCAFE_F00D);
}

#[test]
fn straddling_read_past_the_region_end_is_lenient() {
    let mut mem = memory();
    let end = 0x0040_0000 + 0x0010_0000;
    mem.write32(end - 2, 0x1234_5678); // would straddle: dropped
    assert_eq!(mem.read32(end - 2), 0);
}

#[test]
fn clear_zeroes_every_region() {
    let mut mem = memory();
    mem.write32(0x1000_0004, 7);
    mem.clear();
    assert_eq!(mem.read32(0x1000_0004), 0);
}

#[test]
fn words_are_little_endian_in_region_bytes() {
    // Two adjacent words share no bytes; the LE layout is observable through
    // halfword-granular cache merges, pinned in the cache tests. Here we pin
    // that adjacent words do not interfere.
    let mut mem = memory();
    mem.write32(0x1000_0000, 0xAABB_CCDD);
    mem.write32(0x1000_0004, 0x1122_3344);
    assert_eq!(mem.read32(0x1000_0000), 0xAABB_CCDD);
    assert_eq!(mem.read32(0x1000_0004), 0x1122_3344);
}
