use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tether_core::backends::EmscriptenBackend;
use tether_core::io::{Descriptor, IoBackend, Permissions, SEEK_CUR, SEEK_END, SEEK_SET};
use tether_core::offset::{parse_hex_offset, OffsetRegister, MAX_HEX_LEN};
use tether_core::provider::{ByteProvider, ProviderResult};

/// Provider double that records every offset notification it receives.
#[derive(Default)]
struct RecordingProvider {
    notified: Mutex<Vec<String>>,
}

impl RecordingProvider {
    fn notifications(&self) -> Vec<String> {
        self.notified.lock().expect("notifications lock").clone()
    }
}

#[async_trait]
impl ByteProvider for RecordingProvider {
    fn notify_offset(&self, offset_hex: &str) {
        self.notified.lock().expect("notifications lock").push(offset_hex.to_string());
    }

    async fn fetch(&self, _count: usize) -> ProviderResult<Vec<u8>> {
        Ok(Vec::new())
    }
}

fn harness() -> (Arc<RecordingProvider>, EmscriptenBackend, Descriptor) {
    let provider = Arc::new(RecordingProvider::default());
    let backend = EmscriptenBackend::new(provider.clone());
    let desc = backend.open("emscripten:///", Permissions::all(), 0).expect("descriptor");
    (provider, backend, desc)
}

/// Absolute seeks return exactly the requested offset, and the mirror string
/// round-trips back to it.
#[test]
fn seek_set_round_trips_through_the_mirror() {
    let (provider, backend, mut desc) = harness();

    for offset in [0u64, 1, 0x1000, 0xdead_beef, u64::MAX - 1] {
        assert_eq!(backend.seek(&mut desc, offset, SEEK_SET), offset);
        let mirror = provider.notifications().last().cloned().expect("notification");
        assert_eq!(parse_hex_offset(&mirror).expect("decode"), offset);
    }
}

/// The mirror is lowercase hex, 0x-prefixed, and never longer than the wire
/// format allows.
#[test]
fn mirror_string_uses_the_wire_format() {
    let (provider, backend, mut desc) = harness();

    backend.seek(&mut desc, 0x1000, SEEK_SET);
    assert_eq!(provider.notifications().last().map(String::as_str), Some("0x1000"));

    backend.seek(&mut desc, u64::MAX, SEEK_SET);
    let mirror = provider.notifications().last().cloned().expect("notification");
    assert_eq!(mirror, "0xffffffffffffffff");
    assert_eq!(mirror.len(), MAX_HEX_LEN);
}

/// Relative seeks compose with absolute ones for deltas inside the narrowed
/// signed range.
#[test]
fn seek_cur_composes_with_seek_set() {
    let (_, backend, mut desc) = harness();

    backend.seek(&mut desc, 0x4000, SEEK_SET);
    assert_eq!(backend.seek(&mut desc, 0x20, SEEK_CUR), 0x4020);

    // A negative delta arrives as the two's complement of the 32-bit value.
    assert_eq!(backend.seek(&mut desc, (-0x10i64) as u64, SEEK_CUR), 0x4010);
}

/// Relative deltas narrow to 32 bits: a delta of exactly 2^32 collapses to
/// zero and i32::MAX + 1 becomes a backward jump. Known truncation boundary.
#[test]
fn seek_cur_delta_narrows_to_i32() {
    let (_, backend, mut desc) = harness();

    backend.seek(&mut desc, 0x1_0000_0000, SEEK_SET);
    assert_eq!(backend.seek(&mut desc, 1u64 << 32, SEEK_CUR), 0x1_0000_0000);

    assert_eq!(
        backend.seek(&mut desc, 0x8000_0000u64, SEEK_CUR),
        0x1_0000_0000 - 0x8000_0000
    );
}

/// Seeking to the end always lands on the unbounded-end sentinel, whatever
/// came before.
#[test]
fn seek_end_is_the_max_offset() {
    let (_, backend, mut desc) = harness();

    assert_eq!(backend.seek(&mut desc, 0, SEEK_END), u64::MAX);

    backend.seek(&mut desc, 0x1234, SEEK_SET);
    assert_eq!(backend.seek(&mut desc, 0x9999, SEEK_END), u64::MAX);
}

/// An unrecognized whence is a no-op that still returns the unchanged offset
/// and still re-notifies the provider.
#[test]
fn unknown_whence_is_a_lenient_no_op() {
    let (provider, backend, mut desc) = harness();

    backend.seek(&mut desc, 0x500, SEEK_SET);
    let before = provider.notifications().len();

    assert_eq!(backend.seek(&mut desc, 0xffff, 7), 0x500);
    assert_eq!(backend.offset(), 0x500);

    let after = provider.notifications();
    assert_eq!(after.len(), before + 1);
    assert_eq!(after.last().map(String::as_str), Some("0x500"));
}

#[test]
fn register_starts_at_zero() {
    let (_, backend, _) = harness();
    assert_eq!(backend.offset(), 0);
}

#[test]
fn offset_register_formats_and_advances() {
    let mut reg = OffsetRegister::new();
    assert_eq!(reg.to_hex(), "0x0");

    reg.set(0xABCD);
    assert_eq!(reg.to_hex(), "0xabcd");

    reg.advance((-1i64) as u64);
    assert_eq!(reg.value(), 0xABCC);
}

#[test]
fn parse_hex_offset_accepts_wire_and_initial_forms() {
    assert_eq!(parse_hex_offset("0x1000").expect("hex"), 0x1000);
    assert_eq!(parse_hex_offset("0xffffffffffffffff").expect("hex"), u64::MAX);
    assert_eq!(parse_hex_offset("0").expect("decimal zero"), 0);
    assert!(parse_hex_offset("zzz").is_err());
    assert!(parse_hex_offset("").is_err());
    assert!(parse_hex_offset("0x").is_err());
}
