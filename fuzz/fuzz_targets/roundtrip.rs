//! Text round-trip fuzzer.
//!
//! Tests that encode → decode gives back the expanded text for both the
//! compact and the standard encoder.

use honggfuzz::fuzz;
use unobtrusive_yaml_column::testing::test_roundtrip;

fn main() {
    loop {
        fuzz!(|data: &[u8]| {
            test_roundtrip(data);
        });
    }
}
