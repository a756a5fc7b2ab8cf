//! Column decoding fuzzer.
//!
//! Tests that decoding arbitrary column text, including malformed YAML and
//! broken `\xHH` sequences, doesn't panic.

use honggfuzz::fuzz;
use unobtrusive_yaml_column::testing::test_decode;

fn main() {
    loop {
        fuzz!(|data: &[u8]| {
            test_decode(data);
        });
    }
}
