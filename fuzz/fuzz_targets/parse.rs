#![no_main]

use jsonsax::{parse, RecordingHandler};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut handler = RecordingHandler::new();
    // A `Syntax`/`Aborted` error is an expected outcome for arbitrary input;
    // what this target actually watches for is a panic or a hang.
    let _ = parse(data, &mut handler);
});
