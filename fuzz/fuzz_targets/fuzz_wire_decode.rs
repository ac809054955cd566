//! Fuzz target: `link::codec::decode`
//!
//! Decoding garbage in either wire format never panics, and anything that
//! decodes re-encodes to a frame that decodes to the same pulse widths.
//!
//! cargo fuzz run fuzz_wire_decode

#![no_main]

use autorc::config::{PwmCalibration, WireFormat};
use autorc::link::CommandSerializer;
use autorc::link::codec::decode;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    for format in [WireFormat::Json, WireFormat::PostcardCobs] {
        let Some(frame) = decode(format, data) else {
            continue;
        };
        let serializer = CommandSerializer::new(PwmCalibration::default(), format);
        if let Ok(bytes) = serializer.encode_frame(&frame) {
            assert_eq!(decode(format, &bytes), Some(frame));
        }
    }
});
