#![no_main]

use libfuzzer_sys::fuzz_target;
use oauth2util::decode_token_response;

fuzz_target!(|data: &[u8]| {
    let body = String::from_utf8_lossy(data);
    let _ = decode_token_response(200, Some("application/x-www-form-urlencoded"), &body);
});
