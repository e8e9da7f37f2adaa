#![no_main]

use libfuzzer_sys::fuzz_target;
use oauth2util::decode_token_response;

fuzz_target!(|data: &[u8]| {
    let body = String::from_utf8_lossy(data);

    // Should never panic, only return Ok or Err
    let _ = decode_token_response(200, Some("application/json"), &body);

    // Error statuses must never yield a token
    assert!(decode_token_response(400, None, &body).is_err());
});
