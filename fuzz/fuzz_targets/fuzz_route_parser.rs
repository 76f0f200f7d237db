#![no_main]

use geoapi_viewer::Route;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(path) = std::str::from_utf8(data) else {
        return;
    };

    let route = Route::resolve(path);
    assert_eq!(Route::resolve(&route.path()), route);
});
