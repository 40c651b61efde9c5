#![no_main]

use gbxml_scene::framing::compute_framing;
use gbxml_scene::mesher::build_mesh;
use gbxml_scene::parser::parse_building;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    // Anything the parser accepts must mesh and frame without panicking
    if let Ok(building) = parse_building(text) {
        for surface in &building.surfaces {
            let _ = build_mesh(surface);
        }
        let _ = compute_framing(&building.surfaces);
    }
});
