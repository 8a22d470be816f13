#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(value) = std::str::from_utf8(data) {
        let lines: Vec<&str> = value.split('\n').collect();
        let split = ws_extensions::parse_values(lines.iter().copied());

        // Separate lines fold like their comma-joined form, unless joining them creates
        // an empty extension.
        let joinable = lines.iter().all(|line| {
            let line = line.trim_matches(|c: char| c == ' ' || c == '\t');
            !line.is_empty() && !line.ends_with(',')
        });
        if joinable {
            assert_eq!(split, ws_extensions::parse_values([lines.join(",").as_str()]));
        }
    }
});
