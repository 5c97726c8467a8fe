#![no_main]

use libfuzzer_sys::fuzz_target;
use snapq::ds::HistoryWindow;

// Fuzz arbitrary operation sequences on HistoryWindow
//
// Tests random sequences of push_front, staged_snapshot, snapshot, and clear
// against a plain Vec model to find ordering or eviction bugs.
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let capacity = data[0] as usize % 16;
    let mut window: HistoryWindow<u8> = HistoryWindow::new(Some(capacity));
    let mut model: Vec<u8> = Vec::new(); // newest first

    let mut idx = 1;
    while idx + 1 < data.len() {
        let op = data[idx] % 4;
        let value = data[idx + 1];

        match op {
            0 => {
                window.push_front(value);
                if capacity > 0 {
                    model.insert(0, value);
                    model.truncate(capacity);
                }
            }
            1 => {
                let staged = window.staged_snapshot(&value);
                if capacity > 0 {
                    assert_eq!(staged[0], value);
                    assert!(staged.len() <= capacity);
                } else {
                    assert!(staged.is_empty());
                }
            }
            2 => {
                assert_eq!(window.snapshot().as_slice(), model.as_slice());
            }
            _ => {
                window.clear();
                model.clear();
            }
        }

        assert_eq!(window.len(), model.len());
        window.debug_validate_invariants();

        idx += 2;
    }
});
