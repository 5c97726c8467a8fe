#![no_main]

use libfuzzer_sys::fuzz_target;
use snapq::queue::HistoryQueue;

// Fuzz the non-blocking put/get paths of HistoryQueue
//
// Drives random put_nowait/get_nowait/clear_history sequences against a
// model of the backlog and window, checking the atomic-commit rule: a
// rejected put leaves both collections untouched.
fuzz_target!(|data: &[u8]| {
    if data.len() < 3 {
        return;
    }

    let history_len = data[0] as usize % 8;
    let max_backlog = data[1] as usize % 8;
    let queue: HistoryQueue<u8> = match HistoryQueue::new(Some(history_len), max_backlog) {
        Ok(queue) => queue,
        Err(_) => return,
    };

    let mut model_window: Vec<u8> = Vec::new(); // newest first
    let mut model_backlog: Vec<Vec<u8>> = Vec::new();

    let mut idx = 2;
    while idx + 1 < data.len() {
        let op = data[idx] % 4;
        let value = data[idx + 1];

        match op {
            0 => {
                let accepted = queue.put_nowait(value).is_ok();
                let model_accepts = max_backlog == 0 || model_backlog.len() < max_backlog;
                assert_eq!(accepted, model_accepts);
                if accepted {
                    model_window.insert(0, value);
                    model_window.truncate(history_len + 1);
                    model_backlog.push(model_window.clone());
                }
            }
            1 => match queue.get_nowait() {
                Ok(snap) => {
                    assert!(!model_backlog.is_empty());
                    assert_eq!(snap.into_vec(), model_backlog.remove(0));
                }
                Err(_) => assert!(model_backlog.is_empty()),
            },
            2 => {
                queue.clear_history();
                model_window.clear();
            }
            _ => {
                assert_eq!(queue.backlog_size(), model_backlog.len());
                assert_eq!(queue.history_size(), model_window.len());
                assert_eq!(queue.history().into_vec(), model_window);
            }
        }

        idx += 2;
    }
});
