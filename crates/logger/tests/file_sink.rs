//! File sink behaviour (kept in its own test binary because the sink is global)

#![cfg(feature = "file-logging")]

use logger::{close_file_logging, error, info, init_file_logging, set_level, warn, Level};
use std::fs;

#[test]
fn tagged_messages_are_written_to_the_log_file() {
    let dir = tempfile::TempDir::new().expect("temp dir");
    let log_path = dir.path().join("logs").join("degreeplan.log");

    set_level(Level::Info);
    assert!(init_file_logging(&log_path));

    info!("semester {} closed with {} credits", 1, 15);
    warn!("prerequisite MATH 9999 is not in the catalog");
    error!("planning stalled");

    #[cfg(feature = "verbose")]
    {
        logger::enable_verbose();
        logger::verbose!("verbose lines stay on the console");
    }

    close_file_logging();

    let contents = fs::read_to_string(&log_path).expect("read log file");
    assert!(contents.contains("[INFO] semester 1 closed with 15 credits"));
    assert!(contents.contains("[WARN] prerequisite MATH 9999 is not in the catalog"));
    assert!(contents.contains("[ERROR] planning stalled"));
    assert!(!contents.contains("verbose lines"));
}
