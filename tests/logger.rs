use claimdesk::logger::{self, Logger};

#[test]
fn test_logger_keeps_newest_first() {
    let logger = Logger::new();
    assert!(logger.is_empty());

    logger.log("first".to_string());
    logger.log("second".to_string());

    let logs = logger.get_logs();
    assert_eq!(logs.len(), 2);
    assert!(logs[0].contains("second"));
    assert!(logs[1].contains("first"));
}

#[test]
fn test_logger_is_bounded() {
    let logger = Logger::new();
    for i in 0..600 {
        logger.log(format!("entry {i}"));
    }

    assert_eq!(logger.len(), 500);
    let logs = logger.get_logs();
    assert!(logs[0].contains("entry 599"));
    assert!(logs.last().unwrap().contains("entry 100"));
}

#[test]
fn test_clones_share_the_buffer() {
    let logger = Logger::new();
    let clone = logger.clone();
    clone.log("from clone".to_string());
    assert_eq!(logger.len(), 1);

    logger.clear();
    assert!(clone.is_empty());
}

#[test]
fn test_log_file_path_is_under_app_dir() {
    // No data directory in some sandboxes
    if let Ok(path) = logger::log_file_path() {
        assert!(path.ends_with("claimdesk/claimdesk.log"));
    }
}
