use routeviz_core::logs;
use tempdir::TempDir;

// own test binary: installing the global logger is a once-per-process affair

#[test]
fn init_writes_under_the_cache_dir() {
    let dir = TempDir::new("routeviz_logs").unwrap();
    let cache_dir = dir.path().to_str().unwrap().to_string();

    logs::init(&cache_dir).unwrap();
    log::warn!("smoke");
    log::logger().flush();

    assert!(dir.path().join("logs").exists());

    // the global logger is already installed now
    assert!(logs::init(&cache_dir).is_err());
}
