use mazewalk::app::App;

fn main() -> std::io::Result<()> {
    let app = App::from_env();
    // Flushes the log file when dropped
    let _log_guard = app.init_logging();
    app.run()
}
