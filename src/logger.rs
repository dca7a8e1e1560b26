use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;

const LOG_DIR: &str = "logs";
const LOG_FILE: &str = "campus-rms.log";

/// Sets up the global logger once at startup.
///
/// The level comes from `RUST_LOG` and defaults to `info`. Output goes to
/// stderr with colored levels and, when the log directory is writable, to
/// `logs/campus-rms.log` without colors.
pub fn init() {
    let level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|value| value.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Info);

    let colors = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Green)
        .debug(Color::Blue)
        .trace(Color::BrightBlack);

    let stderr_log = fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                colors.color(record.level()),
                record.target(),
                message
            ))
        })
        .chain(std::io::stderr());

    let mut dispatch = fern::Dispatch::new().level(level).chain(stderr_log);

    if std::fs::create_dir_all(LOG_DIR).is_ok() {
        match fern::log_file(format!("{LOG_DIR}/{LOG_FILE}")) {
            Ok(file) => {
                let file_log = fern::Dispatch::new()
                    .format(|out, message, record| {
                        out.finish(format_args!(
                            "[{} {} {}] {}",
                            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                            record.level(),
                            record.target(),
                            message
                        ))
                    })
                    .chain(file);
                dispatch = dispatch.chain(file_log);
            }
            Err(e) => eprintln!("Failed to open log file in '{LOG_DIR}': {e}"),
        }
    } else {
        eprintln!("Failed to create log directory '{LOG_DIR}'");
    }

    if let Err(e) = dispatch.apply() {
        eprintln!("Failed to apply logger configuration: {e}");
    }
}
