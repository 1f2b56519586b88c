use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming};

use crate::config::GateConfig;

/// Start the global logger.
///
/// The spec comes from `config.log_spec` alone (RUST_LOG is already folded in
/// by [`GateConfig::from_env`] and may be overridden by CLI flags). Logs go to
/// stderr unless a log directory is configured, in which case they are
/// written to size-rotated files. Keep the returned handle alive for the
/// lifetime of the process.
pub fn setup_logging(config: &GateConfig) -> Result<LoggerHandle, flexi_logger::FlexiLoggerError> {
    let logger = Logger::try_with_str(&config.log_spec)?;

    match &config.log_dir {
        Some(dir) => logger
            .log_to_file(FileSpec::default().directory(dir))
            .format(flexi_logger::opt_format)
            .rotate(
                Criterion::Size(10 * 1024 * 1024), // Rotate logs after they reach 10 MB
                Naming::Numbers,
                Cleanup::KeepLogFiles(7),
            )
            .start(),
        None => logger.format(flexi_logger::colored_default_format).start(),
    }
}
