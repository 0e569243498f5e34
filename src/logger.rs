//! # ITM Logger
//!
//! Implements the `log::Log` trait to route log messages to ITM stimulus
//! port 0, where a debug probe (SWO) picks them up.
//!
//! Messages are dropped, not queued, while the port is disabled in the
//! trace enable register, so an unattached probe never stalls the tick loop.

use core::cell::RefCell;

use cortex_m::interrupt::Mutex;
use cortex_m::peripheral::ITM;
use log::{LevelFilter, Metadata, Record, SetLoggerError};

use crate::sync;

/// Stimulus port carrying log output.
const LOG_PORT: usize = 0;

static ITM_PORT: Mutex<RefCell<Option<ITM>>> = Mutex::new(RefCell::new(None));

static LOGGER: ItmLogger = ItmLogger;

struct ItmLogger;

impl log::Log for ItmLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        sync::critical_section(|cs| {
            if let Some(itm) = ITM_PORT.borrow(cs).borrow_mut().as_mut() {
                if itm.ter[0].read() & (1 << LOG_PORT) == 0 {
                    return;
                }
                cortex_m::itm::write_fmt(
                    &mut itm.stim[LOG_PORT],
                    format_args!("[{}] {}\n", record.level(), record.args()),
                );
            }
        });
    }

    fn flush(&self) {}
}

/// Initialize the logger.
///
/// # Arguments
/// * `itm` - The ITM peripheral, owned by the logger from now on.
/// * `max_level` - The maximum log level to emit.
///
/// # Errors
/// Fails if another logger was already installed.
pub fn init(itm: ITM, max_level: LevelFilter) -> Result<(), SetLoggerError> {
    sync::critical_section(|cs| {
        ITM_PORT.borrow(cs).replace(Some(itm));
    });
    log::set_logger(&LOGGER)?;
    log::set_max_level(max_level);
    log::info!("logger initialized with level: {}", max_level);
    Ok(())
}
