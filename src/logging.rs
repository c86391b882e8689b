use env_logger::{Builder, WriteStyle};
use log::{LevelFilter, Record};
use std::io::{self, Write};

const CRATE_TARGET: &str = env!("CARGO_CRATE_NAME");

/// `sim::suspension` for this crate's records, the full target for anyone else's
fn short_target<'a>(record: &'a Record) -> &'a str {
    record
        .target()
        .strip_prefix(CRATE_TARGET)
        .and_then(|target| target.strip_prefix("::"))
        .unwrap_or(record.target())
}

fn write_record(buf: &mut impl Write, record: &Record) -> io::Result<()> {
    // per-wheel probe lines need the module to be readable in a mixed stream
    if record.level() >= log::Level::Debug {
        writeln!(
            buf,
            "[STEERSIM | {} {}] {}",
            record.level(),
            short_target(record),
            record.args()
        )
    } else {
        writeln!(buf, "[STEERSIM | {}] {}", record.level(), record.args())
    }
}

fn builder() -> Builder {
    let mut builder = env_logger::builder();
    builder
        .format(|buf, record| write_record(buf, record))
        .write_style(WriteStyle::Always)
        .filter_module(CRATE_TARGET, LevelFilter::Info)
        .filter_level(LevelFilter::Warn)
        .parse_default_env();

    builder
}

pub(crate) fn try_init() -> Result<(), log::SetLoggerError> {
    builder().try_init()
}
