use std::io::Write;

use flexi_logger::{DeferredNow, style};
use log::{Level, Record};

/// Info lines print bare; other levels get a coloured level prefix.
pub fn cli_format(
    w: &mut dyn Write,
    _now: &mut DeferredNow,
    record: &Record,
) -> Result<(), std::io::Error> {
    let level = record.level();
    if level == Level::Info {
        return write!(w, "{}", record.args());
    }
    let label = level.as_str().to_lowercase();
    write!(w, "{}: {}", style(level).paint(label), record.args())
}
