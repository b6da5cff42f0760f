use std::io::{self, Write};

use crate::sim::TickRecord;

/// Write tick records in CSV format.
///
/// Columns: tick, module, action, angle_rad, override, pitch, yaw, roll
pub fn write_ticks<W: Write>(writer: &mut W, records: &[TickRecord]) -> io::Result<()> {
    writeln!(writer, "tick,module,action,angle_rad,override,pitch,yaw,roll")?;

    for r in records {
        let module = match r.module {
            Some(m) => format!("{:?}", m).to_lowercase(),
            None => String::new(),
        };
        let (pitch, yaw, roll) = r.rates;
        writeln!(
            writer,
            "{},{},{},{:.6},{},{:.6},{:.6},{:.6}",
            r.tick,
            module,
            r.action.as_deref().unwrap_or(""),
            r.angle,
            r.gyro_override as u8,
            pitch, yaw, roll,
        )?;
    }

    Ok(())
}

/// Write tick records to a CSV file at the given path.
pub fn write_ticks_file(path: &str, records: &[TickRecord]) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_ticks(&mut file, records)
}
