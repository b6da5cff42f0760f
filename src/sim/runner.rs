use crate::program::{ActiveModule, FlightAssist};
use crate::vehicle::ShipController;

// ---------------------------------------------------------------------------
// Tick record
// ---------------------------------------------------------------------------

/// Program state captured after one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TickRecord {
    pub tick: u64,
    pub module: Option<ActiveModule>,
    pub action: Option<String>,
    pub angle: f64,             // rad, controller misalignment
    pub gyro_override: bool,
    pub rates: (f64, f64, f64), // first gyro (pitch, yaw, roll)
}

impl TickRecord {
    pub fn capture<S: ShipController>(tick: u64, program: &FlightAssist<S>) -> Self {
        let gyros = program.gyros();
        Self {
            tick,
            module: program.active(),
            action: program.active_action().map(str::to_string),
            angle: gyros.angle(),
            gyro_override: gyros.is_override(),
            rates: gyros.gyros().first().map_or((0.0, 0.0, 0.0), |g| g.rates()),
        }
    }
}

// ---------------------------------------------------------------------------
// Tick loop
// ---------------------------------------------------------------------------

/// Tick `program` `ticks` times, calling `script` before each tick so the
/// caller can feed telemetry or commands. Returns one record per tick.
pub fn run_with<S, F>(program: &mut FlightAssist<S>, ticks: u64, mut script: F) -> Vec<TickRecord>
where
    S: ShipController,
    F: FnMut(u64, &mut FlightAssist<S>),
{
    let mut records = Vec::with_capacity(record_capacity(ticks));
    for tick in 0..ticks {
        script(tick, program);
        program.tick();
        records.push(TickRecord::capture(tick, program));
    }
    records
}

/// Upper bound on records reserved up front; longer runs grow on demand.
const MAX_PREALLOCATED_RECORDS: usize = 200_000;

fn record_capacity(ticks: u64) -> usize {
    usize::try_from(ticks).unwrap_or(usize::MAX).min(MAX_PREALLOCATED_RECORDS)
}

/// Tick with unchanging telemetry (convenience wrapper).
pub fn run<S: ShipController>(program: &mut FlightAssist<S>, ticks: u64) -> Vec<TickRecord> {
    run_with(program, ticks, |_, _| {})
}
