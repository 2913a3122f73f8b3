use std::f64::consts::PI;
use std::path::Path;

const SENTINEL: f64 = -9999.0;
const HOURS: u32 = 24 * 90;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
        mean + std_dev * z
    }
}

/// Synthetic climate per station: phase-shifted seasonal and diurnal
/// temperature cycles, a slow pressure wave, a prevailing wind direction.
struct Station {
    name: &'static str,
    mean_temp: f64,
    diurnal_amp: f64,
    prevailing_direction: f64,
}

const STATIONS: [Station; 3] = [
    Station {
        name: "station1_data",
        mean_temp: 4.0,
        diurnal_amp: 5.0,
        prevailing_direction: 250.0,
    },
    Station {
        name: "station2_data",
        mean_temp: 11.0,
        diurnal_amp: 8.0,
        prevailing_direction: 120.0,
    },
    Station {
        name: "station3_data",
        mean_temp: -6.0,
        diurnal_amp: 3.0,
        prevailing_direction: 20.0,
    },
];

fn main() {
    std::fs::create_dir_all("data").expect("Failed to create data directory");

    let mut csv_files = Vec::new();
    for (i, station) in STATIONS.iter().enumerate() {
        let mut rng = SimpleRng::new(42 + i as u64);
        let path = format!("data/{}.csv", station.name);
        write_station(Path::new(&path), station, &mut rng)
            .expect("Failed to write station CSV");
        csv_files.push(path);
    }

    // Matching widget config so `cargo run` picks the files up directly.
    let config = serde_json::json!({
        "title": "Weathervane – Sample Stations",
        "csv_files": csv_files,
    });
    std::fs::write(
        "weathervane.json",
        serde_json::to_string_pretty(&config).expect("Failed to serialize config"),
    )
    .expect("Failed to write weathervane.json");

    println!(
        "Wrote {} stations ({HOURS} hourly readings each) and weathervane.json",
        STATIONS.len()
    );
}

fn write_station(path: &Path, station: &Station, rng: &mut SimpleRng) -> csv::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([
        "year",
        "month",
        "day",
        "hour",
        "temp_air",
        "pressure",
        "wind_speed",
        "wind_direction",
    ])?;

    // 90 days of hourly readings starting 2016-01-01, flat month lengths
    // kept valid (Jan, Feb, Mar 2016 all have the days we emit).
    let month_days: [(u32, u32); 3] = [(1, 31), (2, 29), (3, 31)];
    let mut hours_emitted = 0u32;

    'outer: for (month, days) in month_days {
        for day in 1..=days {
            for hour in 0..24 {
                if hours_emitted == HOURS {
                    break 'outer;
                }
                let t = f64::from(hours_emitted);

                let seasonal = 6.0 * (2.0 * PI * t / (24.0 * 365.0) - PI / 2.0).sin();
                let diurnal = station.diurnal_amp * (2.0 * PI * (t % 24.0) / 24.0 - PI / 2.0).sin();
                let temp = station.mean_temp + seasonal + diurnal + rng.gauss(0.0, 0.8);

                let pressure = 1013.0 + 9.0 * (2.0 * PI * t / (24.0 * 11.0)).sin()
                    + rng.gauss(0.0, 1.5);

                let wind_speed = rng.gauss(4.0, 2.0).abs();
                let wind_direction =
                    (station.prevailing_direction + rng.gauss(0.0, 40.0)).rem_euclid(360.0);

                // Sensor dropout: each measured field independently goes
                // missing about 2% of the time.
                let temp = dropout(temp, rng);
                let pressure = dropout(pressure, rng);
                let wind_speed = dropout(wind_speed, rng);
                let wind_direction = dropout(wind_direction, rng);

                writer.write_record([
                    "2016".to_string(),
                    month.to_string(),
                    day.to_string(),
                    hour.to_string(),
                    format!("{temp:.1}"),
                    format!("{pressure:.1}"),
                    format!("{wind_speed:.1}"),
                    format!("{wind_direction:.1}"),
                ])?;
                hours_emitted += 1;
            }
        }
    }

    writer.flush()?;
    Ok(())
}

fn dropout(value: f64, rng: &mut SimpleRng) -> f64 {
    if rng.next_f64() < 0.02 {
        SENTINEL
    } else {
        value
    }
}
