/// Data layer: core types, loading, filtering, and statistics.
///
/// Architecture:
/// ```text
///  stationN_data.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse rows → drop sentinels → derive date/units
///   └──────────┘
///        │
///        ▼
///   ┌────────────────┐
///   │ WeatherDataset │  original + filtered readings
///   └────────────────┘
///        │
///        ▼
///   ┌──────────┐    ┌──────────┐
///   │  filter   │ →  │  stats    │  date range → means + wind rose
///   └──────────┘    └──────────┘
/// ```
pub mod filter;
pub mod loader;
pub mod model;
pub mod stats;
