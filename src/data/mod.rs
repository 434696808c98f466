/// Data layer: core types, loading, and column classification.
///
/// Architecture:
/// ```text
///  .csv file / uploaded bytes
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse CSV, infer column types → Table
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Table    │  Vec<Column>, each Numeric or Text
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  schema   │  column name → Numeric / Other
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod schema;
