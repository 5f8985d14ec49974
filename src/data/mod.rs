/// Data layer: core types and loading.
///
/// Architecture:
/// ```text
///  .json / .csv / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → ExplanationChunk with a DataRecord
///   └──────────┘
///        │
///        ▼
///   ┌────────────┐
///   │ DataRecord  │  Scalar | OneDim | TwoDim | ThreeDim
///   └────────────┘
/// ```

pub mod loader;
pub mod model;
