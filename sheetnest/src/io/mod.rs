/// External (serializable) representations of requests and solutions
pub mod ext_repr;

/// Conversion of external shapes into internal polygons
pub mod import;

/// Conversion of internal results into external solutions
pub mod export;
