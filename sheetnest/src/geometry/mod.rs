mod d_transformation;

/// Set of enums representing geometric options
pub mod geo_enums;

/// Set of traits representing various geometric properties & operations
pub mod geo_traits;

/// Set of geometric primitives - atomic building blocks for the geometry module
pub mod primitives;

/// Vertex-count reduction of polygons for cheap collision approximation
pub mod simplification;

mod transformation;

#[doc(inline)]
pub use d_transformation::DTransformation;

#[doc(inline)]
pub use transformation::Transformation;
