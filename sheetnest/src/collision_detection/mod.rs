mod detector;

#[doc(inline)]
pub use detector::{CollisionKind, collides, detect_collision, min_separation};
