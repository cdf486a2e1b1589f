mod instance;
mod layout;
mod placed_shape;
mod result;
mod shape_info;

#[doc(inline)]
pub use instance::NestInstance;
#[doc(inline)]
pub use layout::Layout;
#[doc(inline)]
pub use placed_shape::PlacedShape;
#[doc(inline)]
pub use result::NestingResult;
#[doc(inline)]
pub use shape_info::{Orientation, ShapeInfo, ShapeKey};
