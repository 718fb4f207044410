pub mod error;
pub mod field_element;
pub mod field_point;
pub mod s256point;
pub mod utils;

pub use error::{Error, Result};
pub use field_element::FieldElement;
pub use field_point::FieldPoint;
pub use s256point::S256Point;
