//! Core domain types for emojigen.
//!
//! - `Colour` - RGBA colour values and the named face colours
//! - `Expression` - mouth/eye variants
//! - `Appearance` - the (colour, expression, size) rendering input
//! - `Region` - pixel bounding boxes for colour sampling

mod appearance;
mod colour;
mod expression;
mod region;

pub use appearance::{check_size, Appearance, DEFAULT_SIZE, MAX_SIZE};
pub use colour::Colour;
pub use expression::Expression;
pub use region::Region;
