mod field;
mod result;
mod value;

pub use field::*;
pub use result::*;
pub use value::*;
