pub mod error;
pub use error::*;

pub mod face;
pub use face::*;

pub mod hint;
pub use hint::*;

pub mod kind;
pub use kind::*;

pub mod parser;
pub use parser::*;

pub mod rules;
pub use rules::*;

pub mod selector;
pub use selector::*;
