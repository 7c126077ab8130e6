//! Loading and validation for level tables, plus the locale and message
//! helpers shared by the front-ends.

pub mod load;
pub mod locale;
pub mod messages;

pub use load::*;
pub use locale::*;
pub use messages::*;
