#![deny(rust_2018_idioms)]

pub mod translate;
pub use translate::Translations;

pub mod table;
pub use table::{RawTable, Table, Value};

mod coerce;

pub mod load;
pub use load::function::{load, normalize};

pub mod schema;
pub use schema::intersect;

pub mod merge;
pub use merge::function::merge;

pub mod write;
pub use write::function::write;

pub mod combine;
pub use combine::function::combine;

pub mod discover;
