//! Built-in rules.

mod boolean;
mod bytes;
mod cary;
mod numeric;
mod replace;
mod text;
mod unique;
mod upc;

pub use boolean::Boolean;
pub use bytes::Bytes;
pub use cary::Cary;
pub use numeric::{Float, Integer, parse_float, parse_integer};
pub use replace::{NoneToEmptyString, ReplaceValue, Static};
pub use text::{CapitalizeWords, Contains, Drop, Lower, RemoveLinebreaks, Strip, Upper};
pub use unique::Unique;
pub use upc::{UpcA, upc_a_check_digit};
