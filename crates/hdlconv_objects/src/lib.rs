//! Object model for HDL interface declarations and their JSON interchange form.
//!
//! Every object implements [`ToJson`], producing an ordered [`JsonMap`] that a
//! generic JSON writer turns into text. A [`Port`] pairs a [`Direction`] with
//! any [`ToJson`] signal descriptor, by default a [`Variable`]. Entities,
//! packages, architectures and whole design documents build on the same
//! capability, and [`FromJson`] reads each shape back.

#![warn(missing_docs)]

pub mod architecture;
pub mod design;
pub mod direction;
pub mod entity;
pub mod error;
pub mod expr;
pub mod language;
pub mod package;
pub mod port;
pub mod to_json;
pub mod variable;

pub use architecture::{Architecture, ComponentInstance};
pub use design::Design;
pub use direction::Direction;
pub use entity::Entity;
pub use error::JsonError;
pub use expr::{Expr, Literal};
pub use language::Language;
pub use package::{PackageBody, PackageHeader};
pub use port::Port;
pub use to_json::{encode_json, FromJson, JsonMap, ToJson};
pub use variable::Variable;
