//! Parameter resolution shared by every macro
//!
//! - `resolver` - override / default / identity precedence
//! - `label` - display labels and column keys
//! - `accessor` - table-driven `<metric>_parameter` / `<metric>_field` requests

pub mod accessor;
pub mod label;
pub mod resolver;

pub use accessor::{Accessor, AccessorKind, AccessorTable};
pub use label::{key_for, label_for};
pub use resolver::{
    ParameterDefault, ParameterOverrides, ParameterResolver, ParameterResolverBuilder, Supplier,
};
