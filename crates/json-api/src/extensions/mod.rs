//! Extension traits

mod depot;
mod result;

pub(crate) use depot::DepotExt as _;
pub(crate) use result::{ResultExt as _, configure_error_details, internal_error};
