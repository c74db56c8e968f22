pub(crate) mod db;
pub(crate) mod helpers;
