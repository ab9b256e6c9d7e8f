mod arena;
mod handle;
mod node;
mod raw_osavl_set;
mod size;

pub(crate) use handle::Link;
pub(crate) use raw_osavl_set::RawOSAvlSet;
