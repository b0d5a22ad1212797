//! IN Data form: cascading state → district → block → grampanchayat →
//! village selects in front of the SHG member fetch

pub mod control_state;
pub mod controller;
pub mod enhancer;
pub mod keyboard;
pub mod persistence;
pub mod tooltips;
