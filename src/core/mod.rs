//! Operation layer tying the domain aggregates together.

pub mod services;
