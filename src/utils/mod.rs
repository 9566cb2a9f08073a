//! Shared helpers: input limits and column-name normalization.

pub mod validation;
