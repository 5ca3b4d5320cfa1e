//! # rescal-prep
//!
//! Data preparation for RESCAL-based link prediction over needs.
//!
//! - [`tensor`]: turns need/attribute annotations into `headers.txt`,
//!   `attrFrequency.txt` and one Matrix Market file per relation slice
//! - [`builder`]: extends an existing header axis with categories and writes the
//!   need × category incidence slice `category.mtx`
//!
//! Both stages share the header conventions in [`headers`] and the sparse slice
//! representation in [`slice`].

pub mod assignments;
pub mod builder;
pub mod error;
pub mod headers;
pub mod matrix_market;
pub mod registry;
pub mod slice;
pub mod tensor;

#[cfg(test)]
mod tests;
