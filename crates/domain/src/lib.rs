//! # minizoo-domain
//!
//! Pure domain model for the minizoo animal registry.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define the **Animal** record (free-form fields plus managed timestamps)
//! - Define the **Collection** (every record keyed by its identifier)
//! - Own the merge rules applied on create and update
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod animal;
