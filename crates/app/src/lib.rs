//! # minizoo-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define the **port trait** that storage adapters implement:
//!   - `AnimalRepository`: keyed CRUD over the animal collection
//! - Define the **use-case** layer:
//!   - `AnimalService`: find, create, update and destroy animals
//! - Provide **in-process infrastructure** that doesn't need IO
//!   (`InMemoryAnimalRepository`)
//!
//! ## Dependency rule
//! Depends on `minizoo-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod memory_repo;
pub mod ports;
pub mod services;
