//! Employee Directory Service
//!
//! This crate tracks employees, their direct-report relationships and their
//! compensation. It computes the size of an employee's reporting subtree and
//! keeps exactly one current compensation record per employee.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod store;
