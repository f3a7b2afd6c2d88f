//! Pure computational core: occurrence scheduling and recommendation scoring.
//!
//! Both modules are stateless, synchronous functions over data fetched by the
//! caller; they perform no I/O and raise no domain errors of their own.

pub mod recommender;
pub mod schedule;
