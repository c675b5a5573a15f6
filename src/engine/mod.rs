//! Engine modules — turns resolved descriptors into an apply sequence.
//!
//! The engine layer sits between resolution (what the machine should look
//! like) and the external apply mechanism. It produces ordered, validated
//! plans from the descriptors' dependency edges.

pub mod order;
