//! DTOs shared between the orders dashboard and the order-filtering backend.

pub mod domain;
