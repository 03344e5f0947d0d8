//! SemMatch HTTP server library (router, handlers and the per-domain engine registry).

pub mod gateway;
