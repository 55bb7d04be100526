/*!
 * Monitoring Module
 * Tracing initialization
 */

pub mod tracer;

pub use tracer::init_tracing;
