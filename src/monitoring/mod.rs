/*!
 * Monitoring Module
 * Tracing and diagnostics
 */

pub mod tracer;

pub use tracer::init_tracing;
