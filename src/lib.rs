//! Debug Unlock Integration Wizard
//!
//! A conversational wizard that collects the three functions needed to wire
//! the debug-unlock core into a project, probing the workspace for hints, and
//! hands the finished configuration to a code-generation model.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
