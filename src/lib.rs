//! Exam-hall seat allotment: interleaves a student roster by branch, checks it fits the
//! available halls, and seats it bench by bench, keeping bench partners from different
//! branches where possible.
//!
//! The pipeline in [`allotment`] is pure; [`storage`], [`report`] and the HTTP layer in
//! [`server`] wrap it.

pub mod allotment;
pub mod api_json;
pub mod config;
pub mod error;
pub mod models;
pub mod report;
pub mod server;
pub mod storage;

pub use allotment::{generate_plan, generate_plan_with_policy, SwapPolicy};
pub use server::run_server;
