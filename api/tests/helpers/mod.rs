#![allow(dead_code)]

pub mod app;

pub use app::{body_json, make_test_app, request, seed_user};
