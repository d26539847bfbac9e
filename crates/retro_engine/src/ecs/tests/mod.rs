//! Cross-module ECS tests

mod pipeline_integration;
