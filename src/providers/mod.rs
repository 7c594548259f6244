//! Providers module - narrow clients for the GitHub REST and GraphQL APIs

pub mod github;
pub mod projects;

pub use github::GitHubClient;
pub use projects::{publish_report, with_retry, GraphQlProjectsApi, ProjectsApi, PublishConfig};
