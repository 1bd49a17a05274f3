//! Orchestration services that drive the analysis pipeline for frontends.

pub mod navigation;

pub use navigation::{
    open_project, NavigationError, NavigationOutcome, NavigationRequest, Navigator,
};
