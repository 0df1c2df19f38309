pub mod git;
pub mod github;
pub mod secret;
