//! Link generation commands: single company, CSV batch, verification listing
//! and the interactive prompt.

pub mod batch;
pub mod commands;
pub mod interactive;
pub mod passwords;
pub mod report;

use crate::page_api::{CreatePageRequest, PageApi};

pub use commands::{run_batch, run_generate, run_verify};
pub use interactive::run_interactive;
pub use passwords::{PasswordArgs, PasswordSource};

/// Optional page metadata forwarded to the page API.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageDetails {
    pub industry: Option<String>,
    pub website: Option<String>,
    pub contact_email: Option<String>,
    pub contact_name: Option<String>,
}

impl PageDetails {
    pub fn into_request(
        self,
        company_name: &str,
        password: String,
        expires_in_days: Option<u32>,
    ) -> CreatePageRequest {
        CreatePageRequest {
            company_name: company_name.to_string(),
            industry: self.industry,
            website: self.website,
            contact_email: self.contact_email,
            contact_name: self.contact_name,
            password: Some(password),
            expires_in_days,
        }
    }
}

/// Whether results are only printed or also created through the page API.
#[derive(Clone, Copy)]
pub enum Delivery<'a> {
    DryRun,
    Create(&'a dyn PageApi),
}
