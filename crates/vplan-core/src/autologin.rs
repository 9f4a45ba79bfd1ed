//! Startup autologin decision.
//!
//! Evaluated fresh on every cold start from the persisted record alone.
//! Silent re-authentication requires all four fields together: the
//! autologin flag, username, password and school id. Anything missing
//! routes to the login prompt.

use crate::store::CredentialRecord;

/// What startup should do after the stored session turned out invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutologinDecision {
    /// Attempt a silent login with the stored credentials.
    Attempt {
        username: String,
        password: String,
        schoolid: String,
    },
    /// Open the login prompt.
    Prompt,
}

/// Terminal state of the startup flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupOutcome {
    /// A session is in place and the plan was refreshed.
    Ready,
    /// The login surface was opened; the user has to act.
    PromptUser,
}

/// Decide between silent re-authentication and prompting the user.
pub fn decide(record: &CredentialRecord) -> AutologinDecision {
    match (
        record.autologin,
        &record.username,
        &record.password,
        &record.schoolid,
    ) {
        (true, Some(username), Some(password), Some(schoolid)) => AutologinDecision::Attempt {
            username: username.clone(),
            password: password.clone(),
            schoolid: schoolid.clone(),
        },
        _ => AutologinDecision::Prompt,
    }
}
