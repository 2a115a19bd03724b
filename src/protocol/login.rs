use serde::Deserialize;

use crate::error::ApiError;
use crate::protocol::command::Command;
use crate::protocol::http::{Request, Response};
use crate::store::AccountStore;

/// POST /login: check credentials
///
/// No session or token is issued; the caller keeps the returned role
/// client-side.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginCmd {
    pub username: String,
    pub password: String,
}

impl LoginCmd {
    /// Parse the login payload from a request body
    pub fn parse(request: &Request) -> Command {
        match request.json::<LoginCmd>() {
            Ok(cmd) => Command::Login(cmd),
            Err(_) => Command::Rejected(ApiError::BadRequest("Invalid request body".to_string())),
        }
    }

    /// Execute the login against the account store
    pub fn execute(&self, accounts: &AccountStore) -> Response {
        let all = accounts.load();
        let account = all
            .iter()
            .find(|a| a.username == self.username && a.password == self.password);

        match account {
            Some(account) => Response::json(
                200,
                &serde_json::json!({
                    "message": "Login successful",
                    "role": account.role,
                }),
            ),
            None => ApiError::Unauthorized("Invalid credentials".to_string()).into(),
        }
    }
}
