use serde::Deserialize;

use crate::error::ApiError;
use crate::protocol::command::Command;
use crate::protocol::http::{Request, Response};
use crate::store::{Account, AccountStore, Role};

/// POST /register: create an account
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RegisterCmd {
    pub username: String,
    pub password: String,
    /// Accepted as a raw string so an unknown role gets its own 400 rather
    /// than a generic decode failure
    pub role: String,
}

impl RegisterCmd {
    /// Parse the register payload from a request body
    pub fn parse(request: &Request) -> Command {
        match request.json::<RegisterCmd>() {
            Ok(cmd) => Command::Register(cmd),
            Err(_) => Command::Rejected(ApiError::BadRequest("Invalid request body".to_string())),
        }
    }

    /// Execute the registration against the account store
    pub fn execute(&self, accounts: &AccountStore) -> Response {
        let role = match self.role.as_str() {
            "manager" => Role::Manager,
            "user" => Role::User,
            _ => return ApiError::BadRequest("Invalid role".to_string()).into(),
        };

        let mut all = accounts.load();
        if all.iter().any(|a| a.username == self.username) {
            return ApiError::Conflict("User already exists".to_string()).into();
        }

        all.push(Account {
            username: self.username.clone(),
            password: self.password.clone(),
            role,
        });
        accounts.save(&all);

        Response::message(200, "Registration successful!")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::testutil;

    fn register(username: &str, role: &str) -> RegisterCmd {
        RegisterCmd {
            username: username.to_string(),
            password: "pw".to_string(),
            role: role.to_string(),
        }
    }

    #[test]
    fn test_register_success() {
        let stores = testutil::stores("register-ok");
        let response = register("alice", "manager").execute(&stores.accounts);

        assert_eq!(response, Response::message(200, "Registration successful!"));
        let all = stores.accounts.load();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].username, "alice");
        assert_eq!(all[0].role, Role::Manager);
    }

    #[test]
    fn test_register_duplicate_username_conflicts() {
        let stores = testutil::stores("register-dup");
        register("alice", "manager").execute(&stores.accounts);

        // Same username with a different password and role still conflicts
        let mut second = register("alice", "user");
        second.password = "pw2".to_string();
        let response = second.execute(&stores.accounts);

        assert_eq!(response, Response::message(400, "User already exists"));
        assert_eq!(stores.accounts.load().len(), 1);
    }

    #[test]
    fn test_register_unknown_role_rejected() {
        let stores = testutil::stores("register-role");
        let response = register("mallory", "admin").execute(&stores.accounts);

        assert_eq!(response, Response::message(400, "Invalid role"));
        assert!(stores.accounts.load().is_empty());
    }
}
