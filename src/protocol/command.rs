use crate::error::ApiError;
use crate::protocol::add_pet::AddPetCmd;
use crate::protocol::buy_pet::BuyPetCmd;
use crate::protocol::http::{Request, Response};
use crate::protocol::login::LoginCmd;
use crate::protocol::pets::ListPetsCmd;
use crate::protocol::register::RegisterCmd;
use crate::protocol::uploads::ServeUploadCmd;
use crate::store::Stores;

/// Marketplace command types
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// POST /register
    Register(RegisterCmd),
    /// POST /login
    Login(LoginCmd),
    /// POST /add-pet
    AddPet(AddPetCmd),
    /// POST /buy-pet
    BuyPet(BuyPetCmd),
    /// GET /pets
    ListPets(ListPetsCmd),
    /// GET /uploads/<file>
    ServeUpload(ServeUploadCmd),
    /// OPTIONS preflight from a browser client
    Preflight,
    /// Request that failed routing or payload decoding; carries the error
    /// to report
    Rejected(ApiError),
}

impl Command {
    /// Route a parsed request to a command
    fn from_request(request: &Request) -> Self {
        match (request.method.as_str(), request.path.as_str()) {
            ("OPTIONS", _) => Command::Preflight,
            ("POST", "/register") => RegisterCmd::parse(request),
            ("POST", "/login") => LoginCmd::parse(request),
            ("POST", "/add-pet") => AddPetCmd::parse(request),
            ("POST", "/buy-pet") => BuyPetCmd::parse(request),
            ("GET", "/pets") => Command::ListPets(ListPetsCmd),
            ("GET", path) if path.starts_with("/uploads/") => ServeUploadCmd::parse(path),
            _ => Command::Rejected(ApiError::NotFound("Not found".to_string())),
        }
    }

    /// Execute the command against the stores and return the response
    fn execute_internal(&self, stores: &Stores) -> Response {
        match self {
            Command::Register(cmd) => cmd.execute(&stores.accounts),
            Command::Login(cmd) => cmd.execute(&stores.accounts),
            Command::AddPet(cmd) => cmd.execute(&stores.accounts, &stores.pets, &stores.uploads),
            Command::BuyPet(cmd) => cmd.execute(&stores.accounts, &stores.pets),
            Command::ListPets(cmd) => cmd.execute(&stores.pets),
            Command::ServeUpload(cmd) => cmd.execute(&stores.uploads),
            Command::Preflight => Response::no_content(),
            Command::Rejected(err) => err.clone().into(),
        }
    }

    /// Route and execute one request against the stores
    pub fn execute(request: &Request, stores: &Stores) -> Response {
        Self::from_request(request).execute_internal(stores)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::testutil;

    fn post(path: &str, body: &str) -> Request {
        Request {
            method: "POST".to_string(),
            path: path.to_string(),
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: body.as_bytes().to_vec(),
        }
    }

    fn get(path: &str) -> Request {
        Request {
            method: "GET".to_string(),
            path: path.to_string(),
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    #[test]
    fn test_route_register() {
        let request = post(
            "/register",
            r#"{"username":"alice","password":"pw","role":"manager"}"#,
        );
        match Command::from_request(&request) {
            Command::Register(cmd) => {
                assert_eq!(cmd.username, "alice");
                assert_eq!(cmd.role, "manager");
            }
            other => panic!("Expected Register, got {:?}", other),
        }
    }

    #[test]
    fn test_route_unknown_path() {
        let request = get("/nope");
        assert_eq!(
            Command::from_request(&request),
            Command::Rejected(ApiError::NotFound("Not found".to_string()))
        );
    }

    #[test]
    fn test_route_preflight() {
        let mut request = get("/register");
        request.method = "OPTIONS".to_string();
        assert_eq!(Command::from_request(&request), Command::Preflight);
    }

    #[test]
    fn test_execute_register_then_login() {
        let stores = testutil::stores("cmd-register-login");

        let response = Command::execute(
            &post(
                "/register",
                r#"{"username":"alice","password":"pw","role":"manager"}"#,
            ),
            &stores,
        );
        assert_eq!(response.status, 200);

        let response = Command::execute(
            &post("/login", r#"{"username":"alice","password":"pw"}"#),
            &stores,
        );
        assert_eq!(response.status, 200);
        let body: serde_json::Value = serde_json::from_slice(&response.body).unwrap();
        assert_eq!(body["role"], "manager");
    }

    #[test]
    fn test_execute_unknown_route_is_404() {
        let stores = testutil::stores("cmd-unknown");
        let response = Command::execute(&get("/nope"), &stores);
        assert_eq!(response.status, 404);
    }

    #[test]
    fn test_execute_malformed_json_is_400() {
        let stores = testutil::stores("cmd-badjson");
        let response = Command::execute(&post("/login", "{not json"), &stores);
        assert_eq!(response.status, 400);
    }
}
