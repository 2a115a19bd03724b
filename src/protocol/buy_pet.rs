use serde::Deserialize;

use crate::error::ApiError;
use crate::protocol::command::Command;
use crate::protocol::http::{Request, Response};
use crate::store::{AccountStore, PetStore, Role};

/// POST /buy-pet: purchase a listing (users only; managers cannot buy)
///
/// A successful purchase deletes the listing outright; there is no sold
/// state and no receipt artifact.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyPetCmd {
    pub username: String,
    /// Arrives as a JSON number or a numeric string; matched loosely
    /// against stored ids. An absent id matches nothing.
    #[serde(default)]
    pub pet_id: serde_json::Value,
}

impl BuyPetCmd {
    /// Parse the purchase payload from a request body
    pub fn parse(request: &Request) -> Command {
        match request.json::<BuyPetCmd>() {
            Ok(cmd) => Command::BuyPet(cmd),
            Err(_) => Command::Rejected(ApiError::BadRequest("Invalid request body".to_string())),
        }
    }

    /// The supplied id as u64, whichever JSON shape it came in
    fn wanted_id(&self) -> Option<u64> {
        match &self.pet_id {
            serde_json::Value::Number(n) => n.as_u64(),
            serde_json::Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Execute the purchase against the stores
    pub fn execute(&self, accounts: &AccountStore, pets: &PetStore) -> Response {
        let all = accounts.load();
        let is_user = all
            .iter()
            .any(|a| a.username == self.username && a.role == Role::User);
        if !is_user {
            return ApiError::Forbidden("Only users can buy pets.".to_string()).into();
        }

        let mut listed = pets.load();
        let wanted = self.wanted_id();
        let Some(index) = listed.iter().position(|p| Some(p.id) == wanted) else {
            return ApiError::NotFound("Pet not found".to_string()).into();
        };

        listed.remove(index);
        pets.save(&listed);

        Response::message(200, "Pet purchased successfully!")
    }
}
