use crate::protocol::http::Response;
use crate::store::PetStore;

/// GET /pets: the full set of available listings, unfiltered
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListPetsCmd;

impl ListPetsCmd {
    pub fn execute(&self, pets: &PetStore) -> Response {
        Response::json(200, &pets.load())
    }
}
