use tracing::error;

use crate::error::ApiError;
use crate::protocol::command::Command;
use crate::protocol::http::{Request, Response};
use crate::protocol::multipart::{self, FilePart};
use crate::store::{AccountStore, Pet, PetStore, Role};
use crate::upload::UploadStore;

/// POST /add-pet: create a listing (managers only)
///
/// Arrives as multipart form data with fields `username`, `petName`,
/// `petType`, `price` and an optional file field `image`.
#[derive(Debug, Clone, PartialEq)]
pub struct AddPetCmd {
    pub username: String,
    pub pet_name: String,
    pub pet_type: String,
    pub price: String,
    pub image: Option<FilePart>,
}

impl AddPetCmd {
    /// Parse the multipart payload from a request
    pub fn parse(request: &Request) -> Command {
        let boundary = request
            .header("content-type")
            .and_then(multipart::boundary);
        let Some(boundary) = boundary else {
            return Command::Rejected(ApiError::BadRequest(
                "Expected multipart form data".to_string(),
            ));
        };

        let Some(mut form) = multipart::parse(&request.body, &boundary) else {
            return Command::Rejected(ApiError::BadRequest(
                "Malformed multipart body".to_string(),
            ));
        };

        let field = |name: &str| form.field(name).map(str::to_string);
        let (Some(username), Some(pet_name), Some(pet_type), Some(price)) = (
            field("username"),
            field("petName"),
            field("petType"),
            field("price"),
        ) else {
            return Command::Rejected(ApiError::BadRequest("Missing form field".to_string()));
        };

        // Only the attachment under the `image` field counts
        let image = form.file.take().filter(|f| f.name == "image");

        Command::AddPet(AddPetCmd {
            username,
            pet_name,
            pet_type,
            price,
            image,
        })
    }

    /// Execute the listing creation against the stores
    pub fn execute(
        &self,
        accounts: &AccountStore,
        pets: &PetStore,
        uploads: &UploadStore,
    ) -> Response {
        let all = accounts.load();
        let is_manager = all
            .iter()
            .any(|a| a.username == self.username && a.role == Role::Manager);
        if !is_manager {
            return ApiError::Forbidden("Only managers can add pets.".to_string()).into();
        }

        // A failed upload write degrades to an empty image reference, like
        // every other swallowed storage write
        let image_url = match &self.image {
            Some(file) => match uploads.store(file) {
                Ok(url) => url,
                Err(e) => {
                    error!("{}", e);
                    String::new()
                }
            },
            None => String::new(),
        };

        let mut listed = pets.load();
        let pet = Pet {
            id: pets.allocate_id(),
            pet_name: self.pet_name.clone(),
            pet_type: self.pet_type.clone(),
            price: self.price.clone(),
            image_url,
        };
        listed.push(pet.clone());
        pets.save(&listed);

        Response::json(
            200,
            &serde_json::json!({
                "message": "Pet added successfully!",
                "pet": pet,
            }),
        )
    }
}
