// Entity Models - Accounts and Pets
//
// Each entity comes in three shapes:
// - Preview: what a client would see after creation, synthesized without a store
// - Insert (New*): the fields a store needs to create the record
// - Stored: what the store hands back, with its assigned identifier

pub mod account;
pub mod pet;

pub use account::{Account, AccountPreview, NewAccount, Role};
pub use pet::{NewPet, Pet, PetPreview};

/// Synthesize an opaque identifier shaped like a document-store ObjectId
/// (24 lowercase hex characters).
///
/// Clients must not rely on the encoding, only on uniqueness.
pub fn new_object_id() -> String {
    let mut id = uuid::Uuid::new_v4().simple().to_string();
    id.truncate(24);
    id
}
