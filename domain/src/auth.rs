use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

/// Projection of a user record returned by credential use cases.
/// The stored secret itself never leaves the credential subsystem.
#[derive(Debug, Clone)]
pub struct UserPublic {
    pub id: UserId,
    pub email: String,
    pub username: String,
    pub created_at: OffsetDateTime,
}
