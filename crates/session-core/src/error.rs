use crate::store::CollabError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no candidate identity available for standalone session")]
    IdentityUnresolved,
    #[error("session record creation failed: {0}")]
    RecordCreate(CollabError),
    #[error("session record update failed: {0}")]
    RecordUpdate(CollabError),
    #[error("voice service command failed: {0}")]
    VoiceCommand(CollabError),
}

pub type Result<T> = std::result::Result<T, Error>;
