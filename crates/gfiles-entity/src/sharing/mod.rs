//! Sharing entities: shared items, attempt audit rows, folder markers.

pub mod model;

pub use model::{
    CreateSharedItem, CreateSharingAttempt, ItemType, SharedItem, SharingAttempt, SharingType,
    UserSharedFolder,
};
