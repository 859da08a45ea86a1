//! Publication aggregate (posts about courses or professors, and their comments)

pub mod model;
pub mod repository;

pub use model::{CommentView, NewComment, NewPublication, PublicationKind, PublicationView};
pub use repository::PublicationRepository;
