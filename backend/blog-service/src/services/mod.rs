/// Business logic layer
///
/// Services compose repositories with validation and the access policy.
/// Each service holds a pool handle and is constructed per request by the
/// handlers.
pub mod comments;
pub mod follow;
pub mod groups;
pub mod posts;

pub use comments::CommentService;
pub use follow::FollowService;
pub use groups::GroupService;
pub use posts::PostService;
