//! Goals module - domain models, progress engine, transitions, services, and traits.

mod goals_model;
mod goals_progress;
mod goals_service;
mod goals_traits;
mod goals_transition;

pub use goals_model::{
    Goal, GoalCategory, GoalCategoryInfo, GoalDetail, GoalType, GoalTypeInfo, GoalUpdate,
    GoalWithProgress, NewGoal,
};
pub use goals_progress::{compute_progress, has_reached_target};
pub use goals_service::GoalService;
pub use goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
pub use goals_transition::{apply_transition, ensure_owner, GoalTransition, TransitionOutcome};

pub(crate) use goals_model::{normalize_value, validate_optional_text};
